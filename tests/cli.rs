use assert_cmd::Command;
use minnool::messages;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;

fn minnool(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("minnool").unwrap();
    cmd.env("MINNOOL_HOME", home)
        .env_remove("MINNOOL_LOG")
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY");
    cmd
}

/// Writes a minimal .docx with one paragraph per entry.
fn write_docx(path: &Path, paragraphs: &[&str]) {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let file = fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
}

fn library_file(home: &Path) -> std::path::PathBuf {
    home.join("tamil_pdf_reader_books.json")
}

#[test]
fn empty_library_lists_hint() {
    let home = tempfile::tempdir().unwrap();
    minnool(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(messages::LIBRARY_EMPTY));
}

#[test]
fn import_list_and_read() {
    let home = tempfile::tempdir().unwrap();
    let doc = home.path().join("Thirukkural.docx");
    write_docx(&doc, &["அகர முதல எழுத்தெல்லாம்", "ஆதி பகவன் முதற்றே உலகு"]);

    minnool(home.path())
        .arg("import")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported: Thirukkural"));

    minnool(home.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains(messages::books_saved(1)))
        .stdout(predicate::str::contains("1. Thirukkural"));

    minnool(home.path())
        .args(["read", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "அகர முதல எழுத்தெல்லாம்\n\nஆதி பகவன் முதற்றே உலகு",
        ));

    minnool(home.path())
        .args(["read", "kural", "--lines", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ஆதி பகவன்"))
        .stdout(predicate::str::contains("அகர முதல").not());
}

#[test]
fn empty_word_document_gets_placeholder() {
    let home = tempfile::tempdir().unwrap();
    let doc = home.path().join("poem.docx");
    write_docx(&doc, &["   ", ""]);

    minnool(home.path())
        .arg("import")
        .arg(&doc)
        .assert()
        .success()
        .stderr(predicate::str::contains(messages::WORD_EMPTY_PLACEHOLDER));

    minnool(home.path())
        .args(["read", "poem"])
        .assert()
        .success()
        .stdout(predicate::str::contains(messages::WORD_EMPTY_PLACEHOLDER));
}

#[test]
fn unsupported_file_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let notes = home.path().join("notes.txt");
    fs::write(&notes, "plain text").unwrap();

    minnool(home.path())
        .arg("import")
        .arg(&notes)
        .assert()
        .failure()
        .stderr(predicate::str::contains(messages::UNSUPPORTED_FORMAT));

    assert!(!library_file(home.path()).exists());
}

#[test]
fn broken_word_file_reports_read_error() {
    let home = tempfile::tempdir().unwrap();
    let doc = home.path().join("broken.docx");
    fs::write(&doc, "this is not a zip archive").unwrap();

    minnool(home.path())
        .arg("import")
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains(messages::WORD_READ_FAILED));
}

#[test]
fn share_prints_whatsapp_link() {
    let home = tempfile::tempdir().unwrap();
    let doc = home.path().join("Kavithai.docx");
    write_docx(&doc, &["வரி ஒன்று"]);
    minnool(home.path()).arg("import").arg(&doc).assert().success();

    let expected = format!(
        "https://wa.me/?text={}",
        urlencoding::encode("*Kavithai*\n\nவரி ஒன்று")
    );
    minnool(home.path())
        .args(["share", "whatsapp", "1", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));

    minnool(home.path())
        .args(["share", "telegram", "1", "--lines", "1", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "https://t.me/share/url?url=%20&text=",
        ))
        .stdout(predicate::str::contains(
            urlencoding::encode(messages::SELECTION_MARKER).into_owned(),
        ));
}

#[test]
fn delete_with_yes_removes_book() {
    let home = tempfile::tempdir().unwrap();
    let doc = home.path().join("Gone.docx");
    write_docx(&doc, &["text"]);
    minnool(home.path()).arg("import").arg(&doc).assert().success();

    minnool(home.path())
        .args(["delete", "--yes", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted (1): Gone"));

    minnool(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(messages::LIBRARY_EMPTY));
}

#[test]
fn declined_delete_keeps_book() {
    let home = tempfile::tempdir().unwrap();
    let doc = home.path().join("Kept.docx");
    write_docx(&doc, &["text"]);
    minnool(home.path()).arg("import").arg(&doc).assert().success();

    minnool(home.path())
        .args(["rm", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(messages::CONFIRM_DELETE))
        .stdout(predicate::str::contains("Operation cancelled."));

    minnool(home.path())
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("1. Kept"));
}

#[test]
fn missing_index_fails() {
    let home = tempfile::tempdir().unwrap();
    minnool(home.path())
        .args(["read", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Index 5 not found in library"));
}

#[test]
fn corrupt_library_is_reported_and_backed_up() {
    let home = tempfile::tempdir().unwrap();
    fs::write(library_file(home.path()), "not json at all").unwrap();

    minnool(home.path())
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("library data could not be read"))
        .stdout(predicate::str::contains(messages::LIBRARY_EMPTY));

    let backups = fs::read_dir(home.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_string_lossy()
                .starts_with("tamil_pdf_reader_books.corrupt-")
        })
        .count();
    assert_eq!(backups, 1);
}

#[test]
fn concurrent_import_is_refused() {
    let home = tempfile::tempdir().unwrap();
    let doc = home.path().join("Wait.docx");
    write_docx(&doc, &["text"]);
    fs::write(home.path().join("import.lock"), "999999\n").unwrap();

    minnool(home.path())
        .arg("import")
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains(messages::IMPORT_IN_PROGRESS));

    assert!(!library_file(home.path()).exists());
}

#[test]
fn clean_without_api_key_prints_raw_text() {
    let home = tempfile::tempdir().unwrap();
    let doc = home.path().join("Raw.docx");
    write_docx(&doc, &["மூல உரை"]);
    minnool(home.path()).arg("import").arg(&doc).assert().success();

    minnool(home.path())
        .args(["clean", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("மூல உரை"))
        .stderr(predicate::str::contains("clean-up unavailable"));
}

#[test]
fn config_set_and_show() {
    let home = tempfile::tempdir().unwrap();

    minnool(home.path())
        .args(["config", "cleanup-timeout", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cleanup-timeout set to 30"));

    minnool(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("cleanup-timeout = 30"))
        .stdout(predicate::str::contains("cleanup-model = gemini-3-flash-preview"));

    minnool(home.path())
        .args(["config", "colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: colour"));
}
