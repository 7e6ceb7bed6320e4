//! User-facing Tamil strings.
//!
//! Everything a reader sees in the terminal goes through here so the wording
//! stays consistent across the extractor, the commands and the CLI.

pub const UNSUPPORTED_FORMAT: &str =
    "தயவுசெய்து PDF அல்லது Word (.docx) கோப்பை மட்டும் தேர்ந்தெடுக்கவும்.";

pub const PDF_READ_FAILED: &str = "PDF கோப்பைப் படிப்பதில் பிழை ஏற்பட்டது.";
pub const WORD_READ_FAILED: &str = "Word கோப்பைப் படிப்பதில் பிழை ஏற்பட்டது.";

pub const PDF_EMPTY_PLACEHOLDER: &str =
    "மன்னிக்கவும், இந்த PDF கோப்பிலிருந்து உரையைப் பிரித்தெடுக்க முடியவில்லை.";
pub const WORD_EMPTY_PLACEHOLDER: &str =
    "மன்னிக்கவும், இந்த Word கோப்பிலிருந்து உரையைப் பிரித்தெடுக்க முடியவில்லை.";

pub const IMPORT_FAILED: &str = "கோப்பைப் பதிவேற்றுவதில் சிக்கல் ஏற்பட்டது. மீண்டும் முயலவும்.";
pub const IMPORT_IN_PROGRESS: &str = "மற்றொரு கோப்பு ஏற்கனவே பதிவேற்றப்படுகிறது.";

pub const CONFIRM_DELETE: &str = "இந்த நூலை உங்கள் நூலகத்திலிருந்து நீக்க விரும்புகிறீர்களா?";

pub const LIBRARY_EMPTY: &str = "உங்கள் நூலகம் காலியாக உள்ளது";
pub const LIBRARY_EMPTY_HINT: &str = "புதிய PDF அல்லது Word கோப்புகளை பதிவேற்ற `minnool import <கோப்பு>` கட்டளையைப் பயன்படுத்தவும்.";

pub const SELECTION_MARKER: &str = " (தேர்ந்தெடுக்கப்பட்ட பகுதி)";

pub fn books_saved(count: usize) -> String {
    format!("{} நூல்கள் சேமிக்கப்பட்டுள்ளன", count)
}
