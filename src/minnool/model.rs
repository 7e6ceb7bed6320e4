use serde::{Deserialize, Serialize};

/// The fixed cover palette. Values are the tags the library has always
/// persisted, so older libraries keep rendering the same swatches.
pub const COVER_PALETTE: [&str; 8] = [
    "bg-indigo-500",
    "bg-emerald-500",
    "bg-rose-500",
    "bg-amber-500",
    "bg-violet-500",
    "bg-sky-500",
    "bg-fuchsia-500",
    "bg-teal-500",
];

/// One imported document and its extracted text.
///
/// Books are never mutated after creation; the only way to change one is to
/// delete it and import the file again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub content: String,
    /// Epoch milliseconds.
    pub imported_at: i64,
    pub cover_color: String,
}

/// Output of the document extractor, before it becomes a [`Book`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub title: String,
    pub content: String,
    /// True when the document yielded no text and `content` holds the
    /// placeholder message instead.
    pub used_placeholder: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_serializes_with_camel_case_keys() {
        let book = Book {
            id: "b1".into(),
            title: "பொன்னியின் செல்வன்".into(),
            author: None,
            content: "text".into(),
            imported_at: 1_700_000_000_000,
            cover_color: COVER_PALETTE[0].into(),
        };

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["importedAt"], 1_700_000_000_000i64);
        assert_eq!(json["coverColor"], "bg-indigo-500");
        assert!(json.get("author").is_none());
    }

    #[test]
    fn book_reads_records_without_author() {
        let raw = r#"{"id":"x","title":"t","content":"c","importedAt":5,"coverColor":"bg-sky-500"}"#;
        let book: Book = serde_json::from_str(raw).unwrap();
        assert_eq!(book.author, None);
        assert_eq!(book.imported_at, 5);
    }
}
