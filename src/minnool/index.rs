//! # Display indexes and selectors
//!
//! Books are addressed on the command line by their position in the library
//! listing: `1` is the newest book, `2` the one before it, and so on. The
//! index is derived from the stored order every time and never persisted, so
//! deleting a book shifts the indexes of the older ones.
//!
//! A selector can also be a book id, or free text matched against titles.

use crate::model::Book;
use std::fmt;
use uuid::Uuid;

/// A book together with its 1-based position in the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBook {
    pub index: usize,
    pub book: Book,
}

/// Numbers books in stored order (newest first). Never re-sorts.
pub fn index_books(books: &[Book]) -> Vec<DisplayBook> {
    books
        .iter()
        .enumerate()
        .map(|(i, book)| DisplayBook {
            index: i + 1,
            book: book.clone(),
        })
        .collect()
}

/// User input selecting one or more books.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookSelector {
    Index(usize),
    Id(String),
    /// Exact id match first, then a case-insensitive title substring search.
    Title(String),
}

impl fmt::Display for BookSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookSelector::Index(i) => write!(f, "{}", i),
            BookSelector::Id(id) => write!(f, "{}", id),
            BookSelector::Title(t) => write!(f, "\"{}\"", t),
        }
    }
}

/// Parses `"3"` or `"3-5"` into display indexes.
pub fn parse_index_or_range(s: &str) -> Result<Vec<usize>, String> {
    let parse = |part: &str| -> Result<usize, String> {
        let n: usize = part
            .parse()
            .map_err(|_| format!("Invalid index format: {}", s))?;
        if n == 0 {
            return Err("Indexes start at 1".to_string());
        }
        Ok(n)
    };

    match s.split_once('-') {
        Some((start, end)) if !start.is_empty() => {
            let (start, end) = (parse(start)?, parse(end)?);
            if start > end {
                return Err(format!(
                    "Invalid range: start ({}) must be <= end ({})",
                    start, end
                ));
            }
            Ok((start..=end).collect())
        }
        _ => parse(s).map(|n| vec![n]),
    }
}

/// Turns command-line arguments into selectors.
///
/// If every argument is an index or range, the indexes are returned in
/// order with duplicates dropped. A single UUID-shaped argument selects by
/// id. Anything else is joined with spaces into one title search.
pub fn parse_selectors(inputs: &[String]) -> Result<Vec<BookSelector>, String> {
    if inputs.is_empty() {
        return Err("No book selected".to_string());
    }

    let looks_numeric = |s: &str| s.chars().next().is_some_and(|c| c.is_ascii_digit());
    if inputs.iter().all(|s| looks_numeric(s)) {
        let mut indexes: Vec<usize> = Vec::new();
        for input in inputs {
            for idx in parse_index_or_range(input)? {
                if !indexes.contains(&idx) {
                    indexes.push(idx);
                }
            }
        }
        return Ok(indexes.into_iter().map(BookSelector::Index).collect());
    }

    if inputs.len() == 1 && Uuid::parse_str(&inputs[0]).is_ok() {
        return Ok(vec![BookSelector::Id(inputs[0].clone())]);
    }

    Ok(vec![BookSelector::Title(inputs.join(" "))])
}
