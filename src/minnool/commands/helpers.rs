use crate::error::{MinnoolError, Result};
use crate::index::{index_books, BookSelector, DisplayBook};
use crate::store::{KvStorage, LibraryStore};

pub fn indexed_books<S: KvStorage>(store: &LibraryStore<S>) -> Vec<DisplayBook> {
    index_books(store.books())
}

fn matches_for(indexed: &[DisplayBook], selector: &BookSelector) -> Result<Vec<DisplayBook>> {
    match selector {
        BookSelector::Index(idx) => indexed
            .iter()
            .find(|db| db.index == *idx)
            .cloned()
            .map(|db| vec![db])
            .ok_or_else(|| MinnoolError::Api(format!("Index {} not found in library", idx))),
        BookSelector::Id(id) => indexed
            .iter()
            .find(|db| db.book.id == *id)
            .cloned()
            .map(|db| vec![db])
            .ok_or_else(|| MinnoolError::BookNotFound(id.clone())),
        BookSelector::Title(term) => {
            if let Some(db) = indexed.iter().find(|db| db.book.id == *term) {
                return Ok(vec![db.clone()]);
            }
            let needle = term.to_lowercase();
            let found: Vec<DisplayBook> = indexed
                .iter()
                .filter(|db| db.book.title.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            if found.is_empty() {
                return Err(MinnoolError::BookNotFound(term.clone()));
            }
            Ok(found)
        }
    }
}

/// Resolves selectors to books, keeping selector order and dropping
/// repeats. A title search may match several books.
pub fn resolve_selectors<S: KvStorage>(
    store: &LibraryStore<S>,
    selectors: &[BookSelector],
) -> Result<Vec<DisplayBook>> {
    let indexed = indexed_books(store);
    let mut resolved: Vec<DisplayBook> = Vec::new();
    for selector in selectors {
        for db in matches_for(&indexed, selector)? {
            if !resolved.iter().any(|r| r.book.id == db.book.id) {
                resolved.push(db);
            }
        }
    }
    Ok(resolved)
}

/// Resolves selectors that must name exactly one book.
pub fn resolve_one<S: KvStorage>(
    store: &LibraryStore<S>,
    selectors: &[BookSelector],
) -> Result<DisplayBook> {
    let mut resolved = resolve_selectors(store, selectors)?;
    match resolved.len() {
        1 => Ok(resolved.remove(0)),
        0 => Err(MinnoolError::Api("No book selected".to_string())),
        n => {
            let titles: Vec<String> = resolved
                .iter()
                .map(|db| format!("{}. {}", db.index, db.book.title))
                .collect();
            Err(MinnoolError::Api(format!(
                "{} books match, pick one by index: {}",
                n,
                titles.join(", ")
            )))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{book, store_with};
    use super::*;

    fn library() -> LibraryStore<crate::store::memory::MemoryKv> {
        store_with(&[
            book("a", "Thirukkural", "x"),
            book("b", "Silappatikaram", "y"),
            book("c", "Thirumanthiram", "z"),
        ])
    }

    #[test]
    fn index_one_is_newest() {
        let store = library();
        let db = resolve_one(&store, &[BookSelector::Index(1)]).unwrap();
        assert_eq!(db.book.id, "c");
    }

    #[test]
    fn missing_index_is_an_error() {
        let store = library();
        assert!(resolve_one(&store, &[BookSelector::Index(9)]).is_err());
    }

    #[test]
    fn title_search_is_case_insensitive() {
        let store = library();
        let db = resolve_one(&store, &[BookSelector::Title("silap".into())]).unwrap();
        assert_eq!(db.book.id, "b");
    }

    #[test]
    fn ambiguous_title_needs_an_index() {
        let store = library();
        let err = resolve_one(&store, &[BookSelector::Title("thiru".into())]).unwrap_err();
        assert!(err.to_string().contains("2 books match"));

        let all = resolve_selectors(&store, &[BookSelector::Title("thiru".into())]).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn exact_id_wins_over_title() {
        let store = library();
        let db = resolve_one(&store, &[BookSelector::Title("a".into())]).unwrap();
        assert_eq!(db.book.id, "a");
    }

    #[test]
    fn repeated_selectors_resolve_once() {
        let store = library();
        let resolved = resolve_selectors(
            &store,
            &[BookSelector::Index(2), BookSelector::Id("b".into())],
        )
        .unwrap();
        assert_eq!(resolved.len(), 1);
    }
}
