use std::path::Path;

use regex::Regex;

use crate::io::store::{NoteStore, StoreError};

/// One matching line from a note under the searched folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Note title relative to the searched folder (`/`-joined)
    pub note: String,
    /// 1-based line number
    pub line: usize,
    /// The matching line's text
    pub text: String,
}

/// Compile a user pattern, case-insensitive. Falls back to a literal
/// match when the input isn't valid regex syntax.
pub fn build_pattern(input: &str) -> Option<Regex> {
    Regex::new(&format!("(?i){}", input))
        .or_else(|_| Regex::new(&format!("(?i){}", regex::escape(input))))
        .ok()
}

/// Search every note under `cwd` (recursively) for lines matching the
/// pattern. Hits come back in listing order, lines in file order.
pub fn search_notes(
    store: &NoteStore,
    cwd: &Path,
    pattern: &Regex,
) -> Result<Vec<SearchHit>, StoreError> {
    let mut hits = Vec::new();
    for (note, content) in store.walk_notes(cwd)? {
        for (idx, line) in content.lines().enumerate() {
            if pattern.is_match(line) {
                hits.push(SearchHit {
                    note: note.clone(),
                    line: idx + 1,
                    text: line.to_string(),
                });
            }
        }
    }
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn store() -> (TempDir, NoteStore) {
        let tmp = TempDir::new().unwrap();
        let store = NoteStore::open(&tmp.path().join("notes")).unwrap();
        (tmp, store)
    }

    fn root() -> PathBuf {
        PathBuf::new()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let (_tmp, store) = store();
        store.create_note(&root(), "a", "Buy MILK\nand bread\n").unwrap();

        let re = build_pattern("milk").unwrap();
        let hits = search_notes(&store, &root(), &re).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].note, "a");
        assert_eq!(hits[0].line, 1);
        assert_eq!(hits[0].text, "Buy MILK");
    }

    #[test]
    fn test_search_recurses_into_folders() {
        let (_tmp, store) = store();
        store.make_folder(&root(), "work").unwrap();
        store
            .create_note(&PathBuf::from("work"), "plan", "milk run\n")
            .unwrap();

        let re = build_pattern("milk").unwrap();
        let hits = search_notes(&store, &root(), &re).unwrap();
        assert_eq!(hits[0].note, "work/plan");
    }

    #[test]
    fn test_invalid_regex_falls_back_to_literal() {
        let (_tmp, store) = store();
        store.create_note(&root(), "a", "count [ ( items\n").unwrap();

        let re = build_pattern("[ (").unwrap();
        let hits = search_notes(&store, &root(), &re).unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_no_matches() {
        let (_tmp, store) = store();
        store.create_note(&root(), "a", "nothing here\n").unwrap();
        let re = build_pattern("zzz").unwrap();
        assert!(search_notes(&store, &root(), &re).unwrap().is_empty());
    }
}
