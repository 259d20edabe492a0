//! Comment index — normalized ID string to comment body.
//!
//! Built once from the parsed comments document; read-only afterwards.

use crate::model::{CommentDoc, CommentEntry};
use crate::parser::id::{self, Identifier};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct CommentIndex {
    entries: HashMap<String, CommentEntry>,
}

impl CommentIndex {
    /// Builds the index from the comments document.
    ///
    /// Keys are the normalized raw ID strings (whitespace stripped, empty
    /// `()` elided), not the structural parse. Entries whose ID string does
    /// not parse are logged and skipped: one bad doc comment must not block
    /// generation of the rest. Duplicate keys keep the first entry.
    pub fn build(doc: CommentDoc) -> CommentIndex {
        let mut entries = HashMap::with_capacity(doc.members.len());
        for (raw, entry) in doc.members {
            if let Err(e) = Identifier::parse(&raw) {
                log::warn!("skipping comment entry: {e}");
                continue;
            }
            let key = id::normalize_key(&raw);
            // First entry wins on duplicates. Tolerated, not an error:
            // duplicate ids occur in hand-edited comment files.
            entries.entry(key).or_insert(entry);
        }
        log::debug!("comment index holds {} entries", entries.len());
        CommentIndex { entries }
    }

    /// Exact-match lookup. A miss means "undocumented", never an error.
    pub fn lookup(&self, key: &str) -> Option<&CommentEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocNode;

    fn entry(text: &str) -> CommentEntry {
        CommentEntry {
            summary: vec![DocNode::Text(text.to_string())],
            ..Default::default()
        }
    }

    fn doc(members: Vec<(&str, CommentEntry)>) -> CommentDoc {
        CommentDoc {
            assembly: "Test".to_string(),
            members: members
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    #[test]
    fn lookup_hits_normalized_key() {
        let index = CommentIndex::build(doc(vec![("M:A.B.Run()", entry("runs"))]));
        assert!(index.lookup("M:A.B.Run").is_some());
        assert!(index.lookup("M:A.B.Run()").is_none());
    }

    #[test]
    fn lookup_miss_is_none() {
        let index = CommentIndex::build(doc(vec![("T:A.B", entry("b"))]));
        assert!(index.lookup("T:A.Missing").is_none());
    }

    #[test]
    fn malformed_entries_are_skipped_not_fatal() {
        let index = CommentIndex::build(doc(vec![
            ("garbage-no-colon", entry("bad")),
            ("T:A.Good", entry("good")),
        ]));
        assert_eq!(index.len(), 1);
        assert!(index.lookup("T:A.Good").is_some());
    }

    #[test]
    fn duplicate_keys_first_entry_wins() {
        let index = CommentIndex::build(doc(vec![
            ("T:A.Dup", entry("first")),
            ("T:A.Dup", entry("second")),
        ]));
        let got = index.lookup("T:A.Dup").unwrap();
        assert_eq!(got.summary, vec![DocNode::Text("first".to_string())]);
    }

    #[test]
    fn zero_parameter_method_keys_are_equivalent() {
        let index = CommentIndex::build(doc(vec![("M:A.B.Foo()", entry("foo"))]));
        // The mapper emits keys without empty parens; both spellings in the
        // document land on the same slot.
        assert!(index.lookup("M:A.B.Foo").is_some());
    }
}
