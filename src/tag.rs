//! Groups [`Entry`]s by tag. See [`index_entries`].

use crate::entry::Entry;
use std::collections::BTreeMap;

/// The global entry list plus one list per tag. Every list keeps the order of
/// the entries it was built from, so a tag list is always a subsequence of
/// [`Index::entries`].
#[derive(Debug, Default)]
pub struct Index<'a> {
    /// All entries, most recent first.
    pub entries: Vec<&'a Entry>,

    /// The entries carrying each tag. Only tags that appear on at least one
    /// entry have a key.
    pub tags: BTreeMap<&'a str, Vec<&'a Entry>>,
}

/// Indexes a list of [`Entry`] objects, which must already be in display
/// order. An entry that declares the same tag twice is listed once under it.
pub fn index_entries(entries: &[Entry]) -> Index<'_> {
    let mut tags: BTreeMap<&str, Vec<&Entry>> = BTreeMap::new();
    for entry in entries {
        for tag in entry.tags.iter() {
            let tagged = tags.entry(tag.as_str()).or_default();
            if tagged.last().map_or(true, |last| !std::ptr::eq(*last, entry)) {
                tagged.push(entry);
            }
        }
    }

    Index {
        entries: entries.iter().collect(),
        tags,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::Source;
    use chrono::{FixedOffset, NaiveDate};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn entry(name: &str, tags: &[&str]) -> Entry {
        Entry::from_source(
            Source {
                path: PathBuf::from(name),
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                title_segment: name.to_owned(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                body: String::new(),
            },
            FixedOffset::east_opt(0).unwrap(),
        )
    }

    fn slugs(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|e| e.slug.clone()).collect()
    }

    #[test]
    fn test_index_entries() {
        let entries = vec![
            entry("c", &["rust", "go"]),
            entry("b", &["go"]),
            entry("a", &["rust", "rust"]),
        ];
        let index = index_entries(&entries);

        assert_eq!(vec!["c", "b", "a"], slugs(&index.entries));
        assert_eq!(vec!["go", "rust"], index.tags.keys().copied().collect::<Vec<_>>());
        assert_eq!(vec!["c", "b"], slugs(&index.tags["go"]));
        assert_eq!(vec!["c", "a"], slugs(&index.tags["rust"]));
    }

    #[test]
    fn test_tag_lists_are_subsequences() {
        let entries = vec![
            entry("e", &["x"]),
            entry("d", &["y", "x"]),
            entry("c", &[]),
            entry("b", &["y"]),
            entry("a", &["x", "y"]),
        ];
        let index = index_entries(&entries);

        for (tag, tagged) in index.tags.iter() {
            assert!(tagged.iter().all(|e| e.has_tag(tag)));
            assert_eq!(
                entries.iter().filter(|e| e.has_tag(tag)).count(),
                tagged.len()
            );
            let positions: Vec<usize> = tagged
                .iter()
                .map(|t| index.entries.iter().position(|e| std::ptr::eq(*e, *t)).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", tag);
        }
    }

    #[test]
    fn test_empty() {
        let index = index_entries(&[]);
        assert!(index.entries.is_empty());
        assert!(index.tags.is_empty());
    }
}
