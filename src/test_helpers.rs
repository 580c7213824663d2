//! Shared fixtures for unit tests: a site [`Config`] and [`Entry`] builders
//! that skip the filesystem.

use crate::config::{Author, Config, Elsewhere};
use crate::entry::Entry;
use crate::parser::{FilenamePolicy, Source};
use chrono::{FixedOffset, NaiveDate};
use std::path::{Path, PathBuf};
use url::Url;

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

/// A config for `http://journal.example.com/` whose directories live under
/// `root`.
pub fn config_in(root: &Path) -> Config {
    Config {
        title: "Journal".to_owned(),
        site_root: Url::parse("http://journal.example.com/").unwrap(),
        since: NaiveDate::from_ymd_opt(2009, 3, 4).unwrap(),
        author: Author {
            name: "Jane Doe".to_owned(),
            email: "jane@example.com".to_owned(),
            url: Some(Url::parse("http://example.com/").unwrap()),
            elsewhere: vec![Elsewhere {
                name: "@jane".to_owned(),
                url: Url::parse("http://social.example/jane").unwrap(),
            }],
        },
        filename_policy: FilenamePolicy::Lenient,
        entries_directory: root.join("entries"),
        staging_directory: root.join("build"),
        public_directory: root.join("public"),
        assets_directory: root.join("assets"),
        extra_stylesheet: None,
        utc_offset: utc(),
    }
}

pub fn config() -> Config {
    config_in(Path::new("."))
}

/// An entry dated `date` (`YYYY-MM-DD`) built from `title_segment`.
pub fn dated_entry(date: &str, title_segment: &str, tags: &[&str], body: &str) -> Entry {
    Entry::from_source(
        Source {
            path: PathBuf::from(format!("entries/{}.{}", date.replace('-', "."), title_segment)),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            title_segment: title_segment.to_owned(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            body: body.to_owned(),
        },
        utc(),
    )
}

/// An entry dated 2024-03-15.
pub fn entry(title_segment: &str, tags: &[&str], body: &str) -> Entry {
    dated_entry("2024-03-15", title_segment, tags, body)
}
