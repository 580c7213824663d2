//! Defines [`Entry`], the immutable record every later stage works from, along
//! with the title, slug and date derivations that build it from a
//! [`Source`].

use crate::markdown::{self, TrustedHtml};
use crate::parser::Source;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use std::path::PathBuf;

/// One published piece of writing.
#[derive(Clone, Debug)]
pub struct Entry {
    /// URL-safe identifier derived from the title; the entry's page is
    /// `{slug}.html`.
    pub slug: String,

    /// Human-readable title.
    pub title: String,

    /// Tags in the order the entry declares them.
    pub tags: Vec<String>,

    pub date: EntryDate,

    /// The rendered body.
    pub content_html: TrustedHtml,

    /// The file the entry was read from.
    pub source: PathBuf,
}

impl Entry {
    /// Builds an [`Entry`] from a parsed [`Source`]. `utc_offset` is the
    /// offset used for feed timestamps (see [`EntryDate::updated`]).
    pub fn from_source(source: Source, utc_offset: FixedOffset) -> Entry {
        Entry {
            slug: slugify(&source.title_segment),
            title: title(&source.title_segment),
            tags: source.tags,
            date: EntryDate::new(source.date, utc_offset),
            content_html: markdown::to_html(&source.body),
            source: source.path,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// An entry's calendar date and the representations templates and feeds need.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryDate {
    date: NaiveDate,
    updated: DateTime<FixedOffset>,
}

impl EntryDate {
    pub fn new(date: NaiveDate, utc_offset: FixedOffset) -> EntryDate {
        EntryDate {
            date,
            updated: feed_timestamp(date, utc_offset),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Midnight of the date without an offset, e.g. `2024-03-15T00:00:00`.
    pub fn iso8601(&self) -> String {
        self.date
            .and_time(NaiveTime::MIN)
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string()
    }

    /// The short calendar form, e.g. `2024-03-15`. Also used in Atom ids.
    pub fn display(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// The timestamp used for `<updated>` in Atom feeds.
    ///
    /// This is midnight of the entry's date shifted by the UTC offset the
    /// generating process had *when the site was built* and then labelled as
    /// UTC. An entry written in winter and rebuilt in summer gets a timestamp
    /// one hour off from its original one; feed readers that compare
    /// timestamps across a daylight-saving change will see it as updated.
    pub fn updated(&self) -> DateTime<FixedOffset> {
        self.updated
    }

    /// [`EntryDate::updated`] formatted as `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn rfc3339(&self) -> String {
        self.updated.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

fn feed_timestamp(date: NaiveDate, utc_offset: FixedOffset) -> DateTime<FixedOffset> {
    let shifted =
        date.and_time(NaiveTime::MIN) + Duration::seconds(utc_offset.local_minus_utc() as i64);
    Utc.from_utc_datetime(&shifted).into()
}

/// Derives a title from the title segment of a file name by turning `.`
/// separators into spaces. Case and `-` are kept.
pub fn title(segment: &str) -> String {
    segment.replace('.', " ")
}

/// Derives a slug from the title segment of a file name.
///
/// `.` counts as a space, everything is lowercased, characters other than
/// alphanumerics, whitespace, `-` and `_` are dropped and the remaining runs
/// of whitespace, `-` and `_` become a single `-`. The result never starts or
/// ends with `-`.
///
/// Two different titles can produce the same slug (`Hello, World` and
/// `Hello World`); nothing detects that, the later page simply overwrites the
/// earlier one.
pub fn slugify(segment: &str) -> String {
    let lowered = segment.replace('.', " ").to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut separated = false;
    for c in lowered.chars() {
        if c.is_alphanumeric() {
            if separated && !slug.is_empty() {
                slug.push('-');
            }
            separated = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' || c == '_' {
            separated = true;
        }
    }
    slug
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn source(title_segment: &str, body: &str) -> Source {
        Source {
            path: PathBuf::from(format!("entries/2024.03.15.{}", title_segment)),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            title_segment: title_segment.to_owned(),
            tags: vec!["go".to_owned(), "rust".to_owned()],
            body: body.to_owned(),
        }
    }

    #[test]
    fn test_from_source() {
        let entry = Entry::from_source(source("My.First.Post", "# Hello\n\nWorld."), utc());
        assert_eq!("my-first-post", entry.slug);
        assert_eq!("My First Post", entry.title);
        assert_eq!(vec!["go", "rust"], entry.tags);
        assert_eq!("<h1>Hello</h1>\n<p>World.</p>\n", entry.content_html.as_str());
        assert!(entry.has_tag("rust"));
        assert!(!entry.has_tag("python"));
    }

    #[test]
    fn test_title_keeps_case_and_dashes() {
        assert_eq!("Rust-lang is Fun ", title("Rust-lang.is.Fun."));
    }

    #[test]
    fn test_slugify() {
        assert_eq!("my-first-post", slugify("My.First.Post"));
        assert_eq!("dont-panic", slugify("Don't.Panic!"));
        assert_eq!("hello-world", slugify("Hello - World"));
        assert_eq!("snake-case-title", slugify("snake_case.title"));
        assert_eq!("trailing", slugify("..Trailing.."));
        assert_eq!("blåbær-syltetøy", slugify("Blåbær.Syltetøy"));
        assert_eq!("", slugify("?!"));
    }

    #[test]
    fn test_slugify_shape() {
        let titles = [
            "My.First.Post",
            "  spaced   out  ",
            "a--b__c..d",
            "-Leading.and.Trailing-",
            "Q&A: 2024 (part 1)",
            "C++.vs.Rust",
        ];
        for title in titles.iter() {
            let slug = slugify(title);
            assert_eq!(slug, slugify(title));
            assert_eq!(slug, slug.to_lowercase());
            assert!(
                slug.chars().all(|c| c.is_alphanumeric() || c == '-'),
                "{:?} -> {:?}",
                title,
                slug
            );
            assert!(!slug.starts_with('-') && !slug.ends_with('-'), "{:?}", slug);
            assert!(!slug.contains("--"), "{:?}", slug);
        }
    }

    #[test]
    fn test_date_formats() {
        let date = EntryDate::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), utc());
        assert_eq!("2024-03-15T00:00:00", date.iso8601());
        assert_eq!("2024-03-15", date.display());
        assert_eq!("2024-03-15T00:00:00Z", date.rfc3339());
    }

    #[test]
    fn test_feed_timestamp_uses_generation_offset() {
        let cest = FixedOffset::east_opt(2 * 3600).unwrap();
        let date = EntryDate::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), cest);
        assert_eq!("2024-03-15T02:00:00Z", date.rfc3339());
        assert_eq!(0, date.updated().offset().local_minus_utc());

        let pst = FixedOffset::west_opt(8 * 3600).unwrap();
        let date = EntryDate::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), pst);
        assert_eq!("2024-03-14T16:00:00Z", date.rfc3339());
    }
}
