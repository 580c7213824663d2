//! Support for creating Atom feeds from a list of entries.

use crate::config::Config;
use crate::entry::Entry;
use atom_syndication::{
    ContentBuilder, Entry as AtomEntry, EntryBuilder, Error as AtomError, Feed, FeedBuilder,
    FixedDateTime, LinkBuilder, Person, PersonBuilder,
};
use chrono::{NaiveTime, TimeZone, Utc};
use std::io::Write;
use thiserror::Error;
use url::{ParseError, Url};

/// Creates the Atom feed for `entries` (most recent first) and writes it to a
/// [`std::io::Write`]. `feed_url` is where the feed itself will be published.
pub fn write_feed<W: Write>(config: &Config, entries: &[&Entry], feed_url: &Url, w: W) -> Result<W> {
    Ok(feed(config, entries, feed_url)?.write_to(w)?)
}

/// Creates the Atom feed for `entries`.
///
/// The feed's `updated` is the most recent entry's timestamp rather than the
/// time of the build, so rebuilding an unchanged site produces the same feed.
pub fn feed(config: &Config, entries: &[&Entry], feed_url: &Url) -> Result<Feed> {
    let updated: FixedDateTime = match entries.first() {
        Some(entry) => entry.date.updated(),
        None => Utc
            .from_utc_datetime(&config.since.and_time(NaiveTime::MIN))
            .into(),
    };

    Ok(FeedBuilder::default()
        .title(config.title.clone())
        .id(feed_id(config))
        .updated(updated)
        .authors(vec![author(config)])
        .links(vec![
            LinkBuilder::default()
                .href(config.site_root.to_string())
                .rel("alternate")
                .build(),
            LinkBuilder::default()
                .href(feed_url.to_string())
                .rel("self")
                .build(),
        ])
        .entries(feed_entries(config, entries)?)
        .build())
}

fn feed_entries(config: &Config, entries: &[&Entry]) -> Result<Vec<AtomEntry>> {
    let mut feed_entries = Vec::with_capacity(entries.len());
    for entry in entries {
        feed_entries.push(
            EntryBuilder::default()
                .id(entry_id(config, entry))
                .title(entry.title.clone())
                .updated(entry.date.updated())
                .links(vec![LinkBuilder::default()
                    .href(config.url(&entry.slug)?.to_string())
                    .rel("alternate")
                    .build()])
                .content(Some(
                    ContentBuilder::default()
                        .content_type(Some("html".to_owned()))
                        .value(Some(entry.content_html.as_str().to_owned()))
                        .build(),
                ))
                .build(),
        );
    }
    Ok(feed_entries)
}

fn author(config: &Config) -> Person {
    PersonBuilder::default()
        .name(config.author.name.clone())
        .build()
}

/// The feed-level id, `tag:{domain},{since}:/`. It depends only on the site's
/// domain and start date, so it never changes between builds.
pub fn feed_id(config: &Config) -> String {
    format!(
        "tag:{},{}:/",
        config.domain(),
        config.since.format("%Y-%m-%d")
    )
}

/// The id of an entry, `tag:{domain},{date}:/{slug}`. This is unique as long
/// as no two entries on the same day share a slug.
pub fn entry_id(config: &Config, entry: &Entry) -> String {
    format!(
        "tag:{},{}:/{}",
        config.domain(),
        entry.date.display(),
        entry.slug
    )
}

pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem creating a feed.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when an entry or feed URL can't be built.
    #[error("building feed URL: {0}")]
    UrlParse(#[from] ParseError),

    /// Returned when there is an Atom-related error, including I/O errors
    /// while writing.
    #[error("writing Atom feed: {0}")]
    Atom(#[from] AtomError),
}
