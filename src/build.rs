//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the output static site: reading the entries
//! ([`crate::parser`]), building and indexing them ([`crate::entry`],
//! [`crate::tag`]), writing pages, feeds and assets into a staging directory
//! ([`crate::write`]) and publishing that directory ([`crate::publish`]).

use crate::config::Config;
use crate::entry::Entry;
use crate::parser::{Error as ParseError, Parser};
use crate::publish::{self, Error as PublishError};
use crate::tag::index_entries;
use crate::write::{Error as WriteError, Writer};
use log::info;
use std::path::PathBuf;
use thiserror::Error;

/// Slugs whose detail page would overwrite another page of the site.
const RESERVED_SLUGS: &[&str] = &["index", "404"];

/// Builds the site from a [`Config`] object.
///
/// Entries are read and parsed before anything is written, so bad input
/// aborts the build without touching the filesystem. Everything is then
/// written into [`Config::staging_directory`], which must not exist yet, and
/// only a complete build is swapped onto [`Config::public_directory`]. When
/// writing fails the staging directory is left behind for inspection and the
/// live site is untouched.
pub fn build_site(config: &Config) -> Result<()> {
    let sources = Parser::new(config.filename_policy).parse_entries(&config.entries_directory)?;
    let entries: Vec<Entry> = sources
        .into_iter()
        .map(|source| Entry::from_source(source, config.utc_offset))
        .collect();
    check_slugs(&entries)?;
    let index = index_entries(&entries);
    info!(
        "indexed {} entries under {} tags",
        index.entries.len(),
        index.tags.len()
    );

    publish::create_staging(&config.staging_directory)?;
    Writer::new(config, &config.staging_directory).write_site(&index)?;
    publish::swap(&config.staging_directory, &config.public_directory)?;
    Ok(())
}

/// Fails for an entry whose page would be `.html` or replace the front page
/// or the 404 page.
fn check_slugs(entries: &[Entry]) -> Result<()> {
    match entries
        .iter()
        .find(|entry| entry.slug.is_empty() || RESERVED_SLUGS.contains(&entry.slug.as_str()))
    {
        Some(entry) => Err(Error::InvalidSlug {
            path: entry.source.clone(),
            slug: entry.slug.clone(),
        }),
        None => Ok(()),
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during parsing, writing
/// or publishing.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned for errors reading entries.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Returned when an entry's title gives an empty slug or one that names
    /// another page of the site.
    #[error(
        "`{}` has slug `{slug}`, which is empty or clashes with a site page; rename the file",
        path.display()
    )]
    InvalidSlug { path: PathBuf, slug: String },

    /// Returned for errors writing pages, feeds and assets.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// Returned for errors staging or publishing the build.
    #[error(transparent)]
    Publish(#[from] PublishError),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_helpers::{dated_entry, entry};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_check_slugs() {
        let fine = vec![
            entry("Indexing", &[], ""),
            entry("404.Again", &[], ""),
            entry("Tags", &[], ""),
        ];
        assert!(check_slugs(&fine).is_ok());

        for title in ["Index", "INDEX", "404", "?!"].iter() {
            let entries = vec![entry("Newest", &[], ""), dated_entry("2024-01-01", title, &[], "")];
            match check_slugs(&entries) {
                Err(Error::InvalidSlug { path, slug }) => {
                    assert_eq!(entries[1].source, path);
                    assert_eq!(entries[1].slug, slug);
                }
                other => panic!("{}: wanted InvalidSlug, found {:?}", title, other),
            }
        }
    }
}
