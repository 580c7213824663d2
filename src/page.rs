//! Defines [`Page`], the view model for every HTML file the site contains.
//! Each variant carries exactly what its template needs; the templates live in
//! [`crate::htmlrenderer`].

use crate::config::Config;
use crate::entry::Entry;
use std::path::PathBuf;
use url::{ParseError, Url};

pub enum Page<'a> {
    /// The front page: every entry, the first one in full.
    Index { entries: &'a [&'a Entry] },

    /// The entries carrying `tag`, the first one in full.
    Tag {
        tag: &'a str,
        entries: &'a [&'a Entry],
    },

    /// A single entry's own page.
    Detail { entry: &'a Entry },

    NotFound,
}

impl<'a> Page<'a> {
    /// The path of the page's output file, relative to the output directory.
    pub fn output_path(&self) -> PathBuf {
        match self {
            Page::Index { .. } => PathBuf::from("index.html"),
            Page::Tag { tag, .. } => PathBuf::from("tags").join(format!("{}.html", tag)),
            Page::Detail { entry } => PathBuf::from(format!("{}.html", entry.slug)),
            Page::NotFound => PathBuf::from("404.html"),
        }
    }

    /// The contents of the page's `<title>`.
    pub fn head_title(&self, config: &Config) -> String {
        match self {
            Page::Index { .. } | Page::NotFound => config.heading(),
            Page::Tag { tag, .. } => format!("{}: {}", config.heading(), tag),
            Page::Detail { entry } => format!("{}: {}", config.heading(), entry.title),
        }
    }

    /// The Atom feed advertised by the page. Tag pages advertise their own
    /// feed, everything else the main one.
    pub fn feed_url(&self, config: &Config) -> Result<Url, ParseError> {
        match self {
            Page::Tag { tag, .. } => tag_feed_url(config, tag),
            _ => index_feed_url(config),
        }
    }

    /// The tag a tag page is for.
    pub fn active_tag(&self) -> Option<&'a str> {
        match self {
            Page::Tag { tag, .. } => Some(*tag),
            _ => None,
        }
    }

    /// The entries listed on the page, most recent first. Empty for pages
    /// that aren't lists.
    pub fn entries(&self) -> &'a [&'a Entry] {
        match self {
            Page::Index { entries } | Page::Tag { entries, .. } => *entries,
            _ => &[],
        }
    }
}

pub fn index_feed_url(config: &Config) -> Result<Url, ParseError> {
    config.url("index.atom")
}

pub fn tag_feed_url(config: &Config, tag: &str) -> Result<Url, ParseError> {
    config.url(&format!("tags/{}.atom", tag))
}
