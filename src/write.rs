//! Renders every page, feed and asset of the site into an output directory.

use crate::config::Config;
use crate::entry::Entry;
use crate::feed::{self, write_feed};
use crate::htmlrenderer;
use crate::page::{self, Page};
use crate::tag::Index;
use log::{debug, info};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::{ParseError, Url};
use walkdir::WalkDir;

/// The built-in stylesheet.
pub const STYLESHEET: &str = include_str!("../theme/style.css");

/// Responsible for templating and writing pages, feeds and static files to
/// disk.
pub struct Writer<'a> {
    pub config: &'a Config,

    /// The directory everything is written into. It must exist.
    pub output_directory: &'a Path,
}

impl<'a> Writer<'a> {
    pub fn new(config: &'a Config, output_directory: &'a Path) -> Writer<'a> {
        Writer {
            config,
            output_directory,
        }
    }

    /// Writes the whole site for `index`: the copied asset tree, the front
    /// page and feed, one page and feed per tag, one page per entry, the 404
    /// page and the stylesheet.
    pub fn write_site(&self, index: &Index) -> Result<()> {
        self.copy_assets()?;

        self.write_page(&Page::Index {
            entries: &index.entries,
        })?;
        self.write_feed(
            &index.entries,
            &page::index_feed_url(self.config)?,
            Path::new("index.atom"),
        )?;

        if !index.tags.is_empty() {
            self.create_dir(&self.output_directory.join("tags"))?;
        }
        for (tag, entries) in index.tags.iter() {
            self.write_page(&Page::Tag { tag, entries })?;
            self.write_feed(
                entries,
                &page::tag_feed_url(self.config, tag)?,
                &Path::new("tags").join(format!("{}.atom", tag)),
            )?;
        }
        info!("wrote {} tag pages", index.tags.len());

        for entry in index.entries.iter() {
            self.write_page(&Page::Detail { entry })?;
        }
        info!("wrote {} entry pages", index.entries.len());

        self.write_page(&Page::NotFound)?;
        self.write_stylesheet()
    }

    /// Templates a single [`Page`] and writes it to disk.
    fn write_page(&self, page: &Page) -> Result<()> {
        let html = htmlrenderer::render(page, self.config)?;
        self.write_file(&page.output_path(), html.into_string().as_bytes())
    }

    fn write_feed(&self, entries: &[&Entry], feed_url: &Url, relative_path: &Path) -> Result<()> {
        let path = self.output_directory.join(relative_path);
        debug!("writing `{}`", path.display());
        let file = File::create(&path).map_err(|err| Error::Write {
            path: path.clone(),
            err,
        })?;
        write_feed(self.config, entries, feed_url, BufWriter::new(file))?
            .flush()
            .map_err(|err| Error::Write { path, err })
    }

    /// Writes the built-in stylesheet followed by the configured extra one.
    fn write_stylesheet(&self) -> Result<()> {
        let mut css = String::from(STYLESHEET);
        if let Some(extra) = &self.config.extra_stylesheet {
            let contents = fs::read_to_string(extra).map_err(|err| Error::Read {
                path: extra.clone(),
                err,
            })?;
            css.push_str("\n\n");
            css.push_str(&contents);
        }
        self.write_file(Path::new("style.css"), css.as_bytes())
    }

    /// Copies the assets directory tree into the output directory. A missing
    /// assets directory is not an error.
    fn copy_assets(&self) -> Result<()> {
        let assets = &self.config.assets_directory;
        if !assets.is_dir() {
            info!("no assets directory at `{}`", assets.display());
            return Ok(());
        }

        let mut copied = 0;
        for result in WalkDir::new(assets).min_depth(1).sort_by_file_name() {
            let entry = result?;
            // strip_prefix shouldn't fail since `assets` is always an
            // ancestor of the entry's path
            let relative = entry.path().strip_prefix(assets).unwrap_or(entry.path());
            let target = self.output_directory.join(relative);
            if entry.file_type().is_dir() {
                self.create_dir(&target)?;
            } else {
                fs::copy(entry.path(), &target).map_err(|err| Error::Write {
                    path: target.clone(),
                    err,
                })?;
                copied += 1;
            }
        }
        info!("copied {} assets from `{}`", copied, assets.display());
        Ok(())
    }

    fn create_dir(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|err| Error::Write {
            path: dir.to_owned(),
            err,
        })
    }

    fn write_file(&self, relative_path: &Path, contents: &[u8]) -> Result<()> {
        let path = self.output_directory.join(relative_path);
        debug!("writing `{}`", path.display());
        fs::write(&path, contents).map_err(|err| Error::Write { path, err })
    }
}

/// The result of a fallible writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a writing operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when a page or feed URL can't be built.
    #[error("building URL: {0}")]
    UrlParse(#[from] ParseError),

    /// Returned for errors creating feeds.
    #[error(transparent)]
    Feed(#[from] feed::Error),

    /// Returned when an output file or directory can't be written.
    #[error("writing `{}`: {err}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        err: io::Error,
    },

    /// Returned when an input file can't be read.
    #[error("reading `{}`: {err}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        err: io::Error,
    },

    /// Returned for errors walking the assets directory.
    #[error("copying assets: {0}")]
    WalkDir(#[from] walkdir::Error),
}
