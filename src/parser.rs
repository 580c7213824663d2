//! Defines the [`Parser`], [`Source`], and [`Error`] types. Also defines the
//! logic for reading entry files from the source directory. Turning a
//! [`Source`] into a renderable entry is [`crate::entry::Entry::from_source`]'s
//! job.

use chrono::NaiveDate;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fs::{self, read_dir};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// `YYYY.MM.DD.Title.Of.The.Entry`
static FILE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})\.(\d{2})\.(\d{2})\.(.+)$").unwrap());

const TAGS_HEADER: &str = "Tags";

/// What to do with files whose names don't follow the
/// `YYYY.MM.DD.Title` convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilenamePolicy {
    /// Skip the file with a warning.
    Lenient,

    /// Abort the run.
    Strict,
}

impl Default for FilenamePolicy {
    fn default() -> Self {
        FilenamePolicy::Lenient
    }
}

/// The raw result of reading one entry file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    /// Full path of the source file.
    pub path: PathBuf,

    /// The date from the file name prefix.
    pub date: NaiveDate,

    /// Everything in the file name after the date, e.g. `My.First.Post`.
    pub title_segment: String,

    /// The whitespace-separated values of the `Tags` header.
    pub tags: Vec<String>,

    /// Everything after the header block.
    pub body: String,
}

/// Reads [`Source`]s from an entries directory.
pub struct Parser {
    policy: FilenamePolicy,
}

impl Parser {
    pub fn new(policy: FilenamePolicy) -> Parser {
        Parser { policy }
    }

    /// Reads every entry file directly inside `source_directory` and returns
    /// them most recent first. Each file must be named
    /// `YYYY.MM.DD.Title.Of.The.Entry` and structured as follows:
    ///
    /// 1. Header lines of the form `Key: value`, including a `Tags` header
    /// 2. A blank line
    /// 3. The Markdown body
    ///
    /// For example:
    ///
    /// ```text
    /// Tags: go rust
    ///
    /// # Hello
    ///
    /// World.
    /// ```
    ///
    /// Files are sorted by path in descending order before parsing; with
    /// zero-padded dates this is reverse-chronological, and entries sharing a
    /// date come out in reverse file name order.
    pub fn parse_entries(&self, source_directory: &Path) -> Result<Vec<Source>> {
        let mut paths = Vec::new();
        for result in read_dir(source_directory).map_err(|err| Error::ReadDir {
            path: source_directory.to_owned(),
            err,
        })? {
            let entry = result.map_err(|err| Error::ReadDir {
                path: source_directory.to_owned(),
                err,
            })?;
            // `fs::metadata` follows symlinks, unlike `DirEntry::file_type`.
            let metadata = fs::metadata(entry.path()).map_err(|err| Error::ReadEntry {
                path: entry.path(),
                err,
            })?;
            if metadata.is_file() {
                paths.push(entry.path());
            } else {
                debug!("skipping non-file `{}`", entry.path().display());
            }
        }
        paths.sort_by(|a, b| b.cmp(a));

        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            match self.parse_entry(&path) {
                Ok(source) => sources.push(source),
                Err(Error::MalformedFileName(path)) if self.policy == FilenamePolicy::Lenient => {
                    warn!(
                        "skipping `{}`: file name is not `YYYY.MM.DD.Title`",
                        path.display()
                    );
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            "read {} entries from `{}`",
            sources.len(),
            source_directory.display()
        );
        Ok(sources)
    }

    /// Reads a single entry file. The date and title come from the file name;
    /// the tags and body from its contents.
    pub fn parse_entry(&self, path: &Path) -> Result<Source> {
        let (date, title_segment) = parse_file_name(path)?;
        let contents = fs::read_to_string(path).map_err(|err| Error::ReadEntry {
            path: path.to_owned(),
            err,
        })?;

        let (headers, body) = parse_headers(&contents);
        let tags: Vec<String> = headers
            .get(TAGS_HEADER)
            .ok_or_else(|| Error::MissingTags(path.to_owned()))?
            .split_whitespace()
            .map(str::to_owned)
            .collect();
        if let Some(tag) = tags.iter().find(|tag| !is_valid_tag(tag)) {
            return Err(Error::InvalidTag {
                path: path.to_owned(),
                tag: tag.clone(),
            });
        }

        debug!("parsed `{}` with tags {:?}", path.display(), tags);
        Ok(Source {
            path: path.to_owned(),
            date,
            title_segment,
            tags,
            body: body.to_owned(),
        })
    }
}

fn parse_file_name(path: &Path) -> Result<(NaiveDate, String)> {
    let malformed = || Error::MalformedFileName(path.to_owned());
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(malformed)?;
    let captures = FILE_NAME.captures(file_name).ok_or_else(malformed)?;

    // The pattern only admits digits, so these can't fail to parse.
    let number = |i: usize| captures[i].parse::<u32>().map_err(|_| malformed());
    let year = number(1)? as i32;
    let date = NaiveDate::from_ymd_opt(year, number(2)?, number(3)?).ok_or_else(malformed)?;
    Ok((date, captures[4].to_owned()))
}

// Tags become file names under `tags/` and path segments of their URLs.
fn is_valid_tag(tag: &str) -> bool {
    tag != "." && tag != ".." && !tag.contains(&['/', '\\', '?', '#', '%'][..])
}

/// The header block of an entry file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    /// Returns the value of the first header named `key`. Names are
    /// case-sensitive.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Splits an entry file into its header block and body.
///
/// Headers are `Key: value` lines. A line starting with a space or tab
/// continues the previous header. The header block ends at the first blank
/// line, which is not part of the body, or at the first line that is neither
/// a header nor a continuation, which is.
pub fn parse_headers(input: &str) -> (Headers, &str) {
    let mut headers: Vec<(String, String)> = Vec::new();
    let mut offset = 0;

    while offset < input.len() {
        let rest = &input[offset..];
        let (line, next) = match rest.find('\n') {
            Some(i) => (&rest[..i], offset + i + 1),
            None => (rest, input.len()),
        };
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.is_empty() {
            return (Headers(headers), &input[next..]);
        }

        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some((_, value)) = headers.last_mut() {
                let continuation = line.trim();
                if !continuation.is_empty() {
                    if !value.is_empty() {
                        value.push(' ');
                    }
                    value.push_str(continuation);
                }
                offset = next;
                continue;
            }
            return (Headers(headers), rest);
        }

        match line.split_once(':') {
            Some((key, value))
                if !key.is_empty() && !key.contains(|c: char| c.is_whitespace()) =>
            {
                headers.push((key.to_owned(), value.trim().to_owned()));
                offset = next;
            }
            _ => return (Headers(headers), rest),
        }
    }

    (Headers(headers), "")
}

/// Represents the result of a [`Source`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error reading entries.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when the entries directory can't be listed.
    #[error("reading entries directory `{}`: {err}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Returned when an entry file can't be read (including when it isn't
    /// valid UTF-8).
    #[error("reading entry `{}`: {err}", path.display())]
    ReadEntry {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Returned when a file name doesn't follow the `YYYY.MM.DD.Title`
    /// convention or names a date that doesn't exist. Only surfaced under
    /// [`FilenamePolicy::Strict`].
    #[error("`{}` is not named `YYYY.MM.DD.Title` with a valid date", .0.display())]
    MalformedFileName(PathBuf),

    /// Returned when an entry has no `Tags` header.
    #[error("`{}` is missing the `Tags` header", .0.display())]
    MissingTags(PathBuf),

    /// Returned when a tag can't be used as a file name or URL path segment.
    #[error("`{}` has tag `{tag}`, which can't be used as a file name or URL", path.display())]
    InvalidTag { path: PathBuf, tag: String },
}
