//! Loads the site configuration from a `daybook.yaml` project file.

use crate::parser::FilenamePolicy;
use anyhow::{anyhow, Context, Result};
use chrono::{FixedOffset, NaiveDate};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the project file. The directory containing it is the site's
/// root directory.
pub const PROJECT_FILE: &str = "daybook.yaml";

/// The site's author, shown in every page footer and in feeds.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,

    /// The author's homepage.
    #[serde(default)]
    pub url: Option<Url>,

    /// Links to the author's presence on other sites, in display order.
    #[serde(default)]
    pub elsewhere: Vec<Elsewhere>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Elsewhere {
    pub name: String,
    pub url: Url,
}

#[derive(Deserialize)]
#[serde(default)]
struct Directories {
    entries: PathBuf,
    staging: PathBuf,
    public: PathBuf,
    assets: PathBuf,
}

impl Default for Directories {
    fn default() -> Self {
        Directories {
            entries: PathBuf::from("entries"),
            staging: PathBuf::from("build"),
            public: PathBuf::from("public"),
            assets: PathBuf::from("assets"),
        }
    }
}

#[derive(Deserialize)]
struct Project {
    title: String,
    site_root: Url,
    since: NaiveDate,
    author: Author,

    #[serde(default)]
    filenames: FilenamePolicy,

    #[serde(default)]
    stylesheet: Option<PathBuf>,

    #[serde(default)]
    directories: Directories,
}

/// Everything a build needs to know about the site.
#[derive(Clone, Debug)]
pub struct Config {
    /// The site title, e.g. `Journal`.
    pub title: String,

    /// The canonical URL of the published site. Always ends in `/`.
    pub site_root: Url,

    /// The date the site started. Part of the Atom feed ids, so it should
    /// never change once the site is published.
    pub since: NaiveDate,

    pub author: Author,
    pub filename_policy: FilenamePolicy,
    pub entries_directory: PathBuf,

    /// The directory the site is built into before it replaces
    /// `public_directory`. Must not exist when a build starts.
    pub staging_directory: PathBuf,

    pub public_directory: PathBuf,
    pub assets_directory: PathBuf,

    /// A stylesheet appended to the built-in one.
    pub extra_stylesheet: Option<PathBuf>,

    /// The UTC offset used for feed timestamps. See
    /// [`crate::entry::EntryDate::updated`].
    pub utc_offset: FixedOffset,
}

impl Config {
    /// Looks for [`PROJECT_FILE`] in `dir` and then in each of its ancestors
    /// and loads the first one found. A relative `dir` is resolved against the
    /// current directory first.
    pub fn from_directory(dir: &Path, utc_offset: FixedOffset) -> Result<Config> {
        let start = std::env::current_dir()
            .context("Getting the current directory")?
            .join(dir);
        for ancestor in start.ancestors() {
            let path = ancestor.join(PROJECT_FILE);
            if path.is_file() {
                return Config::from_project_file(&path, utc_offset)
                    .with_context(|| format!("Loading configuration `{}`", path.display()));
            }
        }
        Err(anyhow!(
            "Could not find `{}` in `{}` or any parent directory",
            PROJECT_FILE,
            start.display()
        ))
    }

    /// Loads a project file. Relative directories in it are resolved against
    /// the directory holding the file.
    pub fn from_project_file(path: &Path, utc_offset: FixedOffset) -> Result<Config> {
        let file = File::open(path)
            .with_context(|| format!("Opening project file `{}`", path.display()))?;
        let project: Project = serde_yaml::from_reader(file)?;
        let root = path.parent().ok_or_else(|| {
            anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )
        })?;

        Ok(Config {
            title: project.title,
            site_root: with_trailing_slash(project.site_root),
            since: project.since,
            author: project.author,
            filename_policy: project.filenames,
            entries_directory: root.join(project.directories.entries),
            staging_directory: root.join(project.directories.staging),
            public_directory: root.join(project.directories.public),
            assets_directory: root.join(project.directories.assets),
            extra_stylesheet: project.stylesheet.map(|p| root.join(p)),
            utc_offset,
        })
    }

    /// `{title} of {author}`, the heading and base `<title>` of every page.
    pub fn heading(&self) -> String {
        format!("{} of {}", self.title, self.author.name)
    }

    /// Resolves `path` against [`Config::site_root`].
    pub fn url(&self, path: &str) -> std::result::Result<Url, url::ParseError> {
        self.site_root.join(path)
    }

    /// The host part of the site root, used in Atom `tag:` ids.
    pub fn domain(&self) -> &str {
        self.site_root.host_str().unwrap_or_default()
    }
}

// `Url::join` treats the last path segment as a file name unless the path
// ends in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
