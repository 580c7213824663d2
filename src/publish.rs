//! Creates the staging directory a build writes into and swaps the finished
//! build onto the live output directory.

use log::{debug, info, warn};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Creates the staging directory, along with any missing parents.
///
/// Fails if it already exists: either another build is running or an earlier
/// one failed, and in both cases its contents shouldn't be published or
/// silently deleted.
pub fn create_staging(staging: &Path) -> Result<()> {
    if let Some(parent) = staging.parent() {
        fs::create_dir_all(parent).map_err(|err| Error::CreateStaging {
            path: staging.to_owned(),
            err,
        })?;
    }
    fs::create_dir(staging).map_err(|err| match err.kind() {
        io::ErrorKind::AlreadyExists => Error::StagingExists(staging.to_owned()),
        _ => Error::CreateStaging {
            path: staging.to_owned(),
            err,
        },
    })
}

/// Replaces `public` with `staging`.
///
/// If `public` doesn't exist yet this is one rename. Otherwise `public` is
/// first renamed to a backup next to it, `staging` is renamed onto `public`
/// and the backup is deleted. If the second rename fails the backup is
/// renamed back, so `public` keeps serving the previous build.
pub fn swap(staging: &Path, public: &Path) -> Result<()> {
    if !public.exists() {
        rename(staging, public)?;
        info!("published `{}`", public.display());
        return Ok(());
    }

    let backup = backup_path(public);
    if backup.exists() {
        warn!(
            "removing leftover backup `{}` from an earlier build",
            backup.display()
        );
        remove_dir(&backup)?;
    }

    rename(public, &backup)?;
    if let Err(err) = rename(staging, public) {
        if let Err(restore) = fs::rename(&backup, public) {
            warn!(
                "could not restore `{}` from `{}`: {}",
                public.display(),
                backup.display(),
                restore
            );
        }
        return Err(err);
    }
    info!("published `{}`", public.display());

    // The new build is live at this point; a leftover backup is removed by
    // the next build.
    if let Err(err) = remove_dir(&backup) {
        warn!("{}", err);
    }
    Ok(())
}

/// `{public}.old`, a sibling of `public` so renaming to it never crosses
/// filesystems.
fn backup_path(public: &Path) -> PathBuf {
    let mut name = public
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("public"));
    name.push(".old");
    public.with_file_name(name)
}

fn rename(from: &Path, to: &Path) -> Result<()> {
    debug!("renaming `{}` to `{}`", from.display(), to.display());
    fs::rename(from, to).map_err(|err| Error::Rename {
        from: from.to_owned(),
        to: to.to_owned(),
        err,
    })
}

fn remove_dir(dir: &Path) -> Result<()> {
    fs::remove_dir_all(dir).map_err(|err| Error::Clean {
        path: dir.to_owned(),
        err,
    })
}

pub type Result<T> = std::result::Result<T, Error>;

/// The error type for staging and publishing a build.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when the staging directory is left over from another build.
    #[error(
        "staging directory `{}` already exists; another build is running or an earlier one failed (remove it to continue)",
        .0.display()
    )]
    StagingExists(PathBuf),

    /// Returned for I/O problems while creating the staging directory.
    #[error("creating staging directory `{}`: {err}", path.display())]
    CreateStaging {
        path: PathBuf,
        #[source]
        err: io::Error,
    },

    /// Returned when moving a directory fails.
    #[error("moving `{}` to `{}`: {err}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        err: io::Error,
    },

    /// Returned for I/O problems while removing an old build.
    #[error("removing directory `{}`: {err}", path.display())]
    Clean {
        path: PathBuf,
        #[source]
        err: io::Error,
    },
}
