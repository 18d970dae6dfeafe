//! Filesystem primitives used by the tree reconciler.
//!
//! Thin, synchronous wrappers over `std::fs` that attach the offending
//! path to every failure. A failed operation is fatal to the caller's
//! reconciliation pass; nothing here retries.

pub use error::{Error, Result};

use std::fs;
use std::path::Path;

mod error;

/// Creates `path` and any missing ancestors.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Copies `src` over `dest`, replacing whatever is there. The parent of
/// `dest` must already exist.
pub fn clobber_copy(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    fs::copy(src, dest)
        .map_err(|source| {
            if src.is_file() {
                Error::Write {
                    path: dest.to_path_buf(),
                    source,
                }
            } else {
                Error::Read {
                    path: src.to_path_buf(),
                    source,
                }
            }
        })
        .map(|_| ())
}

/// Removes the file at `path` if one exists. Absence is not an error;
/// returns whether a file was actually removed.
pub fn remove_existing(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(Error::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}
