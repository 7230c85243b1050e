//! Error taxonomy for profile resolution, tree building, and persistence.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A file reference names a workspace root that is not currently open.
    /// Downgraded to "file is absent" inside the pinned-file existence check,
    /// surfaced everywhere else.
    #[error("workspace root `{0}` is not found in this workspace")]
    RootNotFound(String),

    #[error("profile `{0}` is not found")]
    ProfileNotFound(String),

    /// Creating a profile under a name already in use. The store is left
    /// unmodified.
    #[error("profile `{0}` already exists")]
    ProfileExists(String),

    /// A pattern rule contains a regular expression that does not compile.
    #[error("invalid pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// An entry could not be read during the pattern pass. Aborts the resolve
    /// call it occurred in; later resolve calls are unaffected.
    #[error("failed to scan workspace root `{}`", root.display())]
    Traversal {
        root: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("failed to read profile config `{}`", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write profile config `{}`", path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed profile config `{}`", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to encode profile config")]
    ConfigEncode(#[from] toml::ser::Error),
}
