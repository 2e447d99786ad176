//! Error taxonomy.
//!
//! Most public entry points never surface these: font loading and license
//! reading log the error and degrade to an unavailable font or empty text.
//! Configuration parsing and metadata conversion return them directly.

use std::path::PathBuf;

/// Result type for fallible fonticons operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A font or license resource file does not exist.
    #[error("cannot find resource file \"{}\"", path.display())]
    FontNotFound { path: PathBuf },

    /// The font data could not be parsed.
    #[error("cannot load font from \"{}\": {reason}", path.display())]
    FontParse { path: PathBuf, reason: String },

    /// No installed font matches the requested family.
    #[error("system font family \"{family}\" is not installed")]
    SystemFontMissing { family: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Malformed icon font metadata.
    #[error("metadata error: {0}")]
    Metadata(String),
}

impl Error {
    pub fn font_parse(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::FontParse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }
}
