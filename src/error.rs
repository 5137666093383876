//! Error kinds raised at the I/O boundary.  Gameplay code never sees these:
//! loaders log them and fall back, menus turn them into status text.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum AssetError {
    UnsupportedFormat { path: PathBuf },
    NotFound { path: PathBuf },
    Empty { path: PathBuf },
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { path } => {
                write!(f, "{} does not have a supported sprite format", path.display())
            }
            Self::NotFound { path } => write!(f, "{} does not exist", path.display()),
            Self::Empty { path } => write!(f, "{} contains no sprite art", path.display()),
            Self::Io { path, source } => write!(f, "failed to read {}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ScoreError {
    UnsupportedFormat { path: PathBuf },
    NotFound { path: PathBuf },
    Read { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
}

impl ScoreError {
    /// Short text shown on the menu screen that triggered the operation.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat { .. } | Self::NotFound { .. } => "Invalid path!",
            Self::Read { .. } => "Error reading file!",
            Self::Write { .. } => "Score NOT saved!",
        }
    }
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { path } => {
                write!(f, "{} does not have a supported text format", path.display())
            }
            Self::NotFound { path } => write!(f, "{} does not exist", path.display()),
            Self::Read { path, source } => write!(f, "failed to read {}: {}", path.display(), source),
            Self::Write { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ScoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}
