use std::path::PathBuf;
use thiserror::Error;

/// Coarse failure categories surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Decode,
    Connection,
    Directory,
    Transfer,
    ConfigIo,
    Cancelled,
}

/// Every failure an action can end with. None of them are fatal to the process.
#[derive(Debug, Error)]
pub enum AppMetaError {
    #[error("Console IP, Port, and CUSA ID are mandatory.")]
    IncompleteData,

    #[error("Please load an image before pushing.")]
    MissingAsset,

    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot encode PNG payload: {0}")]
    Encode(#[source] image::ImageError),

    #[error("invalid port '{0}'")]
    InvalidPort(String),

    #[error("cannot connect to {addr}: {message}")]
    Connection { addr: String, message: String },

    #[error("anonymous login rejected by {addr}: {message}")]
    Login { addr: String, message: String },

    #[error("Cannot resolve {path}.\nEnsure the CUSA ID is correct and the game is installed.")]
    Directory { path: String },

    #[error("failed to store {file_name}: {message}")]
    Transfer { file_name: String, message: String },

    #[error("cannot write settings to {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("upload cancelled")]
    Cancelled,
}

impl AppMetaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IncompleteData | Self::MissingAsset => ErrorKind::Validation,
            Self::Decode { .. } | Self::Encode(_) => ErrorKind::Decode,
            Self::InvalidPort(_) | Self::Connection { .. } | Self::Login { .. } => {
                ErrorKind::Connection
            }
            Self::Directory { .. } => ErrorKind::Directory,
            Self::Transfer { .. } => ErrorKind::Transfer,
            Self::ConfigIo { .. } => ErrorKind::ConfigIo,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Dialog title shown next to the message.
    ///
    /// Validation and directory failures keep their own titles; everything
    /// else that happens during an upload collapses into "Execution Error".
    pub fn title(&self) -> &'static str {
        match self {
            Self::IncompleteData => "Incomplete Data",
            Self::MissingAsset => "Missing Asset",
            Self::Directory { .. } => "Directory Error",
            Self::ConfigIo { .. } => "I/O Error",
            Self::Cancelled => "Cancelled",
            _ => "Execution Error",
        }
    }

    /// Validation failures are warnings, not errors
    pub fn is_warning(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}
