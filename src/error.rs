use thiserror::Error;

/// The main error type for blazorgrab operations.
#[derive(Debug, Error)]
pub enum BlazorgrabError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("'{url}' is not a valid http(s) URL")]
    InvalidUrl { url: String },

    #[error("invalid proxy URL '{url}': {message}")]
    InvalidProxy { url: String, message: String },

    #[error("invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed fetching entry page {url}: {message}")]
    EntryPageFetch { url: String, message: String },

    #[error("entry page {url} declares no <base href>")]
    BasePathMissing { url: String },

    #[error("failed fetching boot manifest {url}: {message}")]
    ManifestFetch { url: String, message: String },

    #[error("failed parsing boot manifest {url}: {source}")]
    ManifestParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed downloading '{name}' from {url}: {message}")]
    ResourceDownload {
        name: String,
        url: String,
        message: String,
    },

    #[error("refusing to write resource '{name}' outside the output directory")]
    UnsafeResourceName { name: String },

    #[error("{failed} of {total} resources failed to download")]
    DownloadsFailed { failed: usize, total: usize },
}

impl BlazorgrabError {
    /// Process exit code for the CLI, one per error class.
    pub fn exit_code(&self) -> u8 {
        match self {
            BlazorgrabError::InvalidUrl { .. }
            | BlazorgrabError::InvalidProxy { .. }
            | BlazorgrabError::InvalidExcludePattern { .. } => 2,
            BlazorgrabError::EntryPageFetch { .. } | BlazorgrabError::BasePathMissing { .. } => 3,
            BlazorgrabError::ManifestFetch { .. } | BlazorgrabError::ManifestParse { .. } => 4,
            BlazorgrabError::ResourceDownload { .. }
            | BlazorgrabError::UnsafeResourceName { .. }
            | BlazorgrabError::DownloadsFailed { .. } => 5,
            BlazorgrabError::Io(_) => 6,
        }
    }
}
