use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArcPubError {
    #[error("config error: {0}")]
    Config(String),

    #[error("dataset contains no items")]
    DatasetEmpty,

    #[error("invalid contract path '{0}': must be relative and stay inside the ARC root")]
    InvalidPath(String),

    #[error("GitLab API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("{command} failed: {stderr}")]
    Git { command: String, stderr: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArcPubError>;
