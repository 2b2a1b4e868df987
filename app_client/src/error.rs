use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Not authenticated")]
    Unauthorized,

    #[error("Already in favorites")]
    AlreadyFavorited,

    #[error("server responded {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
