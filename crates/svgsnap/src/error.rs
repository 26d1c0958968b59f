pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A capability the operation needs was not configured.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error(transparent)]
    Dom(#[from] svgsnap_dom::Error),

    #[error("invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
}
