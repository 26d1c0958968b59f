pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("'{selector}' is not a valid selector: {message}")]
    InvalidSelector { selector: String, message: String },
}
