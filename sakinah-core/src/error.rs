use thiserror::Error;

/// Errors raised by the page logic. None of them is fatal for the page: the
/// browser bindings log them and carry on with defaults.
#[derive(Debug, Error)]
pub enum SakinahError {
    #[error("Dictionary could not be read: {0}")]
    Dictionary(String),
    #[error("Unknown locale `{0}`")]
    UnknownLocale(String),
    #[error("Unknown theme `{0}`")]
    UnknownTheme(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}
