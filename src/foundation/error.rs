/// Convenience result type used across the countdown pipeline.
pub type CountdownResult<T> = Result<T, CountdownError>;

/// Top-level error taxonomy for the countdown pipeline.
///
/// `MissingInput` and `InvalidInput` are caller mistakes and map to HTTP 400. Everything else is a
/// server-side failure; its detail is logged and never sent to the client.
#[derive(thiserror::Error, Debug)]
pub enum CountdownError {
    /// A required request parameter was absent.
    #[error("missing input: {0}")]
    MissingInput(String),

    /// A required request parameter was present but could not be parsed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Failure while composing a frame.
    #[error("rendering error: {0}")]
    Rendering(String),

    /// Failure while encoding frames or writing encoded bytes.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Font assets could not be loaded or registered.
    #[error("font error: {0}")]
    Font(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CountdownError {
    /// Build a [`CountdownError::MissingInput`] value.
    pub fn missing_input(msg: impl Into<String>) -> Self {
        Self::MissingInput(msg.into())
    }

    /// Build a [`CountdownError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`CountdownError::Rendering`] value.
    pub fn rendering(msg: impl Into<String>) -> Self {
        Self::Rendering(msg.into())
    }

    /// Build a [`CountdownError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`CountdownError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Return `true` for errors caused by the caller's request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingInput(_) | Self::InvalidInput(_))
    }
}

impl From<std::io::Error> for CountdownError {
    fn from(err: std::io::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
