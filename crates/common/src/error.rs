/// Wordmap error types
#[derive(Debug, thiserror::Error)]
pub enum WordmapError {
    /// Vocabulary could not be loaded
    #[error("Vocabulary load error: {0}")]
    Load(String),

    /// Token is not part of the vocabulary
    #[error("Unknown token: {0}")]
    UnknownToken(String),

    /// Not enough samples or dimensions for a projection
    #[error("Dimension error: {0}")]
    Dimension(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WordmapError {
    /// Create vocabulary load error
    pub fn load<S: Into<String>>(msg: S) -> Self {
        Self::Load(msg.into())
    }

    /// Create unknown token error
    pub fn unknown_token<S: Into<String>>(token: S) -> Self {
        Self::UnknownToken(token.into())
    }

    /// Create dimension error
    pub fn dimension<S: Into<String>>(msg: S) -> Self {
        Self::Dimension(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error belongs to a single request rather than the process
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnknownToken(_) | Self::Dimension(_) | Self::InvalidInput(_)
        )
    }

    /// Message shown to the person who submitted the word
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(_) => "Please enter a word.".to_string(),
            Self::UnknownToken(_) => "Word not found in vocabulary.".to_string(),
            Self::Dimension(msg) => format!("Cannot plot these words: {}", msg),
            _ => "Something went wrong, please try again.".to_string(),
        }
    }
}

// HTTP response conversion
impl WordmapError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::UnknownToken(_) => 404,
            Self::Dimension(_) => 422,
            Self::Load(_) => 500,
            Self::Config(_) => 500,
            Self::Internal(_) => 500,
            Self::Io(_) => 500,
        }
    }
}
