pub type CycloidResult<T> = Result<T, CycloidError>;

#[derive(thiserror::Error, Debug)]
pub enum CycloidError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("color error: {0}")]
    Color(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CycloidError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Empty-input errors mean "skip this frame", never "stop".
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::EmptyInput(_))
    }
}
