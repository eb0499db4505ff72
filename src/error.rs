pub type SplashResult<T> = Result<T, SplashError>;

#[derive(thiserror::Error, Debug)]
pub enum SplashError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("measure error: {0}")]
    Measure(String),

    #[error("choreography error: {0}")]
    Choreography(String),

    #[error("dependency error: {0}")]
    Dependency(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SplashError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    pub fn measure(msg: impl Into<String>) -> Self {
        Self::Measure(msg.into())
    }

    pub fn choreography(msg: impl Into<String>) -> Self {
        Self::Choreography(msg.into())
    }

    pub fn dependency(msg: impl Into<String>) -> Self {
        Self::Dependency(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            SplashError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(SplashError::layout("x").to_string().contains("layout error:"));
        assert!(
            SplashError::measure("x")
                .to_string()
                .contains("measure error:")
        );
        assert!(
            SplashError::choreography("x")
                .to_string()
                .contains("choreography error:")
        );
        assert!(
            SplashError::dependency("x")
                .to_string()
                .contains("dependency error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = SplashError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
