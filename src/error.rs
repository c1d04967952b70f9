use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Error: {0}")]
    Anyhow(#[from] anyhow::Error),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn invalid_date<S: Into<String>>(msg: S) -> Self {
        Self::InvalidDate(msg.into())
    }

    pub fn invalid_rule<S: Into<String>>(msg: S) -> Self {
        Self::InvalidRule(msg.into())
    }

    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the message can be shown without leaking stored notes or titles.
    pub fn is_pii_safe(&self) -> bool {
        match self {
            Self::Database(_) | Self::Serialization(_) | Self::Anyhow(_) => false,
            Self::InvalidDate(_)
            | Self::InvalidRule(_)
            | Self::InvalidInput(_)
            | Self::Config(_) => true,
        }
    }

    pub fn to_safe_string(&self) -> String {
        if self.is_pii_safe() {
            self.to_string()
        } else {
            match self {
                Self::Database(_) => "Database operation failed".to_string(),
                Self::Serialization(_) => "Stored planner data could not be read".to_string(),
                Self::Anyhow(_) => "Operation failed".to_string(),
                _ => self.to_string(),
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_pii_safe() {
        let err = AppError::invalid_rule("weekly rule needs at least one weekday");
        assert!(err.is_pii_safe());
        assert_eq!(
            err.to_safe_string(),
            "Invalid recurrence rule: weekly rule needs at least one weekday"
        );
    }

    #[test]
    fn test_serialization_error_is_masked() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{notes: secret").unwrap_err();
        let err = AppError::from(parse_err);
        assert!(!err.is_pii_safe());
        assert_eq!(err.to_safe_string(), "Stored planner data could not be read");
    }
}
