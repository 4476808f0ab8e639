use thiserror::Error;

use gbce_core::{MarketError, MarketErrorKind};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] gbce_core::ValidationError),

    #[error(transparent)]
    Market(#[from] MarketError),

    #[error("invalid {what} spec '{spec}': {reason}")]
    Spec {
        what: &'static str,
        spec: String,
        reason: String,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn spec(what: &'static str, spec: &str, reason: impl Into<String>) -> Self {
        Self::Spec {
            what,
            spec: spec.to_owned(),
            reason: reason.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::Spec { .. } => 2,
            Self::Market(error) if error.kind() == MarketErrorKind::Validation => 2,
            Self::Market(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_errors_exit_with_three_unless_validation() {
        assert_eq!(CliError::from(MarketError::EmptyMarket).exit_code(), 3);
        assert_eq!(CliError::from(MarketError::unknown_stock("9TEA")).exit_code(), 3);
        let validation = MarketError::from(gbce_core::ValidationError::ZeroQuantity);
        assert_eq!(CliError::from(validation).exit_code(), 2);
        assert_eq!(CliError::spec("trade", "X", "bad").exit_code(), 2);
    }
}
