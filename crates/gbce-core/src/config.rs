use time::Duration;

use crate::ValidationError;

/// Trailing window used by VWSP when the caller does not pass one.
pub const DEFAULT_VWSP_WINDOW: Duration = Duration::minutes(15);

/// Market-wide tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketConfig {
    vwsp_window: Duration,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            vwsp_window: DEFAULT_VWSP_WINDOW,
        }
    }
}

impl MarketConfig {
    pub fn new(vwsp_window: Duration) -> Result<Self, ValidationError> {
        Ok(Self {
            vwsp_window: validate_window(vwsp_window)?,
        })
    }

    pub fn with_window_minutes(minutes: i64) -> Result<Self, ValidationError> {
        Self::new(Duration::minutes(minutes))
    }

    pub const fn vwsp_window(&self) -> Duration {
        self.vwsp_window
    }
}

pub(crate) fn validate_window(window: Duration) -> Result<Duration, ValidationError> {
    if window.is_positive() {
        Ok(window)
    } else {
        Err(ValidationError::NonPositiveWindow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_fifteen_minutes() {
        assert_eq!(MarketConfig::default().vwsp_window(), Duration::minutes(15));
    }

    #[test]
    fn rejects_empty_window() {
        assert_eq!(
            MarketConfig::with_window_minutes(0),
            Err(ValidationError::NonPositiveWindow)
        );
        assert!(MarketConfig::new(Duration::seconds(-1)).is_err());
        assert!(MarketConfig::with_window_minutes(5).is_ok());
    }
}
