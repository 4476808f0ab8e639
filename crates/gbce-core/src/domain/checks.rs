use crate::ValidationError;

pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(value)
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if finite(field, value)? < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(value)
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if finite(field, value)? <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(value)
}

/// Fractions such as a preferred stock's fixed dividend rate.
pub(crate) fn unit_fraction(value: f64) -> Result<f64, ValidationError> {
    finite("fixed_dividend", value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::FixedDividendOutOfRange { value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert_eq!(
            positive("price", 0.0),
            Err(ValidationError::NonPositiveValue { field: "price" })
        );
        assert_eq!(
            positive("price", f64::NAN),
            Err(ValidationError::NonFiniteValue { field: "price" })
        );
        assert_eq!(positive("price", 0.5), Ok(0.5));
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert_eq!(non_negative("last_dividend", 0.0), Ok(0.0));
        assert!(non_negative("last_dividend", -0.01).is_err());
    }

    #[test]
    fn unit_fraction_bounds_are_inclusive() {
        assert_eq!(unit_fraction(0.0), Ok(0.0));
        assert_eq!(unit_fraction(1.0), Ok(1.0));
        assert!(matches!(
            unit_fraction(2.0),
            Err(ValidationError::FixedDividendOutOfRange { .. })
        ));
    }
}
