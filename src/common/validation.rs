// src/common/validation.rs

use rust_decimal::Decimal;
use validator::ValidationError;

// Validações customizadas compartilhadas pelos payloads

pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.add_param("exclusive_min".into(), &0.0);
        err.message = Some("A quantidade deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn not_negative_accepts_zero_and_positive() {
        assert!(validate_not_negative(&dec!(0)).is_ok());
        assert!(validate_not_negative(&dec!(-0.0)).is_ok());
        assert!(validate_not_negative(&dec!(12.5)).is_ok());
        assert!(validate_not_negative(&dec!(-0.01)).is_err());
    }

    #[test]
    fn positive_rejects_zero() {
        assert!(validate_positive(&dec!(0)).is_err());
        assert!(validate_positive(&dec!(-1)).is_err());
        assert!(validate_positive(&dec!(0.5)).is_ok());
    }
}
