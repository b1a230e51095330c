use crate::DdError;

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, DdError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(DdError::NonFinite { what, value: v })
    }
}

/// Finite and `>= 0`.
pub fn ensure_non_negative(v: f64, what: &'static str) -> Result<f64, DdError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(DdError::OutOfRange { what, value: v });
    }
    Ok(v)
}

/// Finite and `> 0`.
pub fn ensure_positive(v: f64, what: &'static str) -> Result<f64, DdError> {
    let v = ensure_finite(v, what)?;
    if v <= 0.0 {
        return Err(DdError::OutOfRange { what, value: v });
    }
    Ok(v)
}

/// True when `a` and `b` are both non-zero and point in opposite directions.
pub fn opposite_signs(a: f64, b: f64) -> bool {
    (a > 0.0 && b < 0.0) || (a < 0.0 && b > 0.0)
}
