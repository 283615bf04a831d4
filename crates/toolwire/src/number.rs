//! Canonical decimal rendering of numeric tool results.

/// Render `value` the way it is carried in text content.
///
/// Integral values carry no fractional part, negative zero collapses to `0`,
/// and everything else uses the shortest representation that parses back to
/// the same `f64`. Returns `None` for NaN and infinities.
pub fn canonical_decimal(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    if value == 0.0 {
        return Some("0".to_string());
    }
    Some(format!("{value}"))
}
