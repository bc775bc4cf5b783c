//! Coercion and clamping of untrusted numbers.
//!
//! Every numeric field that reaches the layout engine or the design options
//! passes through [`clamp`]. It never fails: values that cannot be read as a
//! finite number are replaced by the caller's fallback.

use serde_json::Value;

/// Anything that can be read as a number.
///
/// Returns `None` when the value has no numeric reading at all. A `Some` may
/// still be NaN or infinite; [`clamp`] treats those like `None`.
pub trait ToNumber {
    fn to_number(&self) -> Option<f64>;
}

impl ToNumber for f64 {
    fn to_number(&self) -> Option<f64> {
        Some(*self)
    }
}

impl ToNumber for f32 {
    fn to_number(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl ToNumber for i64 {
    fn to_number(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl ToNumber for u32 {
    fn to_number(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl ToNumber for str {
    fn to_number(&self) -> Option<f64> {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok()
    }
}

impl ToNumber for Value {
    fn to_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.as_str().to_number(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl<T: ToNumber + ?Sized> ToNumber for Option<&T> {
    fn to_number(&self) -> Option<f64> {
        self.and_then(|v| v.to_number())
    }
}

/// Coerce `value` to a number and clamp it into `[min, max]`.
///
/// A missing bound means unbounded on that side. When `value` is not a
/// finite number the `fallback` is returned as-is, without clamping.
pub fn clamp<T: ToNumber + ?Sized>(value: &T, fallback: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let Some(mut v) = value.to_number().filter(|v| v.is_finite()) else {
        return fallback;
    };
    if let Some(lo) = min {
        v = v.max(lo);
    }
    if let Some(hi) = max {
        v = v.min(hi);
    }
    v
}

/// [`clamp`] followed by flooring, for counts
pub fn clamp_count<T: ToNumber + ?Sized>(value: &T, fallback: f64, min: Option<f64>) -> f64 {
    let v = clamp(value, fallback, min, None).floor();
    match min {
        Some(lo) if v < lo => lo.ceil(),
        _ => v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn passes_through_in_range() {
        assert_eq!(clamp(&5.0, 1.0, Some(0.0), Some(10.0)), 5.0);
    }

    #[test]
    fn clamps_both_sides() {
        assert_eq!(clamp(&-3.0, 1.0, Some(0.0), Some(10.0)), 0.0);
        assert_eq!(clamp(&30.0, 1.0, Some(0.0), Some(10.0)), 10.0);
    }

    #[test]
    fn unbounded_sides() {
        assert_eq!(clamp(&-1e9, 1.0, None, Some(10.0)), -1e9);
        assert_eq!(clamp(&1e9, 1.0, Some(0.0), None), 1e9);
    }

    #[test]
    fn non_finite_returns_fallback_unclamped() {
        assert_eq!(clamp(&f64::NAN, 42.0, Some(0.0), Some(10.0)), 42.0);
        assert_eq!(clamp(&f64::INFINITY, -7.0, Some(0.0), None), -7.0);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        assert_eq!(clamp(" 12.5 ", 0.0, None, None), 12.5);
        assert_eq!(clamp(&json!("3"), 0.0, Some(5.0), None), 5.0);
        assert_eq!(clamp("abc", 9.0, None, None), 9.0);
        assert_eq!(clamp("", 9.0, None, None), 9.0);
    }

    #[test]
    fn json_values() {
        assert_eq!(clamp(&json!(7), 0.0, None, None), 7.0);
        assert_eq!(clamp(&json!(true), 0.0, None, None), 1.0);
        assert_eq!(clamp(&json!(null), 4.0, None, None), 4.0);
        assert_eq!(clamp(&json!([1]), 4.0, None, None), 4.0);
        assert_eq!(clamp(&None::<&Value>, 4.0, None, None), 4.0);
    }

    #[test]
    fn inverted_bounds_do_not_panic() {
        assert_eq!(clamp(&5.0, 0.0, Some(10.0), Some(1.0)), 1.0);
    }

    #[test]
    fn count_is_floored() {
        assert_eq!(clamp_count(&6.9, 1.0, Some(1.0)), 6.0);
        assert_eq!(clamp_count(&0.2, 1.0, Some(1.0)), 1.0);
        assert_eq!(clamp_count(&-4.0, 0.0, Some(0.0)), 0.0);
        assert_eq!(clamp_count("x", 3.0, Some(0.0)), 3.0);
    }

    proptest! {
        #[test]
        fn clamp_is_idempotent(
            x in prop::num::f64::ANY,
            t in 0.0f64..=1.0,
            lo in -1e6f64..1e6,
            span in 0.0f64..1e6,
        ) {
            // Fallbacks are trusted defaults, so they sit inside the range.
            let hi = lo + span;
            let f = lo + t * span;
            let once = clamp(&x, f, Some(lo), Some(hi));
            let twice = clamp(&once, f, Some(lo), Some(hi));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn clamped_finite_values_stay_in_range(x in -1e9f64..1e9, lo in -1e6f64..1e6, span in 0.0f64..1e6) {
            let hi = lo + span;
            let v = clamp(&x, 0.0, Some(lo), Some(hi));
            prop_assert!(v >= lo && v <= hi);
        }
    }
}
