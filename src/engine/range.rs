//! Range evaluation for flattened tag values.

use crate::models::{tag::RangeRule, value::Scalar};

/// The verdict for one key's value against its rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Within bounds. Values equal to a bound are in range.
    InRange,
    /// Strictly below the minimum or strictly above the maximum.
    OutOfRange {
        /// The coerced numeric value that violated the rule.
        value: f64,
    },
    /// Missing or non-numeric input. Range rules never fire on it; unreadable
    /// data is a health concern, not a range violation.
    Skipped,
}

/// Evaluates `value` against `rule`.
pub fn evaluate(value: Option<&Scalar>, rule: &RangeRule) -> Verdict {
    let Some(scalar) = value else {
        return Verdict::Skipped;
    };
    let Some(numeric) = scalar.as_f64() else {
        return Verdict::Skipped;
    };

    let below = rule.min.is_some_and(|min| numeric < min);
    let above = rule.max.is_some_and(|max| numeric > max);
    if below || above {
        Verdict::OutOfRange { value: numeric }
    } else {
        Verdict::InRange
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn min_30() -> RangeRule {
        RangeRule { min: Some(30.0), max: None }
    }

    #[test]
    fn value_below_minimum_is_out_of_range() {
        assert_eq!(
            evaluate(Some(&Scalar::Float(29.9)), &min_30()),
            Verdict::OutOfRange { value: 29.9 }
        );
    }

    #[test]
    fn bound_itself_is_in_range() {
        assert_eq!(evaluate(Some(&Scalar::Float(30.0)), &min_30()), Verdict::InRange);
        assert_eq!(evaluate(Some(&Scalar::Float(30.1)), &min_30()), Verdict::InRange);
        let max_rule = RangeRule { min: None, max: Some(100.0) };
        assert_eq!(evaluate(Some(&Scalar::Int(100)), &max_rule), Verdict::InRange);
    }

    #[test]
    fn value_above_maximum_is_out_of_range() {
        let rule = RangeRule { min: Some(10.0), max: Some(20.0) };
        assert_eq!(
            evaluate(Some(&Scalar::Int(21)), &rule),
            Verdict::OutOfRange { value: 21.0 }
        );
        assert_eq!(evaluate(Some(&Scalar::Int(15)), &rule), Verdict::InRange);
    }

    #[test]
    fn non_numeric_input_is_skipped() {
        assert_eq!(evaluate(Some(&Scalar::Text("Error".to_string())), &min_30()), Verdict::Skipped);
        assert_eq!(evaluate(Some(&Scalar::Text(String::new())), &min_30()), Verdict::Skipped);
        assert_eq!(evaluate(None, &min_30()), Verdict::Skipped);
    }

    #[test]
    fn numeric_text_is_coerced() {
        assert_eq!(
            evaluate(Some(&Scalar::Text("25.5".to_string())), &min_30()),
            Verdict::OutOfRange { value: 25.5 }
        );
    }

    #[test]
    fn open_rule_never_fires() {
        assert_eq!(evaluate(Some(&Scalar::Float(1e9)), &RangeRule::default()), Verdict::InRange);
    }
}
