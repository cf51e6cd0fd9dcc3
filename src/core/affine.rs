use serde::Serialize;

/// Zipcode the greeting is keyed on.
pub const ZIPCODE: u32 = 4020;

pub const DEFAULT_OFFSET: i64 = 9;

/// `x² + b`, with `b` defaulting to [`DEFAULT_OFFSET`].
///
/// Widened to `i128` so the result is exact for every pair of `i64` inputs.
pub fn affinect(x: i64, b: Option<i64>) -> i128 {
    let x = i128::from(x);
    x * x + i128::from(b.unwrap_or(DEFAULT_OFFSET))
}

pub fn greeting(zipcode: u32) -> &'static str {
    if zipcode == ZIPCODE {
        "Linz"
    } else {
        "Austria"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoReport {
    pub zipcode: u32,
    pub greeting: &'static str,
    pub x: i64,
    pub b: i64,
    pub value: i128,
}

pub fn run_demo(x: i64, b: Option<i64>, zipcode: u32) -> DemoReport {
    let b = b.unwrap_or(DEFAULT_OFFSET);
    let report = DemoReport {
        zipcode,
        greeting: greeting(zipcode),
        x,
        b,
        value: affinect(x, Some(b)),
    };
    tracing::debug!(x, b, value = %report.value, greeting = report.greeting, "demo evaluated");
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affinect_default_offset() {
        assert_eq!(affinect(2, None), 13);
        assert_eq!(affinect(2, Some(9)), 13);
    }

    #[test]
    fn test_affinect_matches_formula() {
        for x in -50..=50_i64 {
            for b in [-100_i64, -9, 0, 1, 9, 1000] {
                assert_eq!(affinect(x, Some(b)), i128::from(x * x + b));
            }
        }
    }

    #[test]
    fn test_affinect_does_not_overflow() {
        let expected = i128::from(i64::MAX) * i128::from(i64::MAX) + i128::from(i64::MIN);
        assert_eq!(affinect(i64::MAX, Some(i64::MIN)), expected);
        assert_eq!(
            affinect(i64::MIN, None),
            i128::from(i64::MIN) * i128::from(i64::MIN) + 9
        );
    }

    #[test]
    fn test_greeting() {
        assert_eq!(greeting(4020), "Linz");
        assert_eq!(greeting(1010), "Austria");
        assert_eq!(greeting(ZIPCODE), "Linz");
    }

    #[test]
    fn test_run_demo() {
        let report = run_demo(2, None, 4020);
        assert_eq!(report.value, 13);
        assert_eq!(report.b, 9);
        assert_eq!(report.greeting, "Linz");
    }
}
