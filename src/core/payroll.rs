//! Monthly gross-to-net calculation on the employee side.

use crate::core::report::PayrollExampleReport;
use crate::domain::payroll::{
    ContributionConfig, GrossEstimate, NetResult, SocialBreakdown, TaxConfig,
};
use crate::utils::error::{PrimerError, Result};
use crate::utils::validation::{validate_finite, validate_range, Validate};

const SEARCH_ITERATIONS: usize = 60;
const NET_TOLERANCE: f64 = 0.01;

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn rate_or_fixed(base: f64, rate: f64, fixed: f64) -> f64 {
    if fixed > 0.0 {
        round_cents(fixed)
    } else {
        round_cents(base * rate)
    }
}

pub fn social_contributions(gross: f64, conf: &ContributionConfig) -> SocialBreakdown {
    let pick = |enabled: bool, amount: f64| if enabled { amount } else { 0.0 };

    let pension = pick(
        conf.include_pension,
        rate_or_fixed(gross, conf.pension_rate, conf.pension_fixed),
    );
    let unemployment = pick(
        conf.include_unemployment,
        round_cents(gross * conf.unemployment_rate),
    );
    let health = pick(conf.include_health, round_cents(gross * conf.health_rate));
    let chamber_levy = pick(
        conf.include_chamber_levy,
        round_cents(gross * conf.chamber_levy_rate),
    );
    let housing = pick(
        conf.include_housing,
        rate_or_fixed(gross, conf.housing_rate, conf.housing_fixed),
    );

    SocialBreakdown {
        pension,
        unemployment,
        health,
        chamber_levy,
        housing,
        total: round_cents(pension + unemployment + health + chamber_levy + housing),
    }
}

/// Progressive tax on a monthly income; bracket thresholds are annual.
pub fn income_tax(taxable_income: f64, tax: &TaxConfig) -> f64 {
    let mut total = 0.0;
    let mut lower = 0.0;
    for bracket in &tax.brackets {
        if taxable_income <= lower {
            break;
        }
        let upper = bracket.upper.map_or(f64::INFINITY, |u| u / 12.0);
        let segment_upper = upper.min(taxable_income);
        total += (segment_upper - lower).max(0.0) * bracket.rate;
        lower = upper;
        if segment_upper >= taxable_income {
            break;
        }
    }
    round_cents((total - tax.credits).max(0.0))
}

#[tracing::instrument(level = "debug", skip(conf, tax))]
pub fn gross_to_net(gross: f64, conf: &ContributionConfig, tax: &TaxConfig) -> NetResult {
    let social = social_contributions(gross, conf);
    let taxable_income = (gross - social.total).max(0.0);
    let income_tax = income_tax(taxable_income, tax);
    let net = round_cents(gross - social.total - income_tax);

    NetResult {
        gross: round_cents(gross),
        social,
        taxable_income: round_cents(taxable_income),
        income_tax,
        net,
    }
}

/// Bisection on the gross amount until the net lands within one cent of
/// `target_net`. Falls back to the midpoint of the last interval.
#[tracing::instrument(level = "debug", skip(conf, tax))]
pub fn net_to_gross(
    target_net: f64,
    conf: &ContributionConfig,
    tax: &TaxConfig,
    guess: Option<f64>,
) -> GrossEstimate {
    let (mut low, mut high) = match guess.filter(|g| *g != 0.0) {
        Some(g) => ((g * 0.5).max(0.0), g * 1.5 + 1000.0),
        None => (
            target_net.max(0.0),
            (target_net * 1.5 + 1000.0).max(target_net + 4000.0),
        ),
    };

    let estimate = |gross: f64, converged: bool| {
        let result = gross_to_net(gross, conf, tax);
        GrossEstimate {
            estimated_gross: round_cents(gross),
            net_diff: round_cents(result.net - target_net),
            converged,
            result,
        }
    };

    for iteration in 0..SEARCH_ITERATIONS {
        let mid = (low + high) / 2.0;
        let net = gross_to_net(mid, conf, tax).net;
        if (net - target_net).abs() <= NET_TOLERANCE {
            tracing::debug!(iteration, gross = mid, "net target reached");
            return estimate(mid, true);
        }
        if net > target_net {
            high = mid;
        } else {
            low = mid;
        }
    }

    tracing::warn!(target_net, "net target not reached, returning closest gross");
    estimate((low + high) / 2.0, false)
}

/// The two-job sample: RAA at 4500 and UNI at 940.98 per month.
pub fn example_run(
    raa: &ContributionConfig,
    uni: &ContributionConfig,
    tax: &TaxConfig,
) -> PayrollExampleReport {
    let entries = vec![
        ("raa".to_string(), gross_to_net(4500.0, raa, tax)),
        ("uni".to_string(), gross_to_net(940.98, uni, tax)),
    ];
    let combined_net = round_cents(entries.iter().map(|(_, r)| r.net).sum());
    PayrollExampleReport {
        entries,
        combined_net,
    }
}

impl Validate for ContributionConfig {
    fn validate(&self) -> Result<()> {
        for (field, rate) in [
            ("pension_rate", self.pension_rate),
            ("unemployment_rate", self.unemployment_rate),
            ("health_rate", self.health_rate),
            ("chamber_levy_rate", self.chamber_levy_rate),
            ("housing_rate", self.housing_rate),
        ] {
            validate_range(field, rate, 0.0, 1.0)?;
        }
        for (field, amount) in [
            ("pension_fixed", self.pension_fixed),
            ("housing_fixed", self.housing_fixed),
        ] {
            validate_finite(field, amount)?;
            validate_range(field, amount, 0.0, f64::MAX)?;
        }
        Ok(())
    }
}

impl Validate for TaxConfig {
    fn validate(&self) -> Result<()> {
        if self.brackets.is_empty() {
            return Err(PrimerError::MissingConfigError {
                field: "payroll.tax.brackets".to_string(),
            });
        }
        let mut previous = 0.0;
        for (i, bracket) in self.brackets.iter().enumerate() {
            validate_range("payroll.tax.brackets.rate", bracket.rate, 0.0, 1.0)?;
            match bracket.upper {
                Some(upper) => {
                    validate_finite("payroll.tax.brackets.upper", upper)?;
                    if upper <= previous {
                        return Err(PrimerError::InvalidConfigValueError {
                            field: "payroll.tax.brackets.upper".to_string(),
                            value: upper.to_string(),
                            reason: "Thresholds must be strictly increasing".to_string(),
                        });
                    }
                    previous = upper;
                }
                None if i + 1 != self.brackets.len() => {
                    return Err(PrimerError::InvalidConfigValueError {
                        field: "payroll.tax.brackets.upper".to_string(),
                        value: "none".to_string(),
                        reason: "Only the last bracket may be open-ended".to_string(),
                    });
                }
                None => {}
            }
        }
        validate_finite("payroll.tax.credits", self.credits)?;
        validate_range("payroll.tax.credits", self.credits, 0.0, f64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payroll::TaxBracket;

    fn assert_cents(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 0.011,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_disabled_contributions_are_zero() {
        let conf = ContributionConfig {
            include_pension: false,
            include_unemployment: false,
            include_health: false,
            include_chamber_levy: false,
            include_housing: false,
            ..ContributionConfig::default()
        };
        let social = social_contributions(3000.0, &conf);
        assert_eq!(social.total, 0.0);
    }

    #[test]
    fn test_fixed_amounts_override_rates() {
        let conf = ContributionConfig {
            pension_fixed: 297.25,
            housing_fixed: 12.0,
            ..ContributionConfig::default()
        };
        let social = social_contributions(4500.0, &conf);
        assert_eq!(social.pension, 297.25);
        assert_eq!(social.housing, 12.0);
    }

    #[test]
    fn test_uni_contributions() {
        let social = social_contributions(1000.0, &ContributionConfig::uni());
        assert_cents(social.pension, 102.5);
        assert_cents(social.unemployment, 29.5);
        assert_cents(social.health, 38.7);
        assert_cents(social.chamber_levy, 5.0);
        assert_cents(social.housing, 5.0);
        assert_cents(social.total, 180.7);
    }

    #[test]
    fn test_income_tax_brackets() {
        let no_credit = TaxConfig {
            credits: 0.0,
            ..TaxConfig::default()
        };
        // below the first monthly threshold (13308 / 12 = 1109)
        assert_eq!(income_tax(1000.0, &no_credit), 0.0);
        assert_cents(income_tax(2000.0, &no_credit), 198.06);
        assert_cents(income_tax(2000.0, &TaxConfig::default()), 157.48);
    }

    #[test]
    fn test_credit_never_makes_tax_negative() {
        assert_eq!(income_tax(50.0, &TaxConfig::default()), 0.0);
    }

    #[test]
    fn test_single_open_bracket() {
        let flat = TaxConfig {
            brackets: vec![TaxBracket::open(0.25)],
            credits: 0.0,
        };
        assert_cents(income_tax(400.0, &flat), 100.0);
    }

    #[test]
    fn test_tax_config_validation() {
        assert!(TaxConfig::default().validate().is_ok());
        let unordered = TaxConfig {
            brackets: vec![
                TaxBracket::capped(20000.0, 0.0),
                TaxBracket::capped(10000.0, 0.2),
            ],
            credits: 0.0,
        };
        assert!(unordered.validate().is_err());
        let open_middle = TaxConfig {
            brackets: vec![TaxBracket::open(0.1), TaxBracket::capped(10000.0, 0.2)],
            credits: 0.0,
        };
        assert!(open_middle.validate().is_err());
    }

    #[test]
    fn test_contribution_validation() {
        assert!(ContributionConfig::raa().validate().is_ok());
        let bad = ContributionConfig {
            health_rate: 1.5,
            ..ContributionConfig::default()
        };
        assert!(bad.validate().is_err());
    }
}
