use serde::{Deserialize, Serialize};

/// Employee-side contribution switches and rates (decimal, 0.18 = 18%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributionConfig {
    pub include_pension: bool,
    pub include_unemployment: bool,
    pub include_health: bool,
    pub include_chamber_levy: bool,
    pub include_housing: bool,
    pub pension_rate: f64,
    /// Replaces `pension_rate` when greater than zero.
    pub pension_fixed: f64,
    pub unemployment_rate: f64,
    pub health_rate: f64,
    pub chamber_levy_rate: f64,
    pub housing_rate: f64,
    /// Replaces `housing_rate` when greater than zero.
    pub housing_fixed: f64,
}

impl Default for ContributionConfig {
    fn default() -> Self {
        Self {
            include_pension: true,
            include_unemployment: true,
            include_health: true,
            include_chamber_levy: true,
            include_housing: true,
            pension_rate: 0.1025,
            pension_fixed: 0.0,
            unemployment_rate: 0.00295,
            health_rate: 0.0387,
            chamber_levy_rate: 0.0050,
            housing_rate: 0.0050,
            housing_fixed: 0.0,
        }
    }
}

impl ContributionConfig {
    /// No unemployment insurance and no chamber levy; pension as a fixed amount.
    pub fn raa() -> Self {
        Self {
            include_unemployment: false,
            include_chamber_levy: false,
            pension_fixed: 297.25,
            unemployment_rate: 0.0295,
            ..Self::default()
        }
    }

    pub fn uni() -> Self {
        Self {
            unemployment_rate: 0.0295,
            ..Self::default()
        }
    }
}

/// One bracket of the progressive table. `upper` is an annual threshold;
/// `None` marks the open-ended top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper: Option<f64>,
    pub rate: f64,
}

impl TaxBracket {
    pub const fn capped(upper: f64, rate: f64) -> Self {
        Self {
            upper: Some(upper),
            rate,
        }
    }

    pub const fn open(rate: f64) -> Self {
        Self { upper: None, rate }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxConfig {
    pub brackets: Vec<TaxBracket>,
    /// Flat monthly credit subtracted from the computed tax.
    pub credits: f64,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            brackets: vec![
                TaxBracket::capped(13308.0, 0.0),
                TaxBracket::capped(21617.0, 0.20),
                TaxBracket::capped(35836.0, 0.30),
                TaxBracket::capped(69166.0, 0.40),
                TaxBracket::capped(103072.0, 0.48),
                TaxBracket::open(0.50),
            ],
            credits: 40.58,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialBreakdown {
    pub pension: f64,
    pub unemployment: f64,
    pub health: f64,
    pub chamber_levy: f64,
    pub housing: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetResult {
    pub gross: f64,
    pub social: SocialBreakdown,
    pub taxable_income: f64,
    pub income_tax: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrossEstimate {
    pub estimated_gross: f64,
    /// `result.net - target`, rounded to cents.
    pub net_diff: f64,
    pub converged: bool,
    pub result: NetResult,
}
