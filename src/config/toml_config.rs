use crate::core::affine::ZIPCODE;
use crate::domain::payroll::{ContributionConfig, TaxConfig};
use crate::utils::error::{PrimerError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Settings handed to the external solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub max_iterations: usize,
    /// Feasibility and duality-gap tolerance.
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-10,
        }
    }
}

impl Validate for SolverConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("solver.max_iterations", self.max_iterations, 1)?;
        validate_range(
            "solver.max_iterations",
            self.max_iterations,
            1,
            u32::MAX as usize,
        )?;
        validate_range("solver.tolerance", self.tolerance, 1e-15, 1e-3)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPayrollConfig")]
pub struct PayrollConfig {
    pub tax: TaxConfig,
    /// Resolved presets from the config file. A table named like a built-in
    /// preset (`raa`, `uni`) only replaces the keys it sets.
    pub presets: BTreeMap<String, ContributionConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPayrollConfig {
    tax: TaxConfig,
    presets: BTreeMap<String, toml::Table>,
}

impl TryFrom<RawPayrollConfig> for PayrollConfig {
    type Error = PrimerError;

    fn try_from(raw: RawPayrollConfig) -> Result<Self> {
        let presets: BTreeMap<_, _> = raw
            .presets
            .into_iter()
            .map(|(name, overrides)| {
                let base = builtin_preset(&name).unwrap_or_default();
                let preset = layer_preset(&name, &base, overrides)?;
                Ok((name, preset))
            })
            .collect::<Result<_>>()?;
        Ok(Self {
            tax: raw.tax,
            presets,
        })
    }
}

fn builtin_preset(name: &str) -> Option<ContributionConfig> {
    match name {
        "raa" => Some(ContributionConfig::raa()),
        "uni" => Some(ContributionConfig::uni()),
        _ => None,
    }
}

fn layer_preset(
    name: &str,
    base: &ContributionConfig,
    overrides: toml::Table,
) -> Result<ContributionConfig> {
    let invalid = |message: String| PrimerError::ConfigValidationError {
        field: format!("payroll.presets.{}", name),
        message,
    };

    let mut merged = match toml::Value::try_from(base) {
        Ok(toml::Value::Table(table)) => table,
        Ok(other) => return Err(invalid(format!("unexpected preset shape: {}", other))),
        Err(e) => return Err(invalid(e.to_string())),
    };
    for (key, value) in overrides {
        merged.insert(key, value);
    }
    toml::Value::Table(merged)
        .try_into::<ContributionConfig>()
        .map_err(|e| invalid(e.to_string()))
}

impl PayrollConfig {
    pub fn preset(&self, name: &str) -> Result<ContributionConfig> {
        self.presets
            .get(name)
            .cloned()
            .or_else(|| builtin_preset(name))
            .ok_or_else(|| PrimerError::MissingConfigError {
                field: format!("payroll.presets.{}", name),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub zipcode: u32,
    pub solver: SolverConfig,
    pub payroll: PayrollConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            zipcode: ZIPCODE,
            solver: SolverConfig::default(),
            payroll: PayrollConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| PrimerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.solver.validate()?;
        self.payroll.tax.validate()?;
        for (name, preset) in &self.payroll.presets {
            validate_non_empty_string("payroll.presets", name)?;
            preset.validate()?;
        }
        Ok(())
    }
}

/// Replaces `${VAR}` with the environment value; unknown variables are left as is.
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PrimerError::ConfigValidationError {
        field: "env_substitution".to_string(),
        message: e.to_string(),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.into_owned())
}
