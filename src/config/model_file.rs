//! LP models described in TOML.
//!
//! ```toml
//! name = "lp-example"
//! sense = "maximize"
//!
//! [[variables]]
//! name = "x1"
//! objective = 1.0
//!
//! [[constraints]]
//! name = "c0"
//! relation = "le"
//! rhs = 14.0
//! coefficients = { x1 = 1.0, x2 = 1.0 }
//! ```

use crate::domain::model::{LinearProgram, Relation, Sense};
use crate::utils::error::{PrimerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    #[serde(default = "default_model_name")]
    pub name: String,
    pub sense: Sense,
    pub variables: Vec<VariableSpec>,
    #[serde(default)]
    pub constraints: Vec<ConstraintSpec>,
}

fn default_model_name() -> String {
    "model".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    #[serde(default)]
    pub objective: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintSpec {
    pub name: String,
    pub coefficients: BTreeMap<String, f64>,
    pub relation: Relation,
    pub rhs: f64,
}

impl ModelFile {
    pub fn into_program(self) -> Result<LinearProgram> {
        let mut program = LinearProgram::new(self.name, self.sense);
        for v in self.variables {
            program.add_variable(v.name, v.objective)?;
        }
        for c in self.constraints {
            let mut terms = Vec::with_capacity(c.coefficients.len());
            for (var_name, coef) in &c.coefficients {
                let var = program.variable_by_name(var_name).ok_or_else(|| {
                    PrimerError::model(format!(
                        "constraint '{}' uses undeclared variable '{}'",
                        c.name, var_name
                    ))
                })?;
                terms.push((var, *coef));
            }
            program.add_constraint(c.name, &terms, c.relation, c.rhs)?;
        }
        Ok(program)
    }
}

pub fn parse_program(content: &str) -> Result<LinearProgram> {
    let file: ModelFile = toml::from_str(content).map_err(|e| PrimerError::ConfigValidationError {
        field: "model".to_string(),
        message: format!("TOML parsing error: {}", e),
    })?;
    file.into_program()
}

pub fn load_program<P: AsRef<Path>>(path: P) -> Result<LinearProgram> {
    let content = std::fs::read_to_string(&path)?;
    tracing::debug!(path = %path.as_ref().display(), "loading model file");
    parse_program(&content)
}
