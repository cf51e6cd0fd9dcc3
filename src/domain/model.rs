use crate::utils::error::{PrimerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sense {
    Maximize,
    Minimize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    #[serde(rename = "le", alias = "<=")]
    LessEqual,
    #[serde(rename = "ge", alias = ">=")]
    GreaterEqual,
    #[serde(rename = "eq", alias = "=")]
    Equal,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Relation::LessEqual => "<=",
            Relation::GreaterEqual => ">=",
            Relation::Equal => "=",
        };
        f.write_str(symbol)
    }
}

/// Handle to a variable inside the program that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub(crate) usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Non-negative continuous decision variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub objective: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub name: String,
    /// Sparse row, at most one entry per variable.
    pub terms: Vec<(VarId, f64)>,
    pub relation: Relation,
    pub rhs: f64,
}

impl Constraint {
    pub fn coefficient(&self, var: VarId) -> f64 {
        self.terms
            .iter()
            .find(|(id, _)| *id == var)
            .map(|(_, coef)| *coef)
            .unwrap_or(0.0)
    }
}

/// A small linear program: `sense Σ c_j x_j` subject to named rows, `x >= 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    pub name: String,
    pub sense: Sense,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
}

impl LinearProgram {
    pub fn new(name: impl Into<String>, sense: Sense) -> Self {
        Self {
            name: name.into(),
            sense,
            variables: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn add_variable(&mut self, name: impl Into<String>, objective: f64) -> Result<VarId> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PrimerError::model("variable name cannot be empty"));
        }
        if self.variables.iter().any(|v| v.name == name) {
            return Err(PrimerError::model(format!("duplicate variable '{}'", name)));
        }
        if !objective.is_finite() {
            return Err(PrimerError::model(format!(
                "objective coefficient of '{}' is not finite",
                name
            )));
        }
        self.variables.push(Variable { name, objective });
        Ok(VarId(self.variables.len() - 1))
    }

    /// Adds `Σ terms (relation) rhs`. Repeated variables in `terms` are summed.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        terms: &[(VarId, f64)],
        relation: Relation,
        rhs: f64,
    ) -> Result<usize> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PrimerError::model("constraint name cannot be empty"));
        }
        if self.constraints.iter().any(|c| c.name == name) {
            return Err(PrimerError::model(format!("duplicate constraint '{}'", name)));
        }
        if !rhs.is_finite() {
            return Err(PrimerError::model(format!(
                "right-hand side of '{}' is not finite",
                name
            )));
        }

        let mut row: Vec<(VarId, f64)> = Vec::with_capacity(terms.len());
        for &(var, coef) in terms {
            if var.0 >= self.variables.len() {
                return Err(PrimerError::model(format!(
                    "constraint '{}' references unknown variable #{}",
                    name, var.0
                )));
            }
            if !coef.is_finite() {
                return Err(PrimerError::model(format!(
                    "coefficient of '{}' in '{}' is not finite",
                    self.variables[var.0].name, name
                )));
            }
            match row.iter_mut().find(|(id, _)| *id == var) {
                Some((_, existing)) => *existing += coef,
                None => row.push((var, coef)),
            }
        }

        self.constraints.push(Constraint {
            name,
            terms: row,
            relation,
            rhs,
        });
        Ok(self.constraints.len() - 1)
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn variable_by_name(&self, name: &str) -> Option<VarId> {
        self.variables.iter().position(|v| v.name == name).map(VarId)
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Objective value of an arbitrary point, in the program's own sense.
    pub fn objective_at(&self, values: &[f64]) -> f64 {
        self.variables
            .iter()
            .zip(values)
            .map(|(v, x)| v.objective * x)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    Optimal,
    Unbounded,
    Infeasible,
    IterationLimit,
    Unknown,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::IterationLimit => "iteration limit",
            SolveStatus::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Solver output. Values and duals are only meaningful when `status` is optimal;
/// otherwise they are empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub status: SolveStatus,
    pub objective_value: f64,
    pub variable_values: Vec<f64>,
    pub dual_values: Vec<f64>,
    pub iterations: usize,
}

impl Solution {
    pub fn without_point(status: SolveStatus, iterations: usize) -> Self {
        Self {
            status,
            objective_value: f64::NAN,
            variable_values: Vec::new(),
            dual_values: Vec::new(),
            iterations,
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_variable_rejected() {
        let mut lp = LinearProgram::new("dup", Sense::Maximize);
        lp.add_variable("x", 1.0).unwrap();
        assert!(lp.add_variable("x", 2.0).is_err());
    }

    #[test]
    fn test_repeated_terms_are_summed() {
        let mut lp = LinearProgram::new("sum", Sense::Minimize);
        let x = lp.add_variable("x", 1.0).unwrap();
        lp.add_constraint("c", &[(x, 1.0), (x, 2.5)], Relation::GreaterEqual, 1.0)
            .unwrap();
        assert_eq!(lp.constraints()[0].terms.len(), 1);
        assert_eq!(lp.constraints()[0].coefficient(x), 3.5);
    }

    #[test]
    fn test_unknown_variable_rejected() {
        let mut lp = LinearProgram::new("bad", Sense::Minimize);
        lp.add_variable("x", 1.0).unwrap();
        let err = lp
            .add_constraint("c", &[(VarId(7), 1.0)], Relation::LessEqual, 1.0)
            .unwrap_err();
        assert!(err.to_string().contains("unknown variable"));
    }

    #[test]
    fn test_non_finite_rhs_rejected() {
        let mut lp = LinearProgram::new("nan", Sense::Minimize);
        let x = lp.add_variable("x", 1.0).unwrap();
        assert!(lp
            .add_constraint("c", &[(x, 1.0)], Relation::LessEqual, f64::NAN)
            .is_err());
    }

    #[test]
    fn test_objective_at() {
        let mut lp = LinearProgram::new("obj", Sense::Maximize);
        lp.add_variable("x1", 1.0).unwrap();
        lp.add_variable("x2", 3.0).unwrap();
        assert_eq!(lp.objective_at(&[6.0, 8.0]), 30.0);
    }
}
