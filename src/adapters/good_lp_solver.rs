//! Hands the model to the `good_lp` modeling API with the pure-Rust
//! clarabel solver.

use crate::config::toml_config::SolverConfig;
use crate::domain::model::{LinearProgram, Relation, Sense, Solution, SolveStatus};
use crate::domain::ports::LpSolver;
use crate::utils::error::{PrimerError, Result};
use good_lp::{
    clarabel, constraint, variable, DualValues, Expression, ProblemVariables, ResolutionError,
    Solution as _, SolutionWithDual, SolverModel, Variable,
};

#[derive(Debug, Clone, Default)]
pub struct GoodLpSolver {
    config: SolverConfig,
}

impl GoodLpSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    fn max_iterations(&self) -> Result<u32> {
        u32::try_from(self.config.max_iterations).map_err(|_| {
            PrimerError::InvalidConfigValueError {
                field: "solver.max_iterations".to_string(),
                value: self.config.max_iterations.to_string(),
                reason: "Value does not fit the solver's iteration counter".to_string(),
            }
        })
    }
}

/// Maps the backend's raw dual to the convention used across the crate:
/// the change of the objective per unit increase of the right-hand side.
fn dual_sign(sense: Sense, relation: Relation) -> f64 {
    let sense_sign = match sense {
        Sense::Maximize => 1.0,
        Sense::Minimize => -1.0,
    };
    match relation {
        Relation::GreaterEqual => -sense_sign,
        Relation::LessEqual | Relation::Equal => sense_sign,
    }
}

impl LpSolver for GoodLpSolver {
    fn name(&self) -> &'static str {
        "good_lp/clarabel"
    }

    #[tracing::instrument(skip_all, fields(model = %program.name))]
    fn solve(&self, program: &LinearProgram) -> Result<Solution> {
        let mut vars = ProblemVariables::new();
        let xs: Vec<Variable> = program
            .variables()
            .iter()
            .map(|v| vars.add(variable().min(0.0).name(v.name.clone())))
            .collect();

        let objective: Expression = program
            .variables()
            .iter()
            .zip(&xs)
            .map(|(v, &x)| v.objective * x)
            .sum();

        let unsolved = match program.sense {
            Sense::Maximize => vars.maximise(objective),
            Sense::Minimize => vars.minimise(objective),
        };
        let mut model = unsolved.using(clarabel);
        let tol = self.config.tolerance;
        model
            .settings()
            .max_iter(self.max_iterations()?)
            .tol_feas(tol)
            .tol_gap_abs(tol)
            .tol_gap_rel(tol);

        let mut references = Vec::with_capacity(program.num_constraints());
        for c in program.constraints() {
            let lhs: Expression = c
                .terms
                .iter()
                .map(|&(var, coef)| coef * xs[var.index()])
                .sum();
            let rhs = c.rhs;
            let row = match c.relation {
                Relation::LessEqual => constraint!(lhs <= rhs),
                Relation::GreaterEqual => constraint!(lhs >= rhs),
                Relation::Equal => constraint!(lhs == rhs),
            };
            references.push(model.add_constraint(row));
        }

        let mut solved = match model.solve() {
            Ok(solved) => solved,
            Err(ResolutionError::Infeasible) => {
                return Ok(Solution::without_point(SolveStatus::Infeasible, 0))
            }
            Err(ResolutionError::Unbounded) => {
                return Ok(Solution::without_point(SolveStatus::Unbounded, 0))
            }
            Err(ResolutionError::Other(reason)) if reason.contains("iterations") => {
                return Ok(Solution::without_point(
                    SolveStatus::IterationLimit,
                    self.config.max_iterations,
                ))
            }
            Err(e) => {
                return Err(PrimerError::SolverError {
                    solver: self.name().to_string(),
                    message: e.to_string(),
                })
            }
        };

        // clarabel reports a dual-infeasible (unbounded) primal as solved;
        // the status enum lives in the clarabel crate, so match on its name.
        let raw_status = format!("{:?}", solved.inner().status);
        tracing::debug!(status = %raw_status, "clarabel finished");
        if raw_status.contains("DualInfeasible") {
            return Ok(Solution::without_point(SolveStatus::Unbounded, 0));
        }
        let iterations = solved.inner().iterations as usize;

        let variable_values: Vec<f64> = xs.iter().map(|&x| solved.value(x)).collect();
        let duals = solved.compute_dual();
        let dual_values = program
            .constraints()
            .iter()
            .zip(&references)
            .map(|(c, r)| dual_sign(program.sense, c.relation) * duals.dual(r.clone()) + 0.0)
            .collect();

        Ok(Solution {
            status: SolveStatus::Optimal,
            objective_value: program.objective_at(&variable_values),
            variable_values,
            dual_values,
            iterations,
        })
    }
}
