use crate::adapters::GoodLpSolver;
use crate::config::toml_config::SolverConfig;
use crate::core::report::SolveReport;
use crate::core::LpSolver;
use crate::domain::model::LinearProgram;
use crate::utils::error::{PrimerError, Result};
use std::time::Instant;

pub struct Engine<S: LpSolver> {
    solver: S,
}

impl<S: LpSolver> Engine<S> {
    pub fn new(solver: S) -> Self {
        Self { solver }
    }

    /// Checks the program, hands it to the backend once and builds the report.
    pub fn run(&self, program: &LinearProgram) -> Result<SolveReport> {
        tracing::info!(
            model = %program.name,
            solver = self.solver.name(),
            variables = program.num_variables(),
            constraints = program.num_constraints(),
            "solving"
        );

        if program.num_variables() == 0 {
            return Err(PrimerError::model(format!(
                "model '{}' has no variables",
                program.name
            )));
        }

        let start = Instant::now();
        let solution = self.solver.solve(program)?;
        let elapsed = start.elapsed();

        if solution.is_optimal()
            && (solution.variable_values.len() != program.num_variables()
                || solution.dual_values.len() != program.num_constraints())
        {
            return Err(PrimerError::SolverError {
                solver: self.solver.name().to_string(),
                message: "solution dimensions do not match the model".to_string(),
            });
        }

        tracing::info!(
            status = %solution.status,
            iterations = solution.iterations,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "solver finished"
        );

        Ok(SolveReport::new(
            program,
            self.solver.name(),
            &solution,
            elapsed,
        ))
    }
}

/// Runs `program` on the external solver configured by `config`.
pub fn solve_with_config(config: &SolverConfig, program: &LinearProgram) -> Result<SolveReport> {
    Engine::new(GoodLpSolver::new(config.clone())).run(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::example::example_program;
    use crate::domain::model::{Sense, Solution, SolveStatus};

    /// Answers every program with the same solution.
    struct FixedSolver(Solution);

    impl LpSolver for FixedSolver {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn solve(&self, _program: &LinearProgram) -> Result<Solution> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSolver;

    impl LpSolver for BrokenSolver {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn solve(&self, _program: &LinearProgram) -> Result<Solution> {
            Ok(Solution {
                status: SolveStatus::Optimal,
                objective_value: 0.0,
                variable_values: vec![],
                dual_values: vec![],
                iterations: 0,
            })
        }
    }

    #[test]
    fn test_engine_reports_example_optimum() {
        let report = solve_with_config(&SolverConfig::default(), &example_program().unwrap())
            .unwrap();
        assert_eq!(report.status, SolveStatus::Optimal);
        assert_eq!(report.solver, "good_lp/clarabel");
        assert!((report.objective_value.unwrap() - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_solve_with_config_passes_iteration_limit() {
        let config = SolverConfig {
            max_iterations: 1,
            ..SolverConfig::default()
        };
        let report = solve_with_config(&config, &example_program().unwrap()).unwrap();
        assert_eq!(report.status, SolveStatus::IterationLimit);
    }

    #[test]
    fn test_engine_passes_status_through() {
        let engine = Engine::new(FixedSolver(Solution::without_point(
            SolveStatus::Infeasible,
            3,
        )));
        let report = engine.run(&example_program().unwrap()).unwrap();
        assert_eq!(report.status, SolveStatus::Infeasible);
        assert_eq!(report.solver, "fixed");
        assert!(report.objective_value.is_none());
    }

    #[test]
    fn test_engine_rejects_empty_model() {
        let engine = Engine::new(BrokenSolver);
        let empty = LinearProgram::new("empty", Sense::Maximize);
        assert!(engine.run(&empty).is_err());
    }

    #[test]
    fn test_engine_checks_solution_shape() {
        let engine = Engine::new(BrokenSolver);
        let err = engine.run(&example_program().unwrap()).unwrap_err();
        assert!(matches!(err, PrimerError::SolverError { .. }));
    }
}
