use crate::domain::model::{LinearProgram, Solution};
use crate::utils::error::Result;

/// A backend that can solve a [`LinearProgram`].
///
/// Termination states such as infeasible or unbounded are reported through
/// [`Solution::status`]; `Err` is for backend failures only.
pub trait LpSolver {
    fn name(&self) -> &'static str;
    fn solve(&self, program: &LinearProgram) -> Result<Solution>;
}

/// Destination for a rendered report.
pub trait ReportSink {
    fn write_report(&self, body: &str) -> Result<()>;
}
