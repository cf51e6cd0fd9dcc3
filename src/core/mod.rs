pub mod affine;
pub mod engine;
pub mod example;
pub mod payroll;
pub mod report;

pub use crate::domain::model::{LinearProgram, Solution, SolveStatus};
pub use crate::domain::ports::{LpSolver, ReportSink};
pub use crate::utils::error::Result;
