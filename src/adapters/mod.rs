// Adapters layer: concrete implementations for external systems (report destinations, external solvers).

pub mod good_lp_solver;
pub mod sink;

pub use good_lp_solver::GoodLpSolver;
pub use sink::{FileSink, StdoutSink};
