pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command, PayrollCommand};

pub use adapters::{FileSink, GoodLpSolver, StdoutSink};
pub use config::toml_config::{AppConfig, SolverConfig};
pub use crate::core::{
    affine::{affinect, greeting, run_demo, DemoReport, ZIPCODE},
    engine::{solve_with_config, Engine},
    example::example_program,
    report::{render, OutputFormat, Render, ScriptReport, SolveReport},
};
pub use domain::model::{LinearProgram, Relation, Sense, Solution, SolveStatus, VarId};
pub use domain::ports::{LpSolver, ReportSink};
pub use utils::error::{PrimerError, Result};
