pub mod model_file;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, PayrollCommand};

#[cfg(feature = "cli")]
mod cli {
    use super::toml_config::AppConfig;
    use crate::core::report::OutputFormat;
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_path, validate_positive_number, Validate};
    use clap::{Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "lp-primer")]
    #[command(about = "Arithmetic demo, a small LP example and a payroll calculator")]
    pub struct CliConfig {
        #[arg(long, help = "TOML config file")]
        pub config: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "text")]
        pub format: OutputFormat,

        #[arg(long, help = "Write the report to this file instead of stdout")]
        pub output: Option<PathBuf>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub log_json: bool,

        #[command(subcommand)]
        pub command: Option<Command>,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Print the greeting and x² + b
        Demo {
            #[arg(long, default_value = "2", allow_negative_numbers = true)]
            x: i64,
            #[arg(long, allow_negative_numbers = true)]
            b: Option<i64>,
            #[arg(long)]
            zipcode: Option<u32>,
        },
        /// Solve the bundled LP example or a model file
        Lp {
            #[arg(long, help = "TOML model file; the bundled example when omitted")]
            model: Option<PathBuf>,
            #[arg(long)]
            max_iterations: Option<usize>,
        },
        /// Gross/net salary calculations
        Payroll {
            #[command(subcommand)]
            command: PayrollCommand,
        },
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum PayrollCommand {
        /// Net salary for a monthly gross amount
        Gross {
            amount: f64,
            #[arg(long, default_value = "raa")]
            preset: String,
        },
        /// Gross salary needed for a monthly net amount
        Net {
            target: f64,
            #[arg(long, default_value = "raa")]
            preset: String,
            #[arg(long)]
            guess: Option<f64>,
        },
        /// Sample run: RAA at 4500, UNI at 940.98 and the combined net
        Example,
    }

    impl CliConfig {
        pub fn load_app_config(&self) -> Result<AppConfig> {
            match &self.config {
                Some(path) => AppConfig::from_file(path),
                None => Ok(AppConfig::default()),
            }
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(path) = &self.output {
                validate_path("output", &path.to_string_lossy())?;
            }
            if let Some(Command::Lp {
                max_iterations: Some(n),
                ..
            }) = &self.command
            {
                validate_positive_number("max_iterations", *n, 1)?;
            }
            Ok(())
        }
    }

}
