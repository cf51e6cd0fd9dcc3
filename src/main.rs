use anyhow::Context;
use clap::Parser;
use lp_primer::config::model_file;
use lp_primer::core::payroll;
use lp_primer::core::report::render;
use lp_primer::utils::error::ErrorSeverity;
use lp_primer::utils::{logger, validation::Validate};
use lp_primer::{
    example_program, run_demo, solve_with_config, AppConfig, CliConfig, Command, FileSink, OutputFormat,
    PayrollCommand, PrimerError, ReportSink, ScriptReport, StdoutSink,
};

fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting lp-primer");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli) {
        let exit_code = match e.downcast_ref::<PrimerError>() {
            Some(err) => {
                tracing::error!(
                    "❌ {:#} (Category: {:?}, Severity: {:?})",
                    e,
                    err.category(),
                    err.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", err.recovery_suggestion());
                eprintln!("❌ {}", err.user_friendly_message());
                eprintln!("💡 Suggestion: {}", err.recovery_suggestion());

                match err.severity() {
                    ErrorSeverity::Low => 0,
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::High => 1,
                    ErrorSeverity::Critical => 3,
                }
            }
            None => {
                tracing::error!("❌ {:#}", e);
                eprintln!("❌ {:#}", e);
                1
            }
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run(cli: &CliConfig) -> anyhow::Result<()> {
    cli.validate()?;

    let mut config = cli.load_app_config().context("loading config file")?;
    config.validate()?;

    let body = match &cli.command {
        None => {
            let demo = run_demo(2, None, config.zipcode);
            let program = example_program()?;
            let lp = solve_with_config(&config.solver, &program)?;
            render(&ScriptReport { demo, lp }, cli.format)?
        }
        Some(Command::Demo { x, b, zipcode }) => {
            let report = run_demo(*x, *b, zipcode.unwrap_or(config.zipcode));
            render(&report, cli.format)?
        }
        Some(Command::Lp {
            model,
            max_iterations,
        }) => {
            if let Some(n) = max_iterations {
                config.solver.max_iterations = *n;
                config.solver.validate()?;
            }
            let program = match model {
                Some(path) => model_file::load_program(path)
                    .with_context(|| format!("loading model {}", path.display()))?,
                None => example_program()?,
            };
            let report = solve_with_config(&config.solver, &program)?;
            render(&report, cli.format)?
        }
        Some(Command::Payroll { command }) => payroll_report(&config, command, cli.format)?,
    };

    match &cli.output {
        Some(path) => FileSink::new(path).write_report(&body)?,
        None => StdoutSink.write_report(&body)?,
    }

    tracing::info!("✅ lp-primer finished");
    Ok(())
}

fn payroll_report(
    config: &AppConfig,
    command: &PayrollCommand,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let tax = &config.payroll.tax;
    let body = match command {
        PayrollCommand::Gross { amount, preset } => {
            let contributions = config.payroll.preset(preset)?;
            render(&payroll::gross_to_net(*amount, &contributions, tax), format)?
        }
        PayrollCommand::Net {
            target,
            preset,
            guess,
        } => {
            let contributions = config.payroll.preset(preset)?;
            render(
                &payroll::net_to_gross(*target, &contributions, tax, *guess),
                format,
            )?
        }
        PayrollCommand::Example => {
            let raa = config.payroll.preset("raa")?;
            let uni = config.payroll.preset("uni")?;
            render(&payroll::example_run(&raa, &uni, tax), format)?
        }
    };
    Ok(body)
}
