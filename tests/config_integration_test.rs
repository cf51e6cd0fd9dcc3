use lp_primer::config::model_file::load_program;
use lp_primer::utils::validation::Validate;
use lp_primer::{
    render, run_demo, solve_with_config, AppConfig, FileSink, OutputFormat, PrimerError,
    ReportSink, SolveStatus,
};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_config_drives_demo_and_solver() {
    let mut config_file = NamedTempFile::new().unwrap();
    config_file
        .write_all(
            br#"
zipcode = 1010

[solver]
max_iterations = 100
tolerance = 1e-10
"#,
        )
        .unwrap();

    let config = AppConfig::from_file(config_file.path()).unwrap();
    config.validate().unwrap();

    let demo = run_demo(3, Some(1), config.zipcode);
    assert_eq!(demo.greeting, "Austria");
    assert_eq!(demo.value, 10);
    assert_eq!(config.solver.max_iterations, 100);
    assert_eq!(config.solver.tolerance, 1e-10);
}

#[test]
fn test_model_file_to_report_file() {
    let dir = TempDir::new().unwrap();
    let model_path = dir.path().join("example.toml");
    std::fs::write(
        &model_path,
        r#"
name = "from-file"
sense = "maximize"

[[variables]]
name = "x1"
objective = 1.0

[[variables]]
name = "x2"
objective = 3.0

[[constraints]]
name = "c0"
relation = "<="
rhs = 14.0
coefficients = { x1 = 1.0, x2 = 1.0 }

[[constraints]]
name = "c1"
relation = "<="
rhs = 12.0
coefficients = { x1 = -2.0, x2 = 3.0 }

[[constraints]]
name = "c2"
relation = "<="
rhs = 12.0
coefficients = { x1 = 2.0, x2 = -1.0 }
"#,
    )
    .unwrap();

    let program = load_program(&model_path).unwrap();
    let config = AppConfig::default();
    let report = solve_with_config(&config.solver, &program).unwrap();
    assert_eq!(report.status, SolveStatus::Optimal);
    assert_eq!(report.model, "from-file");

    let out_path = dir.path().join("reports/result.json");
    let body = render(&report, OutputFormat::Json).unwrap();
    FileSink::new(&out_path).write_report(&body).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(written["model"], "from-file");
    assert_eq!(written["solver"], "good_lp/clarabel");
    let objective = written["objective_value"].as_f64().unwrap();
    assert!((objective - 30.0).abs() < 1e-6);
}

#[test]
fn test_missing_files_are_io_errors() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = AppConfig::from_file(&missing).unwrap_err();
    assert!(matches!(err, PrimerError::IoError(_)));

    let err = load_program(&missing).unwrap_err();
    assert!(matches!(err, PrimerError::IoError(_)));
}

#[test]
fn test_invalid_payroll_config_rejected() {
    let config = AppConfig::from_toml_str(
        r#"
[payroll.presets.broken]
health_rate = 2.0
"#,
    )
    .unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_shipped_files_match_builtins() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));

    let program = load_program(root.join("models/example.toml")).unwrap();
    assert_eq!(program, lp_primer::example_program().unwrap());

    let config = AppConfig::from_file(root.join("lp-primer.example.toml")).unwrap();
    config.validate().unwrap();
    assert_eq!(config.payroll.tax, lp_primer::domain::payroll::TaxConfig::default());
    assert_eq!(
        config.payroll.preset("raa").unwrap(),
        lp_primer::domain::payroll::ContributionConfig::raa()
    );
}
