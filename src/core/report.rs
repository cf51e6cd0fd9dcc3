use crate::core::affine::DemoReport;
use crate::domain::model::{LinearProgram, Solution, SolveStatus};
use crate::domain::payroll::{GrossEstimate, NetResult};
use crate::utils::error::Result;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvRow {
    pub section: String,
    pub name: String,
    pub value: String,
}

impl CsvRow {
    fn new(section: &str, name: &str, value: impl ToString) -> Self {
        Self {
            section: section.to_string(),
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Something that can be printed as plain text or flattened into CSV rows.
/// JSON comes from `Serialize`.
pub trait Render: Serialize {
    fn to_text(&self) -> String;
    fn csv_rows(&self) -> Vec<CsvRow>;
}

pub fn render<R: Render>(report: &R, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report.to_text()),
        OutputFormat::Json => {
            let mut body = serde_json::to_string_pretty(report)?;
            body.push('\n');
            Ok(body)
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for row in report.csv_rows() {
                writer.serialize(row)?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

/// Magnitudes below this are solver noise and print as `0`.
const ZERO_FLOOR: f64 = 1e-9;
const SCIENTIFIC_BELOW: f64 = 1e-6;

/// Six decimals, trailing zeros trimmed, no negative zero. Small non-zero
/// magnitudes switch to scientific notation so they do not read as `0`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs();
    if magnitude < ZERO_FLOOR {
        return "0".to_string();
    }
    if magnitude < SCIENTIFIC_BELOW {
        let sci = format!("{:.3e}", value);
        return match sci.split_once('e') {
            Some((mantissa, exponent)) => {
                let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
                format!("{}e{}", mantissa, exponent)
            }
            None => sci,
        };
    }
    let fixed = format!("{:.6}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn cents(value: f64) -> String {
    format!("{:.2}", value)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedValue {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveReport {
    pub model: String,
    pub solver: String,
    pub status: SolveStatus,
    pub objective_value: Option<f64>,
    pub variables: Vec<NamedValue>,
    pub duals: Vec<NamedValue>,
    pub iterations: usize,
    pub elapsed_ms: f64,
}

impl SolveReport {
    pub fn new(
        program: &LinearProgram,
        solver: &str,
        solution: &Solution,
        elapsed: Duration,
    ) -> Self {
        let optimal = solution.is_optimal();
        let variables = if optimal {
            program
                .variables()
                .iter()
                .zip(&solution.variable_values)
                .map(|(v, &value)| NamedValue {
                    name: v.name.clone(),
                    value,
                })
                .collect()
        } else {
            Vec::new()
        };
        let duals = if optimal {
            program
                .constraints()
                .iter()
                .zip(&solution.dual_values)
                .map(|(c, &value)| NamedValue {
                    name: c.name.clone(),
                    value,
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            model: program.name.clone(),
            solver: solver.to_string(),
            status: solution.status,
            objective_value: optimal.then_some(solution.objective_value),
            variables,
            duals,
            iterations: solution.iterations,
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        }
    }

    pub fn value_of(&self, name: &str) -> Option<f64> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value)
    }

    pub fn dual_of(&self, name: &str) -> Option<f64> {
        self.duals.iter().find(|v| v.name == name).map(|v| v.value)
    }
}

impl Render for SolveReport {
    fn to_text(&self) -> String {
        let mut out = String::new();
        match self.status {
            SolveStatus::Optimal => {
                let objective = self.objective_value.unwrap_or(f64::NAN);
                out.push_str(&format!("Optimal objective: {}\n", format_number(objective)));
                for v in &self.variables {
                    out.push_str(&format!("{} = {}\n", v.name, format_number(v.value)));
                }
                for d in &self.duals {
                    out.push_str(&format!("{} dual = {}\n", d.name, format_number(d.value)));
                }
            }
            SolveStatus::Unbounded => out.push_str("problem unbounded\n"),
            SolveStatus::Infeasible => out.push_str("problem infeasible\n"),
            other => {
                tracing::warn!(status = %other, model = %self.model, "solver stopped without a reportable status");
            }
        }
        out
    }

    fn csv_rows(&self) -> Vec<CsvRow> {
        let mut rows = vec![CsvRow::new("status", &self.model, self.status)];
        if let Some(objective) = self.objective_value {
            rows.push(CsvRow::new("objective", &self.model, format_number(objective)));
        }
        rows.extend(
            self.variables
                .iter()
                .map(|v| CsvRow::new("variable", &v.name, format_number(v.value))),
        );
        rows.extend(
            self.duals
                .iter()
                .map(|d| CsvRow::new("dual", &d.name, format_number(d.value))),
        );
        rows
    }
}

impl Render for DemoReport {
    fn to_text(&self) -> String {
        format!("{}\n{}\n", self.greeting, self.value)
    }

    fn csv_rows(&self) -> Vec<CsvRow> {
        vec![
            CsvRow::new("demo", "zipcode", self.zipcode),
            CsvRow::new("demo", "greeting", self.greeting),
            CsvRow::new("demo", "x", self.x),
            CsvRow::new("demo", "b", self.b),
            CsvRow::new("demo", "affinect", self.value),
        ]
    }
}

/// What a plain run prints: the demo followed by the LP example.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptReport {
    pub demo: DemoReport,
    pub lp: SolveReport,
}

impl Render for ScriptReport {
    fn to_text(&self) -> String {
        let mut out = self.demo.to_text();
        out.push_str(&self.lp.to_text());
        out
    }

    fn csv_rows(&self) -> Vec<CsvRow> {
        let mut rows = self.demo.csv_rows();
        rows.extend(self.lp.csv_rows());
        rows
    }
}

impl Render for NetResult {
    fn to_text(&self) -> String {
        let s = &self.social;
        let mut out = String::new();
        out.push_str(&format!("gross: {}\n", cents(self.gross)));
        out.push_str(&format!("  pension: {}\n", cents(s.pension)));
        out.push_str(&format!("  unemployment: {}\n", cents(s.unemployment)));
        out.push_str(&format!("  health: {}\n", cents(s.health)));
        out.push_str(&format!("  chamber levy: {}\n", cents(s.chamber_levy)));
        out.push_str(&format!("  housing: {}\n", cents(s.housing)));
        out.push_str(&format!("  social total: {}\n", cents(s.total)));
        out.push_str(&format!("taxable income: {}\n", cents(self.taxable_income)));
        out.push_str(&format!("income tax: {}\n", cents(self.income_tax)));
        out.push_str(&format!("net: {}\n", cents(self.net)));
        out
    }

    fn csv_rows(&self) -> Vec<CsvRow> {
        let s = &self.social;
        vec![
            CsvRow::new("payroll", "gross", cents(self.gross)),
            CsvRow::new("social", "pension", cents(s.pension)),
            CsvRow::new("social", "unemployment", cents(s.unemployment)),
            CsvRow::new("social", "health", cents(s.health)),
            CsvRow::new("social", "chamber_levy", cents(s.chamber_levy)),
            CsvRow::new("social", "housing", cents(s.housing)),
            CsvRow::new("social", "total", cents(s.total)),
            CsvRow::new("payroll", "taxable_income", cents(self.taxable_income)),
            CsvRow::new("payroll", "income_tax", cents(self.income_tax)),
            CsvRow::new("payroll", "net", cents(self.net)),
        ]
    }
}

impl Render for GrossEstimate {
    fn to_text(&self) -> String {
        let mut out = format!(
            "estimated gross: {}\nnet difference: {}\n",
            cents(self.estimated_gross),
            cents(self.net_diff)
        );
        if !self.converged {
            out.push_str("search did not reach the target within one cent\n");
        }
        out.push_str(&self.result.to_text());
        out
    }

    fn csv_rows(&self) -> Vec<CsvRow> {
        let mut rows = vec![
            CsvRow::new("estimate", "estimated_gross", cents(self.estimated_gross)),
            CsvRow::new("estimate", "net_diff", cents(self.net_diff)),
            CsvRow::new("estimate", "converged", self.converged),
        ];
        rows.extend(self.result.csv_rows());
        rows
    }
}

/// Sample run over two employment presets plus their combined net.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollExampleReport {
    pub entries: Vec<(String, NetResult)>,
    pub combined_net: f64,
}

impl Render for PayrollExampleReport {
    fn to_text(&self) -> String {
        let mut out = String::new();
        for (preset, result) in &self.entries {
            out.push_str(&format!("[{}]\n", preset));
            out.push_str(&result.to_text());
            out.push('\n');
        }
        out.push_str(&format!("combined net: {}\n", cents(self.combined_net)));
        out
    }

    fn csv_rows(&self) -> Vec<CsvRow> {
        let mut rows = Vec::new();
        for (preset, result) in &self.entries {
            rows.extend(result.csv_rows().into_iter().map(|mut row| {
                row.section = format!("{}.{}", preset, row.section);
                row
            }));
        }
        rows.push(CsvRow::new("payroll", "combined_net", cents(self.combined_net)));
        rows
    }
}
