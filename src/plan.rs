use crate::infra::{load_weights, parse_percent};
use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use workforce_planning::error::AppError;
use workforce_planning::projection::report::views::{SeriesView, WorkforcePlanSummary};
use workforce_planning::projection::{
    write_gap_csv, DepartmentWeights, Percent, ProjectionParameters, WaterfallRow, WorkforcePlan,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Year-columned tables for the terminal
    #[default]
    Table,
    /// The full plan summary as JSON
    Json,
    /// The gap table as CSV
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct ProjectArgs {
    /// Current headcount
    #[arg(long, default_value_t = 210)]
    pub(crate) starting_headcount: i64,
    /// Annual growth multiplier in percent (negative for planned contraction)
    #[arg(long, default_value = "12", value_parser = parse_percent, allow_hyphen_values = true)]
    pub(crate) growth_rate: Percent,
    /// Annual attrition in percent
    #[arg(long, default_value = "8", value_parser = parse_percent)]
    pub(crate) attrition_rate: Percent,
    /// Number of years to project, including the current one
    #[arg(long, default_value_t = 5)]
    pub(crate) horizon_years: u32,
    /// Calendar year of the first column (defaults to the current year)
    #[arg(long)]
    pub(crate) start_year: Option<i32>,
    /// CSV of `department,weight_pct` rows replacing the standard weights
    #[arg(long)]
    pub(crate) weights_csv: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DepartmentsArgs {
    /// CSV of `department,weight_pct` rows replacing the standard weights
    #[arg(long)]
    pub(crate) weights_csv: Option<PathBuf>,
}

pub(crate) fn run_projection(args: ProjectArgs) -> Result<(), AppError> {
    let ProjectArgs {
        starting_headcount,
        growth_rate,
        attrition_rate,
        horizon_years,
        start_year,
        weights_csv,
        format,
    } = args;

    let parameters = ProjectionParameters::new(
        starting_headcount,
        growth_rate,
        attrition_rate,
        horizon_years,
        start_year.unwrap_or_else(ProjectionParameters::current_year),
    );
    let weights = load_weights(weights_csv.as_deref())?;
    let plan = WorkforcePlan::build(parameters, weights)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => render_plan(&plan, &mut out)?,
        OutputFormat::Json => {
            let body = serde_json::to_string_pretty(&plan.summary())
                .map_err(|err| AppError::Io(err.into()))?;
            writeln!(out, "{body}")?;
        }
        OutputFormat::Csv => write_gap_csv(&plan.gap, &mut out)?,
    }

    Ok(())
}

pub(crate) fn run_departments(args: DepartmentsArgs) -> Result<(), AppError> {
    let weights = load_weights(args.weights_csv.as_deref())?;
    let stdout = std::io::stdout();
    render_weights(&weights, &mut stdout.lock())?;
    Ok(())
}

pub(crate) fn render_weights<W: Write>(
    weights: &DepartmentWeights,
    out: &mut W,
) -> std::io::Result<()> {
    writeln!(out, "Department weights")?;
    for entry in weights.entries() {
        writeln!(
            out,
            "- {:<10} {:>7}",
            entry.department.label(),
            entry.weight_pct.to_string()
        )?;
    }
    writeln!(out, "Total: {}", weights.total())?;
    if weights.is_over_allocated() {
        writeln!(
            out,
            "Note: weights exceed 100%, so micro demand can overshoot macro demand"
        )?;
    }
    Ok(())
}

pub(crate) fn render_plan<W: Write>(plan: &WorkforcePlan, out: &mut W) -> std::io::Result<()> {
    let params = &plan.parameters;
    let summary = plan.summary();

    writeln!(out, "Strategic workforce plan")?;
    writeln!(
        out,
        "Starting headcount {} | growth {} | attrition {} | {} year horizon",
        params.starting_headcount,
        params.annual_growth_rate,
        params.annual_attrition_rate,
        params.horizon_years
    )?;

    writeln!(out, "\nWorkforce demand")?;
    write_header(out, &summary.years)?;
    for series in &summary.demand {
        write_series(out, series)?;
    }

    writeln!(out, "\nDepartment breakdown")?;
    write_header(out, &summary.years)?;
    for row in &summary.departments {
        let values: Vec<i64> = row.headcounts.iter().map(|point| point.value).collect();
        write_row(out, row.label, &values)?;
    }
    if summary.weights.over_allocated {
        writeln!(
            out,
            "Note: department weights total {}, above 100% of macro demand",
            summary.weights.total_pct
        )?;
    }

    writeln!(out, "\nWorkforce supply (attrition only)")?;
    write_header(out, &summary.years)?;
    write_series(out, &summary.attrition)?;

    writeln!(out, "\nGap analysis waterfall")?;
    write_waterfall(out, &summary)?;

    writeln!(out, "\nGap analysis")?;
    write_header(out, &summary.years)?;
    for series in &summary.gap_series {
        write_series(out, series)?;
    }

    Ok(())
}

const LABEL_WIDTH: usize = 22;
const CELL_WIDTH: usize = 8;

fn write_header<W: Write>(out: &mut W, years: &[i32]) -> std::io::Result<()> {
    write!(out, "{:<LABEL_WIDTH$}", "")?;
    for year in years {
        write!(out, "{year:>CELL_WIDTH$}")?;
    }
    writeln!(out)
}

fn write_row<W: Write>(out: &mut W, label: &str, values: &[i64]) -> std::io::Result<()> {
    write!(out, "{label:<LABEL_WIDTH$}")?;
    for value in values {
        write!(out, "{value:>CELL_WIDTH$}")?;
    }
    writeln!(out)
}

fn write_series<W: Write>(out: &mut W, series: &SeriesView) -> std::io::Result<()> {
    write_row(out, series.label, &series.values())
}

fn write_waterfall<W: Write>(out: &mut W, summary: &WorkforcePlanSummary) -> std::io::Result<()> {
    let rows = &summary.waterfall;
    write_header(out, &summary.years)?;
    write_row(out, "Planned", &column(rows, |row| row.planned_headcount))?;
    write_row(out, "Forecasted growth", &column(rows, |row| row.growth_delta))?;
    write_row(out, "Forecasted attrition", &column(rows, |row| row.forecasted_attrition))?;
    write_row(out, "Actual", &column(rows, |row| row.actual_headcount))
}

fn column(rows: &[WaterfallRow], pick: fn(&WaterfallRow) -> i64) -> Vec<i64> {
    rows.iter().map(pick).collect()
}
