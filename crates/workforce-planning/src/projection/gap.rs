use super::demand::ProjectionSeries;
use super::domain::ProjectionError;
use super::supply::WaterfallRow;
use serde::Serialize;
use std::io::Write;

/// Demand and supply for one year, aligned for charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GapRow {
    pub year: i32,
    pub supply_without_hiring: i64,
    pub supply_with_hiring: i64,
    pub macro_demand: i64,
    pub micro_demand: i64,
}

/// Joins the demand series, the attrition-only series and the waterfall by
/// year index. Inputs of different lengths are rejected, never truncated.
pub fn compose_gap(
    demand: &ProjectionSeries,
    attrition: &[i64],
    waterfall: &[WaterfallRow],
) -> Result<Vec<GapRow>, ProjectionError> {
    let expected = demand.len();
    if attrition.len() != expected {
        return Err(ProjectionError::LengthMismatch {
            series: "attrition",
            expected,
            found: attrition.len(),
        });
    }
    if waterfall.len() != expected {
        return Err(ProjectionError::LengthMismatch {
            series: "waterfall",
            expected,
            found: waterfall.len(),
        });
    }

    Ok(demand
        .iter()
        .zip(attrition)
        .zip(waterfall)
        .map(|((point, &without_hiring), row)| GapRow {
            year: point.year,
            supply_without_hiring: without_hiring,
            supply_with_hiring: row.actual_headcount,
            macro_demand: point.macro_headcount,
            micro_demand: point.micro_headcount,
        })
        .collect())
}

/// Writes the gap table as CSV with a header row.
pub fn write_gap_csv<W: Write>(rows: &[GapRow], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        csv_writer.write_record([
            "year",
            "supply_without_hiring",
            "supply_with_hiring",
            "macro_demand",
            "micro_demand",
        ])?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
