use super::super::domain::{Department, Percent};
use super::super::gap::GapRow;
use super::super::supply::WaterfallRow;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearValue {
    pub year: i32,
    pub value: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKey {
    MacroDemand,
    MicroDemand,
    SupplyWithoutHiring,
    SupplyWithHiring,
}

impl SeriesKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MacroDemand => "Macro WFM",
            Self::MicroDemand => "Micro WFM",
            Self::SupplyWithoutHiring => "Supply (no hiring)",
            Self::SupplyWithHiring => "Supply (with hiring)",
        }
    }
}

/// A named line for a chart, in year-ascending order.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesView {
    pub key: SeriesKey,
    pub label: &'static str,
    pub points: Vec<YearValue>,
}

impl SeriesView {
    pub fn values(&self) -> Vec<i64> {
        self.points.iter().map(|point| point.value).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentRow {
    pub department: Department,
    pub label: &'static str,
    pub weight_pct: Percent,
    pub headcounts: Vec<YearValue>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct WeightsView {
    pub total_pct: Percent,
    pub over_allocated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkforcePlanSummary {
    pub years: Vec<i32>,
    pub demand: Vec<SeriesView>,
    pub departments: Vec<DepartmentRow>,
    pub weights: WeightsView,
    pub attrition: SeriesView,
    pub waterfall: Vec<WaterfallRow>,
    pub gap: Vec<GapRow>,
    pub gap_series: Vec<SeriesView>,
}
