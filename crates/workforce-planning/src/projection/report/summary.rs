use super::super::demand::{apply_department_weights, project_demand, ProjectionSeries};
use super::super::domain::{Department, ProjectionError, ProjectionParameters};
use super::super::gap::{compose_gap, GapRow};
use super::super::supply::{build_waterfall, project_attrition, WaterfallRow};
use super::super::weights::DepartmentWeights;
use super::views::{
    DepartmentRow, SeriesKey, SeriesView, WeightsView, WorkforcePlanSummary, YearValue,
};
use tracing::{debug, warn};

/// Every stage of one projection run, computed from the same parameters.
#[derive(Debug, Clone)]
pub struct WorkforcePlan {
    pub parameters: ProjectionParameters,
    pub weights: DepartmentWeights,
    pub demand: ProjectionSeries,
    pub attrition: Vec<i64>,
    pub waterfall: Vec<WaterfallRow>,
    pub gap: Vec<GapRow>,
}

impl WorkforcePlan {
    pub fn build(
        parameters: ProjectionParameters,
        weights: DepartmentWeights,
    ) -> Result<Self, ProjectionError> {
        parameters.validate_supply()?;

        if weights.is_over_allocated() {
            warn!(
                total = %weights.total(),
                "department weights exceed 100% of macro demand; micro demand will overshoot"
            );
        }

        let macro_demand = project_demand(&parameters)?;
        let weighted = apply_department_weights(&macro_demand, &weights)?;
        debug!(
            years = weighted.len(),
            final_macro = weighted.points().last().map(|point| point.macro_headcount),
            "projected demand"
        );

        let attrition = project_attrition(&parameters)?;
        let waterfall = build_waterfall(&weighted, &parameters)?;
        debug!(
            final_without_hiring = attrition.last().copied(),
            final_with_hiring = waterfall.last().map(|row| row.actual_headcount),
            "projected supply"
        );

        let demand = weighted.with_attrition(&attrition)?;
        let gap = compose_gap(&demand, &attrition, &waterfall)?;

        Ok(Self {
            parameters,
            weights,
            demand,
            attrition,
            waterfall,
            gap,
        })
    }

    pub fn summary(&self) -> WorkforcePlanSummary {
        let years = self.demand.years();

        let demand = vec![
            series(SeriesKey::MacroDemand, &years, &self.demand.macro_headcounts()),
            series(SeriesKey::MicroDemand, &years, &self.demand.micro_headcounts()),
        ];

        let departments = Department::ordered()
            .into_iter()
            .map(|department| DepartmentRow {
                department,
                label: department.label(),
                weight_pct: self.weights.weight(department),
                headcounts: self
                    .demand
                    .iter()
                    .map(|point| YearValue {
                        year: point.year,
                        value: point
                            .department_breakdown
                            .get(&department)
                            .copied()
                            .unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        let with_hiring: Vec<i64> = self.gap.iter().map(|row| row.supply_with_hiring).collect();
        let gap_series = vec![
            series(SeriesKey::SupplyWithHiring, &years, &with_hiring),
            series(SeriesKey::SupplyWithoutHiring, &years, &self.attrition),
            series(SeriesKey::MacroDemand, &years, &self.demand.macro_headcounts()),
            series(SeriesKey::MicroDemand, &years, &self.demand.micro_headcounts()),
        ];

        WorkforcePlanSummary {
            attrition: series(SeriesKey::SupplyWithoutHiring, &years, &self.attrition),
            years,
            demand,
            departments,
            weights: WeightsView {
                total_pct: self.weights.total(),
                over_allocated: self.weights.is_over_allocated(),
            },
            waterfall: self.waterfall.clone(),
            gap: self.gap.clone(),
            gap_series,
        }
    }
}

fn series(key: SeriesKey, years: &[i32], values: &[i64]) -> SeriesView {
    SeriesView {
        key,
        label: key.label(),
        points: years
            .iter()
            .zip(values)
            .map(|(&year, &value)| YearValue { year, value })
            .collect(),
    }
}
