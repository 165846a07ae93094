use super::demand::ProjectionSeries;
use super::domain::{scale_half_up, ProjectionError, ProjectionParameters};
use serde::Serialize;

/// Planned, grown, attrited and actual headcount for a single year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaterfallRow {
    pub year: i32,
    pub planned_headcount: i64,
    pub forecasted_growth: i64,
    pub growth_delta: i64,
    /// Zero or negative.
    pub forecasted_attrition: i64,
    pub actual_headcount: i64,
}

/// Supply without hiring: the starting headcount compounded down by attrition.
pub fn project_attrition(params: &ProjectionParameters) -> Result<Vec<i64>, ProjectionError> {
    params.validate_supply()?;

    let retention = 10_000 - params.annual_attrition_rate.basis_points();
    let horizon = params.horizon_years as usize;
    let mut series = Vec::with_capacity(horizon);
    let mut headcount = params.starting_headcount;
    series.push(headcount);

    for index in 1..horizon {
        headcount = scale_half_up(headcount, retention)
            .ok_or(ProjectionError::HeadcountOverflow { index })?;
        series.push(headcount);
    }

    Ok(series)
}

/// Supply with hiring. Attrition is a one-year effect on each year's grown
/// headcount and does not compound, unlike [`project_attrition`].
///
/// `demand` must be the projection of `params`: one point per horizon year,
/// starting at `starting_headcount`.
pub fn build_waterfall(
    demand: &ProjectionSeries,
    params: &ProjectionParameters,
) -> Result<Vec<WaterfallRow>, ProjectionError> {
    params.validate_supply()?;

    let horizon = params.horizon_years as usize;
    if demand.len() != horizon {
        return Err(ProjectionError::LengthMismatch {
            series: "demand",
            expected: horizon,
            found: demand.len(),
        });
    }
    if let Some(first) = demand.points().first() {
        if first.macro_headcount != params.starting_headcount {
            return Err(ProjectionError::invalid(
                "starting_headcount",
                format!(
                    "demand starts at {} but the parameters start at {}",
                    first.macro_headcount, params.starting_headcount
                ),
            ));
        }
    }

    let attrition_rate = params.annual_attrition_rate.basis_points();
    let planned = params.starting_headcount;

    demand
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let growth = point.macro_headcount;
            let attrited = scale_half_up(growth, attrition_rate)
                .ok_or(ProjectionError::HeadcountOverflow { index })?;
            let growth_delta = growth
                .checked_sub(planned)
                .ok_or(ProjectionError::HeadcountOverflow { index })?;

            Ok(WaterfallRow {
                year: point.year,
                planned_headcount: planned,
                forecasted_growth: growth,
                growth_delta,
                forecasted_attrition: -attrited,
                actual_headcount: growth - attrited,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::demand::project_demand;
    use crate::projection::domain::Percent;

    fn params(start: i64, growth: f64, attrition: f64, horizon: u32) -> ProjectionParameters {
        ProjectionParameters::new(
            start,
            Percent::from_percent(growth).expect("growth"),
            Percent::from_percent(attrition).expect("attrition"),
            horizon,
            2025,
        )
    }

    #[test]
    fn case_study_attrition_compounds() {
        let series = project_attrition(&params(210, 12.0, 8.0, 5)).expect("attrition");
        assert_eq!(series, vec![210, 193, 178, 164, 151]);
    }

    #[test]
    fn zero_attrition_holds_headcount_flat() {
        let series = project_attrition(&params(64, 12.0, 0.0, 4)).expect("attrition");
        assert_eq!(series, vec![64; 4]);
    }

    #[test]
    fn full_attrition_empties_the_workforce() {
        let series = project_attrition(&params(50, 0.0, 100.0, 3)).expect("attrition");
        assert_eq!(series, vec![50, 0, 0]);
    }

    #[test]
    fn attrition_rate_bounds_are_enforced() {
        for rate in [-0.5, 100.01] {
            let error = project_attrition(&params(210, 12.0, rate, 5)).expect_err("rejected");
            assert!(matches!(
                error,
                ProjectionError::InvalidParameter {
                    field: "annual_attrition_rate",
                    ..
                }
            ));
        }
    }

    #[test]
    fn case_study_waterfall_rows() {
        let params = params(210, 12.0, 8.0, 5);
        let demand = project_demand(&params).expect("demand");
        let rows = build_waterfall(&demand, &params).expect("waterfall");

        assert_eq!(
            rows[0],
            WaterfallRow {
                year: 2025,
                planned_headcount: 210,
                forecasted_growth: 210,
                growth_delta: 0,
                forecasted_attrition: -17,
                actual_headcount: 193,
            }
        );

        let actual: Vec<i64> = rows.iter().map(|row| row.actual_headcount).collect();
        assert_eq!(actual, vec![193, 216, 242, 271, 304]);
        let deltas: Vec<i64> = rows.iter().map(|row| row.growth_delta).collect();
        assert_eq!(deltas, vec![0, 25, 53, 85, 120]);
    }

    #[test]
    fn waterfall_rejects_demand_longer_than_horizon() {
        let demand = project_demand(&params(210, 12.0, 8.0, 5)).expect("demand");
        assert_eq!(
            build_waterfall(&demand, &params(210, 12.0, 8.0, 3)),
            Err(ProjectionError::LengthMismatch {
                series: "demand",
                expected: 3,
                found: 5,
            })
        );
    }

    #[test]
    fn waterfall_rejects_demand_from_another_start() {
        let demand = project_demand(&params(300, 12.0, 8.0, 5)).expect("demand");
        let error = build_waterfall(&demand, &params(210, 12.0, 8.0, 5)).expect_err("mismatch");
        assert!(matches!(
            error,
            ProjectionError::InvalidParameter {
                field: "starting_headcount",
                ..
            }
        ));
    }

    #[test]
    fn waterfall_never_exceeds_growth() {
        let params = params(987, -4.0, 13.5, 8);
        let demand = project_demand(&params).expect("demand");
        for row in build_waterfall(&demand, &params).expect("waterfall") {
            assert!(row.forecasted_attrition <= 0);
            assert!(row.actual_headcount <= row.forecasted_growth);
            assert_eq!(
                row.actual_headcount,
                row.forecasted_growth + row.forecasted_attrition
            );
        }
    }
}
