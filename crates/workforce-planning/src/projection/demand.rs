use super::domain::{
    scale_floor, scale_half_up, Department, ProjectionError, ProjectionParameters,
};
use super::weights::DepartmentWeights;
use serde::Serialize;
use std::collections::BTreeMap;

/// One year of the projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearPoint {
    pub year: i32,
    pub macro_headcount: i64,
    /// Empty until department weights are applied.
    pub department_breakdown: BTreeMap<Department, i64>,
    pub micro_headcount: i64,
    pub attrited_headcount: Option<i64>,
}

impl YearPoint {
    fn macro_only(year: i32, macro_headcount: i64) -> Self {
        Self {
            year,
            macro_headcount,
            department_breakdown: BTreeMap::new(),
            micro_headcount: 0,
            attrited_headcount: None,
        }
    }
}

/// Year-ascending projection, index 0 being the starting year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProjectionSeries {
    points: Vec<YearPoint>,
}

impl ProjectionSeries {
    pub fn points(&self) -> &[YearPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, YearPoint> {
        self.points.iter()
    }

    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|point| point.year).collect()
    }

    pub fn macro_headcounts(&self) -> Vec<i64> {
        self.points.iter().map(|point| point.macro_headcount).collect()
    }

    pub fn micro_headcounts(&self) -> Vec<i64> {
        self.points.iter().map(|point| point.micro_headcount).collect()
    }

    /// Returns a copy with `attrited_headcount` filled from `attrition`.
    pub fn with_attrition(&self, attrition: &[i64]) -> Result<Self, ProjectionError> {
        if attrition.len() != self.points.len() {
            return Err(ProjectionError::LengthMismatch {
                series: "attrition",
                expected: self.points.len(),
                found: attrition.len(),
            });
        }

        let points = self
            .points
            .iter()
            .zip(attrition)
            .map(|(point, &attrited)| YearPoint {
                attrited_headcount: Some(attrited),
                ..point.clone()
            })
            .collect();

        Ok(Self { points })
    }
}

impl<'a> IntoIterator for &'a ProjectionSeries {
    type Item = &'a YearPoint;
    type IntoIter = std::slice::Iter<'a, YearPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Macro demand: the starting headcount compounded by a single growth rate.
pub fn project_demand(params: &ProjectionParameters) -> Result<ProjectionSeries, ProjectionError> {
    params.validate_demand()?;

    let multiplier = 10_000 + params.annual_growth_rate.basis_points();
    let horizon = params.horizon_years as usize;
    let mut points = Vec::with_capacity(horizon);
    let mut headcount = params.starting_headcount;
    points.push(YearPoint::macro_only(params.year_label(0), headcount));

    for index in 1..horizon {
        headcount = scale_half_up(headcount, multiplier)
            .ok_or(ProjectionError::HeadcountOverflow { index })?;
        points.push(YearPoint::macro_only(params.year_label(index), headcount));
    }

    Ok(ProjectionSeries { points })
}

/// Micro demand: splits each year's macro headcount across departments and
/// sums the shares.
///
/// Shares are truncated rather than rounded, so weights totalling 100% or
/// less never yield a micro figure above the macro one. Any existing
/// breakdown is replaced, so applying the same weights twice yields the same
/// series.
pub fn apply_department_weights(
    series: &ProjectionSeries,
    weights: &DepartmentWeights,
) -> Result<ProjectionSeries, ProjectionError> {
    let points = series
        .points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let mut breakdown = BTreeMap::new();
            let mut micro: i64 = 0;
            for department in Department::ordered() {
                let share = scale_floor(
                    point.macro_headcount,
                    weights.weight(department).basis_points(),
                )
                .ok_or(ProjectionError::HeadcountOverflow { index })?;
                micro = micro
                    .checked_add(share)
                    .ok_or(ProjectionError::HeadcountOverflow { index })?;
                breakdown.insert(department, share);
            }

            Ok(YearPoint {
                department_breakdown: breakdown,
                micro_headcount: micro,
                ..point.clone()
            })
        })
        .collect::<Result<Vec<_>, ProjectionError>>()?;

    Ok(ProjectionSeries { points })
}
