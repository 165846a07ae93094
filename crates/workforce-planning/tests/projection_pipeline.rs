use workforce_planning::projection::{
    apply_department_weights, build_waterfall, compose_gap, project_attrition, project_demand,
    Department, DepartmentWeights, Percent, ProjectionError, ProjectionParameters, WorkforcePlan,
};

fn percent(value: f64) -> Percent {
    Percent::from_percent(value).expect("valid percent")
}

fn parameters(start: i64, growth: f64, attrition: f64, horizon: u32) -> ProjectionParameters {
    ProjectionParameters::new(start, percent(growth), percent(attrition), horizon, 2024)
}

#[test]
fn biotech_case_study_end_to_end() {
    let params = parameters(210, 12.0, 8.0, 5);

    let demand = project_demand(&params).expect("demand");
    assert_eq!(demand.macro_headcounts(), vec![210, 235, 263, 295, 330]);

    let weighted =
        apply_department_weights(&demand, &DepartmentWeights::standard()).expect("weighted");
    let attrition = project_attrition(&params).expect("attrition");
    assert_eq!(attrition, vec![210, 193, 178, 164, 151]);

    let waterfall = build_waterfall(&weighted, &params).expect("waterfall");
    assert_eq!(waterfall[0].planned_headcount, 210);
    assert_eq!(waterfall[0].growth_delta, 0);
    assert_eq!(waterfall[0].forecasted_attrition, -17);
    assert_eq!(waterfall[0].actual_headcount, 193);

    let gap = compose_gap(&weighted, &attrition, &waterfall).expect("gap");
    let years: Vec<i32> = gap.iter().map(|row| row.year).collect();
    assert_eq!(years, vec![2024, 2025, 2026, 2027, 2028]);
    assert!(gap
        .iter()
        .all(|row| row.supply_with_hiring <= row.macro_demand));
}

#[test]
fn series_length_matches_horizon_for_varied_inputs() {
    for horizon in [1, 2, 7, 30] {
        for growth in [-40.0, 0.0, 3.3, 25.0] {
            let params = parameters(480, growth, 11.0, horizon);
            let demand = project_demand(&params).expect("demand");
            assert_eq!(demand.len(), horizon as usize);
            assert_eq!(demand.points()[0].macro_headcount, 480);
            assert_eq!(
                project_attrition(&params).expect("attrition").len(),
                horizon as usize
            );
        }
    }
}

#[test]
fn zero_growth_is_flat() {
    let demand = project_demand(&parameters(77, 0.0, 5.0, 6)).expect("demand");
    assert!(demand.iter().all(|point| point.macro_headcount == 77));
}

#[test]
fn attrition_series_never_increases() {
    let attrition = project_attrition(&parameters(5_000, 0.0, 2.75, 40)).expect("attrition");
    assert!(attrition.windows(2).all(|pair| pair[1] <= pair[0]));
}

#[test]
fn micro_headcount_is_the_sum_of_departments() {
    let params = parameters(1_024, 6.0, 9.0, 10);
    let weighted = apply_department_weights(
        &project_demand(&params).expect("demand"),
        &DepartmentWeights::standard(),
    )
    .expect("weighted");

    for point in &weighted {
        let total: i64 = point.department_breakdown.values().sum();
        assert_eq!(point.micro_headcount, total);
        assert_eq!(point.department_breakdown.len(), Department::ordered().len());
    }
}

#[test]
fn demand_rejects_invalid_horizon_and_headcount() {
    assert!(matches!(
        project_demand(&parameters(210, 12.0, 8.0, 0)),
        Err(ProjectionError::InvalidParameter { .. })
    ));
    assert!(matches!(
        project_demand(&parameters(-5, 12.0, 8.0, 5)),
        Err(ProjectionError::InvalidParameter { .. })
    ));
    assert!(matches!(
        build_waterfall(
            &project_demand(&parameters(210, 12.0, 8.0, 5)).expect("demand"),
            &parameters(210, 12.0, 101.0, 5),
        ),
        Err(ProjectionError::InvalidParameter { .. })
    ));
}

#[test]
fn five_year_demand_against_four_year_supply_is_a_length_mismatch() {
    let five = parameters(210, 12.0, 8.0, 5);
    let four = parameters(210, 12.0, 8.0, 4);
    let demand = project_demand(&five).expect("demand");
    let waterfall = build_waterfall(&demand, &five).expect("waterfall");
    let attrition = project_attrition(&four).expect("attrition");

    assert!(matches!(
        compose_gap(&demand, &attrition, &waterfall),
        Err(ProjectionError::LengthMismatch {
            expected: 5,
            found: 4,
            ..
        })
    ));
}

#[test]
fn plan_summary_serializes_for_charting() {
    let plan =
        WorkforcePlan::build(parameters(210, 12.0, 8.0, 3), DepartmentWeights::standard())
            .expect("plan");
    let value = serde_json::to_value(plan.summary()).expect("serialize");

    assert_eq!(value["years"], serde_json::json!([2024, 2025, 2026]));
    assert_eq!(value["demand"][0]["key"], "macro_demand");
    assert_eq!(
        value["demand"][0]["points"][1],
        serde_json::json!({ "year": 2025, "value": 235 })
    );
    assert_eq!(value["departments"][4]["department"], "hr");
    assert_eq!(value["departments"][0]["weight_pct"], 2.0);
    assert_eq!(value["weights"]["total_pct"], 107.0);
    assert_eq!(value["weights"]["over_allocated"], true);
    assert_eq!(value["gap"][0]["supply_with_hiring"], 193);
}
