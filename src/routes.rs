use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use workforce_planning::error::AppError;
use workforce_planning::projection::report::views::WeightsView;
use workforce_planning::projection::{
    write_gap_csv, DepartmentWeight, DepartmentWeights, Percent, ProjectionParameters,
    WorkforcePlan, WorkforcePlanSummary,
};

#[derive(Debug, Deserialize)]
pub(crate) struct WorkforcePlanRequest {
    pub(crate) starting_headcount: i64,
    pub(crate) growth_rate: Percent,
    pub(crate) attrition_rate: Percent,
    pub(crate) horizon_years: u32,
    #[serde(default)]
    pub(crate) start_year: Option<i32>,
    #[serde(default)]
    pub(crate) department_weights: Option<Vec<DepartmentWeight>>,
}

impl WorkforcePlanRequest {
    fn into_plan(self, defaults: &DepartmentWeights) -> Result<WorkforcePlan, AppError> {
        let parameters = ProjectionParameters::new(
            self.starting_headcount,
            self.growth_rate,
            self.attrition_rate,
            self.horizon_years,
            self.start_year
                .unwrap_or_else(ProjectionParameters::current_year),
        );
        let weights = match self.department_weights {
            Some(entries) => DepartmentWeights::from_entries(entries)?,
            None => defaults.clone(),
        };

        Ok(WorkforcePlan::build(parameters, weights)?)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct WorkforcePlanResponse {
    pub(crate) parameters: ProjectionParameters,
    #[serde(flatten)]
    pub(crate) summary: WorkforcePlanSummary,
}

#[derive(Debug, Serialize)]
pub(crate) struct DepartmentWeightsResponse {
    pub(crate) weights: Vec<DepartmentWeight>,
    #[serde(flatten)]
    pub(crate) totals: WeightsView,
}

pub fn planner_router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/workforce/plan", post(workforce_plan_endpoint))
        .route("/api/v1/workforce/gap.csv", post(gap_csv_endpoint))
        .route("/api/v1/workforce/departments", get(departments_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn workforce_plan_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<WorkforcePlanRequest>,
) -> Result<Json<WorkforcePlanResponse>, AppError> {
    let plan = payload.into_plan(&state.weights)?;

    Ok(Json(WorkforcePlanResponse {
        parameters: plan.parameters,
        summary: plan.summary(),
    }))
}

pub(crate) async fn gap_csv_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<WorkforcePlanRequest>,
) -> Result<impl IntoResponse, AppError> {
    let plan = payload.into_plan(&state.weights)?;
    let mut body = Vec::new();
    write_gap_csv(&plan.gap, &mut body)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        body,
    ))
}

pub(crate) async fn departments_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<DepartmentWeightsResponse> {
    Json(DepartmentWeightsResponse {
        weights: state.weights.entries(),
        totals: WeightsView {
            total_pct: state.weights.total(),
            over_allocated: state.weights.is_over_allocated(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use workforce_planning::projection::Department;

    fn test_state() -> AppState {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        AppState::new(handle, DepartmentWeights::standard())
    }

    fn case_study_request() -> WorkforcePlanRequest {
        WorkforcePlanRequest {
            starting_headcount: 210,
            growth_rate: Percent::from_basis_points(1_200),
            attrition_rate: Percent::from_basis_points(800),
            horizon_years: 5,
            start_year: Some(2025),
            department_weights: None,
        }
    }

    #[tokio::test]
    async fn plan_endpoint_returns_all_tables() {
        let Json(body) =
            workforce_plan_endpoint(Extension(test_state()), Json(case_study_request()))
                .await
                .expect("plan builds");

        assert_eq!(body.parameters.start_year, 2025);
        assert_eq!(body.summary.years.len(), 5);
        assert_eq!(body.summary.demand[0].values(), vec![210, 235, 263, 295, 330]);
        assert_eq!(body.summary.attrition.values(), vec![210, 193, 178, 164, 151]);
        assert_eq!(body.summary.waterfall[0].forecasted_attrition, -17);
        assert!(body.summary.weights.over_allocated);
    }

    #[tokio::test]
    async fn plan_endpoint_uses_request_weights_when_given() {
        let request = WorkforcePlanRequest {
            department_weights: Some(vec![DepartmentWeight {
                department: Department::Engineers,
                weight_pct: Percent::HUNDRED,
            }]),
            ..case_study_request()
        };

        let Json(body) = workforce_plan_endpoint(Extension(test_state()), Json(request))
            .await
            .expect("plan builds");

        assert!(!body.summary.weights.over_allocated);
        assert_eq!(
            body.summary.demand[1].values(),
            body.summary.demand[0].values()
        );
    }

    #[tokio::test]
    async fn plan_endpoint_rejects_zero_horizon() {
        let request = WorkforcePlanRequest {
            horizon_years: 0,
            ..case_study_request()
        };

        let error = workforce_plan_endpoint(Extension(test_state()), Json(request))
            .await
            .expect_err("zero horizon rejected");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let state = test_state();
        let response = readiness_endpoint(Extension(state.clone()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state.mark_ready();
        let response = readiness_endpoint(Extension(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
