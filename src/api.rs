//! HTTP API for the Leave Engine.
//!
//! This module exposes a minimal REST API around the leave calculator
//! using the [`axum`](https://crates.io/crates/axum) framework.  Clients
//! post a leave request together with the employee's ledger and
//! joining date and receive the distribution, or the complete leave
//! application payload, as JSON.  The API is stateless: ledgers are
//! supplied with every request.

use crate::engine::{distribute_batch, distribute_leaves_with, DistributionInput, LeavePolicy};
use crate::error::LeaveError;
use crate::models::{LeaveApplication, LeaveDistribution, LeaveLedger, LeaveRequest};
use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

/// Application state shared across requests.
pub struct AppState {
    pub policy: LeavePolicy,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub items: Vec<DistributionInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResponse {
    pub results: Vec<LeaveDistribution>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub employee_id: String,
    pub request: LeaveRequest,
    pub ledger: LeaveLedger,
    pub joining_date: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
}

/// A [`LeaveError`] rendered as `400 {"error": ...}`.
#[derive(Debug)]
pub struct ApiError(pub LeaveError);

impl From<LeaveError> for ApiError {
    fn from(err: LeaveError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(error = %self.0, "request rejected");
        let body = Json(serde_json::json!({"error": self.0.to_string()}));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

/// Build the API router around the given policy.
pub fn build_router(policy: LeavePolicy) -> Router {
    let state = Arc::new(AppState { policy });
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/leaves/distribute", post(distribute_handler))
        .route("/api/leaves/distribute/batch", post(batch_handler))
        .route("/api/leaves/applications", post(application_handler))
        .with_state(state)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Handler for POST /api/leaves/distribute
async fn distribute_handler(
    State(app_state): State<Arc<AppState>>,
    Json(input): Json<DistributionInput>,
) -> Json<LeaveDistribution> {
    Json(distribute_leaves_with(
        &app_state.policy,
        &input.request,
        &input.ledger,
        input.joining_date,
    ))
}

/// Handler for POST /api/leaves/distribute/batch
async fn batch_handler(
    State(app_state): State<Arc<AppState>>,
    Json(batch): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, ApiError> {
    if batch.items.is_empty() {
        return Err(LeaveError::EmptyBatch.into());
    }
    let results = distribute_batch(&app_state.policy, &batch.items);
    Ok(Json(BatchResponse { results }))
}

/// Handler for POST /api/leaves/applications
async fn application_handler(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<ApplicationRequest>,
) -> Json<LeaveApplication> {
    let distribution =
        distribute_leaves_with(&app_state.policy, &body.request, &body.ledger, body.joining_date);
    Json(LeaveApplication::new(
        body.employee_id,
        &body.request,
        distribution,
        body.reason,
    ))
}

/// Launch the API server on `addr`.  Blocks until the server
/// terminates or Ctrl-C is received.
pub async fn serve(addr: SocketAddr, policy: LeavePolicy) -> Result<()> {
    let router = build_router(policy);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, ?policy, "server listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown requested");
        })
        .await
        .context("server error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeaveType;
    use serde_json::json;

    fn state() -> State<Arc<AppState>> {
        State(Arc::new(AppState {
            policy: LeavePolicy::default(),
        }))
    }

    fn input(value: serde_json::Value) -> DistributionInput {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_distribute_handler() {
        let body = input(json!({
            "request": {"type": "Casual", "startDate": "2024-03-10", "endDate": "2024-03-11"},
            "ledger": {"monthlyLeavesAllowed": 2, "monthlyLeaveRecords": [], "annualLeavesAllowed": 12, "annualLeavesRecords": []},
            "joiningDate": "2022-09-01"
        }));
        let Json(result) = distribute_handler(state(), Json(body)).await;
        assert_eq!(
            serde_json::to_value(result).unwrap(),
            json!({"leaves": 2, "unpaidLeaves": 0, "annualLeaves": 0})
        );
    }

    #[tokio::test]
    async fn test_batch_handler() {
        let item = input(json!({
            "request": {"type": "Annual", "startDate": "2024-03-04", "endDate": "2024-03-08"},
            "ledger": {"annualLeavesAllowed": 12},
            "joiningDate": "2023-12-01"
        }));
        let batch = BatchRequest {
            items: vec![item.clone(), item],
        };
        let Json(response) = batch_handler(state(), Json(batch)).await.unwrap();
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[1].annual_leaves, 3);
        assert_eq!(response.results[1].unpaid_leaves, 2);
    }

    #[tokio::test]
    async fn test_empty_batch_is_bad_request() {
        let err = batch_handler(state(), Json(BatchRequest { items: vec![] }))
            .await
            .unwrap_err();
        assert_eq!(err.0, LeaveError::EmptyBatch);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_application_handler() {
        let body: ApplicationRequest = serde_json::from_value(json!({
            "employeeId": "emp-42",
            "request": {"type": "Sick", "startDate": "2024-03-10", "endDate": "2024-03-12"},
            "ledger": {"monthlyLeavesAllowed": 1},
            "joiningDate": "2022-09-01",
            "reason": "flu"
        }))
        .unwrap();
        let Json(application) = application_handler(state(), Json(body)).await;
        assert_eq!(application.employee_id, "emp-42");
        assert_eq!(application.leave_type, LeaveType::Sick);
        assert_eq!(application.paid_leaves, 1);
        assert_eq!(application.annual_leaves, 0);
        assert_eq!(application.unpaid_leaves, 2);
        assert_eq!(application.reason.as_deref(), Some("flu"));
    }

    #[test]
    fn test_reversed_range_fails_to_parse() {
        let parsed = serde_json::from_value::<DistributionInput>(json!({
            "request": {"type": "Casual", "startDate": "2024-03-11", "endDate": "2024-03-10"},
            "ledger": {},
            "joiningDate": "2022-09-01"
        }));
        assert!(parsed.is_err());
    }

    #[tokio::test]
    async fn test_health() {
        let Json(value) = health_handler().await;
        assert_eq!(value["status"], "ok");
    }

    #[test]
    fn test_router_builds() {
        let _router = build_router(LeavePolicy::default());
    }
}
