//! HTTP request handlers for the HR balance engine API.
//!
//! This module contains the handler functions for all API endpoints.
//! Handlers are thin adapters: they resolve dates and the actor context
//! at the boundary, delegate to the engine, and map [`EngineError`]
//! values onto status codes through [`ApiErrorResponse`].

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::ActorContext;

use super::request::{
    BalanceQuery, CreateExpenseClaim, CreateLeaveRequest, PayrollRunRequest,
    RegisterEmployeeRequest, RolloverRequest, SalaryRequest, TransitionRequest,
};
use super::response::ApiErrorResponse;
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", post(register_employee))
        .route("/employees/:id/salary", put(set_salary))
        .route("/employees/:id/leave-balances/:year", get(leave_balances))
        .route("/employees/:id/payslips", get(list_payslips))
        .route("/leave-requests", post(create_leave))
        .route("/leave-requests/:id", get(get_leave))
        .route("/leave-requests/:id/approve", post(approve_leave))
        .route("/leave-requests/:id/reject", post(reject_leave))
        .route("/leave-requests/:id/cancel", post(cancel_leave))
        .route("/leave-requests/:id/reset", post(reset_leave))
        .route("/expense-claims", post(create_claim))
        .route("/expense-claims/:id", get(get_claim))
        .route("/expense-claims/:id/approve", post(approve_claim))
        .route("/expense-claims/:id/reject", post(reject_claim))
        .route("/expense-claims/:id/cancel", post(cancel_claim))
        .route("/expense-claims/:id/reset", post(reset_claim))
        .route("/payroll/runs", post(run_payroll))
        .route("/payslips/:id/pay", post(pay_payslip))
        .route("/rollover", post(run_rollover))
        .with_state(state)
}

fn failure(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "request failed");
    ApiErrorResponse::from(err).into_response()
}

/// Handler for `POST /employees`.
async fn register_employee(
    State(state): State<AppState>,
    Json(body): Json<RegisterEmployeeRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %body.id, "registering employee");

    let employee: crate::models::Employee = body.into();
    match state
        .engine()
        .register_employee(employee.clone(), Utc::now().date_naive())
    {
        Ok(()) => (StatusCode::CREATED, Json(employee)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `PUT /employees/:id/salary`.
async fn set_salary(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Json(body): Json<SalaryRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let info = body.into_salary_info(employee_id);
    match state.engine().set_salary_info(info.clone()) {
        Ok(()) => (StatusCode::OK, Json(info)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `GET /employees/:id/leave-balances/:year`.
async fn leave_balances(
    State(state): State<AppState>,
    Path((employee_id, year)): Path<(String, i32)>,
    Query(query): Query<BalanceQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    match state.engine().leave_balances(&employee_id, year, as_of) {
        Ok(summaries) => (StatusCode::OK, Json(summaries)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `GET /employees/:id/payslips`.
async fn list_payslips(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    (StatusCode::OK, Json(state.engine().payslips(&employee_id))).into_response()
}

/// Handler for `POST /leave-requests`.
async fn create_leave(
    State(state): State<AppState>,
    Json(body): Json<CreateLeaveRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %body.request.employee_id,
        leave_type = %body.request.leave_type,
        "creating leave request"
    );

    let ctx = ActorContext::from(body.actor);
    match state.engine().create_leave_request(&ctx, body.request) {
        Ok(request) => (StatusCode::CREATED, Json(request)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `GET /leave-requests/:id`.
async fn get_leave(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.engine().leave_request(id) {
        Ok(request) => (StatusCode::OK, Json(request)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `POST /leave-requests/:id/approve`.
async fn approve_leave(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TransitionRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, request_id = %id, "approving leave request");

    let ctx = ActorContext::from(body.actor);
    match state.engine().approve_leave(&ctx, id) {
        Ok(request) => (StatusCode::OK, Json(request)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `POST /leave-requests/:id/reject`.
async fn reject_leave(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TransitionRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, request_id = %id, "rejecting leave request");

    let ctx = ActorContext::from(body.actor);
    match state.engine().reject_leave(&ctx, id, body.reason) {
        Ok(request) => (StatusCode::OK, Json(request)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `POST /leave-requests/:id/cancel`.
async fn cancel_leave(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TransitionRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, request_id = %id, "cancelling leave request");

    let ctx = ActorContext::from(body.actor);
    match state.engine().cancel_leave(&ctx, id) {
        Ok(request) => (StatusCode::OK, Json(request)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `POST /leave-requests/:id/reset`.
async fn reset_leave(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TransitionRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, request_id = %id, "resetting leave request");

    let ctx = ActorContext::from(body.actor);
    match state.engine().reset_leave(&ctx, id, body.reason) {
        Ok(request) => (StatusCode::OK, Json(request)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `POST /expense-claims`.
async fn create_claim(
    State(state): State<AppState>,
    Json(body): Json<CreateExpenseClaim>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %body.request.employee_id,
        "creating expense claim"
    );

    let ctx = ActorContext::from(body.actor);
    match state.engine().submit_expense_claim(&ctx, body.request) {
        Ok(claim) => (StatusCode::CREATED, Json(claim)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `GET /expense-claims/:id`.
async fn get_claim(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.engine().expense_claim(id) {
        Ok(claim) => (StatusCode::OK, Json(claim)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `POST /expense-claims/:id/approve`.
async fn approve_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TransitionRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let ctx = ActorContext::from(body.actor);
    match state.engine().approve_expense_claim(&ctx, id) {
        Ok(claim) => (StatusCode::OK, Json(claim)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `POST /expense-claims/:id/reject`.
async fn reject_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TransitionRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let ctx = ActorContext::from(body.actor);
    match state.engine().reject_expense_claim(&ctx, id, body.reason) {
        Ok(claim) => (StatusCode::OK, Json(claim)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `POST /expense-claims/:id/cancel`.
async fn cancel_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TransitionRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let ctx = ActorContext::from(body.actor);
    match state.engine().cancel_expense_claim(&ctx, id) {
        Ok(claim) => (StatusCode::OK, Json(claim)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `POST /expense-claims/:id/reset`.
async fn reset_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TransitionRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let ctx = ActorContext::from(body.actor);
    match state.engine().reset_expense_claim(&ctx, id, body.reason) {
        Ok(claim) => (StatusCode::OK, Json(claim)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `POST /payroll/runs`.
async fn run_payroll(
    State(state): State<AppState>,
    Json(body): Json<PayrollRunRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        month = body.month,
        year = body.year,
        "starting payroll run"
    );

    let as_of = body.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let payment_date = body.payment_date.unwrap_or(as_of);
    match state
        .engine()
        .generate_payroll(body.month, body.year, payment_date, as_of)
    {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `POST /payslips/:id/pay`.
async fn pay_payslip(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, payslip_id = %id, "marking payslip paid");

    match state.engine().mark_payslip_paid(id) {
        Ok(payslip) => (StatusCode::OK, Json(payslip)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `POST /rollover`.
async fn run_rollover(
    State(state): State<AppState>,
    Json(body): Json<RolloverRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, from_year = body.from_year, "starting rollover");

    match state.engine().rollover(body.from_year) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}
