//! The balance-consistency engine.
//!
//! [`HrEngine`] owns the ledger and exposes every state transition as one
//! atomic operation: the status check, the balance mutation and the side
//! effects (absence marker, audit entry) all happen inside a single
//! critical section, so two concurrent transitions on the same request
//! serialize and the loser fails its source-state check cleanly.
//!
//! Authorization is re-validated here from the [`ActorContext`] the
//! caller resolved, independent of whatever the HTTP layer already
//! checked: approve/reject/reset require a reviewer role, cancel and
//! submit are owner-only.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use crate::calculation::prorate;
use crate::config::HrConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AbsenceEvent, ActorContext, AuditEntityKind, AuditEntry, Employee, ExpenseClaim,
    LeaveBalanceSummary, LeaveRequest, NewExpenseClaim, NewLeaveRequest, RequestStatus, SalaryInfo,
};

use super::store::LedgerStore;

/// The stateful core of the HR system: leave balances, request and claim
/// lifecycles, payslips and the year-end rollover.
pub struct HrEngine {
    config: HrConfig,
    store: Mutex<LedgerStore>,
}

impl HrEngine {
    /// Creates an engine with an empty ledger.
    pub fn new(config: HrConfig) -> Self {
        Self {
            config,
            store: Mutex::new(LedgerStore::default()),
        }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &HrConfig {
        &self.config
    }

    pub(super) fn store(&self) -> MutexGuard<'_, LedgerStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers an employee and creates their current-year balance rows,
    /// one per configured leave type.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error when the id is empty or already taken.
    pub fn register_employee(&self, employee: Employee, as_of: NaiveDate) -> EngineResult<()> {
        if employee.id.trim().is_empty() {
            return Err(EngineError::Validation {
                field: "employee_id",
                message: "must not be empty".to_string(),
            });
        }

        let mut store = self.store();
        if store.has_employee(&employee.id) {
            return Err(EngineError::Validation {
                field: "employee_id",
                message: format!("employee '{}' already exists", employee.id),
            });
        }

        for leave_type in self.config.leave_types() {
            store.balance_entry(
                (
                    employee.id.clone(),
                    leave_type.code.clone(),
                    as_of.year(),
                ),
                leave_type.default_days,
            );
        }
        store.insert_employee(employee);
        Ok(())
    }

    /// Returns an employee by id.
    pub fn employee(&self, id: &str) -> EngineResult<Employee> {
        Ok(self.store().employee(id)?.clone())
    }

    /// Sets or replaces an employee's salary record (HR mutation path).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown employee and `Validation` for
    /// negative salary components.
    pub fn set_salary_info(&self, info: SalaryInfo) -> EngineResult<()> {
        if info.basic_salary < Decimal::ZERO {
            return Err(EngineError::Validation {
                field: "basic_salary",
                message: "must not be negative".to_string(),
            });
        }
        if info.allowances < Decimal::ZERO {
            return Err(EngineError::Validation {
                field: "allowances",
                message: "must not be negative".to_string(),
            });
        }

        let mut store = self.store();
        store.employee(&info.employee_id)?;
        store.upsert_salary(info);
        Ok(())
    }

    /// Submits a leave request; the request enters `Pending` and its day
    /// count is reserved on the balance row for the start date's year.
    ///
    /// Owner-only: the actor must be the employee the request is for.
    pub fn create_leave_request(
        &self,
        ctx: &ActorContext,
        new: NewLeaveRequest,
    ) -> EngineResult<LeaveRequest> {
        if ctx.actor_id != new.employee_id {
            return Err(EngineError::Forbidden {
                action: "submit leave request",
                requirement: "the request's own employee",
            });
        }
        if new.end_date < new.start_date {
            return Err(EngineError::Validation {
                field: "end_date",
                message: "cannot be before start_date".to_string(),
            });
        }

        let span_days = Decimal::from((new.end_date - new.start_date).num_days() + 1);
        let days = new.days.unwrap_or(span_days);
        if days <= Decimal::ZERO {
            return Err(EngineError::Validation {
                field: "days",
                message: format!("must be positive, got {}", days),
            });
        }
        if (days * Decimal::TWO).fract() != Decimal::ZERO {
            return Err(EngineError::Validation {
                field: "days",
                message: format!("must be a multiple of 0.5, got {}", days),
            });
        }

        let leave_type = self.config.get_leave_type(&new.leave_type)?;

        let mut store = self.store();
        store.employee(&new.employee_id)?;

        let request = LeaveRequest {
            id: Uuid::new_v4(),
            employee_id: new.employee_id.clone(),
            leave_type: leave_type.code.clone(),
            start_date: new.start_date,
            end_date: new.end_date,
            days,
            status: RequestStatus::Pending,
            approver: None,
            decided_at: None,
            rejection_reason: None,
            document: new.document,
            created_at: Utc::now(),
        };

        let balance = store.balance_entry(
            (
                new.employee_id,
                leave_type.code.clone(),
                new.start_date.year(),
            ),
            leave_type.default_days,
        );
        balance.pending += days;

        store.insert_request(request.clone());
        Ok(request)
    }

    /// Returns a leave request by id.
    pub fn leave_request(&self, id: Uuid) -> EngineResult<LeaveRequest> {
        Ok(self.store().request(id)?.clone())
    }

    /// Approves a pending leave request: the reserved days become used
    /// and an absence marker is emitted for the calendar layer.
    ///
    /// Reviewer-only.
    pub fn approve_leave(&self, ctx: &ActorContext, id: Uuid) -> EngineResult<LeaveRequest> {
        self.require_reviewer(ctx, "approve leave request")?;

        let mut store = self.store();
        let request = store.request(id)?.clone();
        require_status(&request, RequestStatus::Pending, "approve")?;

        let employee_name = store.employee(&request.employee_id)?.name.clone();
        let default_days = self.config.get_leave_type(&request.leave_type)?.default_days;

        let balance = store.balance_entry(balance_key(&request), default_days);
        balance.pending -= request.days;
        balance.used += request.days;

        store.insert_event(AbsenceEvent {
            id: Uuid::new_v4(),
            request_id: request.id,
            employee_id: request.employee_id.clone(),
            title: format!("{} - {} leave", employee_name, request.leave_type),
            start_date: request.start_date,
            end_date: request.end_date,
        });

        let updated = store.request_mut(id)?;
        updated.status = RequestStatus::Approved;
        updated.approver = Some(ctx.actor_id.clone());
        updated.decided_at = Some(Utc::now());
        Ok(updated.clone())
    }

    /// Rejects a pending leave request, releasing the reserved days.
    ///
    /// Reviewer-only.
    pub fn reject_leave(
        &self,
        ctx: &ActorContext,
        id: Uuid,
        reason: Option<String>,
    ) -> EngineResult<LeaveRequest> {
        self.require_reviewer(ctx, "reject leave request")?;

        let mut store = self.store();
        let request = store.request(id)?.clone();
        require_status(&request, RequestStatus::Pending, "reject")?;

        let default_days = self.config.get_leave_type(&request.leave_type)?.default_days;
        let balance = store.balance_entry(balance_key(&request), default_days);
        balance.pending -= request.days;

        let updated = store.request_mut(id)?;
        updated.status = RequestStatus::Rejected;
        updated.approver = Some(ctx.actor_id.clone());
        updated.decided_at = Some(Utc::now());
        updated.rejection_reason = reason;
        Ok(updated.clone())
    }

    /// Cancels a pending leave request, releasing the reserved days.
    ///
    /// Owner-only; a cancelled request is terminal and must be
    /// resubmitted rather than reset.
    pub fn cancel_leave(&self, ctx: &ActorContext, id: Uuid) -> EngineResult<LeaveRequest> {
        let mut store = self.store();
        let request = store.request(id)?.clone();
        if ctx.actor_id != request.employee_id {
            return Err(EngineError::Forbidden {
                action: "cancel leave request",
                requirement: "the request's own employee",
            });
        }
        require_status(&request, RequestStatus::Pending, "cancel")?;

        let default_days = self.config.get_leave_type(&request.leave_type)?.default_days;
        let balance = store.balance_entry(balance_key(&request), default_days);
        balance.pending -= request.days;

        let updated = store.request_mut(id)?;
        updated.status = RequestStatus::Cancelled;
        Ok(updated.clone())
    }

    /// Resets a decided leave request back to `Pending`, reversing its
    /// balance effect, deleting the absence marker if the request was
    /// approved, and always recording an audit entry.
    ///
    /// Reviewer-only. Cancelled requests can never be reset.
    pub fn reset_leave(
        &self,
        ctx: &ActorContext,
        id: Uuid,
        reason: Option<String>,
    ) -> EngineResult<LeaveRequest> {
        self.require_reviewer(ctx, "reset leave request")?;

        let mut store = self.store();
        let request = store.request(id)?.clone();
        let prior = request.status;
        if !matches!(prior, RequestStatus::Approved | RequestStatus::Rejected) {
            return Err(EngineError::InvalidStateTransition {
                entity: "leave request",
                id: id.to_string(),
                status: prior.as_str().to_string(),
                action: "reset",
            });
        }

        let default_days = self.config.get_leave_type(&request.leave_type)?.default_days;
        let balance = store.balance_entry(balance_key(&request), default_days);
        if prior == RequestStatus::Approved {
            balance.pending += request.days;
            balance.used -= request.days;
            store.remove_event(id);
        } else {
            balance.pending += request.days;
        }

        store.record_audit(AuditEntry {
            id: Uuid::new_v4(),
            actor_id: ctx.actor_id.clone(),
            entity_kind: AuditEntityKind::LeaveRequest,
            entity_id: id,
            prior_status: prior.as_str().to_string(),
            new_status: RequestStatus::Pending.as_str().to_string(),
            reason,
            recorded_at: Utc::now(),
        });

        let updated = store.request_mut(id)?;
        updated.status = RequestStatus::Pending;
        updated.approver = None;
        updated.decided_at = None;
        updated.rejection_reason = None;
        Ok(updated.clone())
    }

    /// Returns the balance summary for every configured leave type for
    /// one employee and year.
    ///
    /// The `entitlement` on each row is the configured annual allocation;
    /// `effective_entitlement` is re-derived through [`prorate`] for
    /// `as_of` on every read, and `available` is computed against it. A
    /// negative available figure is reported as-is with a warning logged.
    pub fn leave_balances(
        &self,
        employee_id: &str,
        year: i32,
        as_of: NaiveDate,
    ) -> EngineResult<Vec<LeaveBalanceSummary>> {
        let store = self.store();
        let employee = store.employee(employee_id)?.clone();

        let mut leave_types: Vec<_> = self.config.leave_types().collect();
        leave_types.sort_by(|a, b| a.code.cmp(&b.code));

        let mut summaries = Vec::with_capacity(leave_types.len());
        for leave_type in leave_types {
            let key = (
                employee_id.to_string(),
                leave_type.code.clone(),
                year,
            );
            let balance = store.balance(&key).cloned().unwrap_or_else(|| {
                crate::models::LeaveBalance::new(
                    employee_id,
                    leave_type.code.clone(),
                    year,
                    leave_type.default_days,
                )
            });

            let effective_entitlement =
                prorate(balance.entitlement, employee.hire_date, as_of);
            let available = effective_entitlement + balance.carried_over
                - balance.used
                - balance.pending;
            if available < Decimal::ZERO {
                warn!(
                    employee_id,
                    leave_type = %leave_type.code,
                    year,
                    %available,
                    "negative available leave balance"
                );
            }

            summaries.push(LeaveBalanceSummary {
                balance,
                effective_entitlement,
                available,
            });
        }
        Ok(summaries)
    }

    /// Submits an expense claim in `Pending`. Owner-only.
    pub fn submit_expense_claim(
        &self,
        ctx: &ActorContext,
        new: NewExpenseClaim,
    ) -> EngineResult<ExpenseClaim> {
        if ctx.actor_id != new.employee_id {
            return Err(EngineError::Forbidden {
                action: "submit expense claim",
                requirement: "the claim's own employee",
            });
        }
        if new.amount <= Decimal::ZERO {
            return Err(EngineError::Validation {
                field: "amount",
                message: format!("must be positive, got {}", new.amount),
            });
        }
        if new.category.trim().is_empty() {
            return Err(EngineError::Validation {
                field: "category",
                message: "must not be empty".to_string(),
            });
        }

        let mut store = self.store();
        store.employee(&new.employee_id)?;

        let claim = ExpenseClaim {
            id: Uuid::new_v4(),
            employee_id: new.employee_id,
            category: new.category,
            amount: new.amount,
            description: new.description,
            receipt: new.receipt,
            status: RequestStatus::Pending,
            approver: None,
            decided_at: None,
            rejection_reason: None,
            created_at: Utc::now(),
        };
        store.insert_claim(claim.clone());
        Ok(claim)
    }

    /// Returns an expense claim by id.
    pub fn expense_claim(&self, id: Uuid) -> EngineResult<ExpenseClaim> {
        Ok(self.store().claim(id)?.clone())
    }

    /// Approves a pending expense claim. Reviewer-only.
    pub fn approve_expense_claim(
        &self,
        ctx: &ActorContext,
        id: Uuid,
    ) -> EngineResult<ExpenseClaim> {
        self.require_reviewer(ctx, "approve expense claim")?;

        let mut store = self.store();
        require_claim_status(store.claim(id)?, RequestStatus::Pending, "approve")?;

        let claim = store.claim_mut(id)?;
        claim.status = RequestStatus::Approved;
        claim.approver = Some(ctx.actor_id.clone());
        claim.decided_at = Some(Utc::now());
        Ok(claim.clone())
    }

    /// Rejects a pending expense claim. Reviewer-only.
    pub fn reject_expense_claim(
        &self,
        ctx: &ActorContext,
        id: Uuid,
        reason: Option<String>,
    ) -> EngineResult<ExpenseClaim> {
        self.require_reviewer(ctx, "reject expense claim")?;

        let mut store = self.store();
        require_claim_status(store.claim(id)?, RequestStatus::Pending, "reject")?;

        let claim = store.claim_mut(id)?;
        claim.status = RequestStatus::Rejected;
        claim.approver = Some(ctx.actor_id.clone());
        claim.decided_at = Some(Utc::now());
        claim.rejection_reason = reason;
        Ok(claim.clone())
    }

    /// Cancels a pending expense claim. Owner-only; terminal.
    pub fn cancel_expense_claim(&self, ctx: &ActorContext, id: Uuid) -> EngineResult<ExpenseClaim> {
        let mut store = self.store();
        let claim = store.claim(id)?.clone();
        if ctx.actor_id != claim.employee_id {
            return Err(EngineError::Forbidden {
                action: "cancel expense claim",
                requirement: "the claim's own employee",
            });
        }
        require_claim_status(&claim, RequestStatus::Pending, "cancel")?;

        let updated = store.claim_mut(id)?;
        updated.status = RequestStatus::Cancelled;
        Ok(updated.clone())
    }

    /// Resets a decided expense claim back to `Pending`, recording an
    /// audit entry. Reviewer-only; cancelled claims can never be reset.
    pub fn reset_expense_claim(
        &self,
        ctx: &ActorContext,
        id: Uuid,
        reason: Option<String>,
    ) -> EngineResult<ExpenseClaim> {
        self.require_reviewer(ctx, "reset expense claim")?;

        let mut store = self.store();
        let claim = store.claim(id)?.clone();
        let prior = claim.status;
        if !matches!(prior, RequestStatus::Approved | RequestStatus::Rejected) {
            return Err(EngineError::InvalidStateTransition {
                entity: "expense claim",
                id: id.to_string(),
                status: prior.as_str().to_string(),
                action: "reset",
            });
        }

        store.record_audit(AuditEntry {
            id: Uuid::new_v4(),
            actor_id: ctx.actor_id.clone(),
            entity_kind: AuditEntityKind::ExpenseClaim,
            entity_id: id,
            prior_status: prior.as_str().to_string(),
            new_status: RequestStatus::Pending.as_str().to_string(),
            reason,
            recorded_at: Utc::now(),
        });

        let updated = store.claim_mut(id)?;
        updated.status = RequestStatus::Pending;
        updated.approver = None;
        updated.decided_at = None;
        updated.rejection_reason = None;
        Ok(updated.clone())
    }

    /// The audit log for the external audit sink, oldest first.
    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.store().audit_log().to_vec()
    }

    /// The current absence markers for the calendar layer.
    pub fn absence_events(&self) -> Vec<AbsenceEvent> {
        self.store().events()
    }

    fn require_reviewer(&self, ctx: &ActorContext, action: &'static str) -> EngineResult<()> {
        if !ctx.role.is_reviewer() {
            return Err(EngineError::Forbidden {
                action,
                requirement: "a reviewer role",
            });
        }
        Ok(())
    }
}

fn balance_key(request: &LeaveRequest) -> (String, String, i32) {
    (
        request.employee_id.clone(),
        request.leave_type.clone(),
        request.start_date.year(),
    )
}

fn require_status(
    request: &LeaveRequest,
    required: RequestStatus,
    action: &'static str,
) -> EngineResult<()> {
    if request.status != required {
        return Err(EngineError::InvalidStateTransition {
            entity: "leave request",
            id: request.id.to_string(),
            status: request.status.as_str().to_string(),
            action,
        });
    }
    Ok(())
}

fn require_claim_status(
    claim: &ExpenseClaim,
    required: RequestStatus,
    action: &'static str,
) -> EngineResult<()> {
    if claim.status != required {
        return Err(EngineError::InvalidStateTransition {
            entity: "expense claim",
            id: claim.id.to_string(),
            status: claim.status.as_str().to_string(),
            action,
        });
    }
    Ok(())
}
