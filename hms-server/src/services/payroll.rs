//! Payroll service.
//!
//! One record per employee per (year, month); the storage-level unique index
//! is the source of truth for that constraint. Status machine:
//! `DRAFT | PENDING -> APPROVED -> PAID`.

use shared::models::{PayItem, Payroll, PayrollCreate, PayrollStatus, PayrollSummary};
use shared::util::{now_millis, round2};
use shared::{ErrorCode, PageQuery, Paginated};
use sqlx::SqlitePool;

use super::{ServiceError, ServiceResult, access};
use crate::auth::ServiceContext;
use crate::db::repository::{self, RepoError, payroll::PayrollInsert};

/// Create a DRAFT payroll for one employee and period.
///
/// The base salary defaults to the employee's current salary; totals are
/// computed here and rounded to 2 decimals. A duplicate period surfaces the
/// unique-index violation as [`ErrorCode::PayrollPeriodExists`].
pub async fn create(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    payload: PayrollCreate,
) -> ServiceResult<Payroll> {
    validate_period(payload.year, payload.month)?;
    let employee =
        access::employee_in_scope(pool, ctx, payload.employee_id, "payroll", None).await?;

    let base_salary = payload.base_salary.unwrap_or(employee.base_salary);
    let (gross, deductions, net) = compute_totals(
        base_salary,
        &payload.allowances,
        &payload.deductions,
        &payload.bonuses,
        payload.overtime_hours,
        payload.overtime_rate,
    );

    let ins = PayrollInsert {
        employee_id: payload.employee_id,
        year: payload.year,
        month: payload.month,
        base_salary,
        allowances: &payload.allowances,
        deductions: &payload.deductions,
        bonuses: &payload.bonuses,
        overtime_hours: payload.overtime_hours,
        overtime_rate: payload.overtime_rate,
        gross_total: gross,
        deductions_total: deductions,
        net_total: net,
    };

    repository::payroll::create(pool, &ins).await.map_err(|e| match e {
        RepoError::Duplicate(_) => ServiceError::domain_msg(
            ErrorCode::PayrollPeriodExists,
            format!(
                "Payroll for employee {} already exists for {}-{:02}",
                payload.employee_id, payload.year, payload.month
            ),
        ),
        other => other.into(),
    })
}

pub async fn get(pool: &SqlitePool, ctx: &ServiceContext, id: i64) -> ServiceResult<Payroll> {
    load_with_access(pool, ctx, id).await
}

pub async fn list(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    establishment_id: Option<i64>,
    employee_id: Option<i64>,
    year: Option<i32>,
    month: Option<i32>,
    page: &PageQuery,
) -> ServiceResult<Paginated<Payroll>> {
    let scope = ctx.scope_or(establishment_id);
    let (limit, offset) = page.limit_offset();
    let (rows, total) =
        repository::payroll::find_page(pool, scope, employee_id, year, month, limit, offset)
            .await?;
    Ok(Paginated::new(rows, page.page.max(1), limit, total))
}

/// Approve a draft or pending payroll, re-validated against fresh storage
/// state — never trusted from caller input.
pub async fn approve(pool: &SqlitePool, ctx: &ServiceContext, id: i64) -> ServiceResult<Payroll> {
    let payroll = load_with_access(pool, ctx, id).await?;
    guard_transition(payroll.status, PayrollStatus::Approved)?;
    Ok(repository::payroll::set_status(pool, id, PayrollStatus::Approved, None).await?)
}

/// Mark an approved payroll as paid, stamping the payment time.
pub async fn mark_paid(pool: &SqlitePool, ctx: &ServiceContext, id: i64) -> ServiceResult<Payroll> {
    let payroll = load_with_access(pool, ctx, id).await?;
    guard_transition(payroll.status, PayrollStatus::Paid)?;
    Ok(repository::payroll::set_status(pool, id, PayrollStatus::Paid, Some(now_millis())).await?)
}

pub async fn delete(pool: &SqlitePool, ctx: &ServiceContext, id: i64) -> ServiceResult<()> {
    let _ = load_with_access(pool, ctx, id).await?;
    repository::payroll::delete(pool, id).await?;
    Ok(())
}

/// Generate DRAFT payrolls for every active employee in scope, seeded from
/// each employee's current base salary. Employees that already have the
/// period are skipped, so a second run returns an empty list.
pub async fn generate_for_all(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    year: i32,
    month: i32,
    establishment_id: Option<i64>,
) -> ServiceResult<Vec<Payroll>> {
    validate_period(year, month)?;

    let scope = match establishment_id {
        Some(est) => {
            access::require_access(ctx, "establishment", est, est)?;
            Some(est)
        }
        None => ctx.scope(),
    };

    let employees = repository::employee::find_active(pool, scope).await?;
    let mut created = Vec::new();
    for employee in employees {
        let (gross, deductions, net) =
            compute_totals(employee.base_salary, &[], &[], &[], 0.0, 0.0);
        let ins = PayrollInsert {
            employee_id: employee.id,
            year,
            month,
            base_salary: employee.base_salary,
            allowances: &[],
            deductions: &[],
            bonuses: &[],
            overtime_hours: 0.0,
            overtime_rate: 0.0,
            gross_total: gross,
            deductions_total: deductions,
            net_total: net,
        };
        if let Some(payroll) = repository::payroll::create_if_absent(pool, &ins).await? {
            created.push(payroll);
        }
    }

    tracing::info!(
        year,
        month,
        scope = ?scope,
        created = created.len(),
        "payroll generation finished"
    );
    Ok(created)
}

/// Period aggregate across in-scope payrolls, rounded to 2 decimals.
pub async fn summary(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    year: i32,
    month: i32,
    establishment_id: Option<i64>,
) -> ServiceResult<PayrollSummary> {
    validate_period(year, month)?;
    let scope = ctx.scope_or(establishment_id);
    let (count, gross, deductions, net) =
        repository::payroll::period_totals(pool, scope, year, month).await?;

    let average_salary = if count > 0 { round2(gross / count as f64) } else { 0.0 };
    Ok(PayrollSummary {
        year,
        month,
        count,
        total_gross: round2(gross),
        total_deductions: round2(deductions),
        total_net: round2(net),
        average_salary,
    })
}

/// gross = base + allowances + bonuses + overtime; net = gross − deductions.
/// All three results carry 2-decimal rounding.
fn compute_totals(
    base_salary: f64,
    allowances: &[PayItem],
    deductions: &[PayItem],
    bonuses: &[PayItem],
    overtime_hours: f64,
    overtime_rate: f64,
) -> (f64, f64, f64) {
    let sum = |items: &[PayItem]| items.iter().map(|i| i.amount).sum::<f64>();
    let gross = round2(base_salary + sum(allowances) + sum(bonuses) + overtime_hours * overtime_rate);
    let deductions_total = round2(sum(deductions));
    let net = round2(gross - deductions_total);
    (gross, deductions_total, net)
}

fn validate_period(year: i32, month: i32) -> ServiceResult<()> {
    if !(1..=12).contains(&month) || !(2000..=2100).contains(&year) {
        return Err(ServiceError::domain_msg(
            ErrorCode::PayrollInvalidPeriod,
            format!("Invalid payroll period {year}-{month}"),
        ));
    }
    Ok(())
}

async fn load_with_access(
    pool: &SqlitePool,
    ctx: &ServiceContext,
    id: i64,
) -> ServiceResult<Payroll> {
    let payroll = repository::payroll::find_by_id(pool, id).await?.ok_or_else(|| {
        ServiceError::domain_msg(ErrorCode::PayrollNotFound, format!("Payroll {id} not found"))
    })?;
    let employee = repository::employee::find_by_id(pool, payroll.employee_id)
        .await?
        .ok_or_else(|| {
            ServiceError::domain_msg(
                ErrorCode::EmployeeNotFound,
                format!("Employee {} not found", payroll.employee_id),
            )
        })?;
    access::require_access(ctx, "payroll", id, employee.establishment_id)?;
    Ok(payroll)
}

fn guard_transition(current: PayrollStatus, next: PayrollStatus) -> ServiceResult<()> {
    if current.can_transition_to(next) {
        return Ok(());
    }
    Err(ServiceError::domain_msg(
        ErrorCode::PayrollInvalidTransition,
        format!("Cannot move payroll from {current:?} to {next:?}"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::services::test_support::{
        ctx_global, ctx_scoped, seed_employee, seed_employee_with_salary, seed_establishment,
    };

    fn payroll_payload(employee_id: i64, year: i32, month: i32) -> PayrollCreate {
        PayrollCreate {
            employee_id,
            year,
            month,
            base_salary: None,
            allowances: vec![],
            deductions: vec![],
            bonuses: vec![],
            overtime_hours: 0.0,
            overtime_rate: 0.0,
        }
    }

    #[test]
    fn test_compute_totals() {
        let allowances = [PayItem { label: "transport".into(), amount: 120.0 }];
        let deductions = [
            PayItem { label: "social security".into(), amount: 150.5 },
            PayItem { label: "income tax".into(), amount: 300.25 },
        ];
        let bonuses = [PayItem { label: "night shifts".into(), amount: 80.0 }];

        let (gross, ded, net) = compute_totals(2000.0, &allowances, &deductions, &bonuses, 10.0, 15.5);
        assert_eq!(gross, 2355.0); // 2000 + 120 + 80 + 155
        assert_eq!(ded, 450.75);
        assert_eq!(net, 1904.25);

        let (gross, ded, net) = compute_totals(1800.0, &[], &[], &[], 0.0, 0.0);
        assert_eq!((gross, ded, net), (1800.0, 0.0, 1800.0));
    }

    #[tokio::test]
    async fn test_create_defaults_from_employee_salary() {
        let pool = test_pool().await;
        let est = seed_establishment(&pool, "Mar Azul").await;
        let emp = seed_employee_with_salary(&pool, est, "ana@marazul.example", 2400.0).await;

        let payroll = create(&pool, &ctx_global(), payroll_payload(emp, 2025, 1))
            .await
            .unwrap();
        assert_eq!(payroll.base_salary, 2400.0);
        assert_eq!(payroll.gross_total, 2400.0);
        assert_eq!(payroll.net_total, 2400.0);
        assert_eq!(payroll.status, PayrollStatus::Draft);
        assert!(payroll.allowances.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_period_rejected() {
        let pool = test_pool().await;
        let est = seed_establishment(&pool, "Mar Azul").await;
        let emp = seed_employee(&pool, est, "ana@marazul.example").await;
        let ctx = ctx_global();

        create(&pool, &ctx, payroll_payload(emp, 2025, 1)).await.unwrap();
        let err = create(&pool, &ctx, payroll_payload(emp, 2025, 1)).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain { code: ErrorCode::PayrollPeriodExists, .. }
        ));

        // A different month is a different period
        create(&pool, &ctx, payroll_payload(emp, 2025, 2)).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_period_rejected() {
        let pool = test_pool().await;
        let est = seed_establishment(&pool, "Mar Azul").await;
        let emp = seed_employee(&pool, est, "ana@marazul.example").await;

        let err = create(&pool, &ctx_global(), payroll_payload(emp, 2025, 13))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain { code: ErrorCode::PayrollInvalidPeriod, .. }
        ));
    }

    #[tokio::test]
    async fn test_status_transitions() {
        let pool = test_pool().await;
        let est = seed_establishment(&pool, "Mar Azul").await;
        let emp = seed_employee(&pool, est, "ana@marazul.example").await;
        let ctx = ctx_global();

        let payroll = create(&pool, &ctx, payroll_payload(emp, 2025, 1)).await.unwrap();

        // DRAFT cannot be paid directly
        let err = mark_paid(&pool, &ctx, payroll.id).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain { code: ErrorCode::PayrollInvalidTransition, .. }
        ));

        let approved = approve(&pool, &ctx, payroll.id).await.unwrap();
        assert_eq!(approved.status, PayrollStatus::Approved);

        let paid = mark_paid(&pool, &ctx, payroll.id).await.unwrap();
        assert_eq!(paid.status, PayrollStatus::Paid);
        assert!(paid.paid_at.is_some());

        // PAID is terminal
        assert!(approve(&pool, &ctx, payroll.id).await.is_err());
    }

    #[tokio::test]
    async fn test_cross_establishment_create_denied() {
        let pool = test_pool().await;
        let est_a = seed_establishment(&pool, "Mar Azul").await;
        let est_b = seed_establishment(&pool, "Sierra Alta").await;
        let emp = seed_employee(&pool, est_a, "ana@marazul.example").await;

        let err = create(&pool, &ctx_scoped(est_b), payroll_payload(emp, 2025, 1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::CrossEstablishmentRelationship { .. }
        ));
    }

    #[tokio::test]
    async fn test_generate_for_all_skips_existing() {
        let pool = test_pool().await;
        let est = seed_establishment(&pool, "Mar Azul").await;
        seed_employee_with_salary(&pool, est, "ana@marazul.example", 2000.0).await;
        seed_employee_with_salary(&pool, est, "luis@marazul.example", 1800.0).await;
        let ctx = ctx_global();

        let first = generate_for_all(&pool, &ctx, 2025, 1, Some(est)).await.unwrap();
        assert_eq!(first.len(), 2);
        assert!(first.iter().all(|p| p.status == PayrollStatus::Draft));

        // Second run creates nothing for the same establishment and period
        let second = generate_for_all(&pool, &ctx, 2025, 1, Some(est)).await.unwrap();
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn test_generate_scoped_context_uses_own_establishment() {
        let pool = test_pool().await;
        let est_a = seed_establishment(&pool, "Mar Azul").await;
        let est_b = seed_establishment(&pool, "Sierra Alta").await;
        seed_employee(&pool, est_a, "ana@marazul.example").await;
        seed_employee(&pool, est_b, "luis@sierraalta.example").await;

        // No explicit establishment: scoped context generates for its own
        let created = generate_for_all(&pool, &ctx_scoped(est_a), 2025, 1, None)
            .await
            .unwrap();
        assert_eq!(created.len(), 1);

        // Naming a foreign establishment is denied outright
        let err = generate_for_all(&pool, &ctx_scoped(est_a), 2025, 1, Some(est_b))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::EstablishmentAccessDenied { .. }));
    }

    #[tokio::test]
    async fn test_summary_aggregates_and_rounds() {
        let pool = test_pool().await;
        let est = seed_establishment(&pool, "Mar Azul").await;
        let emp_a = seed_employee_with_salary(&pool, est, "ana@marazul.example", 2000.5).await;
        let emp_b = seed_employee_with_salary(&pool, est, "luis@marazul.example", 1800.25).await;
        let ctx = ctx_global();

        create(&pool, &ctx, payroll_payload(emp_a, 2025, 1)).await.unwrap();
        create(&pool, &ctx, payroll_payload(emp_b, 2025, 1)).await.unwrap();

        let s = summary(&pool, &ctx, 2025, 1, None).await.unwrap();
        assert_eq!(s.count, 2);
        assert_eq!(s.total_gross, 3800.75);
        assert_eq!(s.total_net, 3800.75);
        assert_eq!(s.total_deductions, 0.0);
        assert_eq!(s.average_salary, 1900.38);

        // Empty period yields zeroed summary, not a division by zero
        let s = summary(&pool, &ctx, 2025, 6, None).await.unwrap();
        assert_eq!(s.count, 0);
        assert_eq!(s.average_salary, 0.0);
    }
}
