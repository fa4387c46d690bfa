//! Performance benchmarks for the HR balance engine.
//!
//! This benchmark suite tracks the cost of the hot paths:
//! - Proration: pure function, called on every balance read
//! - Payroll breakdown: pure function, called per employee per run
//! - Leave transition cycle: create + approve under the ledger lock
//! - Payroll run over a 100-employee ledger
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use hrm_engine::calculation::{PayrollInput, calculate_payroll, prorate};
use hrm_engine::config::ConfigLoader;
use hrm_engine::ledger::HrEngine;
use hrm_engine::models::{ActorContext, Employee, EmployeeStatus, NewLeaveRequest, Role, SalaryInfo};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn load_engine() -> HrEngine {
    let config = ConfigLoader::load("./config/hr").expect("Failed to load config");
    HrEngine::new(config.into_config())
}

fn engine_with_employees(count: usize) -> HrEngine {
    let engine = load_engine();
    for i in 0..count {
        let id = format!("emp_{:04}", i);
        engine
            .register_employee(
                Employee {
                    id: id.clone(),
                    name: format!("Employee {}", i),
                    hire_date: Some(date(2020, 1, 6)),
                    date_of_birth: Some(date(1986, 2, 1)),
                    status: EmployeeStatus::Active,
                },
                date(2026, 1, 5),
            )
            .expect("register employee");
        engine
            .set_salary_info(SalaryInfo {
                employee_id: id,
                basic_salary: dec("3000"),
                allowances: dec("200"),
                cpf_applicable: true,
                cpf_employee_rate: None,
                cpf_employer_rate: None,
            })
            .expect("set salary");
    }
    engine
}

fn bench_prorate(c: &mut Criterion) {
    let annual = dec("14");
    let hire = Some(date(2026, 3, 10));
    let as_of = date(2026, 7, 20);

    c.bench_function("prorate_mid_year_hire", |b| {
        b.iter(|| prorate(black_box(annual), black_box(hire), black_box(as_of)))
    });
}

fn bench_calculate_payroll(c: &mut Criterion) {
    let config = ConfigLoader::load("./config/hr")
        .expect("Failed to load config")
        .into_config();
    let input = PayrollInput {
        basic_salary: dec("3000"),
        allowances: dec("200"),
        overtime: dec("150"),
        bonus: dec("1000"),
        other_deductions: dec("25"),
        date_of_birth: date(1986, 2, 1),
        cpf_applicable: true,
        cpf_employee_rate: None,
        cpf_employer_rate: None,
        ytd_ordinary_wage: Decimal::ZERO,
        income_tax_rate: None,
    };
    let as_of = date(2026, 8, 1);

    c.bench_function("calculate_payroll", |b| {
        b.iter(|| calculate_payroll(black_box(&input), black_box(as_of), config.cpf()))
    });
}

fn bench_leave_transition_cycle(c: &mut Criterion) {
    let owner = ActorContext::new("emp_0000", Role::Staff);
    let reviewer = ActorContext::new("hr_admin", Role::Hr);

    c.bench_function("leave_create_approve_cycle", |b| {
        b.iter_batched(
            || engine_with_employees(1),
            |engine| {
                let request = engine
                    .create_leave_request(
                        &owner,
                        NewLeaveRequest {
                            employee_id: "emp_0000".to_string(),
                            leave_type: "annual".to_string(),
                            start_date: date(2026, 3, 2),
                            end_date: date(2026, 3, 4),
                            days: None,
                            document: None,
                        },
                    )
                    .expect("create");
                engine.approve_leave(&reviewer, request.id).expect("approve")
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_payroll_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("payroll_run");
    group.throughput(Throughput::Elements(100));
    group.bench_function("100_employees", |b| {
        b.iter_batched(
            || engine_with_employees(100),
            |engine| {
                engine
                    .generate_payroll(3, 2026, date(2026, 3, 28), date(2026, 8, 1))
                    .expect("payroll run")
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_prorate,
    bench_calculate_payroll,
    bench_leave_transition_cycle,
    bench_payroll_run
);
criterion_main!(benches);
