//! End-to-end workflows across the compliance escrow, the tax oracle and a
//! Stellar asset token.
//!
//! ## Coverage
//!
//! 1. **Deployment smoke check**: owner identity and the oracle query the
//!    deploy procedure runs against the fresh escrow.
//! 2. **Payroll lifecycle**: employer funding, owner disbursement, worker
//!    certification and withdrawal.
//! 3. **Employer penalties**: authority penalizes, status reads back.
//! 4. **Oracle interplay**: liabilities reported and paid down are visible
//!    through the escrow but never gate it.

#![cfg(test)]
#![allow(deprecated)]

use compliance_escrow::{EmployerStatus, EscrowError, Payout, Role};
use integration_tests::Deployment;
use soroban_sdk::{testutils::Events, vec, IntoVal, Symbol};

const PAYROLL_FUND: i128 = 10_0000000;
const SALARY: i128 = 5_0000000;

/// Topic symbol of the most recent event published by the escrow.
fn last_escrow_topic(d: &Deployment) -> Symbol {
    let events = d.env.events().all();
    let mut topic = None;
    for (id, topics, _) in events.iter() {
        if id == d.escrow_id {
            topic = Some(topics.get_unchecked(0));
        }
    }
    topic.expect("escrow published no event").into_val(&d.env)
}

// ============================================================================
// DEPLOYMENT
// ============================================================================

#[test]
fn test_deployment_sets_owner_and_oracle() {
    let d = Deployment::new();

    assert_eq!(d.escrow.owner(), d.owner);
    assert_eq!(d.escrow.tax_oracle(), Some(d.oracle_id.clone()));
    assert!(d.escrow.has_role(&d.authority, &Role::Authority));
    assert_eq!(d.escrow.get_balance(), 0);
}

#[test]
fn test_deployment_smoke_check_queries_oracle() {
    let d = Deployment::new();

    // Initial tax requirement for the freshly deployed escrow
    assert_eq!(d.escrow.get_tax_liability(&d.escrow_id), Some(0));
    assert_eq!(d.oracle.get_tax_amount(&d.escrow_id), 0);
}

// ============================================================================
// PAYROLL LIFECYCLE
// ============================================================================

#[test]
fn test_full_payroll_lifecycle() {
    let d = Deployment::new();
    let employer = d.address();
    let worker = d.address();
    let contractor = d.address();
    d.mint(&employer, PAYROLL_FUND * 2);

    // Step 1: employer funds the pool
    d.escrow.fund_payroll(&employer, &PAYROLL_FUND);
    assert_eq!(d.escrow.get_balance(), PAYROLL_FUND);
    assert_eq!(d.balance(&d.escrow_id), PAYROLL_FUND);

    // Step 2: owner disburses to a contractor
    d.escrow.process_payroll(&d.owner, &contractor, &SALARY);
    assert_eq!(
        last_escrow_topic(&d),
        Symbol::new(&d.env, "payroll_processed")
    );
    assert_eq!(d.escrow.get_balance(), PAYROLL_FUND - SALARY);
    assert_eq!(d.balance(&contractor), SALARY);

    // Step 3: uncertified worker is refused
    let result = d.escrow.try_withdraw(&worker, &SALARY);
    assert_eq!(result, Err(Ok(EscrowError::TaxComplianceFailed)));
    assert_eq!(d.escrow.get_balance(), PAYROLL_FUND - SALARY);

    // Step 4: authority certifies, worker withdraws the rest
    d.escrow.mark_tax_compliant(&d.authority, &worker);
    d.escrow.withdraw(&worker, &(PAYROLL_FUND - SALARY));
    assert_eq!(
        last_escrow_topic(&d),
        Symbol::new(&d.env, "withdrawal_processed")
    );
    assert_eq!(d.escrow.get_balance(), 0);
    assert_eq!(d.balance(&worker), PAYROLL_FUND - SALARY);

    // Step 5: the drained pool refuses further outflows
    let result = d.escrow.try_withdraw(&worker, &1);
    assert_eq!(result, Err(Ok(EscrowError::InsufficientFunds)));

    // Step 6: a new deposit refills it
    d.escrow.fund_payroll(&employer, &PAYROLL_FUND);
    d.escrow.withdraw(&worker, &1);
    assert_eq!(d.escrow.get_balance(), PAYROLL_FUND - 1);
}

#[test]
fn test_batch_run_then_withdrawals() {
    let d = Deployment::new();
    let employer = d.address();
    let workers = [d.address(), d.address(), d.address()];
    d.mint(&employer, PAYROLL_FUND);
    d.escrow.fund_payroll(&employer, &PAYROLL_FUND);

    let payouts = vec![
        &d.env,
        Payout {
            worker: workers[0].clone(),
            amount: 1_0000000,
        },
        Payout {
            worker: workers[1].clone(),
            amount: 2_0000000,
        },
    ];
    let total = d.escrow.process_batch_payroll(&d.owner, &payouts);
    assert_eq!(total, 3_0000000);

    d.escrow.mark_tax_compliant(&d.authority, &workers[2]);
    d.escrow.withdraw(&workers[2], &7_0000000);

    assert_eq!(d.escrow.get_balance(), 0);
    assert_eq!(d.balance(&workers[0]), 1_0000000);
    assert_eq!(d.balance(&workers[1]), 2_0000000);
    assert_eq!(d.balance(&workers[2]), 7_0000000);
    assert_eq!(d.balance(&d.escrow_id), 0);
}

#[test]
fn test_non_owner_cannot_process_payroll() {
    let d = Deployment::new();
    let employer = d.address();
    let worker = d.address();
    d.mint(&employer, PAYROLL_FUND);
    d.escrow.fund_payroll(&employer, &PAYROLL_FUND);

    for caller in [worker.clone(), employer.clone(), d.authority.clone()] {
        let result = d.escrow.try_process_payroll(&caller, &worker, &SALARY);
        assert_eq!(result, Err(Ok(EscrowError::Unauthorized)));
    }
    assert_eq!(d.escrow.get_balance(), PAYROLL_FUND);
}

// ============================================================================
// EMPLOYER PENALTIES
// ============================================================================

#[test]
fn test_authority_penalizes_employer() {
    let d = Deployment::new();
    let employer = d.address();
    d.mint(&employer, PAYROLL_FUND);
    d.escrow.fund_payroll(&employer, &PAYROLL_FUND);

    d.escrow.penalize_employer(&d.authority, &employer);

    assert_eq!(
        last_escrow_topic(&d),
        Symbol::new(&d.env, "employer_penalized")
    );
    assert_eq!(
        d.escrow.get_employer_status(&employer),
        EmployerStatus::Penalized
    );
    assert_eq!(d.escrow.get_employer_status(&employer).as_str(), "Penalized");
}

// ============================================================================
// ORACLE INTERPLAY
// ============================================================================

#[test]
fn test_oracle_liability_visible_through_escrow() {
    let d = Deployment::new();
    let employer = d.address();

    d.oracle.report_tax_amount(&d.tax_admin, &employer, &12_000);
    assert_eq!(d.escrow.get_tax_liability(&employer), Some(12_000));

    d.oracle.record_tax_payment(&d.tax_admin, &employer, &12_000);
    assert_eq!(d.escrow.get_tax_liability(&employer), Some(0));
}

#[test]
fn test_outstanding_liability_does_not_block_operations() {
    let d = Deployment::new();
    let employer = d.address();
    let worker = d.address();
    d.oracle.report_tax_amount(&d.tax_admin, &employer, &1_000_000);
    d.oracle.report_tax_amount(&d.tax_admin, &worker, &1_000_000);

    d.mint(&employer, PAYROLL_FUND);
    d.escrow.fund_payroll(&employer, &PAYROLL_FUND);
    d.escrow.process_payroll(&d.owner, &worker, &SALARY);
    d.escrow.mark_tax_compliant(&d.authority, &worker);
    d.escrow.withdraw(&worker, &SALARY);

    assert_eq!(d.escrow.get_balance(), 0);
    assert_eq!(d.balance(&worker), SALARY * 2);
}
