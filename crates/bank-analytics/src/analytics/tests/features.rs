use chrono::Duration;

use super::common::*;
use crate::analytics::domain::{
    AccountType, CardType, ClientId, InstallmentStatus, LoanStatus, PaymentStatus,
};
use crate::analytics::features::aggregate;
use crate::analytics::provider::ClientSnapshot;

fn load(provider: &MemoryProvider, client: u64) -> ClientSnapshot {
    ClientSnapshot::load(provider, ClientId(client))
        .expect("provider available")
        .expect("client exists")
}

#[test]
fn aggregates_established_client() {
    let provider = established_provider();
    let features = aggregate(&load(&provider, 1), as_of());

    assert_eq!(features.client_id, ClientId(1));
    assert_eq!(features.balance, 15_000.0);
    assert_eq!(features.transaction_count, 60);
    assert_eq!(features.successful_transactions, 60);
    assert_eq!(features.failed_transactions, 0);
    assert_eq!(features.total_transaction_amount, 30_000.0);
    assert_eq!(features.avg_transaction_amount, 500.0);
    assert_eq!(features.transaction_success_rate, 1.0);
    assert_eq!(features.transaction_failure_rate, 0.0);
    assert_eq!(features.card_count, 1);
    assert_eq!(features.credit_cards, 1);
    assert_eq!(features.credit_card_ratio, 1.0);
    assert_eq!(features.days_active, 400);
    assert_eq!(features.activity_level, 60.0 / 400.0);
    assert!(!features.has_foreign_account);
    assert_eq!(features.product_count(), 1);

    // Payments land every six days: 0..=30 in the recent window,
    // 36..=90 in the previous one, all 60 inside the year.
    assert_eq!(features.recent_transactions, 6);
    assert_eq!(features.previous_transactions, 10);
    assert_eq!(features.yearly_successful_transactions, 60);
}

#[test]
fn missing_data_yields_zeroed_ratios() {
    let provider = MemoryProvider {
        accounts: vec![account(7, "RS-0007", 0.0, 100, AccountType::Current)],
        ..MemoryProvider::default()
    };
    let features = aggregate(&load(&provider, 7), as_of());

    assert_eq!(features.transaction_count, 0);
    assert_eq!(features.transaction_success_rate, 0.0);
    assert_eq!(features.transaction_failure_rate, 0.0);
    assert_eq!(features.avg_transaction_amount, 0.0);
    assert_eq!(features.credit_card_ratio, 0.0);
    assert_eq!(features.activity_level, 0.0);
    assert_eq!(features.days_active, 100);
    assert!(features.transaction_success_rate.is_finite());
}

#[test]
fn pending_and_cancelled_payments_count_toward_volume_only() {
    let mut provider = established_provider();
    provider
        .payments
        .push(payment(900, "RS-0001", 250.0, PaymentStatus::Pending, 3));
    provider
        .payments
        .push(payment(901, "RS-0001", 250.0, PaymentStatus::Cancelled, 4));

    let features = aggregate(&load(&provider, 1), as_of());
    assert_eq!(features.transaction_count, 62);
    assert_eq!(features.successful_transactions, 60);
    assert_eq!(features.failed_transactions, 0);
}

#[test]
fn activity_window_boundaries_are_inclusive() {
    let provider = MemoryProvider {
        accounts: vec![account(2, "RS-0002", 1_000.0, 500, AccountType::Current)],
        payments: vec![
            payment(1, "RS-0002", 10.0, PaymentStatus::Completed, 30),
            payment(2, "RS-0002", 10.0, PaymentStatus::Completed, 31),
            payment(3, "RS-0002", 10.0, PaymentStatus::Completed, 90),
            payment(4, "RS-0002", 10.0, PaymentStatus::Completed, 91),
            payment(5, "RS-0002", 10.0, PaymentStatus::Completed, 365),
            payment(6, "RS-0002", 10.0, PaymentStatus::Completed, 366),
        ],
        ..MemoryProvider::default()
    };
    let features = aggregate(&load(&provider, 2), as_of());

    assert_eq!(features.recent_transactions, 1);
    assert_eq!(features.previous_transactions, 2);
    assert_eq!(features.yearly_successful_transactions, 5);
    assert_eq!(features.transaction_count, 6);
}

#[test]
fn loans_and_installments_are_tallied_by_status() {
    let mut provider = established_provider();
    provider
        .loans
        .push(loan(10, "RS-0001", 12_000.0, LoanStatus::Approved));
    provider
        .loans
        .push(loan(11, "RS-0001", 6_000.0, LoanStatus::Delinquent));
    provider
        .loans
        .push(loan(12, "RS-0001", 3_000.0, LoanStatus::PaidOff));
    provider
        .loans
        .push(loan(13, "RS-0001", 9_000.0, LoanStatus::Rejected));
    provider
        .installments
        .push(installment(1, 10, InstallmentStatus::Paid));
    provider
        .installments
        .push(installment(2, 10, InstallmentStatus::Late));
    provider
        .installments
        .push(installment(3, 11, InstallmentStatus::Late));

    let features = aggregate(&load(&provider, 1), as_of());
    assert_eq!(features.loan_count, 4);
    assert_eq!(features.total_loan_amount, 30_000.0);
    assert_eq!(features.active_loans, 1);
    assert_eq!(features.delinquent_loans, 1);
    assert_eq!(features.paid_off_loans, 1);
    assert_eq!(features.late_installments, 2);
    assert_eq!(features.product_count(), 2);
}

#[test]
fn foreign_accounts_aggregate_across_holdings() {
    let provider = MemoryProvider {
        accounts: vec![
            account(3, "RS-0003", 2_000.0, 50, AccountType::Current),
            account(3, "FX-0003", 800.0, 20, AccountType::Foreign),
        ],
        cards: vec![card(1, "RS-0003", CardType::Debit)],
        ..MemoryProvider::default()
    };
    let features = aggregate(&load(&provider, 3), as_of());

    assert_eq!(features.balance, 2_800.0);
    assert_eq!(features.foreign_accounts, 1);
    assert!(features.has_foreign_account);
    // Tenure runs from the oldest account.
    assert_eq!(features.days_active, 50);
}

#[test]
fn account_created_after_as_of_keeps_tenure_at_zero() {
    let mut provider = MemoryProvider {
        accounts: vec![account(4, "RS-0004", 500.0, 0, AccountType::Current)],
        ..MemoryProvider::default()
    };
    provider.accounts[0].creation_date = as_of() + Duration::days(10);

    let features = aggregate(&load(&provider, 4), as_of());
    assert_eq!(features.days_active, 0);
    assert_eq!(features.activity_level, 0.0);
}
