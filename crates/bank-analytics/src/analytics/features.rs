use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{CardType, ClientId, InstallmentStatus, LoanStatus, PaymentStatus};
use super::provider::ClientSnapshot;

/// Fixed-shape numeric summary of one client's financial behavior.
///
/// Every field is always populated: missing source data maps to `0`/`false`
/// and every derived ratio guards its denominator, so downstream arithmetic
/// is total: no field is ever null, NaN, or infinite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientFeatureVector {
    pub client_id: ClientId,

    // Balances and payment activity.
    pub balance: f64,
    pub transaction_count: u32,
    pub total_transaction_amount: f64,
    pub avg_transaction_amount: f64,
    pub successful_transactions: u32,
    pub failed_transactions: u32,

    // Product holdings.
    pub card_count: u32,
    pub credit_cards: u32,
    pub debit_cards: u32,
    pub foreign_accounts: u32,
    pub has_foreign_account: bool,

    // Loan book.
    pub loan_count: u32,
    pub total_loan_amount: f64,
    pub active_loans: u32,
    pub delinquent_loans: u32,
    pub paid_off_loans: u32,
    pub late_installments: u32,

    // Tenure.
    pub first_activity: Option<DateTime<Utc>>,
    pub days_active: i64,

    // Derived ratios (all zero-guarded).
    pub transaction_success_rate: f64,
    pub transaction_failure_rate: f64,
    pub credit_card_ratio: f64,
    pub activity_level: f64,

    // Rolling activity windows used by the churn model.
    pub recent_transactions: u32,
    pub previous_transactions: u32,
    pub yearly_successful_transactions: u32,
}

impl ClientFeatureVector {
    /// All-zero vector for a client with no records at all.
    pub fn empty(client_id: ClientId) -> Self {
        Self {
            client_id,
            balance: 0.0,
            transaction_count: 0,
            total_transaction_amount: 0.0,
            avg_transaction_amount: 0.0,
            successful_transactions: 0,
            failed_transactions: 0,
            card_count: 0,
            credit_cards: 0,
            debit_cards: 0,
            foreign_accounts: 0,
            has_foreign_account: false,
            loan_count: 0,
            total_loan_amount: 0.0,
            active_loans: 0,
            delinquent_loans: 0,
            paid_off_loans: 0,
            late_installments: 0,
            first_activity: None,
            days_active: 0,
            transaction_success_rate: 0.0,
            transaction_failure_rate: 0.0,
            credit_card_ratio: 0.0,
            activity_level: 0.0,
            recent_transactions: 0,
            previous_transactions: 0,
            yearly_successful_transactions: 0,
        }
    }

    /// Count of product relationships the churn model treats as engagement.
    pub fn product_count(&self) -> u32 {
        self.card_count + self.active_loans + self.foreign_accounts
    }
}

/// Divide, substituting `0` for an empty denominator.
pub(crate) fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Aggregate one client's snapshot into a feature vector, evaluated at
/// `as_of`. Pure read-and-transform; never fails.
pub fn aggregate(snapshot: &ClientSnapshot, as_of: DateTime<Utc>) -> ClientFeatureVector {
    let mut features = ClientFeatureVector::empty(snapshot.client_id);

    let thirty_days_ago = as_of - Duration::days(30);
    let ninety_days_ago = as_of - Duration::days(90);
    let one_year_ago = as_of - Duration::days(365);

    for account in &snapshot.accounts {
        features.balance += account.balance;
        if account.is_foreign() {
            features.foreign_accounts += 1;
        }
        features.first_activity = match features.first_activity {
            Some(existing) if existing <= account.creation_date => Some(existing),
            _ => Some(account.creation_date),
        };
    }
    features.has_foreign_account = features.foreign_accounts > 0;

    for payment in &snapshot.payments {
        features.transaction_count += 1;
        features.total_transaction_amount += payment.amount;
        match payment.status {
            PaymentStatus::Completed => features.successful_transactions += 1,
            PaymentStatus::Failed => features.failed_transactions += 1,
            PaymentStatus::Pending | PaymentStatus::Cancelled => {}
        }
        if payment.date >= thirty_days_ago {
            features.recent_transactions += 1;
        } else if payment.date >= ninety_days_ago {
            features.previous_transactions += 1;
        }
        if payment.date >= one_year_ago && payment.status == PaymentStatus::Completed {
            features.yearly_successful_transactions += 1;
        }
    }

    for card in &snapshot.cards {
        features.card_count += 1;
        match card.card_type {
            CardType::Credit => features.credit_cards += 1,
            CardType::Debit => features.debit_cards += 1,
        }
    }

    for loan in &snapshot.loans {
        features.loan_count += 1;
        features.total_loan_amount += loan.amount;
        match loan.status {
            LoanStatus::Approved => features.active_loans += 1,
            LoanStatus::Delinquent => features.delinquent_loans += 1,
            LoanStatus::PaidOff => features.paid_off_loans += 1,
            LoanStatus::Rejected => {}
        }
    }

    for installment in &snapshot.installments {
        if installment.status == InstallmentStatus::Late {
            features.late_installments += 1;
        }
    }

    // Whole days since first activity; accounts created after `as_of` count
    // as zero so tenure-driven ratios stay total.
    features.days_active = features
        .first_activity
        .map(|first| (as_of - first).num_days().max(0))
        .unwrap_or(0);

    let transactions = f64::from(features.transaction_count);
    features.transaction_success_rate =
        ratio_or_zero(f64::from(features.successful_transactions), transactions);
    features.transaction_failure_rate =
        ratio_or_zero(f64::from(features.failed_transactions), transactions);
    features.credit_card_ratio = ratio_or_zero(
        f64::from(features.credit_cards),
        f64::from(features.card_count),
    );
    features.avg_transaction_amount =
        ratio_or_zero(features.total_transaction_amount, transactions);
    features.activity_level = ratio_or_zero(transactions, features.days_active as f64);

    features
}
