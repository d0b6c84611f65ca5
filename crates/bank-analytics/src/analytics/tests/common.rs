use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::analytics::domain::{
    Account, AccountOwnerType, AccountStatus, AccountType, Card, CardStatus, CardType, ClientId,
    Installment, InstallmentStatus, Loan, LoanProduct, LoanStatus, Payment, PaymentStatus,
};
use crate::analytics::features::ClientFeatureVector;
use crate::analytics::provider::{DataProvider, ProviderError};
use crate::analytics::service::AnalyticsService;

/// Fixed evaluation instant shared by every fixture.
pub(super) fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0)
        .single()
        .expect("valid fixture instant")
}

pub(super) fn account(
    client: u64,
    number: &str,
    balance: f64,
    opened_days_ago: i64,
    account_type: AccountType,
) -> Account {
    Account {
        account_number: number.to_string(),
        client_id: ClientId(client),
        balance,
        creation_date: as_of() - Duration::days(opened_days_ago),
        account_type,
        owner_type: AccountOwnerType::Personal,
        status: AccountStatus::Active,
    }
}

pub(super) fn payment(
    id: u64,
    account_number: &str,
    amount: f64,
    status: PaymentStatus,
    days_ago: i64,
) -> Payment {
    Payment {
        id,
        sender_account_number: account_number.to_string(),
        amount,
        status,
        date: as_of() - Duration::days(days_ago),
    }
}

pub(super) fn card(id: u64, account_number: &str, card_type: CardType) -> Card {
    Card {
        id,
        account_number: account_number.to_string(),
        card_type,
        card_limit: 5_000.0,
        status: CardStatus::Active,
    }
}

pub(super) fn loan(
    id: u64,
    account_number: &str,
    amount: f64,
    status: LoanStatus,
) -> Loan {
    Loan {
        id,
        account_number: account_number.to_string(),
        amount,
        product: LoanProduct::Personal,
        status,
        nominal_interest_rate: 5.5,
        effective_interest_rate: 5.9,
        repayment_period_months: 36,
    }
}

pub(super) fn installment(id: u64, loan_id: u64, status: InstallmentStatus) -> Installment {
    Installment {
        id,
        loan_id,
        status,
        due_date: NaiveDate::from_ymd_opt(2025, 5, 1).expect("valid due date"),
    }
}

/// Feature vector with every field zeroed, for direct model tests.
pub(super) fn base_features(client: u64) -> ClientFeatureVector {
    ClientFeatureVector::empty(ClientId(client))
}

/// In-memory provider over plain vectors, filtered per call.
#[derive(Default, Clone)]
pub(super) struct MemoryProvider {
    pub(super) accounts: Vec<Account>,
    pub(super) cards: Vec<Card>,
    pub(super) payments: Vec<Payment>,
    pub(super) loans: Vec<Loan>,
    pub(super) installments: Vec<Installment>,
}

impl DataProvider for MemoryProvider {
    fn client_ids(&self) -> Result<Vec<ClientId>, ProviderError> {
        let mut ids: Vec<ClientId> = self.accounts.iter().map(|a| a.client_id).collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    fn accounts(&self, client_id: ClientId) -> Result<Vec<Account>, ProviderError> {
        Ok(self
            .accounts
            .iter()
            .filter(|a| a.client_id == client_id)
            .cloned()
            .collect())
    }

    fn cards(&self, account_number: &str) -> Result<Vec<Card>, ProviderError> {
        Ok(self
            .cards
            .iter()
            .filter(|c| c.account_number == account_number)
            .cloned()
            .collect())
    }

    fn payments(&self, account_number: &str) -> Result<Vec<Payment>, ProviderError> {
        Ok(self
            .payments
            .iter()
            .filter(|p| p.sender_account_number == account_number)
            .cloned()
            .collect())
    }

    fn loans(&self, account_number: &str) -> Result<Vec<Loan>, ProviderError> {
        Ok(self
            .loans
            .iter()
            .filter(|l| l.account_number == account_number)
            .cloned()
            .collect())
    }

    fn installments(&self, loan_id: u64) -> Result<Vec<Installment>, ProviderError> {
        Ok(self
            .installments
            .iter()
            .filter(|i| i.loan_id == loan_id)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableProvider;

impl DataProvider for UnavailableProvider {
    fn client_ids(&self) -> Result<Vec<ClientId>, ProviderError> {
        Err(ProviderError::Unavailable("storage offline".to_string()))
    }

    fn accounts(&self, _client_id: ClientId) -> Result<Vec<Account>, ProviderError> {
        Err(ProviderError::Unavailable("storage offline".to_string()))
    }

    fn cards(&self, _account_number: &str) -> Result<Vec<Card>, ProviderError> {
        Err(ProviderError::Unavailable("storage offline".to_string()))
    }

    fn payments(&self, _account_number: &str) -> Result<Vec<Payment>, ProviderError> {
        Err(ProviderError::Unavailable("storage offline".to_string()))
    }

    fn loans(&self, _account_number: &str) -> Result<Vec<Loan>, ProviderError> {
        Err(ProviderError::Unavailable("storage offline".to_string()))
    }

    fn installments(&self, _loan_id: u64) -> Result<Vec<Installment>, ProviderError> {
        Err(ProviderError::Unavailable("storage offline".to_string()))
    }
}

/// One established retail client: healthy balance, a regular payment
/// history, one credit card, and a 400-day-old account.
pub(super) fn established_provider() -> MemoryProvider {
    let mut provider = MemoryProvider {
        accounts: vec![account(1, "RS-0001", 15_000.0, 400, AccountType::Current)],
        cards: vec![card(1, "RS-0001", CardType::Credit)],
        ..MemoryProvider::default()
    };
    // 60 completed payments of 500, one every six days.
    for i in 0..60u64 {
        provider.payments.push(payment(
            i + 1,
            "RS-0001",
            500.0,
            PaymentStatus::Completed,
            (i as i64) * 6,
        ));
    }
    provider
}

/// Twelve clients with spread-out balances and activity for clustering.
pub(super) fn population_provider() -> MemoryProvider {
    let mut provider = MemoryProvider::default();
    for i in 0..12u64 {
        let number = format!("RS-{:04}", 100 + i);
        let account_type = if i % 4 == 0 {
            AccountType::Foreign
        } else {
            AccountType::Current
        };
        provider.accounts.push(account(
            100 + i,
            &number,
            500.0 + (i as f64) * 7_500.0,
            60 + (i as i64) * 30,
            account_type,
        ));
        if i % 2 == 0 {
            provider
                .cards
                .push(card(100 + i, &number, CardType::Credit));
        }
        for j in 0..(3 + i * 4) {
            let status = if j % 5 == 4 {
                PaymentStatus::Failed
            } else {
                PaymentStatus::Completed
            };
            provider.payments.push(payment(
                1_000 * (i + 1) + j,
                &number,
                100.0 + (j as f64) * 25.0,
                status,
                (j as i64 * 7) % 300,
            ));
        }
    }
    provider
}

pub(super) fn service<P: DataProvider>(provider: P) -> AnalyticsService<P> {
    AnalyticsService::new(Arc::new(provider))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
