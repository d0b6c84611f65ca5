use bank_analytics::analytics::{
    Account, AccountOwnerType, AccountStatus, AccountType, Card, CardStatus, CardType, ClientId,
    DataProvider, Installment, InstallmentStatus, Loan, LoanProduct, LoanStatus, Payment,
    PaymentStatus, ProviderError,
};
use chrono::{Duration, NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read-only provider over in-process record vectors. Stands in for the
/// core banking integration during demos and local development.
#[derive(Default, Clone)]
pub(crate) struct InMemoryDataProvider {
    pub(crate) accounts: Vec<Account>,
    pub(crate) cards: Vec<Card>,
    pub(crate) payments: Vec<Payment>,
    pub(crate) loans: Vec<Loan>,
    pub(crate) installments: Vec<Installment>,
}

impl DataProvider for InMemoryDataProvider {
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

struct PortfolioBuilder {
    provider: InMemoryDataProvider,
    next_payment_id: u64,
}

impl PortfolioBuilder {
    fn account(
        &mut self,
        client: u64,
        number: &str,
        balance: f64,
        opened_days_ago: i64,
        account_type: AccountType,
        owner_type: AccountOwnerType,
    ) {
        self.provider.accounts.push(Account {
            account_number: number.to_string(),
            client_id: ClientId(client),
            balance,
            creation_date: Utc::now() - Duration::days(opened_days_ago),
            account_type,
            owner_type,
            status: AccountStatus::Active,
        });
    }

    fn card(&mut self, id: u64, number: &str, card_type: CardType) {
        self.provider.cards.push(Card {
            id,
            account_number: number.to_string(),
            card_type,
            card_limit: 5_000.0,
            status: CardStatus::Active,
        });
    }

    /// `count` payments of `amount`, spaced `gap_days` apart starting at
    /// `first_days_ago`. Every fifth payment fails.
    fn payments(
        &mut self,
        number: &str,
        count: u64,
        amount: f64,
        first_days_ago: i64,
        gap_days: i64,
    ) {
        for i in 0..count {
            let status = if i % 5 == 4 {
                PaymentStatus::Failed
            } else {
                PaymentStatus::Completed
            };
            self.provider.payments.push(Payment {
                id: self.next_payment_id,
                sender_account_number: number.to_string(),
                amount,
                status,
                date: Utc::now() - Duration::days(first_days_ago + (i as i64) * gap_days),
            });
            self.next_payment_id += 1;
        }
    }

    fn loan(&mut self, id: u64, number: &str, amount: f64, status: LoanStatus) {
        self.provider.loans.push(Loan {
            id,
            account_number: number.to_string(),
            amount,
            product: LoanProduct::Personal,
            status,
            nominal_interest_rate: 5.5,
            effective_interest_rate: 5.9,
            repayment_period_months: 36,
        });
    }

    fn installments(&mut self, loan_id: u64, paid: u64, late: u64) {
        let base = loan_id * 100;
        for i in 0..paid + late {
            let status = if i < paid {
                InstallmentStatus::Paid
            } else {
                InstallmentStatus::Late
            };
            self.provider.installments.push(Installment {
                id: base + i,
                loan_id,
                status,
                due_date: NaiveDate::from_ymd_opt(2025, 1, 1)
                    .map(|d| d + chrono::Days::new(i * 30))
                    .unwrap_or(NaiveDate::MIN),
            });
        }
    }
}

/// Eight clients spanning the behaviors the models are built to separate:
/// affluent, steady, brand new, dormant, delinquent, corporate, and two
/// mid-tier profiles.
pub(crate) fn demo_provider() -> InMemoryDataProvider {
    let mut b = PortfolioBuilder {
        provider: InMemoryDataProvider::default(),
        next_payment_id: 1,
    };

    // 1: affluent, long tenure, international footprint.
    b.account(
        1,
        "RS-1001",
        42_000.0,
        900,
        AccountType::Current,
        AccountOwnerType::Personal,
    );
    b.account(
        1,
        "FX-1001",
        6_500.0,
        500,
        AccountType::Foreign,
        AccountOwnerType::Personal,
    );
    b.card(1, "RS-1001", CardType::Credit);
    b.card(2, "RS-1001", CardType::Debit);
    b.payments("RS-1001", 90, 850.0, 2, 4);

    // 2: steady saver.
    b.account(
        2,
        "RS-1002",
        8_000.0,
        600,
        AccountType::Current,
        AccountOwnerType::Personal,
    );
    b.card(3, "RS-1002", CardType::Debit);
    b.payments("RS-1002", 30, 220.0, 5, 12);

    // 3: opened three weeks ago.
    b.account(
        3,
        "RS-1003",
        1_200.0,
        21,
        AccountType::Current,
        AccountOwnerType::Personal,
    );
    b.payments("RS-1003", 4, 95.0, 2, 5);

    // 4: dormant, balance drained, last payment months back.
    b.account(
        4,
        "RS-1004",
        60.0,
        800,
        AccountType::Current,
        AccountOwnerType::Personal,
    );
    b.payments("RS-1004", 10, 140.0, 150, 15);

    // 5: borrower behind on repayments.
    b.account(
        5,
        "RS-1005",
        3_200.0,
        700,
        AccountType::Current,
        AccountOwnerType::Personal,
    );
    b.card(4, "RS-1005", CardType::Credit);
    b.payments("RS-1005", 25, 310.0, 3, 10);
    b.loan(1, "RS-1005", 15_000.0, LoanStatus::Delinquent);
    b.installments(1, 6, 3);

    // 6: corporate account with heavy outgoing volume.
    b.account(
        6,
        "RS-1006",
        27_000.0,
        1_100,
        AccountType::Current,
        AccountOwnerType::Company,
    );
    b.card(5, "RS-1006", CardType::Credit);
    b.payments("RS-1006", 120, 1_900.0, 1, 3);
    b.loan(2, "RS-1006", 60_000.0, LoanStatus::Approved);
    b.installments(2, 12, 0);

    // 7: mid-tier with a paid-off loan.
    b.account(
        7,
        "RS-1007",
        5_400.0,
        450,
        AccountType::Current,
        AccountOwnerType::Personal,
    );
    b.card(6, "RS-1007", CardType::Debit);
    b.payments("RS-1007", 20, 180.0, 7, 14);
    b.loan(3, "RS-1007", 8_000.0, LoanStatus::PaidOff);
    b.installments(3, 24, 0);

    // 8: foreign-currency specialist, modest domestic activity.
    b.account(
        8,
        "RS-1008",
        2_100.0,
        380,
        AccountType::Current,
        AccountOwnerType::Personal,
    );
    b.account(
        8,
        "FX-1008",
        9_400.0,
        380,
        AccountType::Foreign,
        AccountOwnerType::Personal,
    );
    b.payments("FX-1008", 15, 640.0, 10, 20);

    b.provider
}
