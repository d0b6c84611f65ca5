use super::domain::{Account, Card, ClientId, Installment, Loan, Payment};

/// Narrow read-only access to the bank's records. Implementations return raw
/// rows; all aggregation happens inside the engine. The provider must support
/// concurrent reads, and the engine never writes.
pub trait DataProvider: Send + Sync {
    fn client_ids(&self) -> Result<Vec<ClientId>, ProviderError>;
    fn accounts(&self, client_id: ClientId) -> Result<Vec<Account>, ProviderError>;
    fn cards(&self, account_number: &str) -> Result<Vec<Card>, ProviderError>;
    fn payments(&self, account_number: &str) -> Result<Vec<Payment>, ProviderError>;
    fn loans(&self, account_number: &str) -> Result<Vec<Loan>, ProviderError>;
    fn installments(&self, loan_id: u64) -> Result<Vec<Installment>, ProviderError>;
}

/// Error enumeration for data-provider failures.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("data provider unavailable: {0}")]
    Unavailable(String),
}

/// Immutable per-client snapshot of every record the engine consumes. Built
/// once per request and handed to the pure aggregation/scoring functions.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSnapshot {
    pub client_id: ClientId,
    pub accounts: Vec<Account>,
    pub cards: Vec<Card>,
    pub payments: Vec<Payment>,
    pub loans: Vec<Loan>,
    pub installments: Vec<Installment>,
}

impl ClientSnapshot {
    /// Fetch all rows for one client. Returns `None` when the client has no
    /// accounts, which callers surface as a not-found outcome.
    pub fn load<P: DataProvider + ?Sized>(
        provider: &P,
        client_id: ClientId,
    ) -> Result<Option<Self>, ProviderError> {
        let accounts = provider.accounts(client_id)?;
        if accounts.is_empty() {
            return Ok(None);
        }

        let mut cards = Vec::new();
        let mut payments = Vec::new();
        let mut loans = Vec::new();
        for account in &accounts {
            cards.extend(provider.cards(&account.account_number)?);
            payments.extend(provider.payments(&account.account_number)?);
            loans.extend(provider.loans(&account.account_number)?);
        }

        let mut installments = Vec::new();
        for loan in &loans {
            installments.extend(provider.installments(loan.id)?);
        }

        Ok(Some(Self {
            client_id,
            accounts,
            cards,
            payments,
            loans,
            installments,
        }))
    }
}
