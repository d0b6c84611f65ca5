use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for bank clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Distinguishes domestic current accounts from foreign-currency accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    Current,
    Foreign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Inactive,
}

/// Tagged owner variant replacing the upstream personal/company account subtypes.
/// Behavior differences, where they exist, dispatch on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountOwnerType {
    Personal,
    Company,
}

impl AccountOwnerType {
    pub const fn label(self) -> &'static str {
        match self {
            AccountOwnerType::Personal => "personal",
            AccountOwnerType::Company => "company",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardType {
    Credit,
    Debit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardStatus {
    Active,
    Inactive,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    Approved,
    Rejected,
    PaidOff,
    Delinquent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallmentStatus {
    Paid,
    Unpaid,
    Late,
}

/// Loan products the bank offers; also used to tag existing loan records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanProduct {
    Premium,
    Personal,
    CreditCard,
    ForeignCurrency,
    Business,
}

impl LoanProduct {
    pub const fn label(self) -> &'static str {
        match self {
            LoanProduct::Premium => "PREMIUM",
            LoanProduct::Personal => "PERSONAL",
            LoanProduct::CreditCard => "CREDIT_CARD",
            LoanProduct::ForeignCurrency => "FOREIGN_CURRENCY",
            LoanProduct::Business => "BUSINESS",
        }
    }
}

/// Read-only account snapshot as supplied by the data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account_number: String,
    pub client_id: ClientId,
    pub balance: f64,
    pub creation_date: DateTime<Utc>,
    pub account_type: AccountType,
    pub owner_type: AccountOwnerType,
    pub status: AccountStatus,
}

impl Account {
    pub fn is_foreign(&self) -> bool {
        self.account_type == AccountType::Foreign
    }
}

/// Card snapshot tied to an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: u64,
    pub account_number: String,
    pub card_type: CardType,
    pub card_limit: f64,
    pub status: CardStatus,
}

/// Outgoing payment snapshot; the engine only consumes payments where the
/// client's account is the sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: u64,
    pub sender_account_number: String,
    pub amount: f64,
    pub status: PaymentStatus,
    pub date: DateTime<Utc>,
}

/// Loan snapshot tied to an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: u64,
    pub account_number: String,
    pub amount: f64,
    pub product: LoanProduct,
    pub status: LoanStatus,
    pub nominal_interest_rate: f64,
    pub effective_interest_rate: f64,
    pub repayment_period_months: u32,
}

/// Repayment installment belonging to a loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub id: u64,
    pub loan_id: u64,
    pub status: InstallmentStatus,
    pub due_date: NaiveDate,
}
