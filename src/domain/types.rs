//! Domain types with validation support.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::error::ValidationError;

/// Opaque handle to an existing account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for AccountId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to the account a credit is posted to.
///
/// Account resolution happens before the builder is involved; an unresolved
/// account is passed as [`AccountRef::Absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountRef {
    Existing(AccountId),
    #[default]
    Absent,
}

impl AccountRef {
    #[must_use]
    pub fn account_id(&self) -> Option<AccountId> {
        match self {
            Self::Existing(id) => Some(*id),
            Self::Absent => None,
        }
    }
}

impl From<Option<Uuid>> for AccountRef {
    fn from(id: Option<Uuid>) -> Self {
        id.map_or(Self::Absent, |id| Self::Existing(AccountId::new(id)))
    }
}

/// Supported currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    /// United States Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound
    GBP,
    /// Canadian Dollar
    CAD,
    /// Brazilian Real
    BRL,
    /// Swedish Krona
    SEK,
}

impl Currency {
    pub const ALL: [Currency; 6] = [
        Self::USD,
        Self::EUR,
        Self::GBP,
        Self::CAD,
        Self::BRL,
        Self::SEK,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::BRL => "BRL",
            Self::SEK => "SEK",
        }
    }

    /// Parse a currency code. Surrounding whitespace and letter case are ignored.
    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        let normalized = code.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|currency| currency.as_str() == normalized)
            .ok_or_else(|| ValidationError::InvalidCurrency(code.to_string()))
    }
}

impl std::str::FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A strictly positive amount of money in a given currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PositiveMoney {
    amount: Decimal,
    currency: Currency,
}

impl PositiveMoney {
    pub fn new(amount: Decimal, currency: Currency) -> Result<Self, ValidationError> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(amount.to_string()));
        }
        Ok(Self { amount, currency })
    }

    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }
}

impl std::fmt::Display for PositiveMoney {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// A credit transaction posted to an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credit {
    /// Unique identifier (UUID v7)
    pub id: Uuid,
    /// Account the credit is posted to
    pub account_id: AccountId,
    /// Credited amount
    pub amount: PositiveMoney,
    /// Moment the credit was assembled
    pub transaction_date: DateTime<Utc>,
}

impl Credit {
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.amount.currency()
    }
}

/// Result of building a credit.
///
/// `NoCredit` carries no reason on purpose; the builder's notification holds
/// the details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CreditOutcome {
    Created(Credit),
    NoCredit,
}

impl CreditOutcome {
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    #[must_use]
    pub fn credit(&self) -> Option<&Credit> {
        match self {
            Self::Created(credit) => Some(credit),
            Self::NoCredit => None,
        }
    }

    #[must_use]
    pub fn into_credit(self) -> Option<Credit> {
        match self {
            Self::Created(credit) => Some(credit),
            Self::NoCredit => None,
        }
    }
}

/// Request to credit an account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DepositRequest {
    /// Target account (absent when the caller could not resolve one)
    #[serde(default)]
    pub account_id: Option<Uuid>,
    /// Amount to credit
    pub amount: Decimal,
    /// ISO currency code
    #[validate(length(min = 1, max = 16, message = "Currency code must be 1-16 characters"))]
    pub currency: String,
}

impl DepositRequest {
    #[must_use]
    pub fn new(account_id: Option<Uuid>, amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            account_id,
            amount,
            currency: currency.into(),
        }
    }
}

/// Outcome of a deposit together with the validation messages collected for it
#[derive(Debug, Clone, Serialize)]
pub struct CreditReport {
    pub outcome: CreditOutcome,
    pub errors: Vec<String>,
}
