//! Domain layer containing core business types, traits, and error definitions.

pub mod error;
pub mod notification;
pub mod traits;
pub mod types;

pub use error::{AppError, ConfigError, ExternalServiceError, ValidationError};
pub use notification::Notification;
pub use traits::{AccountFactory, CurrencyExchange};
pub use types::{
    AccountId, AccountRef, Credit, CreditOutcome, CreditReport, Currency, DepositRequest,
    PositiveMoney,
};
