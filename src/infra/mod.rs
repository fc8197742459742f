//! Infrastructure layer implementations.

pub mod currency_policy;
pub mod factory;

pub use currency_policy::AllowListCurrencyExchange;
pub use factory::UuidAccountFactory;
