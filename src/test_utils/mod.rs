//! Test doubles for the credit collaborators.

pub mod mocks;

pub use mocks::{MockAccountFactory, MockConfig, MockCurrencyExchange};
