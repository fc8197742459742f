//! Validated credit transaction construction.
//!
//! A [`app::CreditBuilder`] collects an account handle, an amount with its
//! currency code and a timestamp, checks the currency against a
//! [`domain::CurrencyExchange`] policy and hands the result to a
//! [`domain::AccountFactory`]. It yields either a complete
//! [`domain::Credit`] or [`domain::CreditOutcome::NoCredit`].

pub mod app;
pub mod config;
pub mod domain;
pub mod infra;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
