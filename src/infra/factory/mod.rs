//! Default account factory.

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{AccountFactory, AccountId, Credit, PositiveMoney};

/// Creates credits with time-ordered UUID v7 identifiers
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidAccountFactory;

impl UuidAccountFactory {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AccountFactory for UuidAccountFactory {
    fn new_credit(
        &self,
        account_id: AccountId,
        amount: PositiveMoney,
        transaction_date: DateTime<Utc>,
    ) -> Credit {
        let credit = Credit {
            id: Uuid::now_v7(),
            account_id,
            amount,
            transaction_date,
        };
        debug!(id = %credit.id, account = %account_id, "Credit created");
        credit
    }
}
