//! Application layer containing the credit builder and the deposit workflow.

pub mod credit_builder;
pub mod service;
pub mod stream;

pub use credit_builder::CreditBuilder;
pub use service::CreditService;
pub use stream::{parse_request_line, process_requests};
