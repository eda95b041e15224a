//! Transaction management for the cash flow service.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the JSON shapes it is sent and received as
//! - Validation of client payloads into `NewTransaction`s
//! - Route handlers for creating, listing and retrieving transactions

mod core;
mod create;
mod create_endpoint;
mod get_endpoint;
mod list_endpoint;
mod validation;

pub use core::{NewTransaction, Transaction, TransactionResponse};
pub use create::{create_many, create_one};
pub use create_endpoint::create_transactions_endpoint;
pub use get_endpoint::get_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
pub use validation::{FieldError, FieldValue, TransactionPayload, ValidationError};
