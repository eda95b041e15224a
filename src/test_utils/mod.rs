#![allow(missing_docs)]

pub(crate) mod fixtures;
pub(crate) mod http;

pub(crate) use fixtures::{basic_payload, janedoe_transactions, new_transaction};
pub(crate) use http::{assert_content_type, get_test_server, read_json_body};
