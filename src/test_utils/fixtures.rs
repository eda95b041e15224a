use serde_json::{Value, json};
use time::macros::date;

use crate::{TransactionType, transaction::NewTransaction};

/// A groceries transaction owned by janedoe@email.com on 2020-01-03.
///
/// The caller is responsible for `amount` agreeing with `transaction_type`.
pub(crate) fn new_transaction(
    reference: &str,
    amount: i64,
    transaction_type: TransactionType,
) -> NewTransaction {
    NewTransaction {
        reference: reference.to_owned(),
        user_email: "janedoe@email.com".to_owned(),
        date: date!(2020 - 01 - 03),
        amount,
        transaction_type,
        category: "groceries".to_owned(),
    }
}

/// Five transactions for janedoe@email.com spread over two inflow and three
/// outflow categories.
pub(crate) fn janedoe_transactions() -> Vec<NewTransaction> {
    let transaction = |reference: &str, date, amount, transaction_type, category: &str| {
        NewTransaction {
            reference: reference.to_owned(),
            user_email: "janedoe@email.com".to_owned(),
            date,
            amount,
            transaction_type,
            category: category.to_owned(),
        }
    };

    vec![
        transaction("000051", date!(2020 - 01 - 03), -5113, TransactionType::Outflow, "groceries"),
        transaction("000052", date!(2020 - 01 - 10), 250072, TransactionType::Inflow, "salary"),
        transaction("000053", date!(2020 - 01 - 10), -15072, TransactionType::Outflow, "transfer"),
        transaction("000054", date!(2020 - 01 - 13), -56000, TransactionType::Outflow, "rent"),
        transaction("000055", date!(2020 - 01 - 10), 15072, TransactionType::Inflow, "savings"),
    ]
}

/// The JSON body for creating [new_transaction] with an amount of -51.13.
pub(crate) fn basic_payload(reference: &str) -> Value {
    json!({
        "user_email": "janedoe@email.com",
        "reference": reference,
        "date": "2020-01-03",
        "amount": "-51.13",
        "type": "outflow",
        "category": "groceries",
    })
}
