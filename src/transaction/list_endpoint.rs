//! Defines the endpoint for listing transactions, optionally grouped.
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    Error,
    app_state::TransactionState,
    stores::{TransactionQuery, TransactionStore},
    summary::summary_by_type_per_user,
    transaction::TransactionResponse,
};

/// The query string accepted by [list_transactions_endpoint].
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// How to group the transactions. Only `"type"` is supported.
    pub group_by: Option<String>,
    /// Only list the transactions of this user. Ignored when grouping.
    pub user_email: Option<String>,
}

/// A route handler for listing transactions.
///
/// Without `group_by` every transaction is listed in the order it was stored,
/// optionally only those of `user_email`.
/// With `group_by=type` the inflow and outflow totals of each user are listed
/// instead. Any other grouping responds with 501 Not Implemented.
pub async fn list_transactions_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Query(query): Query<ListQuery>,
) -> Result<Response, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let store = state.transaction_store;

    match query.group_by.as_deref() {
        None | Some("") => {
            let transactions: Vec<TransactionResponse> = store
                .get_query(TransactionQuery {
                    user_email: query.user_email.filter(|email| !email.is_empty()),
                })?
                .iter()
                .map(TransactionResponse::from)
                .collect();

            Ok(Json(transactions).into_response())
        }
        Some("type") => Ok(Json(summary_by_type_per_user(&store)?).into_response()),
        Some(other) => Ok((
            StatusCode::NOT_IMPLEMENTED,
            Json(json!({ "detail": format!("grouping by \"{other}\" is not implemented") })),
        )
            .into_response()),
    }
}

#[cfg(test)]
mod list_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        TransactionType, endpoints,
        stores::TransactionStore,
        test_utils::{get_test_server, janedoe_transactions, new_transaction},
        transaction::NewTransaction,
    };

    #[tokio::test]
    async fn lists_transactions_in_insertion_order() {
        let (mut state, server) = get_test_server();
        state
            .transaction_store
            .create_many(janedoe_transactions())
            .unwrap();

        let response = server.get(endpoints::TRANSACTIONS_API).await;

        response.assert_status_ok();
        let body: Value = response.json();
        let references: Vec<&str> = body
            .as_array()
            .expect("want a JSON list")
            .iter()
            .filter_map(|transaction| transaction["reference"].as_str())
            .collect();
        assert_eq!(
            references,
            vec!["000051", "000052", "000053", "000054", "000055"]
        );
        assert_eq!(body[0]["amount"], json!("-51.13"));
    }

    #[tokio::test]
    async fn empty_group_by_lists_transactions() {
        let (mut state, server) = get_test_server();
        state
            .transaction_store
            .create_many(janedoe_transactions())
            .unwrap();

        let response = server
            .get(endpoints::TRANSACTIONS_API)
            .add_query_param("group_by", "")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body.as_array().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn groups_by_type() {
        let (mut state, server) = get_test_server();
        state
            .transaction_store
            .create_many(janedoe_transactions())
            .unwrap();

        let response = server
            .get(endpoints::TRANSACTIONS_API)
            .add_query_param("group_by", "type")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([{
            "user_email": "janedoe@email.com",
            "total_inflow": "2651.44",
            "total_outflow": "-761.85",
        }]));
    }

    #[tokio::test]
    async fn unknown_grouping_is_not_implemented() {
        let (_, server) = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS_API)
            .add_query_param("group_by", "category")
            .await;

        response.assert_status(StatusCode::NOT_IMPLEMENTED);
        response.assert_json(&json!({
            "detail": "grouping by \"category\" is not implemented"
        }));
    }

    #[tokio::test]
    async fn lists_one_users_transactions() {
        let (mut state, server) = get_test_server();
        state
            .transaction_store
            .create_many(janedoe_transactions())
            .unwrap();
        state
            .transaction_store
            .create(NewTransaction {
                user_email: "johndoe@email.com".to_owned(),
                ..new_transaction("000099", 1000, TransactionType::Inflow)
            })
            .unwrap();

        let response = server
            .get(endpoints::TRANSACTIONS_API)
            .add_query_param("user_email", "johndoe@email.com")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([{
            "user_email": "johndoe@email.com",
            "reference": "000099",
            "date": "2020-01-03",
            "amount": "10.00",
            "type": "inflow",
            "category": "groceries",
        }]));
    }
}
