//! Record Store Client Tests
//!
//! Exercises the HTTP record store against a local mock server.

use nftlend_api::config::StoreConfig;
use nftlend_api::{HttpRecordStore, RecordStore};
use nftlend_error::StoreError;
use nftlend_types::{AccountAddress, ActionKind, LoanStatus};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> HttpRecordStore {
    let config = StoreConfig {
        base_url: format!("{}/api", server.uri()),
        request_timeout_ms: 2_000,
    };
    HttpRecordStore::new(&config).unwrap()
}

fn lender() -> AccountAddress {
    AccountAddress::parse("0xa11ce").unwrap()
}

fn loan_doc(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "forListing": { "token_icon": "", "token_name": "Aptos Monkey #12" },
        "forAddress": "0xb0b",
        "address": "0xa11ce",
        "apr": 12,
        "duration": 30,
        "amount": 5,
        "coin": "0x1::aptos_coin::AptosCoin",
        "offer_obj": "0x0ffe",
        "borrow_obj": "0xb0440",
        "start_timestamp": 1700000000,
        "status": status
    })
}

#[tokio::test]
async fn test_list_loans_sends_address_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/lend"))
        .and(query_param("address", "0xa11ce"))
        .and(query_param("status", "borrowed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [loan_doc("loan-1", "borrowed"), loan_doc("loan-2", "borrowed")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let loans = store_for(&server)
        .list_loans(&lender(), LoanStatus::Borrowed)
        .await
        .unwrap();

    assert_eq!(loans.len(), 2);
    assert_eq!(loans[0].id, "loan-1");
    assert_eq!(loans[1].status, LoanStatus::Borrowed);
}

#[tokio::test]
async fn test_list_previous_loans() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/lend/previous"))
        .and(query_param("address", "0xa11ce"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [loan_doc("loan-9", "repaid")]
        })))
        .mount(&server)
        .await;

    let loans = store_for(&server).list_previous_loans(&lender()).await.unwrap();
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0].status, LoanStatus::Repaid);
}

#[tokio::test]
async fn test_record_grab_puts_address() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/lend/grab/loan-1"))
        .and(body_json(json!({ "address": "0xa11ce" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Loan updated"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = store_for(&server)
        .record_action(ActionKind::Grab, "loan-1", &lender())
        .await
        .unwrap();
    assert_eq!(ack.message.as_deref(), Some("Loan updated"));
}

#[tokio::test]
async fn test_record_withdraw_accepts_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/lend/withdraw/offer-7"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let ack = store_for(&server)
        .record_action(ActionKind::Withdraw, "offer-7", &lender())
        .await
        .unwrap();
    assert!(ack.message.is_none());
}

#[tokio::test]
async fn test_rejection_keeps_store_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/lend/grab/loan-1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "Already grabbed"
        })))
        .mount(&server)
        .await;

    let err = store_for(&server)
        .record_action(ActionKind::Grab, "loan-1", &lender())
        .await
        .unwrap_err();

    assert_eq!(err.store_message(), Some("Already grabbed"));
    assert!(matches!(err, StoreError::Rejected { status: 400, .. }));
}

#[tokio::test]
async fn test_failure_flag_on_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/lend/withdraw/offer-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Offer already taken"
        })))
        .mount(&server)
        .await;

    let err = store_for(&server)
        .record_action(ActionKind::Withdraw, "offer-7", &lender())
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::rejected(200, Some("Offer already taken".to_string())));
}

#[tokio::test]
async fn test_rejection_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = store_for(&server)
        .record_action(ActionKind::Grab, "loan-1", &lender())
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::rejected(500, None));
    assert!(err.store_message().is_none());
}

#[tokio::test]
async fn test_unreachable_store() {
    // Nothing listens on the discard port
    let config = StoreConfig {
        base_url: "http://127.0.0.1:9/api".to_string(),
        request_timeout_ms: 500,
    };
    let store = HttpRecordStore::new(&config).unwrap();

    let err = store.list_previous_loans(&lender()).await.unwrap_err();
    assert!(matches!(err, StoreError::Unreachable(_)));
}

#[tokio::test]
async fn test_find_loan_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/lend"))
        .and(query_param("status", "offered"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [loan_doc("offer-1", "offered"), loan_doc("offer-2", "offered")]
        })))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let loan = store
        .find_loan(&lender(), LoanStatus::Offered, "offer-2")
        .await
        .unwrap();
    assert_eq!(loan.id, "offer-2");

    let err = store
        .find_loan(&lender(), LoanStatus::Offered, "offer-3")
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::NotFound("offer-3".to_string()));
}
