//! Funding operations against a mock hub20 server.

use funding_client::{FundingClient, PaymentOrder, SessionError, Token, TransferOptions};
use hub20_session::Session;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> FundingClient<Session> {
    let session = Session::new(mock_server.uri())
        .unwrap()
        .with_token("test-token");
    FundingClient::new(session)
}

#[tokio::test]
async fn test_create_and_read_payment_order() {
    let mock_server = MockServer::start().await;

    let order = json!({
        "url": format!("{}/api/payment/orders/order-1", mock_server.uri()),
        "id": "order-1",
        "amount": "100",
        "token": "0xABC",
        "created": "2021-05-01T12:00:00Z",
        "status": "open",
        "routes": [],
        "payments": []
    });

    Mock::given(method("POST"))
        .and(path("/api/payment/orders"))
        .and(header("Authorization", "Token test-token"))
        .and(body_json(json!({"amount": 100, "token": "0xABC"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(&order))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/payment/orders/order-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&order))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let token = Token::new("0xABC");

    let created = client.create_payment_order(&token, 100u64).await.unwrap();
    assert_eq!(created, order);

    let fetched = client.get_payment_order("order-1").await.unwrap();
    let fetched = PaymentOrder::from_response(fetched).unwrap();
    assert_eq!(fetched.id, "order-1");
    assert_eq!(fetched.status.as_deref(), Some("open"));
}

#[tokio::test]
async fn test_cancel_payment_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/payment/orders/order-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client.cancel_payment_order("order-1").await.unwrap();
    assert!(result.is_null());
}

#[tokio::test]
async fn test_get_missing_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/payment/orders/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client.get_payment_order("nope").await;
    assert!(matches!(result, Err(SessionError::NotFound { .. })));
}

#[tokio::test]
async fn test_schedule_external_transfer_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/transfers"))
        .and(body_json(json!({
            "amount": 999,
            "token": "0xABC",
            "address": "0xDEST",
            "memo": "refund"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "amount": "999",
            "token": "0xABC",
            "memo": "refund",
            "status": "scheduled",
            "target": "0xDEST"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let options = TransferOptions::new().memo("refund").with("amount", 999);

    let result = client
        .schedule_external_transfer(&Token::new("0xABC"), 5u64, "0xDEST", &options)
        .await
        .unwrap();
    assert_eq!(result["status"], "scheduled");
}

#[tokio::test]
async fn test_transfer_rejected_by_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/transfers"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(r#"{"non_field_errors":["Insufficient balance"]}"#),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client
        .schedule_external_transfer(
            &Token::new("0xABC"),
            5u64,
            "0xDEST",
            &TransferOptions::new(),
        )
        .await;

    match result {
        Err(SessionError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert!(message.contains("Insufficient balance"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
