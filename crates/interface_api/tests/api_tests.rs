//! End-to-end API tests
//!
//! Full HTTP round trips against the real router and a disposable
//! PostgreSQL container. Docker is required, so every test is ignored by
//! default; run them with `cargo test -p interface_api -- --ignored`.

use axum_test::TestServer;
use serde_json::{json, Value};

use interface_api::{config::ApiConfig, create_router};
use test_utils::TestDatabase;

async fn server() -> (TestDatabase, TestServer) {
    let db = TestDatabase::new().await.expect("failed to start postgres");
    let router = create_router(db.pool.clone(), ApiConfig::default());
    let server = TestServer::new(router).expect("failed to start test server");
    (db, server)
}

async fn create_fund(server: &TestServer, ticker: &str) -> Value {
    let response = server
        .post("/api/v1/carteira")
        .json(&json!({
            "name": format!("Fundo {}", ticker),
            "ticker": ticker,
            "type": "FII",
            "quoteValue": 100.0,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn create_fund_returns_created_snapshot() {
    let (_db, server) = server().await;

    let body = create_fund(&server, "XPML11").await;
    assert_eq!(body["ticker"], "XPML11");
    assert_eq!(body["type"], "FII");
    assert_eq!(body["quoteValue"], 100.0);
    assert_eq!(body["quantity"], 0.0);
    assert_eq!(body["amount"], 0.0);
    assert!(body["id"].is_string());
    // YYYY-MM-DD HH:MM:SS
    assert_eq!(body["createdAt"].as_str().unwrap().len(), 19);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn create_fund_validates_input() {
    let (_db, server) = server().await;

    // Missing field
    let response = server
        .post("/api/v1/carteira")
        .json(&json!({ "name": "Fundo", "type": "FII", "quoteValue": 10.0 }))
        .await;
    response.assert_status_bad_request();
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .contains("ticker"));

    // Non-positive quote value
    let response = server
        .post("/api/v1/carteira")
        .json(&json!({ "name": "Fundo", "ticker": "TCK", "type": "FII", "quoteValue": 0 }))
        .await;
    response.assert_status_bad_request();

    // Malformed body
    let response = server
        .post("/api/v1/carteira")
        .text("not json")
        .content_type("application/json")
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn duplicate_ticker_is_rejected() {
    let (_db, server) = server().await;

    create_fund(&server, "HGLG11").await;
    let response = server
        .post("/api/v1/carteira")
        .json(&json!({
            "name": "Outro Fundo",
            "ticker": "HGLG11",
            "type": "FII",
            "quoteValue": 55.0,
        }))
        .await;
    response.assert_status_bad_request();
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn movement_lifecycle_deposit_then_withdrawal() {
    let (_db, server) = server().await;

    let fund = create_fund(&server, "KNRI11").await;
    let fund_id = fund["id"].as_str().unwrap();

    let response = server
        .post("/api/v1/movimentacoes")
        .json(&json!({
            "carteira_id": fund_id,
            "tipo": "APORTE",
            "quantidade": 100.0,
            "valor": 1000.0,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["tipo"], "APORTE");
    assert_eq!(body["saldo_atual"]["quantidade_cotas"], 100.0);
    assert_eq!(body["saldo_atual"]["valor_investido"], 1000.0);

    // Withdraw 40 of 100 quotas: proportional redemption leaves 600
    let response = server
        .post("/api/v1/movimentacoes")
        .json(&json!({
            "carteira_id": fund_id,
            "tipo": "RESGATE",
            "quantidade": 40.0,
            "valor": 450.0,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["saldo_atual"]["quantidade_cotas"], 60.0);
    assert_eq!(body["saldo_atual"]["valor_investido"], 600.0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn movement_error_statuses() {
    let (_db, server) = server().await;

    let fund = create_fund(&server, "BTLG11").await;
    let fund_id = fund["id"].as_str().unwrap();

    // Unknown fund -> 404
    let response = server
        .post("/api/v1/movimentacoes")
        .json(&json!({
            "carteira_id": "00000000-0000-0000-0000-000000000001",
            "tipo": "APORTE",
            "quantidade": 1.0,
            "valor": 10.0,
        }))
        .await;
    response.assert_status_not_found();

    // Unknown kind -> 400
    let response = server
        .post("/api/v1/movimentacoes")
        .json(&json!({
            "carteira_id": fund_id,
            "tipo": "VENDA",
            "quantidade": 1.0,
            "valor": 10.0,
        }))
        .await;
    response.assert_status_bad_request();

    // Overdraw -> 400, no state change
    let response = server
        .post("/api/v1/movimentacoes")
        .json(&json!({
            "carteira_id": fund_id,
            "tipo": "RESGATE",
            "quantidade": 5.0,
            "valor": 10.0,
        }))
        .await;
    response.assert_status_bad_request();

    let summary = server.get("/api/v1/carteira").await.json::<Value>();
    assert_eq!(summary["portfolioSummary"]["invested"], 0.0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn portfolio_summary_reflects_ledger() {
    let (_db, server) = server().await;

    // Empty ledger first
    let response = server.get("/api/v1/carteira").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["portfolioSummary"]["invested"], 0.0);
    assert!(body["portfolio"].as_array().unwrap().is_empty());
    assert!(body["recentTransactions"].as_array().unwrap().is_empty());

    let zebra = create_fund(&server, "ZBR11").await;
    let alpha = create_fund(&server, "ALP11").await;
    for (fund, valor) in [(&zebra, 100.0), (&alpha, 250.0)] {
        server
            .post("/api/v1/movimentacoes")
            .json(&json!({
                "carteira_id": fund["id"],
                "tipo": "APORTE",
                "quantidade": 10.0,
                "valor": valor,
            }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }

    let body = server.get("/api/v1/carteira").await.json::<Value>();
    assert_eq!(body["portfolioSummary"]["invested"], 350.0);

    // Funds ordered by name ascending
    let portfolio = body["portfolio"].as_array().unwrap();
    assert_eq!(portfolio.len(), 2);
    assert_eq!(portfolio[0]["fundName"], "Fundo ALP11");
    assert_eq!(portfolio[1]["fundName"], "Fundo ZBR11");

    // Most recent movement first
    let recent = body["recentTransactions"].as_array().unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0]["fundName"], "Fundo ALP11");
    assert_eq!(recent[0]["type"], "APORTE");
    assert_eq!(recent[0]["amount"], 250.0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn health_endpoints() {
    let (_db, server) = server().await;

    server.get("/health").await.assert_status_ok();
    server.get("/health/ready").await.assert_status_ok();
}
