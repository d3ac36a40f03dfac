use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use finboard_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

struct TestApp {
    _dir: TempDir,
    router: Router,
}

async fn test_app(configure: impl FnOnce(&mut Config)) -> TestApp {
    let dir = tempdir().unwrap();
    let mut config = Config::for_database(dir.path().join("finboard.db").to_string_lossy());
    configure(&mut config);
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config),
        _dir: dir,
    }
}

impl TestApp {
    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn create_savings_account(&self, opening_balance: u64) -> i64 {
        let (status, account) = self
            .send(
                Method::POST,
                "/api/v1/accounts",
                Some(json!({
                    "name": "Savings",
                    "accountType": "SAVINGS",
                    "bankName": "HDFC Bank",
                    "openingBalance": opening_balance
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", account);
        account["id"].as_i64().unwrap()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn healthz_works() {
    let app = test_app(|_| {}).await;
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, health) = app.send(Method::GET, "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");
}

#[tokio::test(flavor = "multi_thread")]
async fn trades_and_transfers_keep_the_ledger_reconciled() {
    let app = test_app(|_| {}).await;
    let account_id = app.create_savings_account(1000).await;

    let (status, outcome) = app
        .send(
            Method::POST,
            "/api/v1/investments/buy",
            Some(json!({
                "assetClass": "STOCK",
                "symbol": "INFY",
                "venue": "NSE",
                "quantity": 10,
                "price": 50,
                "accountId": account_id,
                "transactionDate": "2024-03-01"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", outcome);

    let (status, error) = app
        .send(
            Method::POST,
            "/api/v1/transfers",
            Some(json!({
                "recipient": "Parents",
                "amount": 600,
                "accountId": account_id,
                "transferDate": "2024-03-02"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], 422);
    assert!(error["message"]
        .as_str()
        .unwrap()
        .contains("Insufficient funds"));

    let (status, transfers) = app.send(Method::GET, "/api/v1/transfers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(transfers.as_array().unwrap().len(), 0);

    let (status, reconciliation) = app
        .send(
            Method::GET,
            &format!("/api/v1/accounts/{}/reconciliation", account_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reconciliation["actualBalance"].as_f64(), Some(500.0));
    assert_eq!(reconciliation["entryCount"], 1);
    assert_eq!(reconciliation["isConsistent"], true);

    let (status, positions) = app
        .send(
            Method::GET,
            "/api/v1/investments/positions?assetClass=STOCK",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let positions = positions.as_array().unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0]["symbol"], "INFY");
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_input_and_missing_records_map_to_client_errors() {
    let app = test_app(|_| {}).await;

    let (status, error) = app
        .send(
            Method::POST,
            "/api/v1/accounts",
            Some(json!({"name": "  ", "accountType": "SAVINGS"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], 400);

    let (status, error) = app
        .send(Method::DELETE, "/api/v1/goals/does-not-exist", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], 404);

    let (status, _) = app.send(Method::GET, "/api/v1/export/crypto", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn disabled_asset_class_rejects_trades() {
    let app = test_app(|_| {}).await;
    let account_id = app.create_savings_account(10_000).await;

    let (status, settings) = app
        .send(
            Method::PUT,
            "/api/v1/settings",
            Some(json!({"bondsEnabled": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["bondsEnabled"], false);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/investments/buy",
            Some(json!({
                "assetClass": "BOND",
                "symbol": "IN0020230085",
                "quantity": 1,
                "price": 1000,
                "accountId": account_id,
                "transactionDate": "2024-03-01"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn export_renders_csv_attachment() {
    let app = test_app(|_| {}).await;
    app.create_savings_account(2500).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/export/accounts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"accounts.csv\""
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("id,name,accountType"));
    assert!(lines.next().unwrap().contains("Savings"));
}

#[tokio::test(flavor = "multi_thread")]
async fn requests_over_the_limit_are_rejected() {
    let app = test_app(|config| config.rate_limit_max = 2).await;

    for _ in 0..2 {
        let (status, _) = app.send(Method::GET, "/api/v1/settings", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, error) = app.send(Method::GET, "/api/v1/settings", None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(error["code"], 429);
}
