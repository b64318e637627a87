use serde_json::{Value, json};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_health_check() {
    let response = TestContext::new().server().get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_version() {
    let response = TestContext::new().server().get("/version").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], json!("tuition-api"));
    assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
}
