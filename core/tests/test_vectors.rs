//! Run raw requests from `test-vectors/routes.json` through the handler.
//!
//! Each case pushes its `setup` values onto a fresh in-memory stack, sends
//! the raw request text, and compares the status and the body parsed as JSON.

use stack_core::{Handler, MemoryStore, StackConnection, StackStore};

#[tokio::test]
async fn route_test_vectors() {
    let raw = include_str!("../../test-vectors/routes.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let store = MemoryStore::new();
        let mut conn = store.connect().await.unwrap();
        for value in case["setup"].as_array().unwrap() {
            conn.push(value.as_i64().unwrap() as i32).await.unwrap();
        }
        drop(conn);

        let handler = Handler::new(store);
        let response = handler.handle(case["request"].as_str().unwrap().as_bytes()).await;

        assert_eq!(
            u64::from(response.status),
            case["expected_status"].as_u64().unwrap(),
            "{name}: status"
        );
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body, case["expected_body"], "{name}: body");
    }
}
