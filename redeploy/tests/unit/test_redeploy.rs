//! End-to-end redeploy tests against the mock Portainer API

use std::collections::HashMap;

use axum::http::StatusCode;
use serde_json::json;

use stack_redeploy::app::options::AppOptions;
use stack_redeploy::app::run::{report, run};
use stack_redeploy::profile::schema::Variant;

use crate::mock_portainer::{MockPortainer, BRANCH, TOKEN};

fn stratum_env(mock: &MockPortainer) -> HashMap<String, String> {
    let mut env = mock.connection_env();
    for (key, value) in [
        ("STRATUM_STACK_ID", "12"),
        ("STRATUM_ENDPOINT_ID", "3"),
        ("CLICKHOUSE_URL", "http://clickhouse:8123"),
        ("CLICKHOUSE_USER", "stratum"),
        ("CLICKHOUSE_PASSWORD", "hunter2"),
        ("NEXUS_URL", "http://nexus:8081"),
        ("REDROCK_API_URL", "https://redrock.example"),
    ] {
        env.insert(key.to_string(), value.to_string());
    }
    env
}

fn options(variant: Variant) -> AppOptions {
    AppOptions {
        variant,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_redeploy_success() {
    let mock = MockPortainer::start(StatusCode::OK, "{}").await;
    let env = stratum_env(&mock);

    let mut out = Vec::new();
    let result = run(&options(Variant::Stratum), &env, &mut out).await;
    assert_eq!(report(&result, &mut out, &mut std::io::sink()), 0);
    assert!(out.is_empty());

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.stack_id, "12");
    assert_eq!(call.query.get("endpointId").map(String::as_str), Some("3"));
    assert_eq!(call.api_key.as_deref(), Some(TOKEN));
    assert_eq!(call.content_type.as_deref(), Some("application/json"));
    assert_eq!(
        call.body,
        json!({
            "env": [
                {"name": "CLICKHOUSE_URL", "value": "http://clickhouse:8123"},
                {"name": "CLICKHOUSE_USER", "value": "stratum"},
                {"name": "CLICKHOUSE_PASSWORD", "value": "hunter2"},
                {"name": "NEXUS_URL", "value": "http://nexus:8081"},
                {"name": "REDROCK_API_URL", "value": "https://redrock.example"},
                {"name": "REDROCK_API_KEY", "value": null}
            ],
            "prune": false,
            "pullImage": true,
            "repositoryAuthentication": false,
            "repositoryReferenceName": format!("refs/heads/{}", BRANCH)
        })
    );
}

#[tokio::test]
async fn test_redeploy_rejected_prints_body() {
    let mock = MockPortainer::start(StatusCode::INTERNAL_SERVER_ERROR, "internal error").await;
    let env = stratum_env(&mock);

    let mut out = Vec::new();
    let result = run(&options(Variant::Stratum), &env, &mut out).await;
    assert_eq!(report(&result, &mut out, &mut std::io::sink()), 2);
    assert_eq!(String::from_utf8(out).unwrap(), "internal error\n");
    assert_eq!(mock.calls().len(), 1);
}

#[tokio::test]
async fn test_only_200_counts_as_success() {
    let mock = MockPortainer::start(StatusCode::NO_CONTENT, "").await;
    let env = stratum_env(&mock);

    let mut out = Vec::new();
    let result = run(&options(Variant::Stratum), &env, &mut out).await;
    assert_eq!(report(&result, &mut out, &mut std::io::sink()), 2);
}

#[tokio::test]
async fn test_invalid_chain_makes_no_call() {
    let mock = MockPortainer::start(StatusCode::OK, "{}").await;

    for selector in ["regtest", ""] {
        let mut env = mock.connection_env();
        env.insert("NODE_CHAIN".to_string(), selector.to_string());
        env.insert("MAINNET_STACK_ID".to_string(), "1".to_string());
        env.insert("MAINNET_ENDPOINT_ID".to_string(), "1".to_string());

        let mut out = Vec::new();
        let result = run(&options(Variant::Chain), &env, &mut out).await;
        assert_eq!(report(&result, &mut out, &mut std::io::sink()), 1);
        assert!(!out.is_empty());
    }

    let env = mock.connection_env();
    let mut out = Vec::new();
    let result = run(&options(Variant::Chain), &env, &mut out).await;
    assert_eq!(report(&result, &mut out, &mut std::io::sink()), 1);

    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_chain_redeploy_targets_chain_stack() {
    let mock = MockPortainer::start(StatusCode::OK, "{}").await;
    let mut env = mock.connection_env();
    for (key, value) in [
        ("NODE_CHAIN", "pooltest"),
        ("POOLTEST_STACK_ID", "31"),
        ("POOLTEST_ENDPOINT_ID", "9"),
        ("POOLTEST_NODE_PORT", "18332"),
        ("POOLTEST_POOL_PORT", "34254"),
        ("TESTNET_STACK_ID", "32"),
        ("TESTNET_NODE_PORT", "48332"),
    ] {
        env.insert(key.to_string(), value.to_string());
    }

    let mut out = Vec::new();
    let result = run(&options(Variant::Chain), &env, &mut out).await;
    assert_eq!(report(&result, &mut out, &mut std::io::sink()), 0);

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].stack_id, "31");
    assert_eq!(calls[0].query.get("endpointId").map(String::as_str), Some("9"));

    let entries = calls[0].body["env"].as_array().unwrap();
    let value_of = |name: &str| {
        entries
            .iter()
            .find(|entry| entry["name"] == name)
            .map(|entry| entry["value"].clone())
            .unwrap()
    };
    assert_eq!(value_of("NODE_PORT"), json!("18332"));
    assert_eq!(value_of("POOL_PORT"), json!("34254"));
    assert_eq!(value_of("NODE_KEY"), json!(null));
    assert_eq!(value_of("NODE_CHAIN"), json!("pooltest"));
}

#[tokio::test]
async fn test_dry_run_makes_no_call() {
    let mock = MockPortainer::start(StatusCode::OK, "{}").await;
    let env = stratum_env(&mock);

    let options = AppOptions {
        dry_run: true,
        ..Default::default()
    };
    let mut out = Vec::new();
    let result = run(&options, &env, &mut out).await;
    assert_eq!(report(&result, &mut out, &mut std::io::sink()), 0);

    let printed = String::from_utf8(out).unwrap();
    let url = format!(
        "PUT http://{}:{}/api/stacks/12/git/redeploy?endpointId=3",
        mock.addr.ip(),
        mock.addr.port()
    );
    assert!(printed.starts_with(&url));
    assert!(printed.contains("X-API-Key: [REDACTED]"));
    assert!(!printed.contains(TOKEN));
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_unreachable_portainer_is_a_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut env = HashMap::new();
    for (key, value) in [
        ("PORTAINER_HOST", "127.0.0.1".to_string()),
        ("PORTAINER_PORT", port.to_string()),
        ("PORTAINER_TOKEN", TOKEN.to_string()),
        ("STRATUM_BRANCH", BRANCH.to_string()),
        ("STACK_ID", "1".to_string()),
        ("ENDPOINT_ID", "1".to_string()),
    ] {
        env.insert(key.to_string(), value);
    }

    let mut out = Vec::new();
    let mut err_out = Vec::new();
    let result = run(&options(Variant::Basic), &env, &mut out).await;
    assert_eq!(report(&result, &mut out, &mut err_out), 3);
    assert!(out.is_empty());
    assert!(String::from_utf8(err_out)
        .unwrap()
        .starts_with("Redeploy failed: HTTP error"));
}
