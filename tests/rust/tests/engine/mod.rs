//! Engine integration tests: file destination, wire shape, the shared
//! instance, and end-to-end redaction/serialization behavior.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tests::fixtures::{capture_logger, json_config};
use thiserror::Error;

use logweave_core::{
    init, LogFormat, LogLevel, Logger, LoggerConfig, LoggerError, Meta, RedactionRule, REDACTED,
};

#[derive(Debug, Error)]
#[error("connection refused")]
struct ConnectError;

#[derive(Debug, Error)]
#[error("query failed")]
struct QueryError {
    #[source]
    source: ConnectError,
}

#[test]
fn file_destination_receives_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs/app.log");

    let logger = Logger::new(
        json_config()
            .with_service("filetest")
            .with_file(&path),
    )
    .unwrap();

    logger.info("first", json!({"n": 1}));
    logger.error("second", json!({"n": 2}));
    logger.debug("dropped", ());

    let content = std::fs::read_to_string(&path).unwrap();
    let records: Vec<Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["message"], json!("first"));
    assert_eq!(records[0]["service"], json!("filetest"));
    assert_eq!(records[1]["level"], json!("error"));
    assert_eq!(records[1]["meta"]["n"], json!(2));
}

#[test]
fn file_destination_appends_across_engines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");

    Logger::new(json_config().with_file(&path))
        .unwrap()
        .info("first", ());
    Logger::new(json_config().with_file(&path))
        .unwrap()
        .info("second", ());

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn unwritable_file_path_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").unwrap();

    let result = Logger::new(json_config().with_file(blocker.join("app.log")));
    assert!(matches!(result, Err(LoggerError::OpenLogFile { .. })));
}

#[test]
fn wire_shape_round_trips() {
    let (logger, sink) = capture_logger(json_config().with_environment("production"));

    logger.warn(
        "strange payload: \"quotes\" and\nnewlines",
        json!({"userId": 7, "tags": ["a", "b"]}),
    );

    let record = &sink.records()[0];
    assert_eq!(record["timestamp"].as_str().map(|ts| ts.contains('T')), Some(true));
    assert_eq!(record["level"], json!("warn"));
    assert_eq!(
        record["message"],
        json!("strange payload: \"quotes\" and\nnewlines")
    );
    assert_eq!(record["service"], json!("test"));
    assert_eq!(record["environment"], json!("production"));
    assert_eq!(record["meta"], json!({"userId": 7, "tags": ["a", "b"]}));
    assert!(record.get("requestId").is_none());
}

#[test]
fn redaction_applies_to_emitted_record_only() {
    let (logger, sink) = capture_logger(
        json_config().with_redaction(vec![
            RedactionRule::exact("password"),
            RedactionRule::pattern("(?i)token$").unwrap(),
        ]),
    );

    logger.error(
        "Login failed",
        json!({"password": "secret", "authToken": {"nested": true}, "userId": 7}),
    );

    let meta = &sink.records()[0]["meta"];
    assert_eq!(meta["password"], json!(REDACTED));
    assert_eq!(meta["authToken"], json!(REDACTED));
    assert_eq!(meta["userId"], json!(7));
}

#[test]
fn nested_error_is_serialized_with_cause() {
    let (logger, sink) = capture_logger(json_config());

    logger.error(
        "query failed",
        Meta::map()
            .field("attempt", 2)
            .field("error", Meta::error(&QueryError { source: ConnectError })),
    );

    let meta = &sink.records()[0]["meta"];
    assert_eq!(meta["attempt"], json!(2));
    assert_eq!(meta["error"]["name"], json!("QueryError"));
    assert_eq!(meta["error"]["message"], json!("query failed"));
    assert_eq!(meta["error"]["cause"]["message"], json!("connection refused"));
    assert!(meta["error"].get("stack").is_none());
}

#[test]
fn anyhow_chain_is_serialized() {
    let (logger, sink) = capture_logger(json_config());
    let err = anyhow::Error::from(ConnectError).context("fetching profile");

    logger.error("profile load failed", Meta::from_anyhow(&err));

    let meta = &sink.records()[0]["meta"];
    assert_eq!(meta["message"], json!("fetching profile"));
    assert_eq!(meta["cause"]["message"], json!("connection refused"));
}

#[test]
fn scalar_and_sequence_meta_stay_mappings() {
    let (logger, sink) = capture_logger(json_config());

    logger.info("scalar", Meta::from("plain"));
    logger.info("sequence", json!([1, 2, 3]));

    let records = sink.records();
    assert_eq!(records[0]["meta"], json!({"value": "plain"}));
    assert_eq!(records[1]["meta"], json!({"items": [1, 2, 3]}));
}

#[test]
fn text_mode_produces_no_json_but_keeps_content() {
    let (logger, sink) = capture_logger(json_config().with_format(LogFormat::Text));

    logger.info("readable line", json!({"userId": 7}));

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(serde_json::from_str::<Value>(&lines[0]).is_err());
    assert!(lines[0].contains("readable line"));
    assert!(lines[0].contains("{\"userId\":7}"));
}

// The shared instance is process-wide, so everything about it lives in this
// single test: install once, observe the conflict on reinstall, and confirm
// the accessor hands back the installed engine.
#[test]
fn shared_instance_installs_once_and_rejects_reconfiguration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("global.log");

    init(
        LoggerConfig::new()
            .with_service("shared")
            .with_min_level(LogLevel::Info)
            .with_format(LogFormat::Json)
            .with_file(&path),
    )
    .unwrap();

    assert!(matches!(
        init(LoggerConfig::new()),
        Err(LoggerError::AlreadyInitialized)
    ));

    logweave_core::global().info("through the shared instance", ());

    let content = std::fs::read_to_string(&path).unwrap();
    let record: Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
    assert_eq!(record["service"], json!("shared"));
    assert_eq!(record["message"], json!("through the shared instance"));
}
