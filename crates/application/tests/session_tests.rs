use ferrous_doh_application::services::{ProviderStatus, SubmitOutcome};
use ferrous_doh_domain::{DomainError, RecordType, HISTORY_LIMIT};
use serde_json::json;
use std::time::Duration;

mod helpers;
use helpers::{example_answer, Fixture, MockReply};

// ============================================================================
// Tests: submission
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_submit_publishes_results_and_prepends_history() {
    // Arrange
    let fx = Fixture::initialized().await;
    fx.client.set_reply("google", MockReply::ok(120, example_answer())).await;
    fx.client.set_reply("cloudflare", MockReply::status(80, 500)).await;

    // Act
    let outcome = fx.session.submit("  example.com ", RecordType::A).await;

    // Assert
    let results = match outcome {
        SubmitOutcome::Published(results) => results,
        other => panic!("expected published results, got {other:?}"),
    };
    assert_eq!(results.get("google").unwrap().took, 120);
    assert_eq!(results.get("cloudflare").unwrap().took, 80);
    assert_eq!(fx.session.results().await, results);
    assert!(fx.session.loading().await.is_empty());

    let history = fx.session.history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].query, "example.com");
    assert_eq!(history[0].record_type, RecordType::A);

    // Persisted under the derived key
    let key = fx.session.history_key().unwrap();
    let raw = fx.store.raw(key.as_str()).await.unwrap();
    let persisted: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted[0]["query"], json!("example.com"));
    assert_eq!(persisted[0]["type"], json!("A"));
}

#[tokio::test]
async fn test_blank_hostname_is_a_no_op() {
    let fx = Fixture::initialized().await;
    fx.session.submit("example.com", RecordType::A).await;
    let results_before = fx.session.results().await;

    assert_eq!(fx.session.submit("", RecordType::A).await, SubmitOutcome::Ignored);
    assert_eq!(fx.session.submit("   \t", RecordType::MX).await, SubmitOutcome::Ignored);

    assert_eq!(fx.session.results().await, results_before);
    assert_eq!(fx.session.history().await.len(), 1);
    assert_eq!(fx.client.calls().await.len(), 2);
}

#[tokio::test]
async fn test_history_is_capped_and_newest_first() {
    let fx = Fixture::initialized().await;

    for i in 0..(HISTORY_LIMIT + 5) {
        fx.session
            .submit(&format!("host{i}.example.com"), RecordType::A)
            .await;
    }

    let history = fx.session.history().await;
    assert_eq!(history.len(), HISTORY_LIMIT);
    assert_eq!(history[0].query, format!("host{}.example.com", HISTORY_LIMIT + 4));
}

#[tokio::test(start_paused = true)]
async fn test_late_batch_is_discarded_after_newer_submission() {
    let fx = Fixture::initialized().await;
    fx.client
        .set_reply_for("google", "slow.example.com", MockReply::ok(500, json!({"from": "slow"})))
        .await;
    fx.client
        .set_reply_for("cloudflare", "slow.example.com", MockReply::ok(500, json!({"from": "slow"})))
        .await;
    fx.client
        .set_reply_for("google", "fast.example.com", MockReply::ok(10, json!({"from": "fast"})))
        .await;
    fx.client
        .set_reply_for("cloudflare", "fast.example.com", MockReply::ok(10, json!({"from": "fast"})))
        .await;

    let slow_session = fx.session.clone();
    let slow = tokio::spawn(async move {
        slow_session.submit("slow.example.com", RecordType::A).await
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    let fast = fx.session.submit("fast.example.com", RecordType::A).await;
    assert!(matches!(fast, SubmitOutcome::Published(_)));

    let slow = slow.await.unwrap();
    assert_eq!(slow, SubmitOutcome::Superseded { generation: 1 });

    // The newer batch's results survive the late arrival
    let results = fx.session.results().await;
    assert_eq!(
        results.get("google").unwrap().json(),
        Some(&json!({"from": "fast"}))
    );
    assert!(fx.session.loading().await.is_empty());

    // Both lookups ran, so both are in history; the slow one settled last
    let history = fx.session.history().await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].query, "slow.example.com");
}

#[tokio::test(start_paused = true)]
async fn test_provider_status_transitions() {
    let fx = Fixture::initialized().await;
    fx.client.set_reply("google", MockReply::ok(100, example_answer())).await;
    fx.client.set_reply("cloudflare", MockReply::status(100, 502)).await;

    assert_eq!(fx.session.status("google").await, ProviderStatus::Idle);

    let session = fx.session.clone();
    let handle = tokio::spawn(async move { session.submit("example.com", RecordType::A).await });
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(fx.session.status("google").await, ProviderStatus::Loading);
    assert_eq!(fx.session.status("cloudflare").await, ProviderStatus::Loading);
    assert_eq!(fx.session.loading().await.len(), 2);
    assert!(fx.session.results().await.is_empty());

    handle.await.unwrap();

    assert_eq!(fx.session.status("google").await, ProviderStatus::Success);
    assert_eq!(
        fx.session.status("cloudflare").await,
        ProviderStatus::Error("HTTP 502".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_clear_results_drops_in_flight_batch() {
    let fx = Fixture::initialized().await;
    fx.client.set_reply("google", MockReply::ok(100, example_answer())).await;

    let session = fx.session.clone();
    let handle = tokio::spawn(async move { session.submit("example.com", RecordType::A).await });
    tokio::time::sleep(Duration::from_millis(10)).await;

    fx.session.clear_results().await;

    assert!(matches!(handle.await.unwrap(), SubmitOutcome::Superseded { .. }));
    assert!(fx.session.results().await.is_empty());
    assert_eq!(fx.session.status("google").await, ProviderStatus::Idle);
    assert_eq!(fx.session.history().await.len(), 1);
}

// ============================================================================
// Tests: export
// ============================================================================

#[tokio::test]
async fn test_export_without_results_signals_nothing_to_export() {
    let fx = Fixture::initialized().await;

    let err = fx.session.export().await.unwrap_err();

    assert_eq!(err, DomainError::NothingToExport);
    assert!(fx.sink.saved().await.is_empty());
}

#[tokio::test]
async fn test_export_writes_pretty_result_map() {
    let fx = Fixture::initialized().await;
    fx.client.set_reply("cloudflare", MockReply::status(0, 500)).await;
    fx.session.submit("example.com", RecordType::A).await;

    let location = fx.session.export().await.unwrap();

    let saved = fx.sink.saved().await;
    assert_eq!(saved.len(), 1);
    assert!(location.ends_with(&saved[0].file_name));
    assert!(saved[0].file_name.starts_with("dns-results-"));
    assert!(saved[0].file_name.ends_with(".json"));

    let v: serde_json::Value = serde_json::from_str(&saved[0].contents).unwrap();
    assert_eq!(v["cloudflare"]["ok"], json!(false));
    assert_eq!(v["google"]["ok"], json!(true));
}

// ============================================================================
// Tests: history while key derivation is pending
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_history_write_waits_for_key_derivation() {
    // IP lookup takes 2s, so the first query settles before the key exists
    let fx = Fixture::with_parts(
        helpers::MockPublicIp::returning("198.51.100.7").with_delay(2_000),
        helpers::MemoryCookieJar::new(),
    );
    let init = fx.session.start();

    fx.session.submit("early.example.com", RecordType::A).await;
    let derived = init.await.unwrap();

    // Nothing landed under the default key
    assert!(fx.store.raw("dns_history").await.is_none());

    let history = fx.session.history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].query, "early.example.com");
    assert!(fx.store.raw(derived.key.as_str()).await.is_some());
}

#[tokio::test(start_paused = true)]
async fn test_history_falls_back_to_default_key_when_derivation_stalls() {
    let fx = Fixture::new();

    // Derivation is never started
    fx.session.submit("example.com", RecordType::A).await;

    assert_eq!(fx.session.history_key().unwrap().as_str(), "dns_history");
    assert!(fx.store.raw("dns_history").await.is_some());
}

#[tokio::test]
async fn test_initialize_loads_previously_persisted_history() {
    let fx = Fixture::initialized().await;
    fx.session.submit("first.example.com", RecordType::TXT).await;
    let token = fx.session.identity().await.unwrap().token;

    // New session sharing storage and cookies
    let fx2 = Fixture::with_parts(
        helpers::MockPublicIp::returning("203.0.113.9"),
        fx.cookies.clone(),
    );
    for key in fx.store.keys().await {
        fx2.store.put_raw(&key, &fx.store.raw(&key).await.unwrap()).await;
    }
    let derived = fx2.session.initialize().await;

    assert_eq!(derived.token, token);
    let history = fx2.session.history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].query, "first.example.com");
}

#[tokio::test]
async fn test_storage_failures_degrade_to_memory_only() {
    let fx = Fixture::initialized().await;
    fx.store.set_should_fail(true).await;

    fx.session.submit("example.com", RecordType::A).await;

    assert_eq!(fx.session.history().await.len(), 1);
    fx.store.set_should_fail(false).await;
    assert!(fx.store.keys().await.is_empty());
}

#[tokio::test]
async fn test_delete_history_entry() {
    let fx = Fixture::initialized().await;
    fx.session.submit("a.example.com", RecordType::A).await;
    fx.session.submit("b.example.com", RecordType::A).await;

    let removed = fx.session.delete_history_entry(1).await.unwrap();
    assert_eq!(removed.query, "a.example.com");

    let history = fx.session.history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].query, "b.example.com");

    assert_eq!(
        fx.session.delete_history_entry(5).await.unwrap_err(),
        DomainError::HistoryEntryNotFound(5)
    );
}

#[tokio::test]
async fn test_notes_are_session_only() {
    let fx = Fixture::initialized().await;
    fx.session.set_notes("checking propagation").await;
    assert_eq!(fx.session.notes().await, "checking propagation");
    assert!(fx.store.keys().await.iter().all(|k| !k.contains("note")));
}
