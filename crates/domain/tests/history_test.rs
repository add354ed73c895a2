use chrono::{TimeZone, Utc};
use ferrous_doh_domain::{DnsQuery, History, HistoryEntry, RecordType, HISTORY_LIMIT};

fn entry(i: usize) -> HistoryEntry {
    HistoryEntry::new(
        format!("host{i}.example.com"),
        RecordType::A,
        Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap(),
    )
}

// ============================================================================
// Ordering and cap
// ============================================================================

#[test]
fn test_most_recent_entry_is_first() {
    let mut history = History::new();
    history.push(entry(1));
    history.push(entry(2));

    assert_eq!(history.len(), 2);
    assert_eq!(history.latest().unwrap().query, "host2.example.com");
    assert_eq!(history.get(1).unwrap().query, "host1.example.com");
}

#[test]
fn test_history_never_exceeds_limit() {
    let mut history = History::new();
    for i in 0..(HISTORY_LIMIT + 25) {
        history.push(entry(i));
        assert!(history.len() <= HISTORY_LIMIT);
    }

    assert_eq!(history.len(), HISTORY_LIMIT);
    assert_eq!(history.latest().unwrap().query, "host74.example.com");
    // Oldest kept entry is the 50th most recent one
    assert_eq!(
        history.get(HISTORY_LIMIT - 1).unwrap().query,
        "host25.example.com"
    );
}

#[test]
fn test_custom_limit() {
    let mut history = History::with_limit(3);
    for i in 0..5 {
        history.push(entry(i));
    }
    assert_eq!(history.len(), 3);
    assert_eq!(history.limit(), 3);
}

#[test]
fn test_remove_and_clear() {
    let mut history = History::new();
    for i in 0..3 {
        history.push(entry(i));
    }

    let removed = history.remove(1).unwrap();
    assert_eq!(removed.query, "host1.example.com");
    assert_eq!(history.len(), 2);
    assert!(history.remove(10).is_none());

    history.clear();
    assert!(history.is_empty());
}

// ============================================================================
// Persistence format
// ============================================================================

#[test]
fn test_json_uses_query_type_at_fields() {
    let mut history = History::new();
    history.push(HistoryEntry::new(
        "example.com",
        RecordType::MX,
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    ));

    let v: serde_json::Value = serde_json::from_str(&history.to_json()).unwrap();
    assert_eq!(v[0]["query"], "example.com");
    assert_eq!(v[0]["type"], "MX");
    assert!(v[0]["at"].as_str().unwrap().starts_with("2024-05-01T12:00:00"));
}

#[test]
fn test_from_json_truncates_to_limit() {
    let mut big = History::with_limit(10);
    for i in 0..10 {
        big.push(entry(i));
    }

    let restored = History::from_json(&big.to_json(), 4).unwrap();
    assert_eq!(restored.len(), 4);
    assert_eq!(restored.latest(), big.latest());
}

#[test]
fn test_from_json_rejects_garbage() {
    assert!(History::from_json("not json", HISTORY_LIMIT).is_err());
}

#[test]
fn test_entry_round_trips_to_query() {
    let q = DnsQuery::new("example.org", RecordType::TXT);
    let e = HistoryEntry::now(&q);
    assert_eq!(e.to_query(), Some(q));
}
