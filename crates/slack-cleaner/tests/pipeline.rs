use clap::error::ErrorKind;
use clap::Parser;
use serde_json::json;
use slack_cleaner::deleter::delete_all;
use slack_cleaner::filter::{filter_old, MS_PER_DAY};
use slack_cleaner::types::files::FileRecord;
use slack_cleaner::types::shared::envelope;
use slack_cleaner::{Args, Config, Error, Paging};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, UNIX_EPOCH};

const CREATED: i64 = 1_700_000_000;

fn threshold_ms(days: u64) -> u64 {
    (MS_PER_DAY as u64) * days
}

#[test]
fn file_exactly_at_threshold_is_kept() {
    let records = vec![FileRecord::new("F1", CREATED)];
    let now = UNIX_EPOCH + Duration::from_millis(CREATED as u64 * 1000 + threshold_ms(30));

    assert!(filter_old(&records, 30, now).is_empty());
}

#[test]
fn file_one_millisecond_past_threshold_is_old() {
    let records = vec![FileRecord::new("F1", CREATED)];
    let now = UNIX_EPOCH + Duration::from_millis(CREATED as u64 * 1000 + threshold_ms(30) + 1);

    let old = filter_old(&records, 30, now);
    assert_eq!(old, records);
}

#[test]
fn filter_is_pure_and_idempotent() {
    let records = vec![
        FileRecord::new("old", CREATED - 40 * 86_400),
        FileRecord::new("new", CREATED - 86_400),
        FileRecord::new("older", CREATED - 400 * 86_400),
    ];
    let snapshot = records.clone();
    let now = UNIX_EPOCH + Duration::from_secs(CREATED as u64);

    let first = filter_old(&records, 30, now);
    let second = filter_old(&records, 30, now);

    assert_eq!(records, snapshot);
    assert_eq!(first, second);
    let ids: Vec<&str> = first.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["old", "older"]);
}

#[test]
fn zero_day_threshold_keeps_files_from_this_instant() {
    let records = vec![
        FileRecord::new("past", CREATED - 1),
        FileRecord::new("present", CREATED),
    ];
    let now = UNIX_EPOCH + Duration::from_secs(CREATED as u64);

    let old = filter_old(&records, 0, now);
    assert_eq!(old.len(), 1);
    assert_eq!(old[0].id, "past");
}

#[test]
fn malformed_record_fields_are_rejected() {
    let missing_id = FileRecord::from_value(0, json!({"created": 1}));
    assert!(matches!(
        missing_id,
        Err(Error::MalformedRecord { index: 0, .. })
    ));

    let bad_created = FileRecord::from_value(4, json!({"id": "F1", "created": 1.5}));
    assert!(matches!(
        bad_created,
        Err(Error::MalformedRecord { index: 4, .. })
    ));

    let empty_id = FileRecord::from_value(2, json!({"id": "", "created": 1}));
    assert!(matches!(
        empty_id,
        Err(Error::MalformedRecord { index: 2, .. })
    ));

    let ok = FileRecord::from_value(0, json!({"id": "F1", "created": 1, "size": 12})).unwrap();
    assert_eq!(ok.id, "F1");
    assert_eq!(ok.extra.get("size").unwrap(), 12);
}

#[test]
fn remaining_pages_follow_the_reported_page() {
    let one_based: Paging = serde_json::from_value(json!({"page": 1, "pages": 3})).unwrap();
    assert_eq!(one_based.remaining_pages().unwrap(), vec![2, 3]);

    let zero_based: Paging = serde_json::from_value(json!({"page": 0, "pages": 3})).unwrap();
    assert_eq!(zero_based.remaining_pages().unwrap(), vec![1, 2]);

    let empty: Paging = serde_json::from_value(json!({"page": 1, "pages": 0})).unwrap();
    assert!(empty.remaining_pages().unwrap().is_empty());
}

#[test]
fn hostile_paging_is_rejected() {
    let overflowing: Paging =
        serde_json::from_value(json!({"page": u32::MAX - 1, "pages": 5})).unwrap();
    assert!(matches!(
        overflowing.remaining_pages(),
        Err(Error::MalformedPaging(_))
    ));

    let huge: Paging = serde_json::from_value(json!({"page": 1, "pages": u32::MAX})).unwrap();
    assert!(matches!(huge.remaining_pages(), Err(Error::MalformedPaging(_))));

    let last: Paging =
        serde_json::from_value(json!({"page": u32::MAX - 2, "pages": 3})).unwrap();
    assert_eq!(
        last.remaining_pages().unwrap(),
        vec![u32::MAX - 1, u32::MAX]
    );
}

#[test]
fn envelope_errors_of_any_shape_are_failures() {
    let structured =
        envelope::error_message(&json!({"ok": false, "error": {"code": "file_not_found"}}));
    assert_eq!(
        structured.as_deref(),
        Some(r#"{"code":"file_not_found"}"#)
    );
    assert!(envelope::error_message(&json!({"ok": false})).is_some());
    assert!(envelope::error_message(&json!({"ok": "nope", "error": "invalid_auth"})).is_some());

    assert!(envelope::error_message(&json!({"ok": true})).is_none());
    assert!(envelope::error_message(&json!({"ok": true, "error": null})).is_none());
    assert!(envelope::error_message(&json!([1, 2])).is_none());
}

#[tokio::test]
async fn never_more_than_limit_deletes_in_flight() {
    let current = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let calls = Arc::new(AtomicUsize::new(0));
    let ids: Vec<String> = (0..25).map(|i| format!("F{i}")).collect();

    let deleted = delete_all(ids, 10, |_id| {
        let current = current.clone();
        let peak = peak.clone();
        let calls = calls.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            let now = current.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            current.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }
    })
    .await
    .unwrap();

    assert_eq!(deleted, 25);
    assert_eq!(calls.load(Ordering::SeqCst), 25);
    assert!(peak.load(Ordering::SeqCst) <= 10);
    assert!(peak.load(Ordering::SeqCst) > 1);
}

#[tokio::test]
async fn first_failure_stops_dispatch_but_lets_in_flight_finish() {
    let attempted = Arc::new(Mutex::new(Vec::new()));
    let ids: Vec<String> = (0..10).map(|i| i.to_string()).collect();

    let err = delete_all(ids, 2, |id| {
        let attempted = attempted.clone();
        async move {
            attempted.lock().unwrap().push(id.clone());
            if id == "3" {
                return Err(Error::Timeout);
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok(())
        }
    })
    .await
    .unwrap_err();

    let attempted = attempted.lock().unwrap().clone();
    assert!(attempted.len() < 10);
    assert!(attempted.contains(&"3".to_string()));
    match err {
        Error::Deletion {
            file_id,
            deleted,
            source,
        } => {
            assert_eq!(file_id, "3");
            assert_eq!(deleted, attempted.len() - 1);
            assert!(matches!(*source, Error::Timeout));
        }
        other => panic!("expected Deletion, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_id_list_deletes_nothing() {
    let deleted = delete_all(Vec::new(), 10, |_id| async { Ok(()) })
        .await
        .unwrap();
    assert_eq!(deleted, 0);
}

#[test]
fn args_default_to_thirty_days() {
    let args = Args::try_parse_from(["slack-cleaner", "--token", "abc"]).unwrap();
    let config = Config::from_args(args).unwrap();

    assert_eq!(config.token, "abc");
    assert_eq!(config.threshold_days, 30);
    assert_eq!(config.concurrency, 10);
    assert_eq!(config.api_url.as_str(), "https://slack.com/api/");
}

#[test]
fn short_flags_are_accepted() {
    let args = Args::try_parse_from(["slack-cleaner", "-t", "abc", "-d", "7"]).unwrap();
    let config = Config::from_args(args).unwrap();

    assert_eq!(config.threshold_days, 7);
}

#[test]
fn missing_token_is_a_missing_credential() {
    let args = Args::try_parse_from(["slack-cleaner"]).unwrap();
    assert!(matches!(
        Config::from_args(args),
        Err(Error::MissingCredential)
    ));

    let blank = Args::try_parse_from(["slack-cleaner", "-t", " "]).unwrap();
    assert!(matches!(
        Config::from_args(blank),
        Err(Error::MissingCredential)
    ));
}

#[test]
fn non_numeric_days_is_rejected() {
    let err = Args::try_parse_from(["slack-cleaner", "-t", "abc", "-d", "soon"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn zero_concurrency_is_rejected() {
    let args =
        Args::try_parse_from(["slack-cleaner", "-t", "abc", "--concurrency", "0"]).unwrap();
    assert!(matches!(
        Config::from_args(args),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn version_flag_is_supported() {
    let err = Args::try_parse_from(["slack-cleaner", "--version"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
}
