//! Property tests for response decoding and the refresh backoff

use gst_client::api::{decode_company, decode_listing, login_failure_message};
use gst_client::{RefreshPolicy, INVALID_CREDENTIALS};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::time::Duration;

fn gstin() -> impl Strategy<Value = String> {
    "[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9]Z[0-9A-Z]"
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "\\PC{0,12}".prop_map(Value::String),
    ]
}

// ============================================================
// Response bodies
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_single_object_is_one_record(id in any::<i64>(), gstin in gstin()) {
        let records = decode_company(json!({ "id": id, "gstin": gstin })).unwrap();
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(records[0].id, Some(id));
        prop_assert_eq!(records[0].gstin.as_deref(), Some(gstin.as_str()));
    }

    #[test]
    fn prop_array_keeps_every_record(gstins in proptest::collection::vec(gstin(), 0..20)) {
        let body = Value::Array(gstins.iter().map(|g| json!({ "gstin": g })).collect());
        let records = decode_company(body.clone()).unwrap();
        let listed = decode_listing(body).unwrap();

        prop_assert_eq!(records.len(), gstins.len());
        prop_assert_eq!(&records, &listed);
        for (record, gstin) in records.iter().zip(&gstins) {
            prop_assert!(record.matches_gstin(gstin));
        }
    }

    #[test]
    fn prop_scalar_bodies_decode_as_empty(body in scalar()) {
        prop_assert!(decode_company(body.clone()).unwrap().is_empty());
        prop_assert!(decode_listing(body).unwrap().is_empty());
    }
}

// ============================================================
// Login failure messages
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_error_list_is_joined(messages in proptest::collection::vec("[A-Za-z]{1,10}", 1..5)) {
        let body = json!({ "non_field_errors": messages });
        prop_assert_eq!(login_failure_message(&body), messages.join(" "));
    }

    #[test]
    fn prop_blank_or_missing_message_falls_back(blank in "[ \t]{0,4}", other_key in "[a-z]{1,8}") {
        let blank_body = json!({ "non_field_errors": blank });
        prop_assert_eq!(login_failure_message(&blank_body), INVALID_CREDENTIALS);

        let mut fields = serde_json::Map::new();
        fields.insert(format!("x_{}", other_key), json!("nope"));
        let unrelated = Value::Object(fields);
        prop_assert_eq!(login_failure_message(&unrelated), INVALID_CREDENTIALS);
    }
}

// ============================================================
// Refresh backoff
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_delays_double_up_to_the_cap(
        attempts in 0u32..12,
        initial in 0u64..2_000,
        max in 0u64..10_000,
    ) {
        let policy = RefreshPolicy { attempts, initial_delay_ms: initial, max_delay_ms: max };
        let delays: Vec<Duration> = policy.delays().collect();

        prop_assert_eq!(delays.len(), attempts.max(1) as usize);
        prop_assert_eq!(delays[0], Duration::from_millis(initial.min(max)));
        for pair in delays.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
            prop_assert!(pair[1] <= Duration::from_millis(max));
        }
    }
}
