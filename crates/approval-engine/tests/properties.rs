//! Property tests: the invariants the engine must hold for arbitrary noisy
//! input — idempotence, consume-once, fixed stage order, strict threshold,
//! and recipient dedup.

use approval_engine::{NotificationRouter, StageResolver};
use approval_types::{FormSnapshot, RawAction, StageSlot, Transition};
use proptest::prelude::*;
use serde_json::{json, Value};

const CANONICAL_ORDER: [StageSlot; 5] = [
    StageSlot::Checked,
    StageSlot::BmApproved,
    StageSlot::OpApproved,
    StageSlot::Acknowledged,
    StageSlot::Issued,
];

/// A user type spelling as upstream might emit it, junk included.
fn arb_user_type() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("Checker"),
        Just("checker"),
        Just("BMApprover"),
        Just("BM_Approver"),
        Just("OperationManager"),
        Just("AccountClerk"),
        Just("account_clerk"),
        Just("BranchAccount"),
        Just("branch_account"),
        Just("auditor"),
        Just(""),
    ]
}

fn arb_status() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("Created"),
        Just("Checked"),
        Just("Approved"),
        Just("OMApproved"),
        Just("Acknowledged"),
        Just("Issued"),
        Just("Completed"),
        Just("reverted"),
        Just(""),
    ]
}

/// A pool of loosely-shaped action records. Each record's name carries its
/// pool position, so assignments can be traced in the output.
fn arb_pool() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec((arb_user_type(), arb_status(), 0u32..50, any::<bool>()), 0..8).prop_map(
        |records| {
            records
                .into_iter()
                .enumerate()
                .map(|(tag, (user_type, status, id, acted))| {
                    json!({
                        "userType": user_type,
                        "status": status,
                        "name": format!("actor-{tag}"),
                        "id": id,
                        "acted": acted,
                    })
                })
                .collect()
        },
    )
}

fn arb_form() -> impl Strategy<Value = FormSnapshot> {
    (arb_status(), 0.0f64..1_000_000.0).prop_map(|(status, amount)| {
        FormSnapshot::from_value(&json!({
            "id": "F-prop",
            "status": status,
            "totalAmount": amount,
            "originatorId": "u-origin",
        }))
    })
}

fn to_pool(records: &[Value]) -> Vec<RawAction> {
    RawAction::list_from_value(&Value::Array(records.to_vec()))
}

proptest! {
    #[test]
    fn resolution_is_idempotent(records in arb_pool(), form in arb_form()) {
        let resolver = StageResolver::new();
        let pool = to_pool(&records);
        prop_assert_eq!(resolver.resolve(&form, &pool), resolver.resolve(&form, &pool));
    }

    #[test]
    fn stage_order_matches_the_pipeline(records in arb_pool(), form in arb_form()) {
        let stages = StageResolver::new().resolve(&form, &to_pool(&records));
        let slots: Vec<StageSlot> = stages.iter().map(|s| s.slot).collect();
        let expected: Vec<StageSlot> = CANONICAL_ORDER
            .into_iter()
            .filter(|slot| slots.contains(slot))
            .collect();
        prop_assert_eq!(slots, expected);
    }

    #[test]
    fn threshold_branch_is_strict(records in arb_pool(), amount in 0.0f64..1_000_000.0) {
        let form = FormSnapshot::from_value(&json!({
            "id": "F-prop", "status": "Created", "totalAmount": amount,
        }));
        let stages = StageResolver::new().resolve(&form, &to_pool(&records));
        let has_op = stages.iter().any(|s| s.slot == StageSlot::OpApproved);
        prop_assert_eq!(has_op, amount > 500_000.0);
        prop_assert_eq!(stages.len(), if has_op { 5 } else { 4 });
    }

    #[test]
    fn each_record_feeds_at_most_one_stage(records in arb_pool(), form in arb_form()) {
        // Record names are unique within the pool, so a name appearing in
        // two stages would mean one record was consumed twice.
        let stages = StageResolver::new().resolve(&form, &to_pool(&records));
        let mut names: Vec<&str> = stages
            .iter()
            .map(|s| s.display_name.as_str())
            .filter(|name| !name.is_empty())
            .collect();
        let before = names.len();
        names.sort();
        names.dedup();
        prop_assert_eq!(names.len(), before);
    }

    #[test]
    fn recipients_are_unique_by_id(
        records in arb_pool(),
        form in arb_form(),
        transition in prop_oneof![
            Just(Transition::Create),
            Just(Transition::Check),
            Just(Transition::Approve),
            Just(Transition::Acknowledge),
            Just(Transition::Issue),
        ],
    ) {
        let recipients =
            NotificationRouter::new().compute_recipients(&form, &to_pool(&records), transition);
        let mut ids: Vec<&str> = recipients.iter().map(|r| r.id.as_str()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), before);
        prop_assert!(recipients.iter().all(|r| !r.id.is_empty()));
    }
}
