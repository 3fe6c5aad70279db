use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;
use serde_json::json;

use recent_domain::{
    compact, load_record, migrate, AccountId, ActivityMarker, History, Mode, ModeStats,
    PlayerDocument, PlayerRecord, RecordFate, Region, RetentionPolicy, ShipId, ShipSnapshot,
    StatBlock, SECONDS_PER_DAY,
};

const NOW: u64 = 1_700_000_000;

fn block(battles: u64) -> StatBlock {
    StatBlock {
        battles_count: battles,
        wins: battles,
        damage_dealt: battles * 1_000,
        frags: 0,
        planes_killed: 0,
        original_exp: battles.into(),
        art_agro: 0,
        scouting_damage: 0,
        shots_by_main: 0,
        hits_by_main: 0,
    }
}

// Small value space so histories contain plenty of repeated snapshots.
fn arb_snapshot() -> impl Strategy<Value = ShipSnapshot> {
    prop::collection::btree_map(1u64..3, prop::collection::btree_map(0usize..2, 1u64..3, 1..2), 1..3)
        .prop_map(|ships| {
            ships
                .into_iter()
                .map(|(ship, modes)| {
                    let modes: ModeStats = modes
                        .into_iter()
                        .map(|(mode, battles)| (Mode::ALL[mode], block(battles)))
                        .collect();
                    (ShipId(ship), modes)
                })
                .collect()
        })
}

fn arb_history() -> impl Strategy<Value = History> {
    prop::collection::btree_map(0u64..200, arb_snapshot(), 0..12).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(day, snapshot)| (NOW - day * SECONDS_PER_DAY, snapshot))
            .collect()
    })
}

fn arb_raw_stats() -> impl Strategy<Value = serde_json::Value> {
    (0u64..3, any::<bool>()).prop_map(|(battles, legacy)| {
        let mut value = json!({
            "wins": 1,
            "damage_dealt": 10,
            "frags": 0,
            "planes_killed": 0,
            "original_exp": 5,
            "art_agro": 0,
            "scouting_damage": 0,
            "shots_by_main": 0,
            "hits_by_main": 0
        });
        let key = if legacy { "battles" } else { "battles_count" };
        value[key] = json!(battles);
        value
    })
}

fn arb_document() -> impl Strategy<Value = PlayerDocument> {
    let marker = prop_oneof![
        Just(json!("prime")),
        Just(json!("Premium")),
        (0u64..NOW).prop_map(|ts| json!(ts)),
        (0u64..NOW).prop_map(|ts| json!({"Normal": ts})),
    ];
    let modes = prop::collection::btree_map(
        prop::sample::select(vec!["pvp", "pvp_solo", "rank_solo"]),
        arb_raw_stats(),
        0..3,
    );
    let ships = prop::collection::btree_map(1u64..4, modes, 0..3);
    let data = prop::collection::btree_map(1u64..1_000, ships, 0..4);
    (marker, data).prop_map(|(marker, data)| {
        let data: BTreeMap<String, serde_json::Value> = data
            .into_iter()
            .map(|(date, ships)| {
                let ships: BTreeMap<String, _> = ships
                    .into_iter()
                    .map(|(ship, modes)| (ship.to_string(), modes))
                    .collect();
                (date.to_string(), json!(ships))
            })
            .collect();
        serde_json::from_value(json!({"last_request": marker, "data": data})).expect("document")
    })
}

proptest! {
    #[test]
    fn migration_is_idempotent(document in arb_document()) {
        let once = migrate(document);
        prop_assert_eq!(migrate(once.clone()), once);
    }

    #[test]
    fn migrated_records_hold_no_empty_or_zero_battle_entries(document in arb_document()) {
        let record = load_record(AccountId(1), Region::Eu, document).expect("record");
        for snapshot in record.history.values() {
            prop_assert!(!snapshot.is_empty());
            for (_, modes) in snapshot.ships() {
                prop_assert!(!modes.is_empty());
                prop_assert!(modes.values().all(|block| block.battles_count > 0));
            }
        }
    }

    #[test]
    fn compaction_is_idempotent(history in arb_history()) {
        let once = compact(&history);
        prop_assert_eq!(compact(&once), once);
    }

    #[test]
    fn compaction_leaves_unique_values(history in arb_history()) {
        let compacted = compact(&history);
        let distinct: HashSet<&ShipSnapshot> = history.values().collect();
        let kept: HashSet<&ShipSnapshot> = compacted.values().collect();
        prop_assert_eq!(kept.len(), compacted.len());
        prop_assert_eq!(kept, distinct);
    }

    #[test]
    fn retention_never_keeps_expired_entries(
        history in arb_history(),
        current in prop::option::of(arb_snapshot()),
    ) {
        let policy = RetentionPolicy::default();
        let mut record = PlayerRecord {
            account_id: AccountId(9),
            region: Region::Na,
            activity: ActivityMarker::Premium,
            last_update_at: None,
            history,
        };
        let current = current.unwrap_or_default();

        let outcome = policy.apply(&mut record, &current, NOW);

        prop_assert!(record.history.keys().all(|ts| !policy.is_expired(*ts, NOW)));
        prop_assert_eq!(outcome.fate == RecordFate::Delete, record.history.is_empty());
        if !current.is_empty() {
            prop_assert_eq!(record.history.get(&NOW), Some(&current));
            prop_assert_eq!(record.history.values().filter(|s| **s == current).count(), 1);
        }
    }
}
