// Retention engine
// Decides which snapshots of a player survive a refresh cycle or a compaction pass

use std::collections::HashSet;

use crate::entities::{ActivityMarker, History, PlayerRecord, RuntimeConfig, ShipSnapshot};
use crate::utils::days_to_seconds;

pub const TTL_DAYS: u64 = 121;
pub const INACTIVITY_LIMIT_DAYS: u64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub ttl_days: u64,
    pub inactivity_limit_days: u64,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            ttl_days: TTL_DAYS,
            inactivity_limit_days: INACTIVITY_LIMIT_DAYS,
        }
    }
}

impl From<&RuntimeConfig> for RetentionPolicy {
    fn from(config: &RuntimeConfig) -> Self {
        Self {
            ttl_days: config.ttl_days,
            inactivity_limit_days: config.inactivity_limit_days,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFate {
    Keep,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionOutcome {
    pub fate: RecordFate,
    pub expired: usize,
    pub duplicates: usize,
    pub inserted: bool,
}

impl RetentionPolicy {
    /// Premium players are always active; others until the inactivity limit passes.
    pub fn is_active(&self, activity: ActivityMarker, now: u64) -> bool {
        match activity {
            ActivityMarker::Premium => true,
            ActivityMarker::Normal(last_request) => {
                now.saturating_sub(last_request) < days_to_seconds(self.inactivity_limit_days)
            }
        }
    }

    pub fn is_expired(&self, timestamp: u64, now: u64) -> bool {
        now.saturating_sub(timestamp) >= days_to_seconds(self.ttl_days)
    }

    /// One refresh cycle. `current` is empty for inactive or hidden players and for
    /// players without battles; it is then only used for eviction.
    pub fn apply(
        &self,
        record: &mut PlayerRecord,
        current: &ShipSnapshot,
        now: u64,
    ) -> RetentionOutcome {
        let mut expired = 0;
        let mut duplicates = 0;
        record.history.retain(|timestamp, snapshot| {
            if self.is_expired(*timestamp, now) {
                expired += 1;
                false
            } else if snapshot == current {
                duplicates += 1;
                false
            } else {
                true
            }
        });

        let inserted = !current.is_empty();
        if inserted {
            record.history.insert(now, current.clone());
            record.last_update_at = Some(now);
        }

        let fate = if record.history.is_empty() {
            RecordFate::Delete
        } else {
            RecordFate::Keep
        };

        RetentionOutcome {
            fate,
            expired,
            duplicates,
            inserted,
        }
    }
}

/// Keeps, for every distinct snapshot value, only its latest timestamp.
pub fn compact(history: &History) -> History {
    let mut seen: HashSet<&ShipSnapshot> = HashSet::with_capacity(history.len());
    history
        .iter()
        .rev()
        .filter(|(_, snapshot)| seen.insert(*snapshot))
        .map(|(timestamp, snapshot)| (*timestamp, snapshot.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ModeStats, StatBlock};
    use crate::utils::SECONDS_PER_DAY;
    use crate::value_objects::{AccountId, Mode, Region, ShipId};

    const NOW: u64 = 1_700_000_000;

    fn snapshot(ship: u64, battles: u64) -> ShipSnapshot {
        let block = StatBlock {
            battles_count: battles,
            wins: battles / 2,
            damage_dealt: battles * 40_000,
            frags: battles,
            planes_killed: 0,
            original_exp: (battles * 1_000).into(),
            art_agro: 0,
            scouting_damage: 0,
            shots_by_main: battles * 50,
            hits_by_main: battles * 15,
        };
        let modes: ModeStats = [(Mode::Pvp, block)].into_iter().collect();
        [(ShipId(ship), modes)].into_iter().collect()
    }

    fn record(activity: ActivityMarker, history: History) -> PlayerRecord {
        PlayerRecord {
            account_id: AccountId(1),
            region: Region::Asia,
            activity,
            last_update_at: None,
            history,
        }
    }

    #[test]
    fn premium_is_always_active() {
        let policy = RetentionPolicy::default();
        assert!(policy.is_active(ActivityMarker::Premium, NOW));
    }

    #[test]
    fn normal_player_goes_inactive_after_limit() {
        let policy = RetentionPolicy::default();
        let limit = INACTIVITY_LIMIT_DAYS * SECONDS_PER_DAY;
        assert!(policy.is_active(ActivityMarker::Normal(NOW - limit + 1), NOW));
        assert!(!policy.is_active(ActivityMarker::Normal(NOW - limit), NOW));
        assert!(policy.is_active(ActivityMarker::Normal(NOW + 10), NOW));
    }

    #[test]
    fn expired_entries_are_evicted() {
        let policy = RetentionPolicy::default();
        let ttl = TTL_DAYS * SECONDS_PER_DAY;
        let mut history = History::new();
        history.insert(NOW - ttl, snapshot(1, 1));
        history.insert(NOW - ttl + 1, snapshot(1, 2));
        let mut player = record(ActivityMarker::Premium, history);

        let outcome = policy.apply(&mut player, &snapshot(1, 3), NOW);

        assert_eq!(outcome.expired, 1);
        assert_eq!(outcome.fate, RecordFate::Keep);
        assert_eq!(
            player.history.keys().copied().collect::<Vec<_>>(),
            vec![NOW - ttl + 1, NOW]
        );
        assert_eq!(player.last_update_at, Some(NOW));
    }

    #[test]
    fn unchanged_snapshot_moves_to_now() {
        let policy = RetentionPolicy::default();
        let mut history = History::new();
        history.insert(NOW - 2 * SECONDS_PER_DAY, snapshot(1, 4));
        history.insert(NOW - SECONDS_PER_DAY, snapshot(1, 5));
        let mut player = record(ActivityMarker::Normal(NOW), history);

        let outcome = policy.apply(&mut player, &snapshot(1, 5), NOW);

        assert_eq!(outcome.duplicates, 1);
        assert!(outcome.inserted);
        assert_eq!(player.history.len(), 2);
        assert_eq!(player.history.get(&NOW), Some(&snapshot(1, 5)));
        assert!(!player.history.contains_key(&(NOW - SECONDS_PER_DAY)));
    }

    #[test]
    fn any_stored_duplicate_of_current_is_evicted() {
        let policy = RetentionPolicy::default();
        let mut history = History::new();
        history.insert(NOW - 3 * SECONDS_PER_DAY, snapshot(1, 5));
        history.insert(NOW - 2 * SECONDS_PER_DAY, snapshot(1, 6));
        let mut player = record(ActivityMarker::Premium, history);

        policy.apply(&mut player, &snapshot(1, 5), NOW);

        assert_eq!(
            player.history.keys().copied().collect::<Vec<_>>(),
            vec![NOW - 2 * SECONDS_PER_DAY, NOW]
        );
    }

    #[test]
    fn inactive_player_with_only_expired_data_is_deleted() {
        let policy = RetentionPolicy::default();
        let mut history = History::new();
        history.insert(NOW - 200 * SECONDS_PER_DAY, snapshot(1, 5));
        let activity = ActivityMarker::Normal(NOW - 20 * SECONDS_PER_DAY);
        let mut player = record(activity, history);
        assert!(!policy.is_active(activity, NOW));

        let outcome = policy.apply(&mut player, &ShipSnapshot::new(), NOW);

        assert_eq!(outcome.fate, RecordFate::Delete);
        assert!(!outcome.inserted);
        assert!(player.history.is_empty());
        assert_eq!(player.last_update_at, None);
    }

    #[test]
    fn empty_current_keeps_last_update_at() {
        let policy = RetentionPolicy::default();
        let mut history = History::new();
        history.insert(NOW - SECONDS_PER_DAY, snapshot(1, 5));
        let mut player = record(ActivityMarker::Premium, history);
        player.last_update_at = Some(NOW - SECONDS_PER_DAY);

        let outcome = policy.apply(&mut player, &ShipSnapshot::new(), NOW);

        assert_eq!(outcome.fate, RecordFate::Keep);
        assert_eq!(player.history.len(), 1);
        assert_eq!(player.last_update_at, Some(NOW - SECONDS_PER_DAY));
    }

    #[test]
    fn compaction_keeps_latest_of_each_value() {
        let mut history = History::new();
        history.insert(100, snapshot(1, 5));
        history.insert(200, snapshot(1, 5));
        history.insert(300, snapshot(1, 9));

        let compacted = compact(&history);

        assert_eq!(compacted.keys().copied().collect::<Vec<_>>(), vec![200, 300]);
        assert_eq!(compacted[&200], snapshot(1, 5));
    }

    #[test]
    fn compaction_drops_non_adjacent_repeats_only() {
        let mut history = History::new();
        history.insert(100, snapshot(1, 5));
        history.insert(200, snapshot(1, 6));
        history.insert(300, snapshot(1, 5));
        history.insert(400, snapshot(2, 1));

        let compacted = compact(&history);

        assert_eq!(
            compacted.keys().copied().collect::<Vec<_>>(),
            vec![200, 300, 400]
        );
        assert_eq!(compact(&compacted), compacted);
    }
}
