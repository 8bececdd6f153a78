use std::collections::BTreeSet;

use anchor_lang::prelude::*;

use crate::state::{
    prize::{PrizeLevel, PrizeTable},
    template::PrizeTemplate,
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct WinnerEntry {
    pub user_id: String,
    pub level: PrizeLevel,
}

/// One raffle instance for one group.
#[derive(Clone, Debug, PartialEq)]
pub struct LotteryActivity {
    pub group_id: String,
    pub is_active: bool,
    /// Unix timestamp (seconds) of when the activity was started.
    pub created_at: i64,
    pub participants: BTreeSet<String>,
    /// Winners in the order they won. `None` outcomes are never recorded.
    pub winners: Vec<WinnerEntry>,
    pub prize_config: PrizeTable,
}

impl LotteryActivity {
    pub fn new(group_id: impl Into<String>, template: &PrizeTemplate, created_at: i64) -> Self {
        Self {
            group_id: group_id.into(),
            is_active: false,
            created_at,
            participants: BTreeSet::new(),
            winners: Vec::new(),
            prize_config: template.instantiate(),
        }
    }

    /// Returns true when `user_id` was not a participant yet.
    pub fn add_participant(&mut self, user_id: &str) -> bool {
        if self.participants.contains(user_id) {
            return false;
        }
        self.participants.insert(user_id.to_string())
    }

    pub fn has_participated(&self, user_id: &str) -> bool {
        self.participants.contains(user_id)
    }

    /// The caller guarantees `level` is a real prize and the user has not won yet.
    pub fn add_winner(&mut self, user_id: &str, level: PrizeLevel) {
        self.winners.push(WinnerEntry {
            user_id: user_id.to_string(),
            level,
        });
    }

    pub fn winner_level(&self, user_id: &str) -> Option<PrizeLevel> {
        self.winners
            .iter()
            .find(|entry| entry.user_id == user_id)
            .map(|entry| entry.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::template::settings;

    fn activity() -> LotteryActivity {
        let template = PrizeTemplate::from_entries([
            ("special", settings(0.01, 1, "Console")),
            ("first", settings(0.1, 2, "Headphones")),
        ])
        .unwrap();
        LotteryActivity::new("G1", &template, 1_700_000_000)
    }

    #[test]
    fn new_activity_is_inactive_with_fresh_stock() {
        let activity = activity();
        assert!(!activity.is_active);
        assert!(activity.participants.is_empty());
        assert!(activity.winners.is_empty());
        assert_eq!(activity.prize_config.get(PrizeLevel::First).unwrap().remaining, 2);
    }

    #[test]
    fn add_participant_is_idempotent() {
        let mut activity = activity();
        assert!(activity.add_participant("u1"));
        assert!(!activity.add_participant("u1"));
        assert!(activity.has_participated("u1"));
        assert!(!activity.has_participated("u2"));
        assert_eq!(activity.participants.len(), 1);
    }

    #[test]
    fn winners_keep_insertion_order() {
        let mut activity = activity();
        activity.add_winner("u2", PrizeLevel::First);
        activity.add_winner("u1", PrizeLevel::Special);

        let order: Vec<_> = activity.winners.iter().map(|w| w.user_id.as_str()).collect();
        assert_eq!(order, vec!["u2", "u1"]);
        assert_eq!(activity.winner_level("u1"), Some(PrizeLevel::Special));
        assert_eq!(activity.winner_level("u3"), None);
    }
}
