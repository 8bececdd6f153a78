use anchor_lang::prelude::*;

use crate::state::{
    activity::{LotteryActivity, WinnerEntry},
    prize::PrizeTable,
    template::PrizeTemplate,
};

pub const SNAPSHOT_VERSION: u8 = 1;

/// Persisted form of a [`LotteryActivity`], including the live prize table.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct ActivityRecord {
    pub group_id: String,
    pub is_active: bool,
    pub created_at: i64,
    pub participants: Vec<String>,
    pub winners: Vec<WinnerEntry>,
    pub prize_config: PrizeTable,
}

/// Everything a persistence backend stores for one manager.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct LotterySnapshot {
    pub version: u8,
    pub activities: Vec<ActivityRecord>,
}

impl LotterySnapshot {
    pub fn new(activities: Vec<ActivityRecord>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            activities,
        }
    }
}

impl LotteryActivity {
    pub fn to_record(&self) -> ActivityRecord {
        ActivityRecord {
            group_id: self.group_id.clone(),
            is_active: self.is_active,
            created_at: self.created_at,
            participants: self.participants.iter().cloned().collect(),
            winners: self.winners.clone(),
            prize_config: self.prize_config.clone(),
        }
    }

    /// Rebuilds an activity from a stored record.
    ///
    /// The template decides which levels exist: stored state is restored for
    /// every template level found in the record, template levels the record
    /// lacks start from the template, and stored levels the template no longer
    /// knows are dropped.
    pub fn from_record(record: ActivityRecord, template: &PrizeTemplate) -> Self {
        let mut prize_config = template.instantiate();
        for (level, stored) in record.prize_config.iter() {
            match prize_config.get_mut(level) {
                Some(state) => {
                    *state = stored.clone();
                    state.remaining = state.remaining.min(state.count);
                }
                None => msg!(
                    "[Lottery] group {} drops stored level {} missing from template",
                    record.group_id,
                    level.key()
                ),
            }
        }

        let mut activity = LotteryActivity {
            group_id: record.group_id,
            is_active: record.is_active,
            created_at: record.created_at,
            participants: record.participants.into_iter().collect(),
            winners: Vec::with_capacity(record.winners.len()),
            prize_config,
        };
        for winner in record.winners {
            if !winner.level.is_prize() || activity.winner_level(&winner.user_id).is_some() {
                continue;
            }
            // winners must be a subset of participants
            activity.participants.insert(winner.user_id.clone());
            activity.winners.push(winner);
        }
        activity
    }
}
