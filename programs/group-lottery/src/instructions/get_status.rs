use serde::Serialize;

use crate::{manager::LotteryManager, state::PrizeLevel};

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct StatusOverview {
    pub active: bool,
    pub participants: usize,
    pub winners: usize,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PrizeLeft {
    pub level: PrizeLevel,
    pub name: String,
    pub remaining: u32,
    pub total: u32,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct LevelWinners {
    pub level: PrizeLevel,
    pub user_ids: Vec<String>,
}

/// Read-only view of one activity.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ActivityStatus {
    pub group_id: String,
    pub overview: StatusOverview,
    /// Stock per level, in template order.
    pub prize_left: Vec<PrizeLeft>,
    /// Winners grouped by level, levels ordered by their first win.
    pub winners_by_level: Vec<LevelWinners>,
}

impl ActivityStatus {
    pub fn winners_at(&self, level: PrizeLevel) -> &[String] {
        self.winners_by_level
            .iter()
            .find(|group| group.level == level)
            .map(|group| group.user_ids.as_slice())
            .unwrap_or_default()
    }
}

pub fn get_status_and_winners(manager: &LotteryManager, group_id: &str) -> Option<ActivityStatus> {
    let activity = manager.activities.get(group_id)?;

    let prize_left = activity
        .prize_config
        .iter()
        .map(|(level, state)| PrizeLeft {
            level,
            name: state.name.clone(),
            remaining: state.remaining,
            total: state.count,
        })
        .collect();

    let mut winners_by_level: Vec<LevelWinners> = Vec::new();
    for winner in &activity.winners {
        match winners_by_level.iter_mut().find(|group| group.level == winner.level) {
            Some(group) => group.user_ids.push(winner.user_id.clone()),
            None => winners_by_level.push(LevelWinners {
                level: winner.level,
                user_ids: vec![winner.user_id.clone()],
            }),
        }
    }

    Some(ActivityStatus {
        group_id: activity.group_id.clone(),
        overview: StatusOverview {
            active: activity.is_active,
            participants: activity.participants.len(),
            winners: activity.winners.len(),
        },
        prize_left,
        winners_by_level,
    })
}
