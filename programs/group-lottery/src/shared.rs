use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anchor_lang::prelude::*;

use crate::{
    instructions::{ActivityStatus, DrawOutcome},
    manager::LotteryManager,
    state::PrizeLevel,
};

/// Cloneable handle that serialises all mutations of one manager.
///
/// Each mutating call holds the write lock across its whole
/// check → draw → record → save sequence, so two users racing for the last unit
/// of a prize, or one user drawing twice at once, cannot both succeed. Status
/// queries share the read lock and never observe a half-applied draw.
#[derive(Clone)]
pub struct SharedLotteryManager {
    inner: Arc<RwLock<LotteryManager>>,
}

impl SharedLotteryManager {
    pub fn new(manager: LotteryManager) -> Self {
        Self {
            inner: Arc::new(RwLock::new(manager)),
        }
    }

    // Operations never panic half-way through a mutation, so a poisoned lock
    // still guards consistent state.
    pub fn read(&self) -> RwLockReadGuard<'_, LotteryManager> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, LotteryManager> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn start_activity(&self, group_id: &str) -> Result<String> {
        self.write().start_activity(group_id)
    }

    pub fn stop_activity(&self, group_id: &str) -> Result<String> {
        self.write().stop_activity(group_id)
    }

    pub fn set_prize_config(
        &self,
        group_id: &str,
        level: PrizeLevel,
        probability: f64,
        count: u32,
    ) -> Result<()> {
        self.write()
            .set_prize_config(group_id, level, probability, count)
    }

    pub fn draw_lottery(&self, group_id: &str, user_id: &str) -> Result<DrawOutcome> {
        self.write().draw_lottery(group_id, user_id)
    }

    pub fn get_status_and_winners(&self, group_id: &str) -> Option<ActivityStatus> {
        self.read().get_status_and_winners(group_id)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::{
        entropy::FixedSamples, persistence::MemoryPersistence, state::PrizeTemplate,
        state::template::settings,
    };

    #[test]
    fn concurrent_draws_respect_stock_and_single_attempt() {
        let template =
            PrizeTemplate::from_entries([("first", settings(1.0, 3, "Headphones"))]).unwrap();
        let manager = LotteryManager::with_random(
            template,
            MemoryPersistence::new(),
            FixedSamples::new([0.5]),
        )
        .unwrap();
        let shared = SharedLotteryManager::new(manager);
        shared.start_activity("G1").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let mut wins = 0;
                    for round in 0..4 {
                        // workers share user ids, so most attempts are repeats
                        let user = format!("u{}", (worker + round) % 6);
                        if let Ok(outcome) = shared.draw_lottery("G1", &user) {
                            if outcome.is_win() {
                                wins += 1;
                            }
                        }
                    }
                    wins
                })
            })
            .collect();
        let wins: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();

        let status = shared.get_status_and_winners("G1").unwrap();
        assert_eq!(wins, 3);
        assert_eq!(status.overview.participants, 6);
        assert_eq!(status.overview.winners, 3);
        assert_eq!(status.prize_left[0].remaining, 0);
    }
}
