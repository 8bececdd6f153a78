use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use chrono::Utc;

use crate::{
    config::LotteryConfig,
    entropy::{RandomSource, ThreadRandom},
    events::{EventSink, LotteryEvent, NoEvents},
    instructions::{self, ActivityStatus, DrawOutcome},
    persistence::LotteryPersistence,
    state::{LotteryActivity, LotterySnapshot, PrizeLevel, PrizeTemplate},
};

/// Owns every group's lottery activity.
///
/// Lifecycle: construct (which loads stored state) → serve operations → save
/// after each mutation. Mutating operations take `&mut self`; wrap the manager
/// in [`crate::SharedLotteryManager`] to serve concurrent callers.
pub struct LotteryManager {
    pub(crate) activities: BTreeMap<String, LotteryActivity>,
    pub(crate) template: PrizeTemplate,
    pub(crate) persistence: Box<dyn LotteryPersistence + Send + Sync>,
    pub(crate) random: Box<dyn RandomSource + Send + Sync>,
    events: Box<dyn EventSink + Send + Sync>,
}

impl LotteryManager {
    /// Builds a manager drawing from the thread-local generator and loads
    /// whatever `persistence` has stored.
    ///
    /// # Errors
    /// Any load error from `persistence`; construction is aborted.
    pub fn new<P>(template: PrizeTemplate, persistence: P) -> Result<Self>
    where
        P: LotteryPersistence + Send + Sync + 'static,
    {
        Self::with_random(template, persistence, ThreadRandom)
    }

    pub fn with_random<P, R>(template: PrizeTemplate, persistence: P, random: R) -> Result<Self>
    where
        P: LotteryPersistence + Send + Sync + 'static,
        R: RandomSource + Send + Sync + 'static,
    {
        let mut manager = Self {
            activities: BTreeMap::new(),
            template,
            persistence: Box::new(persistence),
            random: Box::new(random),
            events: Box::new(NoEvents),
        };
        manager.load()?;
        Ok(manager)
    }

    pub fn from_config<P>(config: &LotteryConfig, persistence: P) -> Result<Self>
    where
        P: LotteryPersistence + Send + Sync + 'static,
    {
        Self::new(config.prize_template()?, persistence)
    }

    /// Publishes every successful mutation to `sink` instead of dropping it.
    pub fn with_events<S>(mut self, sink: S) -> Self
    where
        S: EventSink + Send + Sync + 'static,
    {
        self.events = Box::new(sink);
        self
    }

    fn load(&mut self) -> Result<()> {
        let Some(snapshot) = self.persistence.load()? else {
            return Ok(());
        };
        for record in snapshot.activities {
            let activity = LotteryActivity::from_record(record, &self.template);
            self.activities.insert(activity.group_id.clone(), activity);
        }
        msg!("[Lottery] loaded {} activities", self.activities.len());
        Ok(())
    }

    pub fn snapshot(&self) -> LotterySnapshot {
        LotterySnapshot::new(
            self.activities
                .values()
                .map(LotteryActivity::to_record)
                .collect(),
        )
    }

    /// Saves the full state. A failed save is logged and the in-memory state,
    /// which already reflects the operation, is kept.
    pub(crate) fn persist(&self) {
        if let Err(e) = self.persistence.save(&self.snapshot()) {
            msg!("[Lottery] failed to save lottery state: {}", e);
        }
    }

    pub(crate) fn publish(&self, event: LotteryEvent) {
        self.events.publish(event);
    }

    pub(crate) fn now() -> i64 {
        Utc::now().timestamp()
    }

    pub fn start_activity(&mut self, group_id: &str) -> Result<String> {
        instructions::start_activity::start_activity(self, group_id)
    }

    pub fn stop_activity(&mut self, group_id: &str) -> Result<String> {
        instructions::stop_activity::stop_activity(self, group_id)
    }

    pub fn set_prize_config(
        &mut self,
        group_id: &str,
        level: PrizeLevel,
        probability: f64,
        count: u32,
    ) -> Result<()> {
        instructions::set_prize_config::set_prize_config(self, group_id, level, probability, count)
    }

    pub fn draw_lottery(&mut self, group_id: &str, user_id: &str) -> Result<DrawOutcome> {
        instructions::draw_lottery::draw_lottery(self, group_id, user_id)
    }

    pub fn get_status_and_winners(&self, group_id: &str) -> Option<ActivityStatus> {
        instructions::get_status::get_status_and_winners(self, group_id)
    }

    pub fn activity(&self, group_id: &str) -> Option<&LotteryActivity> {
        self.activities.get(group_id)
    }

    pub fn group_ids(&self) -> impl Iterator<Item = &str> {
        self.activities.keys().map(String::as_str)
    }

    pub fn template(&self) -> &PrizeTemplate {
        &self.template
    }

    pub fn winner_level(&self, group_id: &str, user_id: &str) -> Option<PrizeLevel> {
        self.activities.get(group_id)?.winner_level(user_id)
    }
}
