use anchor_lang::prelude::*;

use crate::{
    error::LotteryError,
    events::{LotteryEvent, PrizeConfigured},
    manager::LotteryManager,
    state::{template::is_valid_probability, PrizeLevel, PrizeState},
};

/// Replaces one level's probability and stock on a running activity.
///
/// The level's display name is kept and its remaining stock is reset to
/// `count`. On any failure the prize table is left untouched.
///
/// # Errors
/// - `NoActivity` if the group never started an activity
/// - `ActivityInactive` if the activity has been stopped
/// - `NoPrizeNotConfigurable` if `level` is `PrizeLevel::None`
/// - `InvalidProbability` if `probability` is outside [0, 1]
/// - `PrizeLevelMissing` if the template never configured `level`
pub fn set_prize_config(
    manager: &mut LotteryManager,
    group_id: &str,
    level: PrizeLevel,
    probability: f64,
    count: u32,
) -> Result<()> {
    let activity = manager
        .activities
        .get_mut(group_id)
        .ok_or(LotteryError::NoActivity)?;
    require!(activity.is_active, LotteryError::ActivityInactive);
    require!(level.is_prize(), LotteryError::NoPrizeNotConfigurable);
    require!(
        is_valid_probability(probability),
        LotteryError::InvalidProbability
    );

    let state = activity
        .prize_config
        .get_mut(level)
        .ok_or(LotteryError::PrizeLevelMissing)?;
    let name = std::mem::take(&mut state.name);
    *state = PrizeState::new(probability, count, name);

    manager.publish(LotteryEvent::PrizeConfigured(PrizeConfigured {
        group_id: group_id.to_string(),
        level,
        probability,
        count,
    }));

    manager.persist();
    Ok(())
}
