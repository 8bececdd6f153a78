use anchor_lang::prelude::*;

use crate::{
    draw::draw_prize,
    error::LotteryError,
    events::{LotteryEvent, PrizeDrawn},
    manager::LotteryManager,
    state::PrizeLevel,
};

pub const NO_PRIZE: &str = "Sorry, no prize this time";

/// Result of an accepted draw. `level` is `PrizeLevel::None` when the user
/// took part but won nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawOutcome {
    pub message: String,
    pub level: PrizeLevel,
}

impl DrawOutcome {
    pub fn is_win(&self) -> bool {
        self.level.is_prize()
    }
}

/// Draws once for `user_id` in the group's running activity.
///
/// # Arguments
/// * `manager` - The manager owning all activities
/// * `group_id` - The group whose activity is drawn from
/// * `user_id` - Raw id of the drawing user
///
/// # Checks
/// The instruction refuses, in this order, when:
/// 1. The group has no activity (`NoActivity`)
/// 2. The activity is stopped (`ActivityInactive`)
/// 3. The user already drew in this activity (`AlreadyParticipated`)
///
/// A refused draw consumes no random sample and touches no stock.
///
/// # Implementation Notes
/// - The user is recorded as a participant even when nothing is won, which
///   uses up their single attempt
/// - Only real prizes are recorded as winners
/// - Every accepted draw, winning or not, is published as `PrizeDrawn`
/// - State is saved before returning
pub fn draw_lottery(
    manager: &mut LotteryManager,
    group_id: &str,
    user_id: &str,
) -> Result<DrawOutcome> {
    let activity = manager
        .activities
        .get_mut(group_id)
        .ok_or(LotteryError::NoActivity)?;
    require!(activity.is_active, LotteryError::ActivityInactive);
    require!(
        !activity.has_participated(user_id),
        LotteryError::AlreadyParticipated
    );

    let sample = manager.random.sample();
    let level = draw_prize(sample, &mut activity.prize_config);
    activity.add_participant(user_id);

    let (message, remaining) = if level.is_prize() {
        activity.add_winner(user_id, level);
        let state = activity
            .prize_config
            .get(level)
            .ok_or(LotteryError::PrizeLevelMissing)?;
        (
            format!(
                "{} Congratulations, you won the {}: {}!",
                level.emoji(),
                level.label(),
                state.name
            ),
            Some(state.remaining),
        )
    } else {
        (NO_PRIZE.to_string(), None)
    };

    manager.publish(LotteryEvent::PrizeDrawn(PrizeDrawn {
        group_id: group_id.to_string(),
        user_id: user_id.to_string(),
        level,
        remaining,
    }));

    manager.persist();
    Ok(DrawOutcome { message, level })
}
