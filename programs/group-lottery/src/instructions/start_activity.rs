use anchor_lang::prelude::*;

use crate::{
    error::LotteryError,
    events::{ActivityStarted, LotteryEvent},
    manager::LotteryManager,
    state::LotteryActivity,
};

pub const ACTIVITY_STARTED: &str = "The lottery for this group is now open";

/// Opens a lottery activity for a group.
///
/// # Arguments
/// * `manager` - The manager owning all activities
/// * `group_id` - The group the activity belongs to
///
/// # Checks
/// 1. The group has no running activity
///
/// # Implementation Notes
/// - A stopped activity for the same group is replaced, not resumed
/// - The new activity gets its own copy of the prize template
/// - State is saved before returning
pub fn start_activity(manager: &mut LotteryManager, group_id: &str) -> Result<String> {
    if let Some(existing) = manager.activities.get(group_id) {
        require!(!existing.is_active, LotteryError::ActivityAlreadyRunning);
    }

    let created_at = LotteryManager::now();
    let mut activity = LotteryActivity::new(group_id, &manager.template, created_at);
    activity.is_active = true;
    let prize_levels = u8::try_from(activity.prize_config.len()).unwrap_or(u8::MAX);

    manager.activities.insert(group_id.to_string(), activity);
    msg!("[Lottery] group {} started an activity with {} prize levels", group_id, prize_levels);

    manager.publish(LotteryEvent::ActivityStarted(ActivityStarted {
        group_id: group_id.to_string(),
        created_at,
        prize_levels,
    }));

    manager.persist();
    Ok(ACTIVITY_STARTED.to_string())
}
