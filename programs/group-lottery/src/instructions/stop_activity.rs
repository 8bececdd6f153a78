use anchor_lang::prelude::*;

use crate::{
    error::LotteryError,
    events::{ActivityStopped, LotteryEvent},
    manager::LotteryManager,
};

pub const ACTIVITY_STOPPED: &str = "The lottery has been stopped";

/// Closes a group's running activity. Participants, winners and stock are
/// kept so the result can still be queried.
pub fn stop_activity(manager: &mut LotteryManager, group_id: &str) -> Result<String> {
    let activity = manager
        .activities
        .get_mut(group_id)
        .ok_or(LotteryError::NoActivity)?;
    require!(activity.is_active, LotteryError::ActivityAlreadyStopped);

    activity.is_active = false;
    msg!(
        "[Lottery] group {} stopped its activity with {} winners",
        group_id,
        activity.winners.len()
    );

    let stopped = ActivityStopped {
        group_id: group_id.to_string(),
        participants: activity.participants.len() as u64,
        winners: activity.winners.len() as u64,
    };

    manager.publish(LotteryEvent::ActivityStopped(stopped));

    manager.persist();
    Ok(ACTIVITY_STOPPED.to_string())
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{code, error_code_of, LotteryError},
        events::{ActivityStopped, LotteryEvent},
        manager::test_support::{manager, manager_with_events},
    };

    #[test]
    fn stop_is_not_repeatable() {
        let (mut manager, _) = manager(&[]);
        manager.start_activity("G1").unwrap();

        assert_eq!(manager.stop_activity("G1").unwrap(), super::ACTIVITY_STOPPED);
        let err = manager.stop_activity("G1").unwrap_err();
        assert_eq!(error_code_of(&err), code(LotteryError::ActivityAlreadyStopped));
        assert!(!manager.activity("G1").unwrap().is_active);
    }

    #[test]
    fn unknown_group_cannot_stop() {
        let (mut manager, persistence) = manager(&[]);
        let err = manager.stop_activity("nowhere").unwrap_err();
        assert_eq!(error_code_of(&err), code(LotteryError::NoActivity));
        assert!(persistence.stored_bytes().is_none());
    }

    #[test]
    fn stopped_activity_keeps_results() {
        let (mut manager, _) = manager(&[0.005, 0.9]);
        manager.start_activity("G1").unwrap();
        manager.draw_lottery("G1", "u1").unwrap();
        manager.draw_lottery("G1", "u2").unwrap();
        manager.stop_activity("G1").unwrap();

        let status = manager.get_status_and_winners("G1").unwrap();
        assert!(!status.overview.active);
        assert_eq!(status.overview.participants, 2);
        assert_eq!(status.overview.winners, 1);
    }

    #[test]
    fn publishes_stopped_event_with_totals() {
        let (mut manager, events) = manager_with_events(&[0.005, 0.9]);
        manager.start_activity("G1").unwrap();
        manager.draw_lottery("G1", "u1").unwrap();
        manager.draw_lottery("G1", "u2").unwrap();
        events.take();

        manager.stop_activity("G1").unwrap();
        manager.stop_activity("G1").unwrap_err();
        assert_eq!(
            events.take(),
            vec![LotteryEvent::ActivityStopped(ActivityStopped {
                group_id: "G1".into(),
                participants: 2,
                winners: 1,
            })]
        );
    }
}
