use std::sync::{Arc, Mutex, PoisonError};

use anchor_lang::prelude::*;
use anchor_lang::Event;

use crate::state::PrizeLevel;

/// Event published when a group opens a new lottery activity
#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityStarted {
    /// The group that owns the activity
    pub group_id: String,
    /// When the activity was created
    pub created_at: i64,
    /// Number of prize levels copied from the template
    pub prize_levels: u8,
}

/// Event published when an activity is closed
#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityStopped {
    /// The group that owns the activity
    pub group_id: String,
    /// Number of users who drew
    pub participants: u64,
    /// Number of users who won a real prize
    pub winners: u64,
}

/// Event published when a prize level is reconfigured on a running activity
#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct PrizeConfigured {
    /// The group that owns the activity
    pub group_id: String,
    /// The level that was replaced
    pub level: PrizeLevel,
    /// New winning probability of the level
    pub probability: f64,
    /// New stock; remaining stock is reset to this value
    pub count: u32,
}

/// Event published for every accepted draw, including losing ones
#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct PrizeDrawn {
    /// The group that owns the activity
    pub group_id: String,
    /// The user who drew
    pub user_id: String,
    /// Outcome of the draw, `None` when nothing was won
    pub level: PrizeLevel,
    /// Stock left at the won level after the draw, absent for a losing draw
    pub remaining: Option<u32>,
}

/// Everything a manager publishes after a successful mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum LotteryEvent {
    ActivityStarted(ActivityStarted),
    ActivityStopped(ActivityStopped),
    PrizeConfigured(PrizeConfigured),
    PrizeDrawn(PrizeDrawn),
}

impl LotteryEvent {
    pub fn group_id(&self) -> &str {
        match self {
            LotteryEvent::ActivityStarted(e) => &e.group_id,
            LotteryEvent::ActivityStopped(e) => &e.group_id,
            LotteryEvent::PrizeConfigured(e) => &e.group_id,
            LotteryEvent::PrizeDrawn(e) => &e.group_id,
        }
    }

    /// Discriminator-prefixed borsh encoding, the same bytes an Anchor program
    /// log carries for the event.
    pub fn data(&self) -> Vec<u8> {
        match self {
            LotteryEvent::ActivityStarted(e) => e.data(),
            LotteryEvent::ActivityStopped(e) => e.data(),
            LotteryEvent::PrizeConfigured(e) => e.data(),
            LotteryEvent::PrizeDrawn(e) => e.data(),
        }
    }
}

/// Receives manager events, e.g. to announce wins in a chat or feed an audit
/// log. Called while the manager is borrowed mutably, so it must not call back
/// into the manager.
pub trait EventSink {
    fn publish(&self, event: LotteryEvent);
}

/// Drops every event. The manager's default sink.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEvents;

impl EventSink for NoEvents {
    fn publish(&self, _event: LotteryEvent) {}
}

/// Collects events in memory. Clones share the same buffer.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<LotteryEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns everything collected so far.
    pub fn take(&self) -> Vec<LotteryEvent> {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *events)
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for EventLog {
    fn publish(&self, event: LotteryEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl<F> EventSink for F
where
    F: Fn(LotteryEvent),
{
    fn publish(&self, event: LotteryEvent) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use anchor_lang::Discriminator;

    use super::*;

    #[test]
    fn log_collects_and_drains() {
        let log = EventLog::new();
        let shared = log.clone();
        shared.publish(LotteryEvent::ActivityStopped(ActivityStopped {
            group_id: "G1".into(),
            participants: 3,
            winners: 1,
        }));
        assert_eq!(log.len(), 1);

        let events = log.take();
        assert_eq!(events[0].group_id(), "G1");
        assert!(log.is_empty());
    }

    #[test]
    fn data_is_prefixed_with_discriminator() {
        let drawn = PrizeDrawn {
            group_id: "G1".into(),
            user_id: "u1".into(),
            level: PrizeLevel::None,
            remaining: None,
        };
        let bytes = LotteryEvent::PrizeDrawn(drawn.clone()).data();
        assert!(bytes.starts_with(PrizeDrawn::DISCRIMINATOR));

        let decoded =
            PrizeDrawn::try_from_slice(&bytes[PrizeDrawn::DISCRIMINATOR.len()..]).unwrap();
        assert_eq!(decoded, drawn);
    }
}
