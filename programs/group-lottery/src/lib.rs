//! Per-group prize lottery: open an activity, let every user draw once
//! against finite, weighted prize stock, close it and report the results.

pub mod config;
pub mod display;
pub mod draw;
pub mod entropy;
pub mod error;
pub mod events;
pub mod instructions;
pub mod manager;
pub mod persistence;
pub mod shared;
pub mod state;

pub use config::{LotteryConfig, PrizeSettings};
pub use display::{NameResolver, RawIds};
pub use draw::draw_prize;
pub use entropy::{EntropyRandom, FixedSamples, RandomSource, SeededRandom, ThreadRandom};
pub use error::{describe_error, LotteryError};
pub use events::{EventLog, EventSink, LotteryEvent, NoEvents};
pub use instructions::{ActivityStatus, DrawOutcome, LevelWinners, PrizeLeft, StatusOverview};
pub use manager::LotteryManager;
pub use persistence::{FilePersistence, LotteryPersistence, MemoryPersistence};
pub use shared::SharedLotteryManager;
pub use state::{LotteryActivity, LotterySnapshot, PrizeLevel, PrizeState, PrizeTemplate};
