pub use draw_lottery::*;
pub use get_status::*;
pub use set_prize_config::*;
pub use start_activity::*;
pub use stop_activity::*;

pub mod draw_lottery;
pub mod get_status;
pub mod set_prize_config;
pub mod start_activity;
pub mod stop_activity;
