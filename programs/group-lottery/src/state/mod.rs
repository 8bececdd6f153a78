pub use activity::*;
pub use prize::*;
pub use record::*;
pub use template::*;

pub mod activity;
pub mod prize;
pub mod record;
pub mod template;
