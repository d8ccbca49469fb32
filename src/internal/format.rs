//! 进度展示辅助：纯函数，不感知传输层。

pub mod byte_size;
pub mod session_view;
pub mod time_remaining;

pub use byte_size::format_bytes;
pub use session_view::{ProgressDisplay, SessionAction, SessionView};
pub use time_remaining::{CALCULATING, format_time_remaining};
