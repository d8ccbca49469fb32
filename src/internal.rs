pub mod format;
pub mod session;
pub mod states;
