//! Command implementations.

pub mod breaks;
pub mod clock;
pub mod status;
pub mod watch;
