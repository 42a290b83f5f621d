//! Background Tasks Module
//!
//! Tasks that run alongside request handling.
//!
//! # Tasks
//! - Reaper: removes expired memory-backend entries at configured intervals
//! - Remote supervisor: dials the remote cache with capped backoff and
//!   installs it on success

mod reaper;
mod remote;

pub use reaper::spawn_reaper_task;
pub use remote::spawn_remote_supervisor;
