//! Core of the streamwatch client: wire types, the HTTP client, and the
//! view models behind the live-status and schedule pages.

pub mod api;
pub mod config;
pub mod format;
pub mod live;
pub mod platform;
pub mod protocol;
pub mod refresh;
pub mod schedule;
