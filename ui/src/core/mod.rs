//! Platform-agnostic helpers shared by views.

pub mod format;
pub mod notice;
pub mod platform;
pub mod timing;
