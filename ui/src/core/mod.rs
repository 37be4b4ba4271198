//! Platform-agnostic building blocks shared by the dashboard views.

pub mod format;
pub mod platform;
pub mod region;
pub mod timing;
