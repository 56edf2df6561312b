//! The two backdrop animations.

pub mod network;
pub mod rain;
