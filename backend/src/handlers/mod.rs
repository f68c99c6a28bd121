//! HTTP handlers for the AlignAI Coordination Platform

pub mod data;
pub mod farmer;
pub mod forecast;
pub mod health;

pub use data::*;
pub use farmer::*;
pub use forecast::*;
pub use health::*;
