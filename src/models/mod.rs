//! Core data models for the meeting meter.

mod cost_model;
mod meeting;
mod money;
mod report;

pub use cost_model::*;
pub use meeting::*;
pub use money::*;
pub use report::*;
