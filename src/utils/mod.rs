//! Utility modules.
//!
//! - `date`: ISO calendar dates and locale short formats
//! - `html`: entity escaping and element classification

pub mod date;
pub mod html;
