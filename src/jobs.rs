//! Collage and conversion jobs.
//!
//! Each collage job is driven by a JSON config (see [`config::load_config`]) and runs through a
//! [`JobContext`] that owns the rasterizer, the font resolver and the text engine. Jobs return a
//! [`BatchReport`]; missing or undecodable inputs become placeholders and are counted as
//! failures instead of aborting the run.

pub mod committee;
pub mod config;
pub mod context;
pub mod convert;
pub mod keynote;
pub mod logo;
pub mod report;
pub mod showcase;
pub mod sponsors;

pub use config::load_config;
pub use context::JobContext;
pub use report::{BatchReport, ItemFailure};
