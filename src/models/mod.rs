//! Data models shared by the services
//!
//! `NeoRecord` is what the feed produces; `PlotPoint` and `PlotData` are what
//! the renderer consumes.

pub mod neo;
pub mod plot;

pub use neo::NeoRecord;
pub use plot::{PlotData, PlotPoint, Rgb};
