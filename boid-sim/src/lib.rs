//! Headless driver for the flocking simulation: scripted pointer paths,
//! settings loading and a paced tick loop that emits frame snapshots.

pub mod path;
pub mod runner;
pub mod settings;

pub use path::TargetPath;
pub use runner::{RunSummary, Runner};
pub use settings::{load_settings, Overrides};
