//! Report artifacts and derived outputs.

pub mod dashboard;
pub mod generator;

pub use dashboard::derive_dashboard;
pub use generator::{load_report, render_summary, write_json};
