/// View building module
///
/// This module turns a selection plus the loaded tables into a `ViewModel`:
/// - Row filtering, projection and the derived percentage column (builder.rs)
/// - Correlation, percent formatting and axis ticks (stats.rs)

pub mod builder;
pub mod stats;

pub use builder::{render, ViewModel};
