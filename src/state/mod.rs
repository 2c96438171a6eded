/// State management module
///
/// This module handles all application state, including:
/// - The fixed subgroup catalog (catalog.rs)
/// - County tables shared with the render pass (data.rs)
/// - Control panel selections (selection.rs)
/// - User settings and data file locations (settings.rs)

pub mod catalog;
pub mod data;
pub mod selection;
pub mod settings;
