/// User interface widgets
///
/// - Control panel with the pickers and county filter (panel.rs)
/// - Scatter plot canvas with hover tooltips (scatter.rs)

pub mod panel;
pub mod scatter;
