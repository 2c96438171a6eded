/// Dataset loading module
///
/// This module handles:
/// - Reading the president and senate county tables from disk
/// - Resolving and validating the expected columns
/// - Handing the parsed tables back to the UI as a single `Datasets`

pub mod loader;
