//! Worker side of the GUI: executes session effects and downloads images.

pub mod commands;
pub mod images;
pub mod runtime;
