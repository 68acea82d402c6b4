//! CLI library components for the atlas boundary toolkit.

pub mod logging;
