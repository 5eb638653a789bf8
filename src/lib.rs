// File: src/lib.rs
pub mod client;
pub mod config;
pub mod feed;
pub mod logging;
pub mod marker;
pub mod paths;
pub mod projection;
pub mod refresh;
pub mod viewer;
pub mod viewport;

#[cfg(feature = "tui")]
pub mod tui;
