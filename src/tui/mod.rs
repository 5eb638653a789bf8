// File: src/tui/mod.rs
pub mod action;
pub mod handler;
pub mod state;
pub mod view;
