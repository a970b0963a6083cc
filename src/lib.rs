// src/lib.rs
pub mod app;
pub mod args;
pub mod config;
pub mod detector;
pub mod error;
pub mod gesture;
pub mod hud;
pub mod landmarks;
pub mod pipeline;
pub mod ui;
pub mod video;
