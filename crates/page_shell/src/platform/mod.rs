//! Terminal host for the chat and sidebar state machines.
mod app;
mod config;
mod console;
mod effects;
mod logging;

pub use app::run_app;
