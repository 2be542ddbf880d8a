//! Terminal front end: wires stdin, the engine and the pure core together.
mod app;
mod cli;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
