//! Library half of the command-line driver: the five commands of the
//! command surface (§4.10), plus the shared machinery behind them. The
//! binary (`main.rs`) is a thin hand-rolled argument dispatcher over this.

mod compile;
mod diagnostics;
mod discover;
mod stdlib;

pub mod commands;
pub mod payloads;
pub mod tracing_setup;
