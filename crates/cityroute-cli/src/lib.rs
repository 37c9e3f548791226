//! CityRoute CLI library.
//!
//! Command handlers, console rendering and the interactive step-by-step
//! observer behind the `cityroute` binary.

pub mod commands;
pub mod output;
pub mod stepper;
pub mod terminal;
