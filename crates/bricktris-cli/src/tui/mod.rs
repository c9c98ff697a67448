//! Minimal terminal runtime: a fixed-rate frame clock, on-demand rendering
//! and terminal input, driving an [`App`].

pub use self::{app::App, runner::Tui};

mod app;
mod event;
mod event_loop;
mod runner;
