//! Ratatui front-end. It collects raw text input, calls into the
//! [`Store`](crate::db::Store), shows validation messages, and re-renders from
//! fresh query results after every change.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
