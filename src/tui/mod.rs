//! Ratatui host: menu, coin toss and table scenes over a [`crate::session::Session`].

pub mod app;
pub mod controller;
mod ui;
