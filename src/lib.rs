//! Terminal dashboard for a Wallabag read-it-later server.
//!
//! The crate is split leaves first: [`store`] holds items and the toggle
//! protocol, [`api`] talks to the server, [`content`] turns article HTML into
//! text, [`screen`]/[`nav`]/[`notify`] hold per-screen state and [`ui`] runs
//! the terminal event loop over an [`app::App`].

pub mod api;
pub mod app;
pub mod config;
pub mod content;
pub mod keybindings;
pub mod nav;
pub mod notify;
pub mod screen;
pub mod store;
pub mod ui;
pub mod util;
