//! Terminal User Interface module.
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - Screen rendering dispatch
//! - `helpers` - Background task spawning
//! - `list` / `detail` / `status` - Widgets

mod detail;
mod events;
mod helpers;
mod input;
mod list;
mod loop_runner;
mod render;
mod status;

// Re-export the public API
pub use events::handle_app_event;
pub use input::handle_input;
pub use loop_runner::run;
pub use render::render;
