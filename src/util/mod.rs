//! Text helpers shared by the renderer and the list view.
//!
//! ```
//! use wallabag_tui::util::{strip_control_chars, truncate_to_width};
//!
//! assert_eq!(truncate_to_width("A rather long title", 10), "A rathe...");
//! assert_eq!(strip_control_chars("\x1b[1mbold\x1b[0m"), "bold");
//! ```

mod text;

pub use text::{strip_control_chars, truncate_to_width};
