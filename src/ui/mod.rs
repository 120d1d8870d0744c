//! Terminal UI rendering using ratatui.
//!
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`current`]: Current conditions cards and 24-hour statistics
//! - [`charts`]: Line charts of the past 24 hours with reference lines
//! - [`annual`]: Monthly temperature extremes table
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Screen Layout
//!
//! `main.rs` splits the terminal into four rows and hands the content row to
//! the active view:
//!
//! ```text
//!  ● STATION NAME │ location │ imperial │ America/New_York   <- common::render_header
//!  1:Current | 2:Charts | 3:Annual                          <- common::render_tabs
//! ┌─ view ────────────────────────────────────────────────┐
//! │ current::render / charts::render / annual::render     │
//! └───────────────────────────────────────────────────────┘
//!  source | Updated 12s ago | u:units r:refresh ...         <- common::render_status_bar
//! ```
//!
//! The help overlay (`common::render_help`) is drawn last, over everything.

pub mod annual;
pub mod charts;
pub mod common;
pub mod current;
pub mod theme;

pub use theme::Theme;

/// Flatten a rendered buffer into lines of text.
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
