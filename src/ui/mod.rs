//! Terminal UI components.
//!
//! Screen layout, top to bottom: title header, optional settings panel,
//! body editor or HTML preview, toast bar, status bar. Popups for draft
//! recovery and help are drawn over everything.

mod overlays;
mod render;
mod status;

pub use overlays::centered_popup_rect;
pub use render::{EditorLayout, content_area_height, layout, line_number_width, preview_lines, render};

pub const HEADER_HEIGHT: u16 = 2;
pub const SETTINGS_PANEL_HEIGHT: u16 = 6;

#[cfg(test)]
mod tests;
