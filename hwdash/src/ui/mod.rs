//! UI module root: exposes drawing functions for individual panels.

pub mod grid;
pub mod header;
pub mod sidebar;
pub mod util;
