//! HTML to chat markdown conversion.
//!
//! `main` drives a conversion from raw HTML to the final string. `preprocess`
//! and `repair` prepare the source for `tl`; `walker` formats a single parsed
//! node and everything beneath it.

pub(crate) mod main;
pub(crate) mod preprocess;
pub(crate) mod repair;
pub(crate) mod walker;

pub use main::convert_html;
