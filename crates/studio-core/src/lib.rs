#![warn(missing_docs)]
//! `studio-core` - shared data model for the Blueprint Studio editing core.
//!
//! The highlighting and completion crates never talk to an editor widget directly. They read
//! lines through [`TextBuffer`], describe changes as [`TextEdit`] values, and look entities
//! up in an [`EntityIndex`] snapshot supplied by the surrounding application.
//!
//! # Coordinates
//!
//! All positions are `(line, column)` pairs where `column` counts **chars**, not bytes.
//! This matches the char-offset convention used by [`LineIndex`].

pub mod buffer;
pub mod edit;
pub mod entity;

pub use buffer::{LineIndex, TextBuffer, leading_whitespace, line_indent};
pub use edit::{Position, Range, TextEdit, apply_text_edit, char_to_byte};
pub use entity::{EntityIndex, EntityIndexError, EntityRecord};
