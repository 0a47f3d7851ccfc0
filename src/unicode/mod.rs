//! Character classification used by the line renderer.
//!
//! All offsets in this crate are counted in Unicode scalar values (`char`),
//! so every helper here works on `char` or `&[char]` rather than bytes.

mod bidi;
mod control;
mod width;

pub use bidi::{contains_rtl, is_rtl_char};
pub use control::{
    first_non_whitespace_index, is_basic_ascii, is_control_character, last_non_whitespace_index,
};
pub use width::{char_columns, is_full_width};
