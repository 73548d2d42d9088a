//! Pure string builders for every clipboard template.

pub mod code;
pub mod reference;

pub use code::format_with_code;
pub use reference::{
    format_line_numbers, format_reference, format_reference_with_lines, normalize_path,
    relative_to_root,
};
