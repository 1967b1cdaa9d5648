pub mod file_magic;
pub mod sql;
pub mod validate;

pub use file_magic::validate_magic_bytes;
pub use sql::escape_like_pattern;
pub use validate::{file_extension, validate_upload};
