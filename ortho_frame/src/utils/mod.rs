//! Diagnostic helpers - printing and parsing of vectors and matrices.

mod format;

pub use format::{Pretty, PrettyPrint, parse_vec3, parse_vec3_prefix, parse_vec3_list};
