/// Human readable formatting of glam vectors and matrices
///
/// Vectors print as `(x, y, z)`; matrices print one row per line inside
/// brackets, row-major, even though glam stores them column-major:
///
/// ```text
/// [(1, 0, 0, 5)
/// (0, 1, 0, 0)
/// (0, 0, 1, 0)
/// (0, 0, 0, 1)]
/// ```
///
/// A precision given to the formatter (`{:.3}`) applies to every component.

use std::fmt;
use glam::{IVec2, IVec3, IVec4, Mat3, Mat4, Vec2, Vec3, Vec4};
use crate::error::{Error, Result};

const SOURCE: &str = "ortho::format";

/// Display adapter returned by [`PrettyPrint::pretty`]
#[derive(Debug)]
pub struct Pretty<'a, T: ?Sized>(&'a T);

/// Extension trait giving math types a diagnostic `Display`
///
/// ```
/// use ortho_frame::ortho::PrettyPrint;
/// use ortho_frame::glam::Vec3;
///
/// assert_eq!(Vec3::new(1.0, 2.5, -3.0).pretty().to_string(), "(1, 2.5, -3)");
/// ```
pub trait PrettyPrint {
    fn pretty(&self) -> Pretty<'_, Self> {
        Pretty(self)
    }
}

fn write_tuple<T: fmt::Display>(f: &mut fmt::Formatter<'_>, components: &[T]) -> fmt::Result {
    f.write_str("(")?;
    for (i, c) in components.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        match f.precision() {
            Some(precision) => write!(f, "{:.*}", precision, c)?,
            None => write!(f, "{}", c)?,
        }
    }
    f.write_str(")")
}

fn write_rows<R: PrettyPrint>(f: &mut fmt::Formatter<'_>, rows: &[R]) -> fmt::Result
where
    for<'a> Pretty<'a, R>: fmt::Display,
{
    f.write_str("[")?;
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            f.write_str("\n")?;
        }
        match f.precision() {
            Some(precision) => write!(f, "{:.*}", precision, row.pretty())?,
            None => write!(f, "{}", row.pretty())?,
        }
    }
    f.write_str("]")
}

macro_rules! impl_pretty_vector {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PrettyPrint for $ty {}

            impl fmt::Display for Pretty<'_, $ty> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write_tuple(f, &self.0.to_array())
                }
            }
        )*
    };
}

impl_pretty_vector!(Vec2, Vec3, Vec4, IVec2, IVec3, IVec4);

impl PrettyPrint for Mat3 {}

impl fmt::Display for Pretty<'_, Mat3> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        write_rows(f, &[m.row(0), m.row(1), m.row(2)])
    }
}

impl PrettyPrint for Mat4 {}

impl fmt::Display for Pretty<'_, Mat4> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        write_rows(f, &[m.row(0), m.row(1), m.row(2), m.row(3)])
    }
}

// ===== PARSING =====

/// Parse a `(x, y, z)` tuple, ignoring anything before the opening parenthesis
///
/// Text after the closing parenthesis is ignored.
pub fn parse_vec3(text: &str) -> Result<Vec3> {
    parse_vec3_prefix(text).map(|(v, _)| v)
}

/// Parse the first `(x, y, z)` tuple of `text` and return the remaining input
pub fn parse_vec3_prefix(text: &str) -> Result<(Vec3, &str)> {
    let open = match text.find('(') {
        Some(i) => i,
        None => crate::ortho_bail!(SOURCE, Error::ParseError(format!(
            "expected '(' in {:?}",
            text
        ))),
    };
    let body = &text[open + 1..];
    let close = match body.find(')') {
        Some(i) => i,
        None => crate::ortho_bail!(SOURCE, Error::ParseError(format!(
            "missing ')' in {:?}",
            text
        ))),
    };

    let mut components = [0.0f32; 3];
    let mut count = 0;
    for field in body[..close].split(',') {
        if count == components.len() {
            crate::ortho_bail!(SOURCE, Error::ParseError(format!(
                "more than 3 components in {:?}",
                text
            )));
        }
        components[count] = match field.trim().parse::<f32>() {
            Ok(value) => value,
            Err(err) => crate::ortho_bail!(SOURCE, Error::ParseError(format!(
                "invalid component {:?}: {}",
                field.trim(), err
            ))),
        };
        count += 1;
    }
    if count != components.len() {
        crate::ortho_bail!(SOURCE, Error::ParseError(format!(
            "expected 3 components, found {} in {:?}",
            count, text
        )));
    }

    Ok((Vec3::from_array(components), &body[close + 1..]))
}

/// Parse every `(x, y, z)` tuple in `text`, in order
pub fn parse_vec3_list(text: &str) -> Result<Vec<Vec3>> {
    let mut points = Vec::new();
    let mut rest = text;
    while rest.contains('(') {
        let (point, tail) = parse_vec3_prefix(rest)?;
        points.push(point);
        rest = tail;
    }
    Ok(points)
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
