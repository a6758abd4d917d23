//! Attribute serialization.

use crate::html::escape;

/// A value that can be written as an HTML attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Absent; never written.
    Null,
    /// `true` writes the bare attribute name, `false` nothing.
    Bool(bool),
    /// Written as `name="value"` unless empty.
    Str(String),
    /// Written as `name="value"` unless zero or NaN.
    Num(f64),
    /// Space-joined into a single value, e.g. a class list.
    List(Vec<String>),
}

impl AttrValue {
    /// Whether the value is written at all.
    pub fn is_truthy(&self) -> bool {
        match self {
            AttrValue::Null => false,
            AttrValue::Bool(b) => *b,
            AttrValue::Str(s) => !s.is_empty(),
            AttrValue::Num(n) => *n != 0.0 && !n.is_nan(),
            AttrValue::List(_) => true,
        }
    }

    fn text(&self) -> String {
        match self {
            AttrValue::Null => String::new(),
            AttrValue::Bool(b) => b.to_string(),
            AttrValue::Str(s) => s.clone(),
            AttrValue::Num(n) => n.to_string(),
            AttrValue::List(items) => items.join(" "),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Num(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Num(value as f64)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Num(f64::from(value))
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(value: Vec<String>) -> Self {
        AttrValue::List(value)
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(value: Vec<&str>) -> Self {
        AttrValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttrValue::Null, Into::into)
    }
}

/// Serialize `(name, value)` pairs into an HTML attribute string.
///
/// Falsy values are skipped, `true` writes the bare name and everything else
/// writes `name="value"` with the value escaped. Attributes are separated by
/// single spaces with no leading or trailing whitespace.
///
/// ```rust
/// use elemental_std::attributes::{AttrValue, to_attributes};
///
/// let attrs = to_attributes(&[
///     ("id", "main".into()),
///     ("hidden", true.into()),
///     ("title", AttrValue::Null),
///     ("class", vec!["a", "b"].into()),
/// ]);
/// assert_eq!(attrs, r#"id="main" hidden class="a b""#);
/// ```
pub fn to_attributes(attrs: &[(&str, AttrValue)]) -> String {
    render_pairs(attrs, str::to_string)
}

pub(crate) fn render_pairs<F>(attrs: &[(&str, AttrValue)], key: F) -> String
where
    F: Fn(&str) -> String,
{
    attrs
        .iter()
        .filter(|(_, value)| value.is_truthy())
        .map(|(name, value)| match value {
            AttrValue::Bool(_) => key(name),
            other => format!("{}=\"{}\"", key(name), escape(&other.text())),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
