// SPDX-License-Identifier: MIT OR Apache-2.0

//! Captured argument lists.
//!
//! Each argument of a log call is converted into a tagged [`Arg`] so the renderer can check it
//! against the conversion that consumes it. An [`Args`] is the captured list: it can be built once
//! and forwarded through any number of wrappers without re-collecting the values.

use std::borrow::Cow;
use std::fmt::Display;

/// A single tagged log argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg<'a> {
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Bool(bool),
    Str(Cow<'a, str>),
}

/// The broad kind of an [`Arg`], used in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Int,
    UInt,
    Float,
    Char,
    Bool,
    Str,
}

impl Display for ArgKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ArgKind::Int => "signed integer",
            ArgKind::UInt => "unsigned integer",
            ArgKind::Float => "float",
            ArgKind::Char => "char",
            ArgKind::Bool => "bool",
            ArgKind::Str => "string",
        })
    }
}

impl Arg<'_> {
    pub fn kind(&self) -> ArgKind {
        match self {
            Arg::Int(_) => ArgKind::Int,
            Arg::UInt(_) => ArgKind::UInt,
            Arg::Float(_) => ArgKind::Float,
            Arg::Char(_) => ArgKind::Char,
            Arg::Bool(_) => ArgKind::Bool,
            Arg::Str(_) => ArgKind::Str,
        }
    }

    /// Detaches the argument from any borrowed data.
    pub fn into_owned(self) -> Arg<'static> {
        match self {
            Arg::Int(v) => Arg::Int(v),
            Arg::UInt(v) => Arg::UInt(v),
            Arg::Float(v) => Arg::Float(v),
            Arg::Char(v) => Arg::Char(v),
            Arg::Bool(v) => Arg::Bool(v),
            Arg::Str(v) => Arg::Str(Cow::Owned(v.into_owned())),
        }
    }
}

/// `%s` renders every argument through this impl.
impl Display for Arg<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arg::Int(v) => write!(f, "{v}"),
            Arg::UInt(v) => write!(f, "{v}"),
            Arg::Float(v) => write!(f, "{v}"),
            Arg::Char(v) => write!(f, "{v}"),
            Arg::Bool(v) => write!(f, "{v}"),
            Arg::Str(v) => f.write_str(v),
        }
    }
}

macro_rules! arg_from {
    ($variant:ident as $wide:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Arg<'_> {
                #[inline]
                fn from(value: $t) -> Self {
                    Arg::$variant(value as $wide)
                }
            }
        )*
    };
}

arg_from!(Int as i64: i8, i16, i32, i64, isize);
arg_from!(UInt as u64: u8, u16, u32, u64, usize);
arg_from!(Float as f64: f32, f64);

impl From<char> for Arg<'_> {
    #[inline]
    fn from(value: char) -> Self {
        Arg::Char(value)
    }
}

impl From<bool> for Arg<'_> {
    #[inline]
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    #[inline]
    fn from(value: &'a str) -> Self {
        Arg::Str(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    #[inline]
    fn from(value: &'a String) -> Self {
        Arg::Str(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for Arg<'_> {
    #[inline]
    fn from(value: String) -> Self {
        Arg::Str(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for Arg<'a> {
    #[inline]
    fn from(value: Cow<'a, str>) -> Self {
        Arg::Str(value)
    }
}

/// A captured argument list.
///
/// ```
/// use sevlog::{Arg, Args};
/// let args = sevlog::args!["disk", 3, 0.5];
/// assert_eq!(args.len(), 3);
/// assert_eq!(args.get(1), Some(&Arg::Int(3)));
/// assert!(Args::new().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Args<'a> {
    values: Vec<Arg<'a>>,
}

impl<'a> Args<'a> {
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn push(&mut self, value: impl Into<Arg<'a>>) {
        self.values.push(value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arg<'a>> {
        self.values.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arg<'a>> {
        self.values.iter()
    }

    pub fn into_owned(self) -> Args<'static> {
        Args {
            values: self.values.into_iter().map(Arg::into_owned).collect(),
        }
    }
}

impl<'a> From<Vec<Arg<'a>>> for Args<'a> {
    fn from(values: Vec<Arg<'a>>) -> Self {
        Self { values }
    }
}

impl<'a, T: Into<Arg<'a>>> FromIterator<T> for Args<'a> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'s, 'a> IntoIterator for &'s Args<'a> {
    type Item = &'s Arg<'a>;
    type IntoIter = std::slice::Iter<'s, Arg<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_widen_by_signedness() {
        assert_eq!(Arg::from(-3i8), Arg::Int(-3));
        assert_eq!(Arg::from(7u16), Arg::UInt(7));
        assert_eq!(Arg::from(usize::MAX), Arg::UInt(u64::MAX));
        assert_eq!(Arg::from(1.5f32), Arg::Float(1.5));
    }

    #[test]
    fn strings_borrow_until_made_owned() {
        let text = String::from("disk");
        let arg = Arg::from(&text);
        assert!(matches!(arg, Arg::Str(Cow::Borrowed("disk"))));
        let owned = arg.into_owned();
        drop(text);
        assert_eq!(owned.to_string(), "disk");
    }

    #[test]
    fn collects_from_iterators() {
        let args: Args = [1u32, 2, 3].into_iter().collect();
        let kinds: Vec<_> = args.iter().map(Arg::kind).collect();
        assert_eq!(kinds, vec![ArgKind::UInt; 3]);
    }
}
