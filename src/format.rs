// SPDX-License-Identifier: MIT OR Apache-2.0

//! printf-style templates.
//!
//! A [`Template`] is parsed once, which validates its syntax, and is then checked against an
//! [`Args`] list before anything is rendered. Rendering never sees a mismatched argument.
//!
//! Supported: `%[flags][width][.precision][length]conversion` with flags `-+ 0#`, length modifiers
//! `hh h l ll j z t L q` (accepted and ignored), and conversions `d i u x X o c s f F e E g G`.
//! `%%` is a literal percent sign.
//!
//! Width and precision may be `*`, which takes the value from an integer argument placed before
//! the converted one. A negative `*` width left-justifies; a negative `*` precision counts as
//! absent. Widths and precisions above 4096 are rejected: a line never holds that much.
//!
//! ```
//! use sevlog::Template;
//! let template = Template::parse("%-5s|%04d|%.2f|%x|%*d").unwrap();
//! let text = template.render_to_string(&sevlog::args!["ab", 42, 1.23456, 255u8, 3, 7]).unwrap();
//! assert_eq!(text, "ab   |0042|1.23|ff|  7");
//! ```

use crate::args::{Arg, ArgKind, Args};
use std::fmt::Write;

/// Largest width or precision a template may ask for.
const FIELD_LIMIT: usize = 4096;

/// Why a template or its arguments were rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("format ends with an incomplete conversion starting at byte {offset}")]
    DanglingPercent { offset: usize },
    #[error("unknown conversion '%{conversion}' at byte {offset}")]
    UnknownConversion { conversion: char, offset: usize },
    #[error("width or precision {value} at byte {offset} exceeds {limit}", limit = FIELD_LIMIT)]
    FieldOutOfRange { value: u128, offset: usize },
    #[error("missing argument {index}: format has {expected} conversions")]
    MissingArgument { index: usize, expected: usize },
    #[error("format has {expected} conversions but {supplied} arguments were supplied")]
    SurplusArguments { expected: usize, supplied: usize },
    #[error("argument {index} is a {found}, which '%{conversion}' cannot render")]
    TypeMismatch {
        index: usize,
        conversion: char,
        found: ArgKind,
    },
    #[error("the output rejected the rendered text")]
    Write(#[from] std::fmt::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Signed,
    Unsigned,
    Hex { upper: bool },
    Octal,
    Char,
    Str,
    Fixed { upper: bool },
    Exp { upper: bool },
    General { upper: bool },
}

impl Conversion {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'd' | 'i' => Conversion::Signed,
            'u' => Conversion::Unsigned,
            'x' => Conversion::Hex { upper: false },
            'X' => Conversion::Hex { upper: true },
            'o' => Conversion::Octal,
            'c' => Conversion::Char,
            's' => Conversion::Str,
            'f' => Conversion::Fixed { upper: false },
            'F' => Conversion::Fixed { upper: true },
            'e' => Conversion::Exp { upper: false },
            'E' => Conversion::Exp { upper: true },
            'g' => Conversion::General { upper: false },
            'G' => Conversion::General { upper: true },
            _ => return None,
        })
    }

    fn accepts(self, arg: &Arg<'_>) -> bool {
        match self {
            Conversion::Str => true,
            Conversion::Signed | Conversion::Unsigned | Conversion::Hex { .. } | Conversion::Octal => {
                matches!(arg, Arg::Int(_) | Arg::UInt(_) | Arg::Bool(_))
            }
            Conversion::Char => match arg {
                Arg::Char(_) => true,
                Arg::Int(v) => u32::try_from(*v).ok().and_then(char::from_u32).is_some(),
                Arg::UInt(v) => u32::try_from(*v).ok().and_then(char::from_u32).is_some(),
                _ => false,
            },
            Conversion::Fixed { .. } | Conversion::Exp { .. } | Conversion::General { .. } => {
                matches!(arg, Arg::Float(_))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Flags {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alt: bool,
}

/// A width or precision as written in the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Count {
    Given(usize),
    FromArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Spec {
    flags: Flags,
    width: Option<Count>,
    precision: Option<Count>,
    conversion: Conversion,
    letter: char,
    offset: usize,
}

impl Spec {
    /// Arguments this conversion consumes, counting `*` fields.
    fn slots(&self) -> usize {
        1 + [self.width, self.precision]
            .iter()
            .filter(|count| **count == Some(Count::FromArg))
            .count()
    }

    /// Takes the `*` values from `args`, leaving it at the converted argument.
    fn resolve<'a, 'v: 'a>(&self, args: &mut impl Iterator<Item = &'a Arg<'v>>) -> Field {
        let mut field = Field {
            flags: self.flags,
            width: 0,
            precision: None,
        };
        match self.width {
            Some(Count::Given(width)) => field.width = width,
            Some(Count::FromArg) => {
                let value = args.next().and_then(star_value).unwrap_or(0);
                if value < 0 {
                    field.flags.left = true;
                }
                field.width = clamp_field(value.unsigned_abs());
            }
            None => {}
        }
        field.precision = match self.precision {
            Some(Count::Given(precision)) => Some(precision),
            Some(Count::FromArg) => {
                let value = args.next().and_then(star_value).unwrap_or(-1);
                (value >= 0).then(|| clamp_field(value.unsigned_abs()))
            }
            None => None,
        };
        field
    }
}

/// A conversion's layout once every `*` has been filled in.
#[derive(Debug, Clone, Copy)]
struct Field {
    flags: Flags,
    width: usize,
    precision: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'t> {
    Literal(&'t str),
    Spec(Spec),
}

/// A parsed printf-style template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'t> {
    segments: Vec<Segment<'t>>,
    conversions: usize,
}

impl<'t> Template<'t> {
    pub fn parse(text: &'t str) -> Result<Self, FormatError> {
        let mut segments = Vec::new();
        let mut conversions = 0;
        let mut literal_start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            if c != '%' {
                continue;
            }
            if literal_start < offset {
                segments.push(Segment::Literal(&text[literal_start..offset]));
            }
            if let Some(&(pct, '%')) = chars.peek() {
                chars.next();
                segments.push(Segment::Literal(&text[pct..pct + 1]));
                literal_start = pct + 1;
                continue;
            }

            let mut flags = Flags::default();
            while let Some(&(_, f)) = chars.peek() {
                match f {
                    '-' => flags.left = true,
                    '+' => flags.plus = true,
                    ' ' => flags.space = true,
                    '0' => flags.zero = true,
                    '#' => flags.alt = true,
                    _ => break,
                }
                chars.next();
            }
            let width = take_count(&mut chars, offset)?;
            let precision = match chars.peek() {
                Some(&(_, '.')) => {
                    chars.next();
                    Some(take_count(&mut chars, offset)?.unwrap_or(Count::Given(0)))
                }
                _ => None,
            };
            while let Some(&(_, 'h' | 'l' | 'j' | 'z' | 't' | 'L' | 'q')) = chars.peek() {
                chars.next();
            }

            let Some((conv_offset, letter)) = chars.next() else {
                return Err(FormatError::DanglingPercent { offset });
            };
            let conversion = Conversion::from_char(letter).ok_or(FormatError::UnknownConversion {
                conversion: letter,
                offset,
            })?;
            let spec = Spec {
                flags,
                width,
                precision,
                conversion,
                letter,
                offset,
            };
            conversions += spec.slots();
            segments.push(Segment::Spec(spec));
            literal_start = conv_offset + letter.len_utf8();
        }
        if literal_start < text.len() {
            segments.push(Segment::Literal(&text[literal_start..]));
        }
        Ok(Self {
            segments,
            conversions,
        })
    }

    /// Number of arguments the template consumes, `*` fields included.
    pub fn conversions(&self) -> usize {
        self.conversions
    }

    /// Verifies that `args` matches the template in count and kind.
    pub fn check(&self, args: &Args<'_>) -> Result<(), FormatError> {
        let mut index = 0;
        for spec in self.specs() {
            if spec.width == Some(Count::FromArg) {
                let value = self.star_at(args, index)?;
                check_field(value.unsigned_abs(), spec.offset)?;
                index += 1;
            }
            if spec.precision == Some(Count::FromArg) {
                let value = self.star_at(args, index)?;
                if value >= 0 {
                    check_field(value.unsigned_abs(), spec.offset)?;
                }
                index += 1;
            }
            let arg = self.arg_at(args, index)?;
            if !spec.conversion.accepts(arg) {
                return Err(FormatError::TypeMismatch {
                    index,
                    conversion: spec.letter,
                    found: arg.kind(),
                });
            }
            index += 1;
        }
        if args.len() > self.conversions {
            return Err(FormatError::SurplusArguments {
                expected: self.conversions,
                supplied: args.len(),
            });
        }
        Ok(())
    }

    /// Checks `args`, then writes the rendered text to `out`.
    pub fn render<W: Write>(&self, args: &Args<'_>, out: &mut W) -> Result<(), FormatError> {
        self.check(args)?;
        let mut args = args.iter();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.write_str(text)?,
                Segment::Spec(spec) => {
                    let field = spec.resolve(&mut args);
                    // check() guarantees one argument per conversion
                    if let Some(arg) = args.next() {
                        render_one(spec.conversion, &field, arg, out)?;
                    }
                }
            }
        }
        Ok(())
    }

    pub fn render_to_string(&self, args: &Args<'_>) -> Result<String, FormatError> {
        let mut out = String::new();
        self.render(args, &mut out)?;
        Ok(out)
    }

    fn specs(&self) -> impl Iterator<Item = &Spec> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Spec(spec) => Some(spec),
            Segment::Literal(_) => None,
        })
    }

    fn arg_at<'a, 'v>(&self, args: &'a Args<'v>, index: usize) -> Result<&'a Arg<'v>, FormatError> {
        args.get(index).ok_or(FormatError::MissingArgument {
            index,
            expected: self.conversions,
        })
    }

    fn star_at(&self, args: &Args<'_>, index: usize) -> Result<i128, FormatError> {
        let arg = self.arg_at(args, index)?;
        star_value(arg).ok_or(FormatError::TypeMismatch {
            index,
            conversion: '*',
            found: arg.kind(),
        })
    }
}

fn take_count(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    offset: usize,
) -> Result<Option<Count>, FormatError> {
    if let Some(&(_, '*')) = chars.peek() {
        chars.next();
        return Ok(Some(Count::FromArg));
    }
    let mut value: Option<u128> = None;
    while let Some(&(_, c)) = chars.peek() {
        let Some(digit) = c.to_digit(10) else { break };
        value = Some(
            value
                .unwrap_or(0)
                .saturating_mul(10)
                .saturating_add(u128::from(digit)),
        );
        chars.next();
    }
    value
        .map(|value| check_field(value, offset).map(Count::Given))
        .transpose()
}

fn check_field(value: u128, offset: usize) -> Result<usize, FormatError> {
    usize::try_from(value)
        .ok()
        .filter(|value| *value <= FIELD_LIMIT)
        .ok_or(FormatError::FieldOutOfRange { value, offset })
}

fn clamp_field(value: u128) -> usize {
    usize::try_from(value).map_or(FIELD_LIMIT, |value| value.min(FIELD_LIMIT))
}

/// The integer a `*` field takes its value from.
fn star_value(arg: &Arg<'_>) -> Option<i128> {
    match arg {
        Arg::Int(v) => Some(i128::from(*v)),
        Arg::UInt(v) => Some(i128::from(*v)),
        _ => None,
    }
}

fn render_one<W: Write>(
    conversion: Conversion,
    field: &Field,
    arg: &Arg<'_>,
    out: &mut W,
) -> std::fmt::Result {
    match conversion {
        Conversion::Signed => {
            let value: i128 = match arg {
                Arg::Int(v) => i128::from(*v),
                Arg::UInt(v) => i128::from(*v),
                Arg::Bool(v) => i128::from(*v),
                _ => 0,
            };
            let sign = sign_prefix(value < 0, field.flags);
            let digits = int_digits(value.unsigned_abs().to_string(), field.precision);
            pad_numeric(out, field, sign, &digits, field.precision.is_none())
        }
        Conversion::Unsigned | Conversion::Hex { .. } | Conversion::Octal => {
            let value: u64 = match arg {
                Arg::Int(v) => *v as u64,
                Arg::UInt(v) => *v,
                Arg::Bool(v) => u64::from(*v),
                _ => 0,
            };
            let (prefix, body) = match conversion {
                Conversion::Hex { upper } => {
                    let body = if upper {
                        format!("{value:X}")
                    } else {
                        format!("{value:x}")
                    };
                    let prefix = match (field.flags.alt && value != 0, upper) {
                        (false, _) => "",
                        (true, false) => "0x",
                        (true, true) => "0X",
                    };
                    (prefix, int_digits(body, field.precision))
                }
                Conversion::Octal => {
                    let mut body = int_digits(format!("{value:o}"), field.precision);
                    if field.flags.alt && !body.starts_with('0') {
                        body.insert(0, '0');
                    }
                    ("", body)
                }
                _ => ("", int_digits(value.to_string(), field.precision)),
            };
            pad_numeric(out, field, prefix, &body, field.precision.is_none())
        }
        Conversion::Char => {
            let c = match arg {
                Arg::Char(c) => Some(*c),
                Arg::Int(v) => u32::try_from(*v).ok().and_then(char::from_u32),
                Arg::UInt(v) => u32::try_from(*v).ok().and_then(char::from_u32),
                _ => None,
            };
            let mut buf = [0u8; 4];
            let text: &str = match c {
                Some(c) => c.encode_utf8(&mut buf),
                None => "",
            };
            pad_text(out, field, text)
        }
        Conversion::Str => {
            let text = arg.to_string();
            let text = match field.precision {
                Some(limit) => match text.char_indices().nth(limit) {
                    Some((end, _)) => &text[..end],
                    None => text.as_str(),
                },
                None => text.as_str(),
            };
            pad_text(out, field, text)
        }
        Conversion::Fixed { upper } | Conversion::Exp { upper } | Conversion::General { upper } => {
            let value = match arg {
                Arg::Float(v) => *v,
                _ => 0.0,
            };
            let sign = sign_prefix(value.is_sign_negative() && !value.is_nan(), field.flags);
            let abs = value.abs();
            if !abs.is_finite() {
                let body = match (abs.is_nan(), upper) {
                    (true, false) => "nan",
                    (true, true) => "NAN",
                    (false, false) => "inf",
                    (false, true) => "INF",
                };
                return pad_numeric(out, field, sign, body, false);
            }
            let precision = field.precision.unwrap_or(6);
            let body = match conversion {
                Conversion::Fixed { .. } => fixed(abs, precision, field.flags.alt),
                Conversion::Exp { .. } => exponential(abs, precision, field.flags.alt, upper),
                _ => general(abs, precision, field.flags.alt, upper),
            };
            pad_numeric(out, field, sign, &body, true)
        }
    }
}

fn sign_prefix(negative: bool, flags: Flags) -> &'static str {
    if negative {
        "-"
    } else if flags.plus {
        "+"
    } else if flags.space {
        " "
    } else {
        ""
    }
}

/// Applies an integer precision: the minimum number of digits, where `.0` renders zero as nothing.
fn int_digits(digits: String, precision: Option<usize>) -> String {
    match precision {
        None => digits,
        Some(0) if digits == "0" => String::new(),
        Some(p) if digits.len() < p => format!("{}{digits}", "0".repeat(p - digits.len())),
        Some(_) => digits,
    }
}

fn pad_numeric<W: Write>(
    out: &mut W,
    field: &Field,
    prefix: &str,
    body: &str,
    zero_allowed: bool,
) -> std::fmt::Result {
    let len = prefix.len() + body.len();
    let fill = field.width.saturating_sub(len);
    if field.flags.left {
        out.write_str(prefix)?;
        out.write_str(body)?;
        write_fill(out, SPACES, fill)
    } else if field.flags.zero && zero_allowed {
        out.write_str(prefix)?;
        write_fill(out, ZEROS, fill)?;
        out.write_str(body)
    } else {
        write_fill(out, SPACES, fill)?;
        out.write_str(prefix)?;
        out.write_str(body)
    }
}

fn pad_text<W: Write>(out: &mut W, field: &Field, text: &str) -> std::fmt::Result {
    let fill = field.width.saturating_sub(text.chars().count());
    if field.flags.left {
        out.write_str(text)?;
        write_fill(out, SPACES, fill)
    } else {
        write_fill(out, SPACES, fill)?;
        out.write_str(text)
    }
}

const SPACES: &str = "                                                                ";
const ZEROS: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Writes `count` bytes of padding, a run of `run` at a time.
fn write_fill<W: Write>(out: &mut W, run: &str, count: usize) -> std::fmt::Result {
    let mut left = count;
    while left > 0 {
        let n = left.min(run.len());
        out.write_str(&run[..n])?;
        left -= n;
    }
    Ok(())
}

fn fixed(abs: f64, precision: usize, alt: bool) -> String {
    let mut text = format!("{abs:.precision$}");
    if alt && precision == 0 {
        text.push('.');
    }
    text
}

/// Splits Rust's `1.5e2` form into mantissa and exponent.
fn rust_exponential(abs: f64, precision: usize) -> (String, i32) {
    let text = format!("{abs:.precision$e}");
    match text.split_once('e') {
        Some((mantissa, exp)) => (mantissa.to_string(), exp.parse().unwrap_or(0)),
        None => (text, 0),
    }
}

fn exponent_suffix(exp: i32, upper: bool) -> String {
    let marker = if upper { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{marker}{sign}{:02}", exp.unsigned_abs())
}

fn exponential(abs: f64, precision: usize, alt: bool, upper: bool) -> String {
    let (mut mantissa, exp) = rust_exponential(abs, precision);
    if alt && precision == 0 {
        mantissa.push('.');
    }
    mantissa + &exponent_suffix(exp, upper)
}

fn general(abs: f64, precision: usize, alt: bool, upper: bool) -> String {
    let significant = precision.max(1);
    let (_, exp) = rust_exponential(abs, significant - 1);
    let exp = if abs == 0.0 { 0 } else { exp };
    let use_fixed = exp >= -4 && i64::from(exp) < significant as i64;
    if use_fixed {
        let decimals = (significant as i64 - 1 - i64::from(exp)).max(0) as usize;
        let text = fixed(abs, decimals, alt);
        if alt { text } else { strip_fraction_zeros(&text) }
    } else {
        let (mantissa, exp) = rust_exponential(abs, significant - 1);
        let mantissa = if alt {
            mantissa
        } else {
            strip_fraction_zeros(&mantissa)
        };
        mantissa + &exponent_suffix(exp, upper)
    }
}

fn strip_fraction_zeros(text: &str) -> String {
    if !text.contains('.') {
        return text.to_string();
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
