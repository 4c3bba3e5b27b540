//! Structured MIME types.
//!
//! Content negotiation compares media types structurally (`type/subtype`
//! plus parameters) rather than as raw strings, so `text/plain` matches a
//! response declared as `Text/Plain; charset=UTF-8`.

use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::str::FromStr;

/// The given string is not a `type/subtype` media type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid media type '{0}'")]
pub struct InvalidMediaType(pub String);

/// A parsed MIME type such as `application/json; charset=utf-8`.
///
/// Type, subtype and parameter names are stored lowercase. The `charset`
/// parameter value is lowercased as well; other values are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MediaType {
    type_: Cow<'static, str>,
    subtype: Cow<'static, str>,
    parameters: Vec<(String, String)>,
}

impl MediaType {
    /// Matches every media type.
    pub const ANY: MediaType = MediaType::from_static("*", "*");
    /// `text/plain`.
    pub const TEXT_PLAIN: MediaType = MediaType::from_static("text", "plain");
    /// `text/xml`.
    pub const TEXT_XML: MediaType = MediaType::from_static("text", "xml");
    /// `application/octet-stream`.
    pub const OCTET_STREAM: MediaType = MediaType::from_static("application", "octet-stream");
    /// `application/json`.
    pub const APPLICATION_JSON: MediaType = MediaType::from_static("application", "json");
    /// `application/xml`.
    pub const APPLICATION_XML: MediaType = MediaType::from_static("application", "xml");

    /// Build a parameterless media type from lowercase static parts.
    pub const fn from_static(type_: &'static str, subtype: &'static str) -> Self {
        Self {
            type_: Cow::Borrowed(type_),
            subtype: Cow::Borrowed(subtype),
            parameters: Vec::new(),
        }
    }

    /// Parse a `Content-Type` style string.
    pub fn parse(input: &str) -> Result<Self, InvalidMediaType> {
        let invalid = || InvalidMediaType(input.to_string());

        let (essence, mut rest) = input.split_at(input.find(';').unwrap_or(input.len()));
        let (type_, subtype) = essence.trim().split_once('/').ok_or_else(invalid)?;
        let (type_, subtype) = (type_.trim(), subtype.trim());
        if !is_token(type_) || !is_token(subtype) {
            return Err(invalid());
        }

        let mut parameters = Vec::new();
        loop {
            rest = rest.trim_start_matches(|c: char| c == ';' || c.is_ascii_whitespace());
            if rest.is_empty() {
                break;
            }
            let (name, after) = rest.split_once('=').ok_or_else(invalid)?;
            let name = name.trim().to_ascii_lowercase();
            if !is_token(&name) {
                return Err(invalid());
            }
            let after = after.trim_start();
            let (value, remaining) = match after.strip_prefix('"') {
                Some(quoted) => {
                    let (value, remaining) = unquote(quoted).ok_or_else(invalid)?;
                    let remaining = remaining.trim_start();
                    if !remaining.is_empty() && !remaining.starts_with(';') {
                        return Err(invalid());
                    }
                    (value, remaining)
                }
                None => {
                    let end = after.find(';').unwrap_or(after.len());
                    (after[..end].trim().to_string(), &after[end..])
                }
            };
            let value = if name == "charset" {
                value.to_ascii_lowercase()
            } else {
                value
            };
            parameters.push((name, value));
            rest = remaining;
        }

        Ok(Self {
            type_: Cow::Owned(type_.to_ascii_lowercase()),
            subtype: Cow::Owned(subtype.to_ascii_lowercase()),
            parameters,
        })
    }

    /// The top-level type, e.g. `text`.
    pub fn type_(&self) -> &str {
        &self.type_
    }

    /// The subtype, e.g. `plain`.
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// All parameters in declaration order.
    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }

    /// Look up a parameter by (case-insensitive) name.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Return a copy with `name` set to `value`, replacing any previous value.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        let value = if name == "charset" {
            value.to_ascii_lowercase()
        } else {
            value
        };
        self.parameters.retain(|(n, _)| *n != name);
        self.parameters.push((name, value));
        self
    }

    /// Return a copy with all parameters removed.
    pub fn without_parameters(&self) -> Self {
        Self {
            type_: self.type_.clone(),
            subtype: self.subtype.clone(),
            parameters: Vec::new(),
        }
    }

    /// Whether the type or the subtype is `*`.
    pub fn is_wildcard(&self) -> bool {
        self.type_ == "*" || self.subtype == "*"
    }

    /// Whether `self` falls within `range`.
    ///
    /// `*/*` contains everything, `text/*` contains every `text` subtype, and
    /// every parameter of `range` must be present with the same value in
    /// `self`. Parameters of `self` that `range` does not mention are ignored.
    pub fn is(&self, range: &MediaType) -> bool {
        (range.type_ == "*" || range.type_ == self.type_)
            && (range.subtype == "*" || range.subtype == self.subtype)
            && range
                .parameters
                .iter()
                .all(|(name, value)| self.parameter(name) == Some(value.as_str()))
    }

    /// Compare type and subtype only.
    pub fn same_essence(&self, other: &MediaType) -> bool {
        self.type_ == other.type_ && self.subtype == other.subtype
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_, self.subtype)?;
        for (name, value) in &self.parameters {
            if value.chars().all(is_token_char) && !value.is_empty() {
                write!(f, "; {name}={value}")?;
            } else {
                f.write_str("; ")?;
                f.write_str(name)?;
                f.write_str("=\"")?;
                for c in value.chars() {
                    if c == '"' || c == '\\' {
                        f.write_char('\\')?;
                    }
                    f.write_char(c)?;
                }
                f.write_char('"')?;
            }
        }
        Ok(())
    }
}

impl FromStr for MediaType {
    type Err = InvalidMediaType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Read a quoted-string body (after the opening quote). Returns the unescaped
/// value and the input following the closing quote.
fn unquote(input: &str) -> Option<(String, &str)> {
    let mut value = String::new();
    let mut chars = input.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((value, &input[i + 1..])),
            '\\' => value.push(chars.next()?.1),
            _ => value.push(c),
        }
    }
    None
}

fn is_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_token_char)
}

// RFC 7230 tchar
fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}
