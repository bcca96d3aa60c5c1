// SPDX-License-Identifier: MPL-2.0
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0.  If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright 2024 dsnparse contributors
use std::{borrow::Cow, fmt};

use crate::scan::{
    query::{encode_query_params, QueryParams},
    uri::Host,
};

/// Type [`Value`] holds anything that can end up in a field of a parsed DSN.
///
/// Values scanned from a DSN start out as strings and are turned into
/// booleans and numbers by [`normalize`]. Callers can put any variant into a
/// field through [`Overrides`][`crate::Overrides`].
#[derive(Debug, PartialEq, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Hosts(Vec<Host>),
    Map(QueryParams),
}

impl Value {
    /// An empty string, usable in const context.
    pub const fn empty_str() -> Value {
        Value::Str(String::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns false for null, false, zero, and empty strings and
    /// collections. Only falsy fields get overwritten by
    /// [`ParseResult::setdefault`][`crate::ParseResult::setdefault`] and by
    /// query parameters with the same name.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Hosts(hosts) => !hosts.is_empty(),
            Value::Map(map) => !map.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to convert the value to a `bool`
    pub fn bool_value(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Str(s) => parse_bool(s),
            _ => None,
        }
    }

    /// Try to convert the value to an `i64`
    pub fn int_value(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Str(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Render the value as a string. Null renders as the empty string.
    /// Borrows when the value already is a string.
    pub fn str_value(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::Str(s) => Cow::Borrowed(s),
            Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Value::Int(i) => i.to_string().into(),
            Value::Float(f) => format_float(*f).into(),
            Value::List(items) => {
                let parts: Vec<_> = items.iter().map(|v| v.str_value()).collect();
                parts.join(",").into()
            }
            Value::Hosts(hosts) => {
                let parts: Vec<_> = hosts.iter().map(Host::to_string).collect();
                parts.join(",").into()
            }
            Value::Map(map) => encode_query_params(map).into(),
        }
    }

    /// Like [`str_value`][`Value::str_value`] but yields `None` for null.
    pub fn opt_str(&self) -> Option<Cow<'_, str>> {
        if self.is_null() {
            None
        } else {
            Some(self.str_value())
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.str_value().fmt(f)
    }
}

/// Plain decimal notation that always has a fractional part, so that the
/// text normalizes back to the same float. Display never uses an exponent.
fn format_float(f: f64) -> String {
    let mut s = f.to_string();
    if f.is_finite() && !s.contains('.') {
        s.push_str(".0");
    }
    s
}

/// Case insensitive match against "true" and "false".
pub fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Coerce a string scanned from a DSN to its natural type.
///
/// `digits.digits` becomes a float, `digits` an integer and
/// `true`/`false` (any case) a boolean. Anything else, including numbers
/// too large to represent, stays a string.
pub fn normalize_str(s: &str) -> Value {
    let all_digits = |t: &str| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit());

    if let Some((whole, frac)) = s.split_once('.') {
        if all_digits(whole) && all_digits(frac) {
            if let Ok(f) = s.parse() {
                return Value::Float(f);
            }
        }
    } else if all_digits(s) {
        if let Ok(i) = s.parse() {
            return Value::Int(i);
        }
    }

    match parse_bool(s) {
        Some(b) => Value::Bool(b),
        None => Value::Str(s.to_string()),
    }
}

/// Apply [`normalize_str`] to a string value, and to every element of a
/// list. Other values are returned untouched.
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Str(s) => normalize_str(&s),
        Value::List(items) => Value::List(items.into_iter().map(normalize).collect()),
        other => other,
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Value {
        Value::Str(value)
    }
}

impl<'a> From<Cow<'a, str>> for Value {
    fn from(value: Cow<'a, str>) -> Value {
        Value::Str(value.into_owned())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Int(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Vec<Host>> for Value {
    fn from(value: Vec<Host>) -> Self {
        Value::Hosts(value)
    }
}

impl From<QueryParams> for Value {
    fn from(value: QueryParams) -> Self {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[test]
fn test_normalize_str() {
    assert_eq!(normalize_str("5432"), Value::Int(5432));
    assert_eq!(normalize_str("1.5"), Value::Float(1.5));
    assert_eq!(normalize_str("True"), Value::Bool(true));
    assert_eq!(normalize_str("FALSE"), Value::Bool(false));
    assert_eq!(normalize_str("foo"), Value::from("foo"));

    // almost numbers
    assert_eq!(normalize_str(""), Value::from(""));
    assert_eq!(normalize_str("-1"), Value::from("-1"));
    assert_eq!(normalize_str("1."), Value::from("1."));
    assert_eq!(normalize_str(".5"), Value::from(".5"));
    assert_eq!(normalize_str("1.2.3"), Value::from("1.2.3"));
    assert_eq!(normalize_str("12a"), Value::from("12a"));
    assert_eq!(normalize_str("yes"), Value::from("yes"));
    assert_eq!(
        normalize_str("99999999999999999999"),
        Value::from("99999999999999999999")
    );
}

#[test]
fn test_normalize_leaves_non_strings_alone() {
    assert_eq!(normalize(Value::Int(3)), Value::Int(3));
    assert_eq!(normalize(Value::Null), Value::Null);
    assert_eq!(
        normalize(Value::List(vec!["1".into(), "a".into()])),
        Value::List(vec![Value::Int(1), "a".into()])
    );
}

#[test]
fn test_truthiness() {
    assert!(!Value::Null.is_truthy());
    assert!(!Value::from("").is_truthy());
    assert!(!Value::Int(0).is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(!Value::Hosts(vec![]).is_truthy());
    assert!(!Value::Map(QueryParams::new()).is_truthy());
    assert!(Value::from("x").is_truthy());
    assert!(Value::Int(-1).is_truthy());
    assert!(Value::Float(0.5).is_truthy());
}

#[test]
fn test_str_value() {
    assert_eq!(Value::Null.str_value(), "");
    assert_eq!(Value::Int(42).str_value(), "42");
    assert_eq!(Value::Float(2.0).str_value(), "2.0");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(
        Value::List(vec!["a".into(), Value::Int(1)]).str_value(),
        "a,1"
    );
    assert_eq!(normalize_str(&Value::Float(2.0).str_value()), Value::Float(2.0));
    assert_eq!(Value::Float(1e16).str_value(), "10000000000000000.0");
    assert_eq!(Value::Float(0.25).str_value(), "0.25");
    for f in [1e16, 1e20, 1.5e-7, 123.456] {
        assert_eq!(normalize_str(&Value::Float(f).str_value()), Value::Float(f));
    }
}
