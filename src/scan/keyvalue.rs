// SPDX-License-Identifier: MPL-2.0
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0.  If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright 2024 dsnparse contributors

//! Scanner for libpq style `keyword = value` connection strings.
//!
//! Settings are separated by whitespace, the `=` may be surrounded by
//! whitespace and values containing whitespace are quoted with `'` or `"`.
//! A quote preceded by a backslash does not end the value, but the backslash
//! is kept: `k='it\'s'` yields `it\'s`.

use crate::value::normalize_str;

use super::RawFields;

struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    fn new(dsn: &str) -> Self {
        Cursor {
            chars: dsn.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn skip_char(&mut self, c: char) {
        if self.peek() == Some(c) {
            self.pos += 1;
        }
    }

    /// Consume up to and including the closing `quote`. The opening quote
    /// has already been consumed. Running out of input simply ends the
    /// value.
    fn take_quoted(&mut self, quote: char) -> String {
        let mut value = String::new();
        while let Some(c) = self.peek() {
            if c == quote && self.chars[self.pos - 1] != '\\' {
                self.pos += 1;
                break;
            }
            value.push(c);
            self.pos += 1;
        }
        value
    }
}

/// Split a keyword/value DSN into its settings. Later duplicates overwrite
/// earlier ones and every value is normalized.
///
/// This never fails. A keyword at the end of the string without a value is
/// stored with an empty value.
pub fn scan_key_value(dsn: &str) -> RawFields {
    let mut raw = RawFields::default();
    let mut cursor = Cursor::new(dsn);

    cursor.skip_whitespace();
    while !cursor.at_end() {
        let key = cursor.take_while(|c| !c.is_whitespace() && c != '=');

        cursor.skip_whitespace();
        cursor.skip_char('=');
        cursor.skip_whitespace();

        let value = match cursor.peek() {
            Some(quote @ ('\'' | '"')) => {
                cursor.pos += 1;
                cursor.take_quoted(quote)
            }
            _ => cursor.take_while(|c| !c.is_whitespace()),
        };

        cursor.skip_whitespace();

        trace!("scanned setting {key:?}");
        raw.insert(&key, normalize_str(&value));
    }

    raw
}
