// SPDX-License-Identifier: MPL-2.0
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0.  If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright 2024 dsnparse contributors

//! Parse DSNs stored in environment variables.
//!
//! ```text
//! export FOO_DSN=scheme://host/db
//! export FOO_DSN_1=scheme://host1/db1
//! export FOO_DSN_2=scheme://host2/db2
//! ```
//!
//! [`parse_environs`] with prefix `FOO_DSN` finds all three.

use std::{
    collections::HashMap,
    env::{self, VarError},
    ffi::{OsStr, OsString},
};

use crate::{
    fields::merge::Overrides,
    result::{parse_with, ParseResult},
    DsnError, DsnResult,
};

/// Parse the DSN in environment variable `name`.
pub fn parse_environ(name: &str) -> DsnResult<ParseResult> {
    parse_environ_with(name, &Overrides::default())
}

/// Parse the DSN in environment variable `name`, combined with the given
/// [`Overrides`].
pub fn parse_environ_with<T: From<ParseResult>>(
    name: &str,
    overrides: &Overrides,
) -> DsnResult<T> {
    let dsn = match env::var(name) {
        Ok(dsn) => dsn,
        Err(VarError::NotPresent) => {
            return Err(DsnError::MissingEnvironmentVariable(name.to_string()))
        }
        Err(VarError::NotUnicode(_)) => return Err(DsnError::NotUnicode(name.to_string())),
    };
    parse_with(&dsn, overrides).map(T::from)
}

/// Parse the DSNs in environment variable `prefix` and in `prefix_1`,
/// `prefix_2`, and so on, up to the first number that is missing.
/// Numbering may also start at `prefix_0`.
///
/// Finding nothing is not an error, the result is then empty.
pub fn parse_environs(prefix: &str) -> DsnResult<Vec<ParseResult>> {
    parse_environs_with(prefix, &Overrides::default())
}

pub fn parse_environs_with<T: From<ParseResult>>(
    prefix: &str,
    overrides: &Overrides,
) -> DsnResult<Vec<T>> {
    let snapshot = Snapshot::take();
    let mut results = vec![];
    for (name, dsn) in collect_environs(prefix, |name| snapshot.get(name))? {
        debug!("found DSN in environment variable {name}");
        results.push(parse_with(&dsn, overrides).map(T::from)?);
    }
    Ok(results)
}

/// The process environment at one moment in time, so that a scan over
/// numbered variables sees a consistent picture.
struct Snapshot(HashMap<OsString, OsString>);

impl Snapshot {
    fn take() -> Self {
        Snapshot(env::vars_os().collect())
    }

    fn get(&self, name: &str) -> DsnResult<Option<String>> {
        match self.0.get(OsStr::new(name)) {
            None => Ok(None),
            Some(value) => match value.to_str() {
                Some(s) => Ok(Some(s.to_string())),
                None => Err(DsnError::NotUnicode(name.to_string())),
            },
        }
    }
}

/// Find `prefix`, then `prefix_0` or `prefix_1` and their successors,
/// returning (name, value) pairs in discovery order.
fn collect_environs(
    prefix: &str,
    lookup: impl Fn(&str) -> DsnResult<Option<String>>,
) -> DsnResult<Vec<(String, String)>> {
    let mut found = vec![];
    if let Some(value) = lookup(prefix)? {
        found.push((prefix.to_string(), value));
    }

    let numbered = |n: usize| format!("{prefix}_{n}");
    let mut n = if lookup(&numbered(0))?.is_some() { 0 } else { 1 };
    loop {
        let name = numbered(n);
        let Some(value) = lookup(&name)? else {
            break;
        };
        found.push((name, value));
        n += 1;
    }
    Ok(found)
}
