// SPDX-License-Identifier: MPL-2.0
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0.  If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright 2024 dsnparse contributors
use std::borrow::Cow;

use crate::{
    fields::{merge::merge, merge::Overrides, Fields, Slot},
    scan::{
        self,
        query::QueryParams,
        uri::{percent_encode, Host},
        Dialect,
    },
    value::Value,
    DsnError, DsnResult,
};

/// Names of the six URL components, in the order used by
/// [`ParseResult::components`].
pub const COMPONENT_NAMES: [&str; 6] = ["scheme", "netloc", "path", "params", "query", "fragment"];

/// A parsed DSN.
///
/// Behaves much like the result of a URL parser: it has the usual URL
/// components and can be turned back into a URL with
/// [`geturl`][`ParseResult::geturl`]. Fields can also be looked up by name
/// with [`get`][`ParseResult::get`], which includes the derived values such
/// as `netloc` and `database`.
#[derive(Debug, PartialEq, Clone)]
pub struct ParseResult {
    dialect: Dialect,
    fields: Fields,
}

/// Parse a DSN.
pub fn parse(dsn: &str) -> DsnResult<ParseResult> {
    parse_with(dsn, &Overrides::default())
}

/// Parse a DSN, combining it with the given [`Overrides`].
pub fn parse_with(dsn: &str, overrides: &Overrides) -> DsnResult<ParseResult> {
    ParseResult::new(dsn, overrides)
}

/// Parse a DSN into your own result type.
pub fn parse_as<T: From<ParseResult>>(dsn: &str, overrides: &Overrides) -> DsnResult<T> {
    parse_with(dsn, overrides).map(T::from)
}

impl ParseResult {
    pub fn new(dsn: &str, overrides: &Overrides) -> DsnResult<ParseResult> {
        let (dialect, raw) = scan::scan(dsn)?;
        let fields = merge(raw, overrides)?;
        Ok(ParseResult { dialect, fields })
    }

    /// Which grammar the DSN was written in.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }

    /// Retrieve the value of a slot.
    pub fn slot(&self, slot: Slot) -> &Value {
        self.fields.get(slot)
    }

    fn opt_str(&self, slot: Slot) -> Option<Cow<'_, str>> {
        self.slot(slot).opt_str()
    }

    pub fn scheme(&self) -> Cow<'_, str> {
        self.slot(Slot::Scheme).str_value()
    }

    /// The scheme split on `+`, so `postgresql+psycopg` yields
    /// `["postgresql", "psycopg"]`.
    pub fn schemes(&self) -> Vec<String> {
        self.scheme().split('+').map(str::to_string).collect()
    }

    pub fn username(&self) -> Option<Cow<'_, str>> {
        self.opt_str(Slot::Username)
    }

    /// Alias for [`username`][`ParseResult::username`].
    pub fn user(&self) -> Option<Cow<'_, str>> {
        self.username()
    }

    pub fn password(&self) -> Option<Cow<'_, str>> {
        self.opt_str(Slot::Password)
    }

    /// Alias for [`password`][`ParseResult::password`].
    pub fn secret(&self) -> Option<Cow<'_, str>> {
        self.password()
    }

    pub fn hostname(&self) -> Option<Cow<'_, str>> {
        self.opt_str(Slot::Hostname)
    }

    /// Alias for [`hostname`][`ParseResult::hostname`].
    pub fn host(&self) -> Option<Cow<'_, str>> {
        self.hostname()
    }

    /// All hosts listed in the authority. Empty if the hosts field was
    /// overridden with something that is not a host list.
    pub fn hosts(&self) -> &[Host] {
        match self.slot(Slot::Hosts) {
            Value::Hosts(hosts) => hosts,
            _ => &[],
        }
    }

    /// The port, if set and numeric.
    pub fn port(&self) -> Option<i64> {
        self.slot(Slot::Port).int_value()
    }

    pub fn path(&self) -> Cow<'_, str> {
        self.slot(Slot::Path).str_value()
    }

    /// The path split on `/`, without empty segments.
    pub fn paths(&self) -> Vec<String> {
        self.path()
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn params(&self) -> Cow<'_, str> {
        self.slot(Slot::Params).str_value()
    }

    /// The query string as it appeared in the DSN.
    pub fn query(&self) -> Cow<'_, str> {
        self.slot(Slot::Query).str_value()
    }

    pub fn query_params(&self) -> &QueryParams {
        self.fields.query_params()
    }

    pub fn fragment(&self) -> Cow<'_, str> {
        self.slot(Slot::Fragment).str_value()
    }

    /// Alias for [`fragment`][`ParseResult::fragment`].
    pub fn anchor(&self) -> Cow<'_, str> {
        self.fragment()
    }

    /// The percent encoded hostname followed by `:port` if there is a
    /// port.
    pub fn hostloc(&self) -> String {
        let mut hostloc = match self.hostname() {
            Some(hostname) => percent_encode(&hostname).into_owned(),
            None => String::new(),
        };
        let port = self.slot(Slot::Port);
        if port.is_truthy() {
            hostloc.push(':');
            hostloc.push_str(&port.str_value());
        }
        hostloc
    }

    /// The full comma separated host list, if there is more than one host
    /// and the first one still agrees with the hostname and port fields.
    fn host_list(&self) -> Option<String> {
        let hosts = self.hosts();
        let first = hosts.first()?;
        if hosts.len() < 2
            || self.hostname().as_deref() != Some(first.hostname.as_str())
            || self.port() != first.port
        {
            return None;
        }
        let parts: Vec<String> = hosts.iter().map(Host::to_string).collect();
        Some(parts.join(","))
    }

    /// `user:password@hostloc`. The `@` is present if either a username or
    /// a password is set, even if empty. If the DSN listed several hosts,
    /// all of them appear in place of the hostloc.
    pub fn netloc(&self) -> String {
        let mut netloc = String::new();
        let username = self.username();
        let password = self.password();
        if username.is_some() || password.is_some() {
            if let Some(username) = &username {
                netloc.push_str(&percent_encode(username));
            }
            if let Some(password) = &password {
                netloc.push(':');
                netloc.push_str(&percent_encode(password));
            }
            netloc.push('@');
        }
        match self.host_list() {
            Some(hosts) => netloc.push_str(&hosts),
            None => netloc.push_str(&self.hostloc()),
        }
        netloc
    }

    /// The name of the database. For `scheme://host/db` that is the path
    /// without the slashes, when there is no host it is the path as is, as
    /// in `sqlite:relative/file.db`.
    pub fn database(&self) -> Cow<'_, str> {
        let path = self.path();
        if self.hostname().is_none() {
            return path;
        }
        match path {
            Cow::Borrowed(p) => Cow::Borrowed(p.trim_matches('/')),
            Cow::Owned(p) => Cow::Owned(p.trim_matches('/').to_string()),
        }
    }

    /// Alias for [`database`][`ParseResult::database`].
    pub fn dbname(&self) -> Cow<'_, str> {
        self.database()
    }

    /// Look up a field or derived value by name.
    ///
    /// Knows all slot names, `query_params`, fields added through
    /// [`Overrides`] defaults or [`setdefault`][`ParseResult::setdefault`],
    /// and the derived values `schemes`, `paths`, `pathparts`, `parts`,
    /// `netloc`, `hostloc`, `database`, `dbname`, `host`, `user`, `secret`
    /// and `anchor`.
    pub fn get(&self, name: &str) -> DsnResult<Value> {
        if let Some(value) = self.fields.get_named(name) {
            return Ok(value.clone());
        }
        let strings = |v: Vec<String>| Value::List(v.into_iter().map(Value::Str).collect());
        let value = match name {
            "query_params" => Value::Map(self.query_params().clone()),
            "schemes" => strings(self.schemes()),
            "paths" | "pathparts" | "parts" => strings(self.paths()),
            "netloc" => self.netloc().into(),
            "hostloc" => self.hostloc().into(),
            "database" | "dbname" => self.database().into(),
            "host" => self.slot(Slot::Hostname).clone(),
            "user" => self.slot(Slot::Username).clone(),
            "secret" => self.slot(Slot::Password).clone(),
            "anchor" => self.slot(Slot::Fragment).clone(),
            _ => return Err(DsnError::UnknownField(name.to_string())),
        };
        Ok(value)
    }

    /// The URL component at `index`: scheme, netloc, path, params, query
    /// and fragment, in that order.
    pub fn component(&self, index: usize) -> Option<String> {
        let value = match index {
            0 => self.scheme().into_owned(),
            1 => self.netloc(),
            2 => self.path().into_owned(),
            3 => self.params().into_owned(),
            4 => self.query().into_owned(),
            5 => self.fragment().into_owned(),
            _ => return None,
        };
        Some(value)
    }

    /// All six URL components, see [`COMPONENT_NAMES`].
    pub fn components(&self) -> [String; 6] {
        [
            self.scheme().into_owned(),
            self.netloc(),
            self.path().into_owned(),
            self.params().into_owned(),
            self.query().into_owned(),
            self.fragment().into_owned(),
        ]
    }

    /// Set a field, but only if its current value is absent or falsy.
    ///
    /// `key` is a slot name, `query_params` or the name of an extra field.
    pub fn setdefault(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        if key == "query_params" {
            match value {
                Value::Map(map) if self.query_params().is_empty() => {
                    self.fields.set_query_params(map)
                }
                Value::Map(_) => {}
                _ => warn!("setdefault: query_params must be a map"),
            }
            return;
        }
        let current = self.fields.get_named(key);
        if !current.is_some_and(Value::is_truthy) {
            self.fields.set_named(key, value);
        }
    }

    /// Reassemble the DSN as a URL.
    pub fn geturl(&self) -> String {
        let [scheme, netloc, path, params, query, fragment] = self.components();

        let mut url = String::new();
        if !scheme.is_empty() {
            url.push_str(&scheme);
            url.push(':');
        }
        if !netloc.is_empty() {
            url.push_str("//");
            url.push_str(&netloc);
            if !path.is_empty() && !path.starts_with('/') {
                url.push('/');
            }
        } else if path.starts_with("//") {
            // an empty authority keeps the path from being read as one
            url.push_str("//");
        }
        url.push_str(&path);
        if !params.is_empty() {
            url.push(';');
            url.push_str(&params);
        }
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        if !fragment.is_empty() {
            url.push('#');
            url.push_str(&fragment);
        }
        url
    }
}

impl<'a> IntoIterator for &'a ParseResult {
    type Item = String;
    type IntoIter = std::array::IntoIter<String, 6>;

    fn into_iter(self) -> Self::IntoIter {
        self.components().into_iter()
    }
}
