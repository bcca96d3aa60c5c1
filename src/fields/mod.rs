// SPDX-License-Identifier: MPL-2.0
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0.  If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright 2024 dsnparse contributors
pub mod merge;

use std::{fmt, str::FromStr};

use array_macro::array;
use indexmap::IndexMap;

use crate::{scan::query::QueryParams, value::Value};

/// The fixed set of fields every parsed DSN has, mirroring the parts of a
/// URL.
///
/// Note: Rustdoc displays numeric values for the enum variants but these must
/// not be considered part of the API. Use [`Slot::index`] to index tables.
#[derive(
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Clone,
    Copy,
    enum_utils::IterVariants,
    enum_utils::FromStr,
)]
#[repr(u8)]
#[enumeration(rename_all = "lowercase")]
pub enum Slot {
    Scheme,
    Username,
    Password,
    Hostname,
    Hosts,
    Port,
    Path,
    Params,
    Query,
    Fragment,
}

/// If you want to create a table indexed by [`Slot`], the table must
/// have this number of elements.
pub const SLOT_COUNT: usize = 10;

impl Slot {
    /// Return the name of this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Scheme => "scheme",
            Slot::Username => "username",
            Slot::Password => "password",
            Slot::Hostname => "hostname",
            Slot::Hosts => "hosts",
            Slot::Port => "port",
            Slot::Path => "path",
            Slot::Params => "params",
            Slot::Query => "query",
            Slot::Fragment => "fragment",
        }
    }

    pub const fn index(&self) -> usize {
        let idx = *self as usize;
        assert!(idx < SLOT_COUNT);
        idx
    }

    /// Look up a slot by its canonical name or one of the aliases
    /// `dbname`, `database`, `host`, `user`, `secret` and `anchor`.
    pub fn resolve(name: &str) -> Option<Slot> {
        Slot::from_str(resolve_alias(name)).ok()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

/// Map an alternative field name to the canonical one. Other names are
/// returned unchanged.
pub fn resolve_alias(name: &str) -> &str {
    match name {
        "dbname" | "database" => "path",
        "host" => "hostname",
        "user" => "username",
        "secret" => "password",
        "anchor" => "fragment",
        other => other,
    }
}

// Source of truth for the initial field values: null for the parts a
// DSN may leave out entirely, empty for the rest.
const fn default_slot_value_by_index(idx: usize) -> Value {
    use Slot::*;
    if idx == Username.index()
        || idx == Password.index()
        || idx == Hostname.index()
        || idx == Port.index()
    {
        Value::Null
    } else if idx == Hosts.index() {
        Value::Hosts(Vec::new())
    } else {
        Value::empty_str()
    }
}

/// The merged fields of a parsed DSN: one [`Value`] per [`Slot`], any extra
/// fields introduced by the caller, and the query parameters.
#[derive(Debug, PartialEq, Clone)]
pub struct Fields {
    slots: [Value; SLOT_COUNT],
    extra: IndexMap<String, Value>,
    query_params: QueryParams,
}

impl Default for Fields {
    fn default() -> Self {
        Fields {
            slots: array![i => default_slot_value_by_index(i); SLOT_COUNT],
            extra: IndexMap::new(),
            query_params: QueryParams::new(),
        }
    }
}

impl Fields {
    /// Retrieve the value of a slot.
    pub fn get(&self, slot: Slot) -> &Value {
        &self.slots[slot.index()]
    }

    /// Replace the value of a slot, returning the old value.
    pub fn replace(&mut self, slot: Slot, value: impl Into<Value>) -> Value {
        std::mem::replace(&mut self.slots[slot.index()], value.into())
    }

    pub fn set(&mut self, slot: Slot, value: impl Into<Value>) {
        self.replace(slot, value);
    }

    /// Look up a field by canonical name. Extra fields are found too, the
    /// query parameters are not.
    pub fn get_named(&self, name: &str) -> Option<&Value> {
        match Slot::from_str(name) {
            Ok(slot) => Some(self.get(slot)),
            Err(()) => self.extra.get(name),
        }
    }

    /// Returns whether `name` is a slot name or an extra field.
    pub fn contains(&self, name: &str) -> bool {
        self.get_named(name).is_some()
    }

    /// Set a slot by name, or add or replace an extra field if `name` is
    /// not a slot name.
    pub fn set_named(&mut self, name: &str, value: impl Into<Value>) {
        match Slot::from_str(name) {
            Ok(slot) => self.set(slot, value),
            Err(()) => {
                self.extra.insert(name.to_string(), value.into());
            }
        }
    }

    /// The fields that are not slots, in the order they were added.
    pub fn extra(&self) -> &IndexMap<String, Value> {
        &self.extra
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query_params
    }

    pub fn set_query_params(&mut self, query_params: QueryParams) {
        self.query_params = query_params;
    }
}
