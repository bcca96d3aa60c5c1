// SPDX-License-Identifier: MPL-2.0
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0.  If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright 2024 dsnparse contributors
use indexmap::IndexMap;
use url::form_urlencoded;

use crate::value::{normalize, Value};

/// Options found in the query string of a DSN, in order of first
/// appearance. A key that occurs more than once maps to a [`Value::List`].
pub type QueryParams = IndexMap<String, Value>;

/// Decode a query string such as `a=1&b=x+y&b=%7A` into normalized
/// [`QueryParams`]: `{"a": 1, "b": ["x y", "z"]}`.
pub fn parse_query_params(query: &str) -> QueryParams {
    let mut collected: IndexMap<String, Vec<String>> = IndexMap::new();
    for (k, v) in form_urlencoded::parse(query.as_bytes()) {
        collected
            .entry(k.into_owned())
            .or_default()
            .push(v.into_owned());
    }

    let params: QueryParams = collected
        .into_iter()
        .map(|(k, mut values)| {
            let value = if values.len() == 1 {
                Value::Str(values.remove(0))
            } else {
                Value::List(values.into_iter().map(Value::Str).collect())
            };
            (k, normalize(value))
        })
        .collect();

    if !params.is_empty() {
        let keys: Vec<&str> = params.keys().map(String::as_str).collect();
        debug!("parsed query_params with keys {}", keys.join(", "));
    }
    params
}

/// Render [`QueryParams`] as a form encoded query string. List values
/// repeat their key.
pub fn encode_query_params(params: &QueryParams) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (k, v) in params {
        match v {
            Value::List(items) => {
                for item in items {
                    serializer.append_pair(k, &item.str_value());
                }
            }
            other => {
                serializer.append_pair(k, &other.str_value());
            }
        }
    }
    serializer.finish()
}
