// SPDX-License-Identifier: MPL-2.0
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0.  If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright 2024 dsnparse contributors
use claims::{assert_err_eq, assert_ok};
use dsnparse::{
    parse_environ, parse_environ_with, parse_environs, parse_environs_with, DsnError, Overrides,
    ParseResult,
};

use crate::{get_environment, AResult};

#[test]
fn test_parse_environ() -> AResult<()> {
    let mut env = get_environment();
    env.set("DSNPARSE_CI_SINGLE", "scheme://user:pw@host:1234/db");

    let r = parse_environ("DSNPARSE_CI_SINGLE")?;
    assert_eq!(r.hostname().as_deref(), Some("host"));
    assert_eq!(r.port(), Some(1234));
    assert_eq!(r.database(), "db");
    Ok(())
}

#[test]
fn test_parse_environ_missing() {
    let mut env = get_environment();
    env.remove("DSNPARSE_CI_MISSING");

    assert_err_eq!(
        parse_environ("DSNPARSE_CI_MISSING"),
        DsnError::MissingEnvironmentVariable("DSNPARSE_CI_MISSING".to_string())
    );
}

#[test]
fn test_parse_environ_with_overrides() -> AResult<()> {
    let mut env = get_environment();
    env.set("DSNPARSE_CI_OVERRIDE", "host=envhost port=1");

    let overrides = Overrides::new().with("port", 2).with_default("dbname", "fallback");
    let r: ParseResult = parse_environ_with("DSNPARSE_CI_OVERRIDE", &overrides)?;
    assert_eq!(r.hostname().as_deref(), Some("envhost"));
    assert_eq!(r.port(), Some(2));
    assert_eq!(r.database(), "fallback");
    Ok(())
}

#[test]
fn test_parse_environs() -> AResult<()> {
    let mut env = get_environment();
    env.set("DSNPARSE_CI_MULTI_1", "scheme://one/db1");
    env.set("DSNPARSE_CI_MULTI_2", "scheme://two/db2");
    env.set("DSNPARSE_CI_MULTI_3", "scheme://three/db3");
    env.set("DSNPARSE_CI_MULTI_5", "scheme://five/db5");

    let results = parse_environs("DSNPARSE_CI_MULTI")?;
    let hosts: Vec<String> = results
        .iter()
        .filter_map(|r| r.hostname().map(|h| h.into_owned()))
        .collect();
    assert_eq!(hosts, ["one", "two", "three"]);
    Ok(())
}

#[test]
fn test_parse_environs_plain_and_zero() -> AResult<()> {
    let mut env = get_environment();
    env.set("DSNPARSE_CI_ZERO", "scheme://plain");
    env.set("DSNPARSE_CI_ZERO_0", "scheme://zero");
    env.set("DSNPARSE_CI_ZERO_1", "scheme://one");

    let results = parse_environs("DSNPARSE_CI_ZERO")?;
    let hosts: Vec<String> = results
        .iter()
        .filter_map(|r| r.hostname().map(|h| h.into_owned()))
        .collect();
    assert_eq!(hosts, ["plain", "zero", "one"]);
    Ok(())
}

#[test]
fn test_parse_environs_none_set() {
    let _env = get_environment();
    let results = assert_ok!(parse_environs("DSNPARSE_CI_NOTHING_HERE"));
    assert!(results.is_empty());
}

#[test]
fn test_parse_environs_bad_dsn() {
    let mut env = get_environment();
    env.set("DSNPARSE_CI_BAD_1", "scheme://host/db");
    env.set("DSNPARSE_CI_BAD_2", "not a dsn");

    assert_err_eq!(
        parse_environs_with::<ParseResult>("DSNPARSE_CI_BAD", &Overrides::new()),
        DsnError::NoDialectMatch("not a dsn".to_string())
    );
}
