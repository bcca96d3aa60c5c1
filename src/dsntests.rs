// SPDX-License-Identifier: MPL-2.0
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0.  If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright 2024 dsnparse contributors

//! Runs the test cases in `src/dsntests.md`. Each ```` ```test ```` block
//! starts from a clean state and holds lines like
//!
//! ```text
//! SET port=1234            override a field in the next PARSE
//! DEFAULT port=1234        supply a default for the next PARSE
//! PARSE scheme://host      must parse
//! REJECT host              must not parse
//! EXPECT hostname=host     compare a field or derived value as text
//! NULL password            the field must be absent
//! ```

use std::fs;

use crate::{
    fields::merge::Overrides,
    result::{parse_with, ParseResult},
    value::{normalize_str, Value},
    DsnError,
};

#[derive(Debug, PartialEq, Eq, Clone)]
struct Failure(String);

type TestResult<T> = Result<T, Failure>;

impl From<DsnError> for Failure {
    fn from(value: DsnError) -> Self {
        Failure::new(format!("dsn error: {value}"))
    }
}

impl Failure {
    fn new(msg: impl Into<String>) -> Self {
        Failure(msg.into())
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

macro_rules! fail {
    ($($toks:tt),*) => {
        return Err(Failure::new(format!( $($toks),* )))
    }
}

struct DsnTester {
    state: State,
    active: bool,
    section: String,
}

impl DsnTester {
    fn new() -> Self {
        DsnTester {
            state: State::default(),
            active: false,
            section: "".into(),
        }
    }

    fn process_line(&mut self, line: &str) -> TestResult<()> {
        if !self.active {
            if line == "```test" {
                self.state = State::default();
                self.active = true;
            } else if line.starts_with('#') {
                self.section = line.to_string();
            }
            return Ok(());
        }
        if line == "```" {
            self.active = false;
            return Ok(());
        }

        self.state.process_line(line)
    }

    fn process_text(&mut self, file: &str, text: &str) -> usize {
        let mut blocks = 0;
        self.section = "".into();
        for (idx, line) in text.lines().enumerate() {
            if !self.active && line == "```test" {
                blocks += 1;
            }
            if let Err(failure) = self.process_line(line) {
                panic!(
                    "{file}:{lineno}: in section {sec:?}: {failure}",
                    lineno = idx + 1,
                    sec = self.section,
                )
            }
        }
        blocks
    }
}

#[derive(Debug, Default)]
struct State {
    overrides: Overrides,
    result: Option<ParseResult>,
}

impl State {
    fn process_line(&mut self, line: &str) -> TestResult<()> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        if let Some(dsn) = line.strip_prefix("PARSE ") {
            self.process_parse(dsn.trim_start())
        } else if let Some(dsn) = line.strip_prefix("REJECT ") {
            self.process_reject(dsn.trim_start())
        } else if let Some(assign) = line.strip_prefix("SET ") {
            let (key, value) = self.parse_assign(assign)?;
            self.overrides.set(key, normalize_str(value));
            Ok(())
        } else if let Some(assign) = line.strip_prefix("DEFAULT ") {
            let (key, value) = self.parse_assign(assign)?;
            self.overrides.set_default(key, normalize_str(value));
            Ok(())
        } else if let Some(assign) = line.strip_prefix("EXPECT ") {
            let (key, value) = self.parse_assign(assign)?;
            self.process_expect(key, value)
        } else if let Some(key) = line.strip_prefix("NULL ") {
            self.process_null(key.trim())
        } else {
            Err(Failure::new(format!("syntax error: {line}")))
        }
    }

    fn parse_assign<'a>(&self, assignment: &'a str) -> TestResult<(&'a str, &'a str)> {
        let Some((key, value)) = assignment.split_once('=') else {
            fail!("expected KEY=VALUE, found {assignment}")
        };
        Ok((key, value))
    }

    fn result(&self) -> TestResult<&ParseResult> {
        match &self.result {
            Some(r) => Ok(r),
            None => fail!("no successful PARSE yet"),
        }
    }

    fn lookup(&self, key: &str) -> TestResult<Value> {
        let result = self.result()?;
        match key {
            "geturl" => Ok(result.geturl().into()),
            "dialect" => Ok(result.dialect().as_str().into()),
            _ => {
                if let Some(param) = key.strip_prefix("query_params.") {
                    match result.query_params().get(param) {
                        Some(v) => Ok(v.clone()),
                        None => fail!("no query parameter {param:?}"),
                    }
                } else {
                    Ok(result.get(key)?)
                }
            }
        }
    }

    fn process_parse(&mut self, dsn: &str) -> TestResult<()> {
        self.result = Some(parse_with(dsn, &self.overrides)?);
        Ok(())
    }

    fn process_reject(&mut self, dsn: &str) -> TestResult<()> {
        if parse_with(dsn, &self.overrides).is_err() {
            Ok(())
        } else {
            fail!("this dsn should have been rejected");
        }
    }

    fn process_expect(&mut self, key: &str, expected: &str) -> TestResult<()> {
        let found = self.lookup(key)?;
        if found.is_null() {
            fail!("expected {key}={expected:?}, found null")
        }
        let found_str = found.str_value();
        if found_str == expected {
            return Ok(());
        }
        fail!("expected {key}={expected:?}, found {found_str:?}")
    }

    fn process_null(&mut self, key: &str) -> TestResult<()> {
        let found = self.lookup(key)?;
        if found.is_null() {
            Ok(())
        } else {
            fail!("expected {key} to be null, found {found:?}")
        }
    }
}

#[test]
fn test_dsn_test_cases() {
    let source = "src/dsntests.md";
    let test_cases = fs::read_to_string(source).unwrap();

    let mut tester = DsnTester::new();
    let blocks = tester.process_text(source, &test_cases);
    assert!(blocks > 0, "no test blocks found in {source}");
}

#[test]
fn test_harness_catches_mistakes() {
    let text = "```test\nPARSE scheme://host\nEXPECT hostname=other\n```\n";
    let outcome = std::panic::catch_unwind(|| {
        DsnTester::new().process_text("inline", text);
    });
    assert!(outcome.is_err());
}
