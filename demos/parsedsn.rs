// SPDX-License-Identifier: MPL-2.0
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0.  If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright 2024 dsnparse contributors
use std::env;

use anyhow::{bail, Result as AResult};
use log::info;

use dsnparse::{parse, result::COMPONENT_NAMES};

fn main() -> AResult<()> {
    configure_logging()?;

    let Some(dsn) = env::args().nth(1) else {
        bail!("Usage: parsedsn DSN");
    };
    let parsed = parse(&dsn)?;
    info!("parsed as {}", parsed.dialect());

    for (name, value) in COMPONENT_NAMES.iter().zip(&parsed) {
        println!("{name:>12}: {value}");
    }
    for (i, host) in parsed.hosts().iter().enumerate() {
        println!("{:>12}: {host}", format!("host {i}"));
    }
    println!("{:>12}: {}", "database", parsed.database());
    for (key, value) in parsed.query_params() {
        println!("{:>12}: {value}", format!("?{key}"));
    }
    println!("{:>12}: {}", "url", parsed.geturl());
    Ok(())
}

fn configure_logging() -> AResult<()> {
    let mut builder = simplelog::ConfigBuilder::new();
    builder.set_thread_level(log::LevelFilter::Off);
    let _ = builder.set_time_offset_to_local();
    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        builder.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}
