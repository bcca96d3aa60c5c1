// SPDX-License-Identifier: MPL-2.0
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0.  If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright 2024 dsnparse contributors

mod test_environ;
mod test_parse;

pub use anyhow::Result as AResult;
pub use context::get_environment;
