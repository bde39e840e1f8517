// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules. Each accepts `&Database` and runs on the single
//! background writer thread via `conn.call()`.

pub mod flags;
pub mod postings;
pub mod skills;
pub mod tags;
pub mod users;
pub mod watermark;
