// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! The pipeline core talks to the outside world (chat transport, job board,
//! remote run flag) only through these traits, all `#[async_trait]` for
//! dynamic dispatch.

pub mod flags;
pub mod source;
pub mod transport;

pub use flags::FlagSource;
pub use source::JobSource;
pub use transport::Transport;
