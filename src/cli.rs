// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI options of an [`Adapter`].
//!
//! [`Cli`] is a [`clap::Args`] group, so it may be flattened into the CLI of
//! a host runner:
//! ```rust
//! # use cucumber_adapter::cli;
//! #
//! #[derive(clap::Parser)]
//! struct Opts {
//!     #[command(flatten)]
//!     adapter: cli::Cli,
//! }
//! ```
//!
//! [`Adapter`]: crate::Adapter

use smart_default::SmartDefault;

pub use clap::{Args, Parser};

/// CLI options of an [`Adapter`].
///
/// Both options are fixed for the whole lifetime of an [`Adapter`].
///
/// [`Adapter`]: crate::Adapter
#[derive(Clone, Copy, Debug, SmartDefault, clap::Args)]
#[group(skip)]
pub struct Cli {
    /// Render every example row of a scenario outline as a standalone
    /// scenario, instead of a single outline with examples tables.
    #[arg(long, global = true)]
    #[default(false)]
    pub expand: bool,

    /// Emit a placeholder match as soon as a step starts, before the real
    /// one is known, so that renderers can highlight its arguments early.
    #[arg(long, global = true)]
    #[default(false)]
    pub print_empty_match: bool,
}

impl Cli {
    /// Returns [`Cli`] with outline expansion enabled.
    #[must_use]
    pub const fn expanded(mut self) -> Self {
        self.expand = true;
        self
    }

    /// Returns [`Cli`] with placeholder matches enabled.
    #[must_use]
    pub const fn with_empty_match(mut self) -> Self {
        self.print_empty_match = true;
        self
    }
}
