// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of translating runner events.
//!
//! Every [`Error`] here is fatal for the translation session it happened in:
//! either the runner broke the event order contract, or an embedding payload
//! couldn't be resolved. Failures of step bodies are not errors, they're
//! reported as [`StepResult`]s.
//!
//! [`StepResult`]: crate::model::StepResult

use derive_more::{Display, Error, From};

use crate::embedding::EmbeddingError;

/// Error of an [`Adapter`] translation session.
///
/// [`Adapter`]: crate::Adapter
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Element keyword is neither a scenario nor a scenario outline one.
    #[display("Unrecognized element kind: {_0}")]
    UnknownElementKind(#[error(not(source))] String),

    /// Location isn't in a `path:line` form.
    #[display("Malformed `path:line` location: {_0}")]
    MalformedLocation(#[error(not(source))] String),

    /// More scenarios were announced than the examples table has rows.
    #[display(
        "Example row {ordinal} is out of range: the table has {rows} data rows"
    )]
    RowOutOfRange {
        /// 1-based ordinal of the requested row.
        ordinal: usize,

        /// Number of data rows in the current examples table.
        rows: usize,
    },

    /// Example row was announced outside of a scenario outline.
    #[display("Example row announced outside of a scenario outline")]
    MissingOutline,

    /// Expanded outline step was named before being started.
    #[display("Outline step named before it was started")]
    MissingStepTemplate,

    /// Expanded outline step was named before its result was reported.
    #[display("Outline step named before its result was reported")]
    MissingStepResult,

    /// Embedding payload couldn't be resolved.
    #[display("{_0}")]
    #[from]
    Embedding(EmbeddingError),
}

/// Alias for a [`Result`] with an [`Error`].
///
/// [`Result`]: std::result::Result
pub type Result<T> = std::result::Result<T, Error>;
