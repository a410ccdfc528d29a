// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Position of an [`Adapter`] inside the translated stream.
//!
//! [`Adapter`]: super::Adapter

use super::outline::Expander;

/// Whether the [`Match`] of the current step is still a placeholder.
///
/// [`Match`]: crate::model::Match
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum MatchState {
    /// Last emitted [`Match`] is final, the next one is emitted anew.
    ///
    /// [`Match`]: crate::model::Match
    #[default]
    Finalized,

    /// Placeholder [`Match`] has been emitted, the real one revises it.
    ///
    /// [`Match`]: crate::model::Match
    Pending,
}

/// State of a single translation session.
#[derive(Clone, Debug, Default)]
pub(crate) struct State {
    /// Whether the most recently started element is an outline.
    pub(crate) outline: bool,

    /// Whether the current background or element hasn't opened any step
    /// yet, so output must be buffered.
    pub(crate) before_first_step: bool,

    pub(crate) match_state: MatchState,

    pub(crate) expander: Expander,
}
