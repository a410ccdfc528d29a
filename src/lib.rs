// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translation of Cucumber runner lifecycle callbacks into the stricter
//! event stream of a [Gherkin formatter][1].
//!
//! A runner reports what happens as [`Event`]s, and an [`Adapter`] reshapes
//! them into [`Formatter`] calls: it keeps the structural order the
//! formatter requires, holds back console output and embeddings until they
//! may be legally emitted, and (optionally) expands scenario outlines into
//! one concrete scenario per example row.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use cucumber_adapter::{
//!     event::{Element, Event, StepOutcome},
//!     formatter::Recorder,
//!     model::{Feature, Scenario, Status, Step},
//!     Adapter, Cli,
//! };
//!
//! # fn main() -> Result<(), cucumber_adapter::Error> {
//! let feature = Feature {
//!     comments: vec![],
//!     tags: vec![],
//!     keyword: "Feature".into(),
//!     name: "Eating".into(),
//!     description: String::new(),
//!     line: 1,
//!     id: "eating".into(),
//! };
//! let scenario = Scenario {
//!     comments: vec![],
//!     tags: vec![],
//!     keyword: "Scenario".into(),
//!     name: "cukes".into(),
//!     description: String::new(),
//!     line: 2,
//!     id: "eating;cukes".into(),
//! };
//! let step = Step {
//!     comments: vec![],
//!     keyword: "Given ".into(),
//!     name: "5 cukes".into(),
//!     line: 3,
//!     rows: None,
//!     doc_string: None,
//! };
//!
//! let mut adapter = Adapter::new(Recorder::new(), Cli::default());
//! for ev in [
//!     Event::FeatureStarted { uri: "eating.feature".into(), feature },
//!     Event::ElementStarted(Element::Scenario(scenario)),
//!     Event::Output("hungry".into()),
//!     Event::StepStarted(step),
//!     Event::StepResult(StepOutcome::new(vec![], None, Status::Passed)),
//!     Event::StepFinished(Some(Duration::from_millis(1500))),
//!     Event::FeatureFinished,
//!     Event::RunFinished,
//! ] {
//!     adapter.handle(ev)?;
//! }
//!
//! assert_eq!(
//!     adapter.into_inner().names(),
//!     [
//!         "uri", "feature", "scenario", "step", "write", "match", "result",
//!         "append_duration", "eof", "done",
//!     ],
//! );
//! # Ok(())
//! # }
//! ```
//!
//! [1]: https://github.com/cucumber/gherkin

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unused_qualifications,
    unreachable_pub
)]

pub mod adapter;
pub mod cli;
pub mod embedding;
pub mod error;
pub mod event;
pub mod formatter;
pub mod model;

pub use gherkin;

#[doc(inline)]
pub use self::{
    adapter::Adapter,
    cli::Cli,
    error::{Error, Result},
    event::Event,
    formatter::Formatter,
};
