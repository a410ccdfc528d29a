// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translation of runner [`Event`]s into [`Formatter`] calls.

mod buffer;
mod outline;
mod state;

use std::time::Duration;

use crate::{
    cli::Cli,
    embedding::{self, ByteSource, FileSystem},
    event::{Attachment, Element, Event, FileLine, StepOutcome},
    model::{Background, Examples, Feature, Match, Step, StepResult},
    Error, Formatter,
};

use self::{
    buffer::OutputBuffer,
    state::{MatchState, State},
};

/// Translator of runner [`Event`]s into a [`Formatter`] event stream.
///
/// Events must arrive in the order described in the [`event`] module. The
/// [`Adapter`] forwards most of them right away, but:
/// - holds back console output and embeddings until the current background
///   or element opens its first step;
/// - with [`Cli::expand`] set, replays every example row of a scenario
///   outline as a concrete scenario, forwarding each step only once its
///   result is known.
///
/// One [`Adapter`] serves exactly one translation session, and owns all of
/// its state.
///
/// [`event`]: crate::event
#[derive(Debug)]
pub struct Adapter<F, S = FileSystem> {
    /// [`Formatter`] receiving the translated stream.
    formatter: F,

    /// [`ByteSource`] resolving files named by [`Attachment`]s.
    files: S,

    cli: Cli,

    state: State,

    /// Output waiting for a step to be opened.
    buffer: OutputBuffer,
}

impl<F: Formatter> Adapter<F> {
    /// Creates a new [`Adapter`] translating into the given [`Formatter`],
    /// and reading embedded files from the local file system.
    #[must_use]
    pub fn new(formatter: F, cli: Cli) -> Self {
        Self::with_byte_source(formatter, cli, FileSystem)
    }
}

impl<F: Formatter, S: ByteSource> Adapter<F, S> {
    /// Creates a new [`Adapter`] translating into the given [`Formatter`],
    /// and reading embedded files from the given [`ByteSource`].
    #[must_use]
    pub fn with_byte_source(formatter: F, cli: Cli, files: S) -> Self {
        Self {
            formatter,
            files,
            cli,
            state: State::default(),
            buffer: OutputBuffer::default(),
        }
    }

    /// Returns the [`Cli`] options of this [`Adapter`].
    #[must_use]
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Returns the underlying [`Formatter`].
    #[must_use]
    pub const fn formatter(&self) -> &F {
        &self.formatter
    }

    /// Ends the session, returning the underlying [`Formatter`].
    #[must_use]
    pub fn into_inner(self) -> F {
        self.formatter
    }

    /// Indicates whether the current element is an outline being expanded.
    const fn expanding(&self) -> bool {
        self.state.outline && self.cli.expand
    }

    /// Handles the given [`Event`].
    ///
    /// # Errors
    ///
    /// If the [`Event`] breaks the event order contract, or an embedding
    /// payload cannot be resolved. The session should not be continued
    /// afterwards.
    pub fn handle(&mut self, event: Event) -> Result<(), Error> {
        match event {
            Event::FeatureStarted { uri, feature } => {
                self.on_feature_started(&uri, &feature);
            }
            Event::BackgroundStarted(bg) => self.on_background_started(&bg),
            Event::ElementStarted(el) => self.on_element_started(el),
            Event::ExamplesStarted(ex) => self.on_examples_started(ex),
            Event::StepStarted(step) => self.on_step_started(step),
            Event::StepResult(outcome) => self.on_step_result(outcome),
            Event::StepNamed { text, location } => {
                self.on_step_named(text, &location)?;
            }
            Event::StepFinished(duration) => self.on_step_finished(duration),
            Event::ScenarioNamed { location, .. } => {
                self.on_scenario_named(&location)?;
            }
            Event::FeatureFinished => self.on_feature_finished(),
            Event::RunFinished => self.on_run_finished(),
            Event::Output(text) => self.write(text),
            Event::Embedding(attachment) => self.embed(&attachment)?,
        }
        Ok(())
    }

    /// Forwards the `uri` and the started [`Feature`].
    pub fn on_feature_started(&mut self, uri: &str, feature: &Feature) {
        tracing::trace!(uri, feature = %feature.name, "feature started");

        self.formatter.uri(uri);
        self.formatter.feature(feature);
    }

    /// Forwards the started [`Background`].
    pub fn on_background_started(&mut self, background: &Background) {
        tracing::trace!(line = background.line, "background started");

        self.state.outline = false;
        self.state.before_first_step = true;
        self.formatter.background(background);
    }

    /// Forwards the started [`Element`], unless it's an outline to be
    /// expanded, in which case it becomes the template for its rows.
    pub fn on_element_started(&mut self, element: Element) {
        tracing::trace!(kind = %element.kind(), "element started");

        self.state.before_first_step = true;
        match element {
            Element::Scenario(sc) => {
                self.state.outline = false;
                self.formatter.scenario(&sc);
            }
            Element::Outline(outline) => {
                self.state.outline = true;
                if self.cli.expand {
                    self.state.expander.start(outline);
                } else {
                    self.formatter.scenario_outline(&outline);
                }
            }
        }
    }

    /// Forwards the started [`Examples`], or starts replaying their rows
    /// when expanding outlines.
    pub fn on_examples_started(&mut self, examples: Examples) {
        tracing::trace!(line = examples.line, "examples started");

        if self.cli.expand {
            self.state.expander.start_examples(examples);
        } else {
            self.formatter.examples(&examples);
        }
    }

    /// Opens the started [`Step`], or remembers it as a template when
    /// expanding outlines.
    pub fn on_step_started(&mut self, step: Step) {
        tracing::trace!(line = step.line, step = %step.name, "step started");

        if self.expanding() {
            self.state.expander.record_step(step);
            return;
        }

        self.formatter.step(&step);
        self.open_step();

        if self.cli.print_empty_match {
            let args = if self.state.outline {
                step.outline_args()
            } else {
                vec![]
            };
            self.formatter.step_match(&Match::new(args, None));
            self.state.match_state = MatchState::Pending;
        }
    }

    /// Forwards the [`Match`] and [`StepResult`] of the current step.
    ///
    /// A pending placeholder [`Match`] is revised instead of emitting a new
    /// one. Outlines never forward their template results, and expanded
    /// outline rows stash theirs until the step is named.
    pub fn on_step_result(&mut self, outcome: StepOutcome) {
        let StepOutcome {
            arguments,
            location,
            status,
            failure,
        } = outcome;
        tracing::trace!(%status, "step result");

        let step_match = Match::new(arguments, location);
        let result = StepResult::new(status, failure.map(|f| f.to_string()));

        if self.state.match_state == MatchState::Pending {
            self.formatter.revise_last_match(&step_match);
            self.state.match_state = MatchState::Finalized;
        } else if !self.expanding() {
            self.formatter.step_match(&step_match);
        }

        if !self.state.outline {
            self.formatter.result(&result);
        } else if self.cli.expand {
            self.state.expander.stash(step_match, result);
        }
    }

    /// Forwards the concrete step of an expanded outline row along with its
    /// stashed [`Match`] and [`StepResult`].
    ///
    /// # Errors
    ///
    /// If the step wasn't started or its result wasn't reported before.
    pub fn on_step_named(
        &mut self,
        text: String,
        location: &FileLine,
    ) -> Result<(), Error> {
        if !(self.expanding() && self.state.expander.in_row()) {
            return Ok(());
        }
        tracing::trace!(%location, step = %text, "step named");

        let (step, step_match, result) =
            self.state.expander.take_step(text, location.line)?;
        self.formatter.step(&step);
        self.open_step();
        self.formatter.step_match(&step_match);
        self.formatter.result(&result);
        Ok(())
    }

    /// Forwards the concrete scenario of the next expanded outline row.
    ///
    /// # Errors
    ///
    /// If the current examples table has no more rows.
    pub fn on_scenario_named(&mut self, location: &FileLine) -> Result<(), Error> {
        if !(self.expanding() && self.state.expander.in_row()) {
            return Ok(());
        }
        tracing::trace!(%location, "scenario named");

        let scenario = self.state.expander.next_scenario()?;
        self.formatter.scenario(&scenario);
        Ok(())
    }

    /// Forwards the duration of the finished step, if it's known.
    pub fn on_step_finished(&mut self, duration: Option<Duration>) {
        if self.expanding() && !self.state.expander.in_row() {
            // Template steps of an expanded outline are never rendered.
            tracing::debug!(
                ?duration,
                "dropping duration of an outline template step",
            );
            return;
        }

        if let Some(duration) = duration {
            self.formatter.append_duration(duration.as_secs_f64());
        }
    }

    /// Forwards the end of the current feature.
    pub fn on_feature_finished(&mut self) {
        tracing::trace!("feature finished");

        self.formatter.eof();
    }

    /// Forwards the end of the run.
    pub fn on_run_finished(&mut self) {
        tracing::trace!("run finished");

        self.formatter.done();
    }

    /// Forwards console output, or buffers it until a step is opened.
    pub fn write(&mut self, text: String) {
        if self.state.before_first_step {
            self.buffer.push_write(text);
        } else {
            self.formatter.write(&text);
        }
    }

    /// Resolves the payload of the given [`Attachment`] and forwards it, or
    /// buffers it until a step is opened.
    ///
    /// # Errors
    ///
    /// If the payload cannot be resolved. See [`embedding::resolve()`] for
    /// details.
    pub fn embed(&mut self, attachment: &Attachment) -> Result<(), Error> {
        let emb = embedding::resolve(
            &attachment.source,
            &attachment.mime_type,
            &self.files,
        )?;
        tracing::trace!(
            mime_type = %emb.mime_type,
            len = emb.data.len(),
            label = ?attachment.label,
            "embedding",
        );

        if self.state.before_first_step {
            self.buffer.push_embedding(emb);
        } else {
            self.formatter.embedding(&emb.mime_type, &emb.data);
        }
        Ok(())
    }

    /// Marks a step as opened, releasing the buffered output.
    fn open_step(&mut self) {
        self.buffer.flush(&mut self.formatter);
        self.state.before_first_step = false;
    }
}
