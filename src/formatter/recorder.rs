// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Formatter`] recording every call it receives.

use derive_more::with_trait::Deref;
use serde::Serialize;

use crate::model::{
    Background, Examples, Feature, Match, Scenario, ScenarioOutline, Step,
    StepResult,
};

use super::Formatter;

/// Single [`Formatter`] method invocation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Call {
    Uri(String),
    Feature(Feature),
    Background(Background),
    Scenario(Scenario),
    ScenarioOutline(ScenarioOutline),
    Examples(Examples),
    Step(Step),
    Match(Match),
    Result(StepResult),
    AppendDuration(f64),
    Write(String),
    Embedding { mime_type: String, data: Vec<u8> },
    Eof,
    Done,
}

impl Call {
    /// Short name of the invoked [`Formatter`] method.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Uri(_) => "uri",
            Self::Feature(_) => "feature",
            Self::Background(_) => "background",
            Self::Scenario(_) => "scenario",
            Self::ScenarioOutline(_) => "scenario_outline",
            Self::Examples(_) => "examples",
            Self::Step(_) => "step",
            Self::Match(_) => "match",
            Self::Result(_) => "result",
            Self::AppendDuration(_) => "append_duration",
            Self::Write(_) => "write",
            Self::Embedding { .. } => "embedding",
            Self::Eof => "eof",
            Self::Done => "done",
        }
    }
}

/// [`Formatter`] keeping all the received [`Call`]s in order.
#[derive(Clone, Debug, Default, Deref)]
pub struct Recorder {
    #[deref(forward)]
    calls: Vec<Call>,
}

impl Recorder {
    /// Creates a new empty [`Recorder`].
    #[must_use]
    pub const fn new() -> Self {
        Self { calls: Vec::new() }
    }

    /// Returns [`Call::name()`]s of all the recorded [`Call`]s.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.calls.iter().map(Call::name).collect()
    }

    /// Takes all the recorded [`Call`]s out of this [`Recorder`].
    #[must_use]
    pub fn into_calls(self) -> Vec<Call> {
        self.calls
    }
}

impl Formatter for Recorder {
    fn uri(&mut self, uri: &str) {
        self.calls.push(Call::Uri(uri.to_owned()));
    }

    fn feature(&mut self, feature: &Feature) {
        self.calls.push(Call::Feature(feature.clone()));
    }

    fn background(&mut self, background: &Background) {
        self.calls.push(Call::Background(background.clone()));
    }

    fn scenario(&mut self, scenario: &Scenario) {
        self.calls.push(Call::Scenario(scenario.clone()));
    }

    fn scenario_outline(&mut self, outline: &ScenarioOutline) {
        self.calls.push(Call::ScenarioOutline(outline.clone()));
    }

    fn examples(&mut self, examples: &Examples) {
        self.calls.push(Call::Examples(examples.clone()));
    }

    fn step(&mut self, step: &Step) {
        self.calls.push(Call::Step(step.clone()));
    }

    fn step_match(&mut self, step_match: &Match) {
        self.calls.push(Call::Match(step_match.clone()));
    }

    /// Replaces the last recorded [`Call::Match`], or records a new one if
    /// there is none yet.
    fn revise_last_match(&mut self, step_match: &Match) {
        let last = self.calls.iter_mut().rev().find_map(|c| match c {
            Call::Match(m) => Some(m),
            _ => None,
        });
        match last {
            Some(m) => *m = step_match.clone(),
            None => self.calls.push(Call::Match(step_match.clone())),
        }
    }

    fn result(&mut self, result: &StepResult) {
        self.calls.push(Call::Result(result.clone()));
    }

    fn append_duration(&mut self, seconds: f64) {
        self.calls.push(Call::AppendDuration(seconds));
    }

    fn write(&mut self, text: &str) {
        self.calls.push(Call::Write(text.to_owned()));
    }

    fn embedding(&mut self, mime_type: &str, data: &[u8]) {
        self.calls.push(Call::Embedding {
            mime_type: mime_type.to_owned(),
            data: data.to_vec(),
        });
    }

    fn eof(&mut self) {
        self.calls.push(Call::Eof);
    }

    fn done(&mut self) {
        self.calls.push(Call::Done);
    }
}
