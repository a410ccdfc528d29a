// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Consumers of the translated event stream.

pub mod recorder;

use crate::model::{
    Background, Examples, Feature, Match, Scenario, ScenarioOutline, Step,
    StepResult,
};

#[doc(inline)]
pub use self::recorder::{Call, Recorder};

/// Renderer of the [Gherkin formatter][1] event stream.
///
/// An [`Adapter`] invokes these methods following the structural grammar
/// of the stream:
/// ```text
/// uri feature background? (
///     (scenario | scenario_outline examples*)
///     (step step_match? result? append_duration?)*
/// )* eof ... done
/// ```
/// with [`Formatter::write()`] and [`Formatter::embedding()`] only ever
/// issued once a step has been opened.
///
/// [`Adapter`]: crate::Adapter
/// [1]: https://github.com/cucumber/gherkin
pub trait Formatter {
    /// Path of the `.feature` file the following [`Feature`] comes from.
    fn uri(&mut self, uri: &str);

    fn feature(&mut self, feature: &Feature);

    fn background(&mut self, background: &Background);

    fn scenario(&mut self, scenario: &Scenario);

    fn scenario_outline(&mut self, outline: &ScenarioOutline);

    fn examples(&mut self, examples: &Examples);

    fn step(&mut self, step: &Step);

    /// [`Match`] of the most recently opened [`Step`].
    fn step_match(&mut self, step_match: &Match);

    /// Replaces the most recently emitted [`Match`] with the given one.
    ///
    /// Used to deliver the real [`Match`] of a [`Step`] for which a
    /// placeholder has already been emitted, so arguments get highlighted in
    /// its [`StepResult`] without a duplicated [`Match`] record.
    fn revise_last_match(&mut self, step_match: &Match);

    fn result(&mut self, result: &StepResult);

    /// Duration of the most recently finished [`Step`], in seconds.
    fn append_duration(&mut self, seconds: f64);

    /// Console output.
    fn write(&mut self, text: &str);

    /// Binary attachment.
    fn embedding(&mut self, mime_type: &str, data: &[u8]);

    /// End of the current `.feature` file.
    fn eof(&mut self);

    /// End of the whole run.
    fn done(&mut self);
}

impl<F: Formatter + ?Sized> Formatter for &mut F {
    fn uri(&mut self, uri: &str) {
        (**self).uri(uri);
    }

    fn feature(&mut self, feature: &Feature) {
        (**self).feature(feature);
    }

    fn background(&mut self, background: &Background) {
        (**self).background(background);
    }

    fn scenario(&mut self, scenario: &Scenario) {
        (**self).scenario(scenario);
    }

    fn scenario_outline(&mut self, outline: &ScenarioOutline) {
        (**self).scenario_outline(outline);
    }

    fn examples(&mut self, examples: &Examples) {
        (**self).examples(examples);
    }

    fn step(&mut self, step: &Step) {
        (**self).step(step);
    }

    fn step_match(&mut self, step_match: &Match) {
        (**self).step_match(step_match);
    }

    fn revise_last_match(&mut self, step_match: &Match) {
        (**self).revise_last_match(step_match);
    }

    fn result(&mut self, result: &StepResult) {
        (**self).result(result);
    }

    fn append_duration(&mut self, seconds: f64) {
        (**self).append_duration(seconds);
    }

    fn write(&mut self, text: &str) {
        (**self).write(text);
    }

    fn embedding(&mut self, mime_type: &str, data: &[u8]) {
        (**self).embedding(mime_type, data);
    }

    fn eof(&mut self) {
        (**self).eof();
    }

    fn done(&mut self) {
        (**self).done();
    }
}

impl<F: Formatter + ?Sized> Formatter for Box<F> {
    fn uri(&mut self, uri: &str) {
        (**self).uri(uri);
    }

    fn feature(&mut self, feature: &Feature) {
        (**self).feature(feature);
    }

    fn background(&mut self, background: &Background) {
        (**self).background(background);
    }

    fn scenario(&mut self, scenario: &Scenario) {
        (**self).scenario(scenario);
    }

    fn scenario_outline(&mut self, outline: &ScenarioOutline) {
        (**self).scenario_outline(outline);
    }

    fn examples(&mut self, examples: &Examples) {
        (**self).examples(examples);
    }

    fn step(&mut self, step: &Step) {
        (**self).step(step);
    }

    fn step_match(&mut self, step_match: &Match) {
        (**self).step_match(step_match);
    }

    fn revise_last_match(&mut self, step_match: &Match) {
        (**self).revise_last_match(step_match);
    }

    fn result(&mut self, result: &StepResult) {
        (**self).result(result);
    }

    fn append_duration(&mut self, seconds: f64) {
        (**self).append_duration(seconds);
    }

    fn write(&mut self, text: &str) {
        (**self).write(text);
    }

    fn embedding(&mut self, mime_type: &str, data: &[u8]) {
        (**self).embedding(mime_type, data);
    }

    fn eof(&mut self) {
        (**self).eof();
    }

    fn done(&mut self) {
        (**self).done();
    }
}
