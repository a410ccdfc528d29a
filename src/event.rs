// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Lifecycle callbacks of a test runner, as consumed by an [`Adapter`].
//!
//! The top-level enum here is [`Event`]. Events must be delivered in the
//! runner's order:
//! feature → [background] → element → [examples → per row: scenario name,
//! steps, step results] → feature finished → run finished.
//!
//! [`Adapter`]: crate::Adapter

use std::{fmt, str::FromStr, time::Duration};

use derive_more::with_trait::Display;
use itertools::Itertools as _;

use crate::{
    model::{self, Argument, Status},
    Error,
};

/// Single runner lifecycle callback.
#[derive(Clone, Debug)]
pub enum Event {
    /// [`Feature`] execution started.
    ///
    /// [`Feature`]: model::Feature
    FeatureStarted {
        /// Path of the `.feature` file.
        uri: String,

        /// Started [`Feature`].
        ///
        /// [`Feature`]: model::Feature
        feature: model::Feature,
    },

    /// [`Background`] execution started.
    ///
    /// [`Background`]: model::Background
    BackgroundStarted(model::Background),

    /// [`Element`] execution started.
    ElementStarted(Element),

    /// [`Examples`] table of the current outline started.
    ///
    /// [`Examples`]: model::Examples
    ExamplesStarted(model::Examples),

    /// [`Step`] execution started.
    ///
    /// [`Step`]: model::Step
    StepStarted(model::Step),

    /// [`Step`] produced its result.
    ///
    /// [`Step`]: model::Step
    StepResult(StepOutcome),

    /// Name of an executed [`Step`] became known.
    ///
    /// For an outline row this is the step with its placeholders substituted.
    ///
    /// [`Step`]: model::Step
    StepNamed {
        /// Step text with matched arguments formatted in.
        text: String,

        /// Location of the step in the `.feature` file.
        location: FileLine,
    },

    /// [`Step`] finished, taking the given time if it's known.
    ///
    /// [`Step`]: model::Step
    StepFinished(Option<Duration>),

    /// Name of a scenario became known.
    ///
    /// For an outline this is announced once per example row.
    ScenarioNamed {
        keyword: String,
        name: String,
        location: FileLine,
    },

    /// [`Feature`] execution finished.
    ///
    /// [`Feature`]: model::Feature
    FeatureFinished,

    /// Whole run finished.
    RunFinished,

    /// Console output of a step or hook.
    Output(String),

    /// Attachment embedded by a step or hook.
    Embedding(Attachment),
}

/// Discriminant of an [`Element`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ElementKind {
    /// Regular scenario.
    #[display("Scenario")]
    Scenario,

    /// Scenario outline parameterized by examples.
    #[display("Scenario Outline")]
    Outline,
}

impl FromStr for ElementKind {
    type Err = Error;

    fn from_str(keyword: &str) -> Result<Self, Self::Err> {
        match keyword.trim() {
            "Scenario" | "Example" => Ok(Self::Scenario),
            "Scenario Outline" | "Scenario Template" => Ok(Self::Outline),
            other => Err(Error::UnknownElementKind(other.to_owned())),
        }
    }
}

/// Scenario or scenario outline inside a [`Feature`].
///
/// [`Feature`]: model::Feature
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Element {
    Scenario(model::Scenario),
    Outline(model::ScenarioOutline),
}

impl Element {
    /// Returns the [`ElementKind`] of this [`Element`].
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::Scenario(_) => ElementKind::Scenario,
            Self::Outline(_) => ElementKind::Outline,
        }
    }

    /// Converts the given [`gherkin::Scenario`], picking
    /// [`Element::Outline`] whenever it has [`gherkin::Examples`].
    #[must_use]
    pub fn from_gherkin(
        feature: &model::Feature,
        scenario: &gherkin::Scenario,
    ) -> Self {
        if scenario.examples.is_empty() {
            Self::Scenario(model::Scenario::from_gherkin(feature, scenario))
        } else {
            Self::Outline(model::ScenarioOutline::from_gherkin(
                feature, scenario,
            ))
        }
    }
}

/// `path:line` location inside a `.feature` file.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("{path}:{line}")]
pub struct FileLine {
    pub path: String,
    pub line: usize,
}

impl FileLine {
    /// Creates a new [`FileLine`].
    #[must_use]
    pub fn new(path: impl Into<String>, line: usize) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }
}

impl FromStr for FileLine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.rsplit_once(':')
            .and_then(|(path, line)| Some((path, line.trim().parse().ok()?)))
            .map(|(path, line)| Self::new(path, line))
            .ok_or_else(|| Error::MalformedLocation(s.to_owned()))
    }
}

/// Result of executing a step, as reported by the runner.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    /// Arguments captured by the matched step definition.
    pub arguments: Vec<Argument>,

    /// Location of the matched step definition, if any.
    pub location: Option<String>,

    pub status: Status,

    /// Failure raised by the step body, if any.
    pub failure: Option<StepFailure>,
}

impl StepOutcome {
    /// Creates a new [`StepOutcome`] without a [`StepFailure`].
    #[must_use]
    pub fn new(
        arguments: Vec<Argument>,
        location: Option<String>,
        status: Status,
    ) -> Self {
        Self {
            arguments,
            location,
            status,
            failure: None,
        }
    }

    /// Attaches the given [`StepFailure`] to this [`StepOutcome`].
    #[must_use]
    pub fn with_failure(mut self, failure: StepFailure) -> Self {
        self.failure = Some(failure);
        self
    }
}

/// Error raised by a step body.
///
/// Displayed as `<message> (<kind>)` followed by the backtrace, one frame per
/// line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StepFailure {
    pub message: String,

    /// Kind (type name) of the raised error.
    pub kind: String,

    pub backtrace: Vec<String>,
}

impl Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})\n{}",
            self.message,
            self.kind,
            self.backtrace.iter().join("\n"),
        )
    }
}

/// Attachment to embed into the report.
#[derive(Clone, Debug)]
pub struct Attachment {
    /// Either the name of a file to read, base64 encoded data (when
    /// `mime_type` ends with `;base64`) or the literal payload.
    pub source: Vec<u8>,

    pub mime_type: String,

    /// Human-readable label. Not forwarded to the formatter.
    pub label: Option<String>,
}

impl Attachment {
    /// Creates a new unlabelled [`Attachment`].
    #[must_use]
    pub fn new(source: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            mime_type: mime_type.into(),
            label: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_kind_from_keyword() {
        assert_eq!("Scenario".parse::<ElementKind>().ok(), Some(ElementKind::Scenario));
        assert_eq!("Example".parse::<ElementKind>().ok(), Some(ElementKind::Scenario));
        assert_eq!(
            "Scenario Outline".parse::<ElementKind>().ok(),
            Some(ElementKind::Outline),
        );
        assert_eq!(
            " Scenario Template ".parse::<ElementKind>().ok(),
            Some(ElementKind::Outline),
        );
    }

    #[test]
    fn unknown_element_kind_is_rejected() {
        let err = "Rule".parse::<ElementKind>().unwrap_err();

        assert!(matches!(err, Error::UnknownElementKind(ref k) if k == "Rule"));
        assert_eq!(err.to_string(), "Unrecognized element kind: Rule");
    }

    #[test]
    fn file_line_parses_last_colon() {
        let loc: FileLine = "C:/features/eat.feature:14".parse().unwrap();

        assert_eq!(loc, FileLine::new("C:/features/eat.feature", 14));
        assert_eq!(loc.to_string(), "C:/features/eat.feature:14");
    }

    #[test]
    fn file_line_rejects_missing_line() {
        assert!(matches!(
            "features/eat.feature".parse::<FileLine>(),
            Err(Error::MalformedLocation(_)),
        ));
        assert!(matches!(
            "features/eat.feature:x".parse::<FileLine>(),
            Err(Error::MalformedLocation(_)),
        ));
    }

    #[test]
    fn failure_display_joins_backtrace() {
        let failure = StepFailure {
            message: "expected 7, got 8".into(),
            kind: "AssertionError".into(),
            backtrace: vec!["steps.rs:10".into(), "steps.rs:20".into()],
        };

        assert_eq!(
            failure.to_string(),
            "expected 7, got 8 (AssertionError)\nsteps.rs:10\nsteps.rs:20",
        );
    }
}
