// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Expansion of [Scenario Outline] example rows into concrete scenarios.
//!
//! While an outline is being expanded, nothing of its template is forwarded.
//! Every example row is instead replayed as a standalone [`Scenario`], whose
//! steps are only forwarded once their results are known:
//! ```text
//! scenario_named  → scenario
//! step_started    → (template remembered)
//! step_result     → (match and result stashed)
//! step_named      → step, match, result
//! ```
//!
//! [Scenario Outline]: https://cucumber.io/docs/gherkin/reference#scenario-outline

use crate::{
    model::{Examples, Match, Scenario, ScenarioOutline, Step, StepResult},
    Error,
};

/// State of expanding the current [`ScenarioOutline`].
#[derive(Clone, Debug, Default)]
pub(crate) struct Expander {
    /// [`ScenarioOutline`] every row is instantiated from.
    template: Option<ScenarioOutline>,

    /// Current [`Examples`] table, whose rows are being replayed.
    examples: Option<Examples>,

    /// Ordinal of the current row, [`None`] until the first row of the table
    /// is announced.
    ordinal: Option<usize>,

    /// Template of the most recently started [`Step`].
    step: Option<Step>,

    /// [`Match`] and [`StepResult`] of the current row's [`Step`], waiting
    /// for the [`Step`] to be named.
    pending: Option<(Match, StepResult)>,
}

impl Expander {
    /// Starts expanding the given [`ScenarioOutline`].
    pub(crate) fn start(&mut self, template: ScenarioOutline) {
        *self = Self {
            template: Some(template),
            ..Self::default()
        };
    }

    /// Indicates whether a concrete row is being replayed.
    pub(crate) const fn in_row(&self) -> bool {
        self.examples.is_some()
    }

    /// Starts replaying rows of the given [`Examples`] table.
    pub(crate) fn start_examples(&mut self, examples: Examples) {
        self.ordinal = None;
        self.examples = Some(examples);
    }

    /// Advances to the next row and instantiates its [`Scenario`].
    ///
    /// # Errors
    ///
    /// If the table has no more rows, or no [`ScenarioOutline`] with
    /// [`Examples`] has been started.
    pub(crate) fn next_scenario(&mut self) -> Result<Scenario, Error> {
        let ordinal = self.ordinal.map_or(1, |n| n + 1);
        self.ordinal = Some(ordinal);

        let (template, examples) = self
            .template
            .as_ref()
            .zip(self.examples.as_ref())
            .ok_or(Error::MissingOutline)?;
        let row = examples.row(ordinal).ok_or_else(|| Error::RowOutOfRange {
            ordinal,
            rows: examples.data_rows(),
        })?;
        tracing::debug!(
            ordinal,
            line = row.line,
            id = %row.id,
            "expanding example row",
        );

        Ok(template.instantiate(row))
    }

    /// Remembers the given [`Step`] template, if a row is being replayed.
    pub(crate) fn record_step(&mut self, step: Step) {
        if self.in_row() {
            self.step = Some(step);
        }
    }

    /// Stashes the [`Match`] and [`StepResult`] of the current row's
    /// [`Step`], if a row is being replayed.
    pub(crate) fn stash(&mut self, step_match: Match, result: StepResult) {
        if self.in_row() {
            self.pending = Some((step_match, result));
        }
    }

    /// Instantiates the current [`Step`] template with the given row-specific
    /// `name` and `line`, along with its stashed [`Match`] and
    /// [`StepResult`].
    ///
    /// # Errors
    ///
    /// If no [`Step`] has been started or no result has been stashed.
    pub(crate) fn take_step(
        &mut self,
        name: String,
        line: usize,
    ) -> Result<(Step, Match, StepResult), Error> {
        let template = self.step.as_ref().ok_or(Error::MissingStepTemplate)?;
        let (step_match, result) =
            self.pending.take().ok_or(Error::MissingStepResult)?;

        let step = Step {
            comments: template.comments.clone(),
            keyword: template.keyword.clone(),
            name,
            line,
            rows: template.rows.clone(),
            doc_string: template.doc_string.clone(),
        };
        Ok((step, step_match, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocString, ExamplesRow, Status};

    fn outline() -> ScenarioOutline {
        ScenarioOutline {
            comments: vec![],
            tags: vec![],
            keyword: "Scenario Outline".into(),
            name: "eating".into(),
            description: String::new(),
            line: 2,
            id: "f;eating".into(),
        }
    }

    fn examples(data_rows: usize) -> Examples {
        Examples {
            comments: vec![],
            tags: vec![],
            keyword: "Examples".into(),
            name: String::new(),
            description: String::new(),
            line: 8,
            id: "f;eating;".into(),
            rows: (0..=data_rows)
                .map(|i| ExamplesRow {
                    comments: vec![],
                    cells: vec![i.to_string()],
                    line: 9 + i,
                    id: format!("f;eating;;{}", i + 1),
                })
                .collect(),
        }
    }

    fn template_step() -> Step {
        Step {
            comments: vec![],
            keyword: "Given ".into(),
            name: "there are <start> cucumbers".into(),
            line: 3,
            rows: None,
            doc_string: Some(DocString {
                content_type: String::new(),
                value: "doc".into(),
                line: 4,
            }),
        }
    }

    #[test]
    fn rows_are_numbered_per_table() {
        let mut exp = Expander::default();
        exp.start(outline());
        exp.start_examples(examples(2));

        assert_eq!(exp.next_scenario().unwrap().line, 10);
        assert_eq!(exp.next_scenario().unwrap().id, "f;eating;;3");

        exp.start_examples(examples(1));
        assert_eq!(exp.next_scenario().unwrap().line, 10);
    }

    #[test]
    fn row_past_table_end_is_an_error() {
        let mut exp = Expander::default();
        exp.start(outline());
        exp.start_examples(examples(1));
        exp.next_scenario().unwrap();

        let err = exp.next_scenario().unwrap_err();

        assert!(matches!(err, Error::RowOutOfRange { ordinal: 2, rows: 1 }));
    }

    #[test]
    fn row_without_examples_is_an_error() {
        let mut exp = Expander::default();
        exp.start(outline());

        assert!(matches!(exp.next_scenario(), Err(Error::MissingOutline)));
    }

    #[test]
    fn empty_table_has_no_rows() {
        let mut exp = Expander::default();
        exp.start(outline());
        exp.start_examples(examples(0));

        let err = exp.next_scenario().unwrap_err();

        assert!(matches!(err, Error::RowOutOfRange { ordinal: 1, rows: 0 }));
    }

    #[test]
    fn steps_are_ignored_before_examples() {
        let mut exp = Expander::default();
        exp.start(outline());
        exp.record_step(template_step());
        exp.stash(Match::default(), StepResult::new(Status::Skipped, None));

        assert!(!exp.in_row());
        assert!(matches!(
            exp.take_step("x".into(), 1),
            Err(Error::MissingStepTemplate),
        ));
    }

    #[test]
    fn instantiates_step_from_template() {
        let mut exp = Expander::default();
        exp.start(outline());
        exp.start_examples(examples(1));
        exp.record_step(template_step());
        let m = Match::new(vec![], Some("steps.rs:7".into()));
        exp.stash(m.clone(), StepResult::new(Status::Passed, None));

        let (step, step_match, result) = exp
            .take_step("there are 12 cucumbers".into(), 10)
            .unwrap();

        assert_eq!(step.name, "there are 12 cucumbers");
        assert_eq!(step.line, 10);
        assert_eq!(step.keyword, "Given ");
        assert_eq!(step.doc_string, template_step().doc_string);
        assert_eq!(step_match, m);
        assert_eq!(result.status, Status::Passed);
    }

    #[test]
    fn stash_is_consumed_once() {
        let mut exp = Expander::default();
        exp.start(outline());
        exp.start_examples(examples(1));
        exp.record_step(template_step());
        exp.stash(Match::default(), StepResult::new(Status::Passed, None));
        exp.take_step("a".into(), 10).unwrap();

        assert!(matches!(
            exp.take_step("a".into(), 10),
            Err(Error::MissingStepResult),
        ));
    }
}
