// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Document model consumed by a [`Formatter`].
//!
//! These are the records of the [Gherkin formatter][1] schema: every
//! statement carries its source line, and scenarios/examples carry a stable
//! id. All of them are [`Serialize`]able, so any renderer may emit them
//! as-is.
//!
//! [`Formatter`]: crate::Formatter
//! [1]: https://github.com/cucumber/gherkin

mod from_gherkin;

use derive_more::with_trait::Display;
use lazy_regex::regex;
use serde::Serialize;

/// Comment preceding a statement in a `.feature` file.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Comment {
    /// Raw text of this [`Comment`], including the leading `#`.
    pub value: String,

    /// Line number of this [`Comment`].
    pub line: usize,
}

/// Tag of a [`Feature`], [`Scenario`], [`ScenarioOutline`] or [`Examples`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Tag {
    /// Name of this [`Tag`].
    pub name: String,

    /// Line number of this [`Tag`].
    pub line: usize,
}

/// Doc string argument of a [`Step`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DocString {
    /// Content type written after the opening delimiter, if any.
    pub content_type: String,

    /// Content of this [`DocString`].
    pub value: String,

    /// Line number of the opening delimiter.
    pub line: usize,
}

/// Row of a data table argument of a [`Step`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DataTableRow {
    /// [`Comment`]s preceding this row.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,

    /// Cell values of this row.
    pub cells: Vec<String>,

    /// Line number of this row.
    pub line: usize,
}

/// Row of an [`Examples`] table.
///
/// The header is the row with ordinal `0`, data rows are numbered from `1`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ExamplesRow {
    /// [`Comment`]s preceding this row.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,

    /// Raw cell values of this row.
    pub cells: Vec<String>,

    /// Line number of this row.
    pub line: usize,

    /// Stable identifier of this row.
    pub id: String,
}

/// [Feature] statement.
///
/// [Feature]: https://cucumber.io/docs/gherkin/reference#feature
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Feature {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    pub keyword: String,
    pub name: String,
    pub description: String,
    pub line: usize,
    pub id: String,
}

/// [Background] statement.
///
/// [Background]: https://cucumber.io/docs/gherkin/reference#background
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Background {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
    pub keyword: String,
    pub name: String,
    pub description: String,
    pub line: usize,
}

/// [Scenario] statement.
///
/// Besides regular scenarios, this is also the record synthesized for every
/// row of an expanded [`ScenarioOutline`], in which case [`Scenario::line`]
/// and [`Scenario::id`] are the ones of the [`ExamplesRow`].
///
/// [Scenario]: https://cucumber.io/docs/gherkin/reference#example
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Scenario {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    pub keyword: String,
    pub name: String,
    pub description: String,
    pub line: usize,
    pub id: String,
}

/// [Scenario Outline] statement.
///
/// [Scenario Outline]: https://cucumber.io/docs/gherkin/reference#scenario-outline
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ScenarioOutline {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    pub keyword: String,
    pub name: String,
    pub description: String,
    pub line: usize,
    pub id: String,
}

impl ScenarioOutline {
    /// Instantiates a concrete [`Scenario`] of this [`ScenarioOutline`] for
    /// the given [`ExamplesRow`].
    #[must_use]
    pub fn instantiate(&self, row: &ExamplesRow) -> Scenario {
        Scenario {
            comments: self.comments.clone(),
            tags: self.tags.clone(),
            keyword: self.keyword.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            line: row.line,
            id: row.id.clone(),
        }
    }
}

/// [Examples] statement of a [`ScenarioOutline`].
///
/// [Examples]: https://cucumber.io/docs/gherkin/reference#examples
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Examples {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    pub keyword: String,
    pub name: String,
    pub description: String,
    pub line: usize,
    pub id: String,

    /// Table rows, header first.
    pub rows: Vec<ExamplesRow>,
}

impl Examples {
    /// Returns the data row with the given 1-based `ordinal`.
    ///
    /// Ordinal `0` is the header row.
    #[must_use]
    pub fn row(&self, ordinal: usize) -> Option<&ExamplesRow> {
        self.rows.get(ordinal)
    }

    /// Number of data rows (header excluded).
    #[must_use]
    pub fn data_rows(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

/// [Step] statement.
///
/// [Step]: https://cucumber.io/docs/gherkin/reference#steps
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Step {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,

    /// Keyword with its trailing whitespace, like `Given `.
    pub keyword: String,

    pub name: String,
    pub line: usize,

    /// Data table argument.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<DataTableRow>>,

    /// Doc string argument.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_string: Option<DocString>,
}

impl Step {
    /// Returns an [`Argument`] for every `<placeholder>` of this [`Step`]'s
    /// name, with its offset counted in characters.
    #[must_use]
    pub fn outline_args(&self) -> Vec<Argument> {
        regex!(r"<[^<]*>")
            .find_iter(&self.name)
            .map(|m| Argument {
                offset: self.name[..m.start()].chars().count(),
                val: m.as_str().to_owned(),
            })
            .collect()
    }
}

/// Argument of a [`Match`]: a captured value and its position inside the
/// [`Step`] name.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Argument {
    /// Offset of the argument in the [`Step`] name, in characters.
    pub offset: usize,

    /// Captured value.
    pub val: String,
}

/// Binding of a [`Step`] to a step definition.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Match {
    /// Arguments captured from the [`Step`] name.
    pub arguments: Vec<Argument>,

    /// Location of the matched step definition, if known.
    pub location: Option<String>,
}

impl Match {
    /// Creates a new [`Match`].
    #[must_use]
    pub const fn new(arguments: Vec<Argument>, location: Option<String>) -> Self {
        Self { arguments, location }
    }
}

/// Possible statuses of an executed [`Step`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[display("passed")]
    Passed,
    #[display("failed")]
    Failed,
    #[display("skipped")]
    Skipped,
    #[display("pending")]
    Pending,
    #[display("undefined")]
    Undefined,
    #[display("ambiguous")]
    Ambiguous,
}

/// Result of an executed [`Step`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StepResult {
    pub status: Status,

    /// Duration in nanoseconds.
    ///
    /// Always [`None`] when produced by the [`Adapter`], which reports
    /// durations separately via [`Formatter::append_duration()`].
    ///
    /// [`Adapter`]: crate::Adapter
    /// [`Formatter::append_duration()`]: crate::Formatter::append_duration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,

    /// Error message, present for failed [`Step`]s.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl StepResult {
    /// Creates a new [`StepResult`] without duration.
    #[must_use]
    pub const fn new(status: Status, error_message: Option<String>) -> Self {
        Self {
            status,
            duration: None,
            error_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(name: &str) -> Step {
        Step {
            comments: vec![],
            keyword: "Given ".into(),
            name: name.into(),
            line: 3,
            rows: None,
            doc_string: None,
        }
    }

    #[test]
    fn outline_args_are_char_offsets() {
        let args = step("I have <count> cukes in my «<place>»").outline_args();

        assert_eq!(
            args,
            vec![
                Argument { offset: 7, val: "<count>".into() },
                Argument { offset: 28, val: "<place>".into() },
            ],
        );
    }

    #[test]
    fn outline_args_of_plain_step_are_empty() {
        assert!(step("I have 5 cukes").outline_args().is_empty());
    }

    #[test]
    fn examples_rows_are_looked_up_by_ordinal() {
        let row = |n: usize| ExamplesRow {
            comments: vec![],
            cells: vec![n.to_string()],
            line: 10 + n,
            id: format!("f;o;e;{}", n + 1),
        };
        let examples = Examples {
            comments: vec![],
            tags: vec![],
            keyword: "Examples".into(),
            name: String::new(),
            description: String::new(),
            line: 9,
            id: "f;o;e".into(),
            rows: vec![row(0), row(1), row(2)],
        };

        assert_eq!(examples.data_rows(), 2);
        assert_eq!(examples.row(1).map(|r| r.line), Some(11));
        assert_eq!(examples.row(2).map(|r| r.id.as_str()), Some("f;o;e;3"));
        assert!(examples.row(3).is_none());
    }

    #[test]
    fn outline_instantiates_with_row_line_and_id() {
        let outline = ScenarioOutline {
            comments: vec![Comment { value: "# c".into(), line: 4 }],
            tags: vec![Tag { name: "@t".into(), line: 5 }],
            keyword: "Scenario Outline".into(),
            name: "eating".into(),
            description: "desc".into(),
            line: 6,
            id: "f;eating".into(),
        };
        let row = ExamplesRow {
            comments: vec![],
            cells: vec!["12".into()],
            line: 14,
            id: "f;eating;;2".into(),
        };

        let sc = outline.instantiate(&row);

        assert_eq!(sc.name, "eating");
        assert_eq!(sc.tags, outline.tags);
        assert_eq!(sc.comments, outline.comments);
        assert_eq!(sc.line, 14);
        assert_eq!(sc.id, "f;eating;;2");
    }

    #[test]
    fn result_serializes_lowercase_status_without_empty_fields() {
        let json = serde_json::to_value(StepResult::new(Status::Passed, None))
            .unwrap();

        assert_eq!(json, serde_json::json!({"status": "passed"}));
    }
}
