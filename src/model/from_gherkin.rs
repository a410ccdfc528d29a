// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Conversions from the [`gherkin`] AST into the formatter model.
//!
//! Ids are kebab-cased names joined with `;`, the same way the Cucumber JSON
//! report derives element ids.

use inflector::Inflector as _;

use super::{
    Background, DataTableRow, DocString, Examples, ExamplesRow, Feature,
    Scenario, ScenarioOutline, Step, Tag,
};

/// Converts `tags` of a statement at the given `line`.
///
/// The AST doesn't keep positions of tags, so every [`Tag`] gets the line of
/// its statement rather than its own one.
fn tags(tags: &[String], line: usize) -> Vec<Tag> {
    tags.iter()
        .map(|name| Tag {
            name: name.clone(),
            line,
        })
        .collect()
}

impl From<&gherkin::Feature> for Feature {
    fn from(feature: &gherkin::Feature) -> Self {
        Self {
            comments: vec![],
            tags: tags(&feature.tags, feature.position.line),
            keyword: feature.keyword.clone(),
            name: feature.name.clone(),
            description: feature.description.clone().unwrap_or_default(),
            line: feature.position.line,
            id: feature.name.to_kebab_case(),
        }
    }
}

impl From<&gherkin::Background> for Background {
    fn from(background: &gherkin::Background) -> Self {
        Self {
            comments: vec![],
            keyword: background.keyword.clone(),
            name: String::new(),
            description: background.description.clone().unwrap_or_default(),
            line: background.position.line,
        }
    }
}

impl From<&gherkin::Step> for Step {
    fn from(step: &gherkin::Step) -> Self {
        let rows = step.table.as_ref().map(|t| {
            t.rows
                .iter()
                .enumerate()
                .map(|(i, cells)| DataTableRow {
                    comments: vec![],
                    cells: cells.clone(),
                    line: t.position.line + i,
                })
                .collect()
        });
        let doc_string = step.docstring.as_ref().map(|value| DocString {
            content_type: String::new(),
            value: value.clone(),
            line: step.position.line + 1,
        });

        Self {
            comments: vec![],
            keyword: format!("{} ", step.keyword.trim_end()),
            name: step.value.clone(),
            line: step.position.line,
            rows,
            doc_string,
        }
    }
}

impl Scenario {
    /// Converts the given [`gherkin::Scenario`] of the given [`Feature`].
    #[must_use]
    pub fn from_gherkin(feature: &Feature, scenario: &gherkin::Scenario) -> Self {
        Self {
            comments: vec![],
            tags: tags(&scenario.tags, scenario.position.line),
            keyword: scenario.keyword.clone(),
            name: scenario.name.clone(),
            description: scenario.description.clone().unwrap_or_default(),
            line: scenario.position.line,
            id: format!("{};{}", feature.id, scenario.name.to_kebab_case()),
        }
    }
}

impl ScenarioOutline {
    /// Converts the given [`gherkin::Scenario`] with [`gherkin::Examples`]
    /// of the given [`Feature`].
    #[must_use]
    pub fn from_gherkin(feature: &Feature, scenario: &gherkin::Scenario) -> Self {
        let Scenario {
            comments,
            tags,
            keyword,
            name,
            description,
            line,
            id,
        } = Scenario::from_gherkin(feature, scenario);

        Self {
            comments,
            tags,
            keyword,
            name,
            description,
            line,
            id,
        }
    }
}

impl Examples {
    /// Converts the given [`gherkin::Examples`] of the given
    /// [`ScenarioOutline`].
    ///
    /// Row lines are counted from the table position, so they're exact as
    /// long as the table has no interleaved blank or comment lines.
    #[must_use]
    pub fn from_gherkin(
        outline: &ScenarioOutline,
        examples: &gherkin::Examples,
    ) -> Self {
        let name = examples.name.clone().unwrap_or_default();
        let id = format!("{};{}", outline.id, name.to_kebab_case());
        let rows = examples
            .table
            .as_ref()
            .map(|t| {
                t.rows
                    .iter()
                    .enumerate()
                    .map(|(i, cells)| ExamplesRow {
                        comments: vec![],
                        cells: cells.clone(),
                        line: t.position.line + i,
                        id: format!("{id};{}", i + 1),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            comments: vec![],
            tags: tags(&examples.tags, examples.position.line),
            keyword: examples.keyword.clone(),
            name,
            description: examples.description.clone().unwrap_or_default(),
            line: examples.position.line,
            id,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use gherkin::GherkinEnv;

    use super::*;

    const FEATURE: &str = "\
Feature: Eating cukes
  Scenario Outline: eating
    Given there are <start> cucumbers
      | left   |
      | <left> |
    Then I should have <left> cucumbers

    Examples:
      | start | left |
      |    12 |    7 |
      |    20 |   16 |
";

    fn parse() -> gherkin::Feature {
        gherkin::Feature::parse(FEATURE, GherkinEnv::default())
            .expect("valid feature")
    }

    #[test]
    fn derives_kebab_case_ids() {
        let parsed = parse();
        let feature = Feature::from(&parsed);
        let outline = ScenarioOutline::from_gherkin(&feature, &parsed.scenarios[0]);

        assert_eq!(feature.id, "eating-cukes");
        assert_eq!(outline.id, "eating-cukes;eating");
        assert_eq!(outline.line, 2);
    }

    #[test]
    fn converts_example_rows_with_lines_and_ids() {
        let parsed = parse();
        let feature = Feature::from(&parsed);
        let outline = ScenarioOutline::from_gherkin(&feature, &parsed.scenarios[0]);
        let examples =
            Examples::from_gherkin(&outline, &parsed.scenarios[0].examples[0]);

        assert_eq!(examples.data_rows(), 2);
        let first = examples.row(1).expect("first data row");
        let second = examples.row(2).expect("second data row");
        assert_eq!(first.cells, ["12", "7"]);
        assert_eq!(first.line, 10);
        assert_eq!(second.line, 11);
        assert_eq!(first.id, "eating-cukes;eating;;2");
        assert_eq!(second.id, "eating-cukes;eating;;3");
    }

    #[test]
    fn keeps_name_and_description_of_examples() {
        const NAMED: &str = "\
Feature: Eating cukes
  Scenario Outline: eating
    Given there are <start> cucumbers

    Examples: Big appetite
      Only the hungry ones.

      | start |
      |    12 |

    Examples: Small appetite
      | start |
      |     1 |
";
        let parsed = gherkin::Feature::parse(NAMED, GherkinEnv::default())
            .expect("valid feature");
        let feature = Feature::from(&parsed);
        let sc = &parsed.scenarios[0];
        let outline = ScenarioOutline::from_gherkin(&feature, sc);

        let big = Examples::from_gherkin(&outline, &sc.examples[0]);
        let small = Examples::from_gherkin(&outline, &sc.examples[1]);

        assert_eq!(big.name, "Big appetite");
        assert_eq!(big.description.trim(), "Only the hungry ones.");
        assert_eq!(big.id, "eating-cukes;eating;big-appetite");
        assert_eq!(
            big.row(1).expect("data row").id,
            "eating-cukes;eating;big-appetite;2",
        );
        assert_eq!(small.id, "eating-cukes;eating;small-appetite");
        assert!(small.description.is_empty());
    }

    #[test]
    fn tags_take_line_of_their_statement() {
        const TAGGED: &str = "\
@slow
Feature: Eating cukes
  @wip @smoke
  Scenario: eating
    Given there are 12 cucumbers
";
        let parsed = gherkin::Feature::parse(TAGGED, GherkinEnv::default())
            .expect("valid feature");
        let feature = Feature::from(&parsed);
        let scenario = Scenario::from_gherkin(&feature, &parsed.scenarios[0]);

        assert_eq!(feature.tags.len(), 1);
        assert!(feature.tags.iter().all(|t| t.line == feature.line));
        assert_eq!(scenario.tags.len(), 2);
        assert!(scenario.tags.iter().all(|t| t.line == scenario.line));
    }

    #[test]
    fn converts_step_with_table() {
        let parsed = parse();
        let step = Step::from(&parsed.scenarios[0].steps[0]);

        assert_eq!(step.keyword, "Given ");
        assert_eq!(step.name, "there are <start> cucumbers");
        assert_eq!(step.line, 3);
        let rows = step.rows.expect("data table");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].cells, ["<left>"]);
        assert!(step.doc_string.is_none());
    }
}
