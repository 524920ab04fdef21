//! Scenario text format.
//!
//! # Format
//!
//! Three sections separated by blank lines:
//!
//! ```text
//! Morning rush
//!
//! Two people every few steps, building up
//! to a queue.
//!
//! 0
//! 2
//! 0
//! 1
//! ```
//!
//! The title and description may span several lines; their lines are joined
//! with single spaces.  Every non-blank line of the third section is the
//! number of people arriving on that step.  Each line is trimmed, and blank
//! lines before the title or after the arrivals are ignored.
//!
//! Every blank line before the arrivals section ends a section, so an empty
//! description is written as two consecutive blank lines.

use crate::{ScenarioError, ScenarioResult};

/// A parsed scenario file.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Scenario {
    pub title:       String,
    pub description: String,
    /// People arriving on each step of one cycle.
    pub arrivals:    Vec<u32>,
}

/// Parse scenario text.
///
/// Fails on the first arrival line that is not a non-negative integer, and
/// when there are no arrival lines at all.
pub fn parse_scenario(source: &str) -> ScenarioResult<Scenario> {
    let mut sections: [Vec<&str>; 2] = [Vec::new(), Vec::new()];
    let mut arrivals = Vec::new();
    let mut section = 0usize;
    let mut seen_content = false;

    for (n, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            if seen_content && section < 2 {
                section += 1;
            }
            continue;
        }
        seen_content = true;
        if section == 2 {
            let count = line.parse::<u32>().map_err(|_| ScenarioError::Parse {
                line: n + 1,
                text: line.to_owned(),
            })?;
            arrivals.push(count);
        } else {
            sections[section].push(line);
        }
    }

    if arrivals.is_empty() {
        return Err(ScenarioError::Empty);
    }

    let [title, description] = sections;
    Ok(Scenario {
        title:       title.join(" "),
        description: description.join(" "),
        arrivals,
    })
}
