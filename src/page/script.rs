//! Event scripts
//!
//! A script is JSON lines, one step per line: either a [`UiEvent`]
//! (`{"type":"slider_next"}`) or a clock step (`{"advance_ms":5000}`).
//! Blank lines and lines starting with `#` are skipped.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use super::Page;
use crate::events::{DispatchReport, UiEvent};

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Line {line}: {error}")]
    Parse { line: usize, error: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Advance { advance_ms: u64 },
    Event(UiEvent),
}

/// Parse a whole script, reporting the first bad line
pub fn parse_script(content: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();
    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step = serde_json::from_str(line).map_err(|e| ScriptError::Parse {
            line: index + 1,
            error: e.to_string(),
        })?;
        steps.push(step);
    }
    Ok(steps)
}

/// Apply steps in order, summing the dispatch reports
pub fn replay(page: &mut Page, steps: &[ScriptStep]) -> DispatchReport {
    let mut report = DispatchReport::default();
    for step in steps {
        let step_report = match step {
            ScriptStep::Advance { advance_ms } => {
                page.advance(Duration::from_millis(*advance_ms))
            }
            ScriptStep::Event(event) => page.dispatch(event.clone()),
        };
        report.merge(step_report);
    }
    tracing::debug!(
        steps = steps.len(),
        processed = report.processed,
        dropped = report.dropped,
        "Script replayed"
    );
    report
}
