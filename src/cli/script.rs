//! Line-oriented link scripts.
//!
//! One command per line; `#` starts a comment and blank lines are skipped.
//!
//! ```text
//! link <from> <to> <weight>
//! links <ku_id>
//! incoming <ku_id>
//! all
//! traverse <start> [max_depth] [min_weight] [forward|backward|both]
//! stats
//! ```

use crate::graph::TraversalDirection;
use crate::types::{KnowledgeUnitId, KuGraphError, KuGraphResult};

/// Depth used by `traverse` when none is given.
pub const DEFAULT_TRAVERSE_DEPTH: u32 = 3;

/// Maximum units a scripted traversal returns.
pub const TRAVERSE_MAX_RESULTS: usize = 50;

/// A single parsed script command.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Link {
        from: KnowledgeUnitId,
        to: KnowledgeUnitId,
        weight: f64,
    },
    Links(KnowledgeUnitId),
    Incoming(KnowledgeUnitId),
    All,
    Traverse {
        start: KnowledgeUnitId,
        max_depth: u32,
        min_weight: f64,
        direction: TraversalDirection,
    },
    Stats,
}

/// A command together with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: ScriptCommand,
}

/// Parse a whole script. Stops at the first malformed line.
pub fn parse_script(text: &str) -> KuGraphResult<Vec<ScriptLine>> {
    let mut lines = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        if let Some(command) = parse_line(line, raw)? {
            lines.push(ScriptLine { line, command });
        }
    }
    Ok(lines)
}

/// Parse one line. Returns `Ok(None)` for blank and comment lines.
///
/// Weights are parsed but not range-checked; out-of-range weights are
/// rejected by the graph when the command runs.
pub fn parse_line(line: usize, raw: &str) -> KuGraphResult<Option<ScriptCommand>> {
    let content = match raw.find('#') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    let tokens: Vec<&str> = content.split_whitespace().collect();
    let Some((&keyword, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let err = |message: String| KuGraphError::Parse { line, message };

    let command = match (keyword.to_lowercase().as_str(), args) {
        ("link", [from, to, weight]) => ScriptCommand::Link {
            from: from.to_string(),
            to: to.to_string(),
            weight: weight
                .parse()
                .map_err(|_| err(format!("invalid weight '{weight}'")))?,
        },
        ("link", _) => return Err(err("usage: link <from> <to> <weight>".to_string())),
        ("links", [id]) => ScriptCommand::Links(id.to_string()),
        ("links", _) => return Err(err("usage: links <ku_id>".to_string())),
        ("incoming", [id]) => ScriptCommand::Incoming(id.to_string()),
        ("incoming", _) => return Err(err("usage: incoming <ku_id>".to_string())),
        ("all", []) => ScriptCommand::All,
        ("all", _) => return Err(err("usage: all".to_string())),
        ("stats", []) => ScriptCommand::Stats,
        ("stats", _) => return Err(err("usage: stats".to_string())),
        ("traverse", [start, rest @ ..]) if rest.len() <= 3 => {
            let max_depth: u32 = match rest.first() {
                Some(d) => d
                    .parse()
                    .map_err(|_| err(format!("invalid depth '{d}'")))?,
                None => DEFAULT_TRAVERSE_DEPTH,
            };
            let min_weight: f64 = match rest.get(1) {
                Some(w) => w
                    .parse()
                    .map_err(|_| err(format!("invalid weight '{w}'")))?,
                None => 0.0,
            };
            let direction = match rest.get(2) {
                Some(d) => TraversalDirection::from_name(d)
                    .ok_or_else(|| err(format!("invalid direction '{d}'")))?,
                None => TraversalDirection::Forward,
            };
            ScriptCommand::Traverse {
                start: start.to_string(),
                max_depth,
                min_weight,
                direction,
            }
        }
        ("traverse", _) => {
            return Err(err(
                "usage: traverse <start> [max_depth] [min_weight] [direction]".to_string(),
            ))
        }
        (other, _) => return Err(err(format!("unknown command '{other}'"))),
    };

    Ok(Some(command))
}
