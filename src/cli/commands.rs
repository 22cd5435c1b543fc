//! CLI command implementations.

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;

use crate::config::KugConfig;
use crate::graph::bfs_traverse;
use crate::service::{LinkRequest, LinkService};
use crate::types::{KuGraphError, KuGraphResult, Link};

use super::script::{parse_script, ScriptCommand, ScriptLine, TRAVERSE_MAX_RESULTS};

/// Walks through adding, updating and rejecting links.
pub const DEMO_SCRIPT: &str = "\
# two distinct targets keep insertion order
link ku1 ku2 0.9
links ku1
link ku1 ku3 0.75
links ku1
# ku3 gains an incoming link but has no outgoing links
link ku2 ku3 0.4
links ku3
# same target again updates the weight in place
link ku1 ku2 0.6
links ku1
# out of range, rejected without changing the graph
link ku4 ku1 1.5
all
stats
";

/// Counts collected while running a script.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub commands: usize,
    pub added: usize,
    pub updated: usize,
    pub rejected: usize,
}

/// Run the built-in demonstration against a fresh graph.
pub fn cmd_demo(config: &KugConfig, json: bool, out: &mut dyn Write) -> KuGraphResult<RunSummary> {
    let lines = parse_script(DEMO_SCRIPT)?;
    let mut service = LinkService::new(config.reject_self_links);
    run_script(&mut service, &lines, json, out)
}

/// Run a link script from a file, or from stdin when `path` is `None` or `-`.
pub fn cmd_run(
    path: Option<&Path>,
    config: &KugConfig,
    json: bool,
    out: &mut dyn Write,
) -> KuGraphResult<RunSummary> {
    let text = match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let lines = parse_script(&text)?;
    let mut service = LinkService::new(config.reject_self_links);
    run_script(&mut service, &lines, json, out)
}

/// Execute parsed lines in order against `service` and print a summary.
///
/// Rejected links are reported and counted; any other error stops the run.
pub fn run_script(
    service: &mut LinkService,
    lines: &[ScriptLine],
    json: bool,
    out: &mut dyn Write,
) -> KuGraphResult<RunSummary> {
    let mut summary = RunSummary::default();
    for line in lines {
        log::debug!("line {}: {:?}", line.line, line.command);
        execute(service, &line.command, json, out, &mut summary)?;
        summary.commands += 1;
    }

    if json {
        writeln!(out, "{}", serde_json::json!({ "summary": summary }))?;
    } else {
        writeln!(
            out,
            "{} commands: {} added, {} updated, {} rejected",
            summary.commands, summary.added, summary.updated, summary.rejected
        )?;
    }
    Ok(summary)
}

/// Execute one command.
pub fn execute(
    service: &mut LinkService,
    command: &ScriptCommand,
    json: bool,
    out: &mut dyn Write,
    summary: &mut RunSummary,
) -> KuGraphResult<()> {
    match command {
        ScriptCommand::Link { from, to, weight } => {
            let request = LinkRequest::new(from.as_str(), to.as_str(), *weight);
            match service.link(&request) {
                Ok(response) => {
                    if response.updated {
                        summary.updated += 1;
                    } else {
                        summary.added += 1;
                    }
                    if json {
                        writeln!(out, "{}", serde_json::to_string(&response)?)?;
                    } else {
                        let verb = if response.updated { "Updated" } else { "Added" };
                        writeln!(out, "{verb} link {from} --{weight}--> {to}")?;
                    }
                }
                Err(e @ (KuGraphError::InvalidWeight(_) | KuGraphError::SelfLink(_))) => {
                    summary.rejected += 1;
                    if json {
                        writeln!(
                            out,
                            "{}",
                            serde_json::json!({
                                "error": e.to_string(),
                                "kind": rejection_kind(&e),
                                "from_ku_id": from,
                                "to_ku_id": to,
                                "weight": weight,
                            })
                        )?;
                    } else {
                        writeln!(out, "Rejected link {from} --{weight}--> {to}: {e}")?;
                    }
                }
                Err(e) => return Err(e),
            }
        }
        ScriptCommand::Links(ku_id) => {
            let outgoing = service.outgoing(ku_id);
            if json {
                writeln!(out, "{}", serde_json::to_string(&outgoing)?)?;
            } else if outgoing.links.is_empty() {
                writeln!(out, "{ku_id}: no outgoing links")?;
            } else {
                let rendered: Vec<String> = outgoing
                    .links
                    .iter()
                    .map(|l| format!("{} ({})", l.to_ku_id, l.weight))
                    .collect();
                writeln!(out, "{ku_id} -> {}", rendered.join(", "))?;
            }
        }
        ScriptCommand::Incoming(ku_id) => {
            let incoming = service.incoming(ku_id);
            if json {
                writeln!(out, "{}", serde_json::to_string(&incoming)?)?;
            } else if incoming.links.is_empty() {
                writeln!(out, "{ku_id}: no incoming links")?;
            } else {
                let rendered: Vec<String> = incoming
                    .links
                    .iter()
                    .map(|l| format!("{} ({})", l.from_ku_id, l.weight))
                    .collect();
                writeln!(out, "{ku_id} <- {}", rendered.join(", "))?;
            }
        }
        ScriptCommand::All => {
            let sorted: BTreeMap<&str, &Vec<Link>> = service
                .all_links()
                .iter()
                .map(|(k, v)| (k.as_str(), v))
                .collect();
            if json {
                writeln!(out, "{}", serde_json::to_string(&sorted)?)?;
            } else if sorted.is_empty() {
                writeln!(out, "(empty graph)")?;
            } else {
                for (source, links) in sorted {
                    let rendered: Vec<String> = links.iter().map(Link::to_string).collect();
                    writeln!(out, "{source} -> {}", rendered.join(", "))?;
                }
            }
        }
        ScriptCommand::Traverse {
            start,
            max_depth,
            min_weight,
            direction,
        } => {
            let traversal = bfs_traverse(
                service.graph(),
                start,
                *direction,
                *max_depth,
                TRAVERSE_MAX_RESULTS,
                *min_weight,
            );
            if json {
                let visited: Vec<serde_json::Value> = traversal
                    .visited
                    .iter()
                    .map(|id| {
                        serde_json::json!({
                            "ku_id": id,
                            "depth": traversal.depths.get(id).copied().unwrap_or(0),
                        })
                    })
                    .collect();
                writeln!(
                    out,
                    "{}",
                    serde_json::json!({
                        "start": start,
                        "visited": visited,
                        "links": traversal.links,
                    })
                )?;
            } else {
                writeln!(
                    out,
                    "Traversal from {start}: {} units",
                    traversal.visited.len()
                )?;
                for id in &traversal.visited {
                    let depth = traversal.depths.get(id).copied().unwrap_or(0);
                    writeln!(out, "  [depth {depth}] {id}")?;
                }
            }
        }
        ScriptCommand::Stats => {
            let stats = service.graph().stats();
            if json {
                writeln!(out, "{}", serde_json::to_string(&stats)?)?;
            } else {
                writeln!(out, "Sources: {}", stats.sources)?;
                writeln!(out, "Links: {}", stats.links)?;
                writeln!(out, "Units: {}", stats.units)?;
                writeln!(out, "Mean weight: {:.3}", stats.mean_weight)?;
            }
        }
    }
    Ok(())
}

fn rejection_kind(e: &KuGraphError) -> &'static str {
    match e {
        KuGraphError::InvalidWeight(_) => "invalid_weight",
        KuGraphError::SelfLink(_) => "self_link",
        _ => "other",
    }
}
