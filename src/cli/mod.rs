//! Command implementations and script parsing for the `kug` tool.

pub mod commands;
pub mod script;

pub use commands::{cmd_demo, cmd_run, run_script, RunSummary, DEMO_SCRIPT};
pub use script::{parse_line, parse_script, ScriptCommand, ScriptLine};
