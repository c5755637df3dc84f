//! Command-line interface orchestration for gamegen.
//!
//! `generate` runs one model with explicit parameters, `sample` draws a
//! random configuration of a registered model, and `models` lists the
//! registry. Every random draw comes from the `--seed` argument.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GenerateCommand, GraphSummary, ModelArgs,
    SampleCommand, render_summary, run_cli,
};
