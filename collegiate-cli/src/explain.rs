//! Explain command implementation for the Collegiate CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use collegiate_core::{TextCompletionService, explain};
use collegiate_data::{ProcessCompletionConfig, ProcessCompletionService};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::payload::ExplainRequest;
use crate::sources::{load_json, require_existing};
use crate::{
    ARG_EXPLAIN_COMPLETION_COMMAND, ARG_EXPLAIN_REQUEST, CliError, ENV_EXPLAIN_COMPLETION_COMMAND,
    ENV_EXPLAIN_REQUEST,
};

/// CLI arguments for the `explain` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Ask a local language model why an institution received its \
                 match score. The request names the institution, its score, \
                 the search parameters that produced it, the chat history \
                 and the student's new message.",
    about = "Explain an institution's match score"
)]
#[ortho_config(prefix = "COLLEGIATE")]
pub(crate) struct ExplainArgs {
    /// Path to a JSON file containing an explanation request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Completion command line, for example "ollama run llama3.1".
    #[arg(long = ARG_EXPLAIN_COMPLETION_COMMAND, value_name = "command")]
    #[serde(default)]
    pub(crate) completion_command: Option<String>,
}

impl ExplainArgs {
    pub(crate) fn into_config(self) -> Result<ExplainConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ExplainConfig::try_from(merged)
    }
}

/// Resolved `explain` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExplainConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Command producing the explanation.
    pub(crate) completion: ProcessCompletionConfig,
}

impl TryFrom<ExplainArgs> for ExplainConfig {
    type Error = CliError;

    fn try_from(args: ExplainArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_EXPLAIN_REQUEST,
            env: ENV_EXPLAIN_REQUEST,
        })?;
        let completion = match args.completion_command {
            Some(command_line) => parse_command_line(&command_line)?,
            None => ProcessCompletionConfig::default(),
        };
        Ok(Self {
            request_path,
            completion,
        })
    }
}

fn parse_command_line(command_line: &str) -> Result<ProcessCompletionConfig, CliError> {
    let mut words = command_line.split_whitespace();
    let program = words.next().ok_or(CliError::MissingArgument {
        field: ARG_EXPLAIN_COMPLETION_COMMAND,
        env: ENV_EXPLAIN_COMPLETION_COMMAND,
    })?;
    Ok(ProcessCompletionConfig::new(program).with_args(words))
}

/// Builds the completion backend for the current explain invocation.
pub(super) trait ExplainServiceBuilder {
    fn build(&self, config: &ExplainConfig) -> Box<dyn TextCompletionService>;
}

pub(super) struct DefaultExplainServiceBuilder;

impl ExplainServiceBuilder for DefaultExplainServiceBuilder {
    fn build(&self, config: &ExplainConfig) -> Box<dyn TextCompletionService> {
        Box::new(ProcessCompletionService::new(config.completion.clone()))
    }
}

pub(super) fn run_explain(args: ExplainArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultExplainServiceBuilder;
    run_explain_with(args, &builder, &mut stdout)
}

pub(super) fn run_explain_with(
    args: ExplainArgs,
    builder: &dyn ExplainServiceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.request_path, ARG_EXPLAIN_REQUEST)?;
    let request: ExplainRequest = load_json(&config.request_path)?;
    let service = builder.build(&config);
    let reply = explain(service.as_ref(), &request.into_context())?;
    writeln!(writer, "{reply}").map_err(CliError::WriteOutput)
}
