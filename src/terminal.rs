//! Terminal rendition of the panel: prompt line, spinner, result and error regions.

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use ask_client::AskBackend;
use colored::Colorize;
use query_panel::{
    NoopProgress, PanelError, Phase, Progress, QueryPanel, QueryState, SpinnerProgress,
};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::config::{AgentConfig, ResultStyle};

pub const TITLE: &str = "Analytics Agent";

const LOADING: &str = "Loading...";
const QUIT: [&str; 3] = [":q", ":quit", ":exit"];

/// Runs the prompt loop, or a single question when `one_shot` is set.
///
/// A one-shot run exits with failure unless the question succeeded.
pub async fn run<B>(
    backend: B,
    cfg: &AgentConfig,
    one_shot: Option<String>,
) -> anyhow::Result<ExitCode>
where
    B: AskBackend + 'static,
{
    let panel = QueryPanel::new(backend);
    let progress: Box<dyn Progress> = if cfg.spinner && io::stderr().is_terminal() {
        Box::new(SpinnerProgress::new())
    } else {
        Box::new(NoopProgress)
    };

    if let Some(query) = one_shot {
        panel.set_query(query);
        let state = ask(&panel, progress.as_ref()).await?;
        return Ok(match state.phase {
            Phase::Succeeded => {
                println!("{}", render(&state, cfg.result_style));
                ExitCode::SUCCESS
            }
            _ => {
                eprintln!("{}", render(&state, cfg.result_style));
                ExitCode::FAILURE
            }
        });
    }

    println!("{}", TITLE.bold());
    println!("{}", "Ask a question about the trade table. :q to quit.".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".cyan().bold());
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if QUIT.contains(&line.trim()) {
            break;
        }

        panel.set_query(line);
        let state = ask(&panel, progress.as_ref()).await?;
        println!("{}", render(&state, cfg.result_style));
    }

    debug!("prompt closed");
    Ok(ExitCode::SUCCESS)
}

/// Submits the current query and waits for it to settle.
async fn ask<B>(panel: &QueryPanel<B>, progress: &dyn Progress) -> anyhow::Result<QueryState>
where
    B: AskBackend + 'static,
{
    match panel.submit() {
        Ok(submission) => {
            if panel.snapshot().is_loading {
                progress.start(LOADING);
            }
            let settled = submission.settled().await;
            progress.stop();
            settled?;
        }
        Err(PanelError::Validation) => {}
        Err(e) => return Err(e.into()),
    }
    Ok(panel.snapshot())
}

/// Error region, then result region. Empty when there is nothing to show.
pub fn render(state: &QueryState, style: ResultStyle) -> String {
    let mut out = Vec::new();
    if state.has_error() {
        out.push(state.error_message.red().to_string());
    }
    if let Some(result) = &state.result {
        out.push(format!("{}\n{}", "Result:".green().bold(), format_result(result, style)));
    }
    out.join("\n")
}

/// Strings print raw; everything else as JSON.
pub fn format_result(value: &Value, style: ResultStyle) -> String {
    match (value, style) {
        (Value::String(s), _) => s.clone(),
        (other, ResultStyle::Pretty) => {
            serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string())
        }
        (other, ResultStyle::Compact) => other.to_string(),
    }
}
