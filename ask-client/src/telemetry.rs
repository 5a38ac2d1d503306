use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Target prefixes of the agent's own crates.
pub const TARGET_PREFIXES: [&str; 2] = ["ask_client", "query_panel"];

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// True for events emitted by `ask_client` or `query_panel`.
pub fn is_own_target(target: &str) -> bool {
    TARGET_PREFIXES
        .iter()
        .any(|prefix| target.starts_with(prefix))
}

/// Build a formatting layer that renders ONLY events emitted by the agent crates.
///
/// - RFC3339 UTC timestamps
/// - Compact single-line format with `file:line`
/// - Span close events (request durations)
/// - Writes to stderr; ANSI colors only when stderr is a terminal
///
/// Output goes to stderr so it never interleaves with the panel on stdout.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    layer_with_writer(io::stderr, io::stderr().is_terminal())
}

fn layer_with_writer<S, W>(writer: W, use_ansi: bool) -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let only_own_crates = filter::filter_fn(|meta| is_own_target(meta.target()));

    // The event format owns timer, level, target and location settings.
    let format = fmt::format()
        .compact()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_source_location(true);

    fmt::layer()
        .with_writer(writer)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(format)
        .with_filter(only_own_crates)
}

/// Level directives for the agent crates only, e.g. `ask_client=debug`.
pub fn level_directives(level: Level) -> Vec<Directive> {
    let level = level.as_str().to_lowercase();
    TARGET_PREFIXES
        .iter()
        .filter_map(|prefix| Directive::from_str(&format!("{prefix}={level}")).ok())
        .collect()
}

/// `EnvFilter` from `RUST_LOG` (or `default`), raised to `level` for the agent crates.
///
/// Example: `default = "warn"`, `level = Level::DEBUG` keeps dependencies at
/// WARN and shows DEBUG for `ask_client` and `query_panel`.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    level_directives(level)
        .into_iter()
        .fold(base, |filter, d| filter.add_directive(d))
}
