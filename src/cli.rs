use clap::Parser;

/// Ask the analytics agent questions about the trade table in plain English.
#[derive(Debug, Parser)]
#[command(name = "analytics-agent", version, about)]
pub struct Cli {
    /// Ask a single question and exit instead of opening the prompt.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Print JSON results on one line.
    #[arg(long)]
    pub compact: bool,

    /// Disable the loading spinner.
    #[arg(long)]
    pub no_spinner: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_shot_query() {
        let cli = Cli::try_parse_from(["analytics-agent", "-q", "Show trades above 1000 shares"])
            .unwrap();
        assert_eq!(cli.query.as_deref(), Some("Show trades above 1000 shares"));
        assert!(!cli.compact);
    }

    #[test]
    fn flags_default_off() {
        let cli = Cli::try_parse_from(["analytics-agent"]).unwrap();
        assert_eq!(cli.query, None);
        assert!(!cli.no_spinner);
    }
}
