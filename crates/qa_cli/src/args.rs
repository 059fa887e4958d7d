// crates/qa_cli/src/args.rs
//
// CLI argument surface for `arc`.
// - `analyze <URL>`: POST the URL to `{API_BASE}/analyze` and render the result
// - `render --input <file>`: render a saved `/analyze` response body offline
// API base resolution: --api-base → QUERYARC_API_BASE (env or .env) → default.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use qa_core::{LlmReadyPolicy, SchemaSelect};
use qa_io::config::API_BASE_ENV;

#[derive(Debug, Parser)]
#[command(
    name = "arc",
    version,
    disable_help_subcommand = true,
    about = "Arc Rank checker: analyze a page with the QueryArc backend and render the result"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Debug-level logs on stderr (overrides RUST_LOG).
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Errors only; no spinner, no progress lines.
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit a URL for analysis and write the report.
    Analyze(AnalyzeArgs),
    /// Render a saved analysis response without contacting the backend.
    Render(RenderArgs),
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Page URL to analyze.
    pub url: String,

    /// Backend base URL; `/analyze` is appended.
    #[arg(long, env = API_BASE_ENV)]
    pub api_base: Option<String>,

    /// Request timeout in seconds (default: none).
    #[arg(long, value_parser = parse_timeout)]
    pub timeout_secs: Option<Duration>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Saved `/analyze` response body (JSON).
    #[arg(long)]
    pub input: PathBuf,

    /// URL to show as the submitted one (default: the URL the backend reports).
    #[arg(long)]
    pub url: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output directory for report.html / report.json.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Report formats to write (repeatable).
    #[arg(long, value_enum, default_values_t = [RenderKind::Html, RenderKind::Json])]
    pub render: Vec<RenderKind>,

    /// Open the HTML report and trigger the browser print dialog.
    #[arg(long)]
    pub print: bool,

    /// LLM-ready policy: `threshold[:N]` or `backend-flag` (default: the contract's own).
    #[arg(long)]
    pub llm_ready_policy: Option<LlmReadyPolicy>,

    /// Response contract: `auto`, `score-matrix` or `evaluation`.
    #[arg(long, default_value = "auto")]
    pub schema: SchemaSelect,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum RenderKind {
    Html,
    Json,
}

impl OutputArgs {
    /// Formats to write; printing needs the HTML page.
    pub fn kinds(&self) -> Vec<RenderKind> {
        let mut kinds = Vec::with_capacity(2);
        let wanted = self.render.iter().copied();
        let print = self.print.then_some(RenderKind::Html);
        for kind in wanted.chain(print) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    }
}

/// Whole seconds, at least 1.
pub fn parse_timeout(s: &str) -> Result<Duration, String> {
    let n: u64 = s
        .trim()
        .parse()
        .map_err(|_| format!("timeout must be a whole number of seconds: {s}"))?;
    if n == 0 {
        return Err("timeout must be at least 1 second".into());
    }
    Ok(Duration::from_secs(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn timeout_parser() {
        assert_eq!(parse_timeout("30").unwrap(), Duration::from_secs(30));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("1.5").is_err());
    }

    #[test]
    fn analyze_defaults() {
        let cli = Cli::try_parse_from(["arc", "analyze", "https://example.com"]).unwrap();
        let Command::Analyze(a) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(a.url, "https://example.com");
        assert_eq!(a.output.render, vec![RenderKind::Html, RenderKind::Json]);
        assert_eq!(a.output.schema, SchemaSelect::Auto);
        assert!(a.output.llm_ready_policy.is_none());
        assert!(a.timeout_secs.is_none());
    }

    #[test]
    fn policy_and_print_flags() {
        let cli = Cli::try_parse_from([
            "arc", "render", "--input", "r.json", "--render", "json", "--print",
            "--llm-ready-policy", "threshold:75", "--schema", "evaluation",
        ])
        .unwrap();
        let Command::Render(r) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(r.output.llm_ready_policy, Some(LlmReadyPolicy::ScoreThreshold(75)));
        assert_eq!(r.output.kinds(), vec![RenderKind::Json, RenderKind::Html]);
    }

    #[test]
    fn repeated_formats_are_written_once() {
        let cli = Cli::try_parse_from([
            "arc", "render", "--input", "r.json",
            "--render", "html", "--render", "json", "--render", "html", "--print",
        ])
        .unwrap();
        let Command::Render(r) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(r.output.kinds(), vec![RenderKind::Html, RenderKind::Json]);
    }

    #[test]
    fn bad_policy_is_a_parse_error() {
        assert!(Cli::try_parse_from(["arc", "analyze", "x", "--llm-ready-policy", "maybe"]).is_err());
    }
}
