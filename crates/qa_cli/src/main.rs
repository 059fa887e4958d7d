// crates/qa_cli/src/main.rs
//
// `arc`: submit a URL (or replay a saved response), render the report, write
// report.html / report.json, and optionally open the page for printing.
// Errors are mapped onto a fixed exit-code table.

mod args;
mod progress;

mod exitcodes {
    pub const OK: i32 = 0;
    /// Empty URL, bad flag values, unreadable-as-JSON saved response.
    pub const VALIDATION: i32 = 2;
    /// Network failure, non-2xx, invalid body, timeout.
    pub const TRANSPORT: i32 = 3;
    pub const IO: i32 = 4;
    pub const RENDER: i32 = 5;
}

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use args::{AnalyzeArgs, Cli, Command, OutputArgs, RenderArgs, RenderKind};
use progress::CliSurface;
use qa_io::{loader, output, AnalyzeClient, ClientConfig, IoError};
use qa_pipeline::{AnalyzeBackend, HtmlSurface, ReplayBackend, ResultRenderer, SubmitError};
use qa_report::{ReportError, ReportModel};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug, Error)]
enum MainError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    Render(String),
}

fn main() -> ExitCode {
    // `.env` feeds QUERYARC_API_BASE before clap reads the environment.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(c) => c,
        Err(e) => {
            let _ = e.print();
            let rc = if e.use_stderr() { exitcodes::VALIDATION } else { exitcodes::OK };
            return ExitCode::from(rc as u8);
        }
    };
    init_tracing(cli.verbose, cli.quiet);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("arc: error: runtime: {e}");
            return ExitCode::from(exitcodes::IO as u8);
        }
    };

    let rc = match runtime.block_on(run(&cli)) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("arc: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(cli: &Cli) -> Result<(), MainError> {
    match &cli.command {
        Command::Analyze(a) => run_analyze(a, cli.quiet).await,
        Command::Render(r) => run_render(r, cli.quiet).await,
    }
}

async fn run_analyze(a: &AnalyzeArgs, quiet: bool) -> Result<(), MainError> {
    let config = ClientConfig::resolve(a.api_base.as_deref())
        .map_err(map_io_err)?
        .with_timeout(a.timeout_secs)
        .with_schema(a.output.schema);
    let client = AnalyzeClient::new(&config).map_err(map_io_err)?;
    tracing::debug!(endpoint = %client.endpoint(), "client ready");

    render_through(client, &a.url, &a.output, quiet).await
}

async fn run_render(r: &RenderArgs, quiet: bool) -> Result<(), MainError> {
    let analysis = loader::load_file(&r.input, r.output.schema).map_err(map_io_err)?;
    let url = r
        .url
        .clone()
        .or_else(|| analysis.result.analyzed_url().map(str::to_string))
        .unwrap_or_else(|| r.input.display().to_string());

    render_through(ReplayBackend::new(analysis), &url, &r.output, quiet).await
}

/// Drive one submission through the renderer, then write the outputs.
async fn render_through<B: AnalyzeBackend>(
    backend: B,
    url: &str,
    out: &OutputArgs,
    quiet: bool,
) -> Result<(), MainError> {
    let show_spinner = !quiet && std::io::stderr().is_terminal();
    let surface = CliSurface::new(HtmlSurface::new().with_auto_print(out.print), show_spinner);
    let renderer = ResultRenderer::new(backend, surface).with_policy(out.llm_ready_policy);

    let outcome = renderer.submit(url).await;
    let surface = renderer.into_surface();
    let model = outcome.map_err(map_submit_err)?;

    write_outputs(&model, surface.html(), out, quiet)
}

fn write_outputs(
    model: &ReportModel,
    html: &HtmlSurface,
    out: &OutputArgs,
    quiet: bool,
) -> Result<(), MainError> {
    let mut html_path: Option<PathBuf> = None;
    for kind in out.kinds() {
        match kind {
            RenderKind::Html => {
                let page = html.render().map_err(map_report_err)?;
                let path = out.out.join("report.html");
                write_file(&path, page.as_bytes(), quiet)?;
                html_path = Some(path);
            }
            RenderKind::Json => {
                let json = render_json(model)?;
                write_file(&out.out.join("report.json"), json.as_bytes(), quiet)?;
            }
        }
    }

    if out.print {
        if let Some(path) = html_path {
            // A missing browser is not fatal: the page is on disk.
            if let Err(e) = open::that(&path) {
                tracing::warn!(path = %path.display(), error = %e, "could not open report for printing");
            }
        }
    }
    Ok(())
}

#[cfg(feature = "report-json")]
fn render_json(model: &ReportModel) -> Result<String, MainError> {
    qa_report::render_json::render_json(model).map_err(map_report_err)
}

#[cfg(not(feature = "report-json"))]
fn render_json(_model: &ReportModel) -> Result<String, MainError> {
    Err(MainError::Render("JSON renderer not built (enable feature `report-json`)".into()))
}

fn write_file(path: &Path, bytes: &[u8], quiet: bool) -> Result<(), MainError> {
    output::write_report_file(path, bytes)
        .map_err(|e| MainError::Io(format!("write {}: {e}", path.display())))?;
    if !quiet {
        eprintln!("arc: wrote {}", path.display());
    }
    Ok(())
}

/// Map our typed errors to the exit-code table.
fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Transport(_) => TRANSPORT,
        MainError::Io(_) => IO,
        MainError::Render(_) => RENDER,
    }
}

fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Config(m) => MainError::Validation(m),
        IoError::Json(m) => MainError::Validation(format!("not a JSON response: {m}")),
        IoError::Path(m) => MainError::Io(m),
    }
}

fn map_submit_err(e: SubmitError) -> MainError {
    match e {
        SubmitError::Validation | SubmitError::Busy => MainError::Validation(e.to_string()),
        SubmitError::Transport(t) => MainError::Transport(t.to_string()),
    }
}

fn map_report_err(e: ReportError) -> MainError {
    MainError::Render(e.to_string())
}
