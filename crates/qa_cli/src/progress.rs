// crates/qa_cli/src/progress.rs
//
// Terminal surface: the HTML page surface plus an indicatif spinner standing
// in for the loading indicator. Status lines also go to the log.

use std::time::Duration;

use indicatif::ProgressBar;

use qa_pipeline::{HtmlSurface, Surface};
use qa_report::{Region, RegionView};

pub struct CliSurface {
    html: HtmlSurface,
    spinner: Option<ProgressBar>,
    show_spinner: bool,
}

impl CliSurface {
    pub fn new(html: HtmlSurface, show_spinner: bool) -> Self {
        Self { html, spinner: None, show_spinner }
    }

    pub fn html(&self) -> &HtmlSurface {
        &self.html
    }

    fn stop(&mut self) {
        if let Some(sp) = self.spinner.take() {
            sp.finish_and_clear();
        }
    }
}

impl Drop for CliSurface {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Surface for CliSurface {
    fn set_url_input(&mut self, url: &str) {
        self.html.set_url_input(url);
    }

    fn set_status(&mut self, text: &str) {
        tracing::info!(status = %text);
        if let Some(sp) = &self.spinner {
            sp.set_message(text.to_string());
        }
        self.html.set_status(text);
    }

    fn set_loading(&mut self, loading: bool) {
        if loading && self.show_spinner && self.spinner.is_none() {
            let sp = ProgressBar::new_spinner();
            sp.enable_steady_tick(Duration::from_millis(120));
            self.spinner = Some(sp);
        } else if !loading {
            self.stop();
        }
        self.html.set_loading(loading);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.html.set_submit_enabled(enabled);
    }

    fn show_error(&mut self, message: Option<&str>) {
        self.html.show_error(message);
    }

    fn render_region(&mut self, view: &RegionView) {
        self.html.render_region(view);
    }

    fn clear_region(&mut self, region: Region) {
        self.html.clear_region(region);
    }

    fn set_footer(&mut self, footer: Option<&str>) {
        self.html.set_footer(footer);
    }
}
