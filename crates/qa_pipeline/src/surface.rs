//! crates/qa_pipeline/src/surface.rs
//! Target surfaces: the fixed set of containers the renderer writes into.

use qa_report::render_html::{self, Page};
use qa_report::{Region, RegionView, ReportError};

/// Containers the renderer owns for the duration of its life.
pub trait Surface {
    fn set_url_input(&mut self, url: &str);
    fn set_status(&mut self, text: &str);
    fn set_loading(&mut self, loading: bool);
    fn set_submit_enabled(&mut self, enabled: bool);
    /// `None` clears the error slot.
    fn show_error(&mut self, message: Option<&str>);
    fn render_region(&mut self, view: &RegionView);
    fn clear_region(&mut self, region: Region);
    fn set_footer(&mut self, _footer: Option<&str>) {}
}

/// Keeps the page state and renders it as one HTML document on demand.
#[derive(Clone, Debug, Default)]
pub struct HtmlSurface {
    page: Page,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the on-load print hook to the rendered page.
    pub fn with_auto_print(mut self, auto_print: bool) -> Self {
        self.page.auto_print = auto_print;
        self
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn render(&self) -> Result<String, ReportError> {
        render_html::render_page(&self.page)
    }
}

impl Surface for HtmlSurface {
    fn set_url_input(&mut self, url: &str) {
        self.page.url_input = url.to_string();
    }

    fn set_status(&mut self, text: &str) {
        self.page.status = text.to_string();
    }

    fn set_loading(&mut self, loading: bool) {
        self.page.loading = loading;
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.page.submit_enabled = enabled;
    }

    fn show_error(&mut self, message: Option<&str>) {
        self.page.error = message.map(str::to_string);
    }

    fn render_region(&mut self, view: &RegionView) {
        self.page.fragments.insert(view.region(), render_html::render_region(view));
    }

    fn clear_region(&mut self, region: Region) {
        self.page.fragments.remove(&region);
    }

    fn set_footer(&mut self, footer: Option<&str>) {
        self.page.footer = footer.map(str::to_string);
    }
}
