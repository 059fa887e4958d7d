//! crates/qa_report/src/render_html.rs
//!
//! Offline HTML renderer. Region fragments are built with `HtmlBuilder`
//! (every interpolated value goes through `esc`); the page shell is a
//! minijinja template with HTML auto-escaping, into which the fragments are
//! inserted as already-safe markup.
//!
//! Page containers (fixed ids): `url-input`, `status`, `loading`, `error`,
//! plus one per region (`Region::container_id`).

use std::collections::BTreeMap;
use std::fmt::Write as _;

use minijinja::Environment;
use serde::Serialize;

use crate::structure::{
    DefinitionsView, EvaluationCard, Fact, FaqView, InterpretationCard, ListSection, Region,
    RegionView, ResourcesView, RoadmapView, ScoreBar, ScoreHeader, SummaryView,
};
use crate::{ReportError, ReportModel};

// ------------------------- formatting helpers -------------------------

/// Escape text for HTML element content and quoted attribute values.
pub fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Only absolute http(s) URLs become links.
pub fn safe_href(raw: &str) -> Option<String> {
    let parsed = url::Url::parse(raw.trim()).ok()?;
    match parsed.scheme() {
        "http" | "https" => Some(parsed.to_string()),
        _ => None,
    }
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "Yes"
    } else {
        "No"
    }
}

// ------------------------- HTML builder -------------------------

pub struct HtmlBuilder {
    buf: String,
}

impl Default for HtmlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlBuilder {
    pub fn new() -> Self {
        Self { buf: String::with_capacity(4 * 1024) }
    }

    pub fn finish(self) -> String {
        self.buf
    }

    pub fn region(&mut self, view: &RegionView) {
        match view {
            RegionView::ScoreHeader(v) => self.score_header(v),
            RegionView::Interpretation(v) => self.interpretation(v),
            RegionView::Evaluation(v) => self.evaluation(v),
            RegionView::Summary(v) => self.summary(v),
            RegionView::Definitions(v) => self.definitions(v),
            RegionView::Faq(v) => self.faq(v),
            RegionView::Resources(v) => self.resources(v),
            RegionView::Roadmap(v) => self.roadmap(v),
        }
    }

    // ----- primitives -----

    fn bar(&mut self, b: &ScoreBar) {
        let _ = write!(
            self.buf,
            "<div class=\"score-bar\">\
               <span class=\"score-bar-label\">{}</span>\
               <span class=\"score-bar-track\"><span class=\"score-bar-fill\" style=\"width:{}\"></span></span>\
               <span class=\"score-bar-value\">{}</span>\
             </div>",
            esc(&b.label),
            esc(&b.width_css),
            esc(&b.text)
        );
    }

    fn facts(&mut self, facts: &[Fact]) {
        if facts.is_empty() {
            return;
        }
        self.buf.push_str("<dl class=\"facts\">");
        for f in facts {
            let _ = write!(self.buf, "<dt>{}</dt><dd>{}</dd>", esc(&f.label), esc(&f.value));
        }
        self.buf.push_str("</dl>");
    }

    fn items(&mut self, items: &[String]) {
        self.buf.push_str("<ul>");
        for it in items {
            let _ = write!(self.buf, "<li>{}</li>", esc(it));
        }
        self.buf.push_str("</ul>");
    }

    fn labelled(&mut self, label: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        let _ = write!(self.buf, "<div class=\"list\"><h3>{}</h3>", esc(label));
        self.items(items);
        self.buf.push_str("</div>");
    }

    fn lists(&mut self, lists: &[ListSection]) {
        for l in lists {
            self.labelled(&l.label, &l.items);
        }
    }

    fn empty(&mut self, placeholder: Option<&str>) {
        if let Some(p) = placeholder {
            let _ = write!(self.buf, "<p class=\"empty\">{}</p>", esc(p));
        }
    }

    fn block_head(&mut self, score: Option<&ScoreBar>, found: Option<bool>) {
        if let Some(b) = score {
            self.bar(b);
        }
        if let Some(f) = found {
            let _ = write!(self.buf, "<p class=\"found\">Found on page: {}</p>", yes_no(f));
        }
    }

    // ----- regions -----

    fn score_header(&mut self, h: &ScoreHeader) {
        let _ = write!(
            self.buf,
            "<div class=\"arc-rank\"><span class=\"arc-rank-value\">{}</span>\
             <span class=\"arc-rank-scale\">/100</span></div>\
             <div class=\"badges\">\
               <span class=\"badge {}\">{}</span>\
               <span class=\"badge {}\" title=\"{}\">LLM-ready: {}</span>\
             </div>",
            esc(&h.arc_rank),
            h.verdict.tone.css_class(),
            esc(&h.verdict.text),
            h.llm_ready.css_class(),
            esc(&h.llm_ready.policy),
            esc(&h.llm_ready.text)
        );
        self.buf.push_str("<div class=\"sub-scores\">");
        for b in &h.sub_scores {
            self.bar(b);
        }
        self.buf.push_str("</div>");
        if let Some(issue) = &h.main_issue {
            let _ = write!(self.buf, "<p class=\"main-issue\"><b>Main issue:</b> {}</p>", esc(issue));
        }
        self.facts(&h.page);
    }

    fn interpretation(&mut self, c: &InterpretationCard) {
        self.facts(&c.facts);
        if let Some(s) = &c.generated_summary {
            let _ = write!(self.buf, "<blockquote class=\"generated-summary\">{}</blockquote>", esc(s));
        }
        self.lists(&c.lists);
    }

    fn evaluation(&mut self, c: &EvaluationCard) {
        let _ = write!(
            self.buf,
            "<p><span class=\"badge {}\">{}</span></p><div class=\"bars\">",
            c.verdict.tone.css_class(),
            esc(&c.verdict.text)
        );
        for b in &c.bars {
            self.bar(b);
        }
        self.buf.push_str("</div>");
        self.facts(&c.notes);
        self.lists(&c.lists);
        if !c.sub_questions.is_empty() {
            self.buf.push_str(
                "<h3>Fan-out sub-questions</h3><table class=\"fanout\"><thead><tr>\
                 <th>Question</th><th>Match</th><th>Matched content</th><th>Missing answer</th>\
                 </tr></thead><tbody>",
            );
            for q in &c.sub_questions {
                let _ = write!(
                    self.buf,
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    esc(&q.question),
                    esc(&q.match_quality),
                    esc(q.matched_content.as_deref().unwrap_or("")),
                    esc(q.missing_answer_note.as_deref().unwrap_or(""))
                );
            }
            self.buf.push_str("</tbody></table>");
        }
    }

    fn summary(&mut self, s: &SummaryView) {
        self.block_head(s.score.as_ref(), s.found);
        if let Some(q) = &s.quality {
            let _ = write!(self.buf, "<p class=\"quality\"><b>Quality:</b> {}</p>", esc(q));
        }
        if let Some(t) = &s.text {
            let _ = write!(self.buf, "<div class=\"recommended\"><p>{}</p></div>", esc(t));
        }
        self.facts(&s.facts);
        self.labelled("Key points", &s.key_points);
        self.labelled("Problems", &s.problems);
        self.empty(s.placeholder);
    }

    fn definitions(&mut self, d: &DefinitionsView) {
        self.block_head(d.score.as_ref(), d.found);
        if !d.rows.is_empty() {
            self.buf.push_str("<dl class=\"definitions\">");
            for r in &d.rows {
                let _ = write!(self.buf, "<dt>{}</dt><dd>{}", esc(&r.term), esc(&r.definition));
                if let Some(ctx) = &r.context {
                    let _ = write!(self.buf, " <span class=\"context\">({})</span>", esc(ctx));
                }
                self.buf.push_str("</dd>");
            }
            self.buf.push_str("</dl>");
        }
        self.empty(d.placeholder);
        self.labelled("Missing critical terms", &d.missing_terms);
        self.labelled("Problems", &d.problems);
    }

    fn faq(&mut self, f: &FaqView) {
        self.block_head(f.score.as_ref(), f.found);
        if !f.rows.is_empty() {
            self.buf.push_str("<div class=\"faqs\">");
            for r in &f.rows {
                let _ = write!(
                    self.buf,
                    "<div class=\"faq\"><p class=\"q\"><b>Q:</b> {}</p><p class=\"a\"><b>A:</b> {}</p></div>",
                    esc(&r.question),
                    esc(&r.answer)
                );
            }
            self.buf.push_str("</div>");
        }
        self.empty(f.placeholder);
        self.labelled("Problems", &f.problems);
    }

    fn resources(&mut self, r: &ResourcesView) {
        self.block_head(r.score.as_ref(), r.found);
        if let Some(w) = &r.why_it_matters {
            let _ = write!(self.buf, "<p class=\"why\">{}</p>", esc(w));
        }
        if !r.rows.is_empty() {
            self.buf.push_str("<ul class=\"resources\">");
            for row in &r.rows {
                match row.url.as_deref().and_then(safe_href) {
                    Some(href) => {
                        let _ = write!(
                            self.buf,
                            "<li><a href=\"{}\" rel=\"noopener noreferrer\" target=\"_blank\">{}</a></li>",
                            esc(&href),
                            esc(&row.title)
                        );
                    }
                    None => {
                        let _ = write!(self.buf, "<li>{}", esc(&row.title));
                        if let Some(u) = row.url.as_deref().filter(|u| *u != row.title) {
                            let _ = write!(self.buf, " <span class=\"muted\">{}</span>", esc(u));
                        }
                        self.buf.push_str("</li>");
                    }
                }
            }
            self.buf.push_str("</ul>");
        }
        self.empty(r.placeholder);
        self.labelled("Missing resources", &r.missing);
    }

    fn roadmap(&mut self, r: &RoadmapView) {
        self.buf.push_str("<div class=\"roadmap\">");
        for c in &r.columns {
            let _ = write!(self.buf, "<div class=\"roadmap-column\"><h3>{}</h3>", esc(&c.label));
            if c.items.is_empty() {
                self.empty(c.placeholder);
            } else {
                self.items(&c.items);
            }
            self.buf.push_str("</div>");
        }
        self.buf.push_str("</div>");
    }
}

/// One region as a standalone, escaped HTML fragment.
pub fn render_region(view: &RegionView) -> String {
    let mut h = HtmlBuilder::new();
    h.region(view);
    h.finish()
}

// ------------------------- page shell -------------------------

/// Everything the page containers show. Fragments are markup produced by
/// `render_region`; every other field is plain text.
#[derive(Clone, Debug)]
pub struct Page {
    pub url_input: String,
    pub submit_enabled: bool,
    pub status: String,
    pub loading: bool,
    pub error: Option<String>,
    pub fragments: BTreeMap<Region, String>,
    pub footer: Option<String>,
    /// Open the browser print dialog on load.
    pub auto_print: bool,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            url_input: String::new(),
            submit_enabled: true,
            status: String::new(),
            loading: false,
            error: None,
            fragments: BTreeMap::new(),
            footer: None,
            auto_print: false,
        }
    }
}

impl Page {
    /// Page with every region of `model` filled in.
    pub fn from_report(model: &ReportModel) -> Page {
        let mut page = Page {
            url_input: model.meta.requested_url.clone().unwrap_or_default(),
            footer: model.footer_line(),
            ..Page::default()
        };
        for view in &model.regions {
            page.fragments.insert(view.region(), render_region(view));
        }
        page
    }
}

#[derive(Serialize)]
struct Slot<'a> {
    id: &'static str,
    title: &'static str,
    html: &'a str,
}

#[derive(Serialize)]
struct PageContext<'a> {
    url_input: &'a str,
    submit_enabled: bool,
    status: &'a str,
    loading: bool,
    error: Option<&'a str>,
    regions: Vec<Slot<'a>>,
    footer: Option<&'a str>,
    auto_print: bool,
}

static PAGE_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>Arc Rank report{% if url_input %} · {{ url_input }}{% endif %}</title>
<style>
body{font-family:system-ui,-apple-system,Segoe UI,Roboto,Ubuntu,Arial,sans-serif;margin:24px;color:#1b1b1b}
h1,h2,h3{margin:.3em 0}
section.region{margin:16px 0;padding:12px 16px;border:1px solid #e3e3e3;border-radius:8px}
.arc-rank{font-size:2.4em;font-weight:700}
.arc-rank-scale{font-size:.45em;opacity:.6}
.badge{display:inline-block;padding:.2em .7em;border-radius:9999px;margin-right:6px;background:#eee}
.verdict-positive,.ready-yes{background:#dff5e1;color:#14532d}
.verdict-negative,.ready-no{background:#fde2e1;color:#7f1d1d}
.score-bar{display:grid;grid-template-columns:10em 1fr 3em;gap:8px;align-items:center;margin:4px 0}
.score-bar-track{display:block;height:8px;background:#eee;border-radius:4px;overflow:hidden}
.score-bar-fill{display:block;height:100%;background:#3b82f6}
.facts dt{font-weight:600}
.facts dd{margin:0 0 6px 0}
.empty,.muted{opacity:.7;font-style:italic}
.roadmap{display:grid;grid-template-columns:repeat(3,minmax(0,1fr));gap:12px}
table{border-collapse:collapse}
td,th{padding:4px 8px;border-bottom:1px solid #ddd;text-align:left;vertical-align:top}
#error{color:#b91c1c}
@media print{
  #url-input,#loading,#status,.no-print{display:none !important}
  body{margin:0}
  section.region{break-inside:avoid;border:none}
  a[href]::after{content:" (" attr(href) ")";font-size:.8em}
}
</style>
</head>
<body>
<h1>Arc Rank report</h1>
<form id="url-input" class="no-print" onsubmit="return false">
  <input type="url" name="url" placeholder="https://example.com/page" value="{{ url_input }}">
  <button type="submit"{% if not submit_enabled %} disabled{% endif %}>Analyze</button>
  <button type="button" onclick="window.print()">Download PDF</button>
</form>
<p id="status" role="status">{{ status }}</p>
<div id="loading"{% if not loading %} hidden{% endif %}>Analyzing…</div>
<div id="error" role="alert">{% if error %}{{ error }}{% endif %}</div>
{% for slot in regions %}
<section id="{{ slot.id }}" class="region">
<h2>{{ slot.title }}</h2>
{{ slot.html|safe }}
</section>
{% endfor %}
{% if footer %}<footer class="muted">{{ footer }}</footer>{% endif %}
{% if auto_print %}<script>window.addEventListener("load",function(){window.print();});</script>{% endif %}
</body>
</html>
"#;

/// Render the full page. Plain-text fields are auto-escaped by the template.
pub fn render_page(page: &Page) -> Result<String, ReportError> {
    let mut env = Environment::new();
    env.add_template("page.html", PAGE_TEMPLATE)
        .map_err(|e| ReportError::Template(e.to_string()))?;
    let tmpl = env
        .get_template("page.html")
        .map_err(|e| ReportError::Template(e.to_string()))?;

    let regions = Region::ALL
        .iter()
        .map(|r| Slot {
            id: r.container_id(),
            title: r.title(),
            html: page.fragments.get(r).map(String::as_str).unwrap_or(""),
        })
        .collect();

    let ctx = PageContext {
        url_input: &page.url_input,
        submit_enabled: page.submit_enabled,
        status: &page.status,
        loading: page.loading,
        error: page.error.as_deref(),
        regions,
        footer: page.footer.as_deref(),
        auto_print: page.auto_print,
    };
    tmpl.render(ctx).map_err(|e| ReportError::Template(e.to_string()))
}

/// Convenience: the whole report as one page.
pub fn render_html(model: &ReportModel, auto_print: bool) -> Result<String, ReportError> {
    let page = Page { auto_print, ..Page::from_report(model) };
    render_page(&page)
}
