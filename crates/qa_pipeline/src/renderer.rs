//! crates/qa_pipeline/src/renderer.rs
//!
//! State machine: `Idle → Loading → (Rendered | Errored)`. `Rendered` and
//! `Errored` accept the next submission like `Idle`. A submission while
//! `Loading` is rejected with `SubmitError::Busy` and touches nothing.
//! Dropping a `submit` future mid-request returns the renderer to `Idle`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use qa_core::LlmReadyPolicy;
use qa_io::{Analysis, TransportError};
use qa_report::{build_report, Region, ReportModel};

use crate::backend::AnalyzeBackend;
use crate::surface::Surface;
use crate::{
    status_analyzing, SubmitError, STATUS_CANCELLED, STATUS_COMPLETE, STATUS_FAILED,
    VALIDATION_MESSAGE,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RendererState {
    Idle,
    Loading,
    Rendered,
    Errored,
}

pub struct ResultRenderer<B, S> {
    backend: B,
    surface: Mutex<S>,
    state: Mutex<RendererState>,
    /// `None` → each contract's native policy.
    policy: Option<LlmReadyPolicy>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Held across the backend await. If the submission is dropped before a
/// result is dispatched, releases `Loading` and re-enables the form.
struct InFlight<'a, S: Surface> {
    state: &'a Mutex<RendererState>,
    surface: &'a Mutex<S>,
    armed: bool,
}

impl<S: Surface> InFlight<'_, S> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<S: Surface> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        {
            let mut s = lock(self.surface);
            s.set_loading(false);
            s.set_submit_enabled(true);
            s.set_status(STATUS_CANCELLED);
        }
        *lock(self.state) = RendererState::Idle;
        tracing::debug!("in-flight submission dropped");
    }
}

impl<B: AnalyzeBackend, S: Surface> ResultRenderer<B, S> {
    pub fn new(backend: B, surface: S) -> Self {
        Self {
            backend,
            surface: Mutex::new(surface),
            state: Mutex::new(RendererState::Idle),
            policy: None,
        }
    }

    pub fn with_policy(mut self, policy: Option<LlmReadyPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> RendererState {
        *lock(&self.state)
    }

    /// Read access to the surface (e.g. to render the final page).
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&lock(&self.surface))
    }

    pub fn into_surface(self) -> S {
        self.surface.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate, guard, request, then dispatch to `on_success`/`on_failure`.
    pub async fn submit(&self, url: &str) -> Result<ReportModel, SubmitError> {
        let url = url.trim();
        if url.is_empty() {
            lock(&self.surface).show_error(Some(VALIDATION_MESSAGE));
            tracing::debug!("empty submission rejected");
            return Err(SubmitError::Validation);
        }

        {
            let mut state = lock(&self.state);
            if *state == RendererState::Loading {
                tracing::debug!(target_url = %url, "submission rejected: request in flight");
                return Err(SubmitError::Busy);
            }
            *state = RendererState::Loading;
        }

        {
            let mut s = lock(&self.surface);
            s.set_url_input(url);
            s.show_error(None);
            s.set_submit_enabled(false);
            s.set_loading(true);
            s.set_status(&status_analyzing(url));
        }
        tracing::info!(target_url = %url, "analysis started");

        let in_flight = InFlight { state: &self.state, surface: &self.surface, armed: true };
        let outcome = self.backend.analyze(url).await;
        in_flight.disarm();

        match outcome {
            Ok(analysis) => Ok(self.on_success(url, &analysis)),
            Err(e) => {
                self.on_failure(&e);
                Err(SubmitError::Transport(e))
            }
        }
    }

    /// Clear loading, mark complete, and hand every region its view.
    pub fn on_success(&self, requested_url: &str, analysis: &Analysis) -> ReportModel {
        let model = build_report(
            &analysis.result,
            self.policy,
            Some(requested_url),
            Some(analysis.digest.as_str()),
        );

        {
            let mut s = lock(&self.surface);
            s.set_loading(false);
            s.set_submit_enabled(true);
            s.show_error(None);
            s.set_status(STATUS_COMPLETE);
            for region in Region::ALL {
                match model.regions.iter().find(|v| v.region() == region) {
                    Some(view) => s.render_region(view),
                    None => s.clear_region(region),
                }
            }
            s.set_footer(model.footer_line().as_deref());
        }
        *lock(&self.state) = RendererState::Rendered;

        tracing::info!(
            schema = %model.meta.schema,
            policy = %model.meta.llm_ready_policy,
            "analysis rendered"
        );
        model
    }

    pub fn on_failure(&self, error: &TransportError) {
        {
            let mut s = lock(&self.surface);
            s.set_loading(false);
            s.set_submit_enabled(true);
            s.set_status(STATUS_FAILED);
            s.show_error(Some(&error.to_string()));
        }
        *lock(&self.state) = RendererState::Errored;
        tracing::warn!(error = %error, "analysis failed");
    }
}
