//! The scripted user journey
//!
//! Seven strictly ordered, interdependent steps: each assumes the DOM
//! state its predecessor left behind, so the first failure makes the
//! remaining steps unrunnable and they are recorded as skipped.

pub mod report;
pub mod runner;
pub mod selectors;
pub mod steps;

use std::time::Duration;

use chromiumoxide::Page;

use crate::browser::dom::{self, ElementHandle, Selector};
use crate::browser::Session;
use crate::common::config::{EnvConfig, Timeouts};
use crate::common::Result;

/// Everything a step needs: the session, the run parameters, the waits
pub struct StepContext<'a> {
    pub session: &'a Session,
    pub env: &'a EnvConfig,
    pub timeouts: &'a Timeouts,
}

impl<'a> StepContext<'a> {
    pub fn page(&self) -> &'a Page {
        self.session.page()
    }

    fn poll(&self) -> Duration {
        Duration::from_millis(self.timeouts.poll_interval_ms)
    }

    /// Wait for an element with the standard per-step timeout
    pub async fn wait(&self, selector: &Selector) -> Result<ElementHandle<'a>> {
        dom::wait_for(
            self.page(),
            selector,
            Duration::from_secs(self.timeouts.step_secs),
            self.poll(),
        )
        .await
    }

    /// Wait for a secondary element (form buttons between page waits)
    pub async fn wait_quick(&self, selector: &Selector) -> Result<ElementHandle<'a>> {
        dom::wait_for(
            self.page(),
            selector,
            Duration::from_secs(self.timeouts.element_secs),
            self.poll(),
        )
        .await
    }

    /// Wait for an element with an explicit timeout in seconds
    pub async fn wait_secs(&self, selector: &Selector, secs: u64) -> Result<ElementHandle<'a>> {
        dom::wait_for(self.page(), selector, Duration::from_secs(secs), self.poll()).await
    }

    /// Wait until at least one element matches, returning all matches
    pub async fn wait_all(&self, selector: &Selector) -> Result<Vec<ElementHandle<'a>>> {
        dom::wait_for_all(
            self.page(),
            selector,
            Duration::from_secs(self.timeouts.step_secs),
            self.poll(),
        )
        .await
    }

    /// Wait for the portal's confirmation dialog
    pub async fn confirmation(&self) -> Result<()> {
        self.wait(&selectors::common::confirmation_dialog())
            .await
            .map(|_| ())
    }
}
