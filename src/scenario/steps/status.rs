//! Step 7: toggle the webcast status
//!
//! Precondition: manage page, status dropdown showing Preview.
//! Postcondition: status flipped to Live and back to Preview, with a
//! fresh slide uploaded and confirmed under each status.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use super::Step;
use crate::common::Result;
use crate::scenario::{selectors, StepContext};

/// (current status, status to switch to), in order
const TRANSITIONS: &[(&str, &str)] = &[("Preview", "Live"), ("Live", "Preview")];

/// The dropdown animates open; selecting immediately misses the option
const DROPDOWN_SETTLE: Duration = Duration::from_secs(1);

pub struct ToggleStatus;

#[async_trait]
impl Step for ToggleStatus {
    fn name(&self) -> &'static str {
        "toggle-status"
    }

    fn description(&self) -> &'static str {
        "Flip status between Preview and Live twice, uploading a slide each time"
    }

    async fn run(&self, ctx: &StepContext<'_>) -> Result<()> {
        for (current, next) in TRANSITIONS {
            ctx.wait(&selectors::status::current(current))
                .await?
                .click()
                .await?;

            let option = ctx.wait(&selectors::status::option(next)).await?;
            tokio::time::sleep(DROPDOWN_SETTLE).await;
            option.click().await?;
            info!(from = current, to = next, "status changed");

            // Each status gets its own slide upload
            ctx.wait(&selectors::media::content_tab())
                .await?
                .js_click()
                .await?;
            ctx.wait(&selectors::media::slide_input())
                .await?
                .set_files(&[ctx.env.slide_path.as_path()])
                .await?;
            ctx.wait(&selectors::media::save_first())
                .await?
                .js_click()
                .await?;
            ctx.confirmation().await?;
            info!(status = next, path = %ctx.env.slide_path.display(), "slide uploaded");
        }

        Ok(())
    }
}
