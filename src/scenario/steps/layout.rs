//! Step 6: configure the webcast layout
//!
//! Precondition: manage page for the activated webcast.
//! Postcondition: preview texts set, three features enabled, layout saved.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use super::Step;
use crate::common::Result;
use crate::scenario::{selectors, StepContext};

const PREVIEW_TITLE: &str = "Automated Preview Text Title!";
const PREVIEW_DESCRIPTION: &str = "This is Automation test preview text for testing.";

/// Switches to enable, by position in the layout panel
const SWITCHES: &[(&str, usize)] = &[("logo", 2), ("qna", 4), ("slider-list", 6)];

/// The panel animates each toggle; flipping too fast loses clicks
const SWITCH_SETTLE: Duration = Duration::from_millis(500);

pub struct ConfigureLayout;

#[async_trait]
impl Step for ConfigureLayout {
    fn name(&self) -> &'static str {
        "configure-layout"
    }

    fn description(&self) -> &'static str {
        "Set preview texts, enable logo/Q&A/slider switches, save"
    }

    async fn run(&self, ctx: &StepContext<'_>) -> Result<()> {
        ctx.wait(&selectors::layout::layout_tab())
            .await?
            .js_click()
            .await?;

        let title = ctx.wait(&selectors::layout::preview_title()).await?;
        title.scroll_into_view().await?;
        title.clear().await?;
        title.type_text(PREVIEW_TITLE).await?;

        let description = ctx.wait(&selectors::layout::preview_description()).await?;
        description.scroll_into_view().await?;
        description.clear().await?;
        description.type_text(PREVIEW_DESCRIPTION).await?;

        for (feature, position) in SWITCHES {
            let switch = ctx.wait(&selectors::layout::switch(*position)).await?;
            switch.scroll_into_view().await?;
            switch.js_click().await?;
            info!(feature, "switch flipped");
            tokio::time::sleep(SWITCH_SETTLE).await;
        }

        let save = ctx.wait(&selectors::layout::save()).await?;
        save.scroll_into_view().await?;
        save.js_click().await?;
        ctx.confirmation().await?;

        info!("layout configured");
        Ok(())
    }
}
