//! Step 3: create a webcast
//!
//! Precondition: portal edit view.
//! Postcondition: webcast created, confirmation dialog shown.

use async_trait::async_trait;
use tracing::info;

use super::Step;
use crate::common::Result;
use crate::scenario::{selectors, StepContext};

/// Fixed schedule the creation form is filled with: day of month, hour,
/// and duration in hours. The picker widgets select by displayed text.
const SCHEDULE_DAY: &str = "25";
const SCHEDULE_HOUR: &str = "03";
const SCHEDULE_DURATION: &str = "01";

pub struct CreateWebcast;

#[async_trait]
impl Step for CreateWebcast {
    fn name(&self) -> &'static str {
        "create-webcast"
    }

    fn description(&self) -> &'static str {
        "Fill the multi-page creation form and wait for confirmation"
    }

    async fn run(&self, ctx: &StepContext<'_>) -> Result<()> {
        ctx.wait(&selectors::webcast::sessions_tab())
            .await?
            .js_click()
            .await?;
        ctx.wait(&selectors::webcast::creation_menu())
            .await?
            .click()
            .await?;
        ctx.wait(&selectors::webcast::new_webcast_option())
            .await?
            .js_click()
            .await?;

        // Page 1: title
        ctx.wait(&selectors::webcast::title_input())
            .await?
            .type_text(&ctx.env.new_webcast_title)
            .await?;
        ctx.wait_quick(&selectors::webcast::next_button())
            .await?
            .click()
            .await?;

        // Page 2: date, time, duration
        ctx.wait(&selectors::webcast::date_input()).await?.click().await?;
        ctx.wait(&selectors::webcast::date_day(SCHEDULE_DAY))
            .await?
            .click()
            .await?;

        ctx.wait(&selectors::webcast::time_input()).await?.click().await?;
        ctx.wait(&selectors::webcast::time_hour(SCHEDULE_HOUR))
            .await?
            .click()
            .await?;

        ctx.wait(&selectors::webcast::duration_input())
            .await?
            .click()
            .await?;
        ctx.wait(&selectors::webcast::duration_value(SCHEDULE_DURATION))
            .await?
            .click()
            .await?;

        // Remaining pages carry defaults
        ctx.wait_quick(&selectors::webcast::next_button())
            .await?
            .click()
            .await?;
        ctx.wait_quick(&selectors::webcast::next_button())
            .await?
            .click()
            .await?;

        ctx.wait(&selectors::webcast::create_button())
            .await?
            .js_click()
            .await?;
        ctx.confirmation().await?;

        info!(title = %ctx.env.new_webcast_title, "webcast created");
        Ok(())
    }
}
