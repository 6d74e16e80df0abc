//! Step 5: activate and manage the created webcast
//!
//! Precondition: webcast list with summary cards, one of them the webcast
//! created in step 3.
//! Postcondition: webcast activated and its manage page open.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use super::Step;
use crate::browser::dom::ElementHandle;
use crate::common::{Error, Result};
use crate::scenario::{selectors, StepContext};

/// The list re-renders after activation; give it a moment before
/// re-querying the cards
const ACTIVATION_SETTLE: Duration = Duration::from_secs(2);

pub struct ActivateAndManage;

#[async_trait]
impl Step for ActivateAndManage {
    fn name(&self) -> &'static str {
        "activate-manage"
    }

    fn description(&self) -> &'static str {
        "Find the created webcast's card, activate it, then open Manage"
    }

    async fn run(&self, ctx: &StepContext<'_>) -> Result<()> {
        let card = find_card(ctx, &ctx.env.new_webcast_title).await?;
        info!(title = %ctx.env.new_webcast_title, "webcast card found");

        let activate = card
            .wait_within(
                &selectors::activation::card_activate_button(),
                Duration::from_secs(ctx.timeouts.card_secs),
                Duration::from_millis(ctx.timeouts.poll_interval_ms),
            )
            .await?;
        activate.click().await?;
        ctx.confirmation().await?;
        tokio::time::sleep(ACTIVATION_SETTLE).await;

        // The activation re-renders the list; the old card handle is stale
        let card = find_card(ctx, &ctx.env.new_webcast_title).await?;
        let manage = card
            .wait_within(
                &selectors::activation::card_manage_button(),
                Duration::from_secs(ctx.timeouts.card_secs),
                Duration::from_millis(ctx.timeouts.poll_interval_ms),
            )
            .await?;
        manage.click().await?;

        info!(title = %ctx.env.new_webcast_title, "manage page opened");
        Ok(())
    }
}

/// Find the summary card whose event name matches the title,
/// case-insensitively
async fn find_card<'a>(
    ctx: &StepContext<'a>,
    title: &str,
) -> Result<ElementHandle<'a>> {
    let cards = ctx.wait_all(&selectors::activation::summary_cards()).await?;
    info!(count = cards.len(), "webcast summaries listed");

    let wanted = title.trim().to_lowercase();
    for card in cards {
        let Some(name_el) = card
            .find_within(&selectors::activation::card_event_name())
            .await?
        else {
            continue;
        };
        let name = name_el.text().await?;
        if name.trim().to_lowercase() == wanted {
            return Ok(card);
        }
    }

    Err(Error::content_mismatch(
        "activate-manage",
        format!("a summary card named '{title}'"),
        "no matching card in the webcast list".to_string(),
    ))
}
