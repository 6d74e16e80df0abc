//! Step 2: open the target portal
//!
//! Precondition: dashboard with the portal search box.
//! Postcondition: the portal's edit view, branding title visible.

use async_trait::async_trait;
use tracing::info;

use super::Step;
use crate::common::{Error, Result};
use crate::scenario::{selectors, StepContext};

pub struct OpenPortal;

#[async_trait]
impl Step for OpenPortal {
    fn name(&self) -> &'static str {
        "open-portal"
    }

    fn description(&self) -> &'static str {
        "Search for the target portal and open its edit view"
    }

    async fn run(&self, ctx: &StepContext<'_>) -> Result<()> {
        let search = ctx.wait(&selectors::portal::search_box()).await?;
        search.click().await?;
        search.type_text(&ctx.env.target_portal).await?;

        // The Edit button sits under a hover overlay; click from the page
        ctx.wait(&selectors::portal::edit_button())
            .await?
            .js_click()
            .await?;

        let title = ctx
            .wait(&selectors::portal::branding_title())
            .await?
            .text()
            .await?;
        if !title.contains("Portal") {
            return Err(Error::content_mismatch(
                "open-portal",
                "branding title containing 'Portal'",
                title,
            ));
        }

        info!(portal = %title, "opened portal");
        Ok(())
    }
}
