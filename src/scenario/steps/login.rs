//! Step 1: login
//!
//! Precondition: fresh session on a blank page.
//! Postcondition: authenticated, dashboard visible with the welcome banner.

use async_trait::async_trait;
use tracing::info;

use super::Step;
use crate::common::{Error, Result};
use crate::scenario::{selectors, StepContext};

pub struct Login;

#[async_trait]
impl Step for Login {
    fn name(&self) -> &'static str {
        "login"
    }

    fn description(&self) -> &'static str {
        "Submit credentials and wait for the welcome banner"
    }

    async fn run(&self, ctx: &StepContext<'_>) -> Result<()> {
        ctx.session.goto(&ctx.env.url).await?;

        ctx.wait_quick(&selectors::login::email())
            .await?
            .type_text(&ctx.env.email)
            .await?;
        ctx.wait_quick(&selectors::login::password())
            .await?
            .type_text(&ctx.env.password)
            .await?;
        ctx.wait_quick(&selectors::login::submit()).await?.click().await?;

        // Authentication can be slow; this is the run's longest wait
        let banner = ctx
            .wait_secs(&selectors::login::welcome_banner(), ctx.timeouts.welcome_secs)
            .await?;
        let text = banner.text().await?;
        if !text.contains("Welcome") {
            return Err(Error::content_mismatch(
                "login",
                "banner text containing 'Welcome'",
                text,
            ));
        }

        info!(banner = %text, "login successful");
        Ok(())
    }
}
