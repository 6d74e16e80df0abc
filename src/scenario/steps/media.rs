//! Step 4: upload slide and video
//!
//! Precondition: webcast created, edit view with the Content panel.
//! Postcondition: both files attached, each acknowledged by the portal.

use async_trait::async_trait;
use tracing::info;

use super::Step;
use crate::common::Result;
use crate::scenario::{selectors, StepContext};

pub struct UploadMedia;

#[async_trait]
impl Step for UploadMedia {
    fn name(&self) -> &'static str {
        "upload-media"
    }

    fn description(&self) -> &'static str {
        "Attach the slide and video files, confirming each upload"
    }

    async fn run(&self, ctx: &StepContext<'_>) -> Result<()> {
        ctx.wait(&selectors::media::content_tab())
            .await?
            .js_click()
            .await?;

        // Slide
        ctx.wait(&selectors::media::slide_input())
            .await?
            .set_files(&[ctx.env.slide_path.as_path()])
            .await?;
        ctx.wait_quick(&selectors::media::save_first())
            .await?
            .click()
            .await?;
        ctx.confirmation().await?;
        info!(path = %ctx.env.slide_path.display(), "slide uploaded");

        // Video
        ctx.wait(&selectors::media::video_input())
            .await?
            .set_files(&[ctx.env.video_path.as_path()])
            .await?;
        ctx.wait_quick(&selectors::media::save())
            .await?
            .click()
            .await?;
        ctx.confirmation().await?;
        info!(path = %ctx.env.video_path.display(), "video uploaded");

        Ok(())
    }
}
