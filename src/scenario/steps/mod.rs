//! The journey's steps
//!
//! One file per step. `all()` is the registry; its order is the execution
//! order, and each step's precondition is the DOM state the previous step
//! left behind.

pub mod activation;
pub mod layout;
pub mod login;
pub mod media;
pub mod portal;
pub mod status;
pub mod webcast;

use async_trait::async_trait;

use super::StepContext;
use crate::common::Result;

/// One ordered action-and-verification unit within the scenario
#[async_trait]
pub trait Step: Send + Sync {
    /// Short identifier used in progress output and reports
    fn name(&self) -> &'static str;

    /// What the step does and what it asserts
    fn description(&self) -> &'static str;

    /// Execute the step against the session
    async fn run(&self, ctx: &StepContext<'_>) -> Result<()>;
}

/// The journey, in execution order
pub fn all() -> Vec<Box<dyn Step>> {
    vec![
        Box::new(login::Login),
        Box::new(portal::OpenPortal),
        Box::new(webcast::CreateWebcast),
        Box::new(media::UploadMedia),
        Box::new(activation::ActivateAndManage),
        Box::new(layout::ConfigureLayout),
        Box::new(status::ToggleStatus),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lists_the_seven_steps_in_journey_order() {
        let names: Vec<&str> = all().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "login",
                "open-portal",
                "create-webcast",
                "upload-media",
                "activate-manage",
                "configure-layout",
                "toggle-status",
            ]
        );
    }

    #[test]
    fn every_step_has_a_description() {
        for step in all() {
            assert!(!step.description().is_empty(), "{} lacks a description", step.name());
        }
    }
}
