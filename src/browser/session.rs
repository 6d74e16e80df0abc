//! Browser session lifecycle
//!
//! One session per run: launched before the first step, configured for
//! unattended CI execution, released exactly once when the run ends,
//! pass or fail.

use std::path::Path;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::Page;
use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use crate::browser::detect;
use crate::common::config::BrowserSettings;
use crate::common::{Error, Result};

/// Chrome flags for unattended CI execution
const LAUNCH_ARGS: &[&str] = &[
    "--disable-gpu",
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-extensions",
    "--remote-allow-origins=*",
];

/// Timeout for individual CDP requests
const CDP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One exclusively-owned browser session
pub struct Session {
    browser: Option<Browser>,
    handler_task: JoinHandle<()>,
    page: Page,
    user_agent: String,
}

impl Session {
    /// Launch and configure a browser session
    ///
    /// `driver` is the DRIVER override from the environment; it wins over
    /// the config file's `chrome_path`. `headed` forces a visible window
    /// regardless of the configured headless setting.
    pub async fn launch(
        settings: &BrowserSettings,
        driver: Option<&Path>,
        headed: bool,
    ) -> Result<Self> {
        let explicit = driver.or(settings.chrome_path.as_deref());
        let detection = detect::detect_browser(explicit);
        let binary = detection.path.ok_or(Error::BrowserNotFound {
            hint: detection.install_hint,
        })?;

        let headless = settings.headless && !headed;

        let mut builder = BrowserConfig::builder()
            .chrome_executable(&binary)
            .viewport(Viewport {
                width: settings.viewport_width,
                height: settings.viewport_height,
                device_scale_factor: Some(1.0),
                emulating_mobile: false,
                is_landscape: true,
                has_touch: false,
            })
            .request_timeout(CDP_REQUEST_TIMEOUT);

        // chromiumoxide runs headless by default; with_head() opts out
        if !headless {
            builder = builder.with_head();
        }

        for arg in LAUNCH_ARGS {
            builder = builder.arg(*arg);
        }
        for arg in &settings.chrome_args {
            builder = builder.arg(arg);
        }

        let config = builder.build().map_err(Error::LaunchFailed)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| Error::LaunchFailed(e.to_string()))?;

        // Drain CDP events for the lifetime of the session
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                trace!(?event, "browser event");
            }
            debug!("browser event handler exited");
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| Error::LaunchFailed(e.to_string()))?;

        // Recorded for the run report, like the driver version the
        // original suite stamped into its reports
        let user_agent = page
            .evaluate("navigator.userAgent")
            .await
            .ok()
            .and_then(|v| v.into_value::<String>().ok())
            .unwrap_or_else(|| "unknown".to_string());

        info!(
            browser = %binary.display(),
            headless,
            viewport_width = settings.viewport_width,
            viewport_height = settings.viewport_height,
            "browser session started"
        );

        Ok(Self {
            browser: Some(browser),
            handler_task,
            page,
            user_agent,
        })
    }

    /// The session's single page
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Browser identification captured at launch
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Navigate the page and wait for the load to settle
    pub async fn goto(&self, url: &str) -> Result<()> {
        // Reject anything that is not a fetchable web URL before handing
        // it to the browser
        let parsed = url::Url::parse(url).map_err(|e| Error::NavigationFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(Error::NavigationFailed {
                    url: url.to_string(),
                    reason: format!("unsupported URL scheme '{scheme}'"),
                })
            }
        }

        self.page
            .goto(url)
            .await
            .map_err(|e| Error::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        let _ = self.page.wait_for_navigation().await;

        info!(url, "navigated");
        Ok(())
    }

    /// Release the session
    ///
    /// Idempotent: the browser is taken out of the session on the first
    /// call, so repeated calls are no-ops and the run releases exactly
    /// once. If close is never reached, dropping the underlying browser
    /// still kills the child process.
    pub async fn close(&mut self) {
        if let Some(mut browser) = self.browser.take() {
            let _ = browser.close().await;
            let _ = browser.wait().await;
            self.handler_task.abort();
            info!("browser session released");
        }
    }

    /// Whether the session has already been released
    pub fn is_released(&self) -> bool {
        self.browser.is_none()
    }
}
