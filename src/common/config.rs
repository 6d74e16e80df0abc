//! Configuration handling
//!
//! Two layers: the per-run environment configuration (credentials, target
//! portal, media paths: the values the journey is parameterized by) and
//! the optional suite configuration file (timeouts, browser settings,
//! report title). The environment layer is loaded once per run and is
//! immutable for the run's duration.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Deserialize;

use super::{Error, Result};

/// Environment selector: which credential/URL set the run targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnvName {
    /// Development portal (URL / EMAIL / PASSWORD)
    Dev,
    /// Production portal (URL_PROD / EMAIL_PROD / PASSWORD_PROD)
    Prod,
}

impl fmt::Display for EnvName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvName::Dev => write!(f, "dev"),
            EnvName::Prod => write!(f, "prod"),
        }
    }
}

impl EnvName {
    /// Credential variable names for this environment
    fn credential_keys(self) -> (&'static str, &'static str, &'static str) {
        match self {
            EnvName::Dev => ("URL", "EMAIL", "PASSWORD"),
            EnvName::Prod => ("URL_PROD", "EMAIL_PROD", "PASSWORD_PROD"),
        }
    }

    /// All variables a run against this environment requires
    pub fn required_keys(self) -> [&'static str; 7] {
        let (url, email, password) = self.credential_keys();
        [
            url,
            email,
            password,
            "TARGET_PORTAL",
            "NEW_WEBCAST_TITLE",
            "SLIDE_PATH",
            "VIDEO_PATH",
        ]
    }
}

/// The journey's parameters, loaded once per run
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Portal login page URL
    pub url: String,
    /// Login email
    pub email: String,
    /// Login password
    pub password: String,
    /// Name of the portal to open in step 2
    pub target_portal: String,
    /// Title for the webcast created in step 3
    pub new_webcast_title: String,
    /// Slide file uploaded in steps 4 and 7
    pub slide_path: PathBuf,
    /// Video file uploaded in step 4
    pub video_path: PathBuf,
    /// Optional browser binary override (the DRIVER variable)
    pub driver: Option<PathBuf>,
}

impl EnvConfig {
    /// Load from the process environment for the given selector
    pub fn load(env: EnvName) -> Result<Self> {
        Self::from_lookup(env, |key| std::env::var(key).ok())
    }

    /// Build the configuration through a lookup function
    ///
    /// Pure in the lookup: calling this twice with the same selector and
    /// lookup yields the same result, which is what makes environment
    /// loading deterministic and idempotent for a fixed run.
    pub fn from_lookup<F>(env: EnvName, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (url_key, email_key, password_key) = env.credential_keys();
        let require = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(Error::MissingEnv { name: key })
        };

        Ok(Self {
            url: require(url_key)?,
            email: require(email_key)?,
            password: require(password_key)?,
            target_portal: require("TARGET_PORTAL")?,
            new_webcast_title: require("NEW_WEBCAST_TITLE")?,
            slide_path: PathBuf::from(require("SLIDE_PATH")?),
            video_path: PathBuf::from(require("VIDEO_PATH")?),
            driver: lookup("DRIVER").filter(|v| !v.is_empty()).map(PathBuf::from),
        })
    }

    /// Names of all required variables absent from the lookup
    ///
    /// Unlike `from_lookup`, which stops at the first gap, this reports
    /// every missing variable so `check` can list them all at once.
    pub fn missing<F>(env: EnvName, lookup: F) -> Vec<&'static str>
    where
        F: Fn(&str) -> Option<String>,
    {
        env.required_keys()
            .into_iter()
            .filter(|key| lookup(key).filter(|v| !v.is_empty()).is_none())
            .collect()
    }
}

/// Suite configuration file structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Wait/timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Browser session settings
    #[serde(default)]
    pub browser: BrowserSettings,

    /// Report settings
    #[serde(default)]
    pub report: ReportSettings,
}

/// Timeout settings in seconds (poll interval in milliseconds)
#[derive(Debug, Deserialize)]
pub struct Timeouts {
    /// Wait for the welcome banner after submitting credentials
    #[serde(default = "default_welcome")]
    pub welcome_secs: u64,

    /// Wait applied to the elements each step hinges on
    #[serde(default = "default_step")]
    pub step_secs: u64,

    /// Wait for controls inside an already-located summary card
    #[serde(default = "default_card")]
    pub card_secs: u64,

    /// Wait for secondary elements (form buttons between page waits)
    #[serde(default = "default_element")]
    pub element_secs: u64,

    /// Poll interval for all bounded waits
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            welcome_secs: default_welcome(),
            step_secs: default_step(),
            card_secs: default_card(),
            element_secs: default_element(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

fn default_welcome() -> u64 {
    60
}
fn default_step() -> u64 {
    30
}
fn default_card() -> u64 {
    10
}
fn default_element() -> u64 {
    5
}
fn default_poll_interval() -> u64 {
    250
}

/// Browser session settings
#[derive(Debug, Deserialize)]
pub struct BrowserSettings {
    /// Run without a visible window (the `--headed` flag overrides this)
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Viewport width; stands in for a maximized window under headless CI
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    /// Viewport height
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    /// Browser binary path; the DRIVER environment variable takes precedence
    pub chrome_path: Option<PathBuf>,

    /// Extra Chrome arguments appended after the suite's own flags
    #[serde(default)]
    pub chrome_args: Vec<String>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: default_headless(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            chrome_path: None,
            chrome_args: Vec::new(),
        }
    }
}

fn default_headless() -> bool {
    true
}
fn default_viewport_width() -> u32 {
    1920
}
fn default_viewport_height() -> u32 {
    1080
}

/// Report settings
#[derive(Debug, Deserialize)]
pub struct ReportSettings {
    /// Title shown at the top of the run summary
    #[serde(default = "default_report_title")]
    pub title: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: default_report_title(),
        }
    }
}

fn default_report_title() -> String {
    "Webcast Portal Regression".to_string()
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("Failed to read '{}': {}", path.display(), e))
                })?;
                return toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()));
            }
        }
        Ok(Self::default())
    }
}

/// Path to the configuration file
///
/// Platform-appropriate via the directories crate, e.g.
/// `~/.config/portal-e2e/config.toml` on Linux.
pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "portal-e2e")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("URL", "https://portal.dev.example.com"),
            ("EMAIL", "qa@example.com"),
            ("PASSWORD", "hunter2"),
            ("URL_PROD", "https://portal.example.com"),
            ("EMAIL_PROD", "qa-prod@example.com"),
            ("PASSWORD_PROD", "hunter3"),
            ("TARGET_PORTAL", "Acme Events"),
            ("NEW_WEBCAST_TITLE", "Quarterly All-Hands"),
            ("SLIDE_PATH", "/data/slides.pdf"),
            ("VIDEO_PATH", "/data/intro.mp4"),
        ])
    }

    fn lookup_in<'a>(
        map: &'a HashMap<&'static str, &'static str>,
    ) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn dev_selector_reads_plain_keys() {
        let env = full_env();
        let cfg = EnvConfig::from_lookup(EnvName::Dev, lookup_in(&env)).unwrap();
        assert_eq!(cfg.url, "https://portal.dev.example.com");
        assert_eq!(cfg.email, "qa@example.com");
        assert_eq!(cfg.target_portal, "Acme Events");
    }

    #[test]
    fn prod_selector_reads_prod_variants() {
        let env = full_env();
        let cfg = EnvConfig::from_lookup(EnvName::Prod, lookup_in(&env)).unwrap();
        assert_eq!(cfg.url, "https://portal.example.com");
        assert_eq!(cfg.email, "qa-prod@example.com");
        assert_eq!(cfg.password, "hunter3");
        // Non-credential keys are shared between environments
        assert_eq!(cfg.new_webcast_title, "Quarterly All-Hands");
    }

    #[test]
    fn missing_variable_is_named_in_error() {
        let mut env = full_env();
        env.remove("PASSWORD");
        let err = EnvConfig::from_lookup(EnvName::Dev, lookup_in(&env)).unwrap_err();
        match err {
            Error::MissingEnv { name } => assert_eq!(name, "PASSWORD"),
            other => panic!("Expected MissingEnv, got {other:?}"),
        }
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut env = full_env();
        env.insert("EMAIL", "");
        let err = EnvConfig::from_lookup(EnvName::Dev, lookup_in(&env)).unwrap_err();
        assert!(matches!(err, Error::MissingEnv { name: "EMAIL" }));
    }

    #[test]
    fn loading_is_deterministic_for_a_fixed_lookup() {
        let env = full_env();
        let a = EnvConfig::from_lookup(EnvName::Dev, lookup_in(&env)).unwrap();
        let b = EnvConfig::from_lookup(EnvName::Dev, lookup_in(&env)).unwrap();
        assert_eq!(a.url, b.url);
        assert_eq!(a.slide_path, b.slide_path);
        assert_eq!(a.driver, b.driver);
    }

    #[test]
    fn missing_lists_every_absent_key() {
        let mut env = full_env();
        env.remove("URL");
        env.remove("VIDEO_PATH");
        let missing = EnvConfig::missing(EnvName::Dev, lookup_in(&env));
        assert_eq!(missing, vec!["URL", "VIDEO_PATH"]);
    }

    #[test]
    fn driver_is_optional() {
        let env = full_env();
        let cfg = EnvConfig::from_lookup(EnvName::Dev, lookup_in(&env)).unwrap();
        assert!(cfg.driver.is_none());

        let mut env = full_env();
        env.insert("DRIVER", "/usr/bin/chromium");
        let cfg = EnvConfig::from_lookup(EnvName::Dev, lookup_in(&env)).unwrap();
        assert_eq!(cfg.driver, Some(PathBuf::from("/usr/bin/chromium")));
    }

    #[test]
    fn config_defaults_match_the_journey_waits() {
        let config = Config::default();
        assert_eq!(config.timeouts.welcome_secs, 60);
        assert_eq!(config.timeouts.step_secs, 30);
        assert_eq!(config.timeouts.card_secs, 10);
        assert_eq!(config.timeouts.element_secs, 5);
        assert!(config.browser.headless);
        assert_eq!(config.browser.viewport_width, 1920);
    }

    #[test]
    fn config_file_overrides_parse() {
        let config: Config = toml::from_str(
            r#"
            [timeouts]
            welcome_secs = 90

            [browser]
            headless = false
            chrome_args = ["--lang=en-US"]

            [report]
            title = "Nightly Portal Run"
            "#,
        )
        .unwrap();
        assert_eq!(config.timeouts.welcome_secs, 90);
        // Unset fields keep their defaults
        assert_eq!(config.timeouts.step_secs, 30);
        assert!(!config.browser.headless);
        assert_eq!(config.browser.chrome_args, vec!["--lang=en-US"]);
        assert_eq!(config.report.title, "Nightly Portal Run");
    }
}
