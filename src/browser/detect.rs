//! Browser binary discovery
//!
//! The suite does not ship or install a browser; it finds one. Discovery
//! order: explicit path (the DRIVER variable or the config file's
//! `chrome_path`), the CHROME environment variable, then known executable
//! names on PATH.

use std::path::{Path, PathBuf};

/// Known Chromium-based executable names to search for on PATH.
/// All of these speak CDP.
const CHROMIUM_EXECUTABLES: &[&str] = &[
    "chrome",
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "msedge",
    "microsoft-edge-stable",
    "brave-browser",
];

/// Result of browser discovery
#[derive(Debug, Clone)]
pub struct Detection {
    /// Path to the browser executable, if one was found
    pub path: Option<PathBuf>,
    /// Install guidance when nothing was found
    pub install_hint: String,
}

impl Detection {
    fn found(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            install_hint: String::new(),
        }
    }
}

/// Detect a Chromium-based browser on this system
pub fn detect_browser(explicit: Option<&Path>) -> Detection {
    if let Some(path) = explicit {
        if path.exists() {
            return Detection::found(path.to_path_buf());
        }
    }

    if let Ok(path) = std::env::var("CHROME") {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Detection::found(p);
        }
    }

    for name in CHROMIUM_EXECUTABLES {
        if let Ok(path) = which::which(name) {
            return Detection::found(path);
        }
    }

    Detection {
        path: None,
        install_hint: install_instructions(),
    }
}

/// Platform-specific install guidance
pub fn install_instructions() -> String {
    let instructions = if cfg!(target_os = "macos") {
        "  brew install --cask google-chrome"
    } else if cfg!(target_os = "windows") {
        "  winget install Google.Chrome"
    } else {
        "  Debian/Ubuntu: sudo apt install chromium-browser\n  \
         Fedora:         sudo dnf install chromium\n  \
         Arch:           sudo pacman -S chromium"
    };

    format!(
        "Install a Chromium-based browser:\n\n{instructions}\n\n\
         Any Chromium-based browser works (Chrome, Chromium, Edge, Brave).\n\
         Or point the DRIVER environment variable at the browser binary."
    )
}
