//! Browser session management over the Chrome DevTools Protocol
//!
//! One exclusively-owned session per run: `detect` finds the browser
//! binary, `session` owns launch/configure/release, and `dom` provides
//! the element-level operations the scenario steps are built from.

pub mod detect;
pub mod dom;
pub mod session;

pub use session::Session;
