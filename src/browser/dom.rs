//! Element location and interaction
//!
//! Elements are located by injected JavaScript (CSS or XPath; the portal
//! forces positional XPath in several places) and tagged with a private
//! ref attribute; every subsequent action resolves the tag. Waits are
//! bounded polls with a deadline and fixed interval. Input goes through
//! dispatched CDP mouse/key events so the portal's framework handlers
//! fire; a JS click fallback exists for controls the portal overlays.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chromiumoxide::cdp::browser_protocol::dom::{
    GetDocumentParams, QuerySelectorParams, SetFileInputFilesParams,
};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType, DispatchMouseEventParams, DispatchMouseEventType,
    MouseButton,
};
use chromiumoxide::Page;
use tracing::debug;

use crate::common::{Error, Result};

/// Attribute used to tag located elements for later resolution
const REF_ATTR: &str = "data-e2e-ref";

/// Settle delay after scrolling an element into view before clicking
const SCROLL_SETTLE: Duration = Duration::from_millis(100);

static NEXT_REF: AtomicU64 = AtomicU64::new(1);

fn next_ref() -> u64 {
    NEXT_REF.fetch_add(1, Ordering::SeqCst)
}

/// A declarative element selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector, e.g. `#email` or `.webcast-summary`
    Css(String),
    /// XPath expression; relative expressions (`.//...`) are resolved
    /// against a previously located element
    XPath(String),
}

impl Selector {
    pub fn css(expr: impl Into<String>) -> Self {
        Selector::Css(expr.into())
    }

    pub fn xpath(expr: impl Into<String>) -> Self {
        Selector::XPath(expr.into())
    }

    fn expr(&self) -> &str {
        match self {
            Selector::Css(s) | Selector::XPath(s) => s,
        }
    }

    /// JavaScript expression resolving this selector to a single node,
    /// evaluated against `scope` (an element expression or `document`)
    fn lookup_js(&self, scope: &str) -> String {
        let quoted = js_string(self.expr());
        match self {
            Selector::Css(_) => format!("{scope}.querySelector({quoted})"),
            Selector::XPath(_) => format!(
                "document.evaluate({quoted}, {scope}, null, \
                 XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
            ),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Css(s) => write!(f, "css:{s}"),
            Selector::XPath(s) => write!(f, "xpath:{s}"),
        }
    }
}

/// Escape a string for embedding in injected JavaScript
fn js_string(s: &str) -> String {
    serde_json::to_string(s).expect("string serialization is infallible")
}

/// A located element, resolved through its ref tag
pub struct ElementHandle<'a> {
    page: &'a Page,
    ref_id: u64,
}

/// Locate a single element, tagging it for later actions
pub async fn locate<'a>(page: &'a Page, selector: &Selector) -> Result<Option<ElementHandle<'a>>> {
    let ref_id = next_ref();
    let js = format!(
        r#"(() => {{
            const el = {lookup};
            if (!el) return false;
            el.setAttribute('{REF_ATTR}', '{ref_id}');
            return true;
        }})()"#,
        lookup = selector.lookup_js("document"),
    );

    let found: bool = eval_value(page, &js).await?;
    Ok(found.then_some(ElementHandle { page, ref_id }))
}

/// Locate every element matching the selector, in document order
pub async fn locate_all<'a>(page: &'a Page, selector: &Selector) -> Result<Vec<ElementHandle<'a>>> {
    let quoted = js_string(selector.expr());
    let collect = match selector {
        Selector::Css(_) => format!("Array.from(document.querySelectorAll({quoted}))"),
        Selector::XPath(_) => format!(
            "(() => {{ \
                const r = document.evaluate({quoted}, document, null, \
                    XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); \
                const nodes = []; \
                for (let i = 0; i < r.snapshotLength; i++) nodes.push(r.snapshotItem(i)); \
                return nodes; \
            }})()"
        ),
    };

    // Reserve a contiguous ref range, then tag each match. The page can
    // re-render between the two evaluations, so tagging never runs past
    // the reserved range.
    let probe: u64 = eval_value(page, &format!("(() => {{ return {collect}.length; }})()")).await?;
    if probe == 0 {
        return Ok(Vec::new());
    }
    let base = NEXT_REF.fetch_add(probe, Ordering::SeqCst);

    let count: u64 = eval_value(
        page,
        &format!(
            r#"(() => {{
                const nodes = {collect}.slice(0, {probe});
                nodes.forEach((el, i) => el.setAttribute('{REF_ATTR}', String({base} + i)));
                return nodes.length;
            }})()"#
        ),
    )
    .await?;

    Ok((0..count)
        .map(|i| ElementHandle {
            page,
            ref_id: base + i,
        })
        .collect())
}

/// Wait for an element to appear, polling until the deadline
pub async fn wait_for<'a>(
    page: &'a Page,
    selector: &Selector,
    timeout: Duration,
    poll: Duration,
) -> Result<ElementHandle<'a>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(el) = locate(page, selector).await? {
            debug!(selector = %selector, "element found");
            return Ok(el);
        }
        if Instant::now() >= deadline {
            return Err(Error::element_timeout(
                selector.to_string(),
                timeout.as_secs(),
            ));
        }
        tokio::time::sleep(poll).await;
    }
}

/// Wait until at least one element matches, returning all matches
pub async fn wait_for_all<'a>(
    page: &'a Page,
    selector: &Selector,
    timeout: Duration,
    poll: Duration,
) -> Result<Vec<ElementHandle<'a>>> {
    let deadline = Instant::now() + timeout;
    loop {
        let found = locate_all(page, selector).await?;
        if !found.is_empty() {
            debug!(selector = %selector, count = found.len(), "elements found");
            return Ok(found);
        }
        if Instant::now() >= deadline {
            return Err(Error::element_timeout(
                selector.to_string(),
                timeout.as_secs(),
            ));
        }
        tokio::time::sleep(poll).await;
    }
}

impl<'a> ElementHandle<'a> {
    /// The tag this element resolves through
    pub fn ref_id(&self) -> u64 {
        self.ref_id
    }

    fn resolve_js(&self) -> String {
        format!("document.querySelector('[{REF_ATTR}=\"{}\"]')", self.ref_id)
    }

    /// Run a JS statement with `el` bound to this element
    async fn eval_on(&self, body: &str) -> Result<()> {
        let js = format!(
            r#"(() => {{
                const el = {resolve};
                if (!el) return false;
                {body}
                return true;
            }})()"#,
            resolve = self.resolve_js(),
        );
        let alive: bool = eval_value(self.page, &js).await?;
        if alive {
            Ok(())
        } else {
            Err(Error::ElementVanished(self.ref_id))
        }
    }

    /// Locate a descendant via a relative XPath, scoped to this element
    pub async fn find_within(&self, selector: &Selector) -> Result<Option<ElementHandle<'a>>> {
        let ref_id = next_ref();
        let js = format!(
            r#"(() => {{
                const el = {resolve};
                if (!el) return -1;
                const node = {lookup};
                if (!node) return 0;
                node.setAttribute('{REF_ATTR}', '{ref_id}');
                return 1;
            }})()"#,
            resolve = self.resolve_js(),
            lookup = selector.lookup_js("el"),
        );
        match eval_value::<i64>(self.page, &js).await? {
            -1 => Err(Error::ElementVanished(self.ref_id)),
            0 => Ok(None),
            _ => Ok(Some(ElementHandle {
                page: self.page,
                ref_id,
            })),
        }
    }

    /// Wait for a descendant to become present
    pub async fn wait_within(
        &self,
        selector: &Selector,
        timeout: Duration,
        poll: Duration,
    ) -> Result<ElementHandle<'a>> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(el) = self.find_within(selector).await? {
                return Ok(el);
            }
            if Instant::now() >= deadline {
                return Err(Error::element_timeout(
                    selector.to_string(),
                    timeout.as_secs(),
                ));
            }
            tokio::time::sleep(poll).await;
        }
    }

    /// Scroll this element into view
    pub async fn scroll_into_view(&self) -> Result<()> {
        self.eval_on("el.scrollIntoView(true);").await
    }

    /// Click via dispatched mouse events at the element's center
    pub async fn click(&self) -> Result<()> {
        self.scroll_into_view().await?;
        tokio::time::sleep(SCROLL_SETTLE).await;

        let (x, y) = self.center().await?;

        let press = DispatchMouseEventParams::builder()
            .r#type(DispatchMouseEventType::MousePressed)
            .x(x)
            .y(y)
            .button(MouseButton::Left)
            .click_count(1)
            .build()
            .map_err(Error::Cdp)?;
        self.page
            .execute(press)
            .await
            .map_err(|e| Error::Cdp(e.to_string()))?;

        let release = DispatchMouseEventParams::builder()
            .r#type(DispatchMouseEventType::MouseReleased)
            .x(x)
            .y(y)
            .button(MouseButton::Left)
            .click_count(1)
            .build()
            .map_err(Error::Cdp)?;
        self.page
            .execute(release)
            .await
            .map_err(|e| Error::Cdp(e.to_string()))?;

        debug!(ref_id = self.ref_id, x, y, "clicked element");
        Ok(())
    }

    /// Click from inside the page
    ///
    /// The portal overlays several controls (Edit, tab buttons, switches)
    /// so a coordinate click would hit the overlay instead.
    pub async fn js_click(&self) -> Result<()> {
        self.eval_on("el.click();").await?;
        debug!(ref_id = self.ref_id, "js-clicked element");
        Ok(())
    }

    /// Type text as individual key events
    pub async fn type_text(&self, text: &str) -> Result<()> {
        self.eval_on("el.focus();").await?;

        for c in text.chars() {
            let key_down = DispatchKeyEventParams::builder()
                .r#type(DispatchKeyEventType::KeyDown)
                .text(c.to_string())
                .build()
                .map_err(Error::Cdp)?;
            self.page
                .execute(key_down)
                .await
                .map_err(|e| Error::Cdp(e.to_string()))?;

            let key_up = DispatchKeyEventParams::builder()
                .r#type(DispatchKeyEventType::KeyUp)
                .text(c.to_string())
                .build()
                .map_err(Error::Cdp)?;
            self.page
                .execute(key_up)
                .await
                .map_err(|e| Error::Cdp(e.to_string()))?;
        }

        debug!(ref_id = self.ref_id, chars = text.len(), "typed text");
        Ok(())
    }

    /// Clear an input's value, notifying the portal's framework
    pub async fn clear(&self) -> Result<()> {
        self.eval_on("el.value = ''; el.dispatchEvent(new Event('input', { bubbles: true }));")
            .await
    }

    /// The element's rendered text
    pub async fn text(&self) -> Result<String> {
        let js = format!(
            r#"(() => {{
                const el = {resolve};
                if (!el) return null;
                return el.innerText ?? el.textContent ?? '';
            }})()"#,
            resolve = self.resolve_js(),
        );
        eval_value::<Option<String>>(self.page, &js)
            .await?
            .ok_or(Error::ElementVanished(self.ref_id))
    }

    /// Attach files to a file input
    ///
    /// The portal keeps its upload inputs `display: none`, so the input is
    /// unhidden first, then the files are set through CDP (scripts cannot
    /// populate file inputs).
    pub async fn set_files(&self, paths: &[&std::path::Path]) -> Result<()> {
        self.eval_on("el.style.display = 'block';").await?;

        let doc = self
            .page
            .execute(GetDocumentParams::default())
            .await
            .map_err(|e| Error::Cdp(e.to_string()))?;

        let query = QuerySelectorParams::builder()
            .node_id(doc.result.root.node_id)
            .selector(format!("[{REF_ATTR}=\"{}\"]", self.ref_id))
            .build()
            .map_err(Error::Cdp)?;
        let node = self
            .page
            .execute(query)
            .await
            .map_err(|e| Error::Cdp(e.to_string()))?;

        let files: Vec<String> = paths
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        let set = SetFileInputFilesParams::builder()
            .files(files)
            .node_id(node.result.node_id)
            .build()
            .map_err(Error::Cdp)?;
        self.page
            .execute(set)
            .await
            .map_err(|e| Error::Cdp(e.to_string()))?;

        debug!(ref_id = self.ref_id, count = paths.len(), "attached files");
        Ok(())
    }

    async fn center(&self) -> Result<(f64, f64)> {
        let js = format!(
            r#"(() => {{
                const el = {resolve};
                if (!el) return null;
                const r = el.getBoundingClientRect();
                return [r.x + r.width / 2, r.y + r.height / 2];
            }})()"#,
            resolve = self.resolve_js(),
        );
        eval_value::<Option<(f64, f64)>>(self.page, &js)
            .await?
            .ok_or(Error::ElementVanished(self.ref_id))
    }
}

/// Evaluate JS and deserialize its result
async fn eval_value<T: serde::de::DeserializeOwned>(page: &Page, js: &str) -> Result<T> {
    page.evaluate(js)
        .await
        .map_err(|e| Error::JsEval(e.to_string()))?
        .into_value()
        .map_err(|e| Error::JsEval(format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_display_names_the_kind() {
        assert_eq!(Selector::css("#email").to_string(), "css:#email");
        assert_eq!(
            Selector::xpath("//button[normalize-space()='Edit']").to_string(),
            "xpath://button[normalize-space()='Edit']"
        );
    }

    #[test]
    fn css_lookup_uses_query_selector() {
        let js = Selector::css(".login-button").lookup_js("document");
        assert_eq!(js, r#"document.querySelector(".login-button")"#);
    }

    #[test]
    fn xpath_lookup_scopes_to_context_node() {
        let js = Selector::xpath(".//button").lookup_js("el");
        assert!(js.contains(r#"document.evaluate(".//button", el"#));
        assert!(js.contains("FIRST_ORDERED_NODE_TYPE"));
    }

    #[test]
    fn selector_expressions_are_escaped_for_js() {
        // The portal's XPaths are full of single quotes; they must survive
        // embedding in the injected script
        let sel = Selector::xpath("//span[@title='Preview']");
        let js = sel.lookup_js("document");
        assert!(js.contains(r#""//span[@title='Preview']""#));

        let tricky = js_string(r#"a"b\c"#);
        assert_eq!(tricky, r#""a\"b\\c""#);
    }

    #[test]
    fn ref_ids_are_unique_and_monotonic() {
        let a = next_ref();
        let b = next_ref();
        assert!(b > a);
    }
}
