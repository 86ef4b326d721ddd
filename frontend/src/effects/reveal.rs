use crate::page::{Page, PageError};

pub const OBSERVER_THRESHOLD: f64 = 0.1;
pub const OBSERVER_ROOT_MARGIN: &str = "0px 0px -50px 0px";

const HIDDEN_OPACITY: &str = "0";
const HIDDEN_TRANSFORM: &str = "translateY(30px)";
const TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";

/// Scroll-triggered entrance animation for content blocks.
///
/// Two triggers feed the same one-way `reveal`: intersection observer
/// entries, and a bounding-box check run from the scroll handler for
/// elements the observer has not reported yet.
#[derive(Debug, Clone)]
pub struct Reveal {
    selectors: String,
    offset: f64,
}

impl Reveal {
    pub fn new(selectors: &str, offset: f64) -> Self {
        Self {
            selectors: selectors.to_string(),
            offset,
        }
    }

    /// Puts every matching element in its hidden, shifted state and returns
    /// them so the caller can hand them to an observer.
    pub fn prepare<P: Page>(&self, page: &P) -> Result<Vec<P::Node>, PageError> {
        let nodes = page.query_all(&self.selectors)?;
        for node in &nodes {
            page.set_style(node, "opacity", HIDDEN_OPACITY)?;
            page.set_style(node, "transform", HIDDEN_TRANSFORM)?;
            page.set_style(node, "transition", TRANSITION)?;
        }
        log::debug!("Prepared {} elements for reveal", nodes.len());
        Ok(nodes)
    }

    pub fn reveal<P: Page>(&self, page: &P, node: &P::Node) -> Result<(), PageError> {
        page.set_style(node, "opacity", "1")?;
        page.set_style(node, "transform", "translateY(0)")
    }

    /// Observer trigger: `entries` pairs each target with its
    /// `isIntersecting` flag.
    pub fn on_intersection<P, I>(&self, page: &P, entries: I) -> Result<usize, PageError>
    where
        P: Page,
        I: IntoIterator<Item = (P::Node, bool)>,
    {
        let mut revealed = 0;
        for (node, intersecting) in entries {
            if intersecting {
                self.reveal(page, &node)?;
                revealed += 1;
            }
        }
        Ok(revealed)
    }

    /// Scroll trigger: reveals everything whose top edge is above
    /// `viewport height - offset`.
    pub fn check_positions<P: Page>(&self, page: &P) -> Result<usize, PageError> {
        let limit = page.viewport_height()? - self.offset;
        let mut revealed = 0;
        for node in page.query_all(&self.selectors)? {
            if page.bounding_top(&node) < limit {
                self.reveal(page, &node)?;
                revealed += 1;
            }
        }
        Ok(revealed)
    }
}
