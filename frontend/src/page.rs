use futures::future::LocalBoxFuture;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PageError {
    #[error("no element with id #{0}")]
    MissingElement(String),
    #[error("no element matches {0}")]
    NoMatch(String),
    #[error("element #{0} is not a {1}")]
    NotAnElement(String, &'static str),
    #[error("js error: {0}")]
    Js(String),
}

/// Everything the effects need from the document and the window.
///
/// Effects only ever talk to the page through this trait, so they run the
/// same against the browser (`dom::WebPage`) and an in-memory page in tests.
pub trait Page {
    type Node: Clone;

    fn by_id(&self, id: &str) -> Result<Self::Node, PageError>;
    fn query(&self, selectors: &str) -> Result<Option<Self::Node>, PageError>;
    fn query_all(&self, selectors: &str) -> Result<Vec<Self::Node>, PageError>;
    fn create_element(&self, tag: &str) -> Result<Self::Node, PageError>;
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), PageError>;

    fn add_class(&self, node: &Self::Node, class: &str) -> Result<(), PageError>;
    fn remove_class(&self, node: &Self::Node, class: &str) -> Result<(), PageError>;
    fn set_style(&self, node: &Self::Node, property: &str, value: &str) -> Result<(), PageError>;
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn append_text(&self, node: &Self::Node, text: &str) -> Result<(), PageError>;
    fn reset_form(&self, node: &Self::Node) -> Result<(), PageError>;

    /// Top edge of the node relative to the viewport.
    fn bounding_top(&self, node: &Self::Node) -> f64;
    fn offset_height(&self, node: &Self::Node) -> f64;
    fn scroll_y(&self) -> Result<f64, PageError>;
    fn viewport_height(&self) -> Result<f64, PageError>;

    fn smooth_scroll_to(&self, top: f64) -> Result<(), PageError>;
    fn navigate(&self, href: &str) -> Result<(), PageError>;
}

/// Source of delays for the timed effects.
pub trait Clock {
    fn sleep(&self, millis: u32) -> LocalBoxFuture<'static, ()>;
}
