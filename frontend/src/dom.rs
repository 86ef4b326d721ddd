use futures::future::LocalBoxFuture;
use futures::FutureExt;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, HtmlFormElement, ScrollBehavior, ScrollToOptions, Window};

use crate::page::{Clock, Page, PageError};

pub(crate) fn js_err(e: JsValue) -> PageError {
    PageError::Js(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

#[derive(Clone)]
pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    pub fn new() -> Result<Self, PageError> {
        let window = web_sys::window().ok_or_else(|| PageError::Js("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| PageError::Js("no document".to_string()))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Page for WebPage {
    type Node = HtmlElement;

    fn by_id(&self, id: &str) -> Result<HtmlElement, PageError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| PageError::MissingElement(id.to_string()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| PageError::NotAnElement(id.to_string(), "HtmlElement"))
    }

    fn query(&self, selectors: &str) -> Result<Option<HtmlElement>, PageError> {
        let found = self.document.query_selector(selectors).map_err(js_err)?;
        Ok(found.and_then(|el| el.dyn_into::<HtmlElement>().ok()))
    }

    fn query_all(&self, selectors: &str) -> Result<Vec<HtmlElement>, PageError> {
        let list = self.document.query_selector_all(selectors).map_err(js_err)?;
        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect())
    }

    fn create_element(&self, tag: &str) -> Result<HtmlElement, PageError> {
        self.document
            .create_element(tag)
            .map_err(js_err)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| PageError::NotAnElement(tag.to_string(), "HtmlElement"))
    }

    fn append_child(&self, parent: &HtmlElement, child: &HtmlElement) -> Result<(), PageError> {
        parent.append_child(child).map(|_| ()).map_err(js_err)
    }

    fn add_class(&self, node: &HtmlElement, class: &str) -> Result<(), PageError> {
        node.class_list().add_1(class).map_err(js_err)
    }

    fn remove_class(&self, node: &HtmlElement, class: &str) -> Result<(), PageError> {
        node.class_list().remove_1(class).map_err(js_err)
    }

    fn set_style(&self, node: &HtmlElement, property: &str, value: &str) -> Result<(), PageError> {
        node.style().set_property(property, value).map_err(js_err)
    }

    fn attribute(&self, node: &HtmlElement, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn append_text(&self, node: &HtmlElement, text: &str) -> Result<(), PageError> {
        node.insert_adjacent_text("beforeend", text).map_err(js_err)
    }

    fn reset_form(&self, node: &HtmlElement) -> Result<(), PageError> {
        let form = node
            .dyn_ref::<HtmlFormElement>()
            .ok_or_else(|| PageError::NotAnElement(node.id(), "form"))?;
        form.reset();
        Ok(())
    }

    fn bounding_top(&self, node: &HtmlElement) -> f64 {
        node.get_bounding_client_rect().top()
    }

    fn offset_height(&self, node: &HtmlElement) -> f64 {
        node.offset_height() as f64
    }

    fn scroll_y(&self) -> Result<f64, PageError> {
        self.window.scroll_y().map_err(js_err)
    }

    fn viewport_height(&self) -> Result<f64, PageError> {
        let height = self.window.inner_height().map_err(js_err)?;
        height
            .as_f64()
            .ok_or_else(|| PageError::Js("innerHeight is not a number".to_string()))
    }

    fn smooth_scroll_to(&self, top: f64) -> Result<(), PageError> {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
        Ok(())
    }

    fn navigate(&self, href: &str) -> Result<(), PageError> {
        self.window.location().set_href(href).map_err(js_err)
    }
}

/// Delays backed by `setTimeout`.
#[derive(Clone, Copy, Default)]
pub struct WebClock;

impl Clock for WebClock {
    fn sleep(&self, millis: u32) -> LocalBoxFuture<'static, ()> {
        TimeoutFuture::new(millis).boxed_local()
    }
}
