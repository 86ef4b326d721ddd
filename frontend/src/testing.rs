//! In-memory page and virtual clock used by the unit tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use futures::executor::LocalPool;
use futures::future::LocalBoxFuture;
use futures::FutureExt;

use crate::page::{Clock, Page, PageError};

pub type NodeId = usize;

#[derive(Debug, Default, Clone)]
pub struct NodeData {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub styles: BTreeMap<String, String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub children: Vec<NodeId>,
    pub fields: Vec<String>,
    pub top: f64,
    pub height: f64,
}

#[derive(Default)]
struct Dom {
    nodes: Vec<NodeData>,
    scroll_y: f64,
    viewport_height: f64,
    scroll_requests: Vec<f64>,
    navigations: Vec<String>,
}

#[derive(Clone, Default)]
pub struct MemoryPage {
    dom: Rc<RefCell<Dom>>,
}

impl MemoryPage {
    pub fn new() -> Self {
        let page = Self::default();
        page.dom.borrow_mut().viewport_height = 800.0;
        page
    }

    /// The elements the page script expects to find.
    pub fn portfolio() -> Self {
        let page = Self::new();
        page.element("body", None, &[]);
        page.element("div", Some("loader"), &[]);
        page.element("div", Some("particles"), &[]);
        let header = page.element("header", Some("header"), &[]);
        page.set_height(header, 80.0);
        page.element("span", Some("typewriter"), &[]);
        page.element("form", Some("contact-form"), &["contact-form"]);
        page.element("div", Some("contact-success"), &[]);
        page.element("a", None, &["cta-button"]);
        page
    }

    pub fn element(&self, tag: &str, id: Option<&str>, classes: &[&str]) -> NodeId {
        let mut dom = self.dom.borrow_mut();
        dom.nodes.push(NodeData {
            tag: tag.to_string(),
            id: id.map(str::to_string),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        });
        dom.nodes.len() - 1
    }

    pub fn node(&self, node: NodeId) -> NodeData {
        self.dom.borrow().nodes[node].clone()
    }

    pub fn id(&self, id: &str) -> NodeId {
        self.by_id(id).expect("element exists")
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.dom.borrow().nodes[node].styles.get(property).cloned()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.dom.borrow().nodes[node].classes.iter().any(|c| c == class)
    }

    pub fn text(&self, node: NodeId) -> String {
        self.dom.borrow().nodes[node].text.clone()
    }

    pub fn set_text(&self, node: NodeId, text: &str) {
        self.dom.borrow_mut().nodes[node].text = text.to_string();
    }

    pub fn set_top(&self, node: NodeId, top: f64) {
        self.dom.borrow_mut().nodes[node].top = top;
    }

    pub fn set_height(&self, node: NodeId, height: f64) {
        self.dom.borrow_mut().nodes[node].height = height;
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        self.dom.borrow_mut().nodes[node]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_fields(&self, node: NodeId, values: &[&str]) {
        self.dom.borrow_mut().nodes[node].fields = values.iter().map(|v| v.to_string()).collect();
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.dom.borrow_mut().scroll_y = y;
    }

    pub fn set_viewport_height(&self, height: f64) {
        self.dom.borrow_mut().viewport_height = height;
    }

    pub fn scroll_requests(&self) -> Vec<f64> {
        self.dom.borrow().scroll_requests.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.dom.borrow().navigations.clone()
    }

    fn matches(node: &NodeData, selector: &str) -> bool {
        if let Some(class) = selector.strip_prefix('.') {
            node.classes.iter().any(|c| c == class)
        } else if let Some(id) = selector.strip_prefix('#') {
            node.id.as_deref() == Some(id)
        } else {
            node.tag == selector
        }
    }
}

impl Page for MemoryPage {
    type Node = NodeId;

    fn by_id(&self, id: &str) -> Result<NodeId, PageError> {
        self.dom
            .borrow()
            .nodes
            .iter()
            .position(|n| n.id.as_deref() == Some(id))
            .ok_or_else(|| PageError::MissingElement(id.to_string()))
    }

    fn query(&self, selectors: &str) -> Result<Option<NodeId>, PageError> {
        Ok(self.query_all(selectors)?.into_iter().next())
    }

    fn query_all(&self, selectors: &str) -> Result<Vec<NodeId>, PageError> {
        let wanted: Vec<&str> = selectors.split(',').map(str::trim).collect();
        Ok(self
            .dom
            .borrow()
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| wanted.iter().any(|s| Self::matches(n, s)))
            .map(|(i, _)| i)
            .collect())
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, PageError> {
        Ok(self.element(tag, None, &[]))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), PageError> {
        self.dom.borrow_mut().nodes[*parent].children.push(*child);
        Ok(())
    }

    fn add_class(&self, node: &NodeId, class: &str) -> Result<(), PageError> {
        let mut dom = self.dom.borrow_mut();
        let classes = &mut dom.nodes[*node].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&self, node: &NodeId, class: &str) -> Result<(), PageError> {
        self.dom.borrow_mut().nodes[*node].classes.retain(|c| c != class);
        Ok(())
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) -> Result<(), PageError> {
        let mut dom = self.dom.borrow_mut();
        let styles = &mut dom.nodes[*node].styles;
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_string(), value.to_string());
        }
        Ok(())
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.dom.borrow().nodes[*node].attributes.get(name).cloned()
    }

    fn append_text(&self, node: &NodeId, text: &str) -> Result<(), PageError> {
        self.dom.borrow_mut().nodes[*node].text.push_str(text);
        Ok(())
    }

    fn reset_form(&self, node: &NodeId) -> Result<(), PageError> {
        let mut dom = self.dom.borrow_mut();
        let data = &mut dom.nodes[*node];
        if data.tag != "form" {
            return Err(PageError::NotAnElement(data.id.clone().unwrap_or_default(), "form"));
        }
        data.fields.iter_mut().for_each(String::clear);
        Ok(())
    }

    fn bounding_top(&self, node: &NodeId) -> f64 {
        let dom = self.dom.borrow();
        dom.nodes[*node].top - dom.scroll_y
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        self.dom.borrow().nodes[*node].height
    }

    fn scroll_y(&self) -> Result<f64, PageError> {
        Ok(self.dom.borrow().scroll_y)
    }

    fn viewport_height(&self) -> Result<f64, PageError> {
        Ok(self.dom.borrow().viewport_height)
    }

    fn smooth_scroll_to(&self, top: f64) -> Result<(), PageError> {
        self.dom.borrow_mut().scroll_requests.push(top);
        Ok(())
    }

    fn navigate(&self, href: &str) -> Result<(), PageError> {
        self.dom.borrow_mut().navigations.push(href.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct ClockState {
    now: u64,
    sleepers: Vec<(u64, Waker)>,
}

/// Clock whose time only moves when a test calls [`VirtualClock::run_for`].
#[derive(Clone, Default)]
pub struct VirtualClock {
    state: Rc<RefCell<ClockState>>,
}

impl VirtualClock {
    pub fn now(&self) -> u64 {
        self.state.borrow().now
    }

    /// Advances time by `millis`, stopping at every pending deadline so each
    /// woken task can schedule its next sleep relative to the right instant.
    pub fn run_for(&self, pool: &mut LocalPool, millis: u64) {
        let target = self.now() + millis;
        pool.run_until_stalled();
        loop {
            let next = self
                .state
                .borrow()
                .sleepers
                .iter()
                .map(|(deadline, _)| *deadline)
                .filter(|deadline| *deadline <= target)
                .min();
            let Some(deadline) = next else { break };
            let due: Vec<Waker> = {
                let mut state = self.state.borrow_mut();
                state.now = deadline;
                let (due, pending): (Vec<_>, Vec<_>) =
                    state.sleepers.drain(..).partition(|(d, _)| *d <= deadline);
                state.sleepers = pending;
                due.into_iter().map(|(_, waker)| waker).collect()
            };
            due.into_iter().for_each(Waker::wake);
            pool.run_until_stalled();
        }
        self.state.borrow_mut().now = target;
    }
}

struct Sleep {
    state: Rc<RefCell<ClockState>>,
    deadline: u64,
}

impl Future for Sleep {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut state = self.state.borrow_mut();
        if state.now >= self.deadline {
            Poll::Ready(())
        } else {
            state.sleepers.push((self.deadline, cx.waker().clone()));
            Poll::Pending
        }
    }
}

impl Clock for VirtualClock {
    fn sleep(&self, millis: u32) -> LocalBoxFuture<'static, ()> {
        let deadline = self.now() + u64::from(millis);
        Sleep {
            state: self.state.clone(),
            deadline,
        }
        .boxed_local()
    }
}
