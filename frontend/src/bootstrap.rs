use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::future::{AbortHandle, LocalBoxFuture};
use futures::FutureExt;
use log::{debug, info, warn};
use rand::Rng;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::js_sys::Array;
use web_sys::{
    Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::config::{
    EffectsConfig, CONTACT_FORM_ID, CONTACT_SUCCESS_ID, CTA_SELECTOR, INTERNAL_LINK_SELECTOR,
    REVEAL_SELECTORS, TYPEWRITER_ID,
};
use crate::dom::{js_err, WebClock, WebPage};
use crate::effects::contact::ContactForm;
use crate::effects::reveal::{Reveal, OBSERVER_ROOT_MARGIN, OBSERVER_THRESHOLD};
use crate::effects::typewriter::TypewriterTiming;
use crate::effects::{cta, loader, navigation, particles, scroll, typewriter};
use crate::page::{Clock, Page, PageError};

thread_local! {
    static TYPEWRITER: RefCell<Option<AbortHandle>> = const { RefCell::new(None) };
}

fn report(step: &str, result: Result<(), PageError>) {
    if let Err(e) = result {
        warn!("{} failed: {}", step, e);
    }
}

fn spawn_step<F>(step: &'static str, task: F)
where
    F: Future<Output = Result<(), PageError>> + 'static,
{
    spawn_local(async move { report(step, task.await) });
}

/// `document.readyState` is `"loading"` until the markup has been parsed.
pub fn is_still_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// Runs `start` once the document has been parsed.
pub fn on_ready(page: WebPage) {
    if !is_still_loading(&page.document().ready_state()) {
        start(page);
        return;
    }

    let document = page.document().clone();
    let callback = Closure::once(move || start(page));
    if let Err(e) = document
        .add_event_listener_with_callback("DOMContentLoaded", callback.as_ref().unchecked_ref())
    {
        warn!("Could not wait for DOMContentLoaded: {:?}", e);
    }
    callback.forget();
}

/// What the one-shot steps leave behind for the listener wiring.
pub struct Started<N> {
    pub typewriter: AbortHandle,
    pub reveal_targets: Vec<N>,
}

/// Steps that only need the page and a clock: loader, particles, typewriter
/// and reveal preparation. Timed work is handed to `spawn`. A step that
/// cannot find its elements is logged and skipped; the others still run.
pub fn run_page_steps<P, C, R, S>(
    page: &P,
    clock: &C,
    rng: &mut R,
    config: &EffectsConfig,
    reveal: &Reveal,
    spawn: S,
) -> Started<P::Node>
where
    P: Page + Clone + 'static,
    C: Clock + Clone + 'static,
    R: Rng + ?Sized,
    S: Fn(LocalBoxFuture<'static, ()>),
{
    {
        let page = page.clone();
        let clock = clock.clone();
        let delay = config.loader_delay_ms;
        spawn(
            async move { report("loader", loader::hide_loader(&page, &clock, delay).await) }
                .boxed_local(),
        );
    }

    report(
        "particles",
        particles::create_particles(page, rng, config.particle_count).map(|_| ()),
    );

    let (task, typewriter) = typewriter::cancellable(
        page.clone(),
        clock.clone(),
        TYPEWRITER_ID.to_string(),
        config.typewriter_text.clone(),
        TypewriterTiming {
            start_delay_ms: config.typewriter_start_delay_ms,
            char_delay_ms: config.typewriter_char_delay_ms,
        },
    );
    spawn(task.boxed_local());

    let reveal_targets = reveal.prepare(page).unwrap_or_else(|e| {
        warn!("reveal failed: {}", e);
        Vec::new()
    });

    Started {
        typewriter,
        reveal_targets,
    }
}

/// Wires every effect onto the page.
pub fn start(page: WebPage) {
    let config = EffectsConfig::load(&page);
    info!("Bootstrapping page effects");
    debug!("{:?}", config);

    let reveal = Rc::new(Reveal::new(REVEAL_SELECTORS, config.reveal_offset));
    let started = run_page_steps(
        &page,
        &WebClock,
        &mut rand::thread_rng(),
        &config,
        &reveal,
        |task| spawn_local(task),
    );
    TYPEWRITER.with(|slot| {
        if let Some(previous) = slot.borrow_mut().replace(started.typewriter) {
            previous.abort();
        }
    });

    report("scroll handler", register_scroll(&page, &config, reveal.clone()));
    report("contact form", register_contact_form(&page, &config));
    report("reveal", register_observer(&page, reveal, started.reveal_targets));
    report("cta button", register_cta(&page, &config));
    report("internal links", register_links(&page));
}

fn register_scroll(page: &WebPage, config: &EffectsConfig, reveal: Rc<Reveal>) -> Result<(), PageError> {
    let threshold = config.scroll_threshold;
    let handler_page = page.clone();
    let callback = Closure::wrap(Box::new(move || {
        report("scroll", scroll::handle_scroll(&handler_page, threshold, &reveal));
    }) as Box<dyn FnMut()>);

    page.window()
        .add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())
        .map_err(js_err)?;
    callback.forget();
    Ok(())
}

fn register_contact_form(page: &WebPage, config: &EffectsConfig) -> Result<(), PageError> {
    let form = page.by_id(CONTACT_FORM_ID)?;
    let contact = ContactForm::new(CONTACT_FORM_ID, CONTACT_SUCCESS_ID, config.form_reset_delay_ms);
    let handler_page = page.clone();

    let callback = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();
        match contact.submit(&handler_page, &WebClock) {
            Ok(restore) => spawn_local(restore),
            Err(e) => warn!("Contact form submit failed: {}", e),
        }
    }) as Box<dyn FnMut(Event)>);

    form.add_event_listener_with_callback("submit", callback.as_ref().unchecked_ref())
        .map_err(js_err)?;
    callback.forget();
    Ok(())
}

fn register_observer(
    page: &WebPage,
    reveal: Rc<Reveal>,
    targets: Vec<HtmlElement>,
) -> Result<(), PageError> {
    let handler_page = page.clone();

    let callback = Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
        let entries = entries.iter().filter_map(|entry| {
            let entry = entry.dyn_into::<IntersectionObserverEntry>().ok()?;
            let target = entry.target().dyn_into::<HtmlElement>().ok()?;
            Some((target, entry.is_intersecting()))
        });
        report("intersection", reveal.on_intersection(&handler_page, entries).map(|_| ()));
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(OBSERVER_THRESHOLD));
    options.set_root_margin(OBSERVER_ROOT_MARGIN);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
        .map_err(js_err)?;
    callback.forget();

    for target in &targets {
        observer.observe(target);
    }
    debug!("Observing {} elements", targets.len());
    Ok(())
}

fn register_cta(page: &WebPage, config: &EffectsConfig) -> Result<(), PageError> {
    let button = page
        .query(CTA_SELECTOR)?
        .ok_or_else(|| PageError::NoMatch(CTA_SELECTOR.to_string()))?;
    let delay = config.press_delay_ms;
    let handler_page = page.clone();
    let target = button.clone();

    let callback = Closure::wrap(Box::new(move || {
        let page = handler_page.clone();
        let button = target.clone();
        spawn_step("cta press", async move { cta::press(&page, &WebClock, &button, delay).await });
    }) as Box<dyn FnMut()>);

    button
        .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
        .map_err(js_err)?;
    callback.forget();
    Ok(())
}

fn register_links(page: &WebPage) -> Result<(), PageError> {
    let links = page.query_all(INTERNAL_LINK_SELECTOR)?;
    for link in &links {
        let handler_page = page.clone();
        let target = link.clone();
        let callback = Closure::wrap(Box::new(move |event: Event| {
            match navigation::follow_link(&handler_page, &target) {
                Ok(true) => event.prevent_default(),
                Ok(false) => {}
                Err(e) => warn!("Link navigation failed: {}", e),
            }
        }) as Box<dyn FnMut(Event)>);

        link.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
            .map_err(js_err)?;
        callback.forget();
    }
    debug!("Intercepting {} internal links", links.len());
    Ok(())
}

#[wasm_bindgen(js_name = scrollToSection)]
pub fn scroll_to_section(section_id: &str) {
    let result = WebPage::new().and_then(|page| navigation::scroll_to_section(&page, section_id));
    match result {
        Ok(top) => debug!("Scrolling to #{} at {}", section_id, top),
        Err(e) => warn!("scrollToSection({}) failed: {}", section_id, e),
    }
}

#[wasm_bindgen(js_name = navigateTo)]
pub fn navigate_to(page_href: &str) {
    report(
        "navigateTo",
        WebPage::new().and_then(|page| navigation::navigate_to(&page, page_href)),
    );
}

#[wasm_bindgen(js_name = stopTypewriter)]
pub fn stop_typewriter() {
    TYPEWRITER.with(|slot| {
        if let Some(handle) = slot.borrow_mut().take() {
            handle.abort();
        }
    });
}
