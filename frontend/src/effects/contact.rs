use std::cell::RefCell;

use futures::future::{AbortHandle, Abortable, LocalBoxFuture};
use futures::FutureExt;

use crate::page::{Clock, Page, PageError};

/// Simulated contact form submission. Nothing leaves the page: the form is
/// swapped for the success message and swapped back after a delay.
pub struct ContactForm {
    form_id: String,
    success_id: String,
    reset_delay_ms: u32,
    pending_reset: RefCell<Option<AbortHandle>>,
}

impl ContactForm {
    pub fn new(form_id: &str, success_id: &str, reset_delay_ms: u32) -> Self {
        Self {
            form_id: form_id.to_string(),
            success_id: success_id.to_string(),
            reset_delay_ms,
            pending_reset: RefCell::new(None),
        }
    }

    /// Shows the success message and returns the delayed restore task for
    /// the caller to spawn. Submitting again before that task has run
    /// cancels it, so only the latest submission restores the form.
    pub fn submit<P, C>(&self, page: &P, clock: &C) -> Result<LocalBoxFuture<'static, ()>, PageError>
    where
        P: Page + Clone + 'static,
        P::Node: 'static,
        C: Clock + Clone + 'static,
    {
        let form = page.by_id(&self.form_id)?;
        let success = page.by_id(&self.success_id)?;

        if let Some(previous) = self.pending_reset.borrow_mut().take() {
            log::debug!("Cancelling pending form reset");
            previous.abort();
        }

        page.set_style(&form, "display", "none")?;
        page.set_style(&success, "display", "block")?;
        log::info!("Contact form submitted");

        let (handle, registration) = AbortHandle::new_pair();
        *self.pending_reset.borrow_mut() = Some(handle);

        let page = page.clone();
        let clock = clock.clone();
        let delay = self.reset_delay_ms;
        let task = Abortable::new(
            async move {
                clock.sleep(delay).await;
                if let Err(e) = restore(&page, &form, &success) {
                    log::warn!("Could not restore contact form: {}", e);
                }
            },
            registration,
        );
        Ok(task.map(|_| ()).boxed_local())
    }
}

fn restore<P: Page>(page: &P, form: &P::Node, success: &P::Node) -> Result<(), PageError> {
    page.set_style(form, "display", "block")?;
    page.set_style(success, "display", "none")?;
    page.reset_form(form)
}
