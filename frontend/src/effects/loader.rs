use crate::config::LOADER_ID;
use crate::page::{Clock, Page, PageError};

pub async fn hide_loader<P: Page, C: Clock>(page: &P, clock: &C, delay_ms: u32) -> Result<(), PageError> {
    let loader = page.by_id(LOADER_ID)?;
    clock.sleep(delay_ms).await;
    page.add_class(&loader, "hidden")
}
