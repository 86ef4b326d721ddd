use crate::page::{Clock, Page, PageError};

const PRESSED: &str = "scale(0.95)";

/// Shrinks the button briefly on click.
pub async fn press<P: Page, C: Clock>(
    page: &P,
    clock: &C,
    button: &P::Node,
    delay_ms: u32,
) -> Result<(), PageError> {
    page.set_style(button, "transform", PRESSED)?;
    clock.sleep(delay_ms).await;
    page.set_style(button, "transform", "")
}
