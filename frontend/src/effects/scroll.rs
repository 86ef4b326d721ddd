use crate::config::HEADER_ID;
use crate::effects::reveal::Reveal;
use crate::page::{Page, PageError};

pub const SCROLLED_CLASS: &str = "scrolled";

pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Runs on every window scroll event.
pub fn handle_scroll<P: Page>(page: &P, threshold: f64, reveal: &Reveal) -> Result<(), PageError> {
    let header = page.by_id(HEADER_ID)?;
    if is_scrolled(page.scroll_y()?, threshold) {
        page.add_class(&header, SCROLLED_CLASS)?;
    } else {
        page.remove_class(&header, SCROLLED_CLASS)?;
    }

    reveal.check_positions(page)?;
    Ok(())
}
