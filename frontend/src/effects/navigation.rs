use crate::config::HEADER_ID;
use crate::page::{Page, PageError};

/// Document position to scroll to so the section sits just below the header.
pub fn section_offset(viewport_top: f64, scroll_y: f64, header_height: f64) -> f64 {
    viewport_top + scroll_y - header_height
}

pub fn scroll_to_section<P: Page>(page: &P, section_id: &str) -> Result<f64, PageError> {
    let section = page.by_id(section_id)?;
    let header = page.by_id(HEADER_ID)?;
    let top = section_offset(
        page.bounding_top(&section),
        page.scroll_y()?,
        page.offset_height(&header),
    );
    page.smooth_scroll_to(top)?;
    Ok(top)
}

pub fn is_internal_link(href: &str) -> bool {
    href.starts_with('/')
}

pub fn navigate_to<P: Page>(page: &P, href: &str) -> Result<(), PageError> {
    log::debug!("Navigating to {}", href);
    page.navigate(href)
}

/// Click on a same-site link. Returns whether the click was taken over, in
/// which case the caller must prevent the default navigation.
pub fn follow_link<P: Page>(page: &P, link: &P::Node) -> Result<bool, PageError> {
    match page.attribute(link, "href") {
        Some(href) if is_internal_link(&href) => {
            navigate_to(page, &href)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}
