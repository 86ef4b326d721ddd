use log::Level;
use serde::Deserialize;

use crate::page::Page;

pub const LOADER_ID: &str = "loader";
pub const PARTICLES_ID: &str = "particles";
pub const HEADER_ID: &str = "header";
pub const TYPEWRITER_ID: &str = "typewriter";
pub const CONTACT_FORM_ID: &str = "contact-form";
pub const CONTACT_SUCCESS_ID: &str = "contact-success";
pub const CTA_SELECTOR: &str = ".cta-button";
pub const INTERNAL_LINK_SELECTOR: &str = "a[href^=\"/\"]";
pub const REVEAL_SELECTORS: &str = ".project-card, .about-content, .contact-form";

/// Attribute on `<body>` that may carry a JSON object overriding any of the
/// fields below.
pub const CONFIG_ATTRIBUTE: &str = "data-effects";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub loader_delay_ms: u32,
    pub particle_count: usize,
    pub typewriter_text: String,
    pub typewriter_start_delay_ms: u32,
    pub typewriter_char_delay_ms: u32,
    /// Header gets `scrolled` once the page is scrolled strictly past this.
    pub scroll_threshold: f64,
    /// Distance from the viewport bottom at which the scroll check reveals.
    pub reveal_offset: f64,
    pub form_reset_delay_ms: u32,
    pub press_delay_ms: u32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            loader_delay_ms: 2000,
            particle_count: 15,
            typewriter_text: "Yapo Atsé Phalek Ariel".to_string(),
            typewriter_start_delay_ms: 1000,
            typewriter_char_delay_ms: 100,
            scroll_threshold: 100.0,
            reveal_offset: 100.0,
            form_reset_delay_ms: 5000,
            press_delay_ms: 150,
        }
    }
}

impl EffectsConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads overrides from the body's `data-effects` attribute. A missing
    /// attribute gives the defaults, a malformed one is logged and ignored.
    pub fn load<P: Page>(page: &P) -> Self {
        let raw = match page.query("body") {
            Ok(Some(body)) => page.attribute(&body, CONFIG_ATTRIBUTE),
            _ => None,
        };
        match raw {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|e| {
                log::warn!("Ignoring invalid {} attribute: {}", CONFIG_ATTRIBUTE, e);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
