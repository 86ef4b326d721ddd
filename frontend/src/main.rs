use log::{error, info};

mod bootstrap;
mod config;
mod dom;
mod page;
mod effects {
    pub mod contact;
    pub mod cta;
    pub mod loader;
    pub mod navigation;
    pub mod particles;
    pub mod reveal;
    pub mod scroll;
    pub mod typewriter;
}
#[cfg(test)]
mod testing;

use dom::WebPage;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting portfolio effects");
    match WebPage::new() {
        Ok(page) => bootstrap::on_ready(page),
        Err(e) => error!("No page to attach to: {}", e),
    }
}
