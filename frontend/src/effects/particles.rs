use rand::Rng;

use crate::config::PARTICLES_ID;
use crate::page::{Page, PageError};

/// A decorative background blob. Fixed once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub size: f64,
    pub left: f64,
    pub top: f64,
    pub delay: f64,
    pub opacity: f64,
}

impl Particle {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            size: rng.gen_range(50.0..150.0),
            left: rng.gen_range(0.0..100.0),
            top: rng.gen_range(0.0..100.0),
            delay: rng.gen_range(0.0..5.0),
            opacity: rng.gen_range(0.05..0.15),
        }
    }

    fn styles(&self) -> [(&'static str, String); 6] {
        [
            ("width", format!("{}px", self.size)),
            ("height", format!("{}px", self.size)),
            ("left", format!("{}%", self.left)),
            ("top", format!("{}%", self.top)),
            ("animation-delay", format!("{}s", self.delay)),
            ("opacity", self.opacity.to_string()),
        ]
    }
}

/// Appends `count` freshly randomized particles to the particle container.
/// Calling it again adds another batch.
pub fn create_particles<P: Page, R: Rng + ?Sized>(
    page: &P,
    rng: &mut R,
    count: usize,
) -> Result<Vec<Particle>, PageError> {
    let container = page.by_id(PARTICLES_ID)?;
    let mut created = Vec::with_capacity(count);

    for _ in 0..count {
        let particle = Particle::random(rng);
        let node = page.create_element("div")?;
        page.add_class(&node, "particle")?;
        for (property, value) in particle.styles() {
            page.set_style(&node, property, &value)?;
        }
        page.append_child(&container, &node)?;
        created.push(particle);
    }

    log::debug!("Created {} particles", created.len());
    Ok(created)
}
