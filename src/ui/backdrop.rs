use rand::rngs::StdRng;
use tracing::debug;

use crate::{
    domain::Condition,
    ui::{
        canvas::{DrawContext, Surface},
        clouds::CloudLayer,
        particles::ParticleSystem,
    },
};

/// Animated weather backdrop: gradient sky, cloud layer and particles.
///
/// The particle population follows the condition; the cloud layer is built
/// once at mount and only hidden or shown afterwards.
#[derive(Debug)]
pub struct Backdrop {
    condition: Condition,
    particles: ParticleSystem,
    clouds: CloudLayer,
    bounds: (f32, f32),
    rng: StdRng,
    frames: u64,
}

impl Backdrop {
    /// Sets up the backdrop against `surface`. Returns `None` without
    /// touching anything when the surface has no drawing context.
    pub fn mount<S: Surface>(
        surface: &mut S,
        condition: Condition,
        mut rng: StdRng,
    ) -> Option<Self> {
        let ctx = surface.context()?;
        let (width, height) = ctx.size();
        let particles = ParticleSystem::generate(condition, width, height, &mut rng);
        let clouds = CloudLayer::generate(width, height, &mut rng);
        debug!(
            condition = condition.name(),
            width,
            height,
            particles = particles.len(),
            "backdrop mounted"
        );
        Some(Self {
            condition,
            particles,
            clouds,
            bounds: (width, height),
            rng,
            frames: 0,
        })
    }

    /// Switches condition. Particles are regenerated from scratch for the
    /// new condition; clouds are left alone. Returns whether anything changed.
    pub fn set_condition<S: Surface>(&mut self, surface: &mut S, condition: Condition) -> bool {
        if condition == self.condition {
            return false;
        }
        if let Some(ctx) = surface.context() {
            self.bounds = ctx.size();
        }
        let (width, height) = self.bounds;
        self.condition = condition;
        self.particles.regenerate(condition, width, height, &mut self.rng);
        debug!(
            condition = condition.name(),
            particles = self.particles.len(),
            "particles regenerated"
        );
        true
    }

    /// Runs one frame cycle: clear, sky gradient, clouds, particles.
    /// Skipped when the surface has no drawing context.
    pub fn frame<S: Surface>(&mut self, surface: &mut S) -> bool {
        let Some(ctx) = surface.context() else {
            return false;
        };
        self.bounds = ctx.size();

        ctx.clear();
        let palette = self.condition.palette();
        ctx.fill_vertical_gradient(palette.top, palette.bottom);
        self.clouds.paint(ctx, self.condition, &mut self.rng);
        self.particles.paint(ctx, &mut self.rng);

        self.frames = self.frames.saturating_add(1);
        true
    }

    #[must_use]
    pub fn condition(&self) -> Condition {
        self.condition
    }

    #[must_use]
    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    #[must_use]
    pub fn clouds(&self) -> &CloudLayer {
        &self.clouds
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
