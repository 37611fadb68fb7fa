use std::ops::Range;

use rand::Rng;

use crate::{
    domain::{Condition, ParticleShape, ParticleSpec},
    ui::canvas::{DrawContext, Rgba},
};

/// Vertical position a particle re-enters from after falling off the bottom.
pub const REENTRY_Y: f32 = -10.0;
const STROKE_LENGTH: f32 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed_x: f32,
    pub speed_y: f32,
}

#[derive(Debug)]
pub struct ParticleSystem {
    shape: ParticleShape,
    pub particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn generate<R: Rng>(condition: Condition, width: f32, height: f32, rng: &mut R) -> Self {
        let mut system = Self {
            shape: condition.particle_spec().shape,
            particles: Vec::new(),
        };
        system.regenerate(condition, width, height, rng);
        system
    }

    /// Drops every particle and spawns a fresh population for `condition`.
    pub fn regenerate<R: Rng>(
        &mut self,
        condition: Condition,
        width: f32,
        height: f32,
        rng: &mut R,
    ) {
        let spec = condition.particle_spec();
        self.shape = spec.shape;
        self.particles.clear();
        self.particles.reserve(spec.count);
        for _ in 0..spec.count {
            self.particles.push(spawn_particle(&spec, width, height, rng));
        }
    }

    #[must_use]
    pub fn shape(&self) -> ParticleShape {
        self.shape
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Draws every particle at its current position, then advances it.
    pub fn paint<C: DrawContext + ?Sized, R: Rng>(&mut self, ctx: &mut C, rng: &mut R) {
        let (width, height) = ctx.size();
        for p in &mut self.particles {
            draw_particle(ctx, p, self.shape);
            advance(p, width, height, rng);
        }
    }
}

fn spawn_particle<R: Rng>(spec: &ParticleSpec, width: f32, height: f32, rng: &mut R) -> Particle {
    Particle {
        x: sample(rng, &(0.0..width)),
        y: sample(rng, &(0.0..height)),
        size: sample(rng, &spec.size),
        speed_x: sample(rng, &spec.speed_x),
        speed_y: sample(rng, &spec.speed_y),
    }
}

fn draw_particle<C: DrawContext + ?Sized>(ctx: &mut C, p: &Particle, shape: ParticleShape) {
    match shape {
        ParticleShape::Stroke { alpha } => ctx.stroke_vertical_line(
            p.x,
            p.y,
            p.y + p.size * STROKE_LENGTH,
            p.size / 2.0,
            Rgba::white(alpha),
        ),
        ParticleShape::Circle { alpha } => ctx.fill_circle(p.x, p.y, p.size, Rgba::white(alpha)),
    }
}

pub(crate) fn advance<R: Rng>(p: &mut Particle, width: f32, height: f32, rng: &mut R) {
    p.x += p.speed_x;
    p.y += p.speed_y;

    if p.y > height {
        p.y = REENTRY_Y;
        p.x = sample(rng, &(0.0..width));
    }

    if p.x > width {
        p.x = 0.0;
    } else if p.x < 0.0 {
        p.x = width;
    }
}

/// Uniform sample from a half-open range; an empty range yields its start.
pub(crate) fn sample<R: Rng>(rng: &mut R, range: &Range<f32>) -> f32 {
    if range.is_empty() {
        range.start
    } else {
        rng.random_range(range.clone())
    }
}
