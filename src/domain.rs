pub mod condition;

pub use condition::{Condition, Palette, ParticleShape, ParticleSpec, Rgb};
