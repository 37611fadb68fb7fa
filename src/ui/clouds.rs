use rand::Rng;

use crate::{
    domain::Condition,
    ui::{
        canvas::{DrawContext, Rgba},
        particles::sample,
    },
};

pub const CLOUD_COUNT: usize = 5;
const CLOUD_ALPHA: f32 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

/// Slow rightward-drifting ellipses behind the particles. Generated once;
/// condition changes only toggle visibility.
#[derive(Debug)]
pub struct CloudLayer {
    pub clouds: Vec<Cloud>,
}

impl CloudLayer {
    pub fn generate<R: Rng>(width: f32, height: f32, rng: &mut R) -> Self {
        let clouds = (0..CLOUD_COUNT)
            .map(|_| Cloud {
                x: sample(rng, &(0.0..width)),
                y: sample(rng, &(0.0..height / 2.0)),
                width: rng.random_range(100.0..300.0),
                height: rng.random_range(40.0..100.0),
                speed: rng.random_range(0.1..0.6),
            })
            .collect();
        Self { clouds }
    }

    /// Draws and advances the clouds. Under a clear sky nothing is drawn and
    /// nothing moves.
    pub fn paint<C: DrawContext + ?Sized, R: Rng>(
        &mut self,
        ctx: &mut C,
        condition: Condition,
        rng: &mut R,
    ) {
        if !condition.shows_clouds() {
            return;
        }
        let (width, height) = ctx.size();
        for cloud in &mut self.clouds {
            ctx.fill_ellipse(
                cloud.x,
                cloud.y,
                cloud.width / 2.0,
                cloud.height / 2.0,
                Rgba::white(CLOUD_ALPHA),
            );
            drift(cloud, width, height, rng);
        }
    }
}

pub(crate) fn drift<R: Rng>(cloud: &mut Cloud, width: f32, height: f32, rng: &mut R) {
    cloud.x += cloud.speed;
    if cloud.x - cloud.width > width {
        cloud.x = -cloud.width;
        cloud.y = sample(rng, &(0.0..height / 2.0));
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn generates_five_clouds_in_upper_half() {
        let layer = CloudLayer::generate(800.0, 600.0, &mut StdRng::seed_from_u64(3));
        assert_eq!(layer.clouds.len(), CLOUD_COUNT);
        for cloud in &layer.clouds {
            assert!((0.0..800.0).contains(&cloud.x));
            assert!((0.0..300.0).contains(&cloud.y));
            assert!((100.0..300.0).contains(&cloud.width));
            assert!((40.0..100.0).contains(&cloud.height));
            assert!((0.1..0.6).contains(&cloud.speed));
        }
    }

    #[test]
    fn cloud_past_right_edge_reappears_left() {
        let mut cloud = Cloud {
            x: 1000.0,
            y: 50.0,
            width: 200.0,
            height: 60.0,
            speed: 0.5,
        };
        drift(&mut cloud, 800.0, 600.0, &mut StdRng::seed_from_u64(11));
        assert!((cloud.x + 200.0).abs() < f32::EPSILON);
        assert!((0.0..300.0).contains(&cloud.y));
    }

    #[test]
    fn cloud_partly_visible_keeps_drifting() {
        let mut cloud = Cloud {
            x: 900.0,
            y: 50.0,
            width: 200.0,
            height: 60.0,
            speed: 0.5,
        };
        drift(&mut cloud, 800.0, 600.0, &mut StdRng::seed_from_u64(11));
        assert!((cloud.x - 900.5).abs() < f32::EPSILON);
        assert!((cloud.y - 50.0).abs() < f32::EPSILON);
    }
}
