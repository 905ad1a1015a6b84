//! Visual-only particle bursts
//!
//! Particles never affect gameplay. `life` runs from 100 down to 0 and drives
//! opacity (`life / 100`).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Starting life of every particle
pub const PARTICLE_LIFE: f32 = 100.0;
/// Per-axis speed range
pub const PARTICLE_SPEED: f32 = 3.0;
pub const PARTICLE_MIN_SIZE: f32 = 2.0;
pub const PARTICLE_MAX_SIZE: f32 = 6.0;
pub const PARTICLE_MIN_DECAY: f32 = 1.0;
pub const PARTICLE_MAX_DECAY: f32 = 4.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Color,
    pub life: f32,
    pub decay: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, size: f32, color: Color, decay: f32) -> Self {
        Self {
            pos,
            vel,
            size,
            color,
            life: PARTICLE_LIFE,
            decay,
        }
    }

    /// Advance one frame. Returns false once expired.
    pub fn advance(&mut self) -> bool {
        self.pos += self.vel;
        self.life -= self.decay;
        self.life > 0.0
    }

    /// Render opacity in [0, 1]
    pub fn opacity(&self) -> f32 {
        (self.life / PARTICLE_LIFE).clamp(0.0, 1.0)
    }
}

/// The live particle collection, owned by the game loop
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `count` particles at (x, y). Without a colour each particle gets
    /// its own random warm hue.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        x: f32,
        y: f32,
        count: usize,
        color: Option<Color>,
    ) {
        self.particles.reserve(count);
        for _ in 0..count {
            let vel = Vec2::new(
                rng.random_range(-PARTICLE_SPEED..=PARTICLE_SPEED),
                rng.random_range(-PARTICLE_SPEED..=PARTICLE_SPEED),
            );
            let size = rng.random_range(PARTICLE_MIN_SIZE..=PARTICLE_MAX_SIZE);
            let decay = rng.random_range(PARTICLE_MIN_DECAY..=PARTICLE_MAX_DECAY);
            let color = color.unwrap_or_else(|| Color::hsl(rng.random_range(0.0..60.0), 100.0, 50.0));
            self.particles
                .push(Particle::new(Vec2::new(x, y), vel, size, color, decay));
        }
    }

    /// Add a fully specified particle
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Move every particle and drop the expired ones
    pub fn advance(&mut self) {
        // Reverse order so swap-free removal never skips an element
        for i in (0..self.particles.len()).rev() {
            if !self.particles[i].advance() {
                self.particles.remove(i);
            }
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn particle(decay: f32) -> Particle {
        Particle::new(Vec2::ZERO, Vec2::new(1.0, -2.0), 3.0, Color::WHITE, decay)
    }

    #[test]
    fn test_decay_25_removed_after_four_advances() {
        let mut system = ParticleSystem::new();
        system.push(particle(25.0));

        for _ in 0..3 {
            system.advance();
            assert_eq!(system.len(), 1);
        }
        assert!((system.iter().map(Particle::opacity).sum::<f32>() - 0.25).abs() < 1e-6);

        system.advance();
        assert!(system.is_empty());
    }

    #[test]
    fn test_advance_integrates_position() {
        let mut p = particle(1.0);
        p.advance();
        p.advance();
        assert_eq!(p.pos, Vec2::new(2.0, -4.0));
        assert_eq!(p.life, 98.0);
    }

    #[test]
    fn test_removal_keeps_survivors_in_order() {
        let mut system = ParticleSystem::new();
        system.push(particle(100.0));
        system.push(Particle { size: 5.0, ..particle(1.0) });
        system.push(particle(100.0));
        system.push(Particle { size: 6.0, ..particle(1.0) });

        system.advance();

        let sizes: Vec<_> = system.iter().map(|p| p.size).collect();
        assert_eq!(sizes, vec![5.0, 6.0]);
    }

    #[test]
    fn test_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut system = ParticleSystem::new();
        system.spawn(&mut rng, 10.0, 20.0, 200, None);

        assert_eq!(system.len(), 200);
        for p in system.iter() {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert!(p.vel.x.abs() <= 3.0 && p.vel.y.abs() <= 3.0);
            assert!((2.0..=6.0).contains(&p.size));
            assert!((1.0..=4.0).contains(&p.decay));
            assert_eq!(p.life, 100.0);
            assert!(matches!(p.color, Color::Hsl { .. }));
        }
    }

    #[test]
    fn test_spawn_with_color() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut system = ParticleSystem::new();
        system.spawn(&mut rng, 0.0, 0.0, 8, Some(Color::SHIELD));
        assert!(system.iter().all(|p| p.color == Color::SHIELD));
    }

    proptest! {
        #[test]
        fn prop_lifetime_is_ceil_of_life_over_decay(decay in 1.0f32..=4.0) {
            let mut system = ParticleSystem::new();
            system.push(particle(decay));
            let mut frames = 0;
            while !system.is_empty() {
                system.advance();
                frames += 1;
                prop_assert!(frames <= 100);
            }
            // Accumulated f32 subtraction may land one frame either side
            let expected = (PARTICLE_LIFE / decay).ceil() as i32;
            prop_assert!((frames - expected).abs() <= 1);
        }
    }
}
