//! Confetti and medals for the level-complete celebration
//!
//! Purely decorative; nothing here affects gameplay.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::entity::{Entity, EntityKind};
use crate::Tuning;
use crate::consts::*;

/// Number of confetti colors the renderer should provide
pub const CONFETTI_PALETTE_SIZE: u8 = 6;

/// What a particle looks like
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ParticleKind {
    /// Paper scrap; `color` indexes the confetti palette
    Confetti { color: u8, round: bool },
    Medal,
}

/// A falling, spinning celebration particle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub gravity: f32,
    /// Degrees
    pub rotation: f32,
    /// Degrees/sec
    pub spin: f32,
}

impl Particle {
    fn random<R: Rng>(rng: &mut R, kind: ParticleKind, pos: Vec2, scale: f32) -> Self {
        let size = match kind {
            ParticleKind::Medal => Vec2::new(30.0, 35.0) * scale,
            ParticleKind::Confetti { .. } => {
                Vec2::new(rng.random_range(8.0..15.0), rng.random_range(8.0..15.0)) * scale
            }
        };
        Self {
            kind,
            pos,
            size,
            vel: Vec2::new(
                rng.random_range(-100.0..100.0),
                rng.random_range(-200.0..100.0),
            ) * scale,
            gravity: CONFETTI_GRAVITY * scale,
            rotation: rng.random_range(0.0..360.0),
            spin: rng.random_range(-300.0..300.0),
        }
    }

    /// Integrate one step; returns false once the particle has fallen off-screen
    pub fn update(&mut self, dt: f32) -> bool {
        self.vel.y += self.gravity * dt;
        self.pos += self.vel * dt;
        self.rotation += self.spin * dt;
        self.pos.y >= PARTICLE_FLOOR_Y
    }
}

impl Entity for Particle {
    fn kind(&self) -> EntityKind {
        EntityKind::Particle
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn extent(&self) -> Vec2 {
        self.size
    }

    fn angle(&self) -> f32 {
        self.rotation
    }
}

/// Confetti across the top of the screen plus medals over the middle
pub fn burst<R: Rng>(rng: &mut R, tuning: &Tuning) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(CONFETTI_COUNT + MEDAL_COUNT);

    for _ in 0..CONFETTI_COUNT {
        let pos = Vec2::new(
            rng.random_range(0.0..tuning.width),
            tuning.height + rng.random_range(0.0..100.0),
        );
        let kind = ParticleKind::Confetti {
            color: rng.random_range(0..CONFETTI_PALETTE_SIZE),
            round: rng.random_bool(0.5),
        };
        particles.push(Particle::random(rng, kind, pos, tuning.scale));
    }

    for _ in 0..MEDAL_COUNT {
        let pos = Vec2::new(
            rng.random_range(tuning.width * 0.2..tuning.width * 0.8),
            tuning.height + rng.random_range(50.0..200.0),
        );
        particles.push(Particle::random(rng, ParticleKind::Medal, pos, tuning.scale));
    }

    particles
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_composition() {
        let tuning = Tuning::new(1000.0, 700.0);
        let mut rng = Pcg32::seed_from_u64(7);
        let particles = burst(&mut rng, &tuning);
        let medals = particles
            .iter()
            .filter(|p| p.kind == ParticleKind::Medal)
            .count();
        assert_eq!(particles.len(), 70);
        assert_eq!(medals, 10);
        assert!(particles.iter().all(|p| p.pos.y >= tuning.height));
    }

    #[test]
    fn test_burst_is_seeded() {
        let tuning = Tuning::new(1000.0, 700.0);
        let a = burst(&mut Pcg32::seed_from_u64(3), &tuning);
        let b = burst(&mut Pcg32::seed_from_u64(3), &tuning);
        assert_eq!(a, b);
    }

    #[test]
    fn test_particles_fall_out() {
        let tuning = Tuning::new(1000.0, 700.0);
        let mut particles = burst(&mut Pcg32::seed_from_u64(11), &tuning);
        let mut elapsed = 0.0;
        while !particles.is_empty() {
            particles.retain_mut(|p| p.update(1.0 / 60.0));
            elapsed += 1.0 / 60.0;
            assert!(elapsed < 10.0, "confetti never cleared");
        }
    }
}
