//! Grapple hook ability.
//!
//! A raycast acquires an anchor point on a grapple-eligible surface; while
//! the grapple is active the character's velocity is entirely overridden by
//! a pull toward the anchor. Arrival near a low anchor converts the pull
//! into a propulsion impulse back toward where the grapple started, so the
//! character cannot simply park on it.

use bevy::prelude::*;

use crate::config::MovementConfig;
use crate::motor::CharacterMotor;

/// Lifecycle of the grapple anchor.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Default)]
pub enum GrapplePhase {
    /// No anchor held.
    #[default]
    Idle,
    /// Pulling toward `anchor`; `origin` is where the character was when
    /// the anchor was acquired.
    Pulling { anchor: Vec3, origin: Vec3 },
}

/// Runtime state of the grapple ability.
///
/// Owned by [`PlayerCharacter`](crate::character::PlayerCharacter) and
/// mutated only inside its tick.
#[derive(Reflect, Debug, Clone, Default)]
pub struct GrappleAbility {
    phase: GrapplePhase,
    cooldown_timer: f32,
}

impl GrappleAbility {
    /// Advance the cooldown by one tick.
    pub fn tick(&mut self, dt: f32) {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer -= dt;
        }
    }

    /// Try to acquire an anchor by raycasting into the world.
    ///
    /// Fails silently when a grapple is already running, the cooldown has
    /// not elapsed, the ray misses, or the hit surface is not
    /// grapple-eligible. Returns whether an anchor was acquired.
    pub fn try_start<M: CharacterMotor>(
        &mut self,
        config: &MovementConfig,
        motor: &M,
        origin: Vec3,
        direction: Vec3,
    ) -> bool {
        if self.is_grappling() || self.cooldown_timer > 0.0 {
            return false;
        }

        let Some(hit) = motor.raycast(origin, direction, config.max_grapple_distance) else {
            return false;
        };
        if !hit.grappleable {
            return false;
        }

        self.phase = GrapplePhase::Pulling {
            anchor: hit.point,
            origin: motor.position(),
        };
        true
    }

    /// Forcibly clear the grapple, e.g. on input release.
    pub fn cancel(&mut self, config: &MovementConfig) {
        if self.is_grappling() {
            self.phase = GrapplePhase::Idle;
            self.cooldown_timer = config.grapple_cooldown;
        }
    }

    /// Resolve the pull for one tick.
    ///
    /// Returns the velocity override while an anchor is held, or `None` when
    /// idle. Arrival inside the configured radius ends the pull; if the
    /// anchor sits no higher than `grapple_propel_height` above the grapple
    /// origin, the returned velocity propels the character back toward the
    /// origin instead.
    pub fn resolve(
        &mut self,
        config: &MovementConfig,
        position: Vec3,
        up: Vec3,
        dt: f32,
    ) -> Option<Vec3> {
        let GrapplePhase::Pulling { anchor, origin } = self.phase else {
            return None;
        };

        let to_anchor = anchor - position;
        let distance = to_anchor.length();

        let mut velocity = to_anchor.normalize_or_zero() * config.grapple_pull_speed;
        velocity += up * (config.grapple_low_gravity * dt);

        if distance < config.grapple_arrive_radius {
            self.phase = GrapplePhase::Idle;
            self.cooldown_timer = config.grapple_cooldown;

            let vertical_difference = (anchor - origin).dot(up);
            if vertical_difference < config.grapple_propel_height {
                let propel_direction = (origin - position).normalize_or_zero();
                velocity = propel_direction * (config.grapple_propel_force * 2.5);
            }
        }

        Some(velocity)
    }

    /// Whether an anchor is currently held.
    pub fn is_grappling(&self) -> bool {
        matches!(self.phase, GrapplePhase::Pulling { .. })
    }

    /// The held anchor point, for rope rendering.
    pub fn anchor(&self) -> Option<Vec3> {
        match self.phase {
            GrapplePhase::Pulling { anchor, .. } => Some(anchor),
            GrapplePhase::Idle => None,
        }
    }
}
