//! Dash ability.
//!
//! A charge-based burst of speed. Charges recharge on a wall-clock timer
//! regardless of grounded state; a separate cooldown spaces out consecutive
//! dashes. While a dash runs, gravity is suppressed and a one-shot velocity
//! overlay is injected into the tick's velocity resolution.

use bevy::prelude::*;

use crate::config::MovementConfig;

/// Runtime state of the dash ability.
///
/// Owned by [`PlayerCharacter`](crate::character::PlayerCharacter) and
/// mutated only inside its tick.
#[derive(Reflect, Debug, Clone, Default)]
pub struct DashAbility {
    charges: u32,
    recharge_timer: f32,
    cooldown_timer: f32,
    dashing: bool,
    dash_velocity: Vec3,
    dash_timer: f32,
    fov_timer: f32,
}

impl DashAbility {
    /// Create the ability with a full stock of charges.
    pub fn with_charges(charges: u32) -> Self {
        Self {
            charges,
            ..Default::default()
        }
    }

    /// Advance recharge, cooldown and field-of-view timers by one tick.
    pub fn tick(&mut self, config: &MovementConfig, dt: f32) {
        if self.charges < config.max_dash_charges {
            self.recharge_timer += dt;
            if self.recharge_timer >= config.dash_recharge_time {
                self.charges += 1;
                self.recharge_timer = 0.0;
            }
        } else {
            self.recharge_timer = 0.0;
        }

        if self.cooldown_timer > 0.0 {
            self.cooldown_timer -= dt;
        }

        if self.fov_timer > 0.0 {
            self.fov_timer -= dt;
        }
    }

    /// Start a dash along `direction` (unit length, planar).
    ///
    /// Fails silently when already dashing, out of charges, or still inside
    /// the cooldown window. Returns whether the dash started.
    pub fn try_dash(&mut self, config: &MovementConfig, direction: Vec3) -> bool {
        if self.dashing || self.charges == 0 || self.cooldown_timer > 0.0 {
            return false;
        }

        self.dash_velocity = direction * config.dash_force;
        self.dashing = true;
        self.dash_timer = 0.0;
        self.fov_timer = config.dash_fov_duration;
        self.charges -= 1;
        self.cooldown_timer = config.dash_cooldown_between;
        true
    }

    /// Apply the dash overlay to this tick's velocity.
    ///
    /// The stored dash velocity is injected exactly once; the dashing flag
    /// stays up for the configured duration so gravity stays suppressed.
    /// Returns whether a dash was running this tick.
    pub fn overlay(&mut self, config: &MovementConfig, velocity: &mut Vec3, dt: f32) -> bool {
        if !self.dashing {
            return false;
        }

        *velocity += self.dash_velocity;
        self.dash_timer += dt;
        if self.dash_timer >= config.dash_duration {
            self.dashing = false;
            self.fov_timer = 0.0;
        }
        self.dash_velocity = Vec3::ZERO;
        true
    }

    /// Whether a dash is currently running.
    pub fn is_dashing(&self) -> bool {
        self.dashing
    }

    /// Remaining dash charges.
    pub fn charges(&self) -> u32 {
        self.charges
    }

    /// Field of view requested by the dash pulse.
    pub fn target_fov(&self, config: &MovementConfig) -> f32 {
        if self.fov_timer > 0.0 {
            config.dash_fov
        } else {
            config.normal_fov
        }
    }
}
