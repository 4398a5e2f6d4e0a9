//! A minimal analytic motor: an infinite horizontal plane.
//!
//! [`PlaneMotor`] implements [`CharacterMotor`] against a single flat ground
//! plane with no other geometry. It exists for tests, headless simulation
//! and as a template for real collision backends; it is deliberately too
//! simple for shipping gameplay.
//!
//! The character origin sits at the capsule bottom, so ground contact is
//! simply `position.y <= ground_height`.

use bevy::prelude::*;

use crate::motor::{CharacterMotor, GroundingReport, RayHit};

/// Distance above the plane within which a ground surface is still reported
/// as found (though not necessarily stable).
const GROUND_PROBE_MARGIN: f32 = 0.1;

/// Flat-plane implementation of [`CharacterMotor`].
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct PlaneMotor {
    position: Vec3,
    rotation: Quat,
    velocity: Vec3,
    grounding: GroundingReport,
    ground_height: f32,
    capsule_radius: f32,
    capsule_height: f32,
    capsule_y_offset: f32,
    unground_timer: f32,
    unground_pending: bool,
    /// When set, capsule overlap queries report a blocking hit. Lets tests
    /// simulate a ceiling above a crouched character.
    pub blocked_overhead: bool,
    /// Scripted raycast target, returned by [`CharacterMotor::raycast`]
    /// whenever it lies within the cast distance.
    pub scripted_hit: Option<RayHit>,
}

impl PlaneMotor {
    /// Create a motor with the ground plane at height zero and a capsule of
    /// radius 0.5 and height 2.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            grounding: GroundingReport::default(),
            ground_height: 0.0,
            capsule_radius: 0.5,
            capsule_height: 2.0,
            capsule_y_offset: 1.0,
            unground_timer: 0.0,
            unground_pending: false,
            blocked_overhead: false,
            scripted_hit: None,
        }
    }

    /// Builder: place the ground plane at a different height.
    pub fn with_ground_height(mut self, height: f32) -> Self {
        self.ground_height = height;
        self
    }

    /// Move the ground plane. Raising it above the character does not
    /// teleport the character; lowering it drops the floor out from under
    /// them on the next resolve.
    pub fn set_ground_height(&mut self, height: f32) {
        self.ground_height = height;
    }

    /// Overwrite the motor's velocity directly, bypassing the state
    /// machine. Useful to set up airborne scenarios.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Teleport the capsule.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

impl Default for PlaneMotor {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl CharacterMotor for PlaneMotor {
    fn character_up(&self) -> Vec3 {
        Vec3::Y
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn grounding(&self) -> GroundingReport {
        self.grounding
    }

    fn capsule_radius(&self) -> f32 {
        self.capsule_radius
    }

    fn capsule_height(&self) -> f32 {
        self.capsule_height
    }

    fn sweep_and_resolve(&mut self, velocity: Vec3, rotation: Quat, dt: f32) {
        self.rotation = rotation;
        self.velocity = velocity;
        self.position += velocity * dt;

        let suppress_snap = self.unground_pending || self.unground_timer > 0.0;
        self.unground_pending = false;
        if self.unground_timer > 0.0 {
            self.unground_timer = (self.unground_timer - dt).max(0.0);
        }

        if self.position.y <= self.ground_height && !suppress_snap {
            // Collision response against the plane: clamp the capsule out
            // of the ground and remove the penetrating velocity component.
            self.position.y = self.ground_height;
            if self.velocity.y < 0.0 {
                self.velocity.y = 0.0;
            }
            self.grounding = GroundingReport::stable(Vec3::Y);
        } else {
            self.grounding = GroundingReport {
                is_stable_on_ground: false,
                found_any_ground: self.position.y <= self.ground_height + GROUND_PROBE_MARGIN,
                ground_normal: Vec3::Y,
            };
        }
    }

    fn force_unground(&mut self, time: f32) {
        self.unground_pending = true;
        self.unground_timer = self.unground_timer.max(time);
    }

    fn set_capsule_dimensions(&mut self, radius: f32, height: f32, y_offset: f32) {
        self.capsule_radius = radius;
        self.capsule_height = height;
        self.capsule_y_offset = y_offset;
    }

    fn capsule_overlap(&self, _position: Vec3, _rotation: Quat) -> usize {
        usize::from(self.blocked_overhead)
    }

    fn raycast(&self, origin: Vec3, _direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let hit = self.scripted_hit?;
        let distance = (hit.point - origin).length();
        (distance <= max_distance).then_some(RayHit { distance, ..hit })
    }
}
