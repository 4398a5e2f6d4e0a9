//! The movement state machine.
//!
//! [`PlayerCharacter`] holds stance, velocity and every ability timer, and
//! resolves one tick of movement in [`advance`](PlayerCharacter::advance):
//! it latches input, rotates the state buffers, updates rotation and
//! velocity, hands both to the motor for the capsule sweep, and reacts to
//! the resolved result in the lifecycle hooks (capsule resize for crouch,
//! un-standing when blocked, slide demotion on ground loss).
//!
//! Everything here is deterministic: timers only move with the `dt` passed
//! in, and the smoothing terms are solved in closed form per tick, so a
//! fixed input script always reproduces the same trajectory.

use bevy::prelude::*;

use crate::config::MovementConfig;
use crate::dash::DashAbility;
use crate::grapple::GrappleAbility;
use crate::input::{CharacterInput, CrouchInput};
use crate::motor::{direction_tangent_to_surface, project_on_plane, CharacterMotor};
use crate::state::{CharacterState, Stance};

/// First-person character movement state machine.
///
/// Owns the authoritative velocity and stance; the motor only reads the
/// velocity for integration and reports ground contact back. All mutation
/// happens inside [`advance`](Self::advance) and the explicit ability calls
/// ([`try_dash`](Self::try_dash), [`try_start_grapple`](Self::try_start_grapple),
/// [`cancel_grapple`](Self::cancel_grapple)), never concurrently.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct PlayerCharacter {
    state: CharacterState,
    last_state: CharacterState,

    requested_rotation: Quat,
    requested_movement: Vec3,
    requested_jump: bool,
    requested_sustained_jump: bool,
    requested_crouch: bool,
    requested_crouch_in_air: bool,

    time_since_ungrounded: f32,
    time_since_jump_request: f32,
    ungrounded_due_to_jump: bool,
    jumps_remaining: u32,

    camera_height: f32,

    dash: DashAbility,
    grapple: GrappleAbility,
}

impl Default for PlayerCharacter {
    fn default() -> Self {
        Self::new(&MovementConfig::default())
    }
}

impl PlayerCharacter {
    /// Create a character at rest, standing, with full ability stocks.
    pub fn new(config: &MovementConfig) -> Self {
        Self {
            state: CharacterState::default(),
            last_state: CharacterState::default(),
            requested_rotation: Quat::IDENTITY,
            requested_movement: Vec3::ZERO,
            requested_jump: false,
            requested_sustained_jump: false,
            requested_crouch: false,
            requested_crouch_in_air: false,
            time_since_ungrounded: 0.0,
            time_since_jump_request: 0.0,
            ungrounded_due_to_jump: false,
            jumps_remaining: config.max_jumps,
            camera_height: config.stand_height * config.stand_camera_height,
            dash: DashAbility::with_charges(config.max_dash_charges),
            grapple: GrappleAbility::default(),
        }
    }

    /// Latch this tick's input.
    ///
    /// The move axis is clamped to unit length and rotated into the
    /// requested facing's frame. Jump and crouch presses are edge-detected
    /// into latches that persist until consumed or timed out.
    pub fn update_input(&mut self, input: &CharacterInput) {
        self.requested_rotation = input.rotation;

        let planar = Vec3::new(input.movement.x, 0.0, -input.movement.y).clamp_length_max(1.0);
        self.requested_movement = input.rotation * planar;

        let was_requesting_jump = self.requested_jump;
        self.requested_jump = self.requested_jump || input.jump;
        if self.requested_jump && !was_requesting_jump {
            self.time_since_jump_request = 0.0;
        }
        self.requested_sustained_jump = input.jump_sustain;

        let was_requesting_crouch = self.requested_crouch;
        self.requested_crouch = match input.crouch {
            CrouchInput::Toggle => !self.requested_crouch,
            CrouchInput::None => self.requested_crouch,
        };
        if self.requested_crouch && !was_requesting_crouch {
            self.requested_crouch_in_air = !self.state.grounded;
        } else if !self.requested_crouch && was_requesting_crouch {
            self.requested_crouch_in_air = false;
        }
    }

    /// Resolve one fixed tick.
    ///
    /// Order is part of the contract: rotate the state buffer, tick ability
    /// timers, apply the crouch capsule shrink so this tick's resolve sees
    /// the smaller capsule, compute rotation and velocity, sweep, then react
    /// to the resolved result.
    pub fn advance<M: CharacterMotor>(&mut self, config: &MovementConfig, motor: &mut M, dt: f32) {
        self.last_state = self.state;

        self.dash.tick(config, dt);
        self.grapple.tick(dt);

        self.before_update(config, motor);

        let rotation = self.update_rotation(motor);
        let current_velocity = motor.velocity();
        let velocity = self.update_velocity(motor, config, current_velocity, dt);

        // The report the velocity update branched on, captured before the
        // sweep refreshes it. The post-update hook stores this stale value
        // so `last_state.grounded` lags the live report by exactly one
        // probe, which is what makes a landing observable from inside
        // `update_velocity`.
        let was_stable = motor.grounding().is_stable_on_ground;

        motor.sweep_and_resolve(velocity, rotation, dt);

        self.post_grounding_update(motor);
        self.after_update(config, motor, was_stable);

        let camera_target = motor.capsule_height()
            * if self.state.stance == Stance::Stand {
                config.stand_camera_height
            } else {
                config.crouch_camera_height
            };
        self.camera_height +=
            (camera_target - self.camera_height) * (1.0 - (-config.crouch_height_response * dt).exp());
    }

    /// Compute this tick's facing from the requested rotation, projected
    /// onto the plane of the character's up axis. A request that projects
    /// to nothing (looking straight up or down) keeps the previous facing.
    pub fn update_rotation<M: CharacterMotor>(&self, motor: &M) -> Quat {
        let up = motor.character_up();
        let forward = project_on_plane(self.requested_rotation * Vec3::NEG_Z, up);
        if forward == Vec3::ZERO {
            return motor.rotation();
        }
        look_rotation(forward, up)
    }

    /// Compute this tick's velocity from the latched input and the motor's
    /// current ground report.
    pub fn update_velocity<M: CharacterMotor>(
        &mut self,
        motor: &mut M,
        config: &MovementConfig,
        mut velocity: Vec3,
        dt: f32,
    ) -> Vec3 {
        let up = motor.character_up();
        self.state.acceleration = Vec3::ZERO;

        // An active grapple owns the velocity outright.
        if let Some(overridden) = self.grapple.resolve(config, motor.position(), up, dt) {
            return overridden;
        }

        let grounding = motor.grounding();
        if grounding.is_stable_on_ground {
            self.time_since_ungrounded = 0.0;
            self.ungrounded_due_to_jump = false;
            self.jumps_remaining = config.max_jumps;

            let grounded_movement =
                direction_tangent_to_surface(self.requested_movement, grounding.ground_normal, up)
                    * self.requested_movement.length();

            let moving = grounded_movement.length_squared() > 0.0;
            let crouching = self.state.stance == Stance::Crouch;
            let was_standing = self.last_state.stance == Stance::Stand;
            let was_in_air = !self.last_state.grounded;
            if (moving && crouching && was_standing) || was_in_air {
                self.state.stance = Stance::Slide;

                if was_in_air {
                    // Landing converts carried momentum into a slide, with a
                    // floor on the seed speed so even slow landings launch.
                    let landing_speed = self.last_state.velocity.length();
                    let carried =
                        project_on_plane(self.last_state.velocity, grounding.ground_normal);
                    let slide_speed =
                        (config.slide_start_speed * 1.5).max(landing_speed * 1.2);
                    velocity =
                        direction_tangent_to_surface(carried, grounding.ground_normal, up)
                            * slide_speed;
                } else {
                    let slide_speed = config.slide_start_speed.max(velocity.length());
                    velocity = direction_tangent_to_surface(velocity, grounding.ground_normal, up)
                        * slide_speed;
                }
            }

            if matches!(self.state.stance, Stance::Stand | Stance::Crouch) {
                let (speed, response) = if self.state.stance == Stance::Stand {
                    (config.walk_speed, config.walk_response)
                } else {
                    (config.crouch_speed, config.crouch_response)
                };

                // Exponential smoothing toward the target: the same
                // half-life regardless of tick length.
                let target_velocity = grounded_movement * speed;
                let move_velocity =
                    velocity.lerp(target_velocity, 1.0 - (-response * dt).exp());
                self.state.acceleration = move_velocity - velocity;
                velocity = move_velocity;
            } else {
                // Sliding: friction, then downslope pull, then bounded
                // steering that can redirect but never add speed.
                velocity -= velocity * (config.slide_friction * dt);

                let downslope =
                    project_on_plane(-up, grounding.ground_normal) * config.slide_gravity;
                velocity -= downslope * dt;

                let current_speed = velocity.length();
                let target_velocity = grounded_movement * current_speed;
                let steer_force =
                    (target_velocity - velocity) * (config.slide_steer_acceleration * dt);
                let steer_velocity = (velocity + steer_force).clamp_length_max(current_speed);
                self.state.acceleration = (steer_velocity - velocity) / dt;
                velocity = steer_velocity;

                if velocity.length() < config.slide_end_speed {
                    self.state.stance = Stance::Crouch;
                }
            }
        } else {
            self.time_since_ungrounded += dt;

            // Once the coyote window closes on a character that fell off an
            // edge without jumping, the ground jump is forfeited. Air jumps
            // beyond the first stay available.
            if self.time_since_ungrounded >= config.coyote_time
                && !self.ungrounded_due_to_jump
                && self.jumps_remaining == config.max_jumps
            {
                self.jumps_remaining = self.jumps_remaining.saturating_sub(1);
            }

            if self.requested_movement.length_squared() > 0.0 {
                let planar_movement = project_on_plane(self.requested_movement, up)
                    * self.requested_movement.length();
                let current_planar = project_on_plane(velocity, up);

                let mut movement_force = planar_movement * (config.air_acceleration * dt);

                if current_planar.length() < config.air_speed {
                    // Cap the resulting planar speed by shrinking the force,
                    // not the velocity, so existing momentum survives.
                    let target_planar =
                        (current_planar + movement_force).clamp_length_max(config.air_speed);
                    movement_force = target_planar - current_planar;
                } else if movement_force.dot(current_planar) < 0.0 {
                    // Already past the cap: only the counter component is
                    // allowed through.
                    movement_force =
                        project_on_plane(movement_force, current_planar.normalize_or_zero());
                }

                // Deflect the force along the surface tangent when pushing
                // into ground that was found but is not stable, so air
                // control cannot climb steep surfaces.
                if grounding.found_any_ground
                    && movement_force.dot(velocity + movement_force) > 0.0
                {
                    let obstruction_normal = up
                        .cross(up.cross(grounding.ground_normal))
                        .normalize_or_zero();
                    movement_force = project_on_plane(movement_force, obstruction_normal);
                }

                velocity += movement_force;
            }

            // Gravity, suppressed entirely while dashing; reduced while a
            // held jump is still rising.
            if !self.dash.is_dashing() {
                let vertical_speed = velocity.dot(up);
                let mut effective_gravity = config.gravity;
                if self.requested_sustained_jump && vertical_speed > 0.0 {
                    effective_gravity *= config.jump_sustain_gravity;
                }
                velocity += up * (effective_gravity * dt);
            }

            // Hard cap on the planar component only; vertical speed is
            // exempt.
            let planar = project_on_plane(velocity, up);
            if planar.length() > config.max_air_speed {
                let vertical = velocity - planar;
                velocity = planar.normalize_or_zero() * config.max_air_speed + vertical;
            }
        }

        if self.requested_jump {
            let grounded = grounding.is_stable_on_ground;
            let can_coyote_jump =
                self.time_since_ungrounded < config.coyote_time && !self.ungrounded_due_to_jump;

            if (grounded || can_coyote_jump || self.jumps_remaining > 0)
                && self.jumps_remaining > 0
            {
                self.requested_jump = false;
                self.requested_crouch = false;
                self.requested_crouch_in_air = false;

                motor.force_unground(0.0);
                self.ungrounded_due_to_jump = true;

                let mut jump_velocity = config.jump_speed;

                // A jump out of a slide scales with slide speed: taller and
                // with a forward boost.
                if self.state.stance == Stance::Slide {
                    let slide_speed = velocity.length();
                    let over = inverse_lerp(
                        config.slide_start_speed,
                        config.slide_start_speed * 2.0,
                        slide_speed,
                    );
                    jump_velocity *= 1.0 + 1.2 * over;

                    let slide_direction = project_on_plane(velocity, up).normalize_or_zero();
                    let forward_boost = (0.5 + 1.0 * over) * slide_speed;
                    velocity += slide_direction * forward_boost;
                }

                let current_vertical = velocity.dot(up);
                let target_vertical = current_vertical.max(jump_velocity);
                velocity += up * (target_vertical - current_vertical);

                self.jumps_remaining -= 1;
            } else {
                // Not granted: keep the request buffered for a short window
                // so a press just before landing still lands a jump.
                self.time_since_jump_request += dt;
                self.requested_jump = self.time_since_jump_request < config.coyote_time;
            }
        }

        self.dash.overlay(config, &mut velocity, dt);

        velocity
    }

    /// Start a dash along the latched move direction, or the current facing
    /// when there is no meaningful input. No-op while sliding, dashing, out
    /// of charges, or inside the dash cooldown. Returns whether it started.
    pub fn try_dash<M: CharacterMotor>(&mut self, config: &MovementConfig, motor: &M) -> bool {
        if self.state.stance == Stance::Slide {
            return false;
        }

        let mut direction = self.requested_movement;
        if direction.length_squared() < 0.01 {
            direction = motor.rotation() * Vec3::NEG_Z;
        }
        let direction = project_on_plane(direction, motor.character_up()).normalize_or_zero();
        if direction == Vec3::ZERO {
            return false;
        }

        self.dash.try_dash(config, direction)
    }

    /// Try to acquire a grapple anchor by raycasting from `origin` along
    /// `direction`. See [`GrappleAbility::try_start`].
    pub fn try_start_grapple<M: CharacterMotor>(
        &mut self,
        config: &MovementConfig,
        motor: &M,
        origin: Vec3,
        direction: Vec3,
    ) -> bool {
        self.grapple.try_start(config, motor, origin, direction)
    }

    /// Drop the grapple anchor, e.g. on input release.
    pub fn cancel_grapple(&mut self, config: &MovementConfig) {
        self.grapple.cancel(config);
    }

    // --- lifecycle hooks, called from `advance` around the motor resolve ---

    /// Before the resolve: a requested crouch from a standing stance shrinks
    /// the capsule immediately so this tick's sweep uses it.
    fn before_update<M: CharacterMotor>(&mut self, config: &MovementConfig, motor: &mut M) {
        if self.requested_crouch && self.state.stance == Stance::Stand {
            self.state.stance = Stance::Crouch;
            let radius = motor.capsule_radius();
            motor.set_capsule_dimensions(radius, config.crouch_height, config.crouch_height * 0.5);
        }
    }

    /// After the resolve: try to stand back up when crouch was released,
    /// re-checking for overlap at the resolved position; then snapshot the
    /// authoritative grounded flag and velocity.
    fn after_update<M: CharacterMotor>(
        &mut self,
        config: &MovementConfig,
        motor: &mut M,
        was_stable: bool,
    ) {
        if !self.requested_crouch && self.state.stance != Stance::Stand {
            let radius = motor.capsule_radius();
            motor.set_capsule_dimensions(radius, config.stand_height, config.stand_height * 0.5);
            if motor.capsule_overlap(motor.position(), motor.rotation()) > 0 {
                // Blocked overhead: stay small and keep the crouch latched
                // until there is room.
                self.requested_crouch = true;
                motor.set_capsule_dimensions(
                    radius,
                    config.crouch_height,
                    config.crouch_height * 0.5,
                );
            } else {
                self.state.stance = Stance::Stand;
            }
        }

        self.state.grounded = was_stable;
        self.state.velocity = motor.velocity();
    }

    /// After grounding is re-evaluated: a slide cannot continue without
    /// stable ground under it.
    fn post_grounding_update<M: CharacterMotor>(&mut self, motor: &M) {
        if !motor.grounding().is_stable_on_ground && self.state.stance == Stance::Slide {
            self.state.stance = Stance::Crouch;
        }
    }

    // --- outputs consumed by cosmetic and UI layers ---

    /// Current tick's state.
    pub fn state(&self) -> CharacterState {
        self.state
    }

    /// Previous tick's state.
    pub fn last_state(&self) -> CharacterState {
        self.last_state
    }

    /// Remaining dash charges.
    pub fn dash_charges(&self) -> u32 {
        self.dash.charges()
    }

    /// Jumps left before the character has to land again.
    pub fn jumps_remaining(&self) -> u32 {
        self.jumps_remaining
    }

    /// Whether a dash is currently running.
    pub fn is_dashing(&self) -> bool {
        self.dash.is_dashing()
    }

    /// Whether a grapple anchor is currently held.
    pub fn is_grappling(&self) -> bool {
        self.grapple.is_grappling()
    }

    /// The held grapple anchor, for rope rendering.
    pub fn grapple_anchor(&self) -> Option<Vec3> {
        self.grapple.anchor()
    }

    /// Field of view requested this tick (pulsed during a dash).
    pub fn target_fov(&self, config: &MovementConfig) -> f32 {
        self.dash.target_fov(config)
    }

    /// Smoothed height of the camera anchor above the character origin.
    pub fn camera_target_height(&self) -> f32 {
        self.camera_height
    }
}

/// Rotation with `-Z` facing along `forward` and `+Y` as close to `up` as
/// the forward direction allows. `forward` must be non-zero and not
/// parallel to `up`.
fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let back = -forward.normalize();
    let right = up.cross(back).normalize();
    let up = back.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, back))
}

/// Where `value` sits between `a` and `b`, clamped to `[0, 1]`.
fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane::PlaneMotor;

    const DT: f32 = 1.0 / 60.0;

    fn config() -> MovementConfig {
        MovementConfig::default()
    }

    /// Character standing at rest on the plane, fully settled.
    fn settled(config: &MovementConfig) -> (PlayerCharacter, PlaneMotor) {
        let mut character = PlayerCharacter::new(config);
        let mut motor = PlaneMotor::new(Vec3::ZERO);
        for _ in 0..120 {
            character.advance(config, &mut motor, DT);
        }
        assert!(character.state().grounded);
        assert_eq!(character.state().stance, Stance::Stand);
        assert!(character.state().velocity.length() < 0.01);
        (character, motor)
    }

    fn forward_input() -> CharacterInput {
        CharacterInput {
            movement: Vec2::new(0.0, 1.0),
            ..Default::default()
        }
    }

    #[test]
    fn inverse_lerp_clamps() {
        assert_eq!(inverse_lerp(0.0, 10.0, 5.0), 0.5);
        assert_eq!(inverse_lerp(0.0, 10.0, -5.0), 0.0);
        assert_eq!(inverse_lerp(0.0, 10.0, 25.0), 1.0);
        assert_eq!(inverse_lerp(3.0, 3.0, 3.0), 0.0);
    }

    #[test]
    fn look_rotation_faces_forward() {
        let rotation = look_rotation(Vec3::NEG_Z, Vec3::Y);
        assert!((rotation * Vec3::NEG_Z - Vec3::NEG_Z).length() < 1e-5);

        let rotation = look_rotation(Vec3::X, Vec3::Y);
        assert!((rotation * Vec3::NEG_Z - Vec3::X).length() < 1e-5);
        assert!((rotation * Vec3::Y - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn walk_smoothing_matches_closed_form() {
        let config = config();
        let (mut character, mut motor) = settled(&config);

        character.update_input(&forward_input());
        let target = Vec3::NEG_Z * config.walk_speed;

        for _ in 0..30 {
            let error_before = (character.state().velocity - target).length();
            character.advance(&config, &mut motor, DT);
            let error_after = (character.state().velocity - target).length();

            let expected = error_before * (-config.walk_response * DT).exp();
            assert!(
                (error_after - expected).abs() < 1e-3,
                "smoothing drifted from closed form: {error_after} vs {expected}"
            );
        }
    }

    #[test]
    fn walk_converges_to_walk_speed() {
        let config = config();
        let (mut character, mut motor) = settled(&config);

        character.update_input(&forward_input());
        for _ in 0..240 {
            character.advance(&config, &mut motor, DT);
            assert!(character.state().velocity.length() <= config.walk_speed + 1e-3);
        }
        assert!((character.state().velocity.length() - config.walk_speed).abs() < 0.1);
    }

    #[test]
    fn slide_speed_never_increases_on_flat_ground() {
        let config = config();
        let mut character = PlayerCharacter::new(&config);
        // Fall onto the plane with carried planar speed; the landing enters
        // a slide.
        let mut motor = PlaneMotor::new(Vec3::new(0.0, 3.0, 0.0));
        motor.set_velocity(Vec3::new(0.0, 0.0, -40.0));

        let steer_directions = [
            Vec2::new(1.0, 0.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.7, 0.7),
            Vec2::new(0.0, -1.0),
        ];

        let mut slid = false;
        let mut steer = 0;
        for _ in 0..240 {
            if character.state().stance == Stance::Slide {
                slid = true;
                character.update_input(&CharacterInput {
                    movement: steer_directions[steer % steer_directions.len()],
                    ..Default::default()
                });
                steer += 1;

                let speed_before = character.state().velocity.length();
                character.advance(&config, &mut motor, DT);
                if character.state().stance == Stance::Slide {
                    let speed_after = character.state().velocity.length();
                    assert!(
                        speed_after <= speed_before + 1e-3,
                        "steering added energy: {speed_before} -> {speed_after}"
                    );
                }
            } else {
                character.advance(&config, &mut motor, DT);
            }
        }
        assert!(slid, "the landing never entered a slide");
    }

    #[test]
    fn sustained_jump_reduces_gravity_by_exact_fraction() {
        let config = config();
        let mut character = PlayerCharacter::new(&config);
        // Airborne, rising, holding jump, no lateral input.
        let mut motor = PlaneMotor::new(Vec3::new(0.0, 50.0, 0.0));
        motor.set_velocity(Vec3::Y * 20.0);

        character.update_input(&CharacterInput {
            jump_sustain: true,
            ..Default::default()
        });

        let dt = 0.02;
        character.advance(&config, &mut motor, dt);

        let expected = 20.0 - (-config.gravity) * config.jump_sustain_gravity * dt;
        let vertical = character.state().velocity.y;
        assert!(
            (vertical - expected).abs() < 1e-5,
            "sustained gravity off: {vertical} vs {expected}"
        );
    }

    #[test]
    fn full_gravity_once_falling() {
        let config = config();
        let mut character = PlayerCharacter::new(&config);
        let mut motor = PlaneMotor::new(Vec3::new(0.0, 50.0, 0.0));
        motor.set_velocity(Vec3::Y * -1.0);

        character.update_input(&CharacterInput {
            jump_sustain: true,
            ..Default::default()
        });

        let dt = 0.02;
        character.advance(&config, &mut motor, dt);

        // Sustain only applies while rising.
        let expected = -1.0 + config.gravity * dt;
        assert!((character.state().velocity.y - expected).abs() < 1e-5);
    }

    #[test]
    fn air_speed_cap_is_planar_only() {
        let config = config();
        let mut character = PlayerCharacter::new(&config);
        let mut motor = PlaneMotor::new(Vec3::new(0.0, 200.0, 0.0));
        motor.set_velocity(Vec3::new(60.0, -80.0, 0.0));

        character.update_input(&forward_input());
        character.advance(&config, &mut motor, DT);

        let velocity = character.state().velocity;
        let planar = Vec3::new(velocity.x, 0.0, velocity.z);
        assert!(planar.length() <= config.max_air_speed + 1e-3);
        // Vertical speed is exempt from the cap.
        assert!(velocity.y < -80.0);
    }

    #[test]
    fn degenerate_facing_keeps_previous_rotation() {
        let config = config();
        let (mut character, motor) = settled(&config);

        // Face straight down: the projected forward degenerates to zero.
        character.update_input(&CharacterInput {
            rotation: Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            ..Default::default()
        });

        let rotation = character.update_rotation(&motor);
        assert_eq!(rotation, motor.rotation());
    }

    #[test]
    fn facing_follows_requested_yaw() {
        let config = config();
        let (mut character, mut motor) = settled(&config);

        let yaw = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        character.update_input(&CharacterInput {
            rotation: yaw,
            ..Default::default()
        });
        character.advance(&config, &mut motor, DT);

        let forward = motor.rotation() * Vec3::NEG_Z;
        assert!((forward - (yaw * Vec3::NEG_Z)).length() < 1e-4);
    }

    #[test]
    fn dash_refused_while_sliding() {
        let config = config();
        let mut character = PlayerCharacter::new(&config);
        let mut motor = PlaneMotor::new(Vec3::new(0.0, 3.0, 0.0));
        motor.set_velocity(Vec3::new(0.0, 0.0, -40.0));

        let mut checked = false;
        for _ in 0..240 {
            character.advance(&config, &mut motor, DT);
            if character.state().stance == Stance::Slide {
                assert!(!character.try_dash(&config, &motor));
                checked = true;
                break;
            }
        }
        assert!(checked, "the landing never entered a slide");
    }

    #[test]
    fn dash_with_no_input_uses_facing() {
        let config = config();
        let (mut character, mut motor) = settled(&config);

        assert!(character.try_dash(&config, &motor));
        character.advance(&config, &mut motor, DT);

        // Default facing is -Z; the overlay injects along it.
        let velocity = character.state().velocity;
        assert!(velocity.z < -0.5 * config.dash_force);
    }

    #[test]
    fn camera_anchor_tracks_stance() {
        let config = config();
        let (mut character, mut motor) = settled(&config);

        let standing = character.camera_target_height();
        assert!((standing - config.stand_height * config.stand_camera_height).abs() < 0.05);

        character.update_input(&CharacterInput {
            crouch: CrouchInput::Toggle,
            ..Default::default()
        });
        for _ in 0..120 {
            character.advance(&config, &mut motor, DT);
        }
        let crouched = character.camera_target_height();
        assert!((crouched - config.crouch_height * config.crouch_camera_height).abs() < 0.05);
    }
}
