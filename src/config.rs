//! Controller configuration.
//!
//! All movement tuning lives in a single component so a character's feel can
//! be tweaked in one place. Defaults carry the reference tuning the
//! controller was balanced around.

use bevy::prelude::*;

/// Tuning parameters for the character controller.
///
/// Speeds are in world units per second, response rates in 1/seconds
/// (higher converges faster), times in seconds.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct MovementConfig {
    // === Ground Movement ===
    /// Target speed while standing.
    pub walk_speed: f32,
    /// Target speed while crouched.
    pub crouch_speed: f32,
    /// Exponential response rate toward the walk target velocity.
    pub walk_response: f32,
    /// Exponential response rate toward the crouch target velocity.
    pub crouch_response: f32,

    // === Air Movement ===
    /// Planar speed that air control accelerates toward.
    pub air_speed: f32,
    /// Planar acceleration available while airborne.
    pub air_acceleration: f32,
    /// Hard cap on planar speed while airborne. Vertical speed is exempt.
    pub max_air_speed: f32,

    // === Jumping ===
    /// Vertical takeoff speed of an unboosted jump.
    pub jump_speed: f32,
    /// Total jumps available before landing again (2 = double jump).
    pub max_jumps: u32,
    /// Grace window after leaving the ground during which a jump is still
    /// honored. Also bounds how long an early jump press stays buffered.
    pub coyote_time: f32,
    /// Gravity multiplier applied while the jump button is held and the
    /// character is still rising. Lower values give taller sustained hops.
    pub jump_sustain_gravity: f32,
    /// Gravity acceleration along the up axis (negative pulls down).
    pub gravity: f32,

    // === Sliding ===
    /// Minimum speed a slide starts at when entered from a grounded crouch.
    pub slide_start_speed: f32,
    /// Speed below which a slide ends and demotes to a crouch.
    pub slide_end_speed: f32,
    /// Multiplicative friction coefficient applied per second of sliding.
    pub slide_friction: f32,
    /// Steering force rate while sliding. Steering can redirect the slide
    /// but never add speed.
    pub slide_steer_acceleration: f32,
    /// Downslope acceleration while sliding (negative, scales the projected
    /// up axis).
    pub slide_gravity: f32,

    // === Capsule & Camera Anchor ===
    /// Capsule height while standing.
    pub stand_height: f32,
    /// Capsule height while crouched or sliding.
    pub crouch_height: f32,
    /// Exponential response rate of the camera anchor height toward its
    /// stance target.
    pub crouch_height_response: f32,
    /// Camera anchor height while standing, as a fraction of capsule height.
    pub stand_camera_height: f32,
    /// Camera anchor height while crouched, as a fraction of capsule height.
    pub crouch_camera_height: f32,

    // === Dash ===
    /// Speed injected along the dash direction.
    pub dash_force: f32,
    /// How long a dash suppresses gravity.
    pub dash_duration: f32,
    /// Minimum time between consecutive dashes.
    pub dash_cooldown_between: f32,
    /// Time to restore one spent dash charge.
    pub dash_recharge_time: f32,
    /// Maximum stock of dash charges.
    pub max_dash_charges: u32,
    /// Field of view while the dash pulse is active.
    pub dash_fov: f32,
    /// Duration of the dash field-of-view pulse.
    pub dash_fov_duration: f32,
    /// Field of view outside the dash pulse.
    pub normal_fov: f32,

    // === Grapple ===
    /// Speed of the pull toward the anchor.
    pub grapple_pull_speed: f32,
    /// Weak gravity term applied along the up axis during the pull.
    pub grapple_low_gravity: f32,
    /// Base propulsion speed applied on arrival at a low anchor.
    pub grapple_propel_force: f32,
    /// Maximum raycast distance when acquiring an anchor.
    pub max_grapple_distance: f32,
    /// Distance to the anchor at which the pull ends.
    pub grapple_arrive_radius: f32,
    /// Anchors less than this much above the grapple origin propel the
    /// character back toward the origin on arrival.
    pub grapple_propel_height: f32,
    /// Time after a grapple ends before another can start.
    pub grapple_cooldown: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            // Ground movement
            walk_speed: 20.0,
            crouch_speed: 7.0,
            walk_response: 25.0,
            crouch_response: 20.0,

            // Air movement
            air_speed: 10.0,
            air_acceleration: 35.0,
            max_air_speed: 25.0,

            // Jumping
            jump_speed: 20.0,
            max_jumps: 2,
            coyote_time: 0.15,
            jump_sustain_gravity: 0.4,
            gravity: -10.0,

            // Sliding
            slide_start_speed: 54.0,
            slide_end_speed: 34.0,
            slide_friction: 0.8,
            slide_steer_acceleration: 6.75,
            slide_gravity: -121.5,

            // Capsule & camera anchor
            stand_height: 2.0,
            crouch_height: 1.0,
            crouch_height_response: 15.0,
            stand_camera_height: 0.9,
            crouch_camera_height: 0.7,

            // Dash
            dash_force: 40.0,
            dash_duration: 0.15,
            dash_cooldown_between: 0.3,
            dash_recharge_time: 2.0,
            max_dash_charges: 2,
            dash_fov: 90.0,
            dash_fov_duration: 0.15,
            normal_fov: 70.0,

            // Grapple
            grapple_pull_speed: 60.0,
            grapple_low_gravity: -1.5,
            grapple_propel_force: 8.0,
            max_grapple_distance: 40.0,
            grapple_arrive_radius: 2.0,
            grapple_propel_height: 1.0,
            grapple_cooldown: 0.5,
        }
    }
}

impl MovementConfig {
    /// Create a config for low-gravity arenas: a weaker pull, floatier
    /// jumps and more authority in the air.
    pub fn low_gravity() -> Self {
        Self {
            gravity: -4.0,
            jump_speed: 14.0,
            air_speed: 14.0,
            air_acceleration: 45.0,
            max_air_speed: 30.0,
            ..default()
        }
    }

    /// Create a config for a heavier, more deliberate character.
    pub fn heavy() -> Self {
        Self {
            walk_speed: 14.0,
            gravity: -18.0,
            jump_speed: 16.0,
            max_jumps: 1,
            coyote_time: 0.1,
            dash_recharge_time: 3.0,
            ..default()
        }
    }

    /// Builder: set walking speed and response rate.
    pub fn with_walk(mut self, speed: f32, response: f32) -> Self {
        self.walk_speed = speed;
        self.walk_response = response;
        self
    }

    /// Builder: set air control speed and acceleration.
    pub fn with_air_control(mut self, speed: f32, acceleration: f32) -> Self {
        self.air_speed = speed;
        self.air_acceleration = acceleration;
        self
    }

    /// Builder: set the jump takeoff speed.
    pub fn with_jump_speed(mut self, speed: f32) -> Self {
        self.jump_speed = speed;
        self
    }

    /// Builder: set the jump budget.
    pub fn with_max_jumps(mut self, jumps: u32) -> Self {
        self.max_jumps = jumps;
        self
    }

    /// Builder: set the coyote/buffer window.
    pub fn with_coyote_time(mut self, time: f32) -> Self {
        self.coyote_time = time;
        self
    }

    /// Builder: set gravity.
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Builder: set the slide speed window (start and end thresholds).
    pub fn with_slide_speeds(mut self, start: f32, end: f32) -> Self {
        self.slide_start_speed = start;
        self.slide_end_speed = end;
        self
    }

    /// Builder: set the dash charge stock.
    pub fn with_max_dash_charges(mut self, charges: u32) -> Self {
        self.max_dash_charges = charges;
        self
    }

    /// Builder: set stand and crouch capsule heights.
    pub fn with_capsule_heights(mut self, stand: f32, crouch: f32) -> Self {
        self.stand_height = stand;
        self.crouch_height = crouch;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_slide_window_is_ordered() {
        let config = MovementConfig::default();
        assert!(config.slide_end_speed < config.slide_start_speed);
    }

    #[test]
    fn default_gravity_pulls_down() {
        let config = MovementConfig::default();
        assert!(config.gravity < 0.0);
        assert!(config.slide_gravity < 0.0);
        assert!(config.grapple_low_gravity < 0.0);
    }

    #[test]
    fn default_sustain_gravity_is_a_fraction() {
        let config = MovementConfig::default();
        assert!(config.jump_sustain_gravity > 0.0 && config.jump_sustain_gravity < 1.0);
    }

    #[test]
    fn builders_chain() {
        let config = MovementConfig::default()
            .with_walk(30.0, 20.0)
            .with_max_jumps(3)
            .with_slide_speeds(40.0, 20.0);
        assert_eq!(config.walk_speed, 30.0);
        assert_eq!(config.walk_response, 20.0);
        assert_eq!(config.max_jumps, 3);
        assert_eq!(config.slide_start_speed, 40.0);
        assert_eq!(config.slide_end_speed, 20.0);
    }

    #[test]
    fn low_gravity_preset_pulls_less_than_default() {
        let preset = MovementConfig::low_gravity();
        let default = MovementConfig::default();
        assert!(preset.gravity > default.gravity);
        assert!(preset.air_acceleration >= default.air_acceleration);
    }

    #[test]
    fn heavy_preset_trades_jumps_for_weight() {
        let preset = MovementConfig::heavy();
        let default = MovementConfig::default();
        assert!(preset.gravity < default.gravity);
        assert!(preset.max_jumps < default.max_jumps);
    }

    #[test]
    fn crouch_is_slower_and_shorter_than_stand() {
        let config = MovementConfig::default();
        assert!(config.crouch_speed < config.walk_speed);
        assert!(config.crouch_height < config.stand_height);
    }
}
