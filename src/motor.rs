//! Capsule motor abstraction.
//!
//! The collision and ground-probing engine is an external collaborator: it
//! owns a capsule shape, sweeps it against the world each tick, and reports
//! whether the character stands on stable ground. This module defines the
//! trait the movement state machine drives that engine through, so physics
//! backends can be swapped without touching movement logic.

use bevy::prelude::*;

/// Ground contact report produced by the motor's probe/resolve step.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct GroundingReport {
    /// Whether the character rests on ground stable enough to walk on.
    pub is_stable_on_ground: bool,
    /// Whether any ground surface was touched at all, stable or not.
    /// Steep or crumbling surfaces set this without setting stability.
    pub found_any_ground: bool,
    /// Normal of the ground surface at the contact point.
    pub ground_normal: Vec3,
}

impl Default for GroundingReport {
    fn default() -> Self {
        Self {
            is_stable_on_ground: false,
            found_any_ground: false,
            ground_normal: Vec3::Y,
        }
    }
}

impl GroundingReport {
    /// A report for a character with no ground contact at all.
    pub fn airborne() -> Self {
        Self::default()
    }

    /// A report for a character standing on stable ground.
    pub fn stable(ground_normal: Vec3) -> Self {
        Self {
            is_stable_on_ground: true,
            found_any_ground: true,
            ground_normal,
        }
    }
}

/// Result of a world raycast performed by the motor.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World position of the hit point.
    pub point: Vec3,
    /// Normal of the surface at the hit point.
    pub normal: Vec3,
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// Whether the hit surface accepts grapple anchors.
    pub grappleable: bool,
}

/// Trait for capsule motor implementations.
///
/// Implement this trait to integrate a collision engine with the character
/// controller. The motor owns the capsule pose and is the sole authority on
/// ground contact; the state machine owns velocity, stance and every timer.
///
/// The contract between the two is narrow: once per tick the state machine
/// hands the motor a velocity and rotation via [`sweep_and_resolve`], and the
/// motor moves the capsule, resolves collisions and refreshes its
/// [`GroundingReport`]. Everything else is queries.
///
/// [`sweep_and_resolve`]: CharacterMotor::sweep_and_resolve
pub trait CharacterMotor: 'static + Send + Sync {
    /// Returns the plugin that sets up this motor's own systems.
    ///
    /// Motors that need no setup can rely on the default [`NoOpMotorPlugin`].
    fn plugin() -> impl Plugin
    where
        Self: Sized,
    {
        NoOpMotorPlugin
    }

    /// The character's up axis (unit length).
    fn character_up(&self) -> Vec3;

    /// Position of the capsule as of the last resolve.
    fn position(&self) -> Vec3;

    /// Rotation of the capsule as of the last resolve.
    fn rotation(&self) -> Quat;

    /// Velocity as of the last resolve. This may differ from the velocity
    /// passed into [`sweep_and_resolve`](CharacterMotor::sweep_and_resolve)
    /// when collision response removed a component of it.
    fn velocity(&self) -> Vec3;

    /// Ground report from the most recent resolve.
    fn grounding(&self) -> GroundingReport;

    /// Radius of the capsule.
    fn capsule_radius(&self) -> f32;

    /// Current height of the capsule.
    fn capsule_height(&self) -> f32;

    /// Sweep the capsule along `velocity * dt`, resolve collisions, apply
    /// the new rotation and refresh the grounding report.
    fn sweep_and_resolve(&mut self, velocity: Vec3, rotation: Quat, dt: f32);

    /// Suppress ground snapping for `time` seconds. Zero suppresses snapping
    /// for the next resolve only, letting an upward launch leave the ground.
    fn force_unground(&mut self, time: f32);

    /// Resize the capsule. `y_offset` is the capsule center's offset from
    /// the character origin along the up axis.
    fn set_capsule_dimensions(&mut self, radius: f32, height: f32, y_offset: f32);

    /// Count of colliders overlapping the capsule at the given pose,
    /// excluding the character itself.
    fn capsule_overlap(&self, position: Vec3, rotation: Quat) -> usize;

    /// Cast a ray into the world.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;
}

/// Empty plugin for motors that don't need additional setup.
pub struct NoOpMotorPlugin;

impl Plugin for NoOpMotorPlugin {
    fn build(&self, _app: &mut App) {}

    fn is_unique(&self) -> bool {
        // Several motor types may share this plugin in one app.
        false
    }
}

/// Re-projects `direction` so it runs along the surface with the given
/// normal, preserving the direction's sideways orientation relative to the
/// character's up axis. Returns a unit vector, or zero when the inputs
/// degenerate (zero direction, or direction parallel to up).
pub fn direction_tangent_to_surface(direction: Vec3, surface_normal: Vec3, up: Vec3) -> Vec3 {
    let direction_right = direction.cross(up);
    surface_normal.cross(direction_right).normalize_or_zero()
}

/// Component of `vector` lying on the plane orthogonal to `plane_normal`.
/// `plane_normal` must be unit length or zero; a zero normal returns the
/// vector unchanged.
pub fn project_on_plane(vector: Vec3, plane_normal: Vec3) -> Vec3 {
    vector - plane_normal * vector.dot(plane_normal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounding_report_default_is_airborne() {
        let report = GroundingReport::default();
        assert!(!report.is_stable_on_ground);
        assert!(!report.found_any_ground);
        assert_eq!(report.ground_normal, Vec3::Y);
    }

    #[test]
    fn grounding_report_stable() {
        let normal = Vec3::new(0.0, 1.0, 0.0);
        let report = GroundingReport::stable(normal);
        assert!(report.is_stable_on_ground);
        assert!(report.found_any_ground);
        assert_eq!(report.ground_normal, normal);
    }

    #[test]
    fn tangent_on_flat_ground_recovers_direction() {
        let direction = Vec3::new(0.0, 0.0, -1.0);
        let tangent = direction_tangent_to_surface(direction, Vec3::Y, Vec3::Y);
        assert!((tangent - direction).length() < 1e-6);
    }

    #[test]
    fn tangent_on_slope_is_unit_and_orthogonal_to_normal() {
        let normal = Vec3::new(0.3, 1.0, 0.1).normalize();
        let tangent = direction_tangent_to_surface(Vec3::NEG_Z, normal, Vec3::Y);
        assert!((tangent.length() - 1.0).abs() < 1e-6);
        assert!(tangent.dot(normal).abs() < 1e-6);
    }

    #[test]
    fn tangent_degenerates_to_zero() {
        // Direction parallel to up has no sideways component to preserve.
        let tangent = direction_tangent_to_surface(Vec3::Y, Vec3::Y, Vec3::Y);
        assert_eq!(tangent, Vec3::ZERO);
    }

    #[test]
    fn project_on_plane_removes_normal_component() {
        let projected = project_on_plane(Vec3::new(3.0, 4.0, 5.0), Vec3::Y);
        assert_eq!(projected, Vec3::new(3.0, 0.0, 5.0));
    }

    #[test]
    fn project_on_zero_normal_is_identity() {
        let vector = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(project_on_plane(vector, Vec3::ZERO), vector);
    }
}
