//! Character state and marker components.

use bevy::prelude::*;

/// Discrete movement mode gating the velocity-resolution rules.
///
/// Transitions happen only at tick boundaries: `Stand ⇄ Crouch` (toggle,
/// gated by an overlap check on stand-up), `Crouch → Slide` (motion or
/// landing), `Slide → Crouch` (speed drop or ground loss). There is no
/// direct `Stand → Slide` transition.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stance {
    #[default]
    Stand,
    Crouch,
    Slide,
}

/// Snapshot of the character for one tick.
///
/// The state machine keeps two of these: the current state and the previous
/// tick's state. Cosmetic layers (camera lean, HUD) read them through
/// [`PlayerCharacter::state`](crate::character::PlayerCharacter::state) and
/// [`PlayerCharacter::last_state`](crate::character::PlayerCharacter::last_state).
#[derive(Reflect, Debug, Clone, Copy, Default)]
pub struct CharacterState {
    /// Whether the character stood on stable ground, per the motor report
    /// the tick's velocity update branched on.
    pub grounded: bool,
    /// Discrete movement mode.
    pub stance: Stance,
    /// Authoritative linear velocity.
    pub velocity: Vec3,
    /// Velocity change of this tick. Informational, consumed by cosmetic
    /// effects such as camera lean.
    pub acceleration: Vec3,
}

/// Marker component present while the character is grounded.
///
/// Mutually exclusive with [`Airborne`]; synced from the character state
/// once per fixed tick.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Grounded;

/// Marker component present while the character is airborne.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Airborne;

/// Marker component present while the character is sliding.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Sliding;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stance_is_stand() {
        assert_eq!(Stance::default(), Stance::Stand);
    }

    #[test]
    fn default_state_is_airborne_at_rest() {
        let state = CharacterState::default();
        assert!(!state.grounded);
        assert_eq!(state.stance, Stance::Stand);
        assert_eq!(state.velocity, Vec3::ZERO);
        assert_eq!(state.acceleration, Vec3::ZERO);
    }
}
