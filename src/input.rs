//! Character input boundary.
//!
//! Input mapping (keyboard, mouse, gamepad, AI) happens outside this crate;
//! whatever produces the input writes one [`CharacterInput`] per tick and
//! the controller latches it. One-shot fields are pulses: the latch system
//! clears them after reading so a single press is never consumed twice.

use bevy::prelude::*;

/// Crouch intent for one tick.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrouchInput {
    /// Leave the crouch latch as it is.
    #[default]
    None,
    /// Flip the crouch latch.
    Toggle,
}

/// Per-tick input consumed by the character state machine.
///
/// `movement` is a planar axis pair with `y` meaning forward; its magnitude
/// is clamped to 1 when latched. `rotation` is the requested facing (camera
/// rotation for a first-person character); the movement axis is interpreted
/// in its frame, and the crate follows Bevy's `-Z` forward convention.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct CharacterInput {
    /// Requested facing.
    pub rotation: Quat,
    /// Planar move axis, `x` right / `y` forward.
    pub movement: Vec2,
    /// Jump was pressed this tick (pulse).
    pub jump: bool,
    /// Jump is currently held. Sustains a rising jump against gravity.
    pub jump_sustain: bool,
    /// Crouch toggle for this tick (pulse).
    pub crouch: CrouchInput,
}

impl Default for CharacterInput {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            movement: Vec2::ZERO,
            jump: false,
            jump_sustain: false,
            crouch: CrouchInput::None,
        }
    }
}

impl CharacterInput {
    /// Clear the one-shot fields after they have been latched.
    pub fn clear_pulses(&mut self) {
        self.jump = false;
        self.crouch = CrouchInput::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_input_is_neutral() {
        let input = CharacterInput::default();
        assert_eq!(input.rotation, Quat::IDENTITY);
        assert_eq!(input.movement, Vec2::ZERO);
        assert!(!input.jump);
        assert!(!input.jump_sustain);
        assert_eq!(input.crouch, CrouchInput::None);
    }

    #[test]
    fn clear_pulses_keeps_held_state() {
        let mut input = CharacterInput {
            movement: Vec2::new(0.0, 1.0),
            jump: true,
            jump_sustain: true,
            crouch: CrouchInput::Toggle,
            ..default()
        };
        input.clear_pulses();

        assert!(!input.jump);
        assert_eq!(input.crouch, CrouchInput::None);
        // Held and axis state is the mapper's to manage, not ours.
        assert!(input.jump_sustain);
        assert_eq!(input.movement, Vec2::new(0.0, 1.0));
    }
}
