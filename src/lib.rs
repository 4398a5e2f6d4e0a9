//! # `parkour_character_controller`
//!
//! A first-person character movement controller with physics backend abstraction.
//!
//! This crate resolves per-tick player input into physically plausible motion:
//! - Walking and crouching with frame-rate-independent velocity smoothing
//! - Sliding with friction, downslope gravity and bounded steering
//! - Jumping with coyote time, jump buffering and a multi-jump budget
//! - Air control with a planar speed cap that never kills existing momentum
//! - Charge-based dashing with cooldown and recharge timers
//! - A grapple hook that pulls toward a raycast-acquired anchor
//!
//! ## Architecture
//!
//! The controller is a **deterministic fixed-tick state machine** layered on
//! top of a capsule motor it does not own:
//! 1. The [`CharacterMotor`](motor::CharacterMotor) trait abstracts the
//!    collision engine: capsule sweeps, ground probing, forced ungrounding
//!    and capsule resizing.
//! 2. [`PlayerCharacter`](character::PlayerCharacter) consumes latched input
//!    plus the motor's ground report and produces a new velocity, rotation
//!    and stance every tick through a single
//!    [`advance`](character::PlayerCharacter::advance) entry point.
//! 3. Thin `FixedUpdate` systems wire the state machine into a Bevy app and
//!    mirror its state into marker components.
//!
//! All timers advance with an explicit tick duration, so the same input
//! script always reproduces the same trajectory bit for bit.
//!
//! ## Usage
//!
//! ```rust
//! use parkour_character_controller::prelude::*;
//!
//! // Tuning lives in a component; defaults carry the reference tuning.
//! let config = MovementConfig::default().with_max_jumps(2);
//!
//! // The state machine itself is a plain component.
//! let character = PlayerCharacter::new(&config);
//! assert_eq!(character.state().stance, Stance::Stand);
//! ```
//!
//! With the bundled flat-plane motor (useful for tests and headless sims):
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use parkour_character_controller::prelude::*;
//!
//! App::new()
//!     .add_plugins(MinimalPlugins)
//!     .add_plugins(CharacterControllerPlugin::<PlaneMotor>::default())
//!     .run();
//! ```

use bevy::prelude::*;

pub mod character;
pub mod config;
pub mod dash;
pub mod grapple;
pub mod input;
pub mod motor;
pub mod plane;
pub mod state;
pub mod systems;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::character::PlayerCharacter;
    pub use crate::config::MovementConfig;
    pub use crate::dash::DashAbility;
    pub use crate::grapple::GrappleAbility;
    pub use crate::input::{CharacterInput, CrouchInput};
    pub use crate::motor::{CharacterMotor, GroundingReport, NoOpMotorPlugin, RayHit};
    pub use crate::plane::PlaneMotor;
    pub use crate::state::{Airborne, CharacterState, Grounded, Sliding, Stance};
    pub use crate::CharacterControllerPlugin;
}

/// Main plugin for the character controller.
///
/// The plugin is generic over a motor implementation `M`, which provides the
/// capsule sweep-and-resolve step, ground probing and world queries. The
/// movement state machine only ever talks to the motor through the
/// [`CharacterMotor`](motor::CharacterMotor) trait, so collision engines can
/// be swapped without touching movement logic.
///
/// Systems run in `FixedUpdate` in a strict order: input latching, then the
/// per-character [`advance`](character::PlayerCharacter::advance) tick, then
/// marker synchronization.
pub struct CharacterControllerPlugin<M: motor::CharacterMotor + Component> {
    _marker: std::marker::PhantomData<M>,
}

impl<M: motor::CharacterMotor + Component> Default for CharacterControllerPlugin<M> {
    fn default() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<M: motor::CharacterMotor + Component> Plugin for CharacterControllerPlugin<M> {
    fn build(&self, app: &mut App) {
        // Register core types
        app.register_type::<config::MovementConfig>();
        app.register_type::<input::CharacterInput>();
        app.register_type::<character::PlayerCharacter>();
        app.register_type::<state::Grounded>();
        app.register_type::<state::Airborne>();
        app.register_type::<state::Sliding>();

        // Add the motor's own plugin
        app.add_plugins(M::plugin());

        // The fixed tick order is part of the determinism contract:
        // input latch -> state machine advance -> marker sync.
        app.add_systems(
            FixedUpdate,
            (
                systems::latch_character_input,
                systems::advance_characters::<M>,
                systems::sync_stance_markers,
            )
                .chain(),
        );
    }
}
