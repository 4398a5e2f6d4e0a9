//! Fixed-tick systems wiring the state machine into a Bevy app.
//!
//! The systems run in `FixedUpdate` in a strict chained order (input latch,
//! character advance, marker sync), which together with the explicit `dt`
//! plumbing keeps trajectories reproducible.

use bevy::prelude::*;

use crate::character::PlayerCharacter;
use crate::config::MovementConfig;
use crate::input::CharacterInput;
use crate::motor::CharacterMotor;
use crate::state::{Airborne, Grounded, Sliding, Stance};

/// Latch each character's [`CharacterInput`] and clear its one-shot fields.
///
/// The input component is written by whatever maps raw devices (or AI) to
/// character intent; clearing the pulses here guarantees a press is latched
/// exactly once even when several fixed ticks run in one frame.
pub fn latch_character_input(mut query: Query<(&mut PlayerCharacter, &mut CharacterInput)>) {
    for (mut character, mut input) in &mut query {
        character.update_input(&input);
        input.clear_pulses();
    }
}

/// Advance every character's state machine by one fixed tick.
pub fn advance_characters<M: CharacterMotor + Component>(
    time: Res<Time<Fixed>>,
    mut query: Query<(&mut PlayerCharacter, &MovementConfig, &mut M)>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for (mut character, config, mut motor) in &mut query {
        character.advance(config, &mut *motor, dt);
    }
}

/// Mirror character state into marker components for convenient queries.
pub fn sync_stance_markers(
    mut commands: Commands,
    query: Query<(
        Entity,
        &PlayerCharacter,
        Has<Grounded>,
        Has<Airborne>,
        Has<Sliding>,
    )>,
) {
    for (entity, character, has_grounded, has_airborne, has_sliding) in &query {
        let state = character.state();

        if state.grounded && !has_grounded {
            commands.entity(entity).insert(Grounded).remove::<Airborne>();
        } else if !state.grounded && !has_airborne {
            commands.entity(entity).insert(Airborne).remove::<Grounded>();
        }

        let sliding = state.stance == Stance::Slide;
        if sliding && !has_sliding {
            commands.entity(entity).insert(Sliding);
        } else if !sliding && has_sliding {
            commands.entity(entity).remove::<Sliding>();
        }
    }
}
