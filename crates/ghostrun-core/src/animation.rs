//! Animation state projection.
//!
//! [`resolve`] maps an actor's physical and combat state to exactly one
//! [`AnimationTag`]. It is a pure function: the simulation calls it after
//! every state-mutating phase and forwards changed tags to presentation.
//!
//! Priority, highest first:
//!
//! ```text
//! dead > attacking > hurt > falling > rising > wall-sliding (hold) > running > idle
//! ```

use serde::{Deserialize, Serialize};

use crate::actor::Facing;

/// Horizontal speeds below this count as standing still.
pub const RUN_THRESHOLD: f32 = 0.01;

/// Presented animation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimState {
    /// Standing.
    Idle,
    /// Moving along the ground.
    Run,
    /// Rising.
    Jump,
    /// Falling.
    Fall,
    /// Attack in progress.
    Attack,
    /// Hurt flash window.
    Hurt,
    /// Dead.
    Dead,
}

/// Animation state plus the side it faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationTag {
    /// State.
    pub state: AnimState,
    /// Facing.
    pub facing: Facing,
}

impl AnimationTag {
    /// Tag for `state` facing `facing`.
    #[must_use]
    pub const fn new(state: AnimState, facing: Facing) -> Self {
        Self { state, facing }
    }
}

/// Everything [`resolve`] reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationInputs {
    /// Actor is alive.
    pub alive: bool,
    /// An attack window or attack cycle is running.
    pub attacking: bool,
    /// The hurt window is running.
    pub hurt: bool,
    /// Standing on ground.
    pub grounded: bool,
    /// Sliding down a wall.
    pub wall_sliding: bool,
    /// Vertical velocity.
    pub vertical_velocity: f32,
    /// Horizontal speed (magnitude).
    pub horizontal_speed: f32,
    /// Current facing.
    pub facing: Facing,
    /// Tag presented last tick.
    pub previous: Option<AnimationTag>,
}

/// Picks the single animation tag for this tick.
///
/// # Example
///
/// ```
/// use ghostrun_core::actor::Facing;
/// use ghostrun_core::animation::{resolve, AnimState, AnimationInputs};
///
/// let inputs = AnimationInputs {
///     alive: true,
///     attacking: true,
///     hurt: false,
///     grounded: false,
///     wall_sliding: false,
///     vertical_velocity: -4.0,
///     horizontal_speed: 8.0,
///     facing: Facing::Left,
///     previous: None,
/// };
/// let tag = resolve(&inputs);
/// assert_eq!(tag.state, AnimState::Attack);
/// assert_eq!(tag.facing, Facing::Left);
/// ```
#[must_use]
pub fn resolve(inputs: &AnimationInputs) -> AnimationTag {
    let state = if !inputs.alive {
        AnimState::Dead
    } else if inputs.attacking {
        AnimState::Attack
    } else if inputs.hurt {
        AnimState::Hurt
    } else if !inputs.grounded && inputs.vertical_velocity < 0.0 {
        AnimState::Fall
    } else if !inputs.grounded && inputs.vertical_velocity > 0.0 {
        AnimState::Jump
    } else if !inputs.grounded && inputs.wall_sliding {
        inputs.previous.map_or(AnimState::Idle, |tag| tag.state)
    } else if inputs.horizontal_speed > RUN_THRESHOLD {
        AnimState::Run
    } else {
        AnimState::Idle
    };
    AnimationTag::new(state, inputs.facing)
}
