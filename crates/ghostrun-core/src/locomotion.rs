//! Locomotion for ground-bound actors.
//!
//! One call to [`step`] per actor per tick turns a [`MoveIntent`] into
//! velocity and position, using only terrain probes:
//!
//! 1. Probe ground (two foot rays) and wall (one forward ray)
//! 2. Horizontal velocity from the input axis, unless staggered
//! 3. Jump from the ground, or wall jump while sliding
//! 4. Gravity, capped at terminal fall speed
//! 5. Wall slide caps the fall speed while pressing into a wall in the air
//! 6. Step climb over low ledges (ground-bound actors only)
//! 7. Sweep the body along each axis, stopping at terrain
//!
//! # Example
//!
//! ```
//! use ghostrun_core::locomotion::{self, LocomotionParams, MoveIntent};
//! use ghostrun_core::actor::{Body, Transform};
//! use ghostrun_core::config::SimConfig;
//! use ghostrun_core::terrain::BoxTerrain;
//! use glam::Vec2;
//!
//! let config = SimConfig::default();
//! let params = LocomotionParams::player(&config);
//! let terrain = BoxTerrain::flat(0.0);
//! let mut transform = Transform::new(Vec2::new(0.0, 0.9), config.player.half_extents);
//! let mut body = Body::default();
//!
//! locomotion::step(&mut transform, &mut body, MoveIntent::walk(1.0), &params, &terrain, config.dt);
//! assert!(body.grounded);
//! assert!((body.velocity.x - 8.0).abs() < 1e-6);
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::actor::{Body, Facing, Transform};
use crate::config::{ArchetypeStats, SimConfig};
use crate::layers::Layers;
use crate::terrain::TerrainProbe;

/// Probes start this far inside the body so surfaces flush with it register.
pub const SKIN: f32 = 0.02;
/// Height above the feet of the lower step-climb probe and the lowest sweep probe.
pub const STEP_PROBE_LIFT: f32 = 0.05;

/// Wall slide and wall jump tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallMovement {
    /// Vertical wall-jump impulse.
    pub jump_vertical: f32,
    /// Horizontal wall-jump impulse, away from the wall.
    pub jump_horizontal: f32,
    /// Fall-speed cap while sliding.
    pub slide_speed: f32,
    /// Horizontal-input lockout after a wall jump.
    pub lock: f32,
}

/// Per-actor locomotion tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocomotionParams {
    /// Horizontal speed at full input.
    pub run_speed: f32,
    /// Ground jump impulse; zero disables jumping.
    pub jump_impulse: f32,
    /// Wall movement, if the actor can wall slide.
    pub wall: Option<WallMovement>,
    /// Length of the foot probes.
    pub ground_probe_distance: f32,
    /// Horizontal offset of each foot probe.
    pub foot_offset: f32,
    /// Forward offset of the wall probe origin.
    pub wall_probe_offset: f32,
    /// Length of the wall probe (and step-climb probes).
    pub wall_probe_distance: f32,
    /// Step height for ground-bound actors.
    pub step_height: Option<f32>,
    /// Downward acceleration.
    pub gravity: f32,
    /// Terminal fall speed.
    pub max_fall_speed: f32,
    /// Horizontal-input lockout after knockback.
    pub stagger: f32,
}

impl LocomotionParams {
    /// Player movement: run, jump, wall slide and wall jump.
    #[must_use]
    pub fn player(config: &SimConfig) -> Self {
        let tuning = &config.player;
        Self {
            run_speed: tuning.run_speed,
            jump_impulse: tuning.jump_impulse,
            wall: Some(WallMovement {
                jump_vertical: tuning.wall_jump_vertical,
                jump_horizontal: tuning.wall_jump_horizontal,
                slide_speed: tuning.wall_slide_speed,
                lock: config.wall_jump_lock,
            }),
            ground_probe_distance: tuning.ground_probe_distance,
            foot_offset: tuning.foot_offset,
            wall_probe_offset: tuning.wall_probe_offset,
            wall_probe_distance: tuning.wall_probe_distance,
            step_height: None,
            gravity: config.gravity,
            max_fall_speed: config.max_fall_speed,
            stagger: config.knockback_stagger,
        }
    }

    /// Ally movement: walk and step climb, no jumping.
    #[must_use]
    pub fn ally(config: &SimConfig) -> Self {
        let tuning = &config.ally;
        Self {
            run_speed: tuning.walk_speed,
            jump_impulse: 0.0,
            wall: None,
            foot_offset: tuning.half_extents.x * 0.75,
            wall_probe_offset: tuning.half_extents.x,
            step_height: Some(tuning.step_height),
            ..Self::player(config)
        }
    }

    /// Enemy movement: chase speed, optional hop and step climb.
    #[must_use]
    pub fn enemy(stats: &ArchetypeStats, config: &SimConfig) -> Self {
        Self {
            run_speed: stats.move_speed,
            jump_impulse: stats.hop_impulse.unwrap_or(0.0),
            wall: None,
            foot_offset: stats.half_extents.x * 0.75,
            wall_probe_offset: stats.half_extents.x,
            step_height: stats.step_height,
            ..Self::player(config)
        }
    }
}

/// What an actor wants to do this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    /// Horizontal direction: `-1.0`, `0.0` or `1.0`.
    pub axis: f32,
    /// Jump (or hop) requested.
    pub jump: bool,
}

impl MoveIntent {
    /// Stand still.
    pub const IDLE: Self = Self {
        axis: 0.0,
        jump: false,
    };

    /// Move along `axis` without jumping.
    #[must_use]
    pub const fn walk(axis: f32) -> Self {
        Self { axis, jump: false }
    }

    /// Adds a jump request.
    #[must_use]
    pub const fn with_jump(mut self, jump: bool) -> Self {
        self.jump = jump;
        self
    }
}

/// Notable things that happened during a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocomotionReport {
    /// Left the ground with a jump.
    pub jumped: bool,
    /// Jumped off a wall.
    pub wall_jumped: bool,
    /// Climbed a step.
    pub climbed: bool,
    /// Touched down this tick.
    pub landed: bool,
}

// =============================================================================
// Probes
// =============================================================================

/// Gap between the feet and the nearest ground under either foot, if the
/// ground is within the probe distance.
#[must_use]
pub fn ground_gap(
    transform: &Transform,
    params: &LocomotionParams,
    terrain: &dyn TerrainProbe,
) -> Option<f32> {
    let feet = transform.feet();
    [-1.0_f32, 1.0]
        .into_iter()
        .filter_map(|side| {
            let origin = Vec2::new(
                transform.position.x + side * params.foot_offset,
                feet + SKIN,
            );
            terrain.probe(
                origin,
                Vec2::NEG_Y,
                params.ground_probe_distance + SKIN,
                Layers::GROUND,
            )
        })
        .map(|hit| hit.distance - SKIN)
        .min_by(f32::total_cmp)
}

/// True if the forward wall probe is blocked.
#[must_use]
pub fn probe_wall(
    transform: &Transform,
    params: &LocomotionParams,
    terrain: &dyn TerrainProbe,
) -> bool {
    let direction = transform.facing.direction();
    let origin = transform.position + direction * params.wall_probe_offset;
    terrain
        .probe(origin, direction, params.wall_probe_distance, Layers::GROUND)
        .is_some()
}

/// Lifts a grounded actor onto a ledge no taller than its step height.
///
/// Both probes run every call: a lower one just above the feet and an upper
/// one a step height higher. The actor climbs when the lower probe is
/// blocked and the upper one is clear, then stays latched until the lower
/// probe clears, so a persistent obstruction lifts it exactly once.
pub fn step_climb(
    transform: &mut Transform,
    body: &mut Body,
    axis: f32,
    params: &LocomotionParams,
    terrain: &dyn TerrainProbe,
) -> bool {
    let Some(step) = params.step_height else {
        return false;
    };
    if axis == 0.0 || !body.grounded {
        body.step_latched = false;
        return false;
    }

    let direction = Vec2::new(axis.signum(), 0.0);
    let edge_x = transform.position.x + direction.x * (transform.half_extents.x - SKIN);
    let reach = params.wall_probe_distance + SKIN;
    let lower_origin = Vec2::new(edge_x, transform.feet() + STEP_PROBE_LIFT);
    let upper_origin = lower_origin + Vec2::new(0.0, step);

    let lower = terrain
        .probe(lower_origin, direction, reach, Layers::GROUND)
        .is_some();
    let upper = terrain
        .probe(upper_origin, direction, reach, Layers::GROUND)
        .is_some();

    if !lower {
        body.step_latched = false;
        return false;
    }
    if body.step_latched || upper {
        return false;
    }

    transform.position.y += step;
    body.step_latched = true;
    true
}

// =============================================================================
// Step
// =============================================================================

/// Advances one actor by one tick.
pub fn step(
    transform: &mut Transform,
    body: &mut Body,
    intent: MoveIntent,
    params: &LocomotionParams,
    terrain: &dyn TerrainProbe,
    dt: f32,
) -> LocomotionReport {
    let mut report = LocomotionReport::default();
    let was_grounded = body.grounded;

    let gap = ground_gap(transform, params, terrain);
    body.grounded = gap.is_some();
    if let Some(gap) = gap {
        if body.velocity.y <= 0.0 {
            transform.position.y -= gap;
        }
    }

    // Side of the wall slid on last tick; turning away must not retarget the jump.
    let slide_side = transform.facing;
    if body.stagger.is_running() {
        body.stagger.tick(dt);
    } else {
        body.velocity.x = intent.axis * params.run_speed;
        transform.facing = Facing::from_axis(intent.axis, transform.facing);
    }
    body.touching_wall = probe_wall(transform, params, terrain);

    if intent.jump {
        if body.grounded && body.velocity.y <= 0.0 && params.jump_impulse > 0.0 {
            body.velocity.y = params.jump_impulse;
            body.grounded = false;
            report.jumped = true;
        } else if let Some(wall) = params.wall.filter(|_| body.wall_sliding) {
            let away = -slide_side.sign();
            body.velocity = Vec2::new(away * wall.jump_horizontal, wall.jump_vertical);
            transform.facing = slide_side.flipped();
            body.stagger.start(wall.lock);
            report.wall_jumped = true;
        }
    }

    if body.grounded && body.velocity.y <= 0.0 {
        body.velocity.y = 0.0;
    } else {
        body.velocity.y = (body.velocity.y - params.gravity * dt).max(-params.max_fall_speed);
    }

    body.wall_sliding = false;
    if let Some(wall) = params.wall {
        let pressing_in = intent.axis * transform.facing.sign() > 0.0;
        if !report.wall_jumped && !body.grounded && body.touching_wall && pressing_in {
            body.wall_sliding = true;
            body.velocity.y = body.velocity.y.max(-wall.slide_speed);
        }
    }

    report.climbed = step_climb(transform, body, intent.axis, params, terrain);

    sweep(transform, body, terrain, dt);
    report.landed = body.grounded && !was_grounded;
    report
}

/// Moves the body along x then y, stopping at the first terrain contact.
fn sweep(transform: &mut Transform, body: &mut Body, terrain: &dyn TerrainProbe, dt: f32) {
    let half = transform.half_extents;

    let dx = body.velocity.x * dt;
    if dx != 0.0 {
        let direction = Vec2::new(dx.signum(), 0.0);
        let edge_x = transform.position.x + direction.x * (half.x - SKIN);
        let feet = transform.feet();
        let heights = [
            feet + STEP_PROBE_LIFT,
            transform.position.y,
            transform.position.y + half.y - SKIN,
        ];
        let blocked = heights
            .into_iter()
            .filter_map(|y| {
                terrain.probe(
                    Vec2::new(edge_x, y),
                    direction,
                    dx.abs() + SKIN,
                    Layers::GROUND,
                )
            })
            .map(|hit| hit.distance)
            .min_by(f32::total_cmp);
        transform.position.x += match blocked {
            Some(distance) => direction.x * (distance - SKIN).max(0.0),
            None => dx,
        };
    }

    let dy = body.velocity.y * dt;
    if dy != 0.0 {
        let direction = Vec2::new(0.0, dy.signum());
        let edge_y = if dy < 0.0 {
            transform.feet() + SKIN
        } else {
            transform.position.y + half.y - SKIN
        };
        let blocked = [-1.0_f32, 1.0]
            .into_iter()
            .filter_map(|side| {
                let origin = Vec2::new(transform.position.x + side * (half.x - SKIN), edge_y);
                terrain.probe(origin, direction, dy.abs() + SKIN, Layers::GROUND)
            })
            .map(|hit| hit.distance)
            .min_by(f32::total_cmp);
        match blocked {
            Some(distance) => {
                transform.position.y += direction.y * (distance - SKIN).max(0.0);
                if dy < 0.0 {
                    body.grounded = true;
                }
                body.velocity.y = 0.0;
            }
            None => transform.position.y += dy,
        }
    }
}
