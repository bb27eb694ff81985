//! Combat: health, damage delivery, attack scheduling and projectiles.
//!
//! - [`Health`]: clamped health pool and the Alive → Dead → Respawning/Removed machine
//! - [`DamageEvent`]: the immutable cross-actor damage message
//! - [`CombatScheduler`]: player cooldowns, combo counting and attack windows
//! - [`ProjectileComponents`]: straight or ballistic single-hit projectiles

mod damage;
mod health;
mod projectile;
mod scheduler;

pub use damage::{DamageEvent, DamageKind, Knockback};
pub use health::{DamageOutcome, Fate, Health, LifeState, LifeTick};
pub use projectile::{
    ProjectileComponents, ProjectileKind, ProjectileSpec, ProjectileStep, PROJECTILE_HALF_EXTENTS,
};
pub use scheduler::{AttackRequest, AttackWindow, CombatScheduler, WindowEvent, WindowPhase};
