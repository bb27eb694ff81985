//! Simulation configuration.
//!
//! All tunables live in one [`SimConfig`] tree. Every struct derives serde
//! with `#[serde(default)]`, so a JSON document only has to name the values
//! it overrides; everything else falls back to the reference content below.
//!
//! # Example
//!
//! ```
//! use ghostrun_core::config::SimConfig;
//!
//! let config = SimConfig::from_json(r#"{ "player": { "max_health": 7 } }"#).unwrap();
//! assert_eq!(config.player.max_health, 7);
//! assert!((config.player.run_speed - 8.0).abs() < f32::EPSILON);
//! ```

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::actor::Archetype;
use crate::ai::TargetPriority;
use crate::error::{ConfigError, ConfigResult};

/// Default fixed tick length in seconds.
pub const DEFAULT_DT: f32 = 1.0 / 60.0;
/// Default gravity for ground actors, units/s².
pub const DEFAULT_GRAVITY: f32 = 30.0;
/// Default terminal fall speed, units/s.
pub const DEFAULT_MAX_FALL_SPEED: f32 = 20.0;
/// Default horizontal-input lockout after knockback, seconds.
pub const DEFAULT_KNOCKBACK_STAGGER: f32 = 0.1;
/// Default horizontal-input lockout after a wall jump, seconds.
pub const DEFAULT_WALL_JUMP_LOCK: f32 = 0.15;

// =============================================================================
// Root
// =============================================================================

/// Root configuration for a [`Simulation`](crate::simulation::Simulation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed tick length in seconds.
    pub dt: f32,
    /// Downward acceleration applied to airborne ground actors.
    pub gravity: f32,
    /// Terminal fall speed.
    pub max_fall_speed: f32,
    /// Horizontal-input lockout after receiving knockback.
    pub knockback_stagger: f32,
    /// Horizontal-input lockout after a wall jump.
    pub wall_jump_lock: f32,
    /// Player tuning.
    pub player: PlayerTuning,
    /// Escorted ally tuning.
    pub ally: AllyTuning,
    /// Per-archetype overrides. Archetypes not listed use their presets.
    pub archetypes: BTreeMap<Archetype, ArchetypeStats>,
    /// Boss tuning.
    pub boss: BossTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            gravity: DEFAULT_GRAVITY,
            max_fall_speed: DEFAULT_MAX_FALL_SPEED,
            knockback_stagger: DEFAULT_KNOCKBACK_STAGGER,
            wall_jump_lock: DEFAULT_WALL_JUMP_LOCK,
            player: PlayerTuning::default(),
            ally: AllyTuning::default(),
            archetypes: BTreeMap::new(),
            boss: BossTuning::default(),
        }
    }
}

impl SimConfig {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Uses a different tick length.
    #[must_use]
    pub fn with_dt(mut self, dt: f32) -> Self {
        self.dt = dt;
        self
    }

    /// Overrides one archetype's stats.
    #[must_use]
    pub fn with_archetype(mut self, archetype: Archetype, stats: ArchetypeStats) -> Self {
        self.archetypes.insert(archetype, stats);
        self
    }

    /// Effective stats for an archetype: the override if present, else the preset.
    #[must_use]
    pub fn archetype(&self, archetype: Archetype) -> ArchetypeStats {
        self.archetypes
            .get(&archetype)
            .cloned()
            .unwrap_or_else(|| ArchetypeStats::preset(archetype))
    }

    /// Checks every value against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::Invalid`] found.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.dt.is_nan() || self.dt <= 0.0 {
            return Err(ConfigError::invalid("dt", "must be positive"));
        }
        non_negative("gravity", self.gravity)?;
        non_negative("max_fall_speed", self.max_fall_speed)?;
        non_negative("knockback_stagger", self.knockback_stagger)?;
        non_negative("wall_jump_lock", self.wall_jump_lock)?;
        self.player.validate()?;
        self.ally.validate()?;
        for (archetype, stats) in &self.archetypes {
            stats.validate(&format!("archetypes.{archetype}"))?;
        }
        self.boss.validate()
    }
}

fn non_negative(field: &str, value: f32) -> ConfigResult<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be non-negative"))
    }
}

fn positive_health(field: &str, value: u32) -> ConfigResult<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be at least 1"))
    }
}

// =============================================================================
// Player
// =============================================================================

/// Player movement, health and ability tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Maximum (and respawn) health.
    pub max_health: u32,
    /// Horizontal run speed.
    pub run_speed: f32,
    /// Vertical jump impulse.
    pub jump_impulse: f32,
    /// Vertical component of a wall jump.
    pub wall_jump_vertical: f32,
    /// Horizontal component of a wall jump, away from the wall.
    pub wall_jump_horizontal: f32,
    /// Constant fall speed while wall sliding.
    pub wall_slide_speed: f32,
    /// Length of the two downward foot probes.
    pub ground_probe_distance: f32,
    /// Horizontal offset of each foot probe from centre.
    pub foot_offset: f32,
    /// Horizontal offset of the wall probe origin in the facing direction.
    pub wall_probe_offset: f32,
    /// Length of the wall probe.
    pub wall_probe_distance: f32,
    /// Collision half extents.
    pub half_extents: Vec2,
    /// Seconds between death and respawn.
    pub respawn_delay: f32,
    /// Length of the hurt presentation after taking damage.
    pub hurt_duration: f32,
    /// Seconds between footstep cues while running.
    pub footstep_interval: f32,
    /// Melee attack tuning.
    pub attack: AttackTuning,
    /// Ghost bomb ability tuning.
    pub ghost_bomb: GhostBombTuning,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 5,
            run_speed: 8.0,
            jump_impulse: 14.0,
            wall_jump_vertical: 14.0,
            wall_jump_horizontal: 10.0,
            wall_slide_speed: 1.5,
            ground_probe_distance: 0.2,
            foot_offset: 0.3,
            wall_probe_offset: 0.4,
            wall_probe_distance: 0.1,
            half_extents: Vec2::new(0.4, 0.9),
            respawn_delay: 1.0,
            hurt_duration: 0.2,
            footstep_interval: 0.3,
            attack: AttackTuning::default(),
            ghost_bomb: GhostBombTuning::default(),
        }
    }
}

impl PlayerTuning {
    fn validate(&self) -> ConfigResult<()> {
        positive_health("player.max_health", self.max_health)?;
        for (field, value) in [
            ("player.run_speed", self.run_speed),
            ("player.jump_impulse", self.jump_impulse),
            ("player.wall_jump_vertical", self.wall_jump_vertical),
            ("player.wall_jump_horizontal", self.wall_jump_horizontal),
            ("player.wall_slide_speed", self.wall_slide_speed),
            ("player.ground_probe_distance", self.ground_probe_distance),
            ("player.wall_probe_distance", self.wall_probe_distance),
            ("player.respawn_delay", self.respawn_delay),
            ("player.hurt_duration", self.hurt_duration),
            ("player.footstep_interval", self.footstep_interval),
        ] {
            non_negative(field, value)?;
        }
        self.attack.validate()?;
        self.ghost_bomb.validate()
    }
}

/// Melee combo tuning for the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackTuning {
    /// Cooldown after an ordinary attack.
    pub base_cooldown: f32,
    /// Cooldown after the attack that completes a combo.
    pub overload_cooldown: f32,
    /// Seconds without attacking before the combo counter resets.
    pub combo_window: f32,
    /// Attacks per combo; reaching it applies the overload cooldown.
    pub overload_threshold: u32,
    /// Delay between accepting an attack and its hitbox check.
    pub activation_delay: f32,
    /// How long the attack window stays open after the check.
    pub active_duration: f32,
    /// Forward offset of the hitbox centre.
    pub hitbox_offset: f32,
    /// Hitbox half extents.
    pub hitbox_half_extents: Vec2,
    /// Damage per hit.
    pub damage: u32,
    /// Knockback force applied to each struck target.
    pub knockback_force: f32,
}

impl Default for AttackTuning {
    fn default() -> Self {
        Self {
            base_cooldown: 0.5,
            overload_cooldown: 1.5,
            combo_window: 4.0,
            overload_threshold: 4,
            activation_delay: 0.1,
            active_duration: 0.15,
            hitbox_offset: 0.8,
            hitbox_half_extents: Vec2::new(0.6, 0.5),
            damage: 1,
            knockback_force: 5.0,
        }
    }
}

impl AttackTuning {
    fn validate(&self) -> ConfigResult<()> {
        if self.overload_threshold == 0 {
            return Err(ConfigError::invalid(
                "player.attack.overload_threshold",
                "must be at least 1",
            ));
        }
        for (field, value) in [
            ("player.attack.base_cooldown", self.base_cooldown),
            ("player.attack.overload_cooldown", self.overload_cooldown),
            ("player.attack.combo_window", self.combo_window),
            ("player.attack.activation_delay", self.activation_delay),
            ("player.attack.active_duration", self.active_duration),
            ("player.attack.knockback_force", self.knockback_force),
        ] {
            non_negative(field, value)?;
        }
        Ok(())
    }
}

/// Ghost bomb ability tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostBombTuning {
    /// Cooldown between casts.
    pub cooldown: f32,
    /// Projectile speed.
    pub speed: f32,
    /// Projectile lifetime.
    pub lifetime: f32,
    /// Damage on hit.
    pub damage: u32,
}

impl Default for GhostBombTuning {
    fn default() -> Self {
        Self {
            cooldown: 20.0,
            speed: 8.0,
            lifetime: 5.0,
            damage: 1,
        }
    }
}

impl GhostBombTuning {
    fn validate(&self) -> ConfigResult<()> {
        non_negative("player.ghost_bomb.cooldown", self.cooldown)?;
        non_negative("player.ghost_bomb.speed", self.speed)?;
        non_negative("player.ghost_bomb.lifetime", self.lifetime)
    }
}

// =============================================================================
// Ally
// =============================================================================

/// Escorted ally tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllyTuning {
    /// Maximum (and respawn) health.
    pub max_health: u32,
    /// Walking speed while escorting.
    pub walk_speed: f32,
    /// Height of ledge the ally walks up without jumping.
    pub step_height: f32,
    /// Time to draw the gun after halting.
    pub draw_duration: f32,
    /// Time to holster the gun before walking again.
    pub holster_duration: f32,
    /// Enemies strictly inside this radius can be shot.
    pub gun_range: f32,
    /// Seconds between shots.
    pub fire_cooldown: f32,
    /// Shot speed.
    pub projectile_speed: f32,
    /// Shot lifetime.
    pub projectile_lifetime: f32,
    /// Damage per shot.
    pub projectile_damage: u32,
    /// Seconds between death and respawn.
    pub respawn_delay: f32,
    /// Collision half extents.
    pub half_extents: Vec2,
}

impl Default for AllyTuning {
    fn default() -> Self {
        Self {
            max_health: 10,
            walk_speed: 2.0,
            step_height: 0.5,
            draw_duration: 0.5,
            holster_duration: 0.5,
            gun_range: 15.0,
            fire_cooldown: 0.5,
            projectile_speed: 10.0,
            projectile_lifetime: 3.0,
            projectile_damage: 1,
            respawn_delay: 1.0,
            half_extents: Vec2::new(0.4, 0.9),
        }
    }
}

impl AllyTuning {
    fn validate(&self) -> ConfigResult<()> {
        positive_health("ally.max_health", self.max_health)?;
        for (field, value) in [
            ("ally.walk_speed", self.walk_speed),
            ("ally.step_height", self.step_height),
            ("ally.draw_duration", self.draw_duration),
            ("ally.holster_duration", self.holster_duration),
            ("ally.gun_range", self.gun_range),
            ("ally.fire_cooldown", self.fire_cooldown),
            ("ally.projectile_speed", self.projectile_speed),
            ("ally.projectile_lifetime", self.projectile_lifetime),
            ("ally.respawn_delay", self.respawn_delay),
        ] {
            non_negative(field, value)?;
        }
        Ok(())
    }
}

// =============================================================================
// Enemy archetypes
// =============================================================================

/// Directions an enemy's shot leaves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirePattern {
    /// One shot straight at the target.
    Aimed,
    /// Three shots: left, right and up.
    Omni,
}

/// What an enemy does when its windup elapses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttackKind {
    /// A single forward ray from an offset in front of the enemy.
    Melee {
        /// Ray origin offset in the facing direction.
        probe_offset: f32,
        /// Ray length.
        reach: f32,
        /// Damage to the first friendly actor on the ray.
        damage: u32,
    },
    /// One overlap circle around the enemy; every friendly actor inside is hit.
    Spin {
        /// Circle radius.
        radius: f32,
        /// Damage per target.
        damage: u32,
    },
    /// Spawns projectiles.
    Shoot {
        /// Shot directions.
        pattern: FirePattern,
        /// Projectile speed.
        speed: f32,
        /// Projectile lifetime.
        lifetime: f32,
        /// Damage on hit.
        damage: u32,
        /// Whether shots are destroyed by terrain.
        stops_on_terrain: bool,
    },
    /// Blows up, damaging the player and other slimes, then dies.
    Explode {
        /// Blast radius.
        radius: f32,
        /// Damage per target.
        damage: u32,
    },
}

/// Damage dealt on touch, independent of the attack cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactDamage {
    /// Touch radius around the enemy centre.
    pub radius: f32,
    /// Damage per touch.
    pub damage: u32,
    /// Minimum seconds between touches.
    pub cooldown: f32,
}

/// Data that defines an enemy archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeStats {
    /// Maximum health.
    pub max_health: u32,
    /// Chase speed.
    pub move_speed: f32,
    /// Targets farther than this are ignored.
    pub detection_radius: f32,
    /// Only chase inside this radius. `None` chases anywhere within detection.
    #[serde(default)]
    pub chase_range: Option<f32>,
    /// Attack when the target is at most this far.
    pub attack_range: f32,
    /// ... and strictly farther than this.
    #[serde(default)]
    pub min_attack_range: f32,
    /// Cooldown between attacks, measured from attack start.
    pub attack_cooldown: f32,
    /// Delay from attack start to its effect.
    pub windup: f32,
    /// Delay from attack start until the enemy re-evaluates.
    pub recovery: f32,
    /// What the attack does.
    pub attack: AttackKind,
    /// Hop impulse while chasing on the ground.
    #[serde(default)]
    pub hop_impulse: Option<f32>,
    /// Optional touch damage.
    #[serde(default)]
    pub contact: Option<ContactDamage>,
    /// Whom to prefer when both player and ally are in range.
    #[serde(default)]
    pub priority: TargetPriority,
    /// Length of the damage flash hint.
    pub flash_duration: f32,
    /// Seconds between death and removal.
    pub death_delay: f32,
    /// Collision half extents.
    pub half_extents: Vec2,
    /// Ledge height the enemy walks up without jumping.
    #[serde(default)]
    pub step_height: Option<f32>,
}

impl ArchetypeStats {
    /// Reference stats for an archetype.
    #[must_use]
    pub fn preset(archetype: Archetype) -> Self {
        let slime = Self {
            max_health: 2,
            move_speed: 2.0,
            detection_radius: 6.0,
            chase_range: None,
            attack_range: 1.5,
            min_attack_range: 0.0,
            attack_cooldown: 1.0,
            windup: 0.25,
            recovery: 0.6,
            attack: AttackKind::Melee {
                probe_offset: 0.5,
                reach: 1.0,
                damage: 1,
            },
            hop_impulse: None,
            contact: None,
            priority: TargetPriority::AllyFirst,
            flash_duration: 1.0,
            death_delay: 0.4,
            half_extents: Vec2::new(0.4, 0.35),
            step_height: Some(0.25),
        };

        match archetype {
            Archetype::BlueSlime => Self {
                hop_impulse: Some(1.0),
                ..slime
            },
            Archetype::RedSlime => Self {
                detection_radius: 8.0,
                attack_range: 6.0,
                attack_cooldown: 1.2,
                attack: AttackKind::Shoot {
                    pattern: FirePattern::Aimed,
                    speed: 6.0,
                    lifetime: 4.0,
                    damage: 1,
                    stops_on_terrain: true,
                },
                ..slime
            },
            Archetype::CactusSlime => Self {
                max_health: 3,
                detection_radius: 25.0,
                chase_range: Some(5.0),
                attack_range: 25.0,
                min_attack_range: 5.0,
                attack_cooldown: 3.0,
                windup: 0.0,
                recovery: 0.0,
                attack: AttackKind::Shoot {
                    pattern: FirePattern::Omni,
                    speed: 8.0,
                    lifetime: 5.0,
                    damage: 1,
                    stops_on_terrain: false,
                },
                hop_impulse: Some(1.0),
                contact: Some(ContactDamage {
                    radius: 0.8,
                    damage: 2,
                    cooldown: 1.0,
                }),
                ..slime
            },
            Archetype::BombSlime => Self {
                max_health: 1,
                attack_cooldown: 0.0,
                windup: 0.3,
                recovery: 0.4,
                attack: AttackKind::Explode {
                    radius: 1.5,
                    damage: 2,
                },
                flash_duration: 0.1,
                ..slime
            },
            Archetype::Scientist => Self {
                max_health: 4,
                move_speed: 1.5,
                attack_cooldown: 2.0,
                windup: 0.3,
                recovery: 1.2,
                attack: AttackKind::Spin {
                    radius: 1.5,
                    damage: 1,
                },
                half_extents: Vec2::new(0.4, 0.9),
                ..slime
            },
        }
    }

    fn validate(&self, prefix: &str) -> ConfigResult<()> {
        positive_health(&format!("{prefix}.max_health"), self.max_health)?;
        for (field, value) in [
            ("move_speed", self.move_speed),
            ("detection_radius", self.detection_radius),
            ("attack_range", self.attack_range),
            ("min_attack_range", self.min_attack_range),
            ("attack_cooldown", self.attack_cooldown),
            ("windup", self.windup),
            ("recovery", self.recovery),
            ("flash_duration", self.flash_duration),
            ("death_delay", self.death_delay),
        ] {
            non_negative(&format!("{prefix}.{field}"), value)?;
        }
        if self.recovery < self.windup {
            return Err(ConfigError::invalid(
                format!("{prefix}.recovery"),
                "must not be shorter than windup",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Boss
// =============================================================================

/// Boss tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    /// Maximum health.
    pub max_health: u32,
    /// Seconds between attack starts once engaged.
    pub attack_interval: f32,
    /// Delay between attack start and the shot leaving.
    pub shot_windup: f32,
    /// Bullet speed.
    pub bullet_speed: f32,
    /// Bullet lifetime.
    pub bullet_lifetime: f32,
    /// Bullet damage.
    pub bullet_damage: u32,
    /// Every n-th shot is a bomb.
    pub shots_before_bomb: u32,
    /// Bomb launch speed.
    pub bomb_speed: f32,
    /// Bomb lifetime.
    pub bomb_lifetime: f32,
    /// Bomb damage.
    pub bomb_damage: u32,
    /// Gravity applied to bombs.
    pub bomb_gravity: f32,
    /// Portal-open phase before the boss leaves.
    pub portal_open_duration: f32,
    /// Transit delay between portals.
    pub teleport_delay: f32,
    /// Portal-close phase after arriving.
    pub portal_close_duration: f32,
    /// Length of the damage flash hint.
    pub flash_duration: f32,
    /// Seconds between death and removal.
    pub death_delay: f32,
    /// Whether death leaves a reward drop.
    pub drops_reward: bool,
    /// Collision half extents.
    pub half_extents: Vec2,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            max_health: 40,
            attack_interval: 1.5,
            shot_windup: 0.4,
            bullet_speed: 10.0,
            bullet_lifetime: 10.0,
            bullet_damage: 1,
            shots_before_bomb: 10,
            bomb_speed: 8.0,
            bomb_lifetime: 10.0,
            bomb_damage: 1,
            bomb_gravity: 9.81,
            portal_open_duration: 0.5,
            teleport_delay: 0.2,
            portal_close_duration: 0.5,
            flash_duration: 0.15,
            death_delay: 1.0,
            drops_reward: true,
            half_extents: Vec2::new(1.0, 1.5),
        }
    }
}

impl BossTuning {
    fn validate(&self) -> ConfigResult<()> {
        positive_health("boss.max_health", self.max_health)?;
        for (field, value) in [
            ("boss.attack_interval", self.attack_interval),
            ("boss.shot_windup", self.shot_windup),
            ("boss.bullet_speed", self.bullet_speed),
            ("boss.bullet_lifetime", self.bullet_lifetime),
            ("boss.bomb_speed", self.bomb_speed),
            ("boss.bomb_lifetime", self.bomb_lifetime),
            ("boss.bomb_gravity", self.bomb_gravity),
            ("boss.portal_open_duration", self.portal_open_duration),
            ("boss.teleport_delay", self.teleport_delay),
            ("boss.portal_close_duration", self.portal_close_duration),
            ("boss.flash_duration", self.flash_duration),
            ("boss.death_delay", self.death_delay),
        ] {
            non_negative(field, value)?;
        }
        Ok(())
    }
}
