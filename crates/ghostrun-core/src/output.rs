//! Outputs emitted by behaviour phases and the per-tick frame log.
//!
//! Behaviour code never mutates another actor. It emits [`Output`]s that
//! the simulation wraps in [`OutputEnvelope`]s, sorts by
//! `(source, sequence)`, and hands to the resolvers:
//!
//! - [`Output::Damage`]: applied by the damage resolver
//! - [`Output::Spawn`] / [`Output::Despawn`]: projectile lifecycle
//! - [`Output::Cue`], [`Output::Present`], [`Output::Signal`]: written to the
//!   tick's [`Frame`] and forwarded to the sinks
//!
//! # Example
//!
//! ```
//! use ghostrun_core::actor::ActorId;
//! use ghostrun_core::output::{Cue, Output, OutputKind, OutputQueue, OutputSource};
//!
//! let mut queue = OutputQueue::new(7);
//! let actor = ActorId::new(2);
//! queue.push(OutputSource::Actor(actor), Output::Cue(Cue::Footstep { actor }));
//! queue.push(OutputSource::Scene, Output::Cue(Cue::Footstep { actor }));
//!
//! let sorted = queue.into_sorted();
//! assert_eq!(sorted[0].source(), OutputSource::Scene);
//! assert_eq!(sorted[1].tick(), 7);
//! assert_eq!(sorted[1].kind(), OutputKind::Feedback);
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::actor::{ActorId, ActorKind};
use crate::ai::EscortMode;
use crate::animation::AnimationTag;
use crate::combat::{DamageEvent, Knockback, ProjectileSpec};

// =============================================================================
// Feedback
// =============================================================================

/// Fire-and-forget audio/VFX cues.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Cue {
    /// An actor took damage.
    Hit {
        /// Damaged actor.
        target: ActorId,
    },
    /// An actor died.
    Death {
        /// Dead actor.
        actor: ActorId,
    },
    /// Something exploded.
    Explosion {
        /// Blast centre.
        position: Vec2,
    },
    /// A footstep while running.
    Footstep {
        /// Running actor.
        actor: ActorId,
    },
    /// An attack started.
    Attack {
        /// Attacker.
        actor: ActorId,
    },
    /// A projectile was fired.
    Shot {
        /// Shooter.
        actor: ActorId,
    },
    /// The boss launched a bomb.
    BombLaunch {
        /// Boss.
        actor: ActorId,
    },
    /// A portal opened.
    PortalOpen {
        /// Teleporting actor.
        actor: ActorId,
        /// Portal position.
        position: Vec2,
    },
    /// A portal closed.
    PortalClose {
        /// Teleporting actor.
        actor: ActorId,
        /// Portal position.
        position: Vec2,
    },
    /// A checkpoint was activated.
    CheckpointActivated {
        /// Checkpoint position.
        position: Vec2,
    },
    /// An actor came back.
    Respawn {
        /// Respawned actor.
        actor: ActorId,
    },
}

/// Colour family of a damage flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlashColor {
    /// Took damage.
    Damage,
    /// Fuse lit before an explosion.
    Fuse,
}

/// Portal animation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortalPhase {
    /// Portal opening at the departure point.
    Opening,
    /// Portal closing at the arrival point.
    Closing,
}

/// Presentation hints for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Presentation {
    /// The actor's animation tag changed.
    Animation {
        /// Actor.
        actor: ActorId,
        /// New tag.
        tag: AnimationTag,
    },
    /// Flash the sprite.
    DamageFlash {
        /// Actor.
        actor: ActorId,
        /// Colour family.
        color: FlashColor,
        /// Seconds.
        duration: f32,
    },
    /// Knockback applied.
    Knockback {
        /// Actor.
        actor: ActorId,
        /// Shove.
        knockback: Knockback,
    },
    /// Portal visual.
    Portal {
        /// Teleporting actor.
        actor: ActorId,
        /// Stage.
        phase: PortalPhase,
        /// Portal position.
        position: Vec2,
    },
    /// The escort changed mode.
    EscortStatus {
        /// Ally.
        actor: ActorId,
        /// New mode.
        mode: EscortMode,
    },
}

/// Gameplay notifications for other systems and the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Signal {
    /// The player died. Encounters reset on this.
    PlayerDied {
        /// Player.
        actor: ActorId,
    },
    /// The escorted ally died.
    AllyDied {
        /// Ally.
        actor: ActorId,
    },
    /// Any actor died.
    ActorDied {
        /// Actor.
        actor: ActorId,
        /// Its kind.
        kind: ActorKind,
    },
    /// An actor left the scene for good.
    ActorRemoved {
        /// Actor.
        actor: ActorId,
        /// Its kind.
        kind: ActorKind,
    },
    /// A player or ally respawned.
    Respawned {
        /// Actor.
        actor: ActorId,
        /// Respawn position.
        position: Vec2,
    },
    /// A defeated boss left a reward.
    DropSpawned {
        /// Drop position.
        position: Vec2,
    },
    /// The checkpoint moved.
    CheckpointActivated {
        /// New checkpoint.
        position: Vec2,
    },
    /// The boss started its attack loop.
    BossEngaged {
        /// Boss.
        actor: ActorId,
    },
    /// The boss encounter was reset.
    BossReset {
        /// Boss.
        actor: ActorId,
    },
}

// =============================================================================
// Output
// =============================================================================

/// Resolver routing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputKind {
    /// Damage events.
    Damage,
    /// Spawns and despawns.
    Lifecycle,
    /// Cues, presentation hints and signals.
    Feedback,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Damage => write!(f, "Damage"),
            Self::Lifecycle => write!(f, "Lifecycle"),
            Self::Feedback => write!(f, "Feedback"),
        }
    }
}

/// A proposed effect.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Damage one actor.
    Damage(DamageEvent),
    /// Spawn a projectile.
    Spawn(ProjectileSpec),
    /// Remove an actor (spent projectiles).
    Despawn(ActorId),
    /// Audio/VFX cue.
    Cue(Cue),
    /// Presentation hint.
    Present(Presentation),
    /// Gameplay signal.
    Signal(Signal),
}

impl Output {
    /// Routing category.
    #[must_use]
    pub const fn kind(&self) -> OutputKind {
        match self {
            Self::Damage(_) => OutputKind::Damage,
            Self::Spawn(_) | Self::Despawn(_) => OutputKind::Lifecycle,
            Self::Cue(_) | Self::Present(_) | Self::Signal(_) => OutputKind::Feedback,
        }
    }
}

impl From<DamageEvent> for Output {
    fn from(event: DamageEvent) -> Self {
        Self::Damage(event)
    }
}

impl From<Cue> for Output {
    fn from(cue: Cue) -> Self {
        Self::Cue(cue)
    }
}

impl From<Presentation> for Output {
    fn from(presentation: Presentation) -> Self {
        Self::Present(presentation)
    }
}

impl From<Signal> for Output {
    fn from(signal: Signal) -> Self {
        Self::Signal(signal)
    }
}

// =============================================================================
// Envelope
// =============================================================================

/// Who emitted an output.
///
/// `Scene` (host-queued effects) sorts before every actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OutputSource {
    /// Queued by the host.
    Scene,
    /// Emitted by an actor's behaviour.
    Actor(ActorId),
}

impl fmt::Display for OutputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scene => write!(f, "scene"),
            Self::Actor(id) => write!(f, "actor:{id}"),
        }
    }
}

/// An output with its ordering metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputEnvelope {
    output: Output,
    source: OutputSource,
    tick: u64,
    sequence: u32,
}

impl OutputEnvelope {
    /// Wraps `output`.
    #[must_use]
    pub const fn new(output: Output, source: OutputSource, tick: u64, sequence: u32) -> Self {
        Self {
            output,
            source,
            tick,
            sequence,
        }
    }

    /// The output.
    #[must_use]
    pub const fn output(&self) -> &Output {
        &self.output
    }

    /// Emitter.
    #[must_use]
    pub const fn source(&self) -> OutputSource {
        self.source
    }

    /// Tick of emission.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Per-source emission index within the tick.
    #[must_use]
    pub const fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Routing category.
    #[must_use]
    pub const fn kind(&self) -> OutputKind {
        self.output.kind()
    }
}

/// Collects one tick's outputs and numbers them per source.
#[derive(Debug, Default)]
pub struct OutputQueue {
    tick: u64,
    envelopes: Vec<OutputEnvelope>,
    sequences: BTreeMap<OutputSource, u32>,
}

impl OutputQueue {
    /// Empty queue for `tick`.
    #[must_use]
    pub fn new(tick: u64) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }

    /// Appends one output.
    pub fn push(&mut self, source: OutputSource, output: Output) {
        let sequence = self.sequences.entry(source).or_insert(0);
        self.envelopes
            .push(OutputEnvelope::new(output, source, self.tick, *sequence));
        *sequence += 1;
    }

    /// Appends every output from one source.
    pub fn extend(&mut self, source: OutputSource, outputs: impl IntoIterator<Item = Output>) {
        for output in outputs {
            self.push(source, output);
        }
    }

    /// Number of queued outputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.envelopes.len()
    }

    /// True if nothing was queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.envelopes.is_empty()
    }

    /// The outputs ordered by `(source, sequence)`.
    #[must_use]
    pub fn into_sorted(mut self) -> Vec<OutputEnvelope> {
        self.envelopes
            .sort_by(|a, b| (a.source, a.sequence).cmp(&(b.source, b.sequence)));
        self.envelopes
    }
}

// =============================================================================
// Frame
// =============================================================================

/// Everything a tick produced for the outside world.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Tick number.
    pub tick: u64,
    /// Audio/VFX cues in emission order.
    pub cues: Vec<Cue>,
    /// Presentation hints in emission order.
    pub presentations: Vec<Presentation>,
    /// Gameplay signals in emission order.
    pub signals: Vec<Signal>,
}

impl Frame {
    /// Empty frame for `tick`.
    #[must_use]
    pub fn new(tick: u64) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }

    /// Records a feedback output. Other outputs are ignored.
    pub fn record(&mut self, output: &Output) {
        match *output {
            Output::Cue(cue) => self.cues.push(cue),
            Output::Present(presentation) => self.presentations.push(presentation),
            Output::Signal(signal) => self.signals.push(signal),
            Output::Damage(_) | Output::Spawn(_) | Output::Despawn(_) => {}
        }
    }

    /// True if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty() && self.presentations.is_empty() && self.signals.is_empty()
    }

    /// Ids of players that died this tick.
    pub fn dead_players(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.signals.iter().filter_map(|signal| match signal {
            Signal::PlayerDied { actor } => Some(*actor),
            _ => None,
        })
    }
}
