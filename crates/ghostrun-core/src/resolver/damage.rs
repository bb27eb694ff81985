//! Damage resolver: the shared take-damage contract.
//!
//! For every [`DamageEvent`], in sorted order:
//!
//! 1. Drop it if the target is gone, has no health, or is not alive
//! 2. A lit bomb slime ignores everything but explosions
//! 3. Subtract health (clamped); a wound starts the hurt flash, knockback
//!    and stagger, and makes the boss teleport
//! 4. A killing blow freezes the actor and emits death cues and signals
//!    exactly once
//!
//! A second killing blow in the same tick hits a dead actor and is ignored,
//! so death effects never replay.

use tracing::{debug, info, trace};

use crate::actor::{Actor, ActorId, ActorInner, ActorKind};
use crate::ai::AiState;
use crate::combat::{DamageEvent, DamageKind, DamageOutcome};
use crate::output::{Cue, FlashColor, Output, OutputEnvelope, OutputKind, PortalPhase, Presentation, Signal};
use crate::scene::Scene;

use super::Resolver;

/// Applies damage events.
///
/// # Example
///
/// ```
/// use ghostrun_core::resolver::{DamageResolver, Resolver};
/// use ghostrun_core::output::OutputKind;
///
/// let resolver = DamageResolver::new();
/// assert_eq!(resolver.handles(), &[OutputKind::Damage]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DamageResolver;

impl DamageResolver {
    /// Creates the resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Applies one event to the scene.
    pub fn apply(scene: &mut Scene, event: &DamageEvent) {
        let source_friendly = event
            .source()
            .and_then(|source| scene.actors.get(source))
            .is_some_and(|source| matches!(source.kind(), ActorKind::Player | ActorKind::Ally));
        let hurt_duration = scene.config.player.hurt_duration;
        let stagger = scene.config.knockback_stagger;

        let Some(actor) = scene.actors.get_mut(event.target()) else {
            trace!(target = %event.target(), "damage target is gone");
            return;
        };
        if actor
            .as_enemy()
            .is_some_and(|enemy| enemy.is_exploding() && event.kind() != DamageKind::Explosion)
        {
            trace!(target = %event.target(), "lit bomb ignores non-explosion damage");
            return;
        }
        let Some(health) = actor.health_mut() else {
            return;
        };

        let mut feedback = Vec::new();
        match health.take_damage(event.amount()) {
            DamageOutcome::Ignored => return,
            DamageOutcome::Wounded { .. } => {
                wound(actor, event, hurt_duration, stagger, source_friendly, &mut feedback);
            }
            DamageOutcome::Killed => kill(actor, &mut feedback),
        }
        for output in &feedback {
            scene.frame.record(output);
        }
    }
}

fn flash_duration(actor: &Actor, hurt_duration: f32) -> f32 {
    match actor.inner() {
        ActorInner::Enemy(enemy) => enemy.stats.flash_duration,
        ActorInner::Boss(boss) => boss.state.tuning().flash_duration,
        _ => hurt_duration,
    }
}

fn wound(
    actor: &mut Actor,
    event: &DamageEvent,
    hurt_duration: f32,
    stagger: f32,
    source_friendly: bool,
    feedback: &mut Vec<Output>,
) {
    let id = actor.id();
    let flash = flash_duration(actor, hurt_duration);
    if let Some(health) = actor.health_mut() {
        health.mark_hurt(flash);
    }
    feedback.push(Cue::Hit { target: id }.into());
    feedback.push(
        Presentation::DamageFlash {
            actor: id,
            color: FlashColor::Damage,
            duration: flash,
        }
        .into(),
    );

    if let Some(knockback) = event.knockback() {
        actor.body.velocity.x = knockback.direction * knockback.force;
        actor.body.stagger.start(stagger);
        feedback.push(Presentation::Knockback { actor: id, knockback }.into());
    }

    let position = actor.transform.position;
    if let Some(boss) = actor.as_boss_mut() {
        if source_friendly && boss.state.engage() {
            info!(boss = %id, "boss engaged by player-side hit");
            feedback.push(Signal::BossEngaged { actor: id }.into());
        }
        if boss.state.begin_teleport() {
            debug!(boss = %id, "boss teleport started");
            feedback.push(Cue::PortalOpen { actor: id, position }.into());
            feedback.push(
                Presentation::Portal {
                    actor: id,
                    phase: PortalPhase::Opening,
                    position,
                }
                .into(),
            );
        }
    }
}

fn kill(actor: &mut Actor, feedback: &mut Vec<Output>) {
    let id: ActorId = actor.id();
    let kind = actor.kind();
    actor.body.freeze();
    match actor.inner_mut() {
        ActorInner::Player(player) => {
            player.combat.reset();
            feedback.push(Signal::PlayerDied { actor: id }.into());
        }
        ActorInner::Ally(_) => feedback.push(Signal::AllyDied { actor: id }.into()),
        ActorInner::Enemy(enemy) => enemy.ai = AiState::Dead,
        ActorInner::Boss(boss) => boss.state.halt(),
        ActorInner::Projectile(_) => {}
    }
    debug!(actor = %id, %kind, "actor died");
    feedback.push(Cue::Death { actor: id }.into());
    feedback.push(Signal::ActorDied { actor: id, kind }.into());
}

impl Resolver for DamageResolver {
    fn handles(&self) -> &[OutputKind] {
        &[OutputKind::Damage]
    }

    fn resolve(&self, outputs: &[&OutputEnvelope], scene: &mut Scene) {
        for envelope in outputs {
            if let Output::Damage(event) = envelope.output() {
                Self::apply(scene, event);
            }
        }
    }
}
