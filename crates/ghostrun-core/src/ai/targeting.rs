//! Target selection.
//!
//! One rule for every AI actor: filter the player and the ally by detection
//! radius, then pick by a fixed priority. Proximity never breaks the tie.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::actor::ActorId;
use crate::world_view::{ActorSnapshot, WorldView};

/// Which friendly actor wins when both are in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TargetPriority {
    /// The ally, even when the player is closer.
    #[default]
    AllyFirst,
    /// The player, even when the ally is closer.
    PlayerFirst,
    /// Only ever the player.
    PlayerOnly,
}

/// A potential target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Actor id.
    pub id: ActorId,
    /// Position.
    pub position: Vec2,
}

impl From<&ActorSnapshot> for Candidate {
    fn from(snapshot: &ActorSnapshot) -> Self {
        Self {
            id: snapshot.id,
            position: snapshot.position,
        }
    }
}

/// Picks a target among the ally and the player.
///
/// A candidate qualifies when its distance from `origin` is at most
/// `radius`.
///
/// # Example
///
/// ```
/// use ghostrun_core::actor::ActorId;
/// use ghostrun_core::ai::{select_target, Candidate, TargetPriority};
/// use glam::Vec2;
///
/// let ally = Candidate { id: ActorId::new(2), position: Vec2::new(2.0, 0.0) };
/// let player = Candidate { id: ActorId::new(1), position: Vec2::new(1.0, 0.0) };
///
/// let target = select_target(Vec2::ZERO, 6.0, Some(ally), Some(player), TargetPriority::AllyFirst);
/// assert_eq!(target.map(|c| c.id), Some(ActorId::new(2)));
/// ```
#[must_use]
pub fn select_target(
    origin: Vec2,
    radius: f32,
    ally: Option<Candidate>,
    player: Option<Candidate>,
    priority: TargetPriority,
) -> Option<Candidate> {
    let in_range = |candidate: &Candidate| origin.distance(candidate.position) <= radius;
    let ally = ally.filter(in_range);
    let player = player.filter(in_range);
    match priority {
        TargetPriority::AllyFirst => ally.or(player),
        TargetPriority::PlayerFirst => player.or(ally),
        TargetPriority::PlayerOnly => player,
    }
}

/// [`select_target`] over the living player and ally of a view.
#[must_use]
pub fn select_in_view(
    view: &WorldView,
    origin: Vec2,
    radius: f32,
    priority: TargetPriority,
) -> Option<Candidate> {
    select_target(
        origin,
        radius,
        view.ally().map(Candidate::from),
        view.player().map(Candidate::from),
        priority,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: u64, x: f32) -> Candidate {
        Candidate {
            id: ActorId::new(id),
            position: Vec2::new(x, 0.0),
        }
    }

    #[test]
    fn ally_wins_even_when_player_is_closer() {
        let target = select_target(
            Vec2::ZERO,
            6.0,
            Some(candidate(2, 2.0)),
            Some(candidate(1, 1.0)),
            TargetPriority::AllyFirst,
        );
        assert_eq!(target.map(|c| c.id), Some(ActorId::new(2)));
    }

    #[test]
    fn player_when_ally_out_of_range() {
        let target = select_target(
            Vec2::ZERO,
            6.0,
            Some(candidate(2, 7.0)),
            Some(candidate(1, 1.0)),
            TargetPriority::AllyFirst,
        );
        assert_eq!(target.map(|c| c.id), Some(ActorId::new(1)));
    }

    #[test]
    fn nothing_in_range() {
        assert!(select_target(
            Vec2::ZERO,
            3.0,
            Some(candidate(2, 4.0)),
            Some(candidate(1, -4.0)),
            TargetPriority::AllyFirst,
        )
        .is_none());
    }

    #[test]
    fn radius_is_inclusive() {
        let target = select_target(
            Vec2::ZERO,
            6.0,
            None,
            Some(candidate(1, 6.0)),
            TargetPriority::AllyFirst,
        );
        assert!(target.is_some());
    }

    #[test]
    fn player_first_and_player_only() {
        let ally = Some(candidate(2, 2.0));
        let player = Some(candidate(1, 5.0));
        assert_eq!(
            select_target(Vec2::ZERO, 6.0, ally, player, TargetPriority::PlayerFirst).map(|c| c.id),
            Some(ActorId::new(1))
        );
        assert_eq!(
            select_target(Vec2::ZERO, 6.0, ally, None, TargetPriority::PlayerOnly),
            None
        );
    }
}
