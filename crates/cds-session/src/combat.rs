//! Combat encounter: initiative order, turns and rounds.
//!
//! Participants are referenced by id; their sheets stay on the session
//! roster. Initiative comes from an `Initiative` check rolled on joining.
//! Each participant may carry one temporary combat effect, which ends with
//! the encounter.

use cds_mechanics::effect::{loss_of_control, regenerate};
use cds_mechanics::resolution::perform_check;
use cds_mechanics::{
    CharacterId, CharacterState, CheckRequest, CheckResult, CombatEffect, LedgerEvent, PoolKind,
    Roller, RuleResult, RulesConfig, TemporaryEffect,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SessionError, SessionResult};

/// A participant in combat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Roster id.
    pub character: CharacterId,
    /// Display name.
    pub name: String,
    /// Initiative total (higher goes first).
    pub initiative: i32,
    /// Temporary combat effect, if any.
    #[serde(default)]
    pub effect: Option<TemporaryEffect>,
}

/// What happened as a participant's turn began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnStart {
    /// Whose turn it is.
    pub character: CharacterId,
    /// Health regained.
    pub regeneration: Option<LedgerEvent>,
    /// An effect that ran out.
    pub expired: Option<CombatEffect>,
    /// An effect that just took hold.
    pub lost_control: Option<TemporaryEffect>,
}

/// The state of an ongoing combat encounter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Encounter {
    participants: Vec<Participant>,
    /// Current round number (1-based, 0 before the first turn).
    round: u32,
    turn_index: usize,
    /// Participant indices sorted by initiative, descending.
    initiative_order: Vec<usize>,
}

impl Encounter {
    /// Create an empty encounter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a participant with a known initiative total.
    ///
    /// Joining a running encounter re-sorts the order but keeps the
    /// current participant's turn.
    pub fn add_participant(
        &mut self,
        character: CharacterId,
        name: impl Into<String>,
        initiative: i32,
    ) {
        let current = self.current().ok().map(|p| p.character);
        self.participants.push(Participant {
            character,
            name: name.into(),
            initiative,
            effect: None,
        });
        self.sort_initiative();
        if let Some(id) = current {
            self.turn_index = self
                .initiative_order
                .iter()
                .position(|&i| self.participants[i].character == id)
                .unwrap_or(0);
        }
    }

    /// Roll initiative for a character and add them.
    pub fn join<R: Roller + ?Sized>(
        &mut self,
        state: &CharacterState,
        config: &RulesConfig,
        roller: &mut R,
    ) -> RuleResult<CheckResult> {
        let result = perform_check(state, &CheckRequest::initiative(), config, roller)?;
        debug!(character = %state.id, initiative = result.total, "joined encounter");
        self.add_participant(state.id, state.name.clone(), result.total);
        Ok(result)
    }

    /// Start round one with the highest initiative.
    pub fn start(&mut self) {
        self.round = 1;
        self.turn_index = 0;
        self.sort_initiative();
    }

    /// The participant whose turn it is.
    pub fn current(&self) -> SessionResult<&Participant> {
        self.initiative_order
            .get(self.turn_index)
            .map(|&i| &self.participants[i])
            .ok_or(SessionError::NoEncounter)
    }

    /// Advance to the next turn. Returns true if a new round started.
    pub fn next_turn(&mut self) -> bool {
        if self.initiative_order.is_empty() {
            return false;
        }
        if self.round == 0 {
            self.round = 1;
        }
        self.turn_index += 1;
        if self.turn_index >= self.initiative_order.len() {
            self.turn_index = 0;
            self.round += 1;
            true
        } else {
            false
        }
    }

    /// Run turn-start automation for the current participant.
    ///
    /// `state` must be the current participant's sheet. A running effect
    /// counts down first; regeneration heals next; a participant left with
    /// no effect may then lose control.
    pub fn begin_turn(&mut self, state: &mut CharacterState) -> SessionResult<TurnStart> {
        let round = self.round;
        let &index = self
            .initiative_order
            .get(self.turn_index)
            .ok_or(SessionError::NoEncounter)?;
        let participant = &mut self.participants[index];
        if participant.character != state.id {
            return Err(SessionError::InvalidChoice(format!(
                "it is {}'s turn, not {}'s",
                participant.name, state.name
            )));
        }

        let mut expired = None;
        if let Some(effect) = &mut participant.effect
            && !effect.tick()
        {
            expired = Some(effect.effect);
            participant.effect = None;
        }
        let regeneration = regenerate(state, round);
        let lost_control = if participant.effect.is_none() {
            loss_of_control(state)
        } else {
            None
        };
        if lost_control.is_some() {
            participant.effect = lost_control;
        }
        debug!(character = %state.id, round, "turn started");
        Ok(TurnStart {
            character: state.id,
            regeneration,
            expired,
            lost_control,
        })
    }

    /// The active combat effect on a participant.
    pub fn effect_on(&self, character: CharacterId) -> Option<CombatEffect> {
        self.participants
            .iter()
            .find(|p| p.character == character)
            .and_then(|p| p.effect)
            .map(|e| e.effect)
    }

    /// Remove every temporary effect, returning what was cleared.
    pub fn clear_effects(&mut self) -> Vec<(CharacterId, CombatEffect)> {
        self.participants
            .iter_mut()
            .filter_map(|p| p.effect.take().map(|e| (p.character, e.effect)))
            .collect()
    }

    /// Participants in turn order.
    pub fn order(&self) -> Vec<&Participant> {
        self.initiative_order
            .iter()
            .map(|&i| &self.participants[i])
            .collect()
    }

    /// Returns true if the character is taking part.
    pub fn contains(&self, character: CharacterId) -> bool {
        self.participants.iter().any(|p| p.character == character)
    }

    /// Get the current round number.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Get the number of participants.
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Ids of every participant, in joining order.
    pub fn participant_ids(&self) -> Vec<CharacterId> {
        self.participants.iter().map(|p| p.character).collect()
    }

    /// Sort by initiative, descending. Ties keep joining order.
    fn sort_initiative(&mut self) {
        let mut indices: Vec<usize> = (0..self.participants.len()).collect();
        indices.sort_by(|&a, &b| {
            self.participants[b]
                .initiative
                .cmp(&self.participants[a].initiative)
        });
        self.initiative_order = indices;
    }
}

/// One reserve die back after combat, if the reserve is not already full.
pub fn post_combat_recovery(state: &mut CharacterState) -> Option<LedgerEvent> {
    if state.dice_reserve.is_full() {
        return None;
    }
    Some(state.add(PoolKind::DiceReserve, 1, "post-combat recovery"))
}
