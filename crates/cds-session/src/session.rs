//! Play session over a roster of characters.
//!
//! `Session` owns the characters, the dice and the journal. Every method
//! takes `&mut self`, so one session is a single writer: two requests can
//! never interleave their check and their spend.

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use cds_mechanics::damage::take_hit;
use cds_mechanics::investigation::{self, Investigation};
use cds_mechanics::power;
use cds_mechanics::resolution::{perform_check, roll_reserve_die};
use cds_mechanics::{
    Activation, CharacterId, CharacterState, CheckRequest, CheckResult, DamageReport, DamageType,
    ItemId, ItemKind, LedgerEvent, Outcome, PoolKind, ReserveDie, ReserveDieResult, Roller, Skill,
    validate_character,
};

use crate::combat::{Encounter, TurnStart, post_combat_recovery};
use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::journal::log::render_text;
use crate::journal::{Journal, JournalEntry};
use crate::revelation::{Revelation, Revelations};

/// Everything one attack produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strike {
    /// The attack roll.
    pub attack: CheckResult,
    /// The hit on the target, if the attack succeeded.
    pub hit: Option<DamageReport>,
    /// Mortality the attacker gained for the violence.
    pub violence: Option<LedgerEvent>,
}

/// A play session.
pub struct Session {
    config: SessionConfig,
    characters: Vec<CharacterState>,
    selected: Option<CharacterId>,
    journal: Journal,
    revelations: Revelations,
    encounter: Option<Encounter>,
    roller: Box<dyn Roller>,
}

impl Session {
    /// Create a session rolling with a generator seeded from the config.
    pub fn new(config: SessionConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_roller(config, rng)
    }

    /// Create a session with its own source of die faces.
    pub fn with_roller(config: SessionConfig, roller: impl Roller + 'static) -> Self {
        Self {
            config,
            characters: Vec::new(),
            selected: None,
            journal: Journal::new(),
            revelations: Revelations::new(),
            encounter: None,
            roller: Box::new(roller),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Get the journal.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Get the revelation registry.
    pub fn revelations(&self) -> &Revelations {
        &self.revelations
    }

    /// Get the revelation registry for editing.
    pub fn revelations_mut(&mut self) -> &mut Revelations {
        &mut self.revelations
    }

    /// Get the running encounter, if any.
    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    /// All characters, in the order they were added.
    pub fn characters(&self) -> &[CharacterState] {
        &self.characters
    }

    /// Add a character loaded from the host.
    ///
    /// The snapshot is repaired before use; anything the repair could not
    /// fix is logged. The first character added becomes the selection.
    pub fn add_character(&mut self, mut state: CharacterState) -> CharacterId {
        for item in &mut state.items {
            item.normalize();
        }
        state.prepare_derived();
        if self.config.rules.auto_wounds {
            state.health.refresh_conditions();
        }
        for issue in validate_character(&state) {
            warn!(character = %state.id, %issue, "snapshot issue");
        }
        let id = state.id;
        debug!(character = %id, name = %state.name, "character added");
        self.characters.push(state);
        if self.selected.is_none() {
            self.selected = Some(id);
        }
        id
    }

    /// Look up a character.
    pub fn character(&self, id: CharacterId) -> SessionResult<&CharacterState> {
        let index = self.index(id)?;
        Ok(&self.characters[index])
    }

    /// Look up a character for editing.
    pub fn character_mut(&mut self, id: CharacterId) -> SessionResult<&mut CharacterState> {
        let index = self.index(id)?;
        Ok(&mut self.characters[index])
    }

    /// Make a character the target of text commands.
    pub fn select(&mut self, id: CharacterId) -> SessionResult<()> {
        self.index(id)?;
        self.selected = Some(id);
        Ok(())
    }

    /// The selected character's id.
    pub fn selected(&self) -> SessionResult<CharacterId> {
        self.selected.ok_or(SessionError::NoSelection)
    }

    fn index(&self, id: CharacterId) -> SessionResult<usize> {
        self.characters
            .iter()
            .position(|c| c.id == id)
            .ok_or(SessionError::CharacterNotFound(id))
    }

    fn name(&self, index: usize) -> String {
        self.characters[index].name.clone()
    }

    /// Journal every event that moved a value.
    fn log_events<'a>(
        &mut self,
        index: usize,
        events: impl IntoIterator<Item = &'a LedgerEvent>,
    ) {
        let character = self.name(index);
        for event in events.into_iter().filter(|e| !e.is_noop()) {
            self.journal.append(JournalEntry::Ledger {
                character: character.clone(),
                event: event.clone(),
                timestamp: Utc::now(),
            });
        }
    }

    /// Unlock and journal revelations the character now qualifies for.
    fn unlock_revelations(&mut self, index: usize) -> Vec<Revelation> {
        let unlocked = self.revelations.unlock_for(&self.characters[index]);
        let character = self.name(index);
        for revelation in &unlocked {
            self.journal.append(JournalEntry::Revelation {
                character: character.clone(),
                title: revelation.title.clone(),
                content: revelation.content.clone(),
                timestamp: Utc::now(),
            });
        }
        unlocked
    }

    /// Roll a check. A good roll on an investigative skill earns
    /// understanding points. In an encounter, the roller's combat effect
    /// applies unless the request names one.
    pub fn roll_check(
        &mut self,
        id: CharacterId,
        request: &CheckRequest,
    ) -> SessionResult<CheckResult> {
        let index = self.index(id)?;
        let mut request = *request;
        if request.combat_effect.is_none() {
            request.combat_effect = self.encounter.as_ref().and_then(|e| e.effect_on(id));
        }
        let result = perform_check(
            &self.characters[index],
            &request,
            &self.config.rules,
            self.roller.as_mut(),
        )?;
        self.journal.append(JournalEntry::Check {
            character: self.name(index),
            result: result.clone(),
            timestamp: Utc::now(),
        });
        if let Some(event) = investigation::award_for_check(&mut self.characters[index], &result) {
            self.log_events(index, [&event]);
            self.unlock_revelations(index);
        }
        Ok(result)
    }

    fn reserve_die(
        &mut self,
        id: CharacterId,
        which: ReserveDie,
    ) -> SessionResult<ReserveDieResult> {
        let index = self.index(id)?;
        let result = roll_reserve_die(&mut self.characters[index], which, self.roller.as_mut())?;
        self.journal.append(JournalEntry::ReserveDie {
            character: self.name(index),
            result: result.clone(),
            timestamp: Utc::now(),
        });
        Ok(result)
    }

    /// Spend a Sacred die.
    pub fn sacred_die(&mut self, id: CharacterId) -> SessionResult<ReserveDieResult> {
        self.reserve_die(id, ReserveDie::Sacred)
    }

    /// Spend an Umbral die.
    pub fn umbral_die(&mut self, id: CharacterId) -> SessionResult<ReserveDieResult> {
        self.reserve_die(id, ReserveDie::Umbral)
    }

    /// Activate one of the character's powers.
    pub fn use_power(&mut self, id: CharacterId, item: ItemId) -> SessionResult<Activation> {
        let index = self.index(id)?;
        let activation = power::use_power(&mut self.characters[index], item)?;
        let power = self.characters[index].item(item)?.name.clone();
        self.journal.append(JournalEntry::PowerUsed {
            character: self.name(index),
            power,
            activation: activation.clone(),
            timestamp: Utc::now(),
        });
        Ok(activation)
    }

    /// Attack another character.
    ///
    /// A successful attack deals the weapon's damage plus the margin of
    /// success plus any combat effect's damage bonus, at least one. A
    /// violent lethal hit costs the attacker one point of mortality.
    pub fn strike(
        &mut self,
        attacker: CharacterId,
        target: CharacterId,
        weapon: Option<ItemId>,
        damage_type: DamageType,
    ) -> SessionResult<Strike> {
        let attacker_index = self.index(attacker)?;
        let target_index = self.index(target)?;
        let attack = self.roll_check(attacker, &CheckRequest::attack(weapon))?;

        let margin = match attack.outcome {
            Some(Outcome::CriticalSuccess { margin } | Outcome::Success { margin }) => margin,
            _ => {
                return Ok(Strike {
                    attack,
                    hit: None,
                    violence: None,
                });
            }
        };
        let fury = self
            .encounter
            .as_ref()
            .and_then(|e| e.effect_on(attacker))
            .map_or(0, |effect| effect.damage_bonus());
        let raw = attack
            .damage
            .unwrap_or(0)
            .saturating_add(margin)
            .saturating_add(fury)
            .max(1);
        let report = self.apply_hit(target_index, raw, damage_type);

        let violence = report.violent.then(|| {
            self.characters[attacker_index].increase_mortality(1, "violent lethal damage")
        });
        if let Some(event) = &violence {
            self.log_events(attacker_index, [event]);
        }
        Ok(Strike {
            attack,
            hit: Some(report),
            violence,
        })
    }

    fn apply_hit(&mut self, index: usize, raw: u32, damage_type: DamageType) -> DamageReport {
        let report = take_hit(&mut self.characters[index], raw, damage_type, &self.config.rules);
        self.journal.append(JournalEntry::Damage {
            target: self.name(index),
            report: report.clone(),
            timestamp: Utc::now(),
        });
        report
    }

    /// Apply damage from the environment or an unnamed source.
    pub fn damage(
        &mut self,
        id: CharacterId,
        raw: u32,
        damage_type: DamageType,
    ) -> SessionResult<DamageReport> {
        let index = self.index(id)?;
        Ok(self.apply_hit(index, raw, damage_type))
    }

    /// Hunt, lowering mortality.
    pub fn hunt(&mut self, id: CharacterId, reduction: u32) -> SessionResult<LedgerEvent> {
        let index = self.index(id)?;
        let event = self.characters[index].hunt(reduction);
        self.log_events(index, [&event]);
        Ok(event)
    }

    /// Give dice back to the reserve.
    pub fn recover_reserve(
        &mut self,
        id: CharacterId,
        amount: u32,
    ) -> SessionResult<LedgerEvent> {
        let index = self.index(id)?;
        let event = self.characters[index].recover_reserve(amount);
        self.log_events(index, [&event]);
        Ok(event)
    }

    /// Grant understanding points directly.
    pub fn add_understanding(
        &mut self,
        id: CharacterId,
        points: u32,
    ) -> SessionResult<LedgerEvent> {
        let index = self.index(id)?;
        let event = self.characters[index].add(PoolKind::UnderstandingPoints, points, "granted");
        self.log_events(index, [&event]);
        self.unlock_revelations(index);
        Ok(event)
    }

    /// Spend understanding points outside an investigation.
    pub fn spend_understanding(
        &mut self,
        id: CharacterId,
        points: u32,
    ) -> SessionResult<LedgerEvent> {
        let index = self.index(id)?;
        let event = self.characters[index].spend(PoolKind::UnderstandingPoints, points, "spent")?;
        self.log_events(index, [&event]);
        Ok(event)
    }

    /// Clear understanding points, as when a mystery closes.
    pub fn reset_understanding(&mut self, id: CharacterId) -> SessionResult<LedgerEvent> {
        let index = self.index(id)?;
        let event = self.characters[index].reset_understanding();
        self.log_events(index, [&event]);
        Ok(event)
    }

    /// Investigate a location, optionally burning points for a bonus.
    pub fn investigate(
        &mut self,
        id: CharacterId,
        location: &str,
        skill: Skill,
        difficulty: i32,
        points: u32,
    ) -> SessionResult<Investigation> {
        let index = self.index(id)?;
        let result = investigation::investigate(
            &mut self.characters[index],
            location,
            skill,
            difficulty,
            points,
            &self.config.rules,
            self.roller.as_mut(),
        )?;
        if let Some(event) = &result.spent {
            self.log_events(index, [event]);
        }
        self.journal.append(JournalEntry::Check {
            character: self.name(index),
            result: result.check.clone(),
            timestamp: Utc::now(),
        });
        if let Some(event) = &result.awarded {
            self.log_events(index, [event]);
        }
        self.unlock_revelations(index);
        Ok(result)
    }

    /// Record a connection between clues.
    ///
    /// Returns the understanding event and the revelations it unlocked.
    pub fn record_connection(
        &mut self,
        id: CharacterId,
        connection: &str,
    ) -> SessionResult<(LedgerEvent, Vec<Revelation>)> {
        let index = self.index(id)?;
        let event = investigation::record_connection(&mut self.characters[index], connection);
        self.journal.append(JournalEntry::Note {
            text: format!("{} connects: {connection}", self.name(index)),
            timestamp: Utc::now(),
        });
        self.log_events(index, [&event]);
        let unlocked = self.unlock_revelations(index);
        Ok((event, unlocked))
    }

    /// Add a free-text note to the journal.
    pub fn note(&mut self, text: impl Into<String>) {
        self.journal.append(JournalEntry::Note {
            text: text.into(),
            timestamp: Utc::now(),
        });
    }

    /// Start an encounter, rolling initiative for each character.
    pub fn start_encounter(&mut self, participants: &[CharacterId]) -> SessionResult<&Encounter> {
        let indices = participants
            .iter()
            .map(|&id| self.index(id))
            .collect::<SessionResult<Vec<_>>>()?;
        let mut encounter = Encounter::new();
        for index in indices {
            if encounter.contains(self.characters[index].id) {
                continue;
            }
            let result = encounter.join(
                &self.characters[index],
                &self.config.rules,
                self.roller.as_mut(),
            )?;
            self.journal.append(JournalEntry::Check {
                character: self.name(index),
                result,
                timestamp: Utc::now(),
            });
        }
        encounter.start();
        self.encounter = Some(encounter);
        self.begin_turn()?;
        self.encounter.as_ref().ok_or(SessionError::NoEncounter)
    }

    /// Advance the encounter and run turn-start automation for whoever is
    /// up. Returns true if a new round started.
    pub fn next_turn(&mut self) -> SessionResult<bool> {
        let encounter = self.encounter.as_mut().ok_or(SessionError::NoEncounter)?;
        let new_round = encounter.next_turn();
        self.begin_turn()?;
        Ok(new_round)
    }

    /// Regeneration and loss of control for the current participant.
    fn begin_turn(&mut self) -> SessionResult<Option<TurnStart>> {
        let encounter = self.encounter.as_ref().ok_or(SessionError::NoEncounter)?;
        let Ok(current) = encounter.current() else {
            return Ok(None);
        };
        let index = self.index(current.character)?;
        let encounter = self.encounter.as_mut().ok_or(SessionError::NoEncounter)?;
        let start = encounter.begin_turn(&mut self.characters[index])?;

        let name = self.name(index);
        if let Some(effect) = start.expired {
            self.note(format!("{name}'s {effect} subsides"));
        }
        if let Some(event) = &start.regeneration {
            self.log_events(index, [event]);
        }
        if let Some(effect) = start.lost_control {
            self.note(format!(
                "{name} loses control: {} for {} turns",
                effect.effect, effect.rounds_remaining
            ));
        }
        Ok(Some(start))
    }

    /// End the encounter. Temporary combat effects end, then every
    /// participant below their reserve maximum recovers one die.
    pub fn end_encounter(&mut self) -> SessionResult<Vec<LedgerEvent>> {
        let mut encounter = self.encounter.take().ok_or(SessionError::NoEncounter)?;
        for (id, effect) in encounter.clear_effects() {
            if let Ok(index) = self.index(id) {
                let name = self.name(index);
                self.note(format!("{name}'s {effect} subsides"));
            }
        }
        let mut events = Vec::new();
        for id in encounter.participant_ids() {
            let Ok(index) = self.index(id) else {
                continue;
            };
            if let Some(event) = post_combat_recovery(&mut self.characters[index]) {
                self.log_events(index, [&event]);
                events.push(event);
            }
        }
        debug!(rounds = encounter.round(), recovered = events.len(), "encounter ended");
        Ok(events)
    }

    /// Process a line of user input for the selected character.
    pub fn process(&mut self, input: &str) -> SessionResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "roll" => self.do_roll(rest),
            "sacred" => self.do_reserve_die(ReserveDie::Sacred),
            "umbral" => self.do_reserve_die(ReserveDie::Umbral),
            "power" => self.do_power(rest),
            "hunt" => self.do_hunt(rest),
            "recover" => self.do_recover(rest),
            "damage" => self.do_damage(rest),
            "understanding" => self.do_understanding(rest),
            "connection" => self.do_connection(rest),
            "select" => self.do_select(rest),
            "note" => self.do_note(rest),
            "status" => self.do_status(),
            "journal" => self.do_journal_show(),
            "export" => self.do_journal_export(rest),
            "help" => Ok(HELP.to_string()),
            _ => Err(SessionError::UnknownCommand(cmd)),
        }
    }

    /// `roll <skill> [modifier] [difficulty]`
    fn do_roll(&mut self, rest: &str) -> SessionResult<String> {
        let (skill, numbers) = parse_roll_args(rest)?;
        let mut request = CheckRequest::skill(skill);
        if let Some(&modifier) = numbers.first() {
            request = request.with_modifier(modifier);
        }
        if let Some(&difficulty) = numbers.get(1) {
            request = request.with_difficulty(difficulty);
        }
        let id = self.selected()?;
        let result = self.roll_check(id, &request)?;
        Ok(result.to_string())
    }

    fn do_reserve_die(&mut self, which: ReserveDie) -> SessionResult<String> {
        let id = self.selected()?;
        let result = self.reserve_die(id, which)?;
        let state = self.character(id)?;
        Ok(format!(
            "{result}\nDice reserve: {}  Humanity {} / Bestiality {}",
            state.dice_reserve, state.humanity, state.bestiality
        ))
    }

    fn do_power(&mut self, name: &str) -> SessionResult<String> {
        if name.is_empty() {
            return Err(SessionError::InvalidChoice("usage: power <name>".to_string()));
        }
        let id = self.selected()?;
        let wanted = name.to_lowercase();
        let item = self
            .character(id)?
            .items
            .iter()
            .find(|i| matches!(i.kind, ItemKind::Power { .. }) && i.name.to_lowercase() == wanted)
            .map(|i| i.id)
            .ok_or_else(|| SessionError::InvalidChoice(format!("no power named '{name}'")))?;
        let activation = self.use_power(id, item)?;
        let mut out = format!("Activated {name}.");
        for event in &activation.events {
            out.push_str(&format!("\n  {event}"));
        }
        Ok(out)
    }

    fn do_hunt(&mut self, rest: &str) -> SessionResult<String> {
        let reduction = parse_amount(rest, "hunt [amount]")?;
        let id = self.selected()?;
        let event = self.hunt(id, reduction)?;
        let requirement = self.character(id)?.hunt_requirement();
        let mut out = format!("Hunt complete. {event}");
        if requirement.required {
            out.push_str(&format!("\nMust hunt {}.", requirement.frequency));
        }
        Ok(out)
    }

    fn do_recover(&mut self, rest: &str) -> SessionResult<String> {
        let amount = parse_amount(rest, "recover [amount]")?;
        let id = self.selected()?;
        Ok(self.recover_reserve(id, amount)?.to_string())
    }

    /// `damage <amount> [bashing|lethal|aggravated]`
    fn do_damage(&mut self, rest: &str) -> SessionResult<String> {
        let usage = || SessionError::InvalidChoice("usage: damage <amount> [type]".to_string());
        let mut words = rest.split_whitespace();
        let raw: u32 = words
            .next()
            .and_then(|w| w.parse().ok())
            .ok_or_else(usage)?;
        let damage_type = match words.next() {
            Some(word) => word.parse::<DamageType>().map_err(SessionError::InvalidChoice)?,
            None => DamageType::default(),
        };
        let id = self.selected()?;
        let report = self.damage(id, raw, damage_type)?;
        let state = self.character(id)?;
        Ok(format!("{report}\nHealth: {}", state.health))
    }

    /// `understanding add|spend|reset [amount]`
    fn do_understanding(&mut self, rest: &str) -> SessionResult<String> {
        let parts: Vec<&str> = rest.splitn(2, ' ').collect();
        let sub = parts[0].to_lowercase();
        let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");
        let usage = "understanding add|spend|reset [amount]";
        let id = self.selected()?;

        let event = match sub.as_str() {
            "add" => self.add_understanding(id, parse_amount(arg, usage)?)?,
            "spend" => self.spend_understanding(id, parse_amount(arg, usage)?)?,
            "reset" => self.reset_understanding(id)?,
            _ => return Err(SessionError::InvalidChoice(format!("usage: {usage}"))),
        };
        let mut out = event.to_string();
        if let Some(milestone) = investigation::milestone(self.character(id)?) {
            out.push_str(&format!("\n{} {milestone}.", self.character(id)?.name));
        }
        Ok(out)
    }

    fn do_connection(&mut self, text: &str) -> SessionResult<String> {
        if text.is_empty() {
            return Err(SessionError::InvalidChoice(
                "usage: connection <text>".to_string(),
            ));
        }
        let id = self.selected()?;
        let (event, unlocked) = self.record_connection(id, text)?;
        let mut out = format!("Connection recorded. {event}");
        for revelation in &unlocked {
            out.push_str(&format!("\nRevelation: {}", revelation.title));
        }
        Ok(out)
    }

    fn do_select(&mut self, name: &str) -> SessionResult<String> {
        let wanted = name.to_lowercase();
        let id = self
            .characters
            .iter()
            .find(|c| c.name.to_lowercase() == wanted)
            .map(|c| c.id)
            .ok_or_else(|| SessionError::InvalidChoice(format!("no character named '{name}'")))?;
        self.select(id)?;
        Ok(format!("Selected {}.", self.character(id)?.name))
    }

    fn do_note(&mut self, text: &str) -> SessionResult<String> {
        if text.is_empty() {
            return Err(SessionError::InvalidChoice("usage: note <text>".to_string()));
        }
        self.note(text);
        Ok("Note recorded.".to_string())
    }

    fn do_status(&self) -> SessionResult<String> {
        let id = self.selected()?;
        let state = self.character(id)?;
        let penalties = state.penalties(&self.config.rules);
        let requirement = state.hunt_requirement();

        let mut out = format!("{} ({})\n", state.name, state.lineage);
        out.push_str(&format!(
            "Humanity {} / Bestiality {}\n",
            state.humanity, state.bestiality
        ));
        out.push_str(&format!("Mortality: {}", state.mortality));
        if requirement.required {
            out.push_str(&format!(" (hunt {})", requirement.frequency));
        }
        out.push('\n');
        out.push_str(&format!("Dice reserve: {}\n", state.dice_reserve));
        out.push_str(&format!(
            "Understanding: {}\n",
            state.understanding_points
        ));
        out.push_str(&format!("Health: {}\n", state.health));
        out.push_str(&format!("Penalty: {}\n", penalties.total));
        if let Some(encounter) = &self.encounter {
            out.push_str(&format!("Encounter: round {}\n", encounter.round()));
        }
        out.push_str(&format!("Journal: {} entries", self.journal.len()));
        Ok(out)
    }

    fn do_journal_show(&self) -> SessionResult<String> {
        if self.journal.is_empty() {
            return Ok("Journal is empty.".to_string());
        }
        let recent = self.journal.recent(self.config.journal_preview);
        let mut out = format!(
            "Journal ({} entries, showing last {}):\n\n",
            self.journal.len(),
            recent.len()
        );
        out.push_str(&render_text(recent));
        Ok(out.trim_end().to_string())
    }

    fn do_journal_export(&self, format: &str) -> SessionResult<String> {
        match format.to_lowercase().as_str() {
            "markdown" | "md" | "" => Ok(self.journal.export_markdown()),
            "text" | "txt" => Ok(self.journal.export_text()),
            other => Err(SessionError::InvalidChoice(format!(
                "unknown format '{other}', use: markdown, text"
            ))),
        }
    }
}

const HELP: &str = "\
Commands:
  roll <skill> [mod] [difficulty]   Roll a skill check
  sacred                            Spend a Sacred die
  umbral                            Spend an Umbral die
  power <name>                      Activate a power
  hunt [amount]                     Hunt, lowering mortality
  recover [amount]                  Recover reserve dice
  damage <amount> [type]            Take bashing, lethal or aggravated damage
  understanding add|spend|reset [n] Adjust understanding points
  connection <text>                 Record a connection between clues
  select <name>                     Choose the active character
  note <text>                       Add a journal note
  status                            Show the active character
  journal                           Show recent entries
  export [markdown|text]            Export full journal";

/// Split `<skill words> [modifier] [difficulty]`. Up to two trailing numbers
/// are taken as the modifier and the difficulty.
fn parse_roll_args(input: &str) -> SessionResult<(Skill, Vec<i32>)> {
    let mut words: Vec<&str> = input.split_whitespace().collect();
    let mut numbers = Vec::new();
    while numbers.len() < 2
        && let Some(n) = words.last().and_then(|w| w.parse::<i32>().ok())
    {
        numbers.insert(0, n);
        words.pop();
    }
    if words.is_empty() {
        return Err(SessionError::InvalidChoice(
            "usage: roll <skill> [modifier] [difficulty]".to_string(),
        ));
    }
    let skill = words.join(" ").parse::<Skill>()?;
    Ok((skill, numbers))
}

/// An optional positive count, defaulting to one.
fn parse_amount(input: &str, usage: &str) -> SessionResult<u32> {
    if input.is_empty() {
        return Ok(1);
    }
    input
        .parse()
        .map_err(|_| SessionError::InvalidChoice(format!("usage: {usage}")))
}
