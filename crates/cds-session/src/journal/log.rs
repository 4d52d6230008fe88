//! Journal storage and export.

use serde::{Deserialize, Serialize};

use super::entry::JournalEntry;

/// A chronological log of session events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the journal.
    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Get all entries.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// The last `count` entries, oldest first.
    pub fn recent(&self, count: usize) -> &[JournalEntry] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the journal as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Session Journal\n\n");
        for entry in &self.entries {
            match entry {
                JournalEntry::Check {
                    character, result, ..
                } => {
                    out.push_str(&format!("**Check** ({character}): {result}\n\n"));
                }
                JournalEntry::ReserveDie {
                    character, result, ..
                } => {
                    out.push_str(&format!("**{}** ({character}): {}\n", result.which, result));
                    for event in &result.events {
                        out.push_str(&format!("  - {event}\n"));
                    }
                    out.push('\n');
                }
                JournalEntry::Ledger {
                    character, event, ..
                } => {
                    out.push_str(&format!("*Ledger* ({character}): {event}\n\n"));
                }
                JournalEntry::Damage { target, report, .. } => {
                    out.push_str(&format!("**Damage** ({target}): {report}"));
                    if report.violent {
                        out.push_str(", violent");
                    }
                    out.push_str("\n\n");
                }
                JournalEntry::PowerUsed {
                    character,
                    power,
                    activation,
                    ..
                } => {
                    out.push_str(&format!("**Power** ({character}): {power}\n"));
                    for event in &activation.events {
                        out.push_str(&format!("  - {event}\n"));
                    }
                    out.push('\n');
                }
                JournalEntry::Revelation {
                    character,
                    title,
                    content,
                    ..
                } => {
                    out.push_str(&format!("## Revelation: {title}\n\n"));
                    out.push_str(&format!("*Unlocked by {character}*\n\n"));
                    out.push_str(&format!("{content}\n\n"));
                }
                JournalEntry::Note { text, .. } => {
                    out.push_str(&format!("> {text}\n\n"));
                }
            }
        }
        out
    }

    /// Export the journal as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Session Journal\n===============\n\n");
        out.push_str(&render_text(&self.entries));
        out
    }
}

/// Plain-text rendering of a run of entries, without a header.
pub(crate) fn render_text(entries: &[JournalEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        match entry {
            JournalEntry::Check {
                character, result, ..
            } => {
                out.push_str(&format!("Check ({character}): {result}\n\n"));
            }
            JournalEntry::ReserveDie {
                character, result, ..
            } => {
                out.push_str(&format!("{result} ({character})\n"));
                for event in &result.events {
                    out.push_str(&format!("  {event}\n"));
                }
                out.push('\n');
            }
            JournalEntry::Ledger {
                character, event, ..
            } => {
                out.push_str(&format!("Ledger ({character}): {event}\n\n"));
            }
            JournalEntry::Damage { target, report, .. } => {
                out.push_str(&format!("Damage ({target}): {report}"));
                if report.violent {
                    out.push_str(", violent");
                }
                out.push_str("\n\n");
            }
            JournalEntry::PowerUsed {
                character,
                power,
                activation,
                ..
            } => {
                out.push_str(&format!("Power ({character}): {power}\n"));
                for event in &activation.events {
                    out.push_str(&format!("  {event}\n"));
                }
                out.push('\n');
            }
            JournalEntry::Revelation {
                character,
                title,
                content,
                ..
            } => {
                out.push_str(&format!("--- Revelation: {title} ---\n"));
                out.push_str(&format!("Unlocked by {character}\n"));
                out.push_str(&format!("{content}\n\n"));
            }
            JournalEntry::Note { text, .. } => {
                out.push_str(&format!("Note: {text}\n\n"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cds_mechanics::damage::take_hit;
    use cds_mechanics::power::activate;
    use cds_mechanics::resolution::{perform_check, sacred_die};
    use cds_mechanics::{
        CharacterState, CheckRequest, DamageType, FixedRolls, Lineage, PowerCost, RulesConfig,
        Skill,
    };
    use chrono::Utc;

    fn mira() -> CharacterState {
        CharacterState::new("Mira", Lineage::Upior).with_skill(Skill::Investigation, 2)
    }

    #[test]
    fn empty_journal() {
        let j = Journal::new();
        assert!(j.is_empty());
        assert_eq!(j.len(), 0);
        assert!(j.recent(5).is_empty());
    }

    #[test]
    fn recent_keeps_order() {
        let mut j = Journal::new();
        for text in ["one", "two", "three"] {
            j.append(JournalEntry::Note {
                text: text.to_string(),
                timestamp: Utc::now(),
            });
        }
        let recent = j.recent(2);
        assert_eq!(recent.len(), 2);
        assert!(matches!(&recent[0], JournalEntry::Note { text, .. } if text == "two"));
        assert_eq!(j.recent(10).len(), 3);
    }

    #[test]
    fn export_markdown_check() {
        let c = mira();
        let result = perform_check(
            &c,
            &CheckRequest::skill(Skill::Investigation).with_difficulty(10),
            &RulesConfig::default(),
            &mut FixedRolls::new([8]),
        )
        .unwrap();
        let mut j = Journal::new();
        j.append(JournalEntry::Check {
            character: c.name.clone(),
            result,
            timestamp: Utc::now(),
        });
        let md = j.export_markdown();
        assert!(md.starts_with("# Session Journal\n\n"));
        assert!(md.contains("**Check** (Mira): investigation: 1d12 + 2 = 10 vs 10, Success"));
    }

    #[test]
    fn export_markdown_reserve_die_lists_events() {
        let mut c = mira();
        let result = sacred_die(&mut c, &mut FixedRolls::new([5])).unwrap();
        let mut j = Journal::new();
        j.append(JournalEntry::ReserveDie {
            character: c.name.clone(),
            result,
            timestamp: Utc::now(),
        });
        let md = j.export_markdown();
        assert!(md.contains("**Sacred die** (Mira): Sacred die: rolled 5, bonus +3"));
        assert!(md.contains("  - dice reserve: 7 -> 6 (Sacred die)"));
    }

    #[test]
    fn export_damage_marks_violence() {
        let mut c = mira();
        let report = take_hit(&mut c, 4, DamageType::Lethal, &RulesConfig::default());
        let mut j = Journal::new();
        j.append(JournalEntry::Damage {
            target: c.name.clone(),
            report,
            timestamp: Utc::now(),
        });
        assert!(j.export_markdown().contains("**Damage** (Mira): 4 lethal damage, violent"));
        assert!(j.export_text().contains("Damage (Mira): 4 lethal damage, violent"));
    }

    #[test]
    fn export_power_and_revelation() {
        let mut c = mira();
        let activation = activate(&mut c, &PowerCost::dice(2), "Blood Mist").unwrap();
        let mut j = Journal::new();
        j.append(JournalEntry::PowerUsed {
            character: c.name.clone(),
            power: "Blood Mist".to_string(),
            activation,
            timestamp: Utc::now(),
        });
        j.append(JournalEntry::Revelation {
            character: c.name.clone(),
            title: "The Cellar".to_string(),
            content: "The priest fed the thing below.".to_string(),
            timestamp: Utc::now(),
        });
        let md = j.export_markdown();
        assert!(md.contains("**Power** (Mira): Blood Mist\n  - dice reserve: 7 -> 5 (Blood Mist)"));
        assert!(md.contains("## Revelation: The Cellar"));
        assert!(md.contains("*Unlocked by Mira*"));

        let txt = j.export_text();
        assert!(txt.starts_with("Session Journal\n===============\n\n"));
        assert!(txt.contains("--- Revelation: The Cellar ---"));
    }

    #[test]
    fn export_text_note() {
        let mut j = Journal::new();
        j.append(JournalEntry::Note {
            text: "Remember the key".to_string(),
            timestamp: Utc::now(),
        });
        let txt = j.export_text();
        assert!(txt.contains("Note: Remember the key"));
        assert!(j.export_markdown().contains("> Remember the key"));
    }

    #[test]
    fn markdown_note_and_revelation_layout() {
        let mut j = Journal::new();
        j.append(JournalEntry::Note {
            text: "Dusk at the chapel".to_string(),
            timestamp: Utc::now(),
        });
        j.append(JournalEntry::Revelation {
            character: "Mira".to_string(),
            title: "The Cellar".to_string(),
            content: "Something lives below.".to_string(),
            timestamp: Utc::now(),
        });
        insta::assert_snapshot!(j.export_markdown().trim_end(), @r"
        # Session Journal

        > Dusk at the chapel

        ## Revelation: The Cellar

        *Unlocked by Mira*

        Something lives below.
        ");
    }

    #[test]
    fn journal_serde_roundtrip() {
        let mut c = mira();
        let mut j = Journal::new();
        j.append(JournalEntry::Ledger {
            character: c.name.clone(),
            event: c.hunt(2),
            timestamp: Utc::now(),
        });
        j.append(JournalEntry::Note {
            text: "test".to_string(),
            timestamp: Utc::now(),
        });
        let json = serde_json::to_string(&j).unwrap();
        let j2: Journal = serde_json::from_str(&json).unwrap();
        assert_eq!(j2.len(), 2);
        assert_eq!(j2.entries()[1].timestamp(), j.entries()[1].timestamp());
    }
}
