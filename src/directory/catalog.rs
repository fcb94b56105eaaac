//! Display names for the numeric codes the directory returns.

use std::fmt;

use crate::directory::types::Hero;

/// Class and ability tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Basic,
    Advanced,
    Elite,
    Transcendent,
}

impl Tier {
    /// Tier of a class or ability code, if the code is assigned.
    pub fn of(code: u8) -> Option<Tier> {
        match code {
            0..=11 => Some(Tier::Basic),
            16..=21 => Some(Tier::Advanced),
            24..=26 => Some(Tier::Elite),
            28 => Some(Tier::Transcendent),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Basic => "basic",
            Tier::Advanced => "advanced",
            Tier::Elite => "elite",
            Tier::Transcendent => "transcendent",
        }
    }
}

/// Class name for a class code.
pub fn class_name(code: u8) -> Option<&'static str> {
    let name = match code {
        0 => "Warrior",
        1 => "Knight",
        2 => "Thief",
        3 => "Archer",
        4 => "Priest",
        5 => "Wizard",
        6 => "Monk",
        7 => "Pirate",
        8 => "Berserker",
        9 => "Seer",
        10 => "Legionnaire",
        11 => "Scholar",
        16 => "Paladin",
        17 => "DarkKnight",
        18 => "Summoner",
        19 => "Ninja",
        20 => "Shapeshifter",
        21 => "Bard",
        24 => "Dragoon",
        25 => "Sage",
        26 => "Spellbow",
        28 => "DreadKnight",
        _ => return None,
    };
    Some(name)
}

/// Short ability label (B1..B8, A1..A4, E1, E2, T1).
pub fn ability_name(code: u8) -> Option<&'static str> {
    let name = match code {
        0 => "B1",
        1 => "B2",
        2 => "B3",
        3 => "B4",
        4 => "B5",
        5 => "B6",
        6 => "B7",
        7 => "B8",
        16 => "A1",
        17 => "A2",
        18 => "A3",
        19 => "A4",
        24 => "E1",
        25 => "E2",
        28 => "T1",
        _ => return None,
    };
    Some(name)
}

/// Rarity name for a tier 0..=4.
pub fn rarity_name(rarity: u8) -> &'static str {
    match rarity {
        1 => "uncommon",
        2 => "rare",
        3 => "legendary",
        4 => "mythic",
        _ => "common",
    }
}

/// One-line rendering of a hero for terminal output.
pub struct HeroSummary<'a>(pub &'a Hero);

impl fmt::Display for HeroSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hero = self.0;
        let ability = |code: u8| ability_name(code).unwrap_or("?");
        let class = |code: u8| match (class_name(code), Tier::of(code)) {
            (Some(name), Some(tier)) => format!("{} ({})", name, tier.as_str()),
            _ => "Unknown Class".to_string(),
        };

        write!(
            f,
            "ID: {:<13} | {} / {} | {} | Gen: {}, Summons: {}, Lvl: {} | A1 {} A2 {} P1 {} P2 {} | Realm: {}",
            hero.id,
            class(hero.main_class),
            class(hero.sub_class),
            rarity_name(hero.rarity),
            hero.generation,
            hero.summons_remaining,
            hero.level,
            ability(hero.active1),
            ability(hero.active2),
            ability(hero.passive1),
            ability(hero.passive2),
            hero.network,
        )?;

        if let Some(profession) = &hero.profession {
            write!(f, " | {}", profession)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers() {
        assert_eq!(Tier::of(11), Some(Tier::Basic));
        assert_eq!(Tier::of(18), Some(Tier::Advanced));
        assert_eq!(Tier::of(26), Some(Tier::Elite));
        assert_eq!(Tier::of(28), Some(Tier::Transcendent));
        assert_eq!(Tier::of(12), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(class_name(28), Some("DreadKnight"));
        assert_eq!(class_name(22), None);
        assert_eq!(ability_name(24), Some("E1"));
        assert_eq!(rarity_name(3), "legendary");
        assert_eq!(rarity_name(9), "common");
    }

    #[test]
    fn test_summary_line() {
        let hero = Hero {
            id: 42,
            main_class: 5,
            sub_class: 16,
            summons_remaining: 3,
            passive1: 16,
            passive2: 0,
            active1: 24,
            active2: 1,
            generation: 2,
            rarity: 4,
            level: 12,
            network: "kla".to_string(),
            profession: Some("mining".to_string()),
        };

        let line = HeroSummary(&hero).to_string();
        assert!(line.starts_with("ID: 42 "));
        assert!(line.contains("| Wizard (basic) / Paladin (advanced) |"));
        assert!(line.contains("mythic"));
        assert!(line.contains("A1 E1 A2 B2 P1 A1 P2 B1"));
        assert!(line.ends_with("Realm: kla | mining"));
    }

    #[test]
    fn test_summary_unknown_class() {
        let hero = Hero {
            id: 7,
            main_class: 28,
            sub_class: 99,
            summons_remaining: 0,
            passive1: 0,
            passive2: 0,
            active1: 0,
            active2: 0,
            generation: 0,
            rarity: 0,
            level: 1,
            network: "dfk".to_string(),
            profession: None,
        };

        let line = HeroSummary(&hero).to_string();
        assert!(line.contains("| DreadKnight (transcendent) / Unknown Class |"));
        assert!(line.ends_with("Realm: dfk"));
    }
}
