//! Hero records and the small closed sets used to filter them.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Snapshot of one hero as returned by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    #[serde(deserialize_with = "lenient_number")]
    pub id: u64,
    #[serde(deserialize_with = "lenient_number")]
    pub main_class: u8,
    #[serde(deserialize_with = "lenient_number")]
    pub sub_class: u8,
    #[serde(deserialize_with = "lenient_number")]
    pub summons_remaining: u32,
    #[serde(deserialize_with = "lenient_number")]
    pub passive1: u8,
    #[serde(deserialize_with = "lenient_number")]
    pub passive2: u8,
    #[serde(deserialize_with = "lenient_number")]
    pub active1: u8,
    #[serde(deserialize_with = "lenient_number")]
    pub active2: u8,
    #[serde(deserialize_with = "lenient_number")]
    pub generation: u32,
    #[serde(deserialize_with = "lenient_number")]
    pub rarity: u8,
    #[serde(deserialize_with = "lenient_number")]
    pub level: u32,
    /// Network tag of the realm the hero currently lives on.
    pub network: String,
    #[serde(rename = "professionStr", default)]
    pub profession: Option<String>,
}

/// The index encodes some integers as JSON strings (ids above 2^53 in particular).
fn lenient_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + FromStr,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => {
            T::try_from(n).map_err(|_| de::Error::custom(format!("number {} out of range", n)))
        }
        Raw::Text(s) => s
            .trim()
            .parse::<T>()
            .map_err(|_| de::Error::custom(format!("invalid number '{}'", s))),
    }
}

/// Realm filter: maps to the network tag the directory stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Realm {
    Crystalvale,
    Serendale,
}

impl Realm {
    /// Network tag used by the directory.
    pub fn tag(self) -> &'static str {
        match self {
            Realm::Crystalvale => "dfk",
            Realm::Serendale => "kla",
        }
    }
}

impl FromStr for Realm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "crystalvale" | "cv" | "dfk" => Ok(Realm::Crystalvale),
            "serendale" | "sd" | "kla" => Ok(Realm::Serendale),
            other => Err(format!("unknown realm '{}' (expected crystalvale or serendale)", other)),
        }
    }
}

impl fmt::Display for Realm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Realm::Crystalvale => write!(f, "Crystalvale"),
            Realm::Serendale => write!(f, "Serendale"),
        }
    }
}

/// Gathering profession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Profession {
    Foraging,
    Fishing,
    Gardening,
    Mining,
}

impl Profession {
    /// Value of `professionStr` in the directory.
    pub fn as_str(self) -> &'static str {
        match self {
            Profession::Foraging => "foraging",
            Profession::Fishing => "fishing",
            Profession::Gardening => "gardening",
            Profession::Mining => "mining",
        }
    }
}

impl FromStr for Profession {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "foraging" => Ok(Profession::Foraging),
            "fishing" => Ok(Profession::Fishing),
            "gardening" => Ok(Profession::Gardening),
            "mining" => Ok(Profession::Mining),
            other => Err(format!("unknown profession '{}'", other)),
        }
    }
}
