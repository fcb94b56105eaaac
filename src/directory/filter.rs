//! Typed search filters.
//!
//! Class filters are built directly from structured input. The CLI accepts
//! `7`, `0-11`, `2,3`, `[2;3]` or combinations such as `0-3,5` and parses
//! them here, once, at the edge.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::directory::types::{Profession, Realm};

/// Which class codes a search should match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClassFilter {
    #[default]
    Unrestricted,
    Single(u8),
    Range(u8, u8),
    List(BTreeSet<u8>),
}

impl ClassFilter {
    /// Class codes to send as `*_in`. Empty means unrestricted.
    pub fn codes(&self) -> Vec<u8> {
        match self {
            ClassFilter::Unrestricted => Vec::new(),
            ClassFilter::Single(v) => vec![*v],
            ClassFilter::Range(lo, hi) => (*lo..=*hi).collect(),
            ClassFilter::List(set) => set.iter().copied().collect(),
        }
    }
}

impl FromIterator<u8> for ClassFilter {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let set: BTreeSet<u8> = iter.into_iter().collect();
        match set.len() {
            0 => ClassFilter::Unrestricted,
            1 => ClassFilter::Single(*set.iter().next().unwrap_or(&0)),
            _ => ClassFilter::List(set),
        }
    }
}

impl FromStr for ClassFilter {
    type Err = String;

    /// Comma-separated parts, each a code (`7`), a range (`0-3`) or a
    /// bracket list (`[2;3]`). A lone range stays a `Range`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() || compact.eq_ignore_ascii_case("none") {
            return Ok(ClassFilter::Unrestricted);
        }

        let parts: Vec<&str> = compact.split(',').filter(|part| !part.is_empty()).collect();
        if let [part] = parts.as_slice() {
            if let Some(range) = parse_range(part)? {
                return Ok(ClassFilter::Range(*range.start(), *range.end()));
            }
        }

        let mut codes = BTreeSet::new();
        for part in parts {
            if let Some(range) = parse_range(part)? {
                codes.extend(range);
            } else if let Some(list) = part.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
                for code in list.split(';').filter(|code| !code.is_empty()) {
                    codes.insert(parse_code(code)?);
                }
            } else {
                codes.insert(parse_code(part)?);
            }
        }

        Ok(codes.into_iter().collect())
    }
}

fn parse_code(part: &str) -> Result<u8, String> {
    part.parse::<u8>()
        .map_err(|_| format!("invalid class code '{}'", part))
}

/// `lo-hi` as an inclusive range; `None` when `part` is not a range.
fn parse_range(part: &str) -> Result<Option<RangeInclusive<u8>>, String> {
    let Some((lo, hi)) = part.split_once('-') else {
        return Ok(None);
    };
    let (lo, hi) = (parse_code(lo)?, parse_code(hi)?);
    if lo > hi {
        return Err(format!("empty class range {}-{}", lo, hi));
    }
    Ok(Some(lo..=hi))
}

/// Everything a hero search can be narrowed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilters {
    pub main_class: ClassFilter,
    pub sub_class: ClassFilter,
    pub summons: RangeInclusive<u32>,
    pub generation: RangeInclusive<u32>,
    pub rarity: RangeInclusive<u8>,
    pub level: RangeInclusive<u32>,
    /// Empty means every realm.
    pub realms: BTreeSet<Realm>,
    /// Empty means every profession.
    pub professions: BTreeSet<Profession>,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            main_class: ClassFilter::Unrestricted,
            sub_class: ClassFilter::Unrestricted,
            summons: 0..=999,
            generation: 0..=999,
            rarity: 0..=4,
            level: 1..=20,
            realms: BTreeSet::new(),
            professions: BTreeSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!("".parse::<ClassFilter>().unwrap(), ClassFilter::Unrestricted);
        assert_eq!("None".parse::<ClassFilter>().unwrap(), ClassFilter::Unrestricted);
        assert_eq!("7".parse::<ClassFilter>().unwrap(), ClassFilter::Single(7));
        assert_eq!("0 - 11".parse::<ClassFilter>().unwrap(), ClassFilter::Range(0, 11));
        assert_eq!(
            "2,3".parse::<ClassFilter>().unwrap(),
            ClassFilter::List([2, 3].into_iter().collect())
        );
        assert_eq!(
            "[16;17;18]".parse::<ClassFilter>().unwrap(),
            ClassFilter::List([16, 17, 18].into_iter().collect())
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!("5-2".parse::<ClassFilter>().is_err());
        assert!("wizard".parse::<ClassFilter>().is_err());
        assert!("300".parse::<ClassFilter>().is_err());
    }

    #[test]
    fn test_parse_combined_forms() {
        assert_eq!(
            "0-3,5".parse::<ClassFilter>().unwrap(),
            ClassFilter::List([0, 1, 2, 3, 5].into_iter().collect())
        );
        assert_eq!(
            "[2;3],7".parse::<ClassFilter>().unwrap(),
            ClassFilter::List([2, 3, 7].into_iter().collect())
        );
        assert_eq!(
            "16-17, [24;25], 28".parse::<ClassFilter>().unwrap().codes(),
            vec![16, 17, 24, 25, 28]
        );
        assert!("0-3,x".parse::<ClassFilter>().is_err());
        assert!("[2;3],9-4".parse::<ClassFilter>().is_err());
    }

    #[test]
    fn test_codes() {
        assert!(ClassFilter::Unrestricted.codes().is_empty());
        assert_eq!(ClassFilter::Range(24, 26).codes(), vec![24, 25, 26]);

        let filter: ClassFilter = [3, 2].into_iter().collect();
        assert_eq!(filter.codes(), vec![2, 3]);
    }

    #[test]
    fn test_from_iter_collapses() {
        assert_eq!(std::iter::empty::<u8>().collect::<ClassFilter>(), ClassFilter::Unrestricted);
        assert_eq!([9, 9].into_iter().collect::<ClassFilter>(), ClassFilter::Single(9));
    }

    #[test]
    fn test_default_bounds() {
        let filters = SearchFilters::default();
        assert_eq!(filters.rarity, 0..=4);
        assert_eq!(filters.level, 1..=20);
        assert!(filters.realms.is_empty());
    }
}
