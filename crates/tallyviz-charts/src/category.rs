//! Fixed category domains: letters, months and passenger regions.

use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::Hash;
use tallyviz_config::DEFAULT_MONTH_LABELS;

/// A category drawn from a domain that is known before any data is seen.
///
/// The order of [`Category::domain`] is authoritative: band scales assign
/// slots in this order whether or not a category has observations.
pub trait Category:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Every category, in declared order.
    fn domain() -> &'static [Self];

    /// Position of this category in [`Category::domain`].
    fn index(self) -> usize;
}

/// One of the 26 lowercase ASCII letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(u8);

const fn letter_domain() -> [Letter; 26] {
    let mut out = [Letter(0); 26];
    let mut i = 0;
    while i < 26 {
        out[i] = Letter(i as u8);
        i += 1;
    }
    out
}

/// The letters `a` through `z`.
pub static LETTERS: [Letter; 26] = letter_domain();

impl Letter {
    /// Maps `a..=z` to a letter. Anything else, uppercase included, is `None`.
    pub const fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_lowercase() {
            Some(Self(c as u8 - b'a'))
        } else {
            None
        }
    }

    /// The letter as a lowercase `char`.
    pub const fn as_char(self) -> char {
        (b'a' + self.0) as char
    }
}

impl Category for Letter {
    fn domain() -> &'static [Self] {
        &LETTERS
    }

    fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Serialize for Letter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.as_char())
    }
}

/// A calendar month, January through December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u32")]
pub struct Month(u8);

const fn month_domain() -> [Month; 12] {
    let mut out = [Month(1); 12];
    let mut i = 0;
    while i < 12 {
        out[i] = Month(i as u8 + 1);
        i += 1;
    }
    out
}

/// The twelve months in calendar order.
pub static MONTHS: [Month; 12] = month_domain();

impl Month {
    /// Builds a month from its 1-based number.
    pub const fn new(number: u32) -> Option<Self> {
        if number >= 1 && number <= 12 {
            Some(Self(number as u8))
        } else {
            None
        }
    }

    /// 1-based month number.
    pub const fn number(self) -> u32 {
        self.0 as u32
    }

    /// Abbreviated English name.
    pub const fn abbreviation(self) -> &'static str {
        DEFAULT_MONTH_LABELS[self.0 as usize - 1]
    }
}

impl From<Month> for u32 {
    fn from(month: Month) -> Self {
        month.number()
    }
}

impl Category for Month {
    fn domain() -> &'static [Self] {
        &MONTHS
    }

    fn index(self) -> usize {
        usize::from(self.0) - 1
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Geography of a passenger count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Flights within the country.
    Domestic,
    /// Flights crossing a border.
    International,
}

/// Regions in stacking order, bottom first.
pub static REGIONS: [Region; 2] = [Region::Domestic, Region::International];

impl Region {
    /// Parses a free-text geography label, ignoring case and surrounding
    /// whitespace.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("domestic") {
            Some(Self::Domestic)
        } else if label.eq_ignore_ascii_case("international") {
            Some(Self::International)
        } else {
            None
        }
    }

    /// Lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Domestic => "domestic",
            Self::International => "international",
        }
    }
}

impl Category for Region {
    fn domain() -> &'static [Self] {
        &REGIONS
    }

    fn index(self) -> usize {
        match self {
            Self::Domestic => 0,
            Self::International => 1,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_domain_indexed<C: Category>() {
        for (i, category) in C::domain().iter().enumerate() {
            assert_eq!(category.index(), i, "{category} out of place");
        }
    }

    #[test]
    fn test_domains_are_ordered_and_indexed() {
        assert_domain_indexed::<Letter>();
        assert_domain_indexed::<Month>();
        assert_domain_indexed::<Region>();

        assert_eq!(Letter::domain().len(), 26);
        assert_eq!(Month::domain().len(), 12);
        assert!(LETTERS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_letter_from_char() {
        assert_eq!(Letter::from_char('a').map(Letter::as_char), Some('a'));
        assert_eq!(Letter::from_char('z').map(|l| l.index()), Some(25));
        assert_eq!(Letter::from_char('A'), None);
        assert_eq!(Letter::from_char('é'), None);
        assert_eq!(Letter::from_char('1'), None);
    }

    #[test]
    fn test_month_bounds_and_labels() {
        assert!(Month::new(0).is_none());
        assert!(Month::new(13).is_none());
        assert_eq!(Month::new(1).map(|m| m.to_string()), Some("Jan".to_string()));
        assert_eq!(Month::new(12).map(Month::index), Some(11));
    }

    #[test]
    fn test_region_parse_is_case_insensitive() {
        assert_eq!(Region::parse(" DOMESTIC "), Some(Region::Domestic));
        assert_eq!(Region::parse("International"), Some(Region::International));
        assert_eq!(Region::parse("intl"), None);
    }

    #[test]
    fn test_serialized_forms() {
        let letter = Letter::from_char('q');
        assert_eq!(serde_json::to_string(&letter).unwrap(), "\"q\"");
        assert_eq!(serde_json::to_string(&Month::new(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&Region::International).unwrap(),
            "\"international\""
        );
    }
}
