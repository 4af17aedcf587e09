//! Labeled centuries and their era-aware ordering.
//!
//! # Examples
//!
//! ```
//! use diachron::history::{Era, TimeDescr, before, parse_time};
//!
//! let augustan = parse_time("1a").unwrap();
//! assert_eq!(augustan, TimeDescr::new(1, Era::BC));
//! assert_eq!(augustan.to_string(), "1 BC");
//!
//! // A larger BC number lies further back in time.
//! assert!(before(&TimeDescr::new(5, Era::BC), &augustan));
//! assert!(!before(&augustan, &augustan));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DiachronError, Result};

static TIME_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)([ad])$").expect("century token pattern is valid")
});

/// The era a century is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Era {
    /// Before Christ (`a` marker).
    BC,
    /// After Christ (`d` marker).
    AC,
    /// Unknown date, never comparable.
    Unknown,
}

/// One labeled century.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeDescr {
    pub century: u32,
    pub era: Era,
}

impl TimeDescr {
    pub fn new(century: u32, era: Era) -> Self {
        TimeDescr { century, era }
    }

    /// The sentinel for an unknown date.
    pub fn unknown() -> Self {
        TimeDescr {
            century: 0,
            era: Era::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.era == Era::Unknown
    }

    /// The compact `<digits><a|d>` form accepted by [`parse_time`].
    ///
    /// Unknown dates have no token and yield `None`.
    pub fn token(&self) -> Option<String> {
        match self.era {
            Era::BC => Some(format!("{}a", self.century)),
            Era::AC => Some(format!("{}d", self.century)),
            Era::Unknown => None,
        }
    }

    /// Ordering usable for sorting sequences that contain no unknown dates.
    ///
    /// Unknown dates compare equal to everything, which keeps sorts stable
    /// but carries no meaning.
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        if before(self, other) {
            Ordering::Less
        } else if before(other, self) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl fmt::Display for TimeDescr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.era {
            Era::BC => write!(f, "{} BC", self.century),
            Era::AC => write!(f, "{} AC", self.century),
            Era::Unknown => Ok(()),
        }
    }
}

impl FromStr for TimeDescr {
    type Err = DiachronError;

    fn from_str(s: &str) -> Result<Self> {
        parse_time(s)
    }
}

/// Parse a `<digits><a|d>` token such as `3a` or `12d`.
pub fn parse_time(token: &str) -> Result<TimeDescr> {
    let token = token.trim();
    let captures = TIME_TOKEN
        .captures(token)
        .ok_or_else(|| DiachronError::invalid_date(token))?;

    let century = captures[1]
        .parse::<u32>()
        .map_err(|_| DiachronError::invalid_date(token))?;
    let era = match &captures[2] {
        "a" => Era::BC,
        _ => Era::AC,
    };

    Ok(TimeDescr { century, era })
}

/// Whether `first` lies strictly earlier on the calendar than `second`.
///
/// Any comparison involving [`Era::Unknown`] is false. As a consequence the
/// relation is neither total nor transitive once unknown dates are mixed in.
pub fn before(first: &TimeDescr, second: &TimeDescr) -> bool {
    match (first.era, second.era) {
        (Era::Unknown, _) | (_, Era::Unknown) => false,
        (Era::BC, Era::AC) => true,
        (Era::AC, Era::BC) => false,
        (Era::AC, Era::AC) => first.century < second.century,
        // BC centuries count backwards
        (Era::BC, Era::BC) => second.century < first.century,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bc(c: u32) -> TimeDescr {
        TimeDescr::new(c, Era::BC)
    }

    fn ac(c: u32) -> TimeDescr {
        TimeDescr::new(c, Era::AC)
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("5a").unwrap(), bc(5));
        assert_eq!(parse_time("12d").unwrap(), ac(12));
        assert_eq!(parse_time("0d").unwrap(), ac(0));
        assert_eq!(parse_time(" 3a ").unwrap(), bc(3));
    }

    #[test]
    fn test_parse_time_rejects_bad_tokens() {
        for token in ["", "a", "5", "5A", "5D", "5b", "-5a", "5ad", "x5a", "5 a"] {
            match parse_time(token) {
                Err(DiachronError::InvalidDateFormat(_)) => {}
                other => panic!("expected InvalidDateFormat for {token:?}, got {other:?}"),
            }
        }
        // Numeric overflow is also a format error
        assert!(parse_time("99999999999999999999d").is_err());
    }

    #[test]
    fn test_token_round_trip() {
        for token in ["0a", "1a", "9a", "0d", "4d", "21d"] {
            let parsed = parse_time(token).unwrap();
            assert_eq!(parsed.token().as_deref(), Some(token));
            let reparsed: TimeDescr = parsed.token().unwrap().parse().unwrap();
            assert_eq!(reparsed, parsed);
            assert_eq!(reparsed.to_string(), parsed.to_string());
        }
        assert_eq!(TimeDescr::unknown().token(), None);
        assert_eq!(TimeDescr::unknown().to_string(), "");
    }

    #[test]
    fn test_display() {
        assert_eq!(bc(5).to_string(), "5 BC");
        assert_eq!(ac(2).to_string(), "2 AC");
    }

    #[test]
    fn test_before_orders_eras() {
        assert!(before(&bc(1), &ac(0)));
        assert!(before(&bc(1), &ac(5)));
        assert!(!before(&ac(0), &bc(1)));

        assert!(before(&ac(1), &ac(2)));
        assert!(!before(&ac(2), &ac(1)));

        assert!(before(&bc(5), &bc(1)));
        assert!(!before(&bc(1), &bc(5)));
    }

    #[test]
    fn test_before_is_irreflexive() {
        for t in [bc(0), bc(3), ac(0), ac(7)] {
            assert!(!before(&t, &t));
        }
    }

    #[test]
    fn test_before_with_unknown() {
        let unknown = TimeDescr::unknown();
        for t in [bc(3), ac(3), unknown] {
            assert!(!before(&unknown, &t));
            assert!(!before(&t, &unknown));
        }
    }

    #[test]
    fn test_chronological_cmp() {
        let mut dates = vec![ac(2), bc(1), ac(0), bc(4)];
        dates.sort_by(TimeDescr::chronological_cmp);
        assert_eq!(dates, vec![bc(4), bc(1), ac(0), ac(2)]);
    }
}
