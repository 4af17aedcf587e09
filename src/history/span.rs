//! Spans of centuries, as written in the author reference file.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DiachronError, Result};
use crate::history::time::{Era, TimeDescr, before, parse_time};

static SPAN_EXPR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(\s*(\?|\d+[ad](\s*,\s*\d+[ad])*)\s*\)$").expect("span pattern is valid")
});

/// An interval of labeled centuries.
///
/// `start` is never after `end`, except for the unknown span produced by the
/// `(?)` marker, whose bounds are both [`Era::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: TimeDescr,
    pub end: TimeDescr,
}

impl TimeSpan {
    /// Parse `(?)`, `(<date>)` or `(<date>, <date>)`.
    ///
    /// ```
    /// use diachron::history::{Era, TimeDescr, TimeSpan};
    ///
    /// let span = TimeSpan::parse("(1a, 1d)").unwrap();
    /// assert_eq!(span.start, TimeDescr::new(1, Era::BC));
    /// assert_eq!(span.end, TimeDescr::new(1, Era::AC));
    ///
    /// assert!(TimeSpan::parse("(1d, 1a)").is_err());
    /// assert!(TimeSpan::parse("(?)").unwrap().is_unknown());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let captures = SPAN_EXPR
            .captures(text)
            .ok_or_else(|| DiachronError::invalid_date(text))?;
        let inner = &captures[1];

        if inner == "?" {
            return Ok(Self::unknown());
        }

        let dates = inner
            .split(',')
            .map(parse_time)
            .collect::<Result<Vec<_>>>()?;

        match dates.as_slice() {
            [single] => Ok(TimeSpan::new(*single, *single)),
            [start, end] => {
                if start != end && !before(start, end) {
                    return Err(DiachronError::invalid_ordering(format!(
                        "{start} is not before {end}"
                    )));
                }
                Ok(TimeSpan::new(*start, *end))
            }
            _ => Err(DiachronError::invalid_date(format!(
                "expected at most two dates in {text}"
            ))),
        }
    }

    pub fn new(start: TimeDescr, end: TimeDescr) -> Self {
        TimeSpan { start, end }
    }

    pub fn unknown() -> Self {
        TimeSpan::new(TimeDescr::unknown(), TimeDescr::unknown())
    }

    pub fn is_unknown(&self) -> bool {
        self.start.is_unknown() || self.end.is_unknown()
    }

    /// Every century the span covers, earliest first.
    ///
    /// A span running from BC into AC passes through century `0 AC` even though
    /// no such century exists historically.
    pub fn between(&self) -> Vec<TimeDescr> {
        let (start, end) = (self.start, self.end);

        if start == end {
            return vec![start];
        }

        if self.is_unknown() || before(&end, &start) {
            return Vec::new();
        }

        let mut result = match (start.era, end.era) {
            (Era::BC, Era::AC) => (1..=start.century)
                .rev()
                .map(|c| TimeDescr::new(c, Era::BC))
                .chain((0..=end.century).map(|c| TimeDescr::new(c, Era::AC)))
                .collect(),
            (Era::AC, Era::AC) => (start.century..=end.century)
                .map(|c| TimeDescr::new(c, Era::AC))
                .collect(),
            (Era::BC, Era::BC) => (end.century..=start.century)
                .map(|c| TimeDescr::new(c, Era::BC))
                .collect(),
            _ => Vec::new(),
        };

        result.sort_by(TimeDescr::chronological_cmp);
        result
    }
}
