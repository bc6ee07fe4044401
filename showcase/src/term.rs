use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TermParseError {
    #[error("unknown semester code: {0}")]
    UnknownSemester(String),

    #[error("invalid year: {0}")]
    InvalidYear(String),
}

/// A queryable semester. `su` only appears on the editorial routes; the
/// public listing routes accept `sp` and `fa` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Semester {
    Spring,
    Summer,
    Fall,
}

impl Semester {
    pub fn code(self) -> &'static str {
        match self {
            Semester::Spring => "sp",
            Semester::Summer => "su",
            Semester::Fall => "fa",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Semester::Spring => "Spring",
            Semester::Summer => "Summer",
            Semester::Fall => "Fall",
        }
    }
}

impl FromStr for Semester {
    type Err = TermParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sp" => Ok(Semester::Spring),
            "su" => Ok(Semester::Summer),
            "fa" => Ok(Semester::Fall),
            other => Err(TermParseError::UnknownSemester(other.to_string())),
        }
    }
}

impl Serialize for Semester {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Semester {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

/// The editorial routes additionally accept the `all` sentinel, which
/// widens the query window to the whole year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemesterFilter {
    One(Semester),
    All,
}

impl SemesterFilter {
    pub fn code(self) -> &'static str {
        match self {
            SemesterFilter::One(semester) => semester.code(),
            SemesterFilter::All => "all",
        }
    }
}

impl FromStr for SemesterFilter {
    type Err = TermParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(SemesterFilter::All);
        }
        s.parse().map(SemesterFilter::One)
    }
}

/// A (semester, year) pair. Derived on each page load, never stored by the
/// gateway itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub semester: Semester,
    pub year: i32,
}

impl Term {
    pub fn new(semester: Semester, year: i32) -> Self {
        Self { semester, year }
    }

    /// Parse the `sp`/`fa`/`su` code and a 4-digit year string, as they
    /// arrive in query parameters. Unknown codes are an error, never a
    /// silent default.
    pub fn parse(code: &str, year: &str) -> Result<Self, TermParseError> {
        let semester = code.parse()?;
        let year = year
            .parse()
            .map_err(|_| TermParseError::InvalidYear(year.to_string()))?;

        Ok(Self { semester, year })
    }

    /// Backward step of the resolution walk: fall stays within the year,
    /// spring crosses into the previous year's fall. The walk never
    /// produces summer, but an explicit summer selection steps to its own
    /// spring.
    pub fn previous(self) -> Term {
        match self.semester {
            Semester::Fall => Term::new(Semester::Spring, self.year),
            Semester::Summer => Term::new(Semester::Spring, self.year),
            Semester::Spring => Term::new(Semester::Fall, self.year - 1),
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.semester.label(), self.year)
    }
}

/// Date-based default for the public listings: fall once August starts,
/// spring before that.
pub fn default_term(today: NaiveDate) -> Term {
    let semester = if today.month() >= 8 {
        Semester::Fall
    } else {
        Semester::Spring
    };

    Term::new(semester, today.year())
}

/// Date-based current term for the editorial views, which recognize a
/// summer bucket: Jan-Apr spring, May-Aug summer, Sep-Dec fall.
pub fn editorial_term(today: NaiveDate) -> Term {
    let semester = match today.month() {
        1..=4 => Semester::Spring,
        5..=8 => Semester::Summer,
        _ => Semester::Fall,
    };

    Term::new(semester, today.year())
}

/// The term dropdown candidates: this year's spring and fall, then last
/// year's.
pub fn recent_terms(today: NaiveDate) -> Vec<Term> {
    let year = today.year();

    vec![
        Term::new(Semester::Spring, year),
        Term::new(Semester::Fall, year),
        Term::new(Semester::Spring, year - 1),
        Term::new(Semester::Fall, year - 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!(
            Term::parse("sp", "2025"),
            Ok(Term::new(Semester::Spring, 2025))
        );
        assert_eq!(
            Term::parse("fa", "2024"),
            Ok(Term::new(Semester::Fall, 2024))
        );
        assert_eq!(
            Term::parse("spring", "2025"),
            Err(TermParseError::UnknownSemester("spring".to_string()))
        );
        assert_eq!(
            Term::parse("sp", "20x5"),
            Err(TermParseError::InvalidYear("20x5".to_string()))
        );
    }

    #[test]
    fn test_semester_filter() {
        assert_eq!("all".parse(), Ok(SemesterFilter::All));
        assert_eq!("ALL".parse(), Ok(SemesterFilter::All));
        assert_eq!("su".parse(), Ok(SemesterFilter::One(Semester::Summer)));
        assert!("winter".parse::<SemesterFilter>().is_err());
    }

    #[test]
    fn test_previous_steps() {
        let fall = Term::new(Semester::Fall, 2024);
        let spring = fall.previous();
        assert_eq!(spring, Term::new(Semester::Spring, 2024));
        assert_eq!(spring.previous(), Term::new(Semester::Fall, 2023));
        assert_eq!(
            Term::new(Semester::Summer, 2024).previous(),
            Term::new(Semester::Spring, 2024)
        );
    }

    #[test]
    fn test_default_term_july_is_spring() {
        assert_eq!(
            default_term(date(2025, 7, 15)),
            Term::new(Semester::Spring, 2025)
        );
        assert_eq!(
            default_term(date(2025, 8, 1)),
            Term::new(Semester::Fall, 2025)
        );
    }

    #[test]
    fn test_editorial_term_buckets() {
        assert_eq!(
            editorial_term(date(2025, 3, 1)),
            Term::new(Semester::Spring, 2025)
        );
        assert_eq!(
            editorial_term(date(2025, 6, 1)),
            Term::new(Semester::Summer, 2025)
        );
        assert_eq!(
            editorial_term(date(2025, 10, 1)),
            Term::new(Semester::Fall, 2025)
        );
    }

    #[test]
    fn test_recent_terms_order() {
        let terms = recent_terms(date(2025, 2, 1));
        assert_eq!(
            terms,
            vec![
                Term::new(Semester::Spring, 2025),
                Term::new(Semester::Fall, 2025),
                Term::new(Semester::Spring, 2024),
                Term::new(Semester::Fall, 2024),
            ]
        );
    }

    #[test]
    fn test_display_label() {
        assert_eq!(Term::new(Semester::Fall, 2025).to_string(), "Fall 2025");
    }
}
