//! Month-range conventions for bucketing submissions into terms.
//!
//! The gateway uses two different conventions depending on the route and
//! they are deliberately kept apart here. The survey listing routes use
//! narrow windows: spring is April (Apr 1 to May 1), fall is November
//! (Nov 1 to Dec 1), no summer bucket. The editorial routes use wide,
//! year-covering windows: spring Jan-Apr, summer May-Aug, fall Sep-Dec,
//! ending at the last second of the end month.
//!
//! Do not unify these. They answer different questions (which submissions
//! show on a listing vs which belong to an editing cycle) and each call
//! site names the convention it wants. Custom spans are available through
//! [`QueryWindows::new`] for anything in between.

use chrono::{NaiveDate, NaiveDateTime};

use crate::term::{Semester, Term};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSpan {
    pub start_month: u32,
    pub end_month: u32,
}

impl MonthSpan {
    pub fn new(start_month: u32, end_month: u32) -> Self {
        Self {
            start_month,
            end_month,
        }
    }

    fn contains_month(&self, month: u32) -> bool {
        month >= self.start_month && month <= self.end_month
    }
}

/// How a span's upper bound is taken from its end month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndBound {
    /// Midnight on the first of the end month; the end month itself is
    /// excluded. The listing routes work this way.
    FirstOfEndMonth,
    /// The last second of the end month's last day, so the end month is
    /// included. The editorial routes work this way.
    EndOfEndMonth,
}

#[derive(Debug, Clone)]
pub struct QueryWindows {
    spring: MonthSpan,
    summer: Option<MonthSpan>,
    fall: MonthSpan,
    end_bound: EndBound,
}

impl QueryWindows {
    pub fn new(
        spring: MonthSpan,
        summer: Option<MonthSpan>,
        fall: MonthSpan,
        end_bound: EndBound,
    ) -> Self {
        Self {
            spring,
            summer,
            fall,
            end_bound,
        }
    }

    /// The narrow survey-listing convention.
    pub fn listing() -> Self {
        Self::new(
            MonthSpan::new(4, 5),
            None,
            MonthSpan::new(11, 12),
            EndBound::FirstOfEndMonth,
        )
    }

    /// The wide editorial convention.
    pub fn editorial() -> Self {
        Self::new(
            MonthSpan::new(1, 4),
            Some(MonthSpan::new(5, 8)),
            MonthSpan::new(9, 12),
            EndBound::EndOfEndMonth,
        )
    }

    fn span_for(&self, semester: Semester) -> Option<MonthSpan> {
        match semester {
            Semester::Spring => Some(self.spring),
            Semester::Summer => self.summer,
            Semester::Fall => Some(self.fall),
        }
    }

    /// Datetime bounds for `term` under this convention, or `None` when
    /// the convention has no bucket for the semester (summer under the
    /// listing windows).
    pub fn span(&self, term: Term) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let months = self.span_for(term.semester)?;

        let start = NaiveDate::from_ymd_opt(term.year, months.start_month, 1)?
            .and_hms_opt(0, 0, 0)?;

        let end = match self.end_bound {
            EndBound::FirstOfEndMonth => {
                NaiveDate::from_ymd_opt(term.year, months.end_month, 1)?.and_hms_opt(0, 0, 0)?
            }
            EndBound::EndOfEndMonth => last_day_of_month(term.year, months.end_month)?
                .and_hms_opt(23, 59, 59)?,
        };

        Some((start, end))
    }

    pub fn contains(&self, term: Term, datetime: NaiveDateTime) -> bool {
        match self.span(term) {
            Some((start, end)) => datetime >= start && datetime <= end,
            None => false,
        }
    }

    /// Which semester bucket a submit month falls into under this
    /// convention, if any.
    pub fn bucket(&self, month: u32) -> Option<Semester> {
        if self.spring.contains_month(month) {
            return Some(Semester::Spring);
        }
        if let Some(summer) = self.summer {
            if summer.contains_month(month) {
                return Some(Semester::Summer);
            }
        }
        if self.fall.contains_month(month) {
            return Some(Semester::Fall);
        }

        None
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };

    first_of_next.pred_opt()
}
