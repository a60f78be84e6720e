//! Game calendar. Plain civil dates, month-granularity ticks, and the term
//! arithmetic the lifecycle needs (term end = election date + term years − 1
//! day).

use crate::errors::CoreError;
use core::cmp::Ordering;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl GameDate {
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CoreError> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(CoreError::InvalidDate);
        }
        Ok(Self { year, month, day })
    }

    /// Infallible constructor for literals known valid at the call site.
    pub fn ymd(year: i32, month: u8, day: u8) -> Self {
        debug_assert!((1..=12).contains(&month));
        debug_assert!(day >= 1 && day <= days_in_month(year, month));
        Self { year, month, day }
    }

    /// First day of the next month (the monthly tick boundary).
    pub fn next_month(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1, day: 1 }
        } else {
            Self { year: self.year, month: self.month + 1, day: 1 }
        }
    }

    pub fn plus_months(self, months: u32) -> Self {
        let mut d = self;
        for _ in 0..months {
            d = d.next_month();
        }
        d
    }

    pub fn minus_months(self, months: u32) -> Self {
        let mut year = self.year;
        let mut month = self.month as i32;
        month -= months as i32;
        while month < 1 {
            month += 12;
            year -= 1;
        }
        let month = month as u8;
        let day = self.day.min(days_in_month(year, month));
        Self { year, month, day }
    }

    /// Same calendar day `years` later, clamped for Feb 29.
    pub fn plus_years(self, years: u32) -> Self {
        let year = self.year + years as i32;
        let day = self.day.min(days_in_month(year, self.month));
        Self { year, month: self.month, day }
    }

    pub fn prev_day(self) -> Self {
        if self.day > 1 {
            return Self { day: self.day - 1, ..self };
        }
        let (year, month) = if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        };
        Self { year, month, day: days_in_month(year, month) }
    }

    /// Term-end rule: election date + term length in years, minus one day.
    pub fn term_end(self, term_years: u32) -> Self {
        self.plus_years(term_years).prev_day()
    }
}

impl Ord for GameDate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}

impl PartialOrd for GameDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[inline]
fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

#[inline]
fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_end_is_one_day_short_of_the_anniversary() {
        let elected = GameDate::ymd(2028, 11, 7);
        assert_eq!(elected.term_end(4), GameDate::ymd(2032, 11, 6));
    }

    #[test]
    fn term_end_across_month_start() {
        let elected = GameDate::ymd(2029, 3, 1);
        assert_eq!(elected.term_end(2), GameDate::ymd(2031, 2, 28));
    }

    #[test]
    fn month_arithmetic_wraps_years() {
        let d = GameDate::ymd(2030, 11, 15);
        assert_eq!(d.plus_months(3), GameDate::ymd(2031, 2, 1));
        assert_eq!(d.minus_months(2), GameDate::ymd(2030, 9, 15));
        assert_eq!(GameDate::ymd(2030, 1, 20).minus_months(2), GameDate::ymd(2029, 11, 20));
    }

    #[test]
    fn invalid_dates_are_rejected() {
        assert!(GameDate::new(2030, 2, 30).is_err());
        assert!(GameDate::new(2030, 13, 1).is_err());
        assert!(GameDate::new(2032, 2, 29).is_ok());
    }
}
