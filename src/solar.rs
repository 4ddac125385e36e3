// Civil (Gregorian) date handling on a single axis: whole days since the
// Unix epoch. Conversion works in years shifted to start on March 1, so
// the leap day falls at the end of the year and month starts never depend
// on leap years. The shifted calendar decomposes into 400-year cycles
// (146097 days), centuries (36524 days, short one leap day except the
// fourth), quadrennia (1461 days) and years (365 days, except the fourth
// of each quadrennium).

use std::ops::{Add, Sub};

use num_integer::Integer;
use thiserror::Error;

use crate::div_rem::ClampedDivRem;

const CYCLE_DAYS: i64 = 146_097;
const CENTURY_DAYS: i64 = 36_524;
const QUADRENNIUM_DAYS: i64 = 1_461;
const YEAR_DAYS: i64 = 365;

// Days from 1970-01-01 to 2000-03-01, the zero point of the shifted year.
const SHIFT_EPOCH_DAYS: i64 = 11_017;

// Day of the shifted year each month starts on; index 0 = March. The
// sentinel keeps month_from_day_of_year's initial guess in bounds.
const MONTH_STARTS: [u16; 13] = [0, 31, 61, 92, 122, 153, 184, 214, 245, 275, 306, 337, u16::MAX];

const MILLIS_PER_DAY: i64 = 86_400_000;

// The lunar table assumes civil time in China (UTC+8); epoch-millisecond
// input is floored to the civil day it falls in there.
const CST_OFFSET_MILLIS: i64 = 8 * 60 * 60 * 1000;

/// The components do not name a real Gregorian calendar date.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{year:04}-{month:02}-{day:02} is not a valid gregorian date")]
pub struct InvalidDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

/// A civil day, counted in whole days since 1970-01-01.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SolarDay {
    days: i64,
}

impl SolarDay {
    pub fn from_unix_days(days: i64) -> SolarDay {
        SolarDay { days }
    }

    pub fn unix_days(&self) -> i64 {
        self.days
    }

    /// The civil day in fixed UTC+8 containing the given epoch-millisecond
    /// instant.
    pub fn from_unix_millis(millis: i64) -> SolarDay {
        let (days, _) = (millis + CST_OFFSET_MILLIS).div_mod_floor(&MILLIS_PER_DAY);
        SolarDay { days }
    }

    /// Builds a day from a Gregorian calendar date, rejecting dates that do
    /// not exist (month outside 1-12, day outside the month).
    pub fn from_gregorian(year: i32, month: u8, day: u8) -> Result<SolarDay, InvalidDate> {
        if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
            return Err(InvalidDate { year, month, day });
        }

        // Shift so March is month 0 of a year that ends with February.
        let (year, month) = if month <= 2 {
            (year as i64 - 1, month + 9)
        } else {
            (year as i64, month - 3)
        };
        let (cycle, year_of_cycle) = (year - 2000).div_mod_floor(&400);
        let day_of_cycle = year_of_cycle * 365 + year_of_cycle / 4 - year_of_cycle / 100
            + MONTH_STARTS[month as usize] as i64
            + day as i64
            - 1;
        Ok(SolarDay {
            days: cycle * CYCLE_DAYS + day_of_cycle + SHIFT_EPOCH_DAYS,
        })
    }

    /// The date in `(year, month, day)` form.
    pub fn to_gregorian(&self) -> (i32, u8, u8) {
        let (cycle, day_of_cycle) = (self.days - SHIFT_EPOCH_DAYS).div_mod_floor(&CYCLE_DAYS);

        // The first three centuries of a cycle are 36524 days; the fourth
        // has the cycle's extra leap day, hence the clamped quotient. The
        // same applies to the years of a quadrennium, while quadrennia
        // within a century divide evenly.
        let (century, day_of_century) = day_of_cycle.clamped_div_rem(CENTURY_DAYS, 3_i64);
        let (quadrennium, day_of_quadrennium) = day_of_century.div_rem(&QUADRENNIUM_DAYS);
        let (year_of_quadrennium, day_of_year) = day_of_quadrennium.clamped_div_rem(YEAR_DAYS, 3_i64);

        let mut year = 2000 + 400 * cycle + 100 * century + 4 * quadrennium + year_of_quadrennium;
        let month_index = month_from_day_of_year(day_of_year as u16);
        let day = day_of_year as u16 - MONTH_STARTS[month_index] + 1;

        // Undo the March shift.
        let month = if month_index < 10 {
            month_index + 3
        } else {
            month_index - 9
        };
        if month <= 2 {
            year += 1;
        }
        (year as i32, month as u8, day as u8)
    }
}

impl Add<i64> for SolarDay {
    type Output = SolarDay;

    fn add(self, rhs: i64) -> SolarDay {
        SolarDay::from_unix_days(self.days + rhs)
    }
}

impl Sub for SolarDay {
    type Output = i64;

    fn sub(self, rhs: SolarDay) -> i64 {
        self.days - rhs.days
    }
}

fn month_from_day_of_year(day: u16) -> usize {
    let mut month = (day / 30) as usize;
    if day < MONTH_STARTS[month] {
        // Overshot the month start; move back.
        month -= 1;
    }
    month
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}
