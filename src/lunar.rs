use lazy_static::lazy_static;
use thiserror::Error;

use crate::fmt;
use crate::solar::{InvalidDate, SolarDay};
use crate::table::{DateOutOfRange, YearInfo, FIRST_YEAR, LAST_YEAR};

// Solar day of lunar 1900-01-01, i.e. 1900-01-31.
const EPOCH_DAY: i64 = -25_537;

/// A span of solar days covered by one lunar year. The start of the next
/// segment is always `start_day + duration_days`.
struct YearSegment {
    year: i32,
    start_day: i64,
    duration_days: u16,
}

lazy_static! {
    static ref YEAR_SEGMENTS: Vec<YearSegment> = {
        let mut segments = Vec::with_capacity((LAST_YEAR - FIRST_YEAR + 1) as usize);
        let mut start_day = EPOCH_DAY;
        for year in FIRST_YEAR..=LAST_YEAR {
            let info = YearInfo::for_year(year).expect("year is within the table");
            let duration_days = info.days_in_year();
            segments.push(YearSegment {
                year,
                start_day,
                duration_days,
            });
            start_day += duration_days as i64;
        }
        segments
    };
}

fn segment_for_day(day: SolarDay) -> Result<&'static YearSegment, DateOutOfRange> {
    let segments = YEAR_SEGMENTS.as_slice();
    let day = day.unix_days();
    let index = segments.partition_point(|s| s.start_day <= day);
    if index == 0 {
        return Err(DateOutOfRange);
    }
    let segment = &segments[index - 1];
    if day < segment.start_day + segment.duration_days as i64 {
        Ok(segment)
    } else {
        Err(DateOutOfRange)
    }
}

fn segment_for_year(year: i32) -> Result<&'static YearSegment, DateOutOfRange> {
    if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
        return Err(DateOutOfRange);
    }
    Ok(&YEAR_SEGMENTS[(year - FIRST_YEAR) as usize])
}

/// First solar day of a lunar year (the Chinese New Year).
pub fn new_year_day(year: i32) -> Result<SolarDay, DateOutOfRange> {
    segment_for_year(year).map(|s| SolarDay::from_unix_days(s.start_day))
}

/// The components do not name a date in the supported lunar calendar:
/// month or day out of range, a leap month the year does not have, or a
/// year outside the table.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{year}-{month}-{day} (leap: {leap}) is not a valid lunar date")]
pub struct InvalidLunarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub leap: bool,
}

/// Why a Gregorian date could not be converted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertError {
    #[error(transparent)]
    InvalidDate(#[from] InvalidDate),
    #[error(transparent)]
    OutOfRange(#[from] DateOutOfRange),
}

/// A date in the Chinese lunisolar calendar.
///
/// The year number follows the solar year the lunar year begins in. A
/// leap month carries the number of the regular month it follows, with
/// `leap` set to tell the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LunarDate {
    year: i32,
    month: u8,
    day: u8,
    leap: bool,
}

impl LunarDate {
    /// Converts a solar day to its lunar date.
    ///
    /// Fails for days before 1900-01-31 or past the last day of lunar
    /// year 2099.
    pub fn from_solar_day(day: SolarDay) -> Result<LunarDate, DateOutOfRange> {
        let segment = segment_for_day(day)?;
        let info = YearInfo::for_year(segment.year).expect("segment year is within the table");

        // Walk the months in calendar order, leap slot right after its
        // regular month, until the remaining offset falls inside one.
        let mut offset = (day.unix_days() - segment.start_day) as u16;
        for (month, leap, days) in info.month_slots() {
            if offset < days {
                return Ok(LunarDate {
                    year: segment.year,
                    month,
                    day: (offset + 1) as u8,
                    leap,
                });
            }
            offset -= days;
        }
        unreachable!("segment duration equals the sum of its month slots")
    }

    /// Converts an epoch-millisecond instant, read as civil time in fixed
    /// UTC+8.
    pub fn from_unix_millis(millis: i64) -> Result<LunarDate, DateOutOfRange> {
        LunarDate::from_solar_day(SolarDay::from_unix_millis(millis))
    }

    /// Converts a Gregorian calendar date.
    pub fn from_gregorian(year: i32, month: u8, day: u8) -> Result<LunarDate, ConvertError> {
        let day = SolarDay::from_gregorian(year, month, day)?;
        Ok(LunarDate::from_solar_day(day)?)
    }

    /// Builds a lunar date from its components, validating them against
    /// the year's month layout.
    pub fn new(year: i32, month: u8, day: u8, leap: bool) -> Result<LunarDate, InvalidLunarDate> {
        let invalid = InvalidLunarDate {
            year,
            month,
            day,
            leap,
        };
        let info = YearInfo::for_year(year).map_err(|DateOutOfRange| invalid)?;
        if !(1..=12).contains(&month) || day == 0 {
            return Err(invalid);
        }
        let days = if leap {
            if info.leap_month() != Some(month) {
                return Err(invalid);
            }
            info.days_in_leap_month().unwrap_or(0)
        } else {
            info.days_in_month(month)
        };
        if day as u16 > days {
            return Err(invalid);
        }
        Ok(LunarDate {
            year,
            month,
            day,
            leap,
        })
    }

    /// The solar day this lunar date falls on. Exact inverse of
    /// [`LunarDate::from_solar_day`].
    pub fn to_solar_day(&self) -> SolarDay {
        let segment = segment_for_year(self.year).expect("constructed dates lie within the table");
        let info = YearInfo::for_year(self.year).expect("constructed dates lie within the table");
        let mut offset = 0_i64;
        for (month, leap, days) in info.month_slots() {
            if (month, leap) == (self.month, self.leap) {
                break;
            }
            offset += days as i64;
        }
        SolarDay::from_unix_days(segment.start_day + offset + self.day as i64 - 1)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Lunar month number, 1-12. A leap month repeats the number of the
    /// month it follows; see [`LunarDate::is_leap_month`].
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Lunar day of month, 1-30.
    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn is_leap_month(&self) -> bool {
        self.leap
    }

    /// Month name such as 正月 or 闰六月.
    pub fn month_name(&self) -> String {
        fmt::month_name(self.month, self.leap)
    }

    /// Day name such as 初一 or 廿三.
    pub fn day_name(&self) -> String {
        fmt::day_name(self.day)
    }

    /// Stem-branch year name such as 癸卯.
    pub fn year_name(&self) -> String {
        fmt::year_name(self.year)
    }

    /// Zodiac animal of the year, such as 兔.
    pub fn zodiac(&self) -> &'static str {
        fmt::zodiac(self.year)
    }
}

impl std::fmt::Display for LunarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}年{}{}",
            self.year_name(),
            self.zodiac(),
            self.month_name(),
            self.day_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lunar(y: i32, m: u8, d: u8) -> Result<LunarDate, ConvertError> {
        LunarDate::from_gregorian(y, m, d)
    }

    fn ymdl(date: LunarDate) -> (i32, u8, u8, bool) {
        (date.year(), date.month(), date.day(), date.is_leap_month())
    }

    #[test]
    fn epoch_is_first_day_of_lunar_1900() {
        let date = lunar(1900, 1, 31).unwrap();
        assert_eq!((1900, 1, 1, false), ymdl(date));
    }

    #[test]
    fn known_new_year_days() {
        for (year, (y, m, d)) in [
            (1900, (1900, 1, 31)),
            (1912, (1912, 2, 18)),
            (1949, (1949, 1, 29)),
            (1950, (1950, 2, 17)),
            (2000, (2000, 2, 5)),
            (2008, (2008, 2, 7)),
            (2020, (2020, 1, 25)),
            (2023, (2023, 1, 22)),
            (2024, (2024, 2, 10)),
            (2025, (2025, 1, 29)),
        ] {
            let solar = SolarDay::from_gregorian(y, m, d).unwrap();
            assert_eq!(Ok(solar), new_year_day(year), "new year {year}");
            assert_eq!((year, 1, 1, false), ymdl(lunar(y, m, d).unwrap()));
        }
    }

    #[test]
    fn last_day_of_previous_year() {
        // 2023-01-21 is the day before Chinese New Year 2023: the 30th day
        // of the last month of lunar 2022.
        assert_eq!((2022, 12, 30, false), ymdl(lunar(2023, 1, 21).unwrap()));
    }

    #[test]
    fn leap_month_boundaries_2017() {
        // Lunar 2017 has a leap sixth month starting on 2017-07-23.
        assert_eq!((2017, 6, 29, false), ymdl(lunar(2017, 7, 22).unwrap()));
        assert_eq!((2017, 6, 1, true), ymdl(lunar(2017, 7, 23).unwrap()));
        assert_eq!((2017, 6, 30, true), ymdl(lunar(2017, 8, 21).unwrap()));
        assert_eq!((2017, 7, 1, false), ymdl(lunar(2017, 8, 22).unwrap()));
    }

    #[test]
    fn mid_month_days() {
        // Lantern festival 2023: the 15th of the first month.
        assert_eq!((2023, 1, 15, false), ymdl(lunar(2023, 2, 5).unwrap()));
    }

    #[test]
    fn out_of_range_days_are_rejected() {
        assert!(lunar(1900, 1, 30).is_err());
        assert!(lunar(1899, 6, 15).is_err());
        assert!(lunar(2100, 6, 1).is_err());
        assert_eq!(Err(DateOutOfRange), new_year_day(1899));
        assert_eq!(Err(DateOutOfRange), new_year_day(2100));
    }

    #[test]
    fn malformed_gregorian_input_is_rejected() {
        assert!(matches!(
            lunar(2023, 2, 29),
            Err(ConvertError::InvalidDate(_))
        ));
        assert!(matches!(
            lunar(1850, 1, 1),
            Err(ConvertError::OutOfRange(_))
        ));
    }

    #[test]
    fn millis_input_uses_cst_civil_days() {
        // 1900-01-31 00:00:00 +08:00.
        let date = LunarDate::from_unix_millis(-2_206_425_600_000).unwrap();
        assert_eq!((1900, 1, 1, false), ymdl(date));
        assert!(LunarDate::from_unix_millis(-2_206_425_600_001).is_err());

        // 2023-01-22 00:00:00 +08:00 and the last millisecond before it.
        let date = LunarDate::from_unix_millis(1_674_316_800_000).unwrap();
        assert_eq!((2023, 1, 1, false), ymdl(date));
        let date = LunarDate::from_unix_millis(1_674_316_799_999).unwrap();
        assert_eq!((2022, 12, 30, false), ymdl(date));
    }

    #[test]
    fn component_validation() {
        assert!(LunarDate::new(2023, 1, 1, false).is_ok());
        assert!(LunarDate::new(2023, 2, 1, true).is_ok());
        // 2023's leap month is the second, not the sixth.
        assert!(LunarDate::new(2023, 6, 1, true).is_err());
        // The leap second month of 2023 has 29 days.
        assert!(LunarDate::new(2023, 2, 30, true).is_err());
        // The first month of 2023 has 29 days.
        assert!(LunarDate::new(2023, 1, 30, false).is_err());
        assert!(LunarDate::new(2023, 13, 1, false).is_err());
        assert!(LunarDate::new(2023, 1, 0, false).is_err());
        assert!(LunarDate::new(1899, 1, 1, false).is_err());
    }

    #[test]
    fn solar_round_trip() {
        // Every day of a leap-month year and a common year maps back to
        // the solar day it came from.
        for start_year in [2017, 2024] {
            let start = new_year_day(start_year).unwrap();
            let days = YearInfo::for_year(start_year).unwrap().days_in_year();
            for offset in 0..days as i64 {
                let solar = start + offset;
                let date = LunarDate::from_solar_day(solar).unwrap();
                assert_eq!(solar, date.to_solar_day(), "{:?}", date);
                let rebuilt =
                    LunarDate::new(date.year(), date.month(), date.day(), date.is_leap_month());
                assert_eq!(Ok(date), rebuilt);
            }
        }
    }

    #[test]
    fn display_rendering() {
        assert_eq!("癸卯兔年正月初一", lunar(2023, 1, 22).unwrap().to_string());
        assert_eq!("庚子鼠年正月初一", lunar(1900, 1, 31).unwrap().to_string());
        assert_eq!("丁酉鸡年闰六月初一", lunar(2017, 7, 23).unwrap().to_string());
    }
}
