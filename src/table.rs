// Each supported lunar year is described by one packed integer:
//
// - bits 4-15 hold one flag per lunar month, month m at bit (16 - m).
//   A set bit means the month has 30 days, a clear bit 29 days.
// - bits 0-3 hold the index (1-12) of the leap month, or 0 if the year
//   has none.
// - bit 16 tells whether the leap month, if any, has 30 days.
//
// The table is the classic 1900-2099 dataset shared by virtually every
// table-driven lunisolar implementation. Entry 0 is lunar year 1900,
// which begins on the solar day 1900-01-31.

use thiserror::Error;

pub(crate) const FIRST_YEAR: i32 = 1900;
pub(crate) const LAST_YEAR: i32 = 2099;

#[rustfmt::skip]
const LUNAR_INFO: [u32; 200] = [
    // 1900-1909
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2,
    // 1910-1919
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977,
    // 1920-1929
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970,
    // 1930-1939
    0x06566, 0x0d4a0, 0x0ea50, 0x06e95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950,
    // 1940-1949
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557,
    // 1950-1959
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0,
    // 1960-1969
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0,
    // 1970-1979
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b5a0, 0x195a6,
    // 1980-1989
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570,
    // 1990-1999
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0,
    // 2000-2009
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5,
    // 2010-2019
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930,
    // 2020-2029
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530,
    // 2030-2039
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45,
    // 2040-2049
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0,
    // 2050-2059
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0,
    // 2060-2069
    0x0a2e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4,
    // 2070-2079
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0,
    // 2080-2089
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160,
    // 2090-2099
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252,
];

/// The requested date falls outside the precomputed table, which covers
/// lunar years 1900 through 2099 (solar 1900-01-31 onwards).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("date is outside the supported range of the lunar table (1900-2099)")]
pub struct DateOutOfRange;

/// Month-length and leap-month data for one lunar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearInfo {
    year: i32,
    bits: u32,
}

impl YearInfo {
    /// Looks up the descriptor for a lunar year, failing outside 1900-2099.
    pub fn for_year(year: i32) -> Result<YearInfo, DateOutOfRange> {
        if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
            return Err(DateOutOfRange);
        }
        let bits = LUNAR_INFO[(year - FIRST_YEAR) as usize];
        Ok(YearInfo { year, bits })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Total number of days in the lunar year, leap month included.
    /// Always within 353..=355 for common years and 383..=385 for years
    /// with a leap month.
    pub fn days_in_year(&self) -> u16 {
        let big_months = (self.bits >> 4 & 0xfff).count_ones() as u16;
        12 * 29 + big_months + self.days_in_leap_month().unwrap_or(0)
    }

    /// Index of the leap month (1-12), or `None` if the year has none.
    pub fn leap_month(&self) -> Option<u8> {
        match self.bits & 0xf {
            0 => None,
            m => Some(m as u8),
        }
    }

    /// Length of the leap month, or `None` if the year has none.
    pub fn days_in_leap_month(&self) -> Option<u16> {
        self.leap_month()
            .map(|_| if self.bits & 0x10000 != 0 { 30 } else { 29 })
    }

    /// Length of the regular month `month` (1-12), ignoring any leap month.
    pub fn days_in_month(&self, month: u8) -> u16 {
        assert!((1..=12).contains(&month), "month {} not in 1..=12", month);
        if self.bits & (0x10000 >> month) != 0 {
            30
        } else {
            29
        }
    }

    /// Enumerates the months of the year in calendar order as
    /// `(month, is_leap, days)`. A leap month follows the regular month of
    /// the same number, so the sequence has 12 or 13 entries.
    pub(crate) fn month_slots(&self) -> impl Iterator<Item = (u8, bool, u16)> {
        let info = *self;
        (1..=12u8).flat_map(move |m| {
            let leap = (info.leap_month() == Some(m))
                .then(|| (m, true, info.days_in_leap_month().unwrap_or(29)));
            std::iter::once((m, false, info.days_in_month(m))).chain(leap)
        })
    }
}
