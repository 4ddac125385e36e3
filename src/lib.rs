//! Chinese lunisolar calendar conversion.
//!
//! Converts solar (Gregorian) dates into the traditional Chinese calendar
//! using the classic precomputed table covering lunar years 1900-2099, and
//! renders the result in traditional terms: stem-branch year name, zodiac
//! animal, month and day names.
//!
//! ```
//! use nongli::{LunarDate, SolarDay};
//!
//! let day = SolarDay::from_gregorian(2023, 1, 22).unwrap();
//! let date = LunarDate::from_solar_day(day).unwrap();
//!
//! assert_eq!(2023, date.year());
//! assert_eq!((1, 1, false), (date.month(), date.day(), date.is_leap_month()));
//! assert_eq!("癸卯兔年正月初一", date.to_string());
//! ```
//!
//! Epoch-millisecond input is interpreted as civil time in fixed UTC+8,
//! matching the timezone the table has always been used with:
//!
//! ```
//! use nongli::LunarDate;
//!
//! let date = LunarDate::from_unix_millis(1_674_316_800_000).unwrap();
//! assert_eq!("正月", date.month_name());
//! ```

pub use lunar::{new_year_day, ConvertError, InvalidLunarDate, LunarDate};
pub use solar::{InvalidDate, SolarDay};
pub use table::{DateOutOfRange, YearInfo};

mod div_rem;
pub mod fmt;
mod lunar;
mod solar;
mod table;
