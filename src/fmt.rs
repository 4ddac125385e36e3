//! Traditional Chinese renderings of lunar dates: month and day names,
//! stem-branch year names and zodiac animals.

const MONTH_NAMES: [&str; 12] = [
    "正", "二", "三", "四", "五", "六", "七", "八", "九", "十", "十一", "腊",
];

const DAY_TENS: [&str; 4] = ["初", "十", "廿", "卅"];
const DIGITS: [&str; 9] = ["一", "二", "三", "四", "五", "六", "七", "八", "九"];

const STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
const BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

const ZODIAC: [&str; 12] = [
    "鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪",
];

/// Name of a lunar month, 正月 through 腊月, with a 闰 prefix for leap
/// months.
///
/// # Panics
///
/// Panics if `month` is not in `1..=12`.
pub fn month_name(month: u8, leap: bool) -> String {
    assert!((1..=12).contains(&month), "month {} not in 1..=12", month);
    let mut name = String::new();
    if leap {
        name.push('闰');
    }
    name.push_str(MONTH_NAMES[(month - 1) as usize]);
    name.push('月');
    name
}

/// Name of a lunar day of month: 初一 through 三十.
///
/// Days 10, 20 and 30 have fixed names; every other day combines a tens
/// prefix with a digit, e.g. 15 is 十五 and 25 is 廿五.
///
/// # Panics
///
/// Panics if `day` is not in `1..=30`.
pub fn day_name(day: u8) -> String {
    match day {
        10 => "初十".to_string(),
        20 => "二十".to_string(),
        30 => "三十".to_string(),
        1..=29 => format!(
            "{}{}",
            DAY_TENS[(day / 10) as usize],
            DIGITS[(day % 10 - 1) as usize]
        ),
        _ => panic!("day {} not in 1..=30", day),
    }
}

/// Stem-branch (干支) name of a lunar year, e.g. 庚子 for 1900.
pub fn year_name(year: i32) -> String {
    let position = year - 1900 + 36;
    format!(
        "{}{}",
        STEMS[position.rem_euclid(10) as usize],
        BRANCHES[position.rem_euclid(12) as usize]
    )
}

/// Zodiac animal of a lunar year, e.g. 鼠 for 1900.
pub fn zodiac(year: i32) -> &'static str {
    ZODIAC[(year - 4).rem_euclid(12) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names() {
        assert_eq!("正月", month_name(1, false));
        assert_eq!("闰二月", month_name(2, true));
        assert_eq!("十月", month_name(10, false));
        assert_eq!("十一月", month_name(11, false));
        assert_eq!("腊月", month_name(12, false));
    }

    #[test]
    fn day_names() {
        for (name, day) in [
            ("初一", 1),
            ("初九", 9),
            ("初十", 10),
            ("十一", 11),
            ("十五", 15),
            ("二十", 20),
            ("廿一", 21),
            ("廿九", 29),
            ("三十", 30),
        ] {
            assert_eq!(name, day_name(day), "day {day}");
        }
    }

    #[test]
    fn stem_branch_names() {
        for (name, year) in [("庚子", 1900), ("甲子", 1924), ("丁酉", 2017), ("癸卯", 2023)] {
            assert_eq!(name, year_name(year), "year {year}");
        }
    }

    #[test]
    fn zodiac_animals() {
        for (animal, year) in [("鼠", 1900), ("兔", 2023), ("龙", 2024), ("蛇", 2025)] {
            assert_eq!(animal, zodiac(year), "year {year}");
        }
    }
}
