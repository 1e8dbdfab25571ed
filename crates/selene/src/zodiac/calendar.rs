//! Calendar sun-sign table.
//!
//! Tropical sign boundaries drift by a day between years, so this is only a
//! coarse stand-in for a computed solar longitude.

use crate::zodiac::signs::Sign;
use chrono::{Datelike, NaiveDate};

/// First (month, day) of each sign's run through the calendar year
const SIGN_STARTS: [(u32, u32, Sign); 12] = [
    (1, 20, Sign::Aquarius),
    (2, 19, Sign::Pisces),
    (3, 21, Sign::Aries),
    (4, 20, Sign::Taurus),
    (5, 21, Sign::Gemini),
    (6, 21, Sign::Cancer),
    (7, 23, Sign::Leo),
    (8, 23, Sign::Virgo),
    (9, 23, Sign::Libra),
    (10, 23, Sign::Scorpio),
    (11, 22, Sign::Sagittarius),
    (12, 22, Sign::Capricorn),
];

/// Sun sign for a calendar date, e.g. Mar 21 - Apr 19 is Aries
pub fn sun_sign_for_date(date: NaiveDate) -> Sign {
    let key = (date.month(), date.day());
    SIGN_STARTS
        .iter()
        .rev()
        .find(|(month, day, _)| key >= (*month, *day))
        .map(|(_, _, sign)| *sign)
        // Jan 1 - Jan 19 belongs to the Capricorn run that began in December
        .unwrap_or(Sign::Capricorn)
}
