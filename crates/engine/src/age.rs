use chrono::{Datelike, NaiveDate};

use crate::model::PersonRecord;

/// Effective age as of `today`.
///
/// The authoritative `age` field wins when present. Otherwise the age is
/// derived from `date_of_birth`, minus one year when today's month/day
/// precedes the birthday. Returns `None` when neither source yields a
/// usable value (no panic paths).
pub fn effective_age(person: &PersonRecord, today: NaiveDate) -> Option<u32> {
    if let Some(age) = person.age {
        return Some(age);
    }

    let dob = person.date_of_birth?;
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    // A birth date in the future yields a negative count — treat as unknown.
    u32::try_from(years).ok()
}
