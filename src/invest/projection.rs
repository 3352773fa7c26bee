use time::{Date, Month, OffsetDateTime};

/// Maturity value under compound interest: the principal grows by `roi`
/// percent once per year of the lock-in period, rounded to the nearest
/// whole currency unit at the end.
pub fn maturity_value(principal: i64, roi: f64, years: i32) -> i64 {
    let factor = (1.0 + roi / 100.0).powi(years);
    (principal as f64 * factor).round() as i64
}

/// Calendar-year addition. Feb 29 rolls forward to Mar 1 when the target
/// year is not a leap year.
pub fn add_years(date: OffsetDateTime, years: i32) -> OffsetDateTime {
    let target = date.year() + years;
    match date.replace_year(target) {
        Ok(d) => d,
        Err(_) => {
            let mar1 = Date::from_calendar_date(target, Month::March, 1)
                .expect("March 1 exists in every year");
            date.replace_date(mar1)
        }
    }
}
