use std::fmt;

use chrono::{Datelike, Timelike};

use super::showing::Showing;

const NO_DISCOUNT: f64 = 0.0;

/// The fixed set of ticket discounts a showing may qualify for.
///
/// Rules never stack: a ticket gets the largest single discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountRule {
    /// 20% off movies flagged with a special code.
    SpecialCode,
    /// $3 off the first showing of the day.
    FirstShowing,
    /// $2 off the second showing of the day.
    SecondShowing,
    /// 25% off showings starting between 11:00 and 16:59.
    Afternoon,
    /// $1 off every showing on the 7th of the month.
    SeventhOfMonth,
}

impl DiscountRule {
    pub const ALL: [DiscountRule; 5] = [
        DiscountRule::SpecialCode,
        DiscountRule::FirstShowing,
        DiscountRule::SecondShowing,
        DiscountRule::Afternoon,
        DiscountRule::SeventhOfMonth,
    ];

    const SPECIAL_CODE_RATE: f64 = 0.2;
    const FIRST_SHOWING_AMOUNT: f64 = 3.0;
    const SECOND_SHOWING_AMOUNT: f64 = 2.0;
    const AFTERNOON_RATE: f64 = 0.25;
    const AFTERNOON_HOURS: std::ops::RangeInclusive<u32> = 11..=16;
    const SEVENTH_OF_MONTH_AMOUNT: f64 = 1.0;

    /// Amount this rule takes off `showing`, given the ordered showings of
    /// the same movie. Zero when the rule does not apply.
    pub fn discount(self, showing: &Showing, all_showings_for_movie: &[Showing]) -> f64 {
        let movie = showing.movie();
        match self {
            DiscountRule::SpecialCode if movie.is_special() => {
                Self::SPECIAL_CODE_RATE * movie.ticket_price()
            }
            DiscountRule::FirstShowing if is_at(all_showings_for_movie, 0, showing) => {
                Self::FIRST_SHOWING_AMOUNT
            }
            DiscountRule::SecondShowing if is_at(all_showings_for_movie, 1, showing) => {
                Self::SECOND_SHOWING_AMOUNT
            }
            DiscountRule::Afternoon
                if Self::AFTERNOON_HOURS.contains(&showing.start_time().hour()) =>
            {
                movie.ticket_price() * Self::AFTERNOON_RATE
            }
            DiscountRule::SeventhOfMonth if showing.start_time().day() == 7 => {
                Self::SEVENTH_OF_MONTH_AMOUNT
            }
            _ => NO_DISCOUNT,
        }
    }
}

impl fmt::Display for DiscountRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiscountRule::SpecialCode => "special code",
            DiscountRule::FirstShowing => "first showing",
            DiscountRule::SecondShowing => "second showing",
            DiscountRule::Afternoon => "afternoon",
            DiscountRule::SeventhOfMonth => "seventh of month",
        };
        f.write_str(name)
    }
}

/// Largest discount any rule grants `showing`.
pub fn best_discount(showing: &Showing, all_showings_for_movie: &[Showing]) -> f64 {
    DiscountRule::ALL
        .iter()
        .map(|rule| rule.discount(showing, all_showings_for_movie))
        .fold(NO_DISCOUNT, f64::max)
}

fn is_at(showings: &[Showing], index: usize, showing: &Showing) -> bool {
    showings
        .get(index)
        .is_some_and(|candidate| candidate.is_same(showing))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, NaiveDate};

    use super::*;
    use crate::domain::Movie;

    fn showing_at(movie: &Arc<Movie>, day: u32, hour: u32, minute: u32) -> Showing {
        let start = NaiveDate::from_ymd_opt(2023, 5, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap();
        Showing::new(Arc::clone(movie), start).unwrap()
    }

    #[test]
    fn position_rules_require_the_same_instance() {
        let movie = Arc::new(Movie::new("Turning Red", Duration::minutes(85), 11.0, 0).unwrap());
        let showing = showing_at(&movie, 3, 10, 0);
        let twin = showing_at(&movie, 3, 10, 0);

        let list = vec![twin.clone(), showing.clone()];

        assert_eq!(DiscountRule::FirstShowing.discount(&showing, &list), 0.0);
        assert_eq!(DiscountRule::SecondShowing.discount(&showing, &list), 2.0);
        assert_eq!(DiscountRule::FirstShowing.discount(&twin, &list), 3.0);
    }

    #[test]
    fn afternoon_window_covers_eleven_through_sixteen() {
        let movie = Arc::new(Movie::new("Turning Red", Duration::minutes(85), 20.0, 0).unwrap());

        for hour in [9, 10, 17, 22] {
            let showing = showing_at(&movie, 3, hour, 30);
            assert_eq!(DiscountRule::Afternoon.discount(&showing, &[]), 0.0, "hour {hour}");
        }
        for hour in 11..=16 {
            let showing = showing_at(&movie, 3, hour, 59);
            assert_eq!(DiscountRule::Afternoon.discount(&showing, &[]), 5.0, "hour {hour}");
        }
    }

    #[test]
    fn best_discount_picks_the_largest_rule() {
        let movie = Arc::new(Movie::new("Turning Red", Duration::minutes(85), 20.0, 1).unwrap());
        let showing = showing_at(&movie, 7, 12, 0);
        let list = vec![showing.clone()];

        // special 4, first 3, afternoon 5, seventh 1
        assert_eq!(best_discount(&showing, &list), 5.0);
    }

    #[test]
    fn display_names_rules() {
        assert_eq!(DiscountRule::SeventhOfMonth.to_string(), "seventh of month");
        assert_eq!(DiscountRule::SpecialCode.to_string(), "special code");
    }
}
