use chrono::{Local, NaiveDate};

/// Source of "today" for the schedule.
pub trait DateProvider: Send + Sync {
    fn current_date(&self) -> NaiveDate;
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDateProvider;

impl DateProvider for SystemDateProvider {
    fn current_date(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDateProvider(pub NaiveDate);

impl DateProvider for FixedDateProvider {
    fn current_date(&self) -> NaiveDate {
        self.0
    }
}

impl<P: DateProvider + ?Sized> DateProvider for Box<P> {
    fn current_date(&self) -> NaiveDate {
        (**self).current_date()
    }
}
