use std::sync::Mutex;

use chrono::{Days, Local, NaiveDate, NaiveDateTime};

/// Source of local wall-clock time for timestamps and day rollover.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Local time of the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to a chosen date, keeping the real time of day.
/// Used to drive day rollovers without waiting for midnight.
#[derive(Debug)]
pub struct ManualClock {
    date: Mutex<NaiveDate>,
}

impl ManualClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Mutex::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        *self.date.lock().unwrap_or_else(|e| e.into_inner()) = date;
    }

    pub fn advance_days(&self, days: u64) {
        let mut date = self.date.lock().unwrap_or_else(|e| e.into_inner());
        *date = *date + Days::new(days);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        let date = *self.date.lock().unwrap_or_else(|e| e.into_inner());
        date.and_time(Local::now().time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(clock.today().format("%Y%m%d").to_string(), "20241231");
        clock.advance_days(1);
        assert_eq!(clock.today().format("%Y%m%d").to_string(), "20250101");
        clock.set(NaiveDate::from_ymd_opt(2030, 6, 1).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2030, 6, 1).unwrap());
    }
}
