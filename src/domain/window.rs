use super::enums::Category;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone, Weekday};

/// Decides where each category's counting window begins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPolicy {
    pub week_start: Weekday,
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self {
            week_start: Weekday::Mon,
        }
    }
}

impl WindowPolicy {
    pub fn new(week_start: Weekday) -> Self {
        Self { week_start }
    }

    /// Start of the window for `category` as seen at `now`; `None` means all time
    pub fn start_for(&self, category: Category, now: DateTime<Local>) -> Option<DateTime<Local>> {
        let today = now.date_naive();
        match category {
            Category::Daily => Some(local_midnight(today)),
            Category::Weekly => {
                let days_back = (7 + now.weekday().num_days_from_monday()
                    - self.week_start.num_days_from_monday())
                    % 7;
                Some(local_midnight(today - Duration::days(days_back as i64)))
            }
            Category::Other => None,
        }
    }

    /// Whether a log stamped `at` counts toward a task of `category`
    pub fn contains(&self, category: Category, now: DateTime<Local>, at: DateTime<Local>) -> bool {
        match self.start_for(category, now) {
            Some(start) => at >= start,
            None => true,
        }
    }
}

/// Midnight of `date` in local time. Where a DST jump skips midnight, the
/// first instant of the day is used.
pub fn local_midnight(date: NaiveDate) -> DateTime<Local> {
    let naive = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}
