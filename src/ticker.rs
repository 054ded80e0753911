use std::time::{Duration, Instant};

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Time since `last`, advancing `last` to now
pub fn take_elapsed(last: &mut Instant) -> chrono::Duration {
    let now = Instant::now();
    let delta = now.saturating_duration_since(*last);
    *last = now;
    chrono::Duration::from_std(delta).unwrap_or(chrono::Duration::zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        let duration = tick_duration();
        assert_eq!(duration, Duration::from_millis(250));
        assert!(duration < Duration::from_secs(1));
    }

    #[test]
    fn test_take_elapsed_advances_baseline() {
        let mut last = Instant::now() - Duration::from_secs(2);
        let delta = take_elapsed(&mut last);
        assert!(delta >= chrono::Duration::seconds(2));

        let again = take_elapsed(&mut last);
        assert!(again < chrono::Duration::seconds(1));
    }
}
