use chrono::{DateTime, Local, Timelike, Utc};

/// Time source for open/closed flags and booking timestamps.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
    /// Hour of day (0-23) in the facilities' local time.
    fn local_hour(&self) -> u32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_hour(&self) -> u32 {
        Local::now().hour()
    }
}

/// Clock pinned to a single instant, for demos and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
    hour: u32,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>, hour: u32) -> Self {
        Self {
            instant,
            hour: hour % 24,
        }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.instant
    }

    fn local_hour(&self) -> u32 {
        self.hour
    }
}
