// Recurring compilation job definitions

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// `minute = M, hour = */N` recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    pub minute: u32,
    pub hour_step: u32,
}

impl Recurrence {
    pub fn every_hours(hour_step: u32) -> Self {
        Self {
            minute: 0,
            hour_step,
        }
    }

    fn step(&self) -> u32 {
        self.hour_step.clamp(1, 24)
    }

    pub fn matches(&self, at: NaiveDateTime) -> bool {
        at.minute() == self.minute.min(59) && at.hour() % self.step() == 0
    }

    /// First matching instant strictly after `after`, at whole-minute precision.
    pub fn next_after(&self, after: NaiveDateTime) -> NaiveDateTime {
        let hour_start =
            after.date().and_time(NaiveTime::default()) + Duration::hours(i64::from(after.hour()));
        let minute = Duration::minutes(i64::from(self.minute.min(59)));
        for offset in 0..=48 {
            let candidate = hour_start + Duration::hours(offset) + minute;
            if candidate > after && candidate.hour() % self.step() == 0 {
                return candidate;
            }
        }
        hour_start + Duration::days(1) + minute
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    pub name: String,
    pub task: String,
    pub upstream_path: String,
    pub recurrence: Recurrence,
}

impl JobSpec {
    /// Cache key the job publishes under, the task name without its module prefix.
    pub fn cache_key(&self) -> &str {
        self.task.rsplit('.').next().unwrap_or(&self.task)
    }
}
