use chrono::NaiveDateTime;

use crate::entities::{JobSpec, Recurrence};

const DEFAULT_JOBS: &[(&str, &str, &str, u32)] = &[
    ("get-assets", "tasks.compile_assets", "assets", 2),
    ("get-streams", "tasks.compile_streams", "streams", 1),
    ("get-events", "tasks.compile_events", "events", 1),
    ("get-glider-traks-every", "tasks.compile_glider_tracks", "glider_tracks", 8),
    ("get-cam-images-every", "tasks.compile_cam_images", "cam_images", 12),
    (
        "get-large-format-files-every",
        "tasks.compile_large_format_files",
        "large_format_files",
        12,
    ),
];

pub fn default_schedule() -> Vec<JobSpec> {
    DEFAULT_JOBS
        .iter()
        .map(|(name, task, path, hours)| JobSpec {
            name: name.to_string(),
            task: task.to_string(),
            upstream_path: path.to_string(),
            recurrence: Recurrence::every_hours(*hours),
        })
        .collect()
}

/// Earliest run time after `after` and every job due at that instant.
pub fn next_due(jobs: &[JobSpec], after: NaiveDateTime) -> Option<(NaiveDateTime, Vec<&JobSpec>)> {
    let at = jobs
        .iter()
        .map(|job| job.recurrence.next_after(after))
        .min()?;
    let due = jobs
        .iter()
        .filter(|job| job.recurrence.matches(at))
        .collect::<Vec<_>>();
    Some((at, due))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 7, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .expect("valid datetime")
    }

    #[test]
    fn default_schedule_keeps_named_jobs() {
        let jobs = default_schedule();
        assert_eq!(jobs.len(), 6);
        let assets = jobs.iter().find(|job| job.name == "get-assets").expect("assets job");
        assert_eq!(assets.recurrence, Recurrence::every_hours(2));
        assert_eq!(assets.cache_key(), "compile_assets");
        let cams = jobs
            .iter()
            .find(|job| job.task == "tasks.compile_cam_images")
            .expect("cam images job");
        assert_eq!(cams.recurrence.hour_step, 12);
    }

    #[test]
    fn recurrence_moves_to_next_matching_hour() {
        let every_two = Recurrence::every_hours(2);
        assert_eq!(every_two.next_after(at(21, 10, 30)), at(21, 12, 0));
        assert_eq!(every_two.next_after(at(21, 11, 0)), at(21, 12, 0));
        assert_eq!(every_two.next_after(at(21, 12, 0)), at(21, 14, 0));
    }

    #[test]
    fn recurrence_rolls_over_midnight() {
        let every_eight = Recurrence::every_hours(8);
        assert_eq!(every_eight.next_after(at(21, 16, 1)), at(22, 0, 0));
        let every_twelve = Recurrence::every_hours(12);
        assert_eq!(every_twelve.next_after(at(21, 23, 59)), at(22, 0, 0));
    }

    #[test]
    fn recurrence_honours_minute_offset() {
        let recurrence = Recurrence {
            minute: 15,
            hour_step: 1,
        };
        assert_eq!(recurrence.next_after(at(21, 10, 14)), at(21, 10, 15));
        assert_eq!(recurrence.next_after(at(21, 10, 15)), at(21, 11, 15));
        assert!(recurrence.matches(at(21, 3, 15)));
        assert!(!recurrence.matches(at(21, 3, 0)));
    }

    #[test]
    fn next_due_groups_jobs_sharing_an_instant() {
        let jobs = default_schedule();
        let (when, due) = next_due(&jobs, at(21, 11, 5)).expect("due jobs");
        assert_eq!(when, at(21, 12, 0));
        let names = due.iter().map(|job| job.name.as_str()).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "get-assets",
                "get-streams",
                "get-events",
                "get-cam-images-every",
                "get-large-format-files-every",
            ]
        );

        let (when, due) = next_due(&jobs, at(21, 12, 0)).expect("due jobs");
        assert_eq!(when, at(21, 13, 0));
        assert_eq!(due.len(), 2);
        assert!(next_due(&[], at(21, 12, 0)).is_none());
    }
}
