use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    events_created: AtomicU64,
    events_updated: AtomicU64,
    validation_failures: AtomicU64,
    upstream_failures: AtomicU64,
    jobs_run: AtomicU64,
    job_failures: AtomicU64,
}

impl Metrics {
    pub fn record_created(&self) {
        self.events_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_updated(&self) {
        self.events_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_failure(&self) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_upstream_failure(&self) {
        self.upstream_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_job(&self, succeeded: bool) {
        self.jobs_run.fetch_add(1, Ordering::Relaxed);
        if !succeeded {
            self.job_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn render_prometheus(&self) -> String {
        let created = self.events_created.load(Ordering::Relaxed);
        let updated = self.events_updated.load(Ordering::Relaxed);
        let invalid = self.validation_failures.load(Ordering::Relaxed);
        let upstream = self.upstream_failures.load(Ordering::Relaxed);
        let jobs = self.jobs_run.load(Ordering::Relaxed);
        let job_failures = self.job_failures.load(Ordering::Relaxed);

        format!(
            "# TYPE ooi_storage_events_created_total counter\n\
ooi_storage_events_created_total {}\n\
# TYPE ooi_storage_events_updated_total counter\n\
ooi_storage_events_updated_total {}\n\
# TYPE ooi_validation_failures_total counter\n\
ooi_validation_failures_total {}\n\
# TYPE ooi_upstream_failures_total counter\n\
ooi_upstream_failures_total {}\n\
# TYPE ooi_jobs_run_total counter\n\
ooi_jobs_run_total {}\n\
# TYPE ooi_job_failures_total counter\n\
ooi_job_failures_total {}\n",
            created, updated, invalid, upstream, jobs, job_failures
        )
    }
}
