use anyhow::{anyhow, bail, Result};
use chrono::Local;
use serde_json::Value;
use tracing::{error, info};

use backend_application::AppState;
use backend_domain::{default_schedule, join_url, next_due, JobSpec};

pub async fn schedule_jobs(state: AppState) {
    if !state.config.jobs_enabled {
        info!("periodic compile jobs disabled");
        return;
    }
    let jobs = default_schedule();
    loop {
        let now = Local::now().naive_local();
        let Some((at, due)) = next_due(&jobs, now) else {
            return;
        };
        let sleep_ms = at.signed_duration_since(now).num_milliseconds().max(0) as u64;
        tokio::time::sleep(std::time::Duration::from_millis(sleep_ms)).await;

        for job in due {
            if let Err(err) = run_job(&state, job).await {
                error!(job = %job.name, "compile job failed: {}", err);
            }
        }
    }
}

/// Fetches the job's listing from uframe and publishes it to the cache.
pub async fn run_job(state: &AppState, job: &JobSpec) -> Result<()> {
    let outcome = compile(state, job).await;
    state.metrics.record_job(outcome.is_ok());
    outcome
}

async fn compile(state: &AppState, job: &JobSpec) -> Result<()> {
    let url = join_url(&state.config.uframe.base_url, &[&job.upstream_path]);
    let response = state
        .transport
        .get_json(&url)
        .await
        .map_err(|err| anyhow!("{} request failed: {}", job.name, err))?;
    if !(200..300).contains(&response.status) {
        bail!("{} returned status {}", url, response.status);
    }
    let listing: Value = serde_json::from_str(&response.body)
        .map_err(|err| anyhow!("{} returned malformed JSON: {}", url, err))?;
    state.cache.set(job.cache_key(), listing).await?;
    info!(job = %job.name, key = job.cache_key(), "compiled listing cached");
    Ok(())
}
