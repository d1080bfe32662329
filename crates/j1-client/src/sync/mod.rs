//! Bulk synchronization jobs.
//!
//! A job is started, fed chunked uploads of entities and then relationships,
//! finalized, and finally read back for its status. The job lives only on the
//! service; callers that want to resume later keep the [`SyncProgress`].

pub mod chunk;
pub mod run;

use serde_json::{json, Value};
use tracing::{debug, info};

use j1_core::domain::sync::{StartParams, SyncJob, SyncJobEnvelope, SyncPayload, SyncProgress};
use j1_core::J1Result;

use crate::transport::HttpRequest;
use crate::Client;

use chunk::check_chunk_size;
pub use chunk::DEFAULT_CHUNK_SIZE;
pub use run::SyncRun;

const JOBS_PATH: &str = "persister/synchronization/jobs";

/// Synchronization API.
#[derive(Clone)]
pub struct SyncService {
    client: Client,
    chunk_size: usize,
}

impl SyncService {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Override the number of records per upload request.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn jobs_url(&self) -> String {
        format!("{}/{}", self.client.base_url(), JOBS_PATH)
    }

    fn job_url(&self, job_id: &str, action: Option<&str>) -> String {
        match action {
            Some(action) => format!("{}/{}/{}", self.jobs_url(), job_id, action),
            None => format!("{}/{}", self.jobs_url(), job_id),
        }
    }

    async fn send_job(&self, request: HttpRequest) -> J1Result<SyncJob> {
        let response = self.client.http().send(request).await?.error_for_status()?;
        let envelope: SyncJobEnvelope = response.json()?;
        Ok(envelope.job)
    }

    /// Create a job; the returned snapshot carries the assigned id.
    pub async fn start(&self, params: &StartParams) -> J1Result<SyncJob> {
        let body = serde_json::to_value(params)?;
        let job = self.send_job(HttpRequest::post(self.jobs_url(), Some(body))).await?;
        info!(job_id = %job.id, source = %params.source, "Started synchronization job");
        Ok(job)
    }

    /// Upload one payload through the generic upload endpoint.
    pub async fn upload(&self, job_id: &str, payload: &SyncPayload) -> J1Result<SyncJob> {
        debug!(
            job_id,
            entities = payload.entities.len(),
            relationships = payload.relationships.len(),
            "Uploading payload"
        );
        let body = serde_json::to_value(payload)?;
        self.send_job(HttpRequest::post(self.job_url(job_id, Some("upload")), Some(body)))
            .await
    }

    /// Upload entities through the entity-specific endpoint.
    pub async fn upload_entities(&self, job_id: &str, entities: &[Value]) -> J1Result<SyncJob> {
        let body = json!({ "entities": entities });
        self.send_job(HttpRequest::post(self.job_url(job_id, Some("entities")), Some(body)))
            .await
    }

    /// Upload relationships through the relationship-specific endpoint.
    pub async fn upload_relationships(
        &self,
        job_id: &str,
        relationships: &[Value],
    ) -> J1Result<SyncJob> {
        let body = json!({ "relationships": relationships });
        self.send_job(HttpRequest::post(
            self.job_url(job_id, Some("relationships")),
            Some(body),
        ))
        .await
    }

    /// Signal that no more data follows. Repeat calls are left to the service.
    pub async fn finalize(&self, job_id: &str) -> J1Result<SyncJob> {
        let job = self
            .send_job(HttpRequest::post(self.job_url(job_id, Some("finalize")), None))
            .await?;
        info!(job_id, status = %job.status, "Finalized synchronization job");
        Ok(job)
    }

    /// Current snapshot of a job.
    pub async fn status(&self, job_id: &str) -> J1Result<SyncJob> {
        self.send_job(HttpRequest::get(self.job_url(job_id, None))).await
    }

    /// Start a job and return a run tracking its upload progress.
    ///
    /// The chunk size is checked first so a bad setting never leaves an
    /// unfinalized job behind.
    pub async fn begin(&self, params: &StartParams) -> J1Result<SyncRun> {
        check_chunk_size(self.chunk_size)?;
        let job = self.start(params).await?;
        Ok(SyncRun::new(self.clone(), SyncProgress::new(job.id)))
    }

    /// Continue a run from a saved progress record.
    pub fn resume(&self, progress: SyncProgress) -> SyncRun {
        SyncRun::new(self.clone(), progress)
    }

    /// Start, upload every record in chunks, finalize and return the final status.
    ///
    /// The first failure aborts the sequence; the job is left unfinalized on
    /// the service and nothing is rolled back.
    pub async fn process_sync_job(
        &self,
        params: &StartParams,
        payload: &SyncPayload,
    ) -> J1Result<SyncJob> {
        let mut run = self.begin(params).await?;
        run.complete(payload).await
    }
}
