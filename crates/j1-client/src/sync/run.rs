//! Resumable upload run for a single synchronization job.

use serde_json::Value;
use tracing::{debug, info};

use j1_core::domain::sync::{SyncJob, SyncPayload, SyncProgress};
use j1_core::{J1Error, J1Result};

use super::chunk::{chunk_count, chunks};
use super::SyncService;

#[derive(Clone, Copy, Debug)]
enum RecordKind {
    Entities,
    Relationships,
}

/// Drives one job through chunked upload, finalize and status while keeping
/// a [`SyncProgress`] that survives failures.
pub struct SyncRun {
    service: SyncService,
    progress: SyncProgress,
}

impl SyncRun {
    pub(crate) fn new(service: SyncService, progress: SyncProgress) -> Self {
        Self { service, progress }
    }

    pub fn job_id(&self) -> &str {
        &self.progress.job_id
    }

    /// Records accepted so far. Persist this after a failure to resume later.
    pub fn progress(&self) -> &SyncProgress {
        &self.progress
    }

    /// Upload every record not yet accepted: entities first, then relationships.
    pub async fn upload_all(&mut self, payload: &SyncPayload) -> J1Result<()> {
        if self.progress.finalized {
            return Err(J1Error::config(format!(
                "job {} is already finalized",
                self.progress.job_id
            )));
        }
        self.upload_kind(RecordKind::Entities, &payload.entities).await?;
        self.upload_kind(RecordKind::Relationships, &payload.relationships)
            .await
    }

    async fn upload_kind(&mut self, kind: RecordKind, records: &[Value]) -> J1Result<()> {
        let done = match kind {
            RecordKind::Entities => self.progress.entities_uploaded,
            RecordKind::Relationships => self.progress.relationships_uploaded,
        };
        let remaining = records.get(done..).ok_or_else(|| {
            J1Error::config(format!(
                "progress reports {} {:?} uploaded but payload has {}",
                done,
                kind,
                records.len()
            ))
        })?;

        let chunk_size = self.service.chunk_size();
        let total = chunk_count(remaining.len(), chunk_size);
        for (index, chunk) in chunks(remaining, chunk_size)?.enumerate() {
            let payload = match kind {
                RecordKind::Entities => SyncPayload::entities(chunk.to_vec()),
                RecordKind::Relationships => SyncPayload::relationships(chunk.to_vec()),
            };
            self.service.upload(&self.progress.job_id, &payload).await?;

            match kind {
                RecordKind::Entities => self.progress.entities_uploaded += chunk.len(),
                RecordKind::Relationships => self.progress.relationships_uploaded += chunk.len(),
            }
            debug!(
                job_id = %self.progress.job_id,
                kind = ?kind,
                chunk = index + 1,
                chunks = total,
                "Uploaded chunk"
            );
        }
        Ok(())
    }

    pub async fn finalize(&mut self) -> J1Result<SyncJob> {
        let job = self.service.finalize(&self.progress.job_id).await?;
        self.progress.finalized = true;
        Ok(job)
    }

    pub async fn status(&self) -> J1Result<SyncJob> {
        self.service.status(&self.progress.job_id).await
    }

    /// Upload what remains, finalize unless already done, and return the status.
    pub async fn complete(&mut self, payload: &SyncPayload) -> J1Result<SyncJob> {
        if !self.progress.finalized {
            self.upload_all(payload).await?;
            self.finalize().await?;
        }
        let job = self.status().await?;
        info!(
            job_id = %self.progress.job_id,
            status = %job.status,
            entities = self.progress.entities_uploaded,
            relationships = self.progress.relationships_uploaded,
            "Synchronization job complete"
        );
        Ok(job)
    }
}
