//! Synchronization job commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use j1_client::j1_core::domain::sync::{StartParams, SyncMode, SyncPayload, SyncProgress};
use j1_client::{Client, SyncRun, SyncService};

use crate::output;

#[derive(Subcommand)]
pub enum SyncCommands {
    /// Start a job, upload a payload file in chunks and finalize
    Run {
        /// JSON file with `entities` and/or `relationships` arrays
        #[arg(short, long)]
        file: PathBuf,

        /// Job source
        #[arg(long, default_value = "api")]
        source: String,

        /// Job scope
        #[arg(long)]
        scope: Option<String>,

        /// Sync mode (DIFF, CREATE_OR_UPDATE)
        #[arg(long)]
        mode: Option<String>,

        /// Integration instance the job belongs to
        #[arg(long)]
        instance_id: Option<String>,

        /// Records per upload request
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Where to save upload progress if the run fails
        #[arg(long)]
        progress_file: Option<PathBuf>,
    },

    /// Continue a failed run from its progress file
    Resume {
        /// Progress file written by a failed run
        #[arg(long)]
        progress_file: PathBuf,

        /// The same payload file the run started with
        #[arg(short, long)]
        file: PathBuf,

        /// Records per upload request
        #[arg(long)]
        chunk_size: Option<usize>,
    },

    /// Show a job's status
    Status {
        /// Job ID
        job_id: String,
    },

    /// Finalize a job
    Finalize {
        /// Job ID
        job_id: String,
    },
}

pub async fn execute(cmd: SyncCommands, client: &Client) -> Result<()> {
    let sync = client.synchronization();

    match cmd {
        SyncCommands::Run {
            file,
            source,
            scope,
            mode,
            instance_id,
            chunk_size,
            progress_file,
        } => {
            let payload = read_payload(&file)?;
            let mut params = StartParams::new(source);
            if let Some(scope) = scope {
                params = params.with_scope(scope);
            }
            if let Some(mode) = mode {
                params = params.with_sync_mode(SyncMode::from(mode));
            }
            if let Some(id) = instance_id {
                params = params.with_instance_id(id);
            }

            let sync = with_chunk_size(sync, chunk_size);
            let run = sync.begin(&params).await?;
            println!("{} {}", "Started job".bold(), run.job_id().cyan());
            cmd_complete(run, &payload, progress_file.as_deref()).await
        }
        SyncCommands::Resume {
            progress_file,
            file,
            chunk_size,
        } => {
            let payload = read_payload(&file)?;
            let progress = read_progress(&progress_file)?;
            println!(
                "{} {} ({} entities, {} relationships already uploaded)",
                "Resuming job".bold(),
                progress.job_id.cyan(),
                progress.entities_uploaded,
                progress.relationships_uploaded
            );
            let run = with_chunk_size(sync, chunk_size).resume(progress);
            cmd_complete(run, &payload, Some(&progress_file)).await
        }
        SyncCommands::Status { job_id } => {
            output::print_job(&sync.status(&job_id).await?);
            Ok(())
        }
        SyncCommands::Finalize { job_id } => {
            output::print_job(&sync.finalize(&job_id).await?);
            Ok(())
        }
    }
}

fn with_chunk_size(sync: SyncService, chunk_size: Option<usize>) -> SyncService {
    match chunk_size {
        Some(size) => sync.with_chunk_size(size),
        None => sync,
    }
}

/// Finish a run, saving its progress when it fails part way.
async fn cmd_complete(
    mut run: SyncRun,
    payload: &SyncPayload,
    progress_file: Option<&Path>,
) -> Result<()> {
    match run.complete(payload).await {
        Ok(job) => {
            println!("\n{}", "Synchronization complete:".green().bold());
            output::print_job(&job);
            Ok(())
        }
        Err(err) => {
            if let Some(path) = progress_file {
                write_progress(path, run.progress())?;
                eprintln!(
                    "{} {}",
                    "Progress saved to".yellow(),
                    path.display().to_string().cyan()
                );
            }
            Err(err).with_context(|| format!("Synchronization job {} failed", run.job_id()))
        }
    }
}

fn read_payload(path: &Path) -> Result<SyncPayload> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read payload file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid payload file {}", path.display()))
}

fn read_progress(path: &Path) -> Result<SyncProgress> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read progress file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid progress file {}", path.display()))
}

fn write_progress(path: &Path, progress: &SyncProgress) -> Result<()> {
    let content = serde_json::to_string_pretty(progress)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write progress file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_file_with_only_entities() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.json");
        std::fs::write(&path, r#"{"entities": [{"_key": "a"}, {"_key": "b"}]}"#).unwrap();

        let payload = read_payload(&path).unwrap();
        assert_eq!(payload.entities.len(), 2);
        assert!(payload.relationships.is_empty());
    }

    #[test]
    fn test_invalid_payload_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let err = read_payload(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_progress_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        let mut progress = SyncProgress::new("job-3");
        progress.entities_uploaded = 300;

        write_progress(&path, &progress).unwrap();
        assert_eq!(read_progress(&path).unwrap(), progress);
    }
}
