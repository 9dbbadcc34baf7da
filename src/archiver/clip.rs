//! Clip chunking
//!
//! Cuts a finished live window into sequential clips. Each clip starts where
//! the archive service says the previous one ended, so clips stay contiguous
//! even when the service trims or extends the requested duration.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::client::{ArchiveClient, ResourceId};
use crate::error::Error;

/// One clip confirmed by the archive service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    /// 1-based position within the session
    pub part_index: u32,
    pub name: String,
    pub requested_start: DateTime<Utc>,
    pub requested_duration: Duration,
    /// End reported by the service; `None` for the final clip
    pub end: Option<DateTime<Utc>>,
}

/// Name of the `part_index`-th clip of a stream
pub fn clip_name(display_name: &str, part_index: u32) -> String {
    format!("{}: Part {}", display_name, part_index)
}

/// Outcome of a chunking run
#[derive(Debug, Default)]
pub(crate) struct ClipRun {
    /// Clips the service confirmed, in order
    pub clips: Vec<Clip>,
    /// Error that aborted the run, if any
    pub error: Option<Error>,
}

/// Request clips from `start` until the service stops reporting an end
///
/// The loop advances only on a reported end later than the current cursor.
/// No result, a result without an end, or an end that does not move forward
/// all finish the run. An error aborts it; clips confirmed so far are kept.
pub(crate) async fn archive_clips<A: ArchiveClient>(
    archive: &A,
    resource: &ResourceId,
    display_name: &str,
    start: DateTime<Utc>,
    chunk_duration: Duration,
) -> ClipRun {
    let mut run = ClipRun::default();
    let mut part_index = 1;
    let mut cursor = start;

    loop {
        let name = clip_name(display_name, part_index);

        let status = match archive
            .create_clip(resource, &name, cursor, chunk_duration)
            .await
        {
            Ok(status) => status,
            Err(e) => {
                run.error = Some(e);
                return run;
            }
        };

        let Some(status) = status else {
            tracing::debug!(
                resource = %resource,
                clip = %name,
                "No clip returned, archiving complete"
            );
            return run;
        };

        tracing::info!(
            resource = %resource,
            clip = %name,
            start = %cursor,
            end = ?status.end,
            "Archive clip created"
        );

        run.clips.push(Clip {
            part_index,
            name,
            requested_start: cursor,
            requested_duration: chunk_duration,
            end: status.end,
        });

        match status.end {
            Some(end) if end > cursor => {
                cursor = end;
                part_index += 1;
            }
            Some(end) => {
                tracing::warn!(
                    resource = %resource,
                    part = part_index,
                    start = %cursor,
                    end = %end,
                    "Clip end does not advance past its start, stopping"
                );
                return run;
            }
            None => return run,
        }
    }
}
