//! View model for the gallery: what each card shows, decided once so the
//! renderer only has to lay it out.

use v3_core::job::{Job, JobStatus};
use v3_core::time_ago::time_ago;
use v3_core::types::Timestamp;

use super::state::GalleryState;

/// Characters of the document id shown on a card.
const SHORT_ID_LEN: usize = 8;

/// Shown in place of a missing type, matching the inspector's output.
const MISSING_TYPE: &str = "undefined";

pub const NO_FORMAT: &str = "N/A";
pub const NO_PROMPT: &str = "No prompt";
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// The media area of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Image { url: String, alt: String, demo: bool },
    /// The worker is running.
    Generating,
    /// Waiting for a worker.
    Queued,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCard {
    pub short_id: String,
    pub status: JobStatus,
    /// Status text for the badge; unrecognised statuses keep their own text.
    pub status_label: String,
    pub preview: Preview,
    pub type_line: String,
    pub prompt: String,
    pub time_ago: String,
    /// Only set for jobs in the `error` state.
    pub error: Option<String>,
}

impl JobCard {
    pub fn status_class(&self) -> String {
        format!("status-{}", self.status_label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryView {
    Empty,
    Cards(Vec<JobCard>),
}

/// Build the view for the jobs passing the current filter.
pub fn build_view(state: &GalleryState, now: Timestamp) -> GalleryView {
    let cards: Vec<JobCard> = state.visible_jobs().map(|job| build_card(job, now)).collect();
    if cards.is_empty() {
        GalleryView::Empty
    } else {
        GalleryView::Cards(cards)
    }
}

pub fn build_card(job: &Job, now: Timestamp) -> JobCard {
    // A job without a timestamp has only just been written.
    let created_at = job.created_at.unwrap_or(now);

    JobCard {
        short_id: job.id.chars().take(SHORT_ID_LEN).collect(),
        status: job.status,
        status_label: job.status_label().to_string(),
        preview: preview_for(job),
        type_line: format!(
            "{} • {}",
            job.job_type.as_deref().unwrap_or(MISSING_TYPE),
            job.format.as_deref().unwrap_or(NO_FORMAT),
        ),
        prompt: job.prompt.clone().unwrap_or_else(|| NO_PROMPT.to_string()),
        time_ago: time_ago(created_at, now),
        error: (job.status == JobStatus::Error)
            .then(|| job.error.clone().unwrap_or_else(|| UNKNOWN_ERROR.to_string())),
    }
}

fn preview_for(job: &Job) -> Preview {
    match job.status {
        JobStatus::Complete => match (job.preview_url(), &job.result) {
            (Some(url), Some(result)) => Preview::Image {
                url: url.to_string(),
                alt: job.prompt.clone().unwrap_or_default(),
                demo: result.is_demo(),
            },
            _ => Preview::None,
        },
        JobStatus::Processing => Preview::Generating,
        JobStatus::Pending => Preview::Queued,
        JobStatus::Error | JobStatus::Unknown => Preview::None,
    }
}
