use v3_core::error::CoreError;
use v3_core::job::{Job, JobStatus};

/// Which jobs the gallery shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(JobStatus),
}

impl StatusFilter {
    /// `None` selects every job. Only the four lifecycle statuses are
    /// accepted as a filter value.
    pub fn from_status(raw: Option<&str>) -> Result<Self, CoreError> {
        let Some(raw) = raw else {
            return Ok(Self::All);
        };
        match JobStatus::parse(raw) {
            JobStatus::Unknown => Err(CoreError::Validation(format!(
                "unknown status filter '{raw}'"
            ))),
            status => Ok(Self::Only(status)),
        }
    }

    pub fn matches(&self, status: JobStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }

    pub fn status(&self) -> Option<JobStatus> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(*status),
        }
    }
}

/// Everything the gallery markup is rendered from.
#[derive(Debug, Clone, Default)]
pub struct GalleryState {
    /// Newest first, as delivered by the live query.
    pub jobs: Vec<Job>,
    pub filter: StatusFilter,
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the job list with a fresh snapshot. Never merges.
    pub fn apply_snapshot(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs;
    }

    /// Jobs passing the current filter, in snapshot order.
    pub fn visible_jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter().filter(|job| self.filter.matches(job.status))
    }
}
