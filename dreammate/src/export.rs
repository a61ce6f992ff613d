//! Saving journal artifacts.
//!
//! Exports are side-effecting and fire-and-forget. Failures come back as
//! `ExportError`, which frontends turn into a `Notice` instead of aborting;
//! the session is never touched by an export.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use dreammate_types::{CaptureError, CaptureOptions, CaptureRegion, ImageFormat, RasterCapture};
use log::{error, info, warn};

use crate::session::Session;
use crate::summary;

/// What kind of file an export produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Text,
    Html,
    Image(ImageFormat),
}

impl ArtifactKind {
    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Text => "txt",
            ArtifactKind::Html => "html",
            ArtifactKind::Image(format) => format.extension(),
        }
    }

    /// Human name used in notices.
    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::Text => "journal",
            ArtifactKind::Html => "card",
            ArtifactKind::Image(_) => "image",
        }
    }
}

/// `dream-mate-journal-<YYYY-MM-DD>.<ext>`
pub fn file_name(kind: ArtifactKind, date: NaiveDate) -> String {
    format!(
        "dream-mate-journal-{}.{}",
        date.format("%Y-%m-%d"),
        kind.extension()
    )
}

/// Today's local date, used to name artifacts and date the card.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Error type for export operations.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The region to capture was not available.
    #[error("Nothing to capture: the summary card is not on screen")]
    MissingTarget,

    /// An export is already in flight.
    #[error("Another export is still running")]
    Busy,

    #[error("The journal is not finished yet ({committed} of 6 sections)")]
    Incomplete { committed: usize },

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes artifacts into one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exporter {
    dir: PathBuf,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, kind: ArtifactKind, date: NaiveDate) -> PathBuf {
        self.dir.join(file_name(kind, date))
    }

    /// Fail unless every section is committed.
    pub fn ensure_complete(session: &Session) -> Result<(), ExportError> {
        if session.is_complete() {
            Ok(())
        } else {
            Err(ExportError::Incomplete {
                committed: session.committed_count(),
            })
        }
    }

    /// Write already-rendered bytes as an artifact.
    pub fn save(
        &self,
        kind: ArtifactKind,
        bytes: &[u8],
        date: NaiveDate,
    ) -> Result<PathBuf, ExportError> {
        let path = self.path_for(kind, date);
        if let Err(source) = fs::write(&path, bytes) {
            error!("could not write {}: {source}", path.display());
            return Err(ExportError::Io { path, source });
        }
        info!("saved {} to {}", kind.label(), path.display());
        Ok(path)
    }

    /// Save the plain-text journal.
    pub fn export_text(&self, session: &Session, date: NaiveDate) -> Result<PathBuf, ExportError> {
        Self::ensure_complete(session)?;
        let text = summary::render_text(&summary::digest(session));
        self.save(ArtifactKind::Text, text.as_bytes(), date)
    }

    /// Rasterize the card region and save the image.
    ///
    /// Nothing is written when the region is missing or the capture fails.
    pub fn export_image(
        &self,
        session: &Session,
        capture: &dyn RasterCapture,
        region: Option<&CaptureRegion>,
        options: &CaptureOptions,
        date: NaiveDate,
    ) -> Result<PathBuf, ExportError> {
        Self::ensure_complete(session)?;
        let region = region.ok_or_else(|| {
            warn!("image export without a capture region");
            ExportError::MissingTarget
        })?;
        let bytes = capture.capture(region, options).map_err(|err| {
            error!("raster capture failed: {err}");
            err
        })?;
        self.save(ArtifactKind::Image(options.format), &bytes, date)
    }
}

/// Keeps export triggers disabled while one export is running.
#[derive(Debug, Clone, Default)]
pub struct ExportGate {
    in_flight: bool,
}

impl ExportGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn try_begin(&mut self) -> Result<(), ExportError> {
        if self.in_flight {
            return Err(ExportError::Busy);
        }
        self.in_flight = true;
        Ok(())
    }

    pub fn finish(&mut self) {
        self.in_flight = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Transient user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Describe the outcome of an export.
    pub fn from_export(kind: ArtifactKind, result: &Result<PathBuf, ExportError>) -> Self {
        match result {
            Ok(path) => Self::success(format!("Saved {} to {}", kind.label(), path.display())),
            Err(ExportError::Busy) => Self::info("Export already in progress"),
            Err(err) => Self::error(format!("Could not save {}: {err}", kind.label())),
        }
    }
}
