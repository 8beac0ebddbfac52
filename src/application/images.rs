//! Image library use cases

use crate::application::Session;
use crate::domain::image::{is_image_path, mime_for_path, to_data_url};
use crate::domain::reconcile::{self, image_usage, ImageUsage};
use crate::domain::{generate_id, Action, StoredImage};
use crate::error::{RosetintError, Result};
use crate::infrastructure::KeyValueStore;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// An image with whether any post references it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub image: StoredImage,
    pub used: bool,
}

/// What a cleanup removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub removed: Vec<StoredImage>,
    pub cleared_background: bool,
    pub cleared_lock_screen: bool,
}

pub struct ImageService<S> {
    session: Session<S>,
}

impl<S: KeyValueStore> ImageService<S> {
    pub fn new(session: Session<S>) -> Self {
        ImageService { session }
    }

    /// Import image files. Directories are walked for image files in
    /// path order. Everything is committed in one save.
    pub fn add_paths(&mut self, paths: &[PathBuf]) -> Result<Vec<StoredImage>> {
        let mut files = Vec::new();
        for path in paths {
            files.extend(collect_image_files(path)?);
        }

        let now = Utc::now().timestamp_millis();
        let mut images = Vec::with_capacity(files.len());
        for file in &files {
            images.push(read_image(file, now)?);
        }

        if images.is_empty() {
            return Ok(images);
        }

        self.session
            .dispatch_all(images.iter().cloned().map(Action::AddImage).collect())?;
        info!(count = images.len(), "imported images");
        Ok(images)
    }

    pub fn list(&self) -> Vec<ImageEntry> {
        let data = self.session.data();
        data.images
            .iter()
            .map(|image| ImageEntry {
                image: image.clone(),
                used: reconcile::is_mentioned(&data.posts, &image.data_url),
            })
            .collect()
    }

    pub fn usage(&self) -> ImageUsage {
        let data = self.session.data();
        image_usage(&data.posts, &data.images)
    }

    /// Drop every image no post references. Immediate and not undoable.
    pub fn cleanup(&mut self) -> Result<CleanupReport> {
        let before = self.session.data().clone();
        let after = self.session.dispatch(Action::CleanupImages)?;

        let removed: Vec<StoredImage> = before
            .images
            .iter()
            .filter(|image| after.image(&image.id).is_none())
            .cloned()
            .collect();

        let report = CleanupReport {
            removed,
            cleared_background: before.settings.background_image_id.is_some()
                && after.settings.background_image_id.is_none(),
            cleared_lock_screen: before.settings.lock_screen_image_id.is_some()
                && after.settings.lock_screen_image_id.is_none(),
        };
        info!(removed = report.removed.len(), "cleaned up images");
        Ok(report)
    }

    /// Set or clear the background image
    pub fn set_background(&mut self, image_id: Option<&str>) -> Result<()> {
        let id = self.existing_id(image_id)?;
        self.session.dispatch(Action::SetBackgroundImage(id))?;
        Ok(())
    }

    /// Set or clear the lock-screen image
    pub fn set_lock_screen(&mut self, image_id: Option<&str>) -> Result<()> {
        let id = self.existing_id(image_id)?;
        self.session.dispatch(Action::SetLockScreenImage(id))?;
        Ok(())
    }

    fn existing_id(&self, image_id: Option<&str>) -> Result<Option<String>> {
        match image_id {
            Some(id) if self.session.data().image(id).is_none() => {
                Err(RosetintError::ImageNotFound(id.to_string()))
            }
            other => Ok(other.map(str::to_string)),
        }
    }
}

fn collect_image_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        let mut files: Vec<PathBuf> = WalkDir::new(path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|p| is_image_path(p))
            .collect();
        files.sort();
        debug!(dir = %path.display(), count = files.len(), "found images");
        return Ok(files);
    }

    if !path.exists() {
        return Err(RosetintError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("No such file: {}", path.display()),
        )));
    }

    if !is_image_path(path) {
        return Err(RosetintError::InvalidValue(format!(
            "Not a supported image file: {}",
            path.display()
        )));
    }

    Ok(vec![path.to_path_buf()])
}

fn read_image(path: &Path, now: i64) -> Result<StoredImage> {
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(StoredImage::new(
        generate_id(),
        to_data_url(mime_for_path(path), &bytes),
        name,
        now,
    ))
}
