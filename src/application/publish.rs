//! Publish Use Case
//!
//! Writes a [`TargetOutput`] to `<output>/<target>`:
//!
//! 1. Take the exclusive lock on `<output>/.swatch.lock`
//! 2. Render artifacts, asset copies, resources and the manifest into a
//!    staging directory next to the destination
//! 3. Swap the staging directory into place
//!
//! A failure before the swap leaves the previous tree untouched.
//!
//! The swap is two renames and is not atomic. Between them the destination
//! does not exist, so a reader that skips the lock can briefly see no tree at
//! all. If the second rename fails the old tree is renamed back; if the process
//! dies in between, the old tree survives under `.swatch-retired-*` beside the
//! destination. Consumers should read after the lock is released.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fs2::FileExt;
use tracing::debug;

use crate::domain::entities::{ResourceEntry, TargetOutput, MANIFEST_FILE};
use crate::domain::ports::{CompileEvent, EventSink, FileSystem, NoopEventSink};
use crate::error::SwatchResult;

/// Lock file guarding concurrent publishes into one output root
pub const LOCK_FILE: &str = ".swatch.lock";

/// What one publish wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedTarget {
    pub destination: PathBuf,
    /// Files written, relative to the destination, sorted
    pub files: Vec<PathBuf>,
}

pub struct PublishUseCase<FS: FileSystem> {
    output_root: PathBuf,
    file_system: FS,
    events: Arc<dyn EventSink>,
}

impl<FS: FileSystem> PublishUseCase<FS> {
    pub fn new(output_root: impl Into<PathBuf>, file_system: FS) -> Self {
        Self {
            output_root: output_root.into(),
            file_system,
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn destination(&self, output: &TargetOutput) -> PathBuf {
        self.output_root.join(output.target.directory_name())
    }

    pub fn execute(&self, output: &TargetOutput) -> SwatchResult<PublishedTarget> {
        fs::create_dir_all(&self.output_root)?;
        let lock_file = fs::File::create(self.output_root.join(LOCK_FILE))?;
        lock_file.lock_exclusive()?;

        let result = self.publish_locked(output);

        let _ = FileExt::unlock(&lock_file);
        let published = result?;
        self.events.on_event(CompileEvent::TargetPublished {
            target: output.target,
            destination: published.destination.clone(),
            files: published.files.len(),
        });
        Ok(published)
    }

    fn publish_locked(&self, output: &TargetOutput) -> SwatchResult<PublishedTarget> {
        let destination = self.destination(output);
        let staging = tempfile::Builder::new()
            .prefix(".swatch-staging-")
            .tempdir_in(&self.output_root)?;
        let mut files = self.stage(output, staging.path())?;
        files.sort();

        swap(staging.path(), &destination)?;
        debug!(
            target = %output.target,
            destination = %destination.display(),
            files = files.len(),
            "published target"
        );
        Ok(PublishedTarget { destination, files })
    }

    fn stage(&self, output: &TargetOutput, root: &Path) -> SwatchResult<Vec<PathBuf>> {
        let mut files = Vec::new();

        for artifact in &output.artifacts {
            self.file_system
                .write(&root.join(artifact.path()), artifact.contents())?;
            files.push(artifact.path().to_path_buf());
        }
        for file in output.assets.files() {
            self.file_system.copy(&file.source, &root.join(&file.output))?;
            files.push(file.output.clone());
        }
        for (path, entry) in output.resources.iter() {
            match entry {
                ResourceEntry::Contents(contents) => {
                    self.file_system.write(&root.join(path), contents)?
                }
                ResourceEntry::Copy(source) => self.file_system.copy(source, &root.join(path))?,
            }
            files.push(path.to_path_buf());
        }
        self.file_system
            .write(&root.join(MANIFEST_FILE), &output.manifest_json()?)?;
        files.push(PathBuf::from(MANIFEST_FILE));

        files.dedup();
        Ok(files)
    }
}

/// Replace `destination` with `staging`; the old tree is removed afterwards
/// Not atomic; see the module docs for the window between the two renames.
fn swap(staging: &Path, destination: &Path) -> SwatchResult<()> {
    if destination.exists() {
        let retired = tempfile::Builder::new()
            .prefix(".swatch-retired-")
            .tempdir_in(destination.parent().unwrap_or(Path::new(".")))?;
        let parked = retired.path().join("tree");
        fs::rename(destination, &parked)?;
        if let Err(err) = fs::rename(staging, destination) {
            let _ = fs::rename(&parked, destination);
            return Err(err.into());
        }
        // `retired` drops here and deletes the old tree
    } else {
        fs::rename(staging, destination)?;
    }
    Ok(())
}
