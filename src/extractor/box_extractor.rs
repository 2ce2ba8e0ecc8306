use crate::error::{PackBoxError, Result};
use crate::extractor::report::{ExtractedFile, ExtractionReport};
use crate::paths;
use crate::resource::ResourceBox;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, Dispatch};

/// Extracts resources from a box into a destination root on disk.
///
/// The destination is absolute and normalized from construction on. Nothing
/// is locked: callers sharing a destination across threads must serialize
/// their own extractions.
#[derive(Debug, Clone)]
pub struct Extractor {
    resources: Arc<dyn ResourceBox>,
    dest: PathBuf,
    logger: Option<Dispatch>,
}

impl Extractor {
    /// Wrap `resources`, creating `dest` (and any missing ancestors) if needed.
    ///
    /// When `logger` is set every operation reports through it; otherwise the
    /// extractor emits nothing, whatever the global subscriber is.
    pub fn new<P: AsRef<Path>>(
        resources: Arc<dyn ResourceBox>,
        dest: P,
        logger: Option<Dispatch>,
    ) -> Result<Self> {
        let dest = dest.as_ref();
        emit(logger.as_ref(), || {
            debug!(
                box_name = resources.name(),
                destination_path = %dest.display(),
                "New box . . ."
            )
        });

        let absolute = paths::absolute(dest).and_then(|absolute| {
            if !absolute.exists() {
                paths::create_dir_all(&absolute)?;
            }
            Ok(absolute)
        });

        let dest = match absolute {
            Ok(dest) => dest,
            Err(e) => {
                emit(logger.as_ref(), || {
                    error!(
                        destination_path = %dest.display(),
                        error = %e,
                        "Cannot create destination directory"
                    )
                });
                return Err(e);
            }
        };

        let extractor = Self {
            resources,
            dest,
            logger,
        };
        extractor.log(|| {
            debug!(
                box_name = extractor.resources.name(),
                destination_path = %extractor.dest.display(),
                "New box"
            )
        });

        Ok(extractor)
    }

    /// Convenience over [`Extractor::new`] taking the box by value.
    pub fn from_box<R, P>(resources: R, dest: P, logger: Option<Dispatch>) -> Result<Self>
    where
        R: ResourceBox + 'static,
        P: AsRef<Path>,
    {
        Self::new(Arc::new(resources), dest, logger)
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }

    pub fn resources(&self) -> &Arc<dyn ResourceBox> {
        &self.resources
    }

    /// Extract `name` under the destination root, returning the absolute output path.
    pub fn extract(&self, name: &str) -> Result<PathBuf> {
        self.log(|| debug!(box_name = self.resources.name(), file = name, "Extract file . . ."));

        let result = self.extract_to_dir(&self.dest, name);

        self.log(|| match &result {
            Ok(path) => debug!(box_name = self.resources.name(), path = %path.display(), "Extract file"),
            Err(e) => debug!(box_name = self.resources.name(), error = %e, "Extract file"),
        });

        result
    }

    /// Extract `name` to `root/name`, returning the absolute output path.
    pub fn extract_to_dir<P: AsRef<Path>>(&self, root: P, name: &str) -> Result<PathBuf> {
        self.extract_into(root.as_ref(), name)
            .map(|(path, _)| path)
    }

    /// Extract `name` to exactly `full_path`, creating missing parent directories.
    ///
    /// An existing file is truncated. Bytes already flushed stay on disk if
    /// the write fails halfway.
    pub fn extract_to<P: AsRef<Path>>(&self, full_path: P, name: &str) -> Result<()> {
        self.write_resource(full_path.as_ref(), name).map(|_| ())
    }

    /// Recursively remove the destination root. A missing root is not an error.
    pub fn clear(&self) -> Result<()> {
        let result = paths::remove_dir_all(&self.dest);

        self.log(|| match &result {
            Ok(()) => debug!(
                box_name = self.resources.name(),
                destination_path = %self.dest.display(),
                "Clear destination directory"
            ),
            Err(e) => error!(
                destination_path = %self.dest.display(),
                error = %e,
                "Cannot clear destination directory"
            ),
        });

        result
    }

    /// Extract every resource the box lists, in order, stopping at the first failure.
    pub fn extract_all(&self) -> Result<ExtractionReport> {
        let start = Instant::now();
        let mut files = Vec::new();

        for name in self.resources.list() {
            let (path, size) = self.extract_into(&self.dest, &name)?;
            files.push(ExtractedFile { name, path, size });
        }

        let report = ExtractionReport::new(self.resources.name(), &self.dest, files, start.elapsed());
        self.log(|| {
            debug!(
                box_name = self.resources.name(),
                files = report.file_count(),
                bytes = report.total_bytes,
                "Extract all files"
            )
        });

        Ok(report)
    }

    fn extract_into(&self, root: &Path, name: &str) -> Result<(PathBuf, u64)> {
        self.log(|| {
            debug!(
                box_name = self.resources.name(),
                destination_path = %root.display(),
                file = name,
                "Extract file to directory . . ."
            )
        });

        let result = paths::resource_path(name).and_then(|relative| {
            let target = root.join(relative);
            let size = self.write_resource(&target, name)?;
            Ok((paths::absolute(&target)?, size))
        });

        self.log(|| match &result {
            Ok((path, _)) => debug!(
                box_name = self.resources.name(),
                path = %path.display(),
                "Extract file to directory"
            ),
            Err(e) => error!(error = %e, "Cannot extract file"),
        });

        result
    }

    fn write_resource(&self, full_path: &Path, name: &str) -> Result<u64> {
        self.log(|| {
            debug!(
                box_name = self.resources.name(),
                destination_path = %full_path.display(),
                file = name,
                "Extract file to path . . ."
            )
        });

        let dest_path = paths::absolute(full_path)?;
        if let Some(parent) = dest_path.parent() {
            if !parent.exists() {
                paths::create_dir_all(parent).inspect_err(|e| {
                    self.log(|| {
                        error!(
                            destination_directory = %parent.display(),
                            error = %e,
                            "Cannot create destination directory"
                        )
                    })
                })?;
            }
        }

        let bytes = self.resources.find(name).inspect_err(|e| {
            self.log(|| error!(file = name, error = %e, "Cannot read file"))
        })?;

        fs::write(&dest_path, &bytes)
            .map_err(|e| PackBoxError::io(&dest_path, e))
            .inspect_err(|e| self.log(|| error!(error = %e, "Cannot write file")))?;

        self.log(|| {
            debug!(
                box_name = self.resources.name(),
                destination_path = %dest_path.display(),
                bytes = bytes.len(),
                "Extract file to path"
            )
        });

        Ok(bytes.len() as u64)
    }

    fn log<F: FnOnce()>(&self, f: F) {
        emit(self.logger.as_ref(), f);
    }
}

fn emit<F: FnOnce()>(logger: Option<&Dispatch>, f: F) {
    if let Some(dispatch) = logger {
        tracing::dispatcher::with_default(dispatch, f);
    }
}
