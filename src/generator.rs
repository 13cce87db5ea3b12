use log::{debug, error, info};
use rayon::prelude::*;
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::engine::Renderer;
use crate::error::Error;

/// What a successful run did, as paths relative to the destination root.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

enum Outcome {
    Written(PathBuf),
    Skipped(PathBuf),
}

/// Copies enumerated template files into a destination tree, rendering each
/// one on the way.
pub struct FileGenerator {
    renderer: Renderer,
    overwrite: bool,
    dry_run: bool,
    jobs: Option<usize>,
}

impl FileGenerator {
    pub fn new(renderer: Renderer, overwrite: bool, dry_run: bool) -> Self {
        Self {
            renderer,
            overwrite,
            dry_run,
            jobs: None,
        }
    }

    /// Caps the number of files processed at once.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs.max(1));
        self
    }

    /// Materializes `files` from `source_root` into `dest_root`.
    ///
    /// Every file is attempted even after another one fails. Files already
    /// written stay in place; the error reported is the first failing file in
    /// the order of `files`.
    pub fn generate<S: Serialize + Sync + ?Sized>(
        &self,
        files: &[PathBuf],
        source_root: &Path,
        dest_root: &Path,
        data: &S,
    ) -> Result<Summary, Error> {
        let results = match self.jobs {
            Some(jobs) => rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()?
                .install(|| self.generate_all(files, source_root, dest_root, data)),
            None => self.generate_all(files, source_root, dest_root, data),
        };

        let mut summary = Summary::default();
        for result in results {
            match result? {
                Outcome::Written(path) => summary.written.push(path),
                Outcome::Skipped(path) => summary.skipped.push(path),
            }
        }
        info!(
            "{} file(s) written, {} skipped",
            summary.written.len(),
            summary.skipped.len()
        );
        Ok(summary)
    }

    fn generate_all<S: Serialize + Sync + ?Sized>(
        &self,
        files: &[PathBuf],
        source_root: &Path,
        dest_root: &Path,
        data: &S,
    ) -> Vec<Result<Outcome, Error>> {
        files
            .par_iter()
            .map(|file| self.generate_file(file, source_root, dest_root, data))
            .collect()
    }

    fn generate_file<S: Serialize + ?Sized>(
        &self,
        file: &Path,
        source_root: &Path,
        dest_root: &Path,
        data: &S,
    ) -> Result<Outcome, Error> {
        let template_path = source_root.join(file);
        let output_path = dest_root.join(file);

        if !self.overwrite && exists(&output_path)? {
            debug!("Skipping existing file: {:?}", output_path);
            return Ok(Outcome::Skipped(file.to_path_buf()));
        }

        let content = fs::read(&template_path).map_err(|e| {
            error!("Failed to read template file: {:?}", template_path);
            Error::io(&template_path, e)
        })?;
        let rendered = self.renderer.render(&content, data).map_err(|e| {
            error!("Failed to render template file: {:?}", template_path);
            Error::Render {
                path: template_path.clone(),
                source: e,
            }
        })?;

        if self.dry_run {
            info!("[DRY RUN] Would write: {:?}", output_path);
            return Ok(Outcome::Written(file.to_path_buf()));
        }

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                error!("Failed to create directory: {:?}", parent);
                Error::io(parent, e)
            })?;
        }
        fs::write(&output_path, rendered).map_err(|e| {
            error!("Failed to write rendered content to file: {:?}", output_path);
            Error::io(&output_path, e)
        })?;
        info!("{:?}", output_path);
        Ok(Outcome::Written(file.to_path_buf()))
    }
}

fn exists(path: &Path) -> Result<bool, Error> {
    path.try_exists().map_err(|e| {
        error!("Failed to check destination file: {:?}", path);
        Error::io(path, e)
    })
}
