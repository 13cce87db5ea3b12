//! Project scaffolding: copy a bundled template tree into a destination
//! directory, rendering every file against a package descriptor.
//!
//! ```no_run
//! use scaffolder::{generate, GenerateOptions};
//!
//! let pkg = serde_json::json!({ "name": "mylib" });
//! let options = GenerateOptions {
//!     cwd: "/tmp/out".into(),
//!     overwrite: true,
//!     ..GenerateOptions::default()
//! };
//! generate(&pkg, &options).unwrap();
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod filters;
pub mod generator;
pub mod walk;

pub use catalog::{available_licenses, available_templates, License, Template};
pub use config::GenerateOptions;
pub use engine::Renderer;
pub use error::{Error, RenderError};
pub use generator::{FileGenerator, Summary};

use log::info;
use serde::Serialize;

/// Scaffolds `options.template` into `options.cwd` using `pkg` as the data
/// context.
///
/// An unknown template name is rejected before the filesystem is touched.
pub fn generate<T: Serialize + Sync + ?Sized>(
    pkg: &T,
    options: &GenerateOptions,
) -> Result<Summary, Error> {
    let template: Template = options.template.parse()?;
    let template_root = options.templates_dir().join(template.as_str());
    info!(
        "Generating template '{}' from {:?} into {:?}",
        template, template_root, options.cwd
    );

    let files = walk::enumerate(&template_root)?;

    let mut generator = FileGenerator::new(Renderer::new(), options.overwrite, options.dry_run);
    if let Some(jobs) = options.jobs {
        generator = generator.with_jobs(jobs);
    }
    generator.generate(&files, &template_root, &options.cwd, pkg)
}
