//! Build command implementation.
//!
//! Rewrites each stylesheet and writes its sprites next to the output.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{Result, SpriteError};
use crate::manifest::{Manifest, StylesheetEntry};
use crate::output::{display_path, plural, Printer};
use crate::service::FileService;
use crate::sprite::{Generated, Spriter};

/// Rewrite stylesheets and write their sprites
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Input stylesheet
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Output stylesheet, can be the same as the input
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Directory to resolve images from (repeatable, searched in order;
    /// default: the input stylesheet's directory)
    #[arg(long)]
    pub base: Vec<PathBuf>,

    /// Manifest to use instead of ./cssprite.yaml
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// A resolved unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Job {
    input: PathBuf,
    output: PathBuf,
    bases: Vec<PathBuf>,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let manifest = match &args.config {
        Some(path) => Some(Manifest::load(path)?),
        None => Manifest::discover(Path::new("."))?,
    };

    let jobs = plan_jobs(&args, manifest.unwrap_or_default())?;

    let mut total = 0;
    for job in &jobs {
        total += build_stylesheet(job, printer)?;
    }

    if jobs.len() > 1 {
        printer.success(
            "Finished",
            &format!(
                "{}, {}",
                plural(jobs.len(), "stylesheet", "stylesheets"),
                plural(total, "sprite", "sprites")
            ),
        );
    }

    Ok(())
}

/// Turn flags and manifest into jobs. Flags win over the manifest.
fn plan_jobs(args: &BuildArgs, manifest: Manifest) -> Result<Vec<Job>> {
    let bases_for = |input: &Path| -> Vec<PathBuf> {
        if !args.base.is_empty() {
            args.base.clone()
        } else if !manifest.bases.is_empty() {
            manifest.bases.clone()
        } else {
            vec![super::parent_dir(input)]
        }
    };

    let entries = match (&args.input, &args.output) {
        (Some(input), Some(output)) => vec![StylesheetEntry {
            input: input.clone(),
            output: output.clone(),
        }],
        (Some(_), None) | (None, Some(_)) => {
            return Err(SpriteError::Usage {
                message: "--input and --output must be given together".to_string(),
                help: Some("Pass both, or list stylesheets in cssprite.yaml".to_string()),
            });
        }
        (None, None) if !manifest.stylesheets.is_empty() => manifest.stylesheets.clone(),
        (None, None) => {
            return Err(SpriteError::Usage {
                message: "No stylesheets to build".to_string(),
                help: Some(
                    "Pass -i <input.css> -o <output.css>, or run `cssprite init`".to_string(),
                ),
            });
        }
    };

    Ok(entries
        .into_iter()
        .map(|entry| Job {
            bases: bases_for(&entry.input),
            input: entry.input,
            output: entry.output,
        })
        .collect())
}

/// Sprite one stylesheet. Returns the number of sprite files written.
fn build_stylesheet(job: &Job, printer: &Printer) -> Result<usize> {
    printer.status("Spriting", &display_path(&job.input));

    let css = super::read_stylesheet(&job.input)?;
    let service = FileService::new(job.bases.clone(), super::parent_dir(&job.output));
    let generated = Spriter::new(css, &service)
        .with_source_name(job.input.display().to_string())
        .generate()
        .map_err(super::with_base_hint)?;

    report_sprites(&generated, service.output(), printer);

    let write_error = |e: std::io::Error| SpriteError::Write {
        target: job.output.display().to_string(),
        message: e.to_string(),
    };
    fs::create_dir_all(service.output()).map_err(write_error)?;
    fs::write(&job.output, &generated.css).map_err(write_error)?;

    let written = generated.sprites.iter().filter(|s| !s.reused).count();
    printer.success(
        "Finished",
        &format!(
            "{} ({})",
            display_path(&job.output),
            plural(written, "sprite", "sprites")
        ),
    );

    Ok(written)
}

fn report_sprites(generated: &Generated, dir: &Path, printer: &Printer) {
    for sheet in &generated.sprites {
        let detail = printer.dim(&format!(
            "({}x{}, {}, group {})",
            sheet.width,
            sheet.height,
            plural(sheet.members.len(), "image", "images"),
            sheet.group
        ));
        let path = display_path(&dir.join(&sheet.name));
        if sheet.reused {
            printer.info("Reusing", &format!("{} {}", path, detail));
        } else {
            printer.status("Writing", &format!("{} {}", path, detail));
        }
    }
}
