//! Init command implementation.
//!
//! Generates a `cssprite.yaml` manifest listing the stylesheets found in
//! a directory.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{Result, SpriteError};
use crate::manifest::MANIFEST_FILENAME;
use crate::output::{display_path, plural, Printer};

/// Output directory for rewritten stylesheets in a generated manifest.
const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Initialize a project by generating a cssprite.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing cssprite.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(SpriteError::Usage {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    printer.status("Scanning", &display_path(&args.path));
    let stylesheets = find_stylesheets(&args.path)?;

    fs::write(&manifest_path, render_manifest(&stylesheets)).map_err(|e| SpriteError::Write {
        target: manifest_path.display().to_string(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    if !stylesheets.is_empty() {
        printer.info("Discovered", &stylesheets.join(", "));
    }

    printer.success(
        "Created",
        &format!(
            "{} ({} found)",
            MANIFEST_FILENAME,
            plural(stylesheets.len(), "stylesheet", "stylesheets")
        ),
    );

    Ok(())
}

/// File names of the `.css` files directly inside `dir`, sorted.
fn find_stylesheets(dir: &Path) -> Result<Vec<String>> {
    let read_error = |e: std::io::Error| SpriteError::Read {
        path: dir.to_path_buf(),
        message: e.to_string(),
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if !path.is_file() || path.extension().map_or(true, |ext| ext != "css") {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Build YAML manually for clean formatting.
fn render_manifest(stylesheets: &[String]) -> String {
    let mut yaml = String::from("bases:\n  - \".\"\n");

    if stylesheets.is_empty() {
        yaml.push_str("stylesheets: []\n");
    } else {
        yaml.push_str("stylesheets:\n");
        for name in stylesheets {
            yaml.push_str(&format!("  - input: \"{}\"\n", name));
            yaml.push_str(&format!(
                "    output: \"{}/{}\"\n",
                DEFAULT_OUTPUT_DIR, name
            ));
        }
    }

    yaml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::manifest::Manifest;
    use tempfile::tempdir;

    fn quiet() -> Printer {
        Printer::new().with_quiet(true)
    }

    #[test]
    fn test_init_creates_manifest() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("site.css"), "").unwrap();
        fs::write(dir.path().join("app.css"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir_all(dir.path().join("nested.css")).unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args, &quiet()).unwrap();

        let manifest = Manifest::load(&dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert_eq!(manifest.bases, vec![dir.path().join(".")]);
        let inputs: Vec<PathBuf> = manifest.stylesheets.iter().map(|s| s.input.clone()).collect();
        assert_eq!(
            inputs,
            vec![dir.path().join("app.css"), dir.path().join("site.css")]
        );
        assert_eq!(
            manifest.stylesheets[0].output,
            dir.path().join("dist/app.css")
        );
    }

    #[test]
    fn test_init_errors_if_manifest_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILENAME), "bases: [img]").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };

        let err = run(args, &quiet()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(
            fs::read_to_string(dir.path().join(MANIFEST_FILENAME)).unwrap(),
            "bases: [img]"
        );
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILENAME), "bases: [img]").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: true,
        };
        run(args, &quiet()).unwrap();

        let content = fs::read_to_string(dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert!(content.contains("stylesheets: []"));
    }

    #[test]
    fn test_render_manifest_parses() {
        let yaml = render_manifest(&["a.css".to_string()]);
        assert_eq!(
            yaml,
            "bases:\n  - \".\"\nstylesheets:\n  - input: \"a.css\"\n    output: \"dist/a.css\"\n"
        );

        let manifest = Manifest::parse(&yaml).unwrap();
        assert_eq!(manifest.stylesheets[0].output, PathBuf::from("dist/a.css"));
    }
}
