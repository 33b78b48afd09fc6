//! Project manifest (cssprite.yaml) parsing.
//!
//! The manifest lists the stylesheets to process and the directories
//! searched for the images they reference.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpriteError};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "cssprite.yaml";

/// One stylesheet to sprite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylesheetEntry {
    /// Source stylesheet.
    pub input: PathBuf,
    /// Rewritten stylesheet; sprites are written next to it. May equal `input`.
    pub output: PathBuf,
}

/// Project manifest loaded from cssprite.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Directories searched, in order, for referenced images.
    /// Defaults to each input stylesheet's directory if empty.
    pub bases: Vec<PathBuf>,

    /// Stylesheets built when no input/output is given on the command line.
    pub stylesheets: Vec<StylesheetEntry>,
}

impl Manifest {
    /// Load a manifest, resolving its relative paths against the
    /// manifest's own directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SpriteError::Config {
            message: format!("Failed to read {}: {}", path.display(), e),
            help: None,
        })?;

        let root = path.parent().unwrap_or(Path::new(""));
        Ok(Self::parse(&content)?.resolved(root))
    }

    /// Look for a manifest in `dir`; `Ok(None)` when there is none.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(MANIFEST_FILENAME);
        if path.is_file() {
            Self::load(&path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| SpriteError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILENAME)),
        })
    }

    /// Make every relative path relative to `root` instead.
    pub fn resolved(mut self, root: &Path) -> Self {
        let join = |p: &PathBuf| if p.is_absolute() { p.clone() } else { root.join(p) };

        self.bases = self.bases.iter().map(join).collect();
        for entry in &mut self.stylesheets {
            entry.input = join(&entry.input);
            entry.output = join(&entry.output);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r#"
bases:
  - images/
  - vendor/icons
stylesheets:
  - input: css/app.css
    output: dist/app.css
  - input: css/admin.css
    output: css/admin.css
"#;
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(
            manifest.bases,
            vec![PathBuf::from("images/"), PathBuf::from("vendor/icons")]
        );
        assert_eq!(manifest.stylesheets.len(), 2);
        assert_eq!(manifest.stylesheets[0].input, PathBuf::from("css/app.css"));
        assert_eq!(manifest.stylesheets[1].output, PathBuf::from("css/admin.css"));
    }

    #[test]
    fn test_parse_empty_manifest() {
        assert_eq!(Manifest::parse("").unwrap(), Manifest::default());
        assert_eq!(Manifest::parse("bases: []").unwrap(), Manifest::default());
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let err = Manifest::parse("output: dist").unwrap_err();
        assert!(matches!(err, SpriteError::Config { .. }));
    }

    #[test]
    fn test_resolved_paths() {
        let manifest = Manifest {
            bases: vec![PathBuf::from("img"), PathBuf::from("/abs/icons")],
            stylesheets: vec![StylesheetEntry {
                input: PathBuf::from("a.css"),
                output: PathBuf::from("out/a.css"),
            }],
        }
        .resolved(Path::new("/project"));

        assert_eq!(
            manifest.bases,
            vec![PathBuf::from("/project/img"), PathBuf::from("/abs/icons")]
        );
        assert_eq!(manifest.stylesheets[0].input, PathBuf::from("/project/a.css"));
        assert_eq!(
            manifest.stylesheets[0].output,
            PathBuf::from("/project/out/a.css")
        );
    }

    #[test]
    fn test_discover() {
        let dir = tempdir().unwrap();
        assert!(Manifest::discover(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join(MANIFEST_FILENAME), "bases: [icons]\n").unwrap();
        let manifest = Manifest::discover(dir.path()).unwrap().unwrap();
        assert_eq!(manifest.bases, vec![dir.path().join("icons")]);
    }
}
