//! Filesystem-backed resource service.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use super::ResourceService;

/// Loads images from one or more base directories and writes sprites into
/// an output directory.
#[derive(Debug, Clone)]
pub struct FileService {
    bases: Vec<PathBuf>,
    output: PathBuf,
}

impl FileService {
    /// Create a service.
    ///
    /// # Arguments
    ///
    /// * `bases` - Directories searched, in order, for images the stylesheet references
    /// * `output` - Directory sprites are written to (normally the output stylesheet's directory)
    pub fn new(bases: Vec<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            bases,
            output: output.into(),
        }
    }

    pub fn bases(&self) -> &[PathBuf] {
        &self.bases
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl ResourceService for FileService {
    fn open_image(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        for base in &self.bases {
            match File::open(base.join(name)) {
                Ok(file) => return Ok(Box::new(BufReader::new(file))),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e),
            }
        }

        let searched: Vec<String> = self.bases.iter().map(|b| b.display().to_string()).collect();
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} not found in {}", name, searched.join(", ")),
        ))
    }

    fn create_sprite(&self, name: &str) -> io::Result<Box<dyn Write + '_>> {
        fs::create_dir_all(&self.output)?;
        let file = File::create(self.output.join(name))?;
        Ok(Box::new(BufWriter::new(file)))
    }
}
