pub mod build;
pub mod check;
pub mod completions;
pub mod init;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::error::{Result, SpriteError};

/// cssprite - Merge stylesheet icons into PNG sprites
#[derive(Parser, Debug)]
#[command(name = "cssprite")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress status output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite stylesheets and write their sprites
    Build(build::BuildArgs),

    /// Show the sprites a stylesheet would produce, without writing anything
    Check(check::CheckArgs),

    /// Initialize a project (generates cssprite.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Read a stylesheet as UTF-8 text.
fn read_stylesheet(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| SpriteError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Point a missing image at the `--base` flag.
fn with_base_hint(err: SpriteError) -> SpriteError {
    match err {
        SpriteError::ImageNotFound { name, help } => {
            let hint = "check the --base search directories";
            SpriteError::ImageNotFound {
                name,
                help: Some(match help {
                    Some(found) => format!("{}; {}", found, hint),
                    None => hint.to_string(),
                }),
            }
        }
        other => other,
    }
}

/// Directory containing `file`, with `.` standing in for a bare filename.
fn parent_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir(Path::new("app.css")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("css/app.css")), PathBuf::from("css"));
        assert_eq!(parent_dir(Path::new("/srv/app.css")), PathBuf::from("/srv"));
    }

    #[test]
    fn test_with_base_hint() {
        let err = with_base_hint(SpriteError::ImageNotFound {
            name: "g.a.png".to_string(),
            help: Some("g.a.png not found in css".to_string()),
        });
        match err {
            SpriteError::ImageNotFound { help, .. } => assert_eq!(
                help.as_deref(),
                Some("g.a.png not found in css; check the --base search directories")
            ),
            other => panic!("unexpected error: {other:?}"),
        }

        let untouched = with_base_hint(SpriteError::Encode {
            message: "boom".to_string(),
        });
        assert!(matches!(untouched, SpriteError::Encode { .. }));
    }

    #[test]
    fn test_cli_parses_build_flags() {
        let cli = Cli::try_parse_from([
            "cssprite", "build", "-i", "in.css", "-o", "out.css", "--base", "a", "--base", "b",
        ])
        .unwrap();

        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.input, Some(PathBuf::from("in.css")));
                assert_eq!(args.output, Some(PathBuf::from("out.css")));
                assert_eq!(args.base, vec![PathBuf::from("a"), PathBuf::from("b")]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
