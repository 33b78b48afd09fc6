//! Check command implementation.
//!
//! Scans a stylesheet, loads its images and reports the sprites a build
//! would produce. Nothing is written.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{Result, SpriteError};
use crate::output::{display_path, plural, Printer};
use crate::service::FileService;
use crate::sprite::{Plan, Spriter};

/// Show the sprites a stylesheet would produce, without writing anything
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Stylesheet to inspect
    #[arg(long, short)]
    pub input: PathBuf,

    /// Directory to resolve images from (repeatable; default: the
    /// stylesheet's directory)
    #[arg(long)]
    pub base: Vec<PathBuf>,

    /// Print the plan as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let plan = plan(&args)?;

    if args.json {
        let json = serde_json::to_string_pretty(&plan).map_err(|e| SpriteError::Encode {
            message: e.to_string(),
        })?;
        println!("{}", json);
        return Ok(());
    }

    report(&args.input, &plan, printer);
    Ok(())
}

fn plan(args: &CheckArgs) -> Result<Plan> {
    let css = super::read_stylesheet(&args.input)?;
    let bases = if args.base.is_empty() {
        vec![super::parent_dir(&args.input)]
    } else {
        args.base.clone()
    };

    // Never written to; the plan only opens images.
    let service = FileService::new(bases, super::parent_dir(&args.input));
    Spriter::new(css, &service)
        .with_source_name(args.input.display().to_string())
        .plan()
        .map_err(super::with_base_hint)
}

fn report(input: &Path, plan: &Plan, printer: &Printer) {
    for group in &plan.groups {
        printer.info(
            "Group",
            &format!(
                "{} {}",
                group.group,
                printer.dim(&format!(
                    "({}x{}, {})",
                    group.width,
                    group.height,
                    plural(group.members.len(), "image", "images")
                ))
            ),
        );
        for member in &group.members {
            printer.info(
                "",
                &format!(
                    "{} {}",
                    member.url,
                    printer.dim(&format!("at -{}px {}", member.x, member.y))
                ),
            );
        }
    }

    for url in &plan.ignored {
        printer.warning("Ignored", url);
    }

    printer.success(
        "Checked",
        &format!(
            "{} ({})",
            display_path(input),
            plural(plan.groups.len(), "sprite", "sprites")
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::sprite::test_png;
    use std::fs;
    use tempfile::tempdir;

    fn files_in(dir: &std::path::Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_check_plans_without_writing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("g.a.png"), test_png(10, 6, [1, 1, 1, 255])).unwrap();
        fs::write(dir.path().join("g.b.png"), test_png(4, 8, [2, 2, 2, 255])).unwrap();
        let input = dir.path().join("app.css");
        fs::write(
            &input,
            ".a { background: url(g.a.png) }\n.b { background: url(g.b.png) }\n.c { background: url(logo.png) }\n",
        )
        .unwrap();

        let args = CheckArgs {
            input: input.clone(),
            base: vec![],
            json: false,
        };
        let plan = plan(&args).unwrap();

        assert_eq!(plan.groups.len(), 1);
        assert_eq!((plan.groups[0].width, plan.groups[0].height), (14, 8));
        assert_eq!(plan.groups[0].members[1].x, 10);
        assert_eq!(plan.ignored, vec!["logo.png".to_string()]);

        run(args, &Printer::new().with_quiet(true)).unwrap();
        assert_eq!(files_in(dir.path()), vec!["app.css", "g.a.png", "g.b.png"]);
    }

    #[test]
    fn test_check_uses_given_bases() {
        let dir = tempdir().unwrap();
        let icons = dir.path().join("icons");
        fs::create_dir_all(&icons).unwrap();
        fs::write(icons.join("g.a.png"), test_png(3, 3, [1, 1, 1, 255])).unwrap();
        let input = dir.path().join("app.css");
        fs::write(&input, ".a { background: url(g.a.png) }").unwrap();

        let missing = CheckArgs {
            input: input.clone(),
            base: vec![],
            json: false,
        };
        let err = plan(&missing).unwrap_err();
        assert!(matches!(err, SpriteError::ImageNotFound { .. }));
        assert_eq!(err.kind(), ErrorKind::Input);

        let found = CheckArgs {
            input,
            base: vec![icons],
            json: false,
        };
        assert_eq!(plan(&found).unwrap().groups[0].width, 3);
    }
}
