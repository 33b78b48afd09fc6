use clap::Parser;
use cssprite::cli::{Cli, Commands};
use cssprite::output::Printer;
use cssprite::SpriteError;

fn main() {
    let cli = Cli::parse();
    let printer = Printer::new().with_quiet(cli.quiet);

    let result = match cli.command {
        Commands::Build(args) => cssprite::cli::build::run(args, &printer),
        Commands::Check(args) => cssprite::cli::check::run(args, &printer),
        Commands::Init(args) => cssprite::cli::init::run(args, &printer),
        Commands::Completions(args) => cssprite::cli::completions::run(args),
    };

    if let Err(err) = result {
        exit_with(err);
    }
}

/// Report `err` through miette and exit with its kind's status code.
fn exit_with(err: SpriteError) -> ! {
    let code = err.exit_code();
    eprintln!("{:?}", miette::Report::new(err));
    std::process::exit(code);
}
