use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use scaffold_hooks::commands;
use scaffold_hooks::context::{GenContext, PackageManager, Platform};

#[derive(Parser)]
#[command(version, about = "Pre/post generation hooks for the Django settings scaffold")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the surrounding directory is a Django project root
    PreGen,
    /// Wire the generated scaffold into the project: secret key, settings imports, moves
    PostGen(PostGenArgs),
}

#[derive(Args)]
struct PostGenArgs {
    /// JSON context file dumped by the generation engine
    #[arg(long, value_name = "FILE")]
    context: Option<PathBuf>,
    /// Name of the configuration package (required without --context)
    #[arg(long)]
    config_dir: Option<String>,
    /// The CMS add-on was selected at generation time
    #[arg(long)]
    use_cms: bool,
    /// The frontend-bundler integration was selected at generation time
    #[arg(long)]
    use_webpack: bool,
    /// Deployment target chosen at generation time
    #[arg(long, value_enum, default_value_t = Platform::Render)]
    platform: Platform,
    /// Package manager chosen at generation time
    #[arg(long, value_enum, default_value_t = PackageManager::Pip)]
    package_manager: PackageManager,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::PreGen => commands::pre_gen::run(),
        Command::PostGen(args) => {
            let ctx = match args.context {
                Some(path) => GenContext::load(&path)?,
                None => GenContext {
                    config_dir: args
                        .config_dir
                        .context("--config-dir is required without --context")?,
                    use_cms: args.use_cms,
                    use_webpack: args.use_webpack,
                    platform: args.platform,
                    package_manager: args.package_manager,
                },
            };
            commands::post_gen::run(&ctx)
        }
    }
}
