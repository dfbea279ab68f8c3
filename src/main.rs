use clap::Parser;
use uigen::cli::commands::{cmd_generate, cmd_handlers, cmd_rename, cmd_search};
use uigen::cli::config::{Cli, Commands, load_config};
use uigen::trace::logger::TraceLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    let logger = match cli.trace.as_deref() {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    match cli.command {
        Commands::Generate {
            scene,
            output_dir,
            prefix,
            on_conflict,
            registry_out,
        } => {
            // Resolve settings: CLI > config > defaults
            let output_dir = output_dir.as_deref().unwrap_or(&config.output.dir);
            let prefix = prefix.as_deref().unwrap_or(&config.output.prefix);
            cmd_generate(
                &scene,
                output_dir,
                prefix,
                &on_conflict,
                registry_out.as_deref(),
                cli.verbose,
                &logger,
            )?;
        }
        Commands::Handlers {
            scene,
            output_dir,
            prefix,
        } => {
            let output_dir = output_dir.as_deref().unwrap_or(&config.output.dir);
            let prefix = prefix.as_deref().unwrap_or(&config.output.prefix);
            cmd_handlers(&scene, output_dir, prefix, cli.verbose, &logger)?;
        }
        Commands::Rename {
            scene,
            force,
            dry_run,
        } => {
            cmd_rename(&scene, force || config.rename.force, dry_run, cli.verbose, &logger)?;
        }
        Commands::Search { scene, query } => {
            cmd_search(&scene, &query, cli.verbose)?;
        }
    }

    Ok(())
}
