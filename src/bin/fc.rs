use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use circus_cli::exec::{SystemExecutor, ToolResolver};
use circus_cli::plugins::{PluginContext, PluginIo, Registry};

/// Utility command dispatcher.
///
/// With no command, prints the available commands. Otherwise routes the
/// command to a built-in plugin or an external `fc-<command>` executable and
/// mirrors its exit status.
#[derive(Parser)]
#[command(name = "fc", version, disable_help_subcommand = true)]
struct Fc {
    /// Directory searched for external fc-* plugin executables.
    #[arg(long, value_name = "DIR")]
    plugin_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    #[command(external_subcommand)]
    External(Vec<String>),
}

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let fc = Fc::parse();

    let env: HashMap<String, String> = std::env::vars().collect();
    let resolver = ToolResolver::from_vars(env.clone());
    let executor = SystemExecutor;
    let home = env
        .get("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("/"));

    let plugin_dir = fc
        .plugin_dir
        .unwrap_or_else(|| home.join(".circus").join("bin"));
    let registry = Registry::builtin().discover(&plugin_dir);

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();

    match fc.command {
        None => {
            let _ = registry.write_usage(&mut stdout);
            ExitCode::SUCCESS
        }
        Some(Command::External(argv)) => {
            let Some((command, rest)) = argv.split_first() else {
                let _ = registry.write_usage(&mut stdout);
                return ExitCode::SUCCESS;
            };
            let ctx = PluginContext {
                resolver: &resolver,
                executor: &executor,
                env: &env,
                home: &home,
            };
            let mut io = PluginIo {
                out: &mut stdout,
                err: &mut stderr,
            };
            let code = registry.dispatch(command, rest, &ctx, &mut io);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
