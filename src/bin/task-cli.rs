use clap::CommandFactory;
use tracing::debug;

use devtrack::cli::{TaskCli, parse_or_exit};
use devtrack::config::TaskConfig;
use devtrack::logging::init_logging;
use devtrack::tasks::commands;
use devtrack::tasks::store::TaskStore;

fn main() {
    let cli: TaskCli = parse_or_exit();
    init_logging();

    let Some(command) = cli.command.clone() else {
        eprintln!("{}", TaskCli::command().render_help());
        std::process::exit(1);
    };

    let config = match TaskConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    debug!(?config, "config loaded");

    let store = TaskStore::new(&config.file);
    let mut out = std::io::stdout().lock();
    if let Err(e) = commands::run(command, &store, &mut out) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
