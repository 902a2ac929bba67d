use tracing::{debug, info};

use devtrack::activity::describe;
use devtrack::activity::github::ActivityFetcher;
use devtrack::cli::{ActivityCli, parse_or_exit};
use devtrack::config::ActivityConfig;
use devtrack::logging::init_logging;

fn main() {
    let cli: ActivityCli = parse_or_exit();
    init_logging();

    let config = match ActivityConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    debug!(?config, "config loaded");

    let fetcher = ActivityFetcher::new(&config);
    let events = fetcher.fetch(&config.username, config.window_days);
    info!(count = events.len(), username = %config.username, "fetched activity");

    if events.is_empty() {
        println!("No recent activity for {}.", config.username);
        return;
    }
    for event in &events {
        println!("{}", describe(event));
    }
}
