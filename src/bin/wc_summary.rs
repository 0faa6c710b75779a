use anyhow::{Context, Result, anyhow};

use wc_history::config;
use wc_history::dataset::load_snapshot;
use wc_history::report::view_report;
use wc_history::state::{View, view_slug};
use wc_history::views;

fn main() -> Result<()> {
    config::load_dotenv();
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let paths = config::resolve_data_paths(&args);

    let selected = match config::flag_value(&args, "--view") {
        Some(raw) => {
            let view = View::from_name(&raw).ok_or_else(|| {
                let known = View::ALL.map(view_slug).join(", ");
                anyhow!("unknown view {raw:?} (expected one of: {known})")
            })?;
            vec![view]
        }
        None => View::ALL.to_vec(),
    };

    let snapshot = load_snapshot(&paths).context("Failed to load data")?;

    println!("World Cup history summary");
    println!("Tournaments: {}", paths.tournaments.display());
    println!("Matches: {}", paths.matches.display());
    println!("Players: {}", paths.players.display());
    println!("Loaded {}", snapshot.summary());

    for view in selected {
        println!();
        print!("{}", view_report(&views::build(view, &snapshot)));
    }

    Ok(())
}
