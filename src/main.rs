//! Binary entry point: resolve configuration, start logging, open the store,
//! and hand it to the terminal UI until the user quits.
use tracing::info;
use travel_planner::config::{self, Config};
use travel_planner::{logging, run_app, App, Store};

fn main() -> anyhow::Result<()> {
    let config = Config::resolve(config::parse())?;
    let _log_guard = logging::init(&config.log_file)?;
    info!("starting travel planner");

    let store = Store::open(&config.db_path)?;
    let plans = store.list_plans()?;

    let mut app = App::new(store, plans);
    run_app(&mut app)?;

    info!("travel planner closed");
    Ok(())
}
