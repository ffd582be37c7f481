use clap::Parser;
use env_logger::Env;
use log::error;

use redraster::app::{self, App, AppError};
use redraster::config::Config;

fn run() -> Result<(), AppError> {
    let config = Config::parse();
    let scene = app::load_scene(&config)?;
    let app = App::new(config.clone(), scene);
    if config.headless {
        app.run_headless()
    } else {
        app.run()
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}
