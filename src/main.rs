mod cli;
mod config;
mod core;
mod error;
mod models;
mod sources;

use clap::Parser;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting soundcloud scope");

    let cli = cli::Cli::parse();

    if let Err(e) = cli::run(cli) {
        eprintln!("오류: {:#}", e);
        std::process::exit(1);
    }
}
