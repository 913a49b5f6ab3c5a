mod cli;
mod config;
mod html;
mod logging;

use clap::Parser;

use crate::cli::App;
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = App::parse();
    logging::init(app.verbose);

    let config = Config::load(&app.config)?;
    app.cmd.run(&config).await
}
