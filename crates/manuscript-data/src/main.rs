use crate::prelude::*;
use clap::Parser;

mod biorxiv;
mod data;
mod hypothesis;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Assembles a JSON manuscript record describing a preprint and its \
                  peer-review history from preprint and annotation metadata"
)]
pub struct App {
    #[clap(flatten)]
    pub options: data::Options,

    /// Whether to display additional information.
    #[clap(long, env = "MANUSCRIPT_DATA_VERBOSE", default_value = "false")]
    pub verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    data::run(app.options, app.verbose).await
}
