use anyhow::Context;
use clap::Parser;
use viewer::config::{Cli, Config};
use viewer::{app, logging, VacancyClient, VacancyListView};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    let config = Config::from_cli(Cli::parse())?;
    let client = VacancyClient::new(config.timeout).context("failed to build http client")?;
    let view = VacancyListView::new(client, config.queries, config.items_per_page);

    app::run(view, config.html_out).await
}
