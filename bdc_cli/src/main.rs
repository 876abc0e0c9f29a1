use anyhow::Result;
use bdc_core::{
    config::Config,
    sync::{self, SyncOptions},
};
use clap::Parser;
use log::info;

/// Add the upcoming bin collection days of a property to a Google calendar.
///
/// Every setting can also be given in the environment or a `.env` file.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Arguments {
    /// the council's collection lookup URL
    #[arg(long, env = "ENDPOINT")]
    pub endpoint: String,
    /// the unique property reference number
    #[arg(long, env = "UPRN")]
    pub uprn: String,
    /// the service account's email address
    #[arg(long, env = "GOOGLE_SA_CLIENT_EMAIL")]
    pub client_email: String,
    /// the service account's PEM private key, line breaks may be written as `\n`
    #[arg(
        long,
        env = "GOOGLE_SA_PRIVATE_KEY",
        hide_env_values = true,
        allow_hyphen_values = true
    )]
    pub private_key: String,
    /// the calendar to add the events to
    #[arg(long, env = "CALENDAR_ID")]
    pub calendar_id: String,
    /// only log the events which would be created
    #[arg(long)]
    pub dry_run: bool,
}

impl TryFrom<&Arguments> for Config {
    type Error = bdc_core::Error;

    fn try_from(value: &Arguments) -> Result<Self, Self::Error> {
        Config::new(
            &value.endpoint,
            &value.uprn,
            &value.client_email,
            &value.private_key,
            &value.calendar_id,
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Arguments::parse();
    let config = Config::try_from(&args)?;
    let report = sync::run(
        &config,
        SyncOptions {
            dry_run: args.dry_run,
        },
    )
    .await?;
    info!(
        "{} collections found, {} bin events already in the calendar, {} created",
        report.candidates, report.existing, report.created
    );
    Ok(())
}
