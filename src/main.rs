use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use auto_budget::adapters::auth::google_oauth::GoogleOAuthClient;
use auto_budget::adapters::auth::token_cache::FileCredentialStore;
use auto_budget::adapters::config::app_config::AppConfig;
use auto_budget::adapters::config::logging_config::LoggingConfig;
use auto_budget::adapters::sheets::sheet_connector::GoogleSheetConnector;
use auto_budget::application::budget_run::BudgetRun;
use auto_budget::application::credential_provider::CredentialProvider;
use auto_budget::domain::{Category, EntryRequest};
use auto_budget::prettyprint::PrettyFormatter;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

#[derive(Parser, Debug)]
#[command(name = "auto-budget")]
#[command(about = "Append today's savings to the budget spreadsheet")]
struct Args {
    /// Amount saved, e.g. 120.50 (negative for a withdrawal)
    #[arg(short, long, allow_negative_numbers = true)]
    saved: Decimal,

    /// What the money is set aside for. Without it the target is 0
    #[arg(short, long, value_enum)]
    category: Option<CategoryArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum CategoryArg {
    Flight,
    Other,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Flight => Category::Flight,
            CategoryArg::Other => Category::Other,
        }
    }
}

fn init_tracing(config: &LoggingConfig) {
    let level = tracing::Level::from_str(&config.level).unwrap_or(tracing::Level::DEBUG);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stderr);

    let log_file_layer = (!config.file.is_empty())
        .then(|| match std::fs::File::create(&*config.file) {
            Ok(file) => Some(
                tracing_subscriber::fmt::layer()
                    .event_format(PrettyFormatter::new(false))
                    .with_writer(Arc::new(file))
                    .with_ansi(false),
            ),
            Err(e) => {
                eprintln!("Could not create log file '{}': {}", config.file, e);
                None
            }
        })
        .flatten();

    Registry::default()
        .with(tracing_subscriber::filter::Targets::new().with_target("auto_budget", level))
        .with(log_file_layer)
        .with(stderr_layer)
        .init();

    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(report) => {
            init_tracing(&LoggingConfig::default());
            tracing::error!("{:?}", report);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging);
    tracing::debug!(?config, "Configuration loaded");

    let oauth_client = Arc::new(GoogleOAuthClient::new(
        &*config.auth.client_secret,
        config.auth.scopes.clone(),
    ));
    let credentials = CredentialProvider::new(
        Arc::new(FileCredentialStore::new(&*config.auth.token_cache)),
        oauth_client.clone(),
        oauth_client,
    );
    let connector = GoogleSheetConnector::new(config.sheets.clone());

    let request = EntryRequest::new(args.saved, args.category.map(Category::from));
    let today = chrono::Local::now().date_naive();

    let mut run = BudgetRun::new(&credentials, &connector);
    match run.execute(&request, today).await {
        Ok(entry) => {
            println!("Row added: {}", entry);
            ExitCode::SUCCESS
        }
        Err(report) => {
            tracing::error!("❌ {:?}", report);
            ExitCode::FAILURE
        }
    }
}
