use bistro_app::{config::ClientConfig, context::AppContext, observability::init_subscriber};
use clap::{Parser, Subcommand};

mod account;
mod checkout;
mod labels;
mod menu;
mod quote;
mod restaurants;
mod track;

#[derive(Debug, Parser)]
#[command(name = "bistro", about = "Bistro delivery CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: ClientConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Price a fixture cart offline and print its receipt
    Quote(quote::QuoteArgs),
    /// List restaurants
    Restaurants,
    /// Show a restaurant's menu by category
    Menu(menu::MenuArgs),
    /// Place and submit an order
    Checkout(checkout::CheckoutArgs),
    /// Show the status of a submitted order
    Track(track::TrackArgs),
    /// Sign in with the configured account
    Login,
    /// Create an account with the configured email and password
    Register(account::RegisterArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        init_subscriber(&self.config.logging).map_err(|error| error.to_string())?;

        let Self { config, command } = self;

        match command {
            Commands::Quote(args) => quote::run(args),
            Commands::Restaurants => restaurants::run(&context(&config)?).await,
            Commands::Menu(args) => menu::run(args, &context(&config)?).await,
            Commands::Checkout(args) => checkout::run(args, &config, &context(&config)?).await,
            Commands::Track(args) => track::run(args, &context(&config)?).await,
            Commands::Login => account::login(&config, &context(&config)?).await,
            Commands::Register(args) => account::register(args, &config, &context(&config)?).await,
        }
    }
}

fn context(config: &ClientConfig) -> Result<AppContext, String> {
    AppContext::from_config(&config.api).map_err(|error| format!("failed to start: {error}"))
}
