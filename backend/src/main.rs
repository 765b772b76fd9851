use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use expense_tracker::config::AppConfig;
use expense_tracker::domain::commands::expenses::CreateExpenseCommand;
use expense_tracker::{create_router, initialize_backend, AppState};

#[derive(Parser)]
#[command(name = "expense-tracker", version, about = "Personal expense tracking backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Insert demo expenses into an empty store
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("expense_tracker=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let state = initialize_backend(&config).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(state, &config).await,
        Command::Seed => seed(&state).await,
    }
}

async fn serve(state: AppState, config: &AppConfig) -> Result<()> {
    let app = create_router(state, &config.cors_origins);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("{} v{} listening on {}", config.app_name, config.app_version, addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn seed(state: &AppState) -> Result<()> {
    let existing = state.get_all_expenses.execute().await?;
    if !existing.is_empty() {
        info!("Store already holds {} expenses, skipping seed", existing.len());
        return Ok(());
    }

    let demo = [
        (25.50, "Comida", "cash", "Almuerzo restaurante"),
        (15.00, "Transporte", "debit_card", "Uber"),
        (50.00, "Entretenimiento", "credit_card", "Cine"),
    ];
    for (amount, category, payment_method, description) in demo {
        let expense = state
            .create_expense
            .execute(CreateExpenseCommand {
                amount,
                category: category.to_string(),
                payment_method: payment_method.to_string(),
                description: Some(description.to_string()),
                date: None,
            })
            .await?;
        info!("Seeded {}", expense);
    }
    Ok(())
}
