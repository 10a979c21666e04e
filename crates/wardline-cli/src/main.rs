use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use wardline_cli::admin::create_super_admin;
use wardline_cli::seeder::{self, SEED_PASSWORD, SeedConfig};
use wardline_config::DatabaseConfig;
use wardline_db::{PgStore, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "wardline-cli")]
#[command(about = "Wardline CLI - Administrative tools for Wardline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a super administrator account
    CreateSuperAdmin {
        /// Full name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed demo hospitals with an admin, doctors and patients each
    Seed {
        /// Number of hospitals to create
        #[arg(long, default_value = "3")]
        hospitals: usize,

        /// Number of doctors per hospital
        #[arg(long, default_value = "4")]
        doctors: usize,

        /// Number of patients per doctor
        #[arg(long, default_value = "5")]
        patients: usize,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
    run_migrations(&pool).await?;
    let store = PgStore::new(pool);

    match command {
        Commands::CreateSuperAdmin {
            name,
            email,
            password,
        } => {
            let name = prompt_or(name, "Full name")?;
            let email = prompt_or(email, "Email address")?;
            let password = match password {
                Some(password) => password,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords don't match")
                    .interact()
                    .context("Failed to read password")?,
            };

            let user = create_super_admin(&store, &name, &email, &password)
                .await
                .map_err(|e| anyhow::anyhow!("Error creating super admin: {}", e.message()))?;

            println!("\n✅ Super admin created successfully!");
            println!("   Email: {}", user.email);
            println!("   Name: {}", user.name);
        }
        Commands::Seed {
            hospitals,
            doctors,
            patients,
        } => {
            let config = SeedConfig::new(hospitals)
                .with_doctors(doctors)
                .with_patients(patients);
            seeder::seed_all(&store, config)
                .await
                .map_err(|e| anyhow::anyhow!("Error seeding database: {}", e.message()))?;

            println!("\n✅ Seeding complete. Every seeded account uses password `{SEED_PASSWORD}`.");
        }
    }

    Ok(())
}

fn prompt_or(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("Failed to read {}", prompt.to_lowercase())),
    }
}
