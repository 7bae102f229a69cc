use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Collection, Database};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use medmig::models::Patient;
use medmig::provision::UserListing;
use medmig::{config, db, demo, migrate, output, provision};

async fn connect_from_env(env_file: Option<&str>) -> Database {
    config::load_env_file(env_file);
    let mongo_uri = config::get_mongo_uri();
    let db_name = config::get_db_name();
    match db::connect(&mongo_uri, &db_name).await {
        Ok(database) => database,
        Err(e) => {
            tracing::error!(%e, "Failed to connect to MongoDB");
            eprintln!(
                "{}: {}",
                yansi::Paint::new("Failed to connect to MongoDB").red(),
                e
            );
            process::exit(1);
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w - 4);
    }
    table
}

fn print_users_table(users: &[UserListing]) {
    if users.is_empty() {
        println!("(no users defined on this database)");
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["Username", "Roles"]);
    for user in users {
        table.add_row(vec![user.username.clone(), user.roles.join(", ")]);
    }
    println!("\n{table}\n");
}

fn print_patients_table(patients: &[Patient]) {
    if patients.is_empty() {
        println!("(no patients in this collection)");
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Age", "Gender", "Blood Type", "Admissions"]);
    for p in patients {
        table.add_row(vec![
            p.id.clone(),
            p.name.clone(),
            p.age.to_string(),
            p.gender.clone(),
            p.blood_type.clone(),
            p.admissions.len().to_string(),
        ]);
    }
    println!("\n{table}\n");
}

#[derive(Parser)]
#[command(
    name = "medmig",
    author,
    version,
    about = "Medical database provisioning and migration tool",
    long_about = r#"medmig — provision accounts and load medical records into MongoDB.

This tool surfaces a small set of commands to create the fixed database
accounts, import admission records from a CSV export, inspect users and
patients, and run a CRUD walkthrough against the configured deployment.
Use the `--env-file` option or environment variables (MONGO_URI, DB_NAME,
COLLECTION_NAME, DATA_FILE) to point at your deployment.

Examples:
  1) Provision the fixed accounts:
      medmig init-users
  2) Import a CSV export:
      medmig migrate --file data/healthcare_dataset.csv
  3) Inspect the provisioned accounts:
      medmig users list
"#,
    after_help = "Use `medmig <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Suppress progress/status output (results still print)
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the three fixed database accounts
    #[command(
        about = "Create the admin, application and read-only accounts.",
        long_about = "Create the three fixed accounts on the target database: admin_user (root@admin), app_user (readWrite on the target) and readonly_user (read on the target). Creation is sequential and stops at the first server error; re-running against an already-provisioned database fails on the duplicate-user condition."
    )]
    InitUsers {
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
    },
    /// Inspect accounts defined on the target database
    Users {
        #[command(subcommand)]
        sub: UserCommands,
    },
    /// Inspect migrated patient documents
    Patients {
        #[command(subcommand)]
        sub: PatientCommands,
    },
    /// Import an admissions CSV export into the target collection
    #[command(
        about = "Import a CSV export into the patients collection.",
        long_about = "Load the admissions CSV (from --file or DATA_FILE), group rows into one document per patient, wipe the target collection (unless --keep-existing), insert the documents and create lookup indexes."
    )]
    Migrate {
        /// Path to the CSV export (defaults to DATA_FILE)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Do not clear the collection before inserting
        #[arg(long, default_value_t = false)]
        keep_existing: bool,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
    },
    /// Run a create/read/update/delete walkthrough
    #[command(
        about = "Run a CRUD walkthrough against the patients collection.",
        long_about = "Insert a fixed demo patient, read it back, update its age, read again and delete it. Handy as a smoke test of the application credentials after provisioning."
    )]
    Demo {
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
    },
    /// Validate configuration (env vars / deployment reachability)
    #[command(
        about = "Validate configuration and ensure the deployment is reachable.",
        long_about = "Check the MongoDB connection settings and ping the configured deployment to confirm it is reachable before running init-users or migrate."
    )]
    CheckConfig {
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    #[command(
        about = "List accounts on the target database",
        long_about = "Run usersInfo against the target database and print username and role bindings (role@db) for every account."
    )]
    List {
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
    },
}

#[derive(Subcommand)]
enum PatientCommands {
    #[command(
        about = "List patient documents",
        long_about = "List patient documents from the configured collection. Use --limit to bound the number of rows (0 shows everything)."
    )]
    List {
        /// Maximum number of patients to show (0 = all)
        #[arg(long, short = 'l', default_value = "20")]
        limit: i64,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        output::set_silent(true);
    }

    match cli.command {
        Commands::InitUsers { env_file } => {
            let database = connect_from_env(env_file.as_deref()).await;
            let target_db = config::get_db_name();
            let specs = provision::user_specs(&target_db);
            println!(
                "Provisioning {} accounts on '{}'...",
                specs.len(),
                target_db
            );
            if let Err(e) = provision::create_users(&database, &specs).await {
                tracing::error!(%e, "User provisioning failed");
                eprintln!(
                    "{}: {}",
                    yansi::Paint::new("User provisioning failed").red(),
                    e
                );
                process::exit(1);
            }
            println!(
                "{}",
                yansi::Paint::new(format!("Provisioned {} accounts", specs.len())).green()
            );
            // Best-effort verification; provisioning itself already succeeded
            match provision::list_users(&database).await {
                Ok(users) => print_users_table(&users),
                Err(e) => tracing::warn!(%e, "Could not list users after provisioning"),
            }
        }
        Commands::Users { sub } => match sub {
            UserCommands::List { env_file } => {
                let database = connect_from_env(env_file.as_deref()).await;
                match provision::list_users(&database).await {
                    Ok(users) => print_users_table(&users),
                    Err(e) => {
                        tracing::error!(%e, "Failed to list users");
                        eprintln!("{}: {}", yansi::Paint::new("Failed to list users").red(), e);
                        process::exit(1);
                    }
                }
            }
        },
        Commands::Patients { sub } => match sub {
            PatientCommands::List { limit, env_file } => {
                let database = connect_from_env(env_file.as_deref()).await;
                let collection: Collection<Patient> =
                    database.collection(&config::get_collection_name());
                let result = async {
                    let mut find = collection.find(doc! {});
                    if limit > 0 {
                        find = find.limit(limit);
                    }
                    let mut cursor = find.await?;
                    let mut patients = Vec::new();
                    while let Some(patient) = cursor.try_next().await? {
                        patients.push(patient);
                    }
                    mongodb::error::Result::Ok(patients)
                }
                .await;
                match result {
                    Ok(patients) => print_patients_table(&patients),
                    Err(e) => {
                        tracing::error!(%e, "Failed to list patients");
                        eprintln!(
                            "{}: {}",
                            yansi::Paint::new("Failed to list patients").red(),
                            e
                        );
                        process::exit(1);
                    }
                }
            }
        },
        Commands::Migrate {
            file,
            keep_existing,
            env_file,
        } => {
            let database = connect_from_env(env_file.as_deref()).await;
            let collection: Collection<Patient> =
                database.collection(&config::get_collection_name());
            let data_file = file.unwrap_or_else(|| PathBuf::from(config::get_data_file()));
            match migrate::run_migration(&collection, &data_file, keep_existing).await {
                Ok(report) => {
                    println!(
                        "{}",
                        yansi::Paint::new(format!(
                            "Migration complete: {} rows -> {} patients",
                            report.rows_read, report.patients_written
                        ))
                        .green()
                    );
                }
                Err(e) => {
                    tracing::error!(%e, "Migration failed");
                    eprintln!("{}: {}", yansi::Paint::new("Migration failed").red(), e);
                    process::exit(1);
                }
            }
        }
        Commands::Demo { env_file } => {
            let database = connect_from_env(env_file.as_deref()).await;
            let collection: Collection<Patient> =
                database.collection(&config::get_collection_name());
            if let Err(e) = demo::run_demo(&collection).await {
                tracing::error!(%e, "CRUD demo failed");
                eprintln!("{}: {}", yansi::Paint::new("CRUD demo failed").red(), e);
                process::exit(1);
            }
        }
        Commands::CheckConfig { env_file } => {
            config::load_env_file(env_file.as_deref());
            let mongo_uri = config::get_mongo_uri();
            let db_name = config::get_db_name();
            if std::env::var("MONGO_URI").is_err() {
                println!(
                    "{}",
                    yansi::Paint::new(format!(
                        "MONGO_URI is not set; using default {}",
                        mongo_uri
                    ))
                    .yellow()
                );
            }
            println!("Target database: {}", db_name);
            let database = connect_from_env(env_file.as_deref()).await;
            match db::ping(&database).await {
                Ok(()) => {
                    println!(
                        "{}",
                        yansi::Paint::new("Configuration looks valid (ping acknowledged)").green()
                    );
                }
                Err(e) => {
                    eprintln!(
                        "{}: {}",
                        yansi::Paint::new("Configuration appears invalid").red(),
                        e
                    );
                    process::exit(1);
                }
            }
        }
    }
}
