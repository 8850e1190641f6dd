use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::error;

use elms_client::api::ApiError;
use elms_client::config::{config_schema, load_config};
use elms_client::models::{Credentials, RegistrationRequest, Role};
use elms_client::routing::{navigate, navigation_for, Navigation};
use elms_client::session::SessionError;
use elms_client::startup;
use elms_client::state::AppContext;
use elms_client::utils::logger::init_logging;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("could not load configuration: {0}")]
    Config(#[from] figment::Error),
    #[error("{0}")]
    Logging(String),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not signed in; run `elms login` first")]
    NotSignedIn,
}

#[derive(Parser, Debug)]
#[command(name = "elms", about = "Estate and lease management client")]
struct Cli {
    #[arg(long, env = "ELMS_CONFIG", default_value = "./config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the JSON schema of the configuration file.
    Schema,
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "ELMS_PASSWORD")]
        password: String,
    },
    Logout,
    /// Show the signed-in user and their menu.
    Whoami,
    Register(RegisterArgs),
    /// Show what the application would do when opening PATH.
    Navigate {
        path: String,
    },
    /// Dashboard statistics for properties, invoices and complaints.
    Stats,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "ELMS_PASSWORD")]
    password: String,
    #[arg(long, env = "ELMS_PASSWORD2")]
    password2: String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    phone: String,
    #[arg(long, default_value = "LANDLORD")]
    role: String,
}

impl From<RegisterArgs> for RegistrationRequest {
    fn from(args: RegisterArgs) -> Self {
        RegistrationRequest {
            username: args.username,
            email: args.email,
            password: args.password,
            password2: args.password2,
            first_name: args.first_name,
            last_name: args.last_name,
            phone: args.phone,
            role: Role::from(args.role),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    if let Command::Schema = cli.command {
        println!("{}", config_schema()?);
        return Ok(());
    }

    let config = load_config(&cli.config)?;
    init_logging(&config.logging).map_err(CliError::Logging)?;

    let mut context = startup::run(Arc::new(config)).await?;
    match cli.command {
        Command::Schema => Ok(()),
        Command::Login { username, password } => {
            let credentials = Credentials::new(username, password);
            context.session.login(&credentials).await?;
            print_whoami(&context)
        }
        Command::Logout => {
            context.session.logout()?;
            println!("signed out");
            Ok(())
        }
        Command::Whoami => print_whoami(&context),
        Command::Register(args) => {
            let created = context.session.register(&args.into()).await?;
            print_json(&created)
        }
        Command::Navigate { path } => {
            match navigate(context.session.state(), &path) {
                Navigation::Pending => println!("pending"),
                Navigation::Render(matched) => {
                    println!("render {}", matched.route.pattern);
                    for (name, value) in &matched.params {
                        println!("  {} = {}", name, value);
                    }
                }
                Navigation::Redirect(target) => println!("redirect {}", target),
                Navigation::NotFound => println!("not found"),
            }
            Ok(())
        }
        Command::Stats => run_stats(&mut context).await,
    }
}

fn print_whoami(context: &AppContext) -> Result<(), CliError> {
    let user = context.session.user().ok_or(CliError::NotSignedIn)?;
    println!("{} ({}) as {}", user.display_name(), user.username, user.role);
    for item in navigation_for(&user.role) {
        println!("  {:<16} {}", item.name, item.href);
    }
    Ok(())
}

async fn run_stats(context: &mut AppContext) -> Result<(), CliError> {
    if context.session.user().is_none() {
        return Err(CliError::NotSignedIn);
    }

    let client = context.session.client();
    let fetched = async {
        let properties = client.properties().statistics().await?;
        let invoices = client.finance().statistics().await?;
        let complaints = client.maintenance().statistics().await?;
        Ok::<_, ApiError>(serde_json::json!({
            "properties": properties,
            "invoices": invoices,
            "complaints": complaints,
        }))
    }
    .await;

    match fetched {
        Ok(stats) => print_json(&stats),
        Err(e) => {
            if context.session.handle_api_error(&e) {
                error!(
                    event_name = "cli.stats.session_expired",
                    event_domain = "cli",
                    "session expired while fetching statistics"
                );
            }
            Err(e.into())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
