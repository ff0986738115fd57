use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
};

use clap::{Parser, Subcommand};

use budget_tracker_client::{
    ActionOutcome, ClientConfig, Command, ConfirmationPrompt, ConfirmationSurface, ConsoleSurface,
    Controller, DEFAULT_SERVER_URL, DEFAULT_TIMEZONE, Error, HttpTransport, Page, PendingAction,
    PromptConfirmation, ResourceId, ResourceKind, init_logging,
};

/// Run Budget Tracker actions against a server from the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The base URL of the Budget Tracker server.
    #[arg(long, env = "BT_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,

    /// The canonical timezone used for "today", e.g. "Pacific/Auckland".
    #[arg(long, env = "BT_TIMEZONE", default_value = DEFAULT_TIMEZONE)]
    timezone: String,

    /// Delete without asking for confirmation.
    #[arg(short, long)]
    yes: bool,

    /// The log level used when `RUST_LOG` is not set.
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Delete a transaction.
    DeleteTransaction {
        /// The transaction ID.
        id: String,
    },
    /// Delete a category.
    DeleteCategory {
        /// The category ID.
        id: String,
    },
    /// Rename a category.
    EditCategory {
        /// The category ID.
        id: String,
        /// The new name.
        name: String,
    },
    /// Create a category.
    AddCategory {
        /// A four character category ID.
        id: String,
        /// The category name.
        name: String,
    },
    /// Print the download URL of a report.
    ExportReport {
        /// The report to export, e.g. "current".
        report_type: String,
        /// The file format, e.g. "csv".
        format: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(args.log_level);

    let client = match reqwest::Client::builder()
        .user_agent(concat!("tracker/", env!("CARGO_PKG_VERSION")))
        .build()
    {
        Ok(client) => client,
        Err(error) => {
            eprintln!("Could not create HTTP client: {error}");
            return ExitCode::FAILURE;
        }
    };

    let config = ClientConfig::new(&args.server_url).with_timezone(&args.timezone);
    let yes = args.yes;
    let mut controller = Controller::new(
        config,
        Page::new(),
        HttpTransport::with_client(client),
        ConsoleSurface::stdout(),
        PromptConfirmation::new(move |prompt: &ConfirmationPrompt| yes || ask_on_stdin(prompt)),
    );

    let result = match args.action {
        Action::DeleteTransaction { id } => {
            delete(&mut controller, ResourceKind::Transaction, &id).await
        }
        Action::DeleteCategory { id } => delete(&mut controller, ResourceKind::Category, &id).await,
        Action::EditCategory { id, name } => match ResourceId::new(&id) {
            Ok(id) => Ok(Some(controller.edit_category(&id, &name).await)),
            Err(error) => Err(error),
        },
        Action::AddCategory { id, name } => Ok(Some(controller.add_category(&id, &name).await)),
        Action::ExportReport {
            report_type,
            format,
        } => {
            println!("{}", controller.export_report(&report_type, &format));
            Ok(Some(ActionOutcome::Succeeded))
        }
    };

    match result {
        Ok(Some(ActionOutcome::Succeeded)) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn delete<C>(
    controller: &mut Controller<HttpTransport, ConsoleSurface<io::Stdout>, C>,
    kind: ResourceKind,
    id: &str,
) -> Result<Option<ActionOutcome>, Error>
where
    C: ConfirmationSurface,
{
    let id = ResourceId::new(id)?;

    controller
        .run(Command::RequestDelete(PendingAction::new(kind, id)))
        .await
}

fn ask_on_stdin(prompt: &ConfirmationPrompt) -> bool {
    println!("{}", prompt.title);
    println!("{}", prompt.message);
    for (label, value) in &prompt.details {
        println!("  {label}: {value}");
    }
    print!("Continue? [y/N] ");

    if let Err(error) = io::stdout().flush() {
        tracing::error!("could not show prompt: {error}");
        return false;
    }

    let mut answer = String::new();

    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(error) => {
            tracing::error!("could not read answer: {error}");
            false
        }
    }
}
