use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use lending::auth::{RegistrationForm, validate_login};
use lending::guard::{ADMIN_ONLY, MEMBER_ONLY};
use lending::loans::{HistoryFilter, LoanSort, filter_history, search_books, sort_loans};
use lending::types::BookDraft;
use lending::{ClientConfig, LibraryClient, Role};
use serde_json::Value;
use time::OffsetDateTime;

mod access;
mod error;
mod output;
mod store;
mod transport;

use error::CliError;
use output::{print_json, print_lines};
use store::FileStore;
use transport::ReqwestTransport;

type Client = LibraryClient<ReqwestTransport>;

#[derive(Parser, Debug)]
#[command(name = "library-cli", about = "Library lending service CLI")]
struct Cli {
    #[arg(long, help = "Backend base URL (overrides LIBRARY_API_URL)")]
    api_url: Option<String>,

    #[arg(long, env = "LIBRARY_STATE_FILE", help = "Session file (default: <config dir>/library-cli/session.json)")]
    state_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Print raw JSON instead of text rows")]
    json: bool,

    #[arg(short, long, global = true, help = "Log requests and token refreshes to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "LIBRARY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register(RegisterArgs),
    Logout,
    Whoami,
    Books {
        #[arg(long, default_value = "")]
        search: String,
    },
    Borrow {
        book_id: i64,
    },
    Return {
        book_id: i64,
    },
    History {
        #[arg(long, default_value = "all", value_parser = parse_filter)]
        filter: HistoryFilter,
        #[arg(long, default_value = "")]
        search: String,
    },
    Admin(AdminCommand),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "LIBRARY_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long, help = "Defaults to --password")]
    confirm_password: Option<String>,
    #[arg(long, default_value = "member", value_parser = parse_role)]
    role: Role,
}

#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    Books {
        #[arg(long, default_value = "")]
        search: String,
    },
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
    },
    BulkAdd {
        #[arg(long, default_value = "-", help = "File with one `Title | Author` per line, or - for stdin")]
        input: String,
    },
    Update {
        book_id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
    },
    Delete {
        book_id: i64,
    },
    Loans {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "borrowed_at_desc", value_parser = parse_sort)]
        sort: LoanSort,
    },
}

fn parse_filter(raw: &str) -> Result<HistoryFilter, String> {
    HistoryFilter::parse(raw).ok_or_else(|| format!("expected one of: {}", names(HistoryFilter::ALL.map(HistoryFilter::as_str))))
}

fn parse_sort(raw: &str) -> Result<LoanSort, String> {
    LoanSort::parse(raw).ok_or_else(|| format!("expected one of: {}", names(LoanSort::ALL.map(LoanSort::as_str))))
}

fn parse_role(raw: &str) -> Result<Role, String> {
    Role::parse(raw).ok_or_else(|| "expected admin or member".to_owned())
}

fn names<const N: usize>(all: [&str; N]) -> String {
    all.join(", ")
}

struct Output {
    json: bool,
}

impl Output {
    fn emit(&self, value: &impl serde::Serialize, lines: impl FnOnce() -> Vec<String>) -> Result<(), CliError> {
        if self.json {
            print_json(&serde_json::to_value(value)?)
        } else {
            print_lines(&lines());
            Ok(())
        }
    }

    fn done(&self, message: &str) -> Result<(), CliError> {
        if self.json {
            print_json(&Value::from(message))
        } else {
            println!("{message}");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt().with_writer(io::stderr).with_max_level(level).init();

    let state_file = match cli.state_file {
        Some(path) => path,
        None => store::default_path()?,
    };
    let config = ClientConfig::from_env().with_api_url(cli.api_url.as_deref());
    let on_expired: Arc<dyn Fn() + Send + Sync> =
        Arc::new(|| tracing::warn!("session expired; run `library-cli login` again"));
    let store = FileStore::new(state_file);
    tracing::debug!(api_url = %config.api_url, session_file = %store.path().display(), "starting");
    let client = LibraryClient::new(ReqwestTransport::new(), config, store, Some(on_expired));
    let out = Output { json: cli.json };

    match cli.command {
        Command::Login { username, password } => run_login(&client, &out, &username, &password).await,
        Command::Register(args) => run_register(&client, &out, args).await,
        Command::Logout => {
            client.logout();
            out.done("Signed out")
        }
        Command::Whoami => run_whoami(&client, &out),
        Command::Books { search } => run_books(&client, &out, &search).await,
        Command::Borrow { book_id } => run_borrow(&client, &out, book_id).await,
        Command::Return { book_id } => run_return(&client, &out, book_id).await,
        Command::History { filter, search } => run_history(&client, &out, filter, &search).await,
        Command::Admin(admin) => run_admin(&client, &out, admin).await,
    }
}

// =============================================================================
// AUTH
// =============================================================================

async fn run_login(client: &Client, out: &Output, username: &str, password: &str) -> Result<(), CliError> {
    let credentials = validate_login(username, password)?;
    if client.login(credentials).await.is_err() {
        let message = client.session().snapshot().error().unwrap_or("Login failed").to_owned();
        return Err(CliError::Action(message));
    }
    let state = client.session().snapshot();
    match state.user() {
        Some(user) => out.emit(user, || {
            vec![format!("Signed in as {} ({})", user.username, user.role.label())]
        }),
        None => out.done("Signed in"),
    }
}

async fn run_register(client: &Client, out: &Output, args: RegisterArgs) -> Result<(), CliError> {
    let form = RegistrationForm {
        confirm_password: args.confirm_password.unwrap_or_else(|| args.password.clone()),
        username: args.username,
        email: args.email,
        password: args.password,
        role: args.role,
    };
    match client.register(&form).await {
        Ok(user) => out.emit(&user, || vec![format!("Account {} created. Run `library-cli login` to sign in.", user.username)]),
        Err(err @ lending::ApiError::Validation(_)) => Err(err.into()),
        Err(_) => {
            let message = client.session().snapshot().error().unwrap_or("Registration failed").to_owned();
            Err(CliError::Action(message))
        }
    }
}

fn run_whoami(client: &Client, out: &Output) -> Result<(), CliError> {
    let state = client.session().snapshot();
    let user = state.user().filter(|_| state.is_authenticated()).ok_or(CliError::NotLoggedIn)?;
    out.emit(user, || output::user_lines(user))
}

// =============================================================================
// MEMBER
// =============================================================================

async fn run_books(client: &Client, out: &Output, search: &str) -> Result<(), CliError> {
    access::require(&client.session().snapshot(), MEMBER_ONLY)?;
    let books = client.fetch_books().await?;
    let history = client.fetch_history().await?;
    let matches = search_books(&books, search);
    out.emit(&matches, || output::book_lines(&matches, &history, books.len()))
}

async fn run_borrow(client: &Client, out: &Output, book_id: i64) -> Result<(), CliError> {
    access::require(&client.session().snapshot(), MEMBER_ONLY)?;
    let receipt = client.borrow_book(book_id).await.map_err(|e| CliError::action(&e, "Failed to borrow book"))?;
    out.done(&receipt.message)
}

async fn run_return(client: &Client, out: &Output, book_id: i64) -> Result<(), CliError> {
    access::require(&client.session().snapshot(), MEMBER_ONLY)?;
    let receipt = client.return_book(book_id).await.map_err(|e| CliError::action(&e, "Failed to return book"))?;
    out.done(&receipt.message)
}

async fn run_history(client: &Client, out: &Output, filter: HistoryFilter, search: &str) -> Result<(), CliError> {
    access::require(&client.session().snapshot(), MEMBER_ONLY)?;
    let rows = filter_history(&client.fetch_history().await?, filter, search);
    out.emit(&rows, || output::history_lines(&rows, OffsetDateTime::now_utc()))
}

// =============================================================================
// ADMIN
// =============================================================================

async fn run_admin(client: &Client, out: &Output, admin: AdminCommand) -> Result<(), CliError> {
    access::require(&client.session().snapshot(), ADMIN_ONLY)?;
    match admin.command {
        AdminSubcommand::Books { search } => {
            let rows = search_books(&client.fetch_admin_books().await?, &search);
            out.emit(&rows, || output::admin_book_lines(&rows))
        }
        AdminSubcommand::Add { title, author } => {
            let created = client
                .add_book(&BookDraft::new(title, author))
                .await
                .map_err(|e| CliError::action(&e, "Failed to add book"))?;
            out.emit(&created, || vec!["Book added successfully".to_owned()])
        }
        AdminSubcommand::BulkAdd { input } => {
            let text = read_input(&input)?;
            let drafts = lending::catalog::parse_bulk_drafts(&text)?;
            let created = client.add_books(&drafts).await.map_err(|e| CliError::action(&e, "Failed to add books"))?;
            out.emit(&created, || vec![format!("{} books added successfully", drafts.len())])
        }
        AdminSubcommand::Update { book_id, title, author } => {
            let updated = client
                .update_book(book_id, &BookDraft::new(title, author))
                .await
                .map_err(|e| CliError::action(&e, "Failed to update book"))?;
            out.emit(&updated, || vec!["Book updated successfully".to_owned()])
        }
        AdminSubcommand::Delete { book_id } => {
            client.delete_book(book_id).await.map_err(|e| CliError::action(&e, "Failed to delete book"))?;
            out.done("Book deleted successfully")
        }
        AdminSubcommand::Loans { search, sort } => {
            let rows = sort_loans(&client.fetch_borrowed_books().await?, &search, sort);
            out.emit(&rows, || output::loan_lines(&rows, OffsetDateTime::now_utc()))
        }
    }
}

fn read_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}
