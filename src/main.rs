use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use feature_board::board::{render_text, Action, RemoteBoard};
use feature_board::client::FeatureClient;
use feature_board::config::{ClientConfig, ServerConfig};
use feature_board::models::FeatureStatus;
use feature_board::{api, db};

#[derive(Parser)]
#[command(name = "fboard")]
#[command(about = "Kanban-style feature tracker")]
struct Cli {
    /// Server URL for board commands (defaults to FEATURE_BOARD_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the feature board server
    Serve {
        /// Port for HTTP API
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,

        /// Do not insert sample features into an empty database
        #[arg(long)]
        no_seed: bool,
    },
    #[command(flatten)]
    Board(BoardCommand),
}

/// Commands run against a running server.
#[derive(Subcommand)]
enum BoardCommand {
    /// Show the board
    #[command(name = "board")]
    Show,
    /// Add a feature to the backlog
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Edit a feature's title and description
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Move a backlog feature to To Do
    Start { id: String },
    /// Move a feature to a status (backlog, todo, inProgress, done)
    Move { id: String, status: FeatureStatus },
    /// Send a feature back to the backlog
    Backlog { id: String },
    /// Delete a feature
    Delete { id: String },
}

/// Initialize tracing with output to stderr (board commands) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "feature_board=debug,tower_http=debug".into()),
    );

    if use_stderr {
        // Board commands print the board on stdout
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn serve(mut config: ServerConfig) -> anyhow::Result<()> {
    let db = match config.database_path.take() {
        Some(path) => db::Database::open(path)?,
        None => db::Database::open_default()?,
    };
    db.migrate()?;
    if config.seed {
        db.seed_samples()?;
    }

    let app = api::create_router(db);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Feature board listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Resolve a full id or a unique prefix against the current snapshot.
fn resolve(board: &RemoteBoard, id: &str) -> anyhow::Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(id) {
        return Ok(id);
    }
    board
        .board()
        .store()
        .find_by_prefix(id)
        .map(|f| f.id)
        .with_context(|| format!("No single feature matches '{}'", id))
}

async fn run_board_command(base_url: String, command: BoardCommand) -> anyhow::Result<()> {
    let mut board = RemoteBoard::new(FeatureClient::new(base_url));
    board
        .refresh()
        .await
        .context("Could not reach the feature board server")?;

    let actions = match command {
        BoardCommand::Show => Vec::new(),
        BoardCommand::Add { title, description } => vec![
            Action::OpenAddForm,
            Action::Add { title, description },
            Action::CloseAddForm,
        ],
        BoardCommand::Edit {
            id,
            title,
            description,
        } => {
            let id = resolve(&board, &id)?;
            let existing = board
                .board()
                .store()
                .get(id)
                .with_context(|| format!("Feature {} not found", id))?;
            let title = title.unwrap_or_else(|| existing.title.clone());
            let description =
                description.unwrap_or_else(|| existing.description.clone().unwrap_or_default());
            vec![
                Action::BeginEdit(id),
                Action::UpdateDraft { title, description },
                Action::SaveEdit,
            ]
        }
        BoardCommand::Start { id } => vec![Action::StartWorking(resolve(&board, &id)?)],
        BoardCommand::Move { id, status } => {
            let id = resolve(&board, &id)?;
            let current = board.board().store().get(id).map(|f| f.status);
            match current {
                // Kanban-to-kanban moves go through drag-and-drop.
                Some(from) if from.is_kanban() && status.is_kanban() => vec![
                    Action::DragStart(id),
                    Action::DragOver(status),
                    Action::Drop(status),
                    Action::DragEnd,
                ],
                _ => vec![Action::SetStatus(id, status)],
            }
        }
        BoardCommand::Backlog { id } => vec![Action::MoveToBacklog(resolve(&board, &id)?)],
        BoardCommand::Delete { id } => vec![Action::Delete(resolve(&board, &id)?)],
    };

    let result = board.handle_all(actions).await;

    // The board is printed either way; on failure it shows the last snapshot.
    print!("{}", render_text(&board.view()));
    result.context("Request to the feature board server failed")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let is_server = matches!(cli.command, None | Some(Commands::Serve { .. }));
    init_tracing(!is_server);

    match cli.command {
        Some(Commands::Serve {
            port,
            host,
            db,
            no_seed,
        }) => {
            let mut config = ServerConfig::from_env();
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            if db.is_some() {
                config.database_path = db;
            }
            if no_seed {
                config.seed = false;
            }
            serve(config).await?;
        }
        None => serve(ServerConfig::from_env()).await?,
        Some(Commands::Board(command)) => {
            let base_url = cli.url.unwrap_or_else(|| ClientConfig::from_env().base_url);
            run_board_command(base_url, command).await?;
        }
    }

    Ok(())
}
