use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::*;
use jiff::civil::Date;
use tracing_subscriber::EnvFilter;

use projdesk::{
    Config, ExportFormat, LookupError, ProjectId, ProjectInput, ProjectStore, Section, Seed,
    SortDirection, SortKey, Storage, StorageError, export, ui,
};

#[derive(Parser)]
#[command(
    name = "projdesk",
    about = "Keep track of client projects and their deadlines"
)]
struct Cli {
    /// Path to the projects file
    #[arg(long, global = true, env = "PROJDESK_STORE")]
    store: Option<PathBuf>,

    /// Start from the sample projects when nothing is saved yet
    #[arg(long, global = true)]
    sample: bool,

    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show ongoing and completed projects
    List,

    /// Add a new project
    Add {
        /// Project name
        name: String,

        /// Deadline (e.g., "2025-03-01")
        #[arg(short, long)]
        deadline: String,

        /// Client name
        #[arg(short, long)]
        client: String,

        /// What the project is about
        #[arg(short = 'D', long)]
        description: String,

        /// Add notes
        #[arg(short, long)]
        notes: Option<String>,

        /// Link to the project's shared folder
        #[arg(short, long)]
        link: Option<String>,
    },

    /// Edit a project, keeping the fields that are not given
    Edit {
        /// Project id, id prefix or part of its name
        project: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(short, long)]
        deadline: Option<String>,

        #[arg(short, long)]
        client: Option<String>,

        #[arg(short = 'D', long)]
        description: Option<String>,

        #[arg(short, long, conflicts_with = "clear_notes")]
        notes: Option<String>,

        #[arg(short, long, conflicts_with = "clear_link")]
        link: Option<String>,

        /// Remove the notes
        #[arg(long)]
        clear_notes: bool,

        /// Remove the link
        #[arg(long)]
        clear_link: bool,
    },

    /// Delete a project
    Delete { project: String },

    /// Move a project between ongoing and completed
    Done { project: String },

    /// Sort projects by name, client or deadline. Without a direction,
    /// sorting by the current key again flips it
    Sort {
        key: SortKey,

        /// Sort ascending
        #[arg(long, conflicts_with = "desc")]
        asc: bool,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Export ongoing or completed projects to a file
    Export {
        /// ongoing or completed
        section: Section,

        /// json, jsonl or csv
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// Directory to write the file to
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let seed = if cli.sample { Seed::Sample } else { Seed::Empty };
    let config = Config::default().with_store_path(cli.store).with_seed(seed);

    config.ensure_store_dir().unwrap_or_else(|e| {
        eprintln!("Error: Failed to create data directory: {}", e);
        std::process::exit(1);
    });

    let mut store = match ProjectStore::open(config.storage(), config.seed) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: Failed to load projects: {}", e);
            eprintln!("  └─ Fix or move {}", config.store_path.display());
            std::process::exit(1);
        }
    };

    store.subscribe(|event, _| println!("{} {}", "✓".green(), event));

    let today = jiff::Zoned::now().date();

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => render_lists(&store, today),
        Commands::Add {
            name,
            deadline,
            client,
            description,
            notes,
            link,
        } => {
            let input = ProjectInput {
                name,
                deadline,
                client,
                description,
                notes,
                drive_link: link,
            };
            match store.create(input) {
                Ok(applied) => report_warning(applied.warning),
                Err(e) => {
                    eprintln!("Error: Failed to add project: {}", e);
                    std::process::exit(1);
                }
            }
            finish(store);
        }
        Commands::Edit {
            project,
            name,
            deadline,
            client,
            description,
            notes,
            link,
            clear_notes,
            clear_link,
        } => {
            let id = resolve_or_exit(&store, &project);
            let current = match store.begin_edit(&id) {
                Ok(current) => ProjectInput::from(current),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            let input = ProjectInput {
                name: name.unwrap_or(current.name),
                deadline: deadline.unwrap_or(current.deadline),
                client: client.unwrap_or(current.client),
                description: description.unwrap_or(current.description),
                notes: if clear_notes {
                    None
                } else {
                    notes.or(current.notes)
                },
                drive_link: if clear_link {
                    None
                } else {
                    link.or(current.drive_link)
                },
            };

            match store.update(&id, input) {
                Ok(applied) => report_warning(applied.warning),
                Err(e) => {
                    store.cancel_edit();
                    eprintln!("Error: Failed to update project: {}", e);
                    std::process::exit(1);
                }
            }
            finish(store);
        }
        Commands::Delete { project } => {
            let id = resolve_or_exit(&store, &project);
            match store.delete(&id) {
                Ok(applied) => report_warning(applied.warning),
                Err(e) => {
                    eprintln!("Error: Failed to delete project: {}", e);
                    std::process::exit(1);
                }
            }
            finish(store);
        }
        Commands::Done { project } => {
            let id = resolve_or_exit(&store, &project);
            match store.toggle_complete(&id) {
                Ok(applied) => report_warning(applied.warning),
                Err(e) => {
                    eprintln!("Error: Failed to update project: {}", e);
                    std::process::exit(1);
                }
            }
            finish(store);
        }
        Commands::Sort { key, asc, desc } => {
            let warning = match (asc, desc) {
                (true, _) => store.sort_by(key, SortDirection::Asc).warning,
                (_, true) => store.sort_by(key, SortDirection::Desc).warning,
                _ => store.toggle_sort(key).warning,
            };
            report_warning(warning);
            render_lists(&store, today);
            finish(store);
        }
        Commands::Export {
            section,
            format,
            out,
        } => {
            let written = export::export(&store, section, format, today)
                .and_then(|document| document.write_to(&out));
            match written {
                Ok(path) => println!(
                    "{} Exported {} projects to {}",
                    "✓".green(),
                    section,
                    path.display()
                ),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn render_lists<S: Storage>(store: &ProjectStore<S>, today: Date) {
    ui::render_section("ONGOING", &store.list_ongoing(), today);
    ui::render_section("COMPLETED", &store.list_completed(), today);
    println!();
}

fn resolve_or_exit<S: Storage>(store: &ProjectStore<S>, query: &str) -> ProjectId {
    match store.resolve(query) {
        Ok(project) => project.id.clone(),
        Err(LookupError::NotFound(name)) => {
            eprintln!("Error: Project '{}' not found", name);

            if !store.projects().is_empty() {
                eprintln!("\nAvailable projects:");
                for project in store.projects() {
                    eprintln!("  - {} ({})", project.name, ui::short_id(project));
                }
            }
            std::process::exit(1);
        }
        Err(LookupError::Ambiguous(names)) => {
            eprintln!("Error: Project name is ambiguous. Multiple projects found:");
            for name in names {
                eprintln!("  - {}", name);
            }
            eprintln!("\nPlease be more specific.");
            std::process::exit(1);
        }
    }
}

fn report_warning(warning: Option<StorageError>) {
    if let Some(e) = warning {
        eprintln!(
            "{} Change kept for this session but not saved: {}",
            "!".yellow(),
            e
        );
    }
}

fn finish<S: Storage>(store: ProjectStore<S>) {
    if let Err(e) = store.close() {
        eprintln!("Error: Failed to save projects: {}", e);
        std::process::exit(1);
    }
}
