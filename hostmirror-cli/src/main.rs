use clap::{Parser, Subcommand};

mod clipboard;
mod commands;
mod mappings_file;

const HOSTMIRROR_CONFIG_ENV: &str = "HOSTMIRROR_CONFIG";
const HOSTMIRROR_DEFAULT_FILE: &str = "hostmirror.yaml";

#[derive(Parser)]
#[command(
    name = "hostmirror",
    about = "Generate annotated nginx location blocks that mirror source domains through proxy hosts"
)]
struct Cli {
    #[arg(
        short,
        long,
        global = true,
        help = "Path to the mappings file (defaults to $HOSTMIRROR_CONFIG, then hostmirror.yaml)"
    )]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[clap(about = "Add a source -> proxy domain mapping")]
    Add(commands::AddArgs),
    #[clap(about = "Remove a mapping by its list position")]
    Remove(commands::RemoveArgs),
    #[clap(about = "Move a mapping one position earlier in the output")]
    MoveUp(commands::MoveArgs),
    #[clap(about = "Move a mapping one position later in the output")]
    MoveDown(commands::MoveArgs),
    #[clap(about = "List the configured mappings")]
    List(commands::ListArgs),
    #[clap(about = "Render the nginx location blocks for one or all mappings")]
    Generate(commands::GenerateArgs),
    #[clap(about = "Validate the mappings file")]
    Check,
    #[clap(about = "Generate shell completions")]
    Completion(commands::CompletionArgs),
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Add(args) => commands::add(args, &cli.config),
        Commands::Remove(args) => commands::remove(args, &cli.config),
        Commands::MoveUp(args) => commands::move_up(args, &cli.config),
        Commands::MoveDown(args) => commands::move_down(args, &cli.config),
        Commands::List(args) => commands::list(args, &cli.config),
        Commands::Generate(args) => commands::generate(args, &cli.config),
        Commands::Check => commands::check(&cli.config),
        Commands::Completion(args) => commands::completion(args),
    }
}
