use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod render;

#[derive(Parser)]
#[command(
    name = "revsplit",
    about = "revsplit — tag, untag and split traffic across service revisions",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Update the traffic block of a service.
    ///
    /// Directives apply in a fixed order: --untag, then --tag, then
    /// --traffic. Targets left with no tag and no traffic are removed.
    Update {
        /// Service file holding the current traffic block
        #[arg(short, long, default_value = "service.toml")]
        file: String,
        /// Set traffic percent, format: address=percent, where address is a
        /// revision, a tag or @latest. Percents must sum to 100.
        /// Example: --traffic @latest=20,echo-v1=80
        #[arg(long = "traffic", value_name = "ADDRESS=PERCENT", value_delimiter = ',')]
        traffic: Vec<String>,
        /// Tag a revision, format: address=tag, where address is a revision
        /// or @latest. Example: --tag echo-v1=stable,@latest=current
        #[arg(long = "tag", value_name = "ADDRESS=TAG", value_delimiter = ',')]
        tag: Vec<String>,
        /// Remove a tag. Example: --untag stable
        #[arg(long = "untag", value_name = "TAG", value_delimiter = ',')]
        untag: Vec<String>,
        /// Print the resulting traffic block without writing it back
        #[arg(long)]
        dry_run: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show the traffic block of a service.
    Describe {
        #[arg(short, long, default_value = "service.toml")]
        file: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("revsplit=info".parse()?)
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Update {
            file,
            traffic,
            tag,
            untag,
            dry_run,
            format,
        } => {
            let flags = revsplit_core::TrafficFlags {
                revisions_percentages: traffic,
                revisions_tags: tag,
                untag_revisions: untag,
            };
            commands::update::update(&file, &flags, dry_run, format)
        }
        Commands::Describe { file, format } => commands::describe::describe(&file, format),
    }
}
