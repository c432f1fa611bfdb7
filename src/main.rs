use clap::{Parser, Subcommand};
use disctag::cd_info::{parse_report, read_report};
use disctag::musicbrainz::{lookup, MusicBrainzClient};
use disctag::{AlbumRecord, Config};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    name = "disctag",
    version,
    about = "Read album tags from cd-info reports and MusicBrainz"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Escape characters that are unsafe in file names
    #[arg(long, global = true)]
    clean: bool,

    /// Print records as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse the CDDB and CD-TEXT tags of a saved cd-info report
    Parse {
        /// cd-info output file
        report: PathBuf,

        /// Program name in the CDDB match line (overrides DISCTAG_TOOL_NAME)
        #[arg(long)]
        tool: Option<String>,
    },
    /// Look up a MusicBrainz DiscID
    Lookup { disc_id: String },
}

fn print_record(mut record: AlbumRecord, args: &Args) -> Result<(), String> {
    if args.clean {
        record.clean();
    }

    if args.json {
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| format!("Failed to serialize record: {}", e))?;
        println!("{}", json);
    } else {
        println!("Tags from {}:", record.source());
        print!("{}", record);
    }
    Ok(())
}

async fn run(args: &Args, config: &Config) -> Result<(), String> {
    match &args.command {
        Command::Parse { report, tool } => {
            let text = read_report(report).map_err(|e| e.to_string())?;
            let tool_name = tool.as_deref().unwrap_or(&config.tool_name);
            let tags = parse_report(&text, tool_name).map_err(|e| e.to_string())?;

            match tags.cddb {
                Some(Ok(record)) => print_record(record, args)?,
                Some(Err(e)) => error!("CDDB tags unusable: {}", e),
                None => println!("No CDDB tags found"),
            }
            match tags.cd_text {
                Some(record) => print_record(record, args)?,
                None => println!("No CD-TEXT tags found"),
            }
            Ok(())
        }
        Command::Lookup { disc_id } => {
            let client = MusicBrainzClient::from_config(config).map_err(|e| e.to_string())?;
            match lookup(&client, disc_id).await.map_err(|e| e.to_string())? {
                Some(record) => print_record(record, args),
                None => {
                    println!("No MusicBrainz release found for {}", disc_id);
                    Ok(())
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Use RUST_LOG env var if set, otherwise default to info level
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(log_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load();

    match run(&args, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
