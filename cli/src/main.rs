use anyhow::Result;
use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;
use tracing::{debug, error};

use config::Config;
use utils::log::setup_tracing;

#[derive(Subcommand, Debug)]
enum Commands {
    /// convert a Linkwarden backup into a flat link list
    Convert {
        /// Linkwarden backup file [default: backup.json]
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
        /// converted link list file [default: output.json]
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },
    /// upload a converted link list into Linksnapper
    ///
    /// There is no duplicate check: importing the same file twice creates
    /// every link twice.
    Import {
        /// converted link list file [default: final.json]
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
        /// Linksnapper base url [default: http://localhost:8080]
        #[arg(short, long, value_hint = ValueHint::Url)]
        endpoint: Option<String>,
        /// concurrent upload requests [default: 5]
        #[arg(short, long)]
        workers: Option<usize>,
        /// test mode, check the service and list the links without uploading
        #[arg(long, default_value = "false")]
        test: bool,
    },
}

#[derive(Parser, Debug)]
#[clap(
    version,
    about = "move bookmarks from a Linkwarden backup into Linksnapper",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// config file, defaults to config.toml beside the executable
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
    /// enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
    /// option point to the logfile path, must have RW permissions.
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    logfile: Option<PathBuf>,
}

async fn run(args: Cli) -> Result<()> {
    let mut config = Config::load(args.config.as_deref())?;
    match args.command {
        Commands::Convert { input, output } => {
            config.convert.merge(input, output);
            convert::process(&config.convert.input, &config.convert.output)?;
        }
        Commands::Import {
            input,
            endpoint,
            workers,
            test,
        } => {
            config.import.merge(input, endpoint, workers);
            config.import.validate()?;
            upload::process(&config.import, test).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    setup_tracing(args.verbose, &args.logfile).expect("Failed to setup tracing");
    debug!("args: {:#?}", args);

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
    std::process::exit(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli() {
        Cli::command().debug_assert();

        let args = Cli::parse_from(["linkport", "-v", "convert", "-i", "in.json"]);
        assert!(args.verbose);
        match args.command {
            Commands::Convert { input, output } => {
                assert_eq!(input, Some(PathBuf::from("in.json")));
                assert_eq!(output, None);
            }
            c => panic!("unexpected command: {:?}", c),
        }

        let args = Cli::parse_from([
            "linkport",
            "import",
            "-e",
            "https://links.example.test",
            "-w",
            "8",
            "--test",
            "--config",
            "linkport.toml",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("linkport.toml")));
        match args.command {
            Commands::Import {
                input,
                endpoint,
                workers,
                test,
            } => {
                assert_eq!(input, None);
                assert_eq!(endpoint.as_deref(), Some("https://links.example.test"));
                assert_eq!(workers, Some(8));
                assert!(test);
            }
            c => panic!("unexpected command: {:?}", c),
        }
    }

    #[tokio::test]
    async fn test_convert_ignores_import_section() {
        let root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap())
            .parent()
            .unwrap()
            .to_path_buf();
        let dir = tempfile::tempdir().unwrap();
        let config_file = dir.path().join("linkport.toml");
        std::fs::write(&config_file, "[import]\nendpoint = \"localhost\"\nworkers = 0\n").unwrap();
        let output = dir.path().join("output.json");

        let input = root.join("tests/backup.json");
        let args = Cli::parse_from([
            "linkport",
            "convert",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "-c",
            config_file.to_str().unwrap(),
        ]);
        run(args).await.unwrap();
        assert!(output.is_file());

        let args = Cli::parse_from([
            "linkport",
            "import",
            "-i",
            output.to_str().unwrap(),
            "-c",
            config_file.to_str().unwrap(),
        ]);
        let err = run(args).await.unwrap_err();
        assert!(err.to_string().contains("import.workers"));
    }
}
