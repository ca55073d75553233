use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use core_smap::{SiteManifest, parse_sitemap, setup_logging};
use data_model_smap::format_timestamp;

#[derive(Parser)]
#[command(name = "smap")]
#[command(about = "The Core Sitemap Toolkit", long_about = None)]
struct CoreCli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a sitemap from a JSON site manifest (base URL, config, routes and model records).
    Render {
        /// The site manifest to generate the sitemap for.
        #[arg(short, long, value_parser = validate_input_file)]
        manifest: PathBuf,
        /// Output file path for the generated sitemap. Written to stdout when omitted.
        #[arg(short, long, value_parser = validate_output_file)]
        output: Option<PathBuf>,
    },

    /// Parse a sitemap and list its entries.
    Inspect {
        /// The sitemap XML file to read.
        #[arg(short, long, value_parser = validate_input_file)]
        file: PathBuf,
    },
}

fn validate_input_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if !path.exists() {
        return Err(format!("Input path does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Input path is not a file: {}", path.display()));
    }

    Ok(path)
}

fn validate_output_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if path.exists() && path.is_dir() {
        return Err(format!("Output path is a directory: {}", path.display()));
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        return Err(format!(
            "Output file parent directory does not exist: {}",
            parent.display()
        ));
    }

    Ok(path)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging("core_smap=info");
    let cli = CoreCli::parse();

    match cli.command {
        Commands::Render { manifest, output } => {
            let content = std::fs::read_to_string(&manifest)
                .with_context(|| format!("Cannot read manifest ({manifest:?})"))?;
            let generator = SiteManifest::from_json(&content)?.into_generator()?;
            let xml = generator.generate().await?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &xml).with_context(|| format!("Cannot write sitemap ({path:?})"))?;
                    tracing::info!(path = %path.display(), bytes = xml.len(), "wrote sitemap");
                }
                None => print!("{}", String::from_utf8(xml)?),
            }
        }

        Commands::Inspect { file } => {
            let content =
                std::fs::read_to_string(&file).with_context(|| format!("Cannot read sitemap ({file:?})"))?;
            let entries = parse_sitemap(&content)?;

            for entry in &entries {
                println!(
                    "{}\t{}\t{}\t{}",
                    entry.location,
                    entry.last_modified.as_ref().map(format_timestamp).unwrap_or_else(|| "-".to_string()),
                    entry.change_frequency.map(|f| f.to_string()).unwrap_or_else(|| "-".to_string()),
                    entry.priority.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
                );
            }
            println!("{} entries", entries.len());
        }
    }

    Ok(())
}
