use clap::{Args, Parser, Subcommand};
use color_eyre::Result;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ifc_bauzustand::export::{export_csv, export_json, CatalogReport};
use ifc_bauzustand::model::{Attribution, BindingSelection};
use ifc_bauzustand::session::{RunRequest, Session};
use ifc_bauzustand::smartview::Provenance;

#[derive(Parser, Debug)]
#[command(name = "ifc2bauzustand")]
#[command(about = "Generate construction-phase smartviews from IFC files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the property sets and properties found in the files
    Catalog {
        /// Paths to IFC files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Export to CSV
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        /// Export to JSON
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,

        /// List only the properties offered by these property sets (repeatable)
        #[arg(long = "pset", value_name = "NAME")]
        property_sets: Vec<String>,
    },

    /// Write a smartview file with one view per phase
    Compile(CompileArgs),
}

#[derive(Args, Debug)]
struct CompileArgs {
    /// Paths to IFC files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output smartview file (.bcsv is appended if missing)
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Property set holding the phase properties (repeatable)
    #[arg(long = "pset", value_name = "NAME")]
    property_sets: Vec<String>,

    /// Construction phase property (repeatable)
    #[arg(long = "construction", value_name = "NAME")]
    construction: Vec<String>,

    /// Demolition phase property (repeatable)
    #[arg(long = "demolition", value_name = "NAME")]
    demolition: Vec<String>,

    /// Creator written into the smartviews
    #[arg(long, value_name = "NAME")]
    creator: Option<String>,

    /// Title of the smartview set
    #[arg(long)]
    title: Option<String>,
}

impl CompileArgs {
    fn attribution(&self) -> Attribution {
        if self.property_sets.is_empty()
            && self.construction.is_empty()
            && self.demolition.is_empty()
        {
            Attribution::Standard
        } else {
            Attribution::Custom(BindingSelection {
                property_sets: self.property_sets.clone(),
                construction_properties: self.construction.clone(),
                demolition_properties: self.demolition.clone(),
            })
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Catalog {
            files,
            csv,
            json,
            property_sets,
        } => {
            let session = load_session(&files);

            if let Some(csv_path) = &csv {
                export_csv(session.catalog(), csv_path)?;
                println!("Exported to CSV: {}", csv_path.display());
            }

            if let Some(json_path) = &json {
                export_json(&CatalogReport::from_session(&session), json_path)?;
                println!("Exported to JSON: {}", json_path.display());
            }

            if property_sets.is_empty() {
                if csv.is_none() && json.is_none() {
                    for (property_set, property) in session.catalog().entries() {
                        println!("{property_set}\t{property}");
                    }
                }
            } else {
                for property in session.catalog().properties_of(&property_sets) {
                    println!("{property}");
                }
            }
        }
        Command::Compile(args) => {
            let session = load_session(&args.files);

            let mut provenance = Provenance::current();
            if let Some(creator) = &args.creator {
                provenance = provenance.with_creator(creator.clone());
            }
            let request = RunRequest {
                output: Some(args.output.clone()),
                attribution: args.attribution(),
                title: args.title.clone(),
            };

            let summary = session.run(&request, &provenance)?;
            println!(
                "Wrote {} views ({} rules) to {}",
                summary.views,
                summary.rules,
                summary.output.display()
            );
        }
    }

    Ok(())
}

fn load_session(files: &[PathBuf]) -> Session {
    let mut session = Session::new();
    let mut failed = 0usize;
    for path in files {
        // Already logged; the path stays in the session and is retried at run time.
        if session.add_file(path).is_err() {
            failed += 1;
        }
    }
    info!(files = session.files().len(), failed, "session ready");
    session
}
