use clap::{Parser, Subcommand};
use modelshelf::classify::{classify, ensure_root};
use modelshelf::config::{self, ShelfConfig};
use modelshelf::imaging::RustBackend;
use modelshelf::{catalog, generate, logging, output, rename};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "modelshelf")]
#[command(about = "Classify, rename and catalog 3D-printable model folders")]
#[command(long_about = "\
Classify, rename and catalog 3D-printable model folders

A model folder holds at least one image and an STL/ or Zips/ folder:

  models/
  ├── modelshelf.toml              # Optional config (see gen-config)
  └── Anime/                       # Category
      └── SeriesA/                 # Series
          ├── Hero_Armored - Chibi/  # VALID: image + STL/
          │   ├── cover.png
          │   └── STL/
          └── Loose/               # INVALID: image but no STL/ or Zips/
              └── cover.jpg

Canonical names look like `Character_Version 2 - Tag Tag`, where the tags
come from the configured keywords (Chibi and NSFW by default).

Run 'modelshelf gen-config' to print a documented modelshelf.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: <ROOT>/modelshelf.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List folders holding images or model files outside any model folder
    Invalid {
        /// Models root directory
        root: PathBuf,
    },
    /// Print valid and invalid folders as JSON
    Scan {
        /// Models root directory
        root: PathBuf,
    },
    /// Rename valid folders to their canonical names
    Rename {
        /// Models root directory
        root: PathBuf,
        /// Show the plan without renaming anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Write model-info.txt into every valid folder
    Info {
        /// Models root directory
        root: PathBuf,
    },
    /// Build a self-contained HTML gallery of all models
    Gallery {
        /// Models root directory
        root: PathBuf,
        /// Read model-info.txt files instead of the folder layout
        #[arg(long)]
        use_model_info: bool,
        /// Output HTML file (default from config)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a stock modelshelf.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match &cli.command {
        Command::Invalid { root } => {
            let root = checked_root(root);
            output::print_invalid_report(&classify(root).invalid);
        }
        Command::Scan { root } => {
            let root = checked_root(root);
            let manifest = classify(root).to_manifest(root);
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
        Command::Rename { root, dry_run } => {
            let root = checked_root(root);
            let config = resolve_config(cli.config.as_deref(), root)?;
            let plan = rename::plan_renames(&classify(root), &config.tags.keywords);
            output::print_rename_plan(&plan);
            if !dry_run && !plan.changed.is_empty() {
                println!();
                output::print_rename_results(&rename::apply_renames(&plan.changed));
            }
        }
        Command::Info { root } => {
            let root = checked_root(root);
            let report = catalog::write_model_infos(root, &classify(root).valid);
            output::print_info_report(&report);
        }
        Command::Gallery {
            root,
            use_model_info,
            output: out,
        } => {
            let root = checked_root(root);
            let config = resolve_config(cli.config.as_deref(), root)?;
            let backend = RustBackend::new();
            let catalog = if *use_model_info {
                info!("building catalog from model-info.txt files");
                catalog::catalog_from_sidecars(root, &backend, &config.gallery)
            } else {
                info!("building catalog from folder layout");
                catalog::catalog_from_structure(root, &backend, &config.gallery)
            };
            let out = out
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.gallery.output));
            generate::write_gallery(&out, &catalog, &config.gallery)?;
            output::print_gallery_summary(&catalog, &out);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Exit with status 1 unless `root` is an existing directory.
fn checked_root(root: &Path) -> &Path {
    match ensure_root(root) {
        Ok(root) => root,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}

fn resolve_config(explicit: Option<&Path>, root: &Path) -> Result<ShelfConfig, config::ConfigError> {
    match explicit {
        Some(path) => config::load_config_file(path),
        None => config::load_config(root),
    }
}
