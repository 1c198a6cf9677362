//! astroview command-line entry point.

use std::path::{Path, PathBuf};

use astroview::{options::Options, Viewer};
use clap::Parser;

#[derive(Parser)]
#[command(name = "astroview")]
#[command(about = "Interactive glTF model viewer over a drifting star field")]
struct Cli {
    /// glTF model to display (.glb or .gltf)
    #[arg(short, long)]
    model: Option<String>,

    /// Background music clip
    #[arg(short, long)]
    audio: Option<String>,

    /// TOML options file; missing sections use defaults
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Write the effective options to this file and exit
    #[arg(long, value_name = "FILE")]
    save_options: Option<PathBuf>,

    /// Window title
    #[arg(short, long, default_value = "astroview")]
    title: String,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let options = match &cli.options {
        Some(path) => load_options(path),
        None => Options::default(),
    };

    if let Some(path) = &cli.save_options {
        let mut effective = options;
        if let Some(model) = cli.model {
            effective.assets.model = model;
        }
        if let Some(audio) = cli.audio {
            effective.assets.audio = audio;
        }
        if let Err(e) = effective.save(path) {
            log::error!("{}: {e}", path.display());
            std::process::exit(1);
        }
        log::info!("wrote options to {}", path.display());
        return;
    }

    let mut builder = Viewer::builder()
        .with_options(options)
        .with_title(cli.title);
    if let Some(model) = cli.model {
        builder = builder.with_model(model);
    }
    if let Some(audio) = cli.audio {
        builder = builder.with_audio(audio);
    }

    if let Err(e) = builder.build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

/// Load an options file or exit. A missing file lists the presets found
/// next to it.
fn load_options(path: &Path) -> Options {
    match Options::load(path) {
        Ok(options) => {
            log::info!("loaded options from {}", path.display());
            options
        }
        Err(e) => {
            log::error!("{}: {e}", path.display());
            if !path.exists() {
                let dir = path
                    .parent()
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));
                let presets = Options::list_presets(dir);
                if !presets.is_empty() {
                    log::error!(
                        "presets in {}: {}",
                        dir.display(),
                        presets.join(", ")
                    );
                }
            }
            std::process::exit(1);
        }
    }
}
