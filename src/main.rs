use clap::{Parser, ValueEnum};
use letter3d::app::{run_gui, run_snapshot};
use letter3d::io::config::Config;
use letter3d::scene::camera::{ViewKind, ViewSelection};
use log::info;

/// Interactive viewer for a 3D letter glyph
#[derive(Parser, Debug)]
#[command(name = "letter3d")]
#[command(about = "Move, rotate and scale a 3D letter in perspective and orthographic views")]
struct Cli {
    /// Config file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Render one frame to this image and exit without opening a window
    #[arg(long, value_name = "PNG")]
    snapshot: Option<String>,

    /// View shown at startup
    #[arg(long, value_enum, default_value_t = ViewArg::Overview)]
    view: ViewArg,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ViewArg {
    Overview,
    Top,
    Front,
    Side,
}

impl From<ViewArg> for ViewSelection {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Overview => ViewSelection::Overview,
            ViewArg::Top => ViewSelection::Single(ViewKind::Top),
            ViewArg::Front => ViewSelection::Single(ViewKind::Front),
            ViewArg::Side => ViewSelection::Single(ViewKind::Side),
        }
    }
}

fn main() -> Result<(), String> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .format_level(true)
        .init();

    let cli = Cli::parse();

    let config = if let Some(path) = &cli.config {
        info!("Loading config file: {}", path);
        Config::load(path)?
    } else {
        info!("Using default settings");
        Config::default()
    };

    let selection = ViewSelection::from(cli.view);
    match &cli.snapshot {
        Some(output) => run_snapshot(&config, selection, output),
        None => run_gui(&config, selection),
    }
}
