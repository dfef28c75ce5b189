use anyhow::Result;
use clap::Parser;
use std::fs::File;
use std::sync::Mutex;

use queensfall::app::App;
use queensfall::model::config::GameConfig;
use queensfall::ui::Tui;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Mark the run unofficial (frame counter keeps moving while paused)
    #[arg(short, long)]
    unofficial: bool,

    /// Disable background music
    #[arg(short = 'm', long)]
    music_off: bool,

    /// The queen shakes off her wounds; play until overrun
    #[arg(long)]
    endless: bool,

    /// Growing hordes pour in on a fixed schedule
    #[arg(long)]
    hardcore: bool,

    /// Fix the RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Write tracing output here (the terminal is taken by the board)
    #[arg(long, default_value = "queensfall.log")]
    log_file: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log = File::create(&args.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    let mut config = GameConfig::load(&args.config);
    if args.unofficial {
        config.modes.unofficial = true;
    }
    if args.music_off {
        config.modes.music = false;
    }
    if args.endless {
        config.modes.endless = true;
    }
    if args.hardcore {
        config.modes.hardcore = true;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut tui = Tui::new()?;
    tui.init()?;

    let mut app = App::new(config, args.config)?;
    let res = app.run(&mut tui);

    tui.exit()?;

    if let Err(e) = res {
        eprintln!("Application error: {e}");
    }
    Ok(())
}
