use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use reprise::{Library, Placement, RodioBackend};
use tracing_subscriber::EnvFilter;

mod event_loop;
mod settings;
mod startup;

const USAGE: &str = "usage: reprise <playlist> [output]";

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter)),
        )
        .init();

    let mut args = env::args().skip(1);
    let Some(input) = args.next().map(PathBuf::from) else {
        return Err(USAGE.into());
    };
    let output = args.next();

    let backend = Arc::new(RodioBackend::open_default()?);
    let mut library = Library::new(backend, &settings);
    let name = library.open(&input)?;
    library.switch_to(&name)?;

    // Convert only: write the parsed track list and leave.
    if let Some(output) = output {
        let written = library
            .writer()
            .write_to(&library.current().paths(), &output, None, Placement::AsGiven)?;
        println!("{}", written.display());
        return Ok(());
    }

    let session = library.current_mut();
    for i in 0..session.len() {
        let line = session.with_track(i, |t| {
            format!("{:>3}  {}  {}", i + 1, t.duration_label(), t.source())
        });
        if let Some(line) = line {
            println!("{line}");
        }
    }

    startup::apply_playback_defaults(session, &settings);
    let result = event_loop::play_through(session);
    library.cleanup();
    result
}
