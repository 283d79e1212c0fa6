use sketchkit::{demo_session, init_logging, render_session, SettingsManager, BUILD_DATE, VERSION};
use std::path::PathBuf;

const DEFAULT_OUTPUT: &str = "sketchkit-demo.png";

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;
    tracing::info!("SketchKit {} (built {})", VERSION, BUILD_DATE);

    let mut settings = SettingsManager::new()?;
    let config = settings.load()?.clone();

    let output = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let session = demo_session(&config)?;
    let surface = render_session(&session, &config)?;
    surface.save_png(&output)?;

    Ok(())
}
