use anyhow::{Context, Result};
use log::info;
use simple_logger::SimpleLogger;

use shaded_quads::{BasicQuad, DemoConfig, GlHost, DEFAULT_CONFIG_FILE};

fn main() -> Result<()> {
    let config = DemoConfig::load_or_default(DEFAULT_CONFIG_FILE)?;
    SimpleLogger::new().with_level(config.log_level).init()?;
    info!("Starting basic quad demo...");

    let (mut host, event_loop) = GlHost::new(&config.window)?;
    let scene =
        BasicQuad::setup(host.device(), &config).context("Failed to set up the basic quad scene")?;

    host.run(event_loop, scene)
}
