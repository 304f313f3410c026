//! Scenario files: hand-authored world snapshots for simulation and tests

pub mod format;
pub mod loader;
pub mod sandbox;

pub use format::{PlanetRelation, ScenarioFile};
pub use loader::{build_world, load_from_file, load_from_str};
pub use sandbox::{Sandbox, SandboxEvent};

use crate::core::config::DiscoveryConfig;
use crate::core::error::Result;
use crate::core::types::PlanetId;

/// Load a scenario and wrap it in a sandbox, with planet positions applied
pub fn sandbox_from_str(content: &str, config: &DiscoveryConfig) -> Result<Sandbox> {
    let file: ScenarioFile = toml::from_str(content)?;
    let mut sandbox = Sandbox::new(build_world(&file)?, config);
    for planet in &file.planets {
        if let Some([x, y]) = planet.position {
            sandbox.set_planet_position(PlanetId(planet.id), x, y);
        }
    }
    Ok(sandbox)
}
