//! Read-only world snapshot handed to the AI each turn

pub mod catalog;
pub mod fleet;
pub mod planet;
pub mod research;
pub mod snapshot;

pub use catalog::{BuildingCatalog, BuildingType};
pub use fleet::AiFleet;
pub use planet::{AiBuilding, AiInventoryItem, AiPlanet};
pub use research::{EquipmentSlot, ResearchCategory, ResearchType};
pub use snapshot::{AiWorld, ExplorationMap, GlobalFlags, Inventory};
