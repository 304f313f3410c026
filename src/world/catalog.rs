//! Static building definitions

use ahash::AHashMap;

use crate::core::error::{AiError, Result};

/// A building definition from the game's static data
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingType {
    pub id: String,
    pub cost: i64,
    pub width: u32,
    pub height: u32,
}

impl BuildingType {
    pub fn new(id: impl Into<String>, cost: i64, width: u32, height: u32) -> Self {
        Self { id: id.into(), cost, width, height }
    }

    /// Surface cells covered by the building
    pub fn footprint(&self) -> u32 {
        self.width * self.height
    }
}

/// Building definitions keyed by id
#[derive(Debug, Clone, Default)]
pub struct BuildingCatalog {
    types: AHashMap<String, BuildingType>,
}

impl BuildingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, building: BuildingType) {
        self.types.insert(building.id.clone(), building);
    }

    /// Look up a building type; absence is a content error
    pub fn find(&self, id: &str) -> Result<&BuildingType> {
        self.types
            .get(id)
            .ok_or_else(|| AiError::MissingBuildingType(id.to_string()))
    }

    pub fn get(&self, id: &str) -> Option<&BuildingType> {
        self.types.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuildingType> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl FromIterator<BuildingType> for BuildingCatalog {
    fn from_iter<I: IntoIterator<Item = BuildingType>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for building in iter {
            catalog.insert(building);
        }
        catalog
    }
}
