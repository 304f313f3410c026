//! Research, ship and equipment definitions
//!
//! Every producible thing (cruiser hull, satellite, radar item...) is a
//! `ResearchType`. Capabilities are looked up by attribute name, so an
//! item without a "radar" entry simply has radar strength zero.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::types::ResearchId;

/// Research sub-category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResearchCategory {
    SpaceshipsCruisers,
    SpaceshipsSatellites,
    SpaceshipsFighters,
    SpaceshipsBattleships,
    SpaceshipsStations,
    EquipmentRadars,
    EquipmentWeapons,
    EquipmentShields,
    Buildings,
}

impl ResearchCategory {
    /// Ship categories that can carry equipment slots
    pub fn is_ship(&self) -> bool {
        matches!(
            self,
            ResearchCategory::SpaceshipsCruisers
                | ResearchCategory::SpaceshipsSatellites
                | ResearchCategory::SpaceshipsFighters
                | ResearchCategory::SpaceshipsBattleships
                | ResearchCategory::SpaceshipsStations
        )
    }
}

/// An equipment mount point on a ship type
#[derive(Debug, Clone)]
pub struct EquipmentSlot {
    pub id: String,
    /// Fixed slots come pre-installed and cannot be changed
    pub fixed: bool,
    /// Items this slot accepts (for a fixed slot, the installed item)
    pub items: Vec<Arc<ResearchType>>,
}

impl EquipmentSlot {
    pub fn open(id: impl Into<String>, items: Vec<Arc<ResearchType>>) -> Self {
        Self { id: id.into(), fixed: false, items }
    }

    pub fn fixed(id: impl Into<String>, item: Arc<ResearchType>) -> Self {
        Self { id: id.into(), fixed: true, items: vec![item] }
    }

    /// Whether the slot can hold the given item
    pub fn accepts(&self, research: &ResearchId) -> bool {
        self.items.iter().any(|item| &item.id == research)
    }
}

/// A research/ship/equipment definition
#[derive(Debug, Clone)]
pub struct ResearchType {
    pub id: ResearchId,
    pub name: String,
    pub category: ResearchCategory,
    pub production_cost: i64,
    /// Named numeric capabilities ("radar", "detector", ...)
    pub attributes: BTreeMap<String, i32>,
    pub slots: Vec<EquipmentSlot>,
}

impl ResearchType {
    pub fn new(id: impl Into<String>, category: ResearchCategory, production_cost: i64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id: ResearchId(id),
            category,
            production_cost,
            attributes: BTreeMap::new(),
            slots: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: i32) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn with_slot(mut self, slot: EquipmentSlot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Whether the attribute is present at all (even with value zero)
    pub fn has(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Attribute value, or `default` when absent
    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        self.attributes.get(key).copied().unwrap_or(default)
    }

    pub fn is_cruiser(&self) -> bool {
        self.category == ResearchCategory::SpaceshipsCruisers
    }

    /// Strength of the first radar item found in a fixed slot
    ///
    /// Only the first fixed slot carrying a radar counts.
    pub fn fixed_radar(&self, radar_key: &str) -> Option<i32> {
        self.slots
            .iter()
            .filter(|slot| slot.fixed)
            .find_map(|slot| {
                slot.items
                    .iter()
                    .find(|item| item.has(radar_key))
                    .map(|item| item.get_int(radar_key, 0))
            })
    }

    /// Whether any slot (fixed or open) can hold the given item
    pub fn supports(&self, research: &ResearchId) -> bool {
        self.slots.iter().any(|slot| slot.accepts(research))
    }

    /// Whether every open slot can hold the given item
    pub fn open_slots_accept(&self, research: &ResearchId) -> bool {
        self.slots.iter().filter(|slot| !slot.fixed).all(|slot| slot.accepts(research))
    }

    pub fn has_open_slot(&self) -> bool {
        self.slots.iter().any(|slot| !slot.fixed)
    }
}

impl PartialEq for ResearchType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ResearchType {}

#[cfg(test)]
mod tests {
    use super::*;

    fn radar(id: &str, strength: i32) -> Arc<ResearchType> {
        Arc::new(ResearchType::new(id, ResearchCategory::EquipmentRadars, 100).with_attribute("radar", strength))
    }

    #[test]
    fn test_attribute_defaults_to_given_value() {
        let laser = ResearchType::new("Laser", ResearchCategory::EquipmentWeapons, 50);
        assert!(!laser.has("radar"));
        assert_eq!(laser.get_int("radar", 0), 0);
        assert_eq!(laser.get_int("radar", 7), 7);
    }

    #[test]
    fn test_zero_valued_attribute_is_present() {
        let dud = ResearchType::new("Dud", ResearchCategory::EquipmentRadars, 1).with_attribute("radar", 0);
        assert!(dud.has("radar"));
        assert_eq!(dud.get_int("radar", 5), 0);
    }

    #[test]
    fn test_fixed_radar_uses_first_fixed_radar_slot() {
        let ship = ResearchType::new("Scout", ResearchCategory::SpaceshipsCruisers, 1000)
            .with_slot(EquipmentSlot::open("weapon", vec![radar("Radar3", 3)]))
            .with_slot(EquipmentSlot::fixed("sensor", radar("Radar1", 1)))
            .with_slot(EquipmentSlot::fixed("sensor2", radar("Radar2", 2)));

        assert_eq!(ship.fixed_radar("radar"), Some(1));
    }

    #[test]
    fn test_fixed_radar_absent_for_open_only_ship() {
        let ship = ResearchType::new("Hull", ResearchCategory::SpaceshipsCruisers, 1000)
            .with_slot(EquipmentSlot::open("radar", vec![radar("Radar1", 1)]));

        assert_eq!(ship.fixed_radar("radar"), None);
        assert!(ship.has_open_slot());
        assert!(ship.open_slots_accept(&ResearchId::new("Radar1")));
        assert!(ship.supports(&ResearchId::new("Radar1")));
        assert!(!ship.supports(&ResearchId::new("Radar2")));
    }

    #[test]
    fn test_open_slots_accept_needs_every_open_slot() {
        let ship = ResearchType::new("Hull", ResearchCategory::SpaceshipsCruisers, 1000)
            .with_slot(EquipmentSlot::fixed("sensor", radar("Radar2", 2)))
            .with_slot(EquipmentSlot::open("radar", vec![radar("Radar1", 1)]))
            .with_slot(EquipmentSlot::open("weapon", Vec::new()));

        assert!(!ship.open_slots_accept(&ResearchId::new("Radar1")));
        assert!(ship.supports(&ResearchId::new("Radar1")));
    }

    #[test]
    fn test_equality_by_id() {
        let a = ResearchType::new("X", ResearchCategory::Buildings, 1);
        let b = ResearchType::new("X", ResearchCategory::EquipmentWeapons, 99);
        assert_eq!(a, b);
    }
}
