//! Fleet view exposed to the planners

use crate::core::types::FleetId;

/// An owned fleet as seen by the AI
#[derive(Debug, Clone)]
pub struct AiFleet {
    pub id: FleetId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub speed: i32,
    /// Radar range in exploration cells
    pub radar: i32,
    pub moving: bool,
}

impl AiFleet {
    pub fn new(id: FleetId, x: f64, y: f64) -> Self {
        Self {
            id,
            name: format!("Fleet {}", id.0),
            x,
            y,
            speed: 0,
            radar: 0,
            moving: false,
        }
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_radar(mut self, radar: i32) -> Self {
        self.radar = radar;
        self
    }

    pub fn moving(mut self) -> Self {
        self.moving = true;
        self
    }

    /// Idle and able to resolve exploration cells
    pub fn can_explore(&self, min_radar: i32) -> bool {
        !self.moving && self.radar >= min_radar
    }

    /// Euclidean distance to a world-space point
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_explore() {
        let fleet = AiFleet::new(FleetId(1), 0.0, 0.0).with_radar(2);
        assert!(fleet.can_explore(2));
        assert!(!fleet.can_explore(3));
        assert!(!fleet.clone().moving().can_explore(1));
    }

    #[test]
    fn test_distance() {
        let fleet = AiFleet::new(FleetId(1), 0.0, 0.0);
        assert!((fleet.distance_to(3.0, 4.0) - 5.0).abs() < 1e-9);
    }
}
