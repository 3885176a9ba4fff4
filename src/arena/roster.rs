use crate::pokemon::Combatant;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Displacement applied to a roaming entity every tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

impl Velocity {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    pub fn still() -> Self {
        Self::default()
    }
}

/// The rectangle `[0, width] x [0, height]` entities may roam in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: &Position) -> bool {
        (0.0..=self.width).contains(&position.x) && (0.0..=self.height).contains(&position.y)
    }
}

/// A combatant roaming the scene.
#[derive(Debug)]
pub struct RosterEntry {
    pub combatant: Combatant,
    pub position: Position,
    pub velocity: Velocity,
}

impl RosterEntry {
    pub fn new(combatant: Combatant, position: Position, velocity: Velocity) -> Self {
        Self {
            combatant,
            position,
            velocity,
        }
    }

    pub fn id(&self) -> u32 {
        self.combatant.id()
    }

    pub fn advance(&mut self) {
        self.position.x += self.velocity.dx;
        self.position.y += self.velocity.dy;
    }

    /// Two circles of `radius` touch or overlap.
    pub fn intersects(&self, other: &RosterEntry, radius: f32) -> bool {
        self.position.distance_to(&other.position) <= 2.0 * radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Position::new(0.0, 0.0), true)]
    #[case(Position::new(800.0, 600.0), true)]
    #[case(Position::new(-0.1, 10.0), false)]
    #[case(Position::new(10.0, 600.5), false)]
    fn test_bounds_contains(#[case] position: Position, #[case] inside: bool) {
        assert_eq!(Bounds::new(800.0, 600.0).contains(&position), inside);
    }

    #[test]
    fn test_distance() {
        let origin = Position::new(0.0, 0.0);
        assert_eq!(origin.distance_to(&Position::new(3.0, 4.0)), 5.0);
        assert_eq!(origin.distance_to(&origin), 0.0);
    }
}
