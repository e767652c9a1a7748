//! Nearest-N ship selection by camera distance.

use glam::DVec3;

use crate::world::ShipInfo;

/// Picks the ships closest to the camera.
#[derive(Clone, Debug)]
pub struct ShipSelector {
    max_ships: usize,
}

impl ShipSelector {
    /// Create a selector returning at most `max_ships` ships.
    pub fn new(max_ships: usize) -> Self {
        Self { max_ships }
    }

    /// Upper bound on the number of ships returned.
    pub fn max_ships(&self) -> usize {
        self.max_ships
    }

    /// Ships ordered by squared distance from `camera` to their world AABB,
    /// nearest first, truncated to `max_ships`.
    ///
    /// Ships without a usable AABB sort as infinitely far, so they are only
    /// dropped when the list overflows. Ties keep registry order.
    pub fn select_closest<'a>(&self, ships: &'a [ShipInfo], camera: DVec3) -> Vec<&'a ShipInfo> {
        if self.max_ships == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<(f64, &ShipInfo)> = ships
            .iter()
            .map(|ship| (distance_squared(ship, camera), ship))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
        ranked.truncate(self.max_ships);
        ranked.into_iter().map(|(_, ship)| ship).collect()
    }
}

fn distance_squared(ship: &ShipInfo, camera: DVec3) -> f64 {
    match ship.world_aabb {
        Some(aabb) if aabb.is_finite() => {
            let d = aabb.distance_squared_to_point(camera);
            if d.is_nan() { f64::INFINITY } else { d }
        }
        _ => f64::INFINITY,
    }
}
