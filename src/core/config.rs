use crate::math::Real;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Configuration parameters for a scene
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// Gravity creators apply no force while the centroids are this close or
    /// closer, avoiding the singularity at zero separation
    pub gravity_min_distance: Real,

    /// Whether collision creators skip the SAT test for pairs whose centroids
    /// are farther apart than the sum of their circumscribed radii
    pub radius_broad_phase: bool,

    /// Number of bodies to reserve room for
    pub initial_body_capacity: usize,

    /// Number of force creators to reserve room for
    pub initial_force_capacity: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity_min_distance: 5.0,
            radius_broad_phase: true,
            initial_body_capacity: 10,
            initial_force_capacity: 5,
        }
    }
}
