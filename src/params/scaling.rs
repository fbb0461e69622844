// params/scaling.rs

// Unit conversions and the reference-vehicle scaling used to estimate
// rotational inertia and lateral tire stiffness for cars that have not been
// measured. Everything is scaled from a reference compact sedan.

/// Miles per hour to meters per second.
pub const MPH_TO_MS: f64 = 0.44704;
/// Pounds to kilograms.
pub const LB_TO_KG: f64 = 0.453592;
/// Standard cargo (driver + passenger) mass added to curb weight, in kg.
pub const STD_CARGO_KG: f64 = 136.0;

/// Reference vehicle used by the scaling formulas.
pub mod reference {
    use super::{LB_TO_KG, STD_CARGO_KG};

    pub const MASS: f64 = 2923.0 * LB_TO_KG + STD_CARGO_KG;
    pub const WHEELBASE: f64 = 2.70;
    pub const CENTER_TO_FRONT: f64 = WHEELBASE * 0.4;
    pub const CENTER_TO_REAR: f64 = WHEELBASE - CENTER_TO_FRONT;
    pub const STEER_RATIO: f64 = 15.38;
    pub const ROTATIONAL_INERTIA: f64 = 2500.0;
    pub const TIRE_STIFFNESS_FRONT: f64 = 192150.0;
    pub const TIRE_STIFFNESS_REAR: f64 = 202500.0;
}

/// Yaw inertia scaled by mass and the square of the wheelbase.
pub fn scale_rot_inertia(mass: f64, wheelbase: f64) -> f64 {
    reference::ROTATIONAL_INERTIA * mass * wheelbase.powi(2)
        / (reference::MASS * reference::WHEELBASE.powi(2))
}

/// Front and rear cornering stiffness, scaled by mass and by how the load
/// splits between the axles.
///
/// Returns `(front, rear)`.
pub fn scale_tire_stiffness(
    mass: f64,
    wheelbase: f64,
    center_to_front: f64,
    tire_stiffness_factor: f64,
) -> (f64, f64) {
    let center_to_rear = wheelbase - center_to_front;
    let mass_ratio = mass / reference::MASS;

    let front = reference::TIRE_STIFFNESS_FRONT * tire_stiffness_factor * mass_ratio
        * (center_to_rear / wheelbase)
        / (reference::CENTER_TO_REAR / reference::WHEELBASE);
    let rear = reference::TIRE_STIFFNESS_REAR * tire_stiffness_factor * mass_ratio
        * (center_to_front / wheelbase)
        / (reference::CENTER_TO_FRONT / reference::WHEELBASE);

    (front, rear)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6 * b.abs().max(1.0)
    }

    #[test]
    fn reference_vehicle_scales_to_itself() {
        let inertia = scale_rot_inertia(reference::MASS, reference::WHEELBASE);
        assert!(close(inertia, reference::ROTATIONAL_INERTIA));

        let (front, rear) = scale_tire_stiffness(
            reference::MASS,
            reference::WHEELBASE,
            reference::CENTER_TO_FRONT,
            1.0,
        );
        assert!(close(front, reference::TIRE_STIFFNESS_FRONT));
        assert!(close(rear, reference::TIRE_STIFFNESS_REAR));
    }

    #[test]
    fn heavier_car_has_more_inertia() {
        let light = scale_rot_inertia(1400.0, 2.7);
        let heavy = scale_rot_inertia(2100.0, 2.7);
        assert!(heavy > light);
        assert!(close(heavy / light, 1.5));
    }

    #[test]
    fn stiffness_factor_scales_both_axles() {
        let (f1, r1) = scale_tire_stiffness(1700.0, 2.8, 1.12, 1.0);
        let (f2, r2) = scale_tire_stiffness(1700.0, 2.8, 1.12, 0.5);
        assert!(close(f2, f1 * 0.5));
        assert!(close(r2, r1 * 0.5));
    }

    #[test]
    fn moving_weight_forward_loads_the_front_axle() {
        let (front_rearward, _) = scale_tire_stiffness(1700.0, 2.8, 0.49 * 2.8, 1.0);
        let (front_forward, _) = scale_tire_stiffness(1700.0, 2.8, 0.4 * 2.8, 1.0);
        assert!(front_forward > front_rearward);
    }
}
