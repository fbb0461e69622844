use gm_carcore::params::scaling::{MPH_TO_MS, STD_CARGO_KG};
use gm_carcore::params::{resolve_with_preferences, GAS_INTERCEPTOR_MSG};
use gm_carcore::preferences::{INDI_SELECTED, LQR_SELECTED};
use gm_carcore::{
    resolve, Fingerprint, LateralTuning, LateralTuningMode, ParamStore, VariantTable,
    VehicleVariant,
};
use mockall::mock;
use mockall::predicate::eq;
use rstest::rstest;

mock! {
    Params {}
    impl ParamStore for Params {
        fn get_bool(&self, key: &str) -> bool;
    }
}

fn store(lqr: bool, indi: bool) -> MockParams {
    let mut params = MockParams::new();
    params
        .expect_get_bool()
        .with(eq(LQR_SELECTED))
        .times(1)
        .return_const(lqr);
    params
        .expect_get_bool()
        .with(eq(INDI_SELECTED))
        .times(1)
        .return_const(indi);
    params
}

#[rstest]
fn every_known_variant_resolves_to_a_physical_car(
    #[values(
        VehicleVariant::Volt,
        VehicleVariant::Bolt,
        VehicleVariant::Malibu,
        VehicleVariant::HoldenAstra,
        VehicleVariant::Acadia,
        VehicleVariant::BuickRegal,
        VehicleVariant::CadillacAts
    )]
    variant: VehicleVariant,
    #[values(LateralTuningMode::Pid, LateralTuningMode::Lqr, LateralTuningMode::Indi)]
    mode: LateralTuningMode,
) {
    let profile = resolve(variant, &Fingerprint::empty(), mode, &VariantTable::default());

    assert!(profile.mass > 0.0);
    assert!(profile.wheelbase > 0.0);
    assert!(profile.rotational_inertia > 0.0);
    assert!(profile.tire_stiffness_front > 0.0);
    assert!(profile.tire_stiffness_rear > 0.0);
    assert_eq!(profile.lateral_tuning.mode(), mode);
    assert_eq!(profile.car_fingerprint, variant);
}

#[rstest]
#[case(true, false, LateralTuningMode::Lqr)]
#[case(true, true, LateralTuningMode::Lqr)]
#[case(false, true, LateralTuningMode::Indi)]
#[case(false, false, LateralTuningMode::Pid)]
fn preference_flags_pick_one_lateral_law(
    #[case] lqr: bool,
    #[case] indi: bool,
    #[case] expected: LateralTuningMode,
) {
    let params = store(lqr, indi);
    let profile = resolve_with_preferences(
        VehicleVariant::Malibu,
        &Fingerprint::empty(),
        &params,
        &VariantTable::default(),
    );
    assert_eq!(profile.lateral_tuning.mode(), expected);
}

#[test]
fn volt_constants() {
    let profile = resolve(
        VehicleVariant::Volt,
        &Fingerprint::empty(),
        LateralTuningMode::Pid,
        &VariantTable::default(),
    );

    assert_eq!(profile.mass, 1607.0 + STD_CARGO_KG);
    assert_eq!(profile.wheelbase, 2.69);
    assert_eq!(profile.steer_ratio, 15.7);
    assert!((profile.center_to_front - 2.69 * 0.4).abs() < 1e-12);
    assert!((profile.min_enable_speed - 18.0 * MPH_TO_MS).abs() < 1e-12);
    assert!((profile.min_steer_speed - 7.0 * MPH_TO_MS).abs() < 1e-12);
    assert_eq!(profile.radar_time_step, 0.0667);
    assert_eq!(profile.steer_limit_timer, 0.4);
    assert!(profile.stopping_control);
    assert!(!profile.enable_cruise);

    let LateralTuning::Pid(pid) = &profile.lateral_tuning else {
        panic!("expected PID tuning");
    };
    assert_eq!(pid.kf, 0.00055);
    assert_eq!(pid.kp.values, vec![0.1, 0.12]);
    assert_eq!(profile.longitudinal_tuning.kp.breakpoints, vec![0.0, 30.0]);
}

#[test]
fn bolt_engages_at_any_speed() {
    let profile = resolve(
        VehicleVariant::Bolt,
        &Fingerprint::empty(),
        LateralTuningMode::Pid,
        &VariantTable::default(),
    );
    assert_eq!(profile.min_enable_speed, -1.0);
    assert_eq!(profile.min_steer_speed, 5.0);
}

#[test]
fn interceptor_on_any_bus_is_detected() {
    let profile = resolve(
        VehicleVariant::Acadia,
        &Fingerprint::empty().with(1, GAS_INTERCEPTOR_MSG),
        LateralTuningMode::Pid,
        &VariantTable::default(),
    );
    assert!(profile.enable_gas_interceptor);
    assert!(profile.openpilot_longitudinal_control);

    let gas_max = profile.gas_max.expect("gas schedule");
    assert_eq!(gas_max.breakpoints, vec![0.0, 5.0, 9.0, 35.0]);
    assert_eq!(gas_max.values, vec![0.4, 0.5, 0.7, 0.7]);
}

#[test]
fn profile_serializes_to_yaml() {
    let profile = resolve(
        VehicleVariant::CadillacAts,
        &Fingerprint::empty(),
        LateralTuningMode::Lqr,
        &VariantTable::default(),
    );
    let yaml = serde_yaml::to_string(&profile).unwrap();
    assert!(yaml.contains("law: lqr"));
    assert!(yaml.contains("car_fingerprint: cadillac_ats"));
}
