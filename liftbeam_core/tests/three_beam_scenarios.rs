//! End-to-end three-beam scenarios through the public API.

use liftbeam_core::calculations::{calculate, SteelStatus};
use liftbeam_core::materials::{builtin_catalog, SteelCatalog};
use liftbeam_core::structure::{
    BeamIndex, BeamInput, BeamType, LoadPointInput, MachineBeamSpacing, RopingRatio,
    StructureInput,
};
use liftbeam_core::CalcError;

const TOL: f64 = 1e-9;

fn centered_structure() -> StructureInput {
    StructureInput {
        label: "Centered loads".to_string(),
        car_weight: 2000.0,
        capacity: 2500.0,
        counterweight: 3000.0,
        hoist_rope_weight: 200.0,
        compensation_weight: 100.0,
        travelling_cable_weight: 50.0,
        car_roping_ratio: RopingRatio::one_to_one(),
        counterweight_roping_ratio: RopingRatio::one_to_one(),
        machine_beam_spacing: MachineBeamSpacing { x: 30.0, y: 30.0, z: 60.0 },
        arc_of_contact: 180.0,
        slab_thickness: 4.0,
        block_up_beams_weight: 300.0,
        machine_weight: 900.0,
        motor_weight: 600.0,
        isolation_weight: 300.0,
        deflector_weight: 150.0,
        beam_type: BeamType::New,
        beams: vec![
            BeamInput::new(BeamIndex::First, 100.0)
                .with_own_weight(200.0, 100.0)
                .with_load_point(LoadPointInput::point(50.0)),
            BeamInput::new(BeamIndex::Second, 100.0)
                .with_own_weight(200.0, 100.0)
                .with_load_point(LoadPointInput::point(50.0)),
            BeamInput::new(BeamIndex::Third, 50.0)
                .with_own_weight(100.0, 50.0)
                .with_load_point(LoadPointInput::point(25.0)),
        ],
    }
}

fn catalog_json() -> &'static str {
    r#"[
        {"steelLabel": "W8X18", "sectionModulus_Zu": 15.2, "momentOfInertia_I": 61.9,
         "Shape": "W", "height": 8.14, "weightPerUnitLength": 18.0},
        {"steelLabel": "W6X9", "sectionModulus_Zu": 5.56, "momentOfInertia_I": 16.4,
         "Shape": "W", "height": 5.9, "weightPerUnitLength": 9.0}
    ]"#
}

#[test]
fn centered_loads_split_evenly_between_reactions() {
    let result = calculate(&centered_structure(), builtin_catalog()).unwrap();

    for beam in &result.beams {
        let total = beam.total_applied_load();
        assert!((beam.reactions.left - total / 2.0).abs() < TOL);
        assert!((beam.reactions.right - total / 2.0).abs() < TOL);
        let expected_zu = beam.bending_moments.governing() / 19_300.0;
        assert!((beam.required_section_modulus - expected_zu).abs() < TOL);
    }

    // (6280 + 600) / 2 × 50
    assert!((result.beams[0].bending_moments.left - 172_000.0).abs() < 1e-6);
    // (3140 + 600) / 2 × 25
    assert!((result.beams[2].bending_moments.left - 46_750.0).abs() < 1e-6);
    assert!((result.maximum_required_section_modulus - 172_000.0 / 19_300.0).abs() < TOL);
}

#[test]
fn catalog_classification_from_json() {
    let catalog = SteelCatalog::from_json_str(catalog_json()).unwrap();
    let result = calculate(&centered_structure(), &catalog).unwrap();
    assert_eq!(result.steel_library_members.len(), 2);

    let w8 = &result.steel_library_members[0];
    assert_eq!(w8.steel_label, "W8X18");
    assert_eq!(w8.calculations.section_modulus_status, SteelStatus::Yes);
    assert_eq!(w8.calculations.deflection_status.len(), 3);
    assert!(w8.calculations.deflection_status.iter().all(|d| d.status == SteelStatus::Yes));

    // beam 1: (3140 + 600) × 50 × 50³ / (3 × 29e6 × 100 × 61.9)
    let expected = 3740.0 * 50.0 * 125_000.0 / (3.0 * 29_000_000.0 * 100.0 * 61.9);
    assert!((w8.calculations.deflection_status[0].total_deflection - expected).abs() < 1e-12);

    let w6 = &result.steel_library_members[1];
    assert_eq!(w6.calculations.section_modulus_status, SteelStatus::No);
    assert_eq!(w6.overall_status(), SteelStatus::No);

    assert_eq!(result.lightest_acceptable().unwrap().steel_label, "W8X18");
}

#[test]
fn calculation_is_idempotent() {
    let input = centered_structure();
    let first = calculate(&input, builtin_catalog()).unwrap();
    let second = calculate(&input, builtin_catalog()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn reactions_balance_with_mixed_load_points() {
    let mut input = centered_structure();
    input.beams[0] = BeamInput::new(BeamIndex::First, 144.0)
        .with_own_weight(250.0, 60.0)
        .with_load_point(LoadPointInput::point(40.0))
        .with_load_point(LoadPointInput::mid_point(72.0))
        .with_load_point(LoadPointInput::point(104.0));

    let result = calculate(&input, builtin_catalog()).unwrap();
    for beam in &result.beams {
        let sum = beam.reactions.left + beam.reactions.right;
        assert!((sum - beam.total_applied_load()).abs() < 1e-6);
        for point in &beam.load_points {
            assert!((point.distance_left_a + point.distance_right_b - beam.span).abs() < TOL);
        }
    }
}

#[test]
fn coincident_points_deflect_as_one() {
    let mut doubled = centered_structure();
    doubled.beams[2] = BeamInput::new(BeamIndex::Third, 50.0)
        .with_own_weight(100.0, 50.0)
        .with_load_point(LoadPointInput::point(25.0))
        .with_load_point(LoadPointInput::point(25.0));

    let catalog = SteelCatalog::from_json_str(catalog_json()).unwrap();
    let result = calculate(&doubled, &catalog).unwrap();
    let beam = &result.beams[2];

    // reported points stay unmerged
    assert_eq!(beam.load_points.len(), 2);
    assert_eq!(beam.load_points[0].rank, 1);
    assert_eq!(beam.load_points[1].rank, 1);
    assert_eq!(beam.load_points[1].total_load, 3740.0);

    let deflection = &result.steel_library_members[0].calculations.deflection_status[2];
    assert_eq!(deflection.point_deflections.len(), 2);
    assert_eq!(deflection.point_deflections[1].deflection, 0.0);

    // both loads at midspan: 2 × (1570 + 600) × 25 × 25³ / (3 × 29e6 × 50 × 61.9)
    let expected = 2.0 * 2170.0 * 25.0 * 15_625.0 / (3.0 * 29_000_000.0 * 50.0 * 61.9);
    assert!((deflection.total_deflection - expected).abs() < 1e-12);
}

#[test]
fn json_input_roundtrip_drives_same_result() {
    let input = centered_structure();
    let json = serde_json::to_string_pretty(&input).unwrap();
    assert!(json.contains("\"car_roping_ratio\""));
    assert!(json.contains("\"PointLoad\""));

    let parsed: StructureInput = serde_json::from_str(&json).unwrap();
    assert_eq!(
        calculate(&parsed, builtin_catalog()).unwrap(),
        calculate(&input, builtin_catalog()).unwrap()
    );
}

#[test]
fn load_point_on_right_reaction_is_rejected() {
    let mut input = centered_structure();
    input.beams[1] =
        BeamInput::new(BeamIndex::Second, 100.0).with_load_point(LoadPointInput::point(100.0));

    let err = calculate(&input, builtin_catalog()).unwrap_err();
    match err {
        CalcError::InvalidInput { field, .. } => assert!(field.starts_with("beams[1]")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn zero_roping_ratio_is_rejected() {
    let mut input = centered_structure();
    input.car_roping_ratio = RopingRatio::new(0.0, 1.0);
    assert!(matches!(
        calculate(&input, builtin_catalog()),
        Err(CalcError::InvalidInput { .. })
    ));
}

#[test]
fn negative_machine_weight_leaves_no_reference_point() {
    let mut input = centered_structure();
    input.machine_weight = -30_000.0;

    match calculate(&input, builtin_catalog()) {
        Err(CalcError::CalculationFailed { reason, .. }) => {
            assert!(reason.contains("left reaction"), "{reason}");
        }
        other => panic!("expected CalculationFailed, got {other:?}"),
    }
}

#[test]
fn section_checks_serialize_under_calculations_key() {
    let catalog = SteelCatalog::from_json_str(catalog_json()).unwrap();
    let result = calculate(&centered_structure(), &catalog).unwrap();

    let value = serde_json::to_value(&result.steel_library_members[0]).unwrap();
    let checks = &value["_calculations"];
    assert_eq!(checks["sectionModulusStatus"], "Yes");
    assert_eq!(checks["deflectionStatus"].as_array().map(Vec::len), Some(3));
}
