use super::*;

fn sample(shoulder_width: f64, torso_height: f64, ratio: f64) -> Measurements {
    Measurements {
        shoulder_width: Some(shoulder_width),
        torso_height: Some(torso_height),
        chest_width: Some(350.0),
        shoulder_to_chest_ratio: Some(ratio),
        torso_aspect_ratio: Some(1.25),
    }
}

#[test]
fn size_label_boundaries() {
    let cases = [
        (0.0, SizeLabel::XS),
        (379.0, SizeLabel::XS),
        (379.99, SizeLabel::XS),
        (380.0, SizeLabel::S),
        (399.0, SizeLabel::S),
        (400.0, SizeLabel::M),
        (419.0, SizeLabel::M),
        (420.0, SizeLabel::L),
        (439.0, SizeLabel::L),
        (440.0, SizeLabel::XL),
        (900.0, SizeLabel::XL),
    ];
    for (shoulder_width, expected) in cases {
        assert_eq!(
            SizeLabel::from_shoulder_width(shoulder_width),
            expected,
            "shoulder_width={shoulder_width}"
        );
    }
}

#[test]
fn body_type_boundaries() {
    let cases = [
        (0.5, BodyType::Slim),
        (0.79, BodyType::Slim),
        (0.8, BodyType::Regular),
        (0.99, BodyType::Regular),
        (1.0, BodyType::Athletic),
        (1.19, BodyType::Athletic),
        (1.2, BodyType::Broad),
        (2.0, BodyType::Broad),
    ];
    for (ratio, expected) in cases {
        assert_eq!(
            BodyType::from_shoulder_to_chest_ratio(ratio),
            expected,
            "ratio={ratio}"
        );
    }
}

#[test]
fn length_advice_boundaries() {
    let cases = [
        (399.0, LengthAdvice::Standard),
        (400.0, LengthAdvice::Regular),
        (449.0, LengthAdvice::Regular),
        (450.0, LengthAdvice::Longer),
    ];
    for (torso_height, expected) in cases {
        assert_eq!(
            LengthAdvice::from_torso_height(torso_height),
            expected,
            "torso_height={torso_height}"
        );
    }
}

#[test]
fn negative_values_fall_into_lowest_bucket() {
    assert_eq!(SizeLabel::from_shoulder_width(-1.0), SizeLabel::XS);
    assert_eq!(BodyType::from_shoulder_to_chest_ratio(-0.1), BodyType::Slim);
}

#[test]
fn summary_derives_all_labels() {
    let summary = MeasurementSummary::from_measurements(sample(410.0, 455.0, 1.05))
        .expect("finite measurements");
    assert_eq!(summary.size, SizeLabel::M);
    assert_eq!(summary.body_type, BodyType::Athletic);
    assert_eq!(summary.length_advice, LengthAdvice::Longer);

    let tips = summary.fit_tips();
    assert_eq!(tips[0], "Athletic build: Look for styles with room in shoulders");
    assert_eq!(
        tips[1],
        "Recommended length based on torso height: You might prefer longer cuts"
    );
}

#[test]
fn summary_rejects_non_finite_measurements() {
    let err = MeasurementSummary::from_measurements(sample(f64::NAN, 400.0, 1.0))
        .expect_err("nan must be rejected");
    assert_eq!(err.to_string(), "Error: Invalid measurement data");
    assert!(MeasurementSummary::from_measurements(sample(400.0, f64::INFINITY, 1.0)).is_err());
}

#[test]
fn summary_rejects_absent_measurements() {
    let missing_ratio = Measurements {
        shoulder_to_chest_ratio: None,
        ..sample(410.0, 420.0, 1.0)
    };
    assert_eq!(
        MeasurementSummary::from_measurements(missing_ratio),
        Err(InvalidMeasurements)
    );
    assert_eq!(
        MeasurementSummary::from_measurements(Measurements::default()),
        Err(InvalidMeasurements)
    );
}

#[test]
fn detail_rows_format_pixels_and_ratios() {
    let summary = MeasurementSummary::from_measurements(Measurements {
        shoulder_width: Some(401.26),
        torso_height: Some(388.0),
        chest_width: Some(377.04),
        shoulder_to_chest_ratio: Some(1.064),
        torso_aspect_ratio: Some(0.9666),
    })
    .expect("finite");
    let rows = summary.detail_rows();
    assert_eq!(rows[0], ("Shoulder Width", "401.3 px".to_string()));
    assert_eq!(rows[1], ("Chest Width", "377.0 px".to_string()));
    assert_eq!(rows[2], ("Torso Height", "388.0 px".to_string()));
    assert_eq!(rows[3], ("Shoulder/Chest Ratio", "1.06".to_string()));
    assert_eq!(rows[4], ("Torso Ratio", "0.97".to_string()));
}

#[test]
fn slots_map_to_multipart_fields() {
    assert_eq!(ImageSlot::User.field_name(), "user_image");
    assert_eq!(ImageSlot::Clothing.field_name(), "clothing_image");
    assert!(ImageSlot::Clothing.upload_prompt().ends_with("clothing image"));
}
