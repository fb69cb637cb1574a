use super::*;
use std::sync::Arc;

fn zones() -> Vec<(ImageSlot, egui::Rect)> {
    vec![
        (
            ImageSlot::User,
            egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(300.0, 280.0)),
        ),
        (
            ImageSlot::Clothing,
            egui::Rect::from_min_size(egui::pos2(320.0, 0.0), egui::vec2(300.0, 280.0)),
        ),
    ]
}

#[test]
fn drop_goes_to_zone_under_pointer() {
    let zones = zones();
    assert_eq!(
        pick_drop_slot(Some(egui::pos2(400.0, 100.0)), &zones, |_| false),
        ImageSlot::Clothing
    );
    assert_eq!(
        pick_drop_slot(Some(egui::pos2(10.0, 10.0)), &zones, |_| true),
        ImageSlot::User
    );
}

#[test]
fn drop_outside_zones_fills_first_empty_slot() {
    let zones = zones();
    let outside = Some(egui::pos2(310.0, 500.0));
    assert_eq!(pick_drop_slot(outside, &zones, |_| false), ImageSlot::User);
    assert_eq!(
        pick_drop_slot(outside, &zones, |slot| slot == ImageSlot::User),
        ImageSlot::Clothing
    );
    assert_eq!(pick_drop_slot(None, &zones, |_| true), ImageSlot::User);
}

#[test]
fn dropped_bytes_use_reported_mime() {
    let file = egui::DroppedFile {
        name: "camera-upload".to_string(),
        mime: "image/png".to_string(),
        bytes: Some(Arc::from(vec![1_u8, 2, 3])),
        ..Default::default()
    };
    let image = image_from_dropped_file(&file).expect("accepted");
    assert_eq!(image.file_name, "camera-upload");
    assert_eq!(image.mime.as_str(), "image/png");
    assert_eq!(image.size_bytes(), 3);
}

#[test]
fn dropped_non_image_is_rejected() {
    let file = egui::DroppedFile {
        name: "notes.txt".to_string(),
        bytes: Some(Arc::from(b"hello".to_vec())),
        ..Default::default()
    };
    let err = image_from_dropped_file(&file).expect_err("text is not an image");
    assert!(matches!(err, UploadError::UnsupportedType { .. }), "{err}");
    assert_eq!(err.file_name(), "notes.txt");
}

#[test]
fn drop_without_path_or_bytes_is_unreadable() {
    let file = egui::DroppedFile {
        name: "photo.jpg".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        image_from_dropped_file(&file),
        Err(UploadError::Unreadable { .. })
    ));
}
