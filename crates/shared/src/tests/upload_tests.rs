use super::*;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_file(name: &str, bytes: &[u8]) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("tryon_upload_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(name);
    fs::write(&path, bytes).expect("write temp file");
    path
}

#[test]
fn allowlist_accepts_jpeg_and_png_extensions() {
    assert_eq!(ImageMime::detect("me.jpg").expect("jpg"), ImageMime::Jpeg);
    assert_eq!(ImageMime::detect("me.JPEG").expect("jpeg"), ImageMime::Jpeg);
    assert_eq!(ImageMime::detect("shirt.png").expect("png"), ImageMime::Png);
}

#[test]
fn allowlist_rejects_other_files() {
    for name in ["notes.txt", "shirt.gif", "photo.webp", "archive.zip", "noextension"] {
        let err = ImageMime::detect(name).expect_err(name);
        assert!(matches!(err, UploadError::UnsupportedType { .. }), "{name}");
        assert_eq!(err.file_name(), name);
    }
}

#[test]
fn reported_mime_essence_is_normalized() {
    assert_eq!(ImageMime::from_mime_str("IMAGE/PNG"), Some(ImageMime::Png));
    assert_eq!(
        ImageMime::from_mime_str("image/jpeg; charset=binary"),
        Some(ImageMime::Jpeg)
    );
    assert_eq!(ImageMime::from_mime_str("image/gif"), None);
    assert_eq!(ImageMime::from_mime_str(""), None);
}

#[test]
fn selects_image_from_disk() {
    let path = temp_file("user.png", b"\x89PNG\r\n\x1a\nrest");
    let selected = SelectedImage::from_path(&path).expect("select");
    assert_eq!(selected.file_name, "user.png");
    assert_eq!(selected.mime, ImageMime::Png);
    assert_eq!(selected.size_bytes(), 12);
    assert_eq!(selected.source_path.as_deref(), Some(path.as_path()));
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn rejects_non_image_before_reading() {
    let err = SelectedImage::from_path(Path::new("/definitely/missing/readme.txt"))
        .expect_err("txt rejected");
    assert!(matches!(err, UploadError::UnsupportedType { .. }));
}

#[test]
fn missing_image_file_is_unreadable() {
    let err = SelectedImage::from_path(Path::new("/definitely/missing/user.jpg"))
        .expect_err("missing file");
    assert!(matches!(err, UploadError::Unreadable { .. }));
}

#[test]
fn empty_image_file_is_unreadable() {
    let path = temp_file("empty.jpg", b"");
    let err = SelectedImage::from_path(&path).expect_err("zero-byte file");
    match &err {
        UploadError::Unreadable { file_name, reason } => {
            assert_eq!(file_name, "empty.jpg");
            assert_eq!(reason, "file is empty");
        }
        other => panic!("expected unreadable, got {other:?}"),
    }
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn dropped_bytes_prefer_reported_mime() {
    let selected = SelectedImage::from_bytes("blob", Some("image/jpeg"), vec![1, 2, 3])
        .expect("reported jpeg");
    assert_eq!(selected.mime, ImageMime::Jpeg);
    assert!(selected.source_path.is_none());

    let err = SelectedImage::from_bytes("shirt.png", Some("text/plain"), vec![1])
        .expect_err("reported type wins");
    assert!(matches!(err, UploadError::UnsupportedType { .. }));
}

#[test]
fn dropped_bytes_fall_back_to_extension() {
    let selected =
        SelectedImage::from_bytes("shirt.png", Some(""), vec![1]).expect("extension guess");
    assert_eq!(selected.mime, ImageMime::Png);

    let err = SelectedImage::from_bytes("shirt.png", None, Vec::new()).expect_err("empty");
    assert!(matches!(err, UploadError::Unreadable { .. }));
}

#[test]
fn debug_output_omits_raw_bytes() {
    let selected = SelectedImage::from_bytes("a.png", None, vec![0; 64]).expect("select");
    let debug = format!("{selected:?}");
    assert!(debug.contains("size_bytes: 64"));
    assert!(!debug.contains("[0, 0"));
}
