use image::{ImageFormat, Rgba, RgbaImage};
use photo_sheet::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_png(dir: &TempDir, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.path().join(name);
    RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();
    path
}

#[tokio::test]
async fn test_batch_keeps_source_order_and_survives_missing_file() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        write_png(&dir, "first.png", 30, 40),
        dir.path().join("missing.png"),
        write_png(&dir, "third.png", 50, 20),
    ];

    let images = load_images(&paths).await.unwrap();

    let names: Vec<_> = images.iter().map(|img| img.name.as_str()).collect();
    assert_eq!(names, vec!["first.png", "missing.png", "third.png"]);

    let sizes: Vec<_> = images.iter().map(|img| (img.width, img.height)).collect();
    assert_eq!(sizes, vec![(30, 40), (0, 0), (50, 20)]);
    assert!(!images[1].has_dimensions());
    assert!(images[1].source.is_empty());
}

#[tokio::test]
async fn test_batch_of_many_files_stays_ordered() {
    let dir = TempDir::new().unwrap();
    let paths: Vec<_> = (0..12)
        .map(|i| write_png(&dir, &format!("photo-{i:02}.png"), 10 + i, 10))
        .collect();

    let images = load_images(&paths).await.unwrap();

    assert_eq!(images.len(), 12);
    for (i, img) in images.iter().enumerate() {
        assert_eq!(img.name, format!("photo-{i:02}.png"));
        assert_eq!(img.width, 10 + i as u32);
    }

    let ids: std::collections::HashSet<_> = images.iter().map(|img| img.id.clone()).collect();
    assert_eq!(ids.len(), 12);
}

#[tokio::test]
async fn test_empty_batch_loads_nothing() {
    let images = load_images(&[]).await.unwrap();
    assert!(images.is_empty());
}

#[tokio::test]
async fn test_unreadable_file_is_kept_as_placeholder() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.jpg");
    std::fs::write(&path, b"definitely not a jpeg").unwrap();

    let image = load_image(&path).await;
    assert_eq!(image.name, "broken.jpg");
    assert_eq!((image.width, image.height), (0, 0));
    assert_eq!(image.source.len(), 21);
}
