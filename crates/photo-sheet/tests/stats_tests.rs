use photo_sheet::*;

fn images(count: usize) -> Vec<UploadedImage> {
    (0..count)
        .map(|i| UploadedImage {
            id: ImageId::from(format!("img{i}").as_str()),
            name: format!("img{i}.jpg"),
            source: SourceBytes::default(),
            width: 600,
            height: 800,
            adjustment: ImageAdjustment::default(),
        })
        .collect()
}

#[test]
fn test_stats_empty_queue() {
    let stats = calculate_statistics(&[]);
    assert_eq!(
        stats,
        SheetStatistics {
            images: 0,
            sheets: 0,
            filled_slots: 0,
            empty_slots: 0,
            unsized_images: 0,
        }
    );
}

#[test]
fn test_stats_seven_images() {
    let stats = calculate_statistics(&images(7));
    assert_eq!(stats.images, 7);
    assert_eq!(stats.sheets, 2);
    assert_eq!(stats.filled_slots, 7);
    assert_eq!(stats.empty_slots, 3);
}

#[test]
fn test_stats_full_sheets() {
    let stats = calculate_statistics(&images(10));
    assert_eq!(stats.sheets, 2);
    assert_eq!(stats.empty_slots, 0);
}

#[test]
fn test_stats_counts_unsized_images() {
    let mut imgs = images(3);
    imgs[1].width = 0;
    imgs[1].height = 0;
    let stats = calculate_statistics(&imgs);
    assert_eq!(stats.unsized_images, 1);
}

#[test]
fn test_stats_match_pagination() {
    for count in 0..23 {
        let imgs = images(count);
        let stats = calculate_statistics(&imgs);
        assert_eq!(stats.sheets, paginate(&imgs, 5).len(), "count {count}");
        assert_eq!(stats.sheets, count.div_ceil(5));
    }
}
