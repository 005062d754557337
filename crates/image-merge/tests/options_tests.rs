use image_merge::*;
use tempfile::TempDir;

#[test]
fn test_default_options_are_valid() {
    let options = MergeOptions::default();
    assert!(options.validate().is_ok());
    assert_eq!(options.columns_per_row, 3);
    assert_eq!(options.label_height, 44);
    assert_eq!(options.max_image_size, 0);
    assert_eq!(options.direction, Direction::Vertical);
}

#[test]
fn test_validate_rejects_bad_values() {
    let cases = [
        MergeOptions {
            label_height: 0,
            ..Default::default()
        },
        MergeOptions {
            columns_per_row: 0,
            ..Default::default()
        },
        MergeOptions {
            pdf_dpi: 0.0,
            ..Default::default()
        },
        MergeOptions {
            font_size: f32::NAN,
            ..Default::default()
        },
        MergeOptions {
            use_text_width_estimate: true,
            estimate_char_width: 0,
            ..Default::default()
        },
    ];

    for options in cases {
        assert!(
            matches!(options.validate(), Err(MergeError::Config(_))),
            "expected rejection for {:?}",
            options
        );
    }
}

#[tokio::test]
async fn test_options_round_trip_through_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("options.json");

    let options = MergeOptions {
        spacing: 12,
        columns_per_row: 4,
        max_image_size: 800,
        direction: Direction::Horizontal,
        background_color: Color::rgba(1, 2, 3, 255),
        font_candidates: vec![FontSource::with_index("/fonts/custom.ttc", 2)],
        ..Default::default()
    };
    options.save(&path).await.unwrap();

    let loaded = MergeOptions::load(&path).await.unwrap();
    assert_eq!(loaded, options);
}

#[tokio::test]
async fn test_partial_json_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.json");
    tokio::fs::write(&path, r#"{ "spacing": 7, "direction": "horizontal" }"#)
        .await
        .unwrap();

    let loaded = MergeOptions::load(&path).await.unwrap();

    assert_eq!(loaded.spacing, 7);
    assert_eq!(loaded.direction, Direction::Horizontal);
    assert_eq!(loaded.label_height, MergeOptions::default().label_height);
}

#[tokio::test]
async fn test_malformed_json_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    tokio::fs::write(&path, "{ spacing: ").await.unwrap();

    let result = MergeOptions::load(&path).await;

    assert!(matches!(result, Err(MergeError::Config(_))));
}
