use poster_tile::*;

#[test]
fn test_validation_zero_columns() {
    let spec = LayoutSpec::new(0, Orientation::Landscape, false);
    match spec.validate() {
        Err(PosterError::InvalidLayout(msg)) => assert!(msg.contains("Column count")),
        _ => panic!("Expected InvalidLayout error"),
    }

    assert!(LayoutSpec::new(1, Orientation::Portrait, true).validate().is_ok());
}

#[test]
fn test_layout_default() {
    let spec = LayoutSpec::default();
    assert_eq!(spec.cols, 2);
    assert_eq!(spec.orientation, Orientation::Landscape);
    assert!(!spec.include_borders);
    assert_eq!(spec.border_policy(), BorderPolicy::None);
}

#[test]
fn test_context_page_format() {
    let context = AssemblyContext::default();
    assert_eq!(context.tile_storage, TileStorage::Memory);
    assert_eq!(
        context.page_format_for(Orientation::Portrait),
        PageFormat::PORTRAIT
    );

    let preview = PageFormat {
        width_px: 351,
        height_px: 248,
        width_mm: 297.0,
        height_mm: 210.0,
    };
    let context = AssemblyContext {
        page_format: Some(preview),
        ..AssemblyContext::with_tile_dir("tiles")
    };
    assert_eq!(context.page_format_for(Orientation::Landscape), preview);
    assert_eq!(
        context.tile_storage,
        TileStorage::Directory("tiles".into())
    );
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_layout() {
    use tempfile::NamedTempFile;

    let spec = LayoutSpec::new(5, Orientation::Portrait, true);
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    spec.save(path).await.unwrap();
    let json = std::fs::read_to_string(path).unwrap();
    assert!(json.contains("\"portrait\""));

    let loaded = LayoutSpec::load(path).await.unwrap();
    assert_eq!(loaded, spec);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_layout_defaults_borders() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), r#"{"cols": 3, "orientation": "landscape"}"#).unwrap();

    let loaded = LayoutSpec::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded, LayoutSpec::new(3, Orientation::Landscape, false));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_layout_rejects_bad_input() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), r#"{"cols": 3, "orientation": "diagonal"}"#).unwrap();
    assert!(matches!(
        LayoutSpec::load(temp_file.path()).await,
        Err(PosterError::Config(_))
    ));

    std::fs::write(temp_file.path(), r#"{"cols": 0, "orientation": "portrait"}"#).unwrap();
    assert!(matches!(
        LayoutSpec::load(temp_file.path()).await,
        Err(PosterError::InvalidLayout(_))
    ));
}
