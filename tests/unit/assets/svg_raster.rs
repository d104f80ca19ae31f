use super::*;

const WIDE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 300 100">
  <rect x="0" y="0" width="300" height="100" fill="#ff0000"/>
</svg>"##;

#[test]
fn viewbox_drives_height_when_only_width_is_requested() {
    let intrinsic = SvgIntrinsic::parse(WIDE).unwrap();
    assert_eq!(intrinsic.view_box, Some([0.0, 0.0, 300.0, 100.0]));
    let req = RasterRequest {
        width: Some(3000),
        ..Default::default()
    };
    assert_eq!(
        infer_raster_size(&intrinsic, &req),
        RasterSizing::Exact(Size::new(3000, 1000))
    );
}

#[test]
fn absolute_size_wins_over_viewbox_for_aspect() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="600px" height="160" viewBox="0 0 10 10"/>"#;
    let intrinsic = SvgIntrinsic::parse(svg).unwrap();
    assert_eq!(intrinsic.width, Some(600.0));
    assert_eq!(intrinsic.height, Some(160.0));
    let req = RasterRequest {
        width: Some(300),
        ..Default::default()
    };
    assert_eq!(
        infer_raster_size(&intrinsic, &req),
        RasterSizing::Exact(Size::new(300, 80))
    );
}

#[test]
fn relative_units_fall_back_to_viewbox_then_square() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="50%" viewBox="0,0,200,50"/>"#;
    let intrinsic = SvgIntrinsic::parse(svg).unwrap();
    assert_eq!(intrinsic.width, None);
    assert!((intrinsic.aspect_ratio() - 0.25).abs() < 1e-9);

    let bare = SvgIntrinsic::parse(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#).unwrap();
    assert_eq!(bare.aspect_ratio(), 1.0);
}

#[test]
fn explicit_pair_height_only_and_scale_defaults() {
    let intrinsic = SvgIntrinsic::parse(WIDE).unwrap();

    let both = RasterRequest {
        width: Some(600),
        height: Some(160),
        ..Default::default()
    };
    assert_eq!(
        infer_raster_size(&intrinsic, &both),
        RasterSizing::Exact(Size::new(600, 160))
    );

    let height_only = RasterRequest {
        height: Some(50),
        ..Default::default()
    };
    assert_eq!(
        infer_raster_size(&intrinsic, &height_only),
        RasterSizing::Exact(Size::new(150, 50))
    );

    assert_eq!(
        infer_raster_size(&intrinsic, &RasterRequest::default()),
        RasterSizing::Scale(DEFAULT_RENDER_SCALE)
    );
    let bad_scale = RasterRequest {
        scale: Some(-2.0),
        ..Default::default()
    };
    assert_eq!(
        infer_raster_size(&intrinsic, &bad_scale),
        RasterSizing::Scale(DEFAULT_RENDER_SCALE)
    );
}

#[test]
fn rejects_non_svg_root() {
    assert!(SvgIntrinsic::parse("<html/>").is_err());
    assert!(SvgIntrinsic::parse("<svg").is_err());
}

#[test]
fn rasterize_fills_requested_size() {
    let rasterizer = SvgRasterizer::new();
    let tree = rasterizer.parse(WIDE.as_bytes(), None, DEFAULT_DPI).unwrap();
    let img = rasterize(&tree, Size::new(30, 10)).unwrap();
    assert_eq!(img.dimensions(), (30, 10));
    assert_eq!(img.get_pixel(15, 5).0, [255, 0, 0, 255]);

    let intrinsic = SvgIntrinsic::parse(WIDE).unwrap();
    let size = rasterizer
        .target_size(
            &tree,
            &intrinsic,
            &RasterRequest {
                scale: Some(2.0),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(size, Size::new(600, 200));
}

#[test]
fn oversized_scale_is_rejected() {
    let rasterizer = SvgRasterizer::new();
    let tree = rasterizer.parse(WIDE.as_bytes(), None, DEFAULT_DPI).unwrap();
    let intrinsic = SvgIntrinsic::parse(WIDE).unwrap();
    let req = RasterRequest {
        scale: Some(1000.0),
        ..Default::default()
    };
    assert!(rasterizer.target_size(&tree, &intrinsic, &req).is_err());
}

#[test]
fn missing_file_is_classified_as_missing_input() {
    let rasterizer = SvgRasterizer::new();
    let err = rasterizer
        .render_file(
            Path::new("target/definitely/not/here.svg"),
            &RasterRequest::default(),
        )
        .unwrap_err();
    assert!(matches!(err, ConfartError::MissingInput(_)));
}

#[test]
fn doctype_svg_renders_at_requested_width() {
    let dir = PathBuf::from("target").join("unit_svg_raster");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("doctype.svg");
    let svg = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \
         \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n{WIDE}"
    );
    std::fs::write(&path, svg).unwrap();

    let req = RasterRequest {
        width: Some(3000),
        ..Default::default()
    };
    let img = SvgRasterizer::new().render_file(&path, &req).unwrap();
    assert_eq!(img.dimensions(), (3000, 1000));
    assert_eq!(img.get_pixel(1500, 500).0, [255, 0, 0, 255]);
}
