use crate::assets::fonts::{FontConfig, FontResolver, FontWeight};

use super::*;

const RED: Rgba8 = Rgba8::rgb(255, 0, 0);

#[test]
fn paste_uses_alpha_as_mask() {
    let mut canvas = Canvas::new(Size::new(4, 4), Rgba8::WHITE);
    let mut cell = RgbaImage::new(2, 1);
    cell.put_pixel(0, 0, image::Rgba([0, 0, 0, 0]));
    cell.put_pixel(1, 0, image::Rgba([255, 0, 0, 255]));
    canvas.paste(&cell, 1, 1);
    canvas.paste(&cell, 3, 3);

    let img = canvas.image();
    assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(2, 1).0, [255, 0, 0, 255]);
    // Clipped at the right edge: only the transparent pixel lands.
    assert_eq!(img.get_pixel(3, 3).0, [255, 255, 255, 255]);
}

#[test]
fn filled_rect_covers_its_box() {
    let layer = render_shape(Shape::Rect, Size::new(10, 6), &ShapeStyle::filled(RED)).unwrap();
    assert_eq!(layer.dimensions(), (10, 6));
    assert!(layer.pixels().all(|p| p.0 == [255, 0, 0, 255]));
}

#[test]
fn stroke_stays_inside_the_box() {
    let border = Rgba8::rgb(0xdd, 0xdd, 0xdd);
    let style = ShapeStyle::filled(Rgba8::WHITE).with_stroke(border, 2.0);
    let layer = render_shape(Shape::Rect, Size::new(20, 20), &style).unwrap();
    assert_eq!(layer.get_pixel(0, 10).0, [0xdd, 0xdd, 0xdd, 255]);
    assert_eq!(layer.get_pixel(19, 10).0, [0xdd, 0xdd, 0xdd, 255]);
    assert_eq!(layer.get_pixel(10, 10).0, [255, 255, 255, 255]);
}

#[test]
fn ellipse_leaves_corners_clear() {
    let layer = render_shape(Shape::Ellipse, Size::new(20, 20), &ShapeStyle::filled(RED)).unwrap();
    assert_eq!(layer.get_pixel(0, 0).0[3], 0);
    assert_eq!(layer.get_pixel(19, 19).0[3], 0);
    assert_eq!(layer.get_pixel(10, 10).0, [255, 0, 0, 255]);
}

#[test]
fn clip_to_ellipse_masks_alpha_only() {
    let mut img = RgbaImage::from_pixel(30, 30, image::Rgba([10, 20, 30, 255]));
    clip_to_shape(&mut img, Shape::Ellipse).unwrap();
    assert_eq!(img.get_pixel(0, 0).0[3], 0);
    assert_eq!(img.get_pixel(15, 15).0, [10, 20, 30, 255]);

    let mut untouched = RgbaImage::from_pixel(3, 3, image::Rgba([1, 1, 1, 200]));
    clip_to_shape(&mut untouched, Shape::Rect).unwrap();
    assert!(untouched.pixels().all(|p| p.0 == [1, 1, 1, 200]));
}

#[test]
fn zero_sized_shapes_are_rejected() {
    let err = render_shape(Shape::Rect, Size::new(0, 4), &ShapeStyle::default()).unwrap_err();
    assert!(matches!(err, ConfartError::Validation(_)));
}

#[test]
fn placeholder_without_text_is_flat_with_border() {
    let img = placeholder(Size::new(40, 30), Shape::Rect, "missing", None).unwrap();
    assert_eq!(img.dimensions(), (40, 30));
    assert_eq!(img.get_pixel(20, 15).0, [0xf0, 0xf0, 0xf0, 255]);
    assert_eq!(img.get_pixel(0, 15).0, [0xdd, 0xdd, 0xdd, 255]);
}

#[test]
fn shape_names_accept_circle_alias() {
    let shape: Shape = serde_json::from_str("\"circle\"").unwrap();
    assert_eq!(shape, Shape::Ellipse);
}

#[test]
fn centred_text_balances_its_margins() {
    let Ok(font) = FontResolver::new(FontConfig::default(), "target").resolve(FontWeight::Bold)
    else {
        eprintln!("skipping: no system font available");
        return;
    };
    let mut engine = TextEngine::new();
    let style = TextStyle::new(font, 24.0, Rgba8::rgb(0, 0, 0));
    let mut canvas = Canvas::new(Size::new(300, 60), Rgba8::TRANSPARENT);
    let width = canvas
        .draw_text_centered(&mut engine, "Keynote", &style, 0, 300, 10)
        .unwrap();
    assert!(width > 0.0 && width < 300.0);

    let inked: Vec<u32> = canvas
        .image()
        .enumerate_pixels()
        .filter(|(_, _, p)| p[3] > 0)
        .map(|(x, _, _)| x)
        .collect();
    let left = *inked.iter().min().unwrap();
    let right = 299 - *inked.iter().max().unwrap();
    assert!(left.abs_diff(right) <= 6, "left {left} right {right}");
}
