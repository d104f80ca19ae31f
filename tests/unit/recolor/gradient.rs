use super::*;

fn strip(pixels: &[[u8; 4]]) -> RgbaImage {
    let mut img = RgbaImage::new(pixels.len() as u32, 1);
    for (x, px) in pixels.iter().enumerate() {
        img.put_pixel(x as u32, 0, image::Rgba(*px));
    }
    img
}

#[test]
fn white_pixels_follow_the_horizontal_gradient() {
    let src = strip(&[[255, 255, 255, 255], [0; 4], [250, 240, 230, 220], [0; 4]]);
    let out = recolor_gradient(&src, &GradientPalette::default());
    assert_eq!(out.get_pixel(0, 0).0, [0x51, 0x24, 0x7a, 255]);
    // t = 2/4: midpoint of #51247a and #bf872b, truncated.
    assert_eq!(out.get_pixel(2, 0).0, [136, 85, 82, 220]);
}

#[test]
fn light_grey_gets_the_dimmed_gradient() {
    let src = strip(&[[180, 180, 180, 255]]);
    let out = recolor_gradient(&src, &GradientPalette::default());
    assert_eq!(out.get_pixel(0, 0).0, [56, 25, 85, 255]);
}

#[test]
fn dark_pixels_become_outline_and_keep_alpha() {
    let src = strip(&[[10, 20, 30, 201]]);
    let out = recolor_gradient(&src, &GradientPalette::default());
    assert_eq!(out.get_pixel(0, 0).0, [0x28, 0x14, 0x3c, 201]);
}

#[test]
fn translucent_and_mid_tones_are_untouched() {
    let src = strip(&[[255, 255, 255, 200], [120, 120, 120, 255], [255, 0, 0, 255]]);
    let out = recolor_gradient(&src, &GradientPalette::default());
    assert_eq!(out, src);
}

#[test]
fn palette_deserializes_from_hex() {
    let palette: GradientPalette =
        serde_json::from_str(r##"{"start": "#000000", "light_factor": 0.5}"##).unwrap();
    assert_eq!(palette.start, Rgba8::rgb(0, 0, 0));
    assert_eq!(palette.end, GradientPalette::default().end);
    assert_eq!(palette.light_factor, 0.5);
}
