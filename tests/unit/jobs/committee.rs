use std::io::Cursor;

use super::*;
use crate::assets::fonts::FontResolver;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_committee").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn have_system_fonts() -> bool {
    let mut resolver = FontResolver::new(FontConfig::default(), "target");
    resolver.resolve(FontWeight::Regular).is_ok() && resolver.resolve(FontWeight::Bold).is_ok()
}

fn person(name: &str, image: &str) -> Person {
    Person {
        name: name.to_string(),
        role: "Program Chair".to_string(),
        affiliation: "Australian National University".to_string(),
        image: PathBuf::from(image),
    }
}

#[test]
fn page_names_are_one_based() {
    assert_eq!(page_file_name(0), "committee_collage_1.png");
    assert_eq!(page_file_name(2), "committee_collage_3.png");
}

#[test]
fn defaults_hold_twelve_people_per_page() {
    let config: CommitteeConfig =
        serde_json::from_str(r#"{ "people": [{ "name": "A", "image": "a.jpg" }] }"#).unwrap();
    assert_eq!(config.layout.per_page(), 12);
    assert_eq!(config.layout.cell, Size::new(420, 480));
    assert_eq!(config.layout.headshot, Size::new(320, 320));
    assert_eq!(config.layout.role_color, Rgba8::rgb(0x51, 0x24, 0x7a));
    assert_eq!(config.output_dir, PathBuf::from("."));
    assert!(config.people[0].role.is_empty());
}

#[test]
fn oversized_headshot_is_rejected() {
    let config = CommitteeConfig {
        people: vec![person("A", "a.jpg")],
        output_dir: PathBuf::from("."),
        layout: CommitteeLayout {
            headshot: Size::new(500, 100),
            ..Default::default()
        },
        fonts: FontConfig::default(),
    };
    let mut ctx = JobContext::new(FontConfig::default(), scratch_dir("oversized"));
    assert!(matches!(
        run(&config, &mut ctx),
        Err(ConfartError::Validation(_))
    ));
}

#[test]
fn paginates_into_one_collage_per_page() {
    if !have_system_fonts() {
        eprintln!("skipping: no system sans-serif font");
        return;
    }
    let dir = scratch_dir("pages");
    let img = image::RgbaImage::from_pixel(30, 40, image::Rgba([200, 10, 10, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(dir.join("a.png"), buf).unwrap();

    let layout = CommitteeLayout {
        columns: 2,
        rows_per_page: 1,
        cell: Size::new(120, 140),
        headshot: Size::new(60, 60),
        name_size: 12.0,
        role_size: 10.0,
        info_size: 10.0,
        ..Default::default()
    };
    let config = CommitteeConfig {
        people: vec![
            person("Ada Lovelace", "a.png"),
            person("Grace Hopper", "missing.png"),
            person("Alan Turing", "a.png"),
        ],
        output_dir: PathBuf::from("out"),
        layout,
        fonts: FontConfig::default(),
    };
    let mut ctx = JobContext::new(FontConfig::default(), &dir);

    let report = run(&config, &mut ctx).unwrap();
    assert_eq!(report.ratio(), "2/3");
    assert_eq!(
        report.outputs,
        vec![
            dir.join("out").join("committee_collage_1.png"),
            dir.join("out").join("committee_collage_2.png"),
        ]
    );

    let first = image::open(&report.outputs[0]).unwrap().to_rgba8();
    assert_eq!(first.dimensions(), (2 * 120 + 3 * 10, 140 + 2 * 10));
    // Headshot of the first person: cell origin (10, 10), centred 60 px wide.
    assert_eq!(first.get_pixel(10 + 30 + 30, 10 + 30).0, [200, 10, 10, 255]);

    let second = image::open(&report.outputs[1]).unwrap().to_rgba8();
    assert_eq!(second.dimensions(), (2 * 120 + 3 * 10, 140 + 2 * 10));
}
