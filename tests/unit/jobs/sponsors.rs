use super::*;
use crate::assets::fonts::FontResolver;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_sponsors").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn have_bold_font() -> bool {
    FontResolver::new(FontConfig::default(), "target")
        .resolve(FontWeight::Bold)
        .is_ok()
}

#[test]
fn config_defaults_match_collage_constants() {
    let config: SponsorConfig = serde_json::from_str(
        r#"{ "tiers": [{ "name": "Gold", "columns": 2, "logos": [], "output": "gold.png" }] }"#,
    )
    .unwrap();
    assert_eq!(
        config.combined_output,
        Some(PathBuf::from("sponsors_all_collage.png"))
    );
    assert_eq!(config.layout.cell, Size::new(420, 260));
    assert_eq!(config.layout.padding, 28);
    assert_eq!(config.layout.logo_margin, 10);

    let skip: SponsorConfig =
        serde_json::from_str(r#"{ "tiers": [], "combined_output": null }"#).unwrap();
    assert_eq!(skip.combined_output, None);
}

#[test]
fn writes_each_tier_and_the_combined_wall() {
    if !have_bold_font() {
        eprintln!("skipping: no system bold font");
        return;
    }
    let dir = scratch_dir("walls");
    std::fs::write(
        dir.join("wide.svg"),
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="80" height="20"><rect width="80" height="20" fill="#00ff00"/></svg>"##,
    )
    .unwrap();

    let layout = SponsorLayout {
        cell: Size::new(40, 20),
        padding: 4,
        logo_margin: 2,
        title_size: 10.0,
        label_size: 8.0,
        label_gap: 2,
        ..Default::default()
    };
    let config = SponsorConfig {
        tiers: vec![
            Tier {
                name: "Gold".to_string(),
                columns: 2,
                logos: vec![
                    PathBuf::from("wide.svg"),
                    PathBuf::from("wide.svg"),
                    PathBuf::from("gone.png"),
                ],
                output: PathBuf::from("gold.png"),
            },
            Tier {
                name: "Silver".to_string(),
                columns: 3,
                logos: vec![PathBuf::from("wide.svg")],
                output: PathBuf::from("silver.png"),
            },
        ],
        combined_output: Some(PathBuf::from("all.png")),
        layout,
        fonts: FontConfig::default(),
    };
    let mut ctx = JobContext::new(FontConfig::default(), &dir);

    let report = run(&config, &mut ctx).unwrap();
    // Logos are counted once even though they appear on two canvases.
    assert_eq!(report.ratio(), "3/4");
    assert_eq!(
        report.outputs,
        vec![dir.join("gold.png"), dir.join("silver.png"), dir.join("all.png")]
    );

    let gold = image::open(dir.join("gold.png")).unwrap().to_rgba8();
    // Header band 10 + 2, two rows of 20, padding 4 around and between.
    assert_eq!(gold.dimensions(), (2 * 40 + 3 * 4, 12 + 2 * 20 + 3 * 4));
    // First logo cell origin (4, 16); the 80x20 logo is contained into 36x16 -> 36x9.
    assert_eq!(gold.get_pixel(4 + 20, 16 + 10).0, [0, 255, 0, 255]);

    let placed = layout_tiers(&[(3, 2), (1, 3)], Size::new(40, 20), 4, 10).unwrap();
    let all = image::open(dir.join("all.png")).unwrap().to_rgba8();
    assert_eq!(all.dimensions(), (placed.canvas.width, placed.canvas.height));
}
