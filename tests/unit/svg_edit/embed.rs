use super::*;

const PLACEMENT: ImagePlacement = ImagePlacement::new(0.0, 0.0, 200.0, 80.0);

#[test]
fn replaces_children_of_target_only() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <g id="wordmark" transform="translate(70, 0)">
    <polygon points="0,40 15,10"/>
    <text>2025</text>
  </g>
  <g id="other"><rect width="1" height="1"/></g>
</svg>"#;
    let out = embed_png_in_element(svg, "wordmark", b"\x89PNG", &PLACEMENT).unwrap();

    assert!(out.contains(
        r#"<g id="wordmark" transform="translate(70, 0)"><image href="data:image/png;base64,iVBORw==" x="0" y="0" width="200" height="80" preserveAspectRatio="xMidYMid meet"/></g>"#
    ));
    assert!(out.contains(r#"<g id="other"><rect width="1" height="1"/></g>"#));
    assert!(!out.contains("polygon"));
    roxmltree::Document::parse(&out).unwrap();
}

#[test]
fn expands_empty_element_tags() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="slot" /></svg>"#;
    let out = embed_png_in_element(svg, "slot", b"abc", &PLACEMENT).unwrap();
    assert_eq!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="slot"><image href="data:image/png;base64,YWJj" x="0" y="0" width="200" height="80" preserveAspectRatio="xMidYMid meet"/></g></svg>"#
    );
}

#[test]
fn unknown_id_is_reported() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="a"/></svg>"#;
    let err = embed_png_in_element(svg, "missing", b"", &PLACEMENT).unwrap_err();
    assert!(err.to_string().contains("missing"));
}
