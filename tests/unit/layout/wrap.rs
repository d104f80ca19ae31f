use super::*;

fn chars(s: &str) -> f32 {
    s.chars().count() as f32 * 10.0
}

#[test]
fn breaks_at_word_boundaries_within_budget() {
    let lines = wrap_text(
        "The Australian National University, Australia",
        200.0,
        chars,
    );
    assert_eq!(
        lines,
        vec!["The Australian", "National University,", "Australia"]
    );

    let lines = wrap_text("Workshop/Tutorial Chair", 400.0, chars);
    assert_eq!(lines, vec!["Workshop/Tutorial Chair"]);
}

#[test]
fn round_trips_words_and_respects_width() {
    let text = "  Data61,   CSIRO, Australia and a supercalifragilisticexpialidocious word  ";
    for budget in [50.0f32, 90.0, 150.0, 400.0, 10_000.0] {
        let lines = wrap_text(text, budget, chars);
        let rebuilt = lines.join(" ");
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rebuilt, original.join(" "));
        for line in &lines {
            assert!(
                chars(line) <= budget || !line.contains(' '),
                "line {line:?} exceeds {budget}"
            );
        }
    }
}

#[test]
fn overlong_word_gets_its_own_line() {
    let lines = wrap_text("a bbbbbbbbbbbb c", 50.0, chars);
    assert_eq!(lines, vec!["a", "bbbbbbbbbbbb", "c"]);
}

#[test]
fn empty_and_blank_input_produce_no_lines() {
    assert!(wrap_text("", 100.0, chars).is_empty());
    assert!(wrap_text(" \t\n ", 100.0, chars).is_empty());
}

#[test]
fn measure_errors_propagate() {
    let res: Result<Vec<String>, &str> = try_wrap_text("two words", 10.0, |_| Err("no font"));
    assert_eq!(res, Err("no font"));

    // A single word never needs measuring.
    let res: Result<Vec<String>, &str> = try_wrap_text("single", 10.0, |_| Err("no font"));
    assert_eq!(res, Ok(vec!["single".to_string()]));
}
