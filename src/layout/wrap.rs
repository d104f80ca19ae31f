use std::convert::Infallible;

/// Greedy word wrap against a pixel budget.
///
/// Words are whitespace separated and kept in order; a line grows while
/// `measure(line + " " + word) <= max_width`. A word wider than the budget on its own gets a
/// line to itself and is never split.
pub fn wrap_text(text: &str, max_width: f32, mut measure: impl FnMut(&str) -> f32) -> Vec<String> {
    match try_wrap_text(text, max_width, |s| Ok::<_, Infallible>(measure(s))) {
        Ok(lines) => lines,
        Err(never) => match never {},
    }
}

/// [`wrap_text`] with a fallible measure (e.g. shaping that can fail on bad font data).
pub fn try_wrap_text<E>(
    text: &str,
    max_width: f32,
    mut measure: impl FnMut(&str) -> Result<f32, E>,
) -> Result<Vec<String>, E> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let trial = format!("{current} {word}");
        if measure(&trial)? <= max_width {
            current = trial;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    Ok(lines)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
