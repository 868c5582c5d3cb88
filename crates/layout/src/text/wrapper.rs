use super::TextMeasurer;

/// Breaks `text` into lines no wider than `max_width`, greedily, at spaces.
///
/// Explicit newlines always break. A word wider than `max_width` gets a line
/// of its own rather than being split. Empty text yields one empty line so a
/// paragraph always occupies at least one line.
pub fn break_lines(
    text: &str,
    max_width: f32,
    font_size: f32,
    measurer: &dyn TextMeasurer,
) -> Vec<String> {
    let mut lines = Vec::new();
    let space_width = measurer.text_width(" ", font_size);

    for hard_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in hard_line.split_whitespace() {
            let word_width = measurer.text_width(word, font_size);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
                continue;
            }
            if current_width + space_width + word_width > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_width + word_width;
            }
        }
        lines.push(current);
    }

    lines
}
