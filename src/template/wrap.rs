/// Number of description lines a template provides.
pub const DESCRIPTION_LINES: usize = 3;

/// Maximum characters per description line.
pub const DESCRIPTION_LINE_CHARS: usize = 18;

/// Split free text into exactly `max_lines` lines of at most `max_chars`
/// characters each.
///
/// Words are packed greedily left to right; a word joins the current line
/// while `line + space + word` stays within `max_chars`. A single word longer
/// than `max_chars` is hard-split into `max_chars`-sized chunks, each chunk
/// consuming one line slot, with the short final chunk staying open for
/// further packing. Words that do not fit once `max_lines` lines are filled
/// are dropped. The result is padded with empty strings to exactly
/// `max_lines` entries.
///
/// Pure function of its input; lengths are counted in `char`s.
pub fn wrap_lines(text: &str, max_lines: usize, max_chars: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::with_capacity(max_lines);
    let mut current = String::new();
    let mut current_len = 0usize;

    if max_chars > 0 {
        for word in text.split_whitespace() {
            if lines.len() >= max_lines {
                break;
            }

            let word_len = word.chars().count();
            if word_len <= max_chars {
                if current_len == 0 {
                    current.push_str(word);
                    current_len = word_len;
                } else if current_len + 1 + word_len <= max_chars {
                    current.push(' ');
                    current.push_str(word);
                    current_len += 1 + word_len;
                } else {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                    if lines.len() >= max_lines {
                        break;
                    }
                    current.push_str(word);
                    current_len = word_len;
                }
                continue;
            }

            // Over-long word: flush the open line, then hard-split.
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            let mut rest = chars.as_slice();
            while rest.len() > max_chars && lines.len() < max_lines {
                lines.push(rest[..max_chars].iter().collect());
                rest = &rest[max_chars..];
            }
            if lines.len() < max_lines {
                current = rest.iter().collect();
                current_len = rest.len();
            } else {
                current.clear();
                current_len = 0;
            }
        }
    }

    if current_len > 0 && lines.len() < max_lines {
        lines.push(current);
    }
    while lines.len() < max_lines {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/template/wrap.rs"]
mod tests;
