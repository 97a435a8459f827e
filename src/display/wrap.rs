//! Fitting text onto a narrow surface.

const ELLIPSIS: char = '…';

/// Break `text` into one line, or two when it is wider than `width`.
///
/// The split is made at the whitespace nearest the middle of the text for
/// which both halves fit. Failing that, the split nearest the middle is
/// used and each half is shortened with an ellipsis. A single word that is
/// too wide is cut at the width.
pub fn wrap_two_lines<M>(text: &str, width: usize, measure: M) -> Vec<String>
where
    M: Fn(&str) -> usize,
{
    let text = text.trim();
    let total = measure(text);
    if total <= width {
        return vec![text.to_string()];
    }

    let half = total / 2;
    let mut best_fitting: Option<(usize, &str, &str)> = None;
    let mut best_any: Option<(usize, &str, &str)> = None;

    for (i, c) in text.char_indices().filter(|(_, c)| c.is_whitespace()) {
        let left = text[..i].trim_end();
        let right = text[i + c.len_utf8()..].trim_start();
        if left.is_empty() || right.is_empty() {
            continue;
        }

        let distance = measure(left).abs_diff(half);
        let candidate = (distance, left, right);
        if best_any.is_none_or(|(d, _, _)| distance < d) {
            best_any = Some(candidate);
        }
        if measure(left) <= width
            && measure(right) <= width
            && best_fitting.is_none_or(|(d, _, _)| distance < d)
        {
            best_fitting = Some(candidate);
        }
    }

    if let Some((_, left, right)) = best_fitting {
        return vec![left.to_string(), right.to_string()];
    }
    if let Some((_, left, right)) = best_any {
        return vec![
            truncate(left, width, &measure),
            truncate(right, width, &measure),
        ];
    }

    let mut head = String::new();
    let mut rest = text;
    for (i, c) in text.char_indices() {
        head.push(c);
        if measure(&head) > width {
            head.pop();
            rest = &text[i..];
            break;
        }
    }
    vec![head, truncate(rest, width, &measure)]
}

/// Shorten `text` to `width`, ending it with an ellipsis when cut.
pub fn truncate<M>(text: &str, width: usize, measure: M) -> String
where
    M: Fn(&str) -> usize,
{
    if measure(text) <= width {
        return text.to_string();
    }

    let mut out = String::new();
    for c in text.chars() {
        out.push(c);
        out.push(ELLIPSIS);
        let fits = measure(&out) <= width;
        out.pop();
        if !fits {
            out.pop();
            break;
        }
    }
    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out.push(ELLIPSIS);
    out
}
