/// Collapses a markup text child into the string that becomes a call
/// argument, or `None` when the text is whitespace-only and disappears.
///
/// The whitespace policy: the text is split into lines; tabs count as
/// spaces; every line but the first loses its leading indentation and every
/// line but the last loses its trailing spaces; the surviving lines are
/// joined with a single space.
pub fn clean_jsx_text(value: &str) -> Option<String> {
    let normalized = value.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.split(['\n', '\r']).collect();

    let mut last_non_empty = 0;
    for (idx, line) in lines.iter().enumerate() {
        if line.chars().any(|c| c != ' ' && c != '\t') {
            last_non_empty = idx;
        }
    }

    let mut out = String::new();
    for (idx, line) in lines.iter().enumerate() {
        let is_first = idx == 0;
        let is_last = idx == lines.len() - 1;
        let is_last_non_empty = idx == last_non_empty;

        let line = line.replace('\t', " ");
        let line = if is_first { &line[..] } else { line.trim_start_matches(' ') };
        let line = if is_last { line } else { line.trim_end_matches(' ') };

        if !line.is_empty() {
            out.push_str(line);
            if !is_last_non_empty {
                out.push(' ');
            }
        }
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}
