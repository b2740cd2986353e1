//! Front-matter handling for post body documents.

const DELIMITER: &str = "---";

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Split a document into its leading `---` block (without delimiters) and the
/// remaining body. Documents without a complete leading block have no front
/// matter.
pub fn split_front_matter(text: &str) -> (Option<&str>, &str) {
    let Some(first_end) = text.find('\n') else {
        return (None, text);
    };
    if !is_delimiter(&text[..first_end]) {
        return (None, text);
    }

    let block_start = first_end + 1;
    let mut offset = block_start;
    for line in text[block_start..].split_inclusive('\n') {
        let line_end = offset + line.len();
        if is_delimiter(line.trim_end_matches('\n')) {
            let front_matter = &text[block_start..offset];
            return (Some(front_matter), &text[line_end..]);
        }
        offset = line_end;
    }

    (None, text)
}

/// Remove everything up to and including the closing `---` of a leading
/// front-matter block.
pub fn strip_front_matter(text: &str) -> &str {
    split_front_matter(text).1
}
