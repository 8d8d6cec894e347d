/// Splits `value` into consecutive slices of at most `limit` chars.
///
/// An empty value yields a single empty slice. Slices always fall on
/// char boundaries.
pub(crate) fn split_by_chars(value: &str, limit: usize) -> Vec<&str> {
    debug_assert!(limit > 0);

    if value.is_empty() {
        return vec![""];
    }

    let mut chunks = Vec::with_capacity(value.len() / limit + 1);
    let mut rest = value;
    while !rest.is_empty() {
        let end = rest
            .char_indices()
            .nth(limit)
            .map_or(rest.len(), |(index, _)| index);
        let (chunk, tail) = rest.split_at(end);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}
