/// Prefix every line after the first with `indent`.
pub fn reindent(body: &str, indent: &str) -> String {
    let mut out = String::with_capacity(body.len());
    for (i, line) in body.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(indent);
        }
        out.push_str(line);
    }
    out
}

/// Snippet lookup: the name starts with the typed query, or the query starts with the name.
pub fn matches(name: &str, query: &str) -> bool {
    let name = name.to_lowercase();
    let query = query.to_lowercase();
    name.starts_with(&query) || query.starts_with(&name)
}
