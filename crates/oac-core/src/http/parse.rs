//! Parse HTTP response header lines collected from curl.

/// Status text and headers of the last response block in `lines`.
///
/// With redirects followed, curl reports one header block per hop; each
/// block starts with an `HTTP/` status line, so everything before the last
/// one is discarded.
pub(crate) fn parse_headers(lines: &[String]) -> (String, Vec<(String, String)>) {
    let mut status_text = String::new();
    let mut headers = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            headers.clear();
            // "HTTP/1.1 404 Not Found" -> "Not Found"; HTTP/2 sends no reason phrase.
            status_text = line
                .splitn(3, ' ')
                .nth(2)
                .unwrap_or("")
                .trim()
                .to_string();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    (status_text, headers)
}
