/// Minimal multipart/form-data reader for the upload form.

/// One part of a multipart body.
#[derive(Debug, PartialEq)]
pub struct FormPart<'a> {
    pub name: Option<String>,
    /// Present only on file inputs (may be empty when nothing was picked).
    pub filename: Option<String>,
    pub data: &'a [u8],
}

impl FormPart<'_> {
    pub fn is_file(&self) -> bool {
        self.filename.is_some()
    }
}

/// Returns the index of the first occurrence of `needle` in `haystack`.
pub fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Extracts the boundary token from a Content-Type header value like
/// `multipart/form-data; boundary=----WebKitFormBoundaryXXX`.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    if !content_type.trim_start().starts_with("multipart/form-data") {
        return None;
    }
    content_type
        .split(';')
        .map(|s| s.trim())
        .find_map(|s| s.strip_prefix("boundary="))
        .map(|b| b.trim_matches('"').to_owned())
        .filter(|b| !b.is_empty())
}

/// Splits a body into its parts. The preamble, the closing `--` marker and
/// parts without a header block are skipped.
pub fn parse_parts<'a>(body: &'a [u8], boundary: &str) -> Vec<FormPart<'a>> {
    let delimiter = format!("--{}", boundary);
    let delim = delimiter.as_bytes();
    let sep: &[u8] = b"\r\n\r\n";

    let mut parts = Vec::new();
    let mut rest = match find_subsequence(body, delim) {
        Some(pos) => &body[pos + delim.len()..],
        None => return parts,
    };

    while !rest.starts_with(b"--") {
        let end = find_subsequence(rest, delim).unwrap_or(rest.len());
        let chunk = &rest[..end];

        if let Some(sep_pos) = find_subsequence(chunk, sep) {
            let headers = String::from_utf8_lossy(&chunk[..sep_pos]);
            let raw = &chunk[sep_pos + sep.len()..];
            let data = raw.strip_suffix(b"\r\n").unwrap_or(raw);
            let (name, filename) = parse_disposition(&headers);
            parts.push(FormPart { name, filename, data });
        }

        if end >= rest.len() {
            break;
        }
        rest = &rest[end + delim.len()..];
    }
    parts
}

/// Value of the named text (non-file) field.
pub fn text_field(parts: &[FormPart<'_>], name: &str) -> Option<String> {
    parts
        .iter()
        .find(|p| !p.is_file() && p.name.as_deref() == Some(name))
        .and_then(|p| String::from_utf8(p.data.to_vec()).ok())
}

/// The named file field, if it carries any bytes.
pub fn file_field<'p, 'a>(parts: &'p [FormPart<'a>], name: &str) -> Option<&'p FormPart<'a>> {
    parts
        .iter()
        .find(|p| p.is_file() && p.name.as_deref() == Some(name) && !p.data.is_empty())
}

/// Reads `name` and `filename` from the Content-Disposition header.
fn parse_disposition(headers: &str) -> (Option<String>, Option<String>) {
    let Some(line) = headers
        .lines()
        .find(|l| l.to_ascii_lowercase().starts_with("content-disposition:"))
    else {
        return (None, None);
    };

    let mut name = None;
    let mut filename = None;
    for param in line.split(';').skip(1) {
        let Some((key, value)) = param.trim().split_once('=') else { continue };
        let value = value.trim().trim_matches('"').to_owned();
        match key.trim().to_ascii_lowercase().as_str() {
            "name" => name = Some(value),
            "filename" => filename = Some(value),
            _ => {}
        }
    }
    (name, filename)
}
