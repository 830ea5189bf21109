use percent_encoding::percent_decode_str;
use sha2::{Digest, Sha256};
use url::Url;

/// Windows-safe, deterministic download filename:
/// `{sanitized_basename}--{short_hash(url)}[.ext]`.
///
/// The hash keeps repeated downloads of differently-addressed files from
/// colliding on a shared basename like `export.csv`.
pub fn download_filename(url: &Url) -> String {
    // Path segments arrive percent-encoded; decode before sanitizing.
    let basename = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
        .unwrap_or_else(|| "download".to_string());

    let (stem, extension) = match basename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && is_clean_extension(ext) => (stem, Some(ext)),
        _ => (basename.as_str(), None),
    };

    let sanitized = sanitize_stem(stem);
    let hash = short_hash(url.as_str());
    match extension {
        Some(ext) => format!("{sanitized}--{hash}.{ext}"),
        None => format!("{sanitized}--{hash}"),
    }
}

fn sanitize_stem(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.chars() {
        let mapped = if is_forbidden(c) { '_' } else { c };
        if mapped == '_' && prev_underscore {
            continue;
        }
        prev_underscore = mapped == '_';
        cleaned.push(mapped);
    }

    let mut stem = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    if stem.is_empty() {
        stem = "download".to_string();
    }
    if stem.len() > 64 {
        let mut cut = 64;
        while !stem.is_char_boundary(cut) {
            cut -= 1;
        }
        stem.truncate(cut);
    }
    if is_reserved_windows_name(&stem) {
        stem.push('_');
    }
    stem
}

fn is_clean_extension(ext: &str) -> bool {
    !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric())
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

fn short_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
