use board_logging::{board_debug, board_warn};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use job_board_core::JobRecord;
use serde_json::Value;

use crate::{FailureKind, LoadError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFeed {
    pub jobs: Vec<JobRecord>,
    pub encoding_label: String,
    pub skipped_entries: usize,
}

/// Decode raw feed bytes and parse them as a JSON array of job records.
pub fn decode_feed(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedFeed, LoadError> {
    let (text, encoding) = decode_text(bytes, content_type);
    let document: Value = serde_json::from_str(&text)
        .map_err(|err| LoadError::new(FailureKind::MalformedJson, err.to_string()))?;

    let Value::Array(entries) = document else {
        return Err(LoadError::new(
            FailureKind::NotAnArray,
            "top-level value must be an array of jobs",
        ));
    };

    let mut jobs = Vec::with_capacity(entries.len());
    let mut skipped_entries = 0;
    for (position, entry) in entries.into_iter().enumerate() {
        match JobRecord::from_value(entry) {
            Some(job) => jobs.push(job),
            None => {
                board_warn!("Skipping feed entry {} (not a JSON object)", position);
                skipped_entries += 1;
            }
        }
    }

    Ok(DecodedFeed {
        jobs,
        encoding_label: encoding.name().to_string(),
        skipped_entries,
    })
}

/// BOM -> Content-Type charset -> strict UTF-8 -> chardetng guess.
fn decode_text(bytes: &[u8], content_type: Option<&str>) -> (String, &'static Encoding) {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }
    if let Some(encoding) = content_type
        .and_then(extract_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return decode_with(bytes, encoding);
    }
    if let Ok(text) = std::str::from_utf8(bytes) {
        return (text.to_string(), UTF_8);
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> (String, &'static Encoding) {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        board_debug!("Feed bytes were not clean {}; replaced bad sequences", used.name());
    }
    (text.into_owned(), used)
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"').to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_parameter_is_found_case_insensitively() {
        assert_eq!(
            extract_charset("application/json; Charset=\"ISO-8859-1\""),
            Some("ISO-8859-1".to_string())
        );
        assert_eq!(extract_charset("application/json"), None);
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(br#"[{"title":"A"}]"#);
        let feed = decode_feed(&bytes, None).unwrap();
        assert_eq!(feed.jobs[0].title, "A");
        assert_eq!(feed.encoding_label, "UTF-8");
    }

    #[test]
    fn latin1_header_is_honoured() {
        let bytes = b"[{\"location\":\"Z\xfcrich\"}]";
        let feed = decode_feed(bytes, Some("application/json; charset=iso-8859-1")).unwrap();
        assert_eq!(feed.jobs[0].location, "Zürich");
    }
}
