//! Share links: a diagram carried in a URL query parameter.
//!
//! The diagram JSON is percent-encoded once on its own, with the character set
//! of JavaScript's `encodeURIComponent`, and then stored as the `data` query
//! parameter, which encodes it a second time.

use super::diagram::Diagram;
use super::{StorageError, StorageResult};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use url::Url;

/// Query parameter holding the diagram.
pub const DATA_PARAM: &str = "data";

/// Characters escaped by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Store `diagram` in the `data` parameter of `url`, keeping other parameters.
pub fn set_data_in_url(url: &mut Url, diagram: &Diagram) -> StorageResult<()> {
    let json = diagram
        .to_json()
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    let encoded = utf8_percent_encode(&json, URI_COMPONENT).to_string();

    let others: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != DATA_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    for (k, v) in &others {
        pairs.append_pair(k, v);
    }
    pairs.append_pair(DATA_PARAM, &encoded);
    Ok(())
}

/// Read the diagram from the `data` parameter of `url`.
///
/// A missing or unreadable parameter means there is no diagram to restore.
pub fn get_data_in_url(url: &Url) -> Option<Diagram> {
    let (_, raw) = url.query_pairs().find(|(k, _)| k == DATA_PARAM)?;
    let json = decode_component(&raw)?;
    match Diagram::from_json(&json) {
        Ok(diagram) => Some(diagram),
        Err(e) => {
            log::warn!("Ignoring unreadable diagram in URL: {}", e);
            None
        }
    }
}

/// Inverse of the inner encoding. A `+` stays a `+`.
fn decode_component(encoded: &str) -> Option<String> {
    match percent_decode_str(encoded).decode_utf8() {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(e) => {
            log::warn!("Ignoring diagram in URL with invalid UTF-8: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeType;
    use crate::storage::DiagramEntry;
    use kurbo::Point;

    fn sample() -> Diagram {
        Diagram::new(vec![
            DiagramEntry {
                pid_shape: ShapeType::new("Gate valve", "M 0 0 L 20 10", 20.0, 10.0),
                position: Point::new(100.0, 100.0),
            },
            DiagramEntry {
                pid_shape: ShapeType::new("Pump & motor", "", 30.0, 30.0),
                position: Point::new(-4.5, 300.0),
            },
        ])
    }

    #[test]
    fn test_link_roundtrip() {
        let mut url = Url::parse("https://example.org/editor/?lang=en").unwrap();
        set_data_in_url(&mut url, &sample()).unwrap();

        assert_eq!(get_data_in_url(&url), Some(sample()));
        assert!(url.query_pairs().any(|(k, v)| k == "lang" && v == "en"));
    }

    #[test]
    fn test_inner_layer_matches_uri_component() {
        let mut url = Url::parse("https://example.org/").unwrap();
        set_data_in_url(&mut url, &sample()).unwrap();

        let (_, raw) = url.query_pairs().find(|(k, _)| k == DATA_PARAM).unwrap();
        assert!(raw.contains("Gate%20valve"));
        assert!(raw.contains("Pump%20%26%20motor"));
        assert!(!raw.contains('+'));

        // Decoding that leaves '+' alone, like decodeURIComponent.
        let json = percent_decode_str(&raw).decode_utf8().unwrap();
        assert!(json.contains(r#""name":"Gate valve""#));
        assert_eq!(Diagram::from_json(&json).unwrap(), sample());
    }

    #[test]
    fn test_plus_in_name_survives() {
        let diagram = Diagram::new(vec![DiagramEntry {
            pid_shape: ShapeType::new("Valve+Actuator", "", 10.0, 10.0),
            position: Point::new(1.0, 2.0),
        }]);
        let mut url = Url::parse("https://example.org/").unwrap();
        set_data_in_url(&mut url, &diagram).unwrap();
        assert_eq!(get_data_in_url(&url), Some(diagram));
    }

    #[test]
    fn test_replaces_existing_data() {
        let mut url = Url::parse("https://example.org/?data=old").unwrap();
        set_data_in_url(&mut url, &Diagram::default()).unwrap();
        let count = url.query_pairs().filter(|(k, _)| k == DATA_PARAM).count();
        assert_eq!(count, 1);
        assert_eq!(get_data_in_url(&url), Some(Diagram::default()));
    }

    #[test]
    fn test_reads_browser_encoded_link() {
        // encodeURIComponent('[]') stored through URLSearchParams.
        let url = Url::parse("https://example.org/?data=%255B%255D").unwrap();
        assert_eq!(get_data_in_url(&url), Some(Diagram::default()));
    }

    #[test]
    fn test_missing_or_garbage() {
        let url = Url::parse("https://example.org/").unwrap();
        assert_eq!(get_data_in_url(&url), None);

        let url = Url::parse("https://example.org/?data=%257Bbroken").unwrap();
        assert_eq!(get_data_in_url(&url), None);
    }
}
