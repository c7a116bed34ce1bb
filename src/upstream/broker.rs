//! NGSI-LD broker URL construction.
//!
//! Inbound paths arrive percent-encoded; entity identifiers are URNs
//! whose colons clients must encode to fit in one path segment
//! (`urn%3Angsi-ld%3ARoadSegment%3A1`). Each segment is decoded
//! individually and rejoined, so segment boundaries survive while the
//! URN inside a segment is restored.

use percent_encoding::percent_decode_str;

/// Split a raw (still percent-encoded) path tail on `/` and decode
/// each segment individually.
pub fn decode_segments(tail: &str) -> Vec<String> {
    tail.trim_start_matches('/')
        .split('/')
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
        .collect()
}

/// Build the upstream broker URL for a raw path tail and optional raw
/// query string. The query is appended unmodified.
pub fn broker_url(base: &str, tail: &str, query: Option<&str>) -> String {
    let path = decode_segments(tail).join("/");
    let mut url = format!("{}/{}", base.trim_end_matches('/'), path);
    if let Some(query) = query {
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://orion:1026/ngsi-ld/v1";

    #[test]
    fn decodes_urn_within_a_segment() {
        let url = broker_url(BASE, "entities/urn%3Angsi-ld%3ARoadSegment%3A1", None);
        assert_eq!(
            url,
            "http://orion:1026/ngsi-ld/v1/entities/urn:ngsi-ld:RoadSegment:1"
        );
    }

    #[test]
    fn preserves_segment_boundaries() {
        let segments = decode_segments("entities/urn%3Angsi-ld%3ARoadSegment%3A1/attrs/status");
        assert_eq!(
            segments,
            vec!["entities", "urn:ngsi-ld:RoadSegment:1", "attrs", "status"]
        );
    }

    #[test]
    fn appends_query_unmodified() {
        let url = broker_url(BASE, "entities", Some("type=RoadSegment&limit=100"));
        assert_eq!(
            url,
            "http://orion:1026/ngsi-ld/v1/entities?type=RoadSegment&limit=100"
        );
    }

    #[test]
    fn omits_empty_query() {
        let url = broker_url(BASE, "entities", Some(""));
        assert_eq!(url, "http://orion:1026/ngsi-ld/v1/entities");
    }

    #[test]
    fn tolerates_trailing_slash_on_base() {
        let url = broker_url("http://orion:1026/ngsi-ld/v1/", "types", None);
        assert_eq!(url, "http://orion:1026/ngsi-ld/v1/types");
    }

    #[test]
    fn plain_segments_pass_through() {
        assert_eq!(decode_segments("entities"), vec!["entities"]);
    }
}
