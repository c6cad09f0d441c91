//! Regional station directory scraped from the NWS `current_obs` seek page.

use scraper::{Html, Node};

use crate::types::StationEntry;

/// Query marker identifying a station lookup link.
pub const STATION_LINK_MARKER: &str = "display.php?stid=";

/// Station id carried by a lookup link, if `href` is one.
pub fn station_id_from_href(href: &str) -> Option<&str> {
    let (_, rest) = href.split_once(STATION_LINK_MARKER)?;
    let station_id = rest.split('&').next().unwrap_or_default().trim();
    (!station_id.is_empty()).then_some(station_id)
}

/// Extract `(station id, city)` pairs in document order.
///
/// Ids come from anchors whose `href` contains [`STATION_LINK_MARKER`];
/// each city is the first text node following such an anchor. The two
/// lists are paired by position, so a page that breaks that layout yields
/// mismatched pairs rather than an error.
pub fn parse_station_directory(html: &str) -> Vec<StationEntry> {
    let document = Html::parse_document(html);

    let mut station_ids = Vec::new();
    let mut cities = Vec::new();
    let mut awaiting_city = false;

    for node in document.tree.root().descendants() {
        match node.value() {
            Node::Element(element) if element.name() == "a" => {
                if let Some(id) = element.attr("href").and_then(station_id_from_href) {
                    station_ids.push(id.to_string());
                    awaiting_city = true;
                }
            }
            Node::Text(text) if awaiting_city => {
                cities.push(text.trim().to_string());
                awaiting_city = false;
            }
            _ => {}
        }
    }

    if station_ids.len() != cities.len() {
        tracing::warn!(
            "Station directory has {} ids but {} city names",
            station_ids.len(),
            cities.len()
        );
    }

    station_ids
        .into_iter()
        .zip(cities)
        .map(|(station_id, city)| StationEntry { station_id, city })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEEK_PAGE: &str = r#"<html><head><title>XML Feeds of Current Weather Conditions</title></head>
<body>
<h1>Select a station</h1>
<a href="/xml/">Back</a>
<table>
<tr><td><a href="display.php?stid=KBUR">Burbank-Glendale-Pasadena Airport</a></td></tr>
<tr><td><a href="display.php?stid=KLAX">Los Angeles International Airport</a></td></tr>
<tr><td><a href="display.php?stid=KSFO&amp;x=1">San Francisco International Airport</a></td></tr>
</table>
</body></html>"#;

    #[test]
    fn test_parse_station_directory() {
        let stations = parse_station_directory(SEEK_PAGE);

        assert_eq!(
            stations,
            vec![
                StationEntry {
                    station_id: "KBUR".to_string(),
                    city: "Burbank-Glendale-Pasadena Airport".to_string(),
                },
                StationEntry {
                    station_id: "KLAX".to_string(),
                    city: "Los Angeles International Airport".to_string(),
                },
                StationEntry {
                    station_id: "KSFO".to_string(),
                    city: "San Francisco International Airport".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_empty_match_page() {
        let html = "<html><body><p>No stations found.</p><a href=\"/\">Home</a></body></html>";
        assert!(parse_station_directory(html).is_empty());
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_station_directory("").is_empty());
    }

    #[test]
    fn test_city_is_next_text_node() {
        let html = r#"<p><a href="display.php?stid=KPDX"></a> Portland <b>OR</b></p>"#;
        let stations = parse_station_directory(html);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].station_id, "KPDX");
        assert_eq!(stations[0].city, "Portland");
    }

    #[test]
    fn test_trailing_anchor_without_text_is_dropped() {
        let html = r#"<a href="display.php?stid=KSEA">Seattle</a><a href="display.php?stid=KBFI"></a>"#;
        let stations = parse_station_directory(html);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].station_id, "KSEA");
    }

    #[test]
    fn test_station_id_from_href() {
        assert_eq!(station_id_from_href("display.php?stid=KLAX"), Some("KLAX"));
        assert_eq!(
            station_id_from_href(
                "https://w1.weather.gov/xml/current_obs/display.php?stid=KSEA&y=2"
            ),
            Some("KSEA")
        );
        assert_eq!(station_id_from_href("display.php?stid="), None);
        assert_eq!(station_id_from_href("/xml/current_obs/seek.php"), None);
    }
}
