use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::models::itinerary::Location;

const FALLBACK_NAME: &str = "Destination";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NavigationApp {
    Google,
    Naver,
    Kakao,
}

impl NavigationApp {
    pub const ALL: [NavigationApp; 3] = [
        NavigationApp::Google,
        NavigationApp::Naver,
        NavigationApp::Kakao,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            NavigationApp::Google => "Google Maps",
            NavigationApp::Naver => "Naver Map",
            NavigationApp::Kakao => "KakaoMap",
        }
    }
}

/// Walking directions to one destination in one map app. `app_url` is the
/// deep link to try first; `web_url` is the browser fallback.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NavigationLink {
    pub app: NavigationApp,
    pub name: &'static str,
    pub app_url: Option<String>,
    pub web_url: String,
}

pub fn directions(app: NavigationApp, destination: &Location, name: Option<&str>) -> NavigationLink {
    let lat = destination.latitude;
    let lng = destination.longitude;
    let label = name
        .or(destination.address.as_deref())
        .filter(|label| !label.trim().is_empty());

    let (app_url, web_url) = match app {
        NavigationApp::Google => {
            let place = encode_component(label.unwrap_or_default());
            (
                None,
                format!(
                    "https://www.google.com/maps/dir/?api=1&destination={lat},{lng}&destination_place_id={place}"
                ),
            )
        }
        NavigationApp::Naver => {
            let place = encode_component(label.unwrap_or(FALLBACK_NAME));
            (
                Some(format!(
                    "nmap://route/walk?dlat={lat}&dlng={lng}&dname={place}"
                )),
                format!(
                    "https://map.naver.com/v5/directions/-/-/-/walk?c={lng},{lat},15&dname={place}"
                ),
            )
        }
        NavigationApp::Kakao => {
            let place = encode_component(label.unwrap_or(FALLBACK_NAME));
            (
                Some(format!("kakaomap://route?ep={lat},{lng}&by=FOOT")),
                format!("https://map.kakao.com/link/to/{place},{lat},{lng}"),
            )
        }
    };

    NavigationLink {
        app,
        name: app.display_name(),
        app_url,
        web_url,
    }
}

pub fn all_directions(destination: &Location, name: Option<&str>) -> Vec<NavigationLink> {
    NavigationApp::ALL
        .iter()
        .map(|app| directions(*app, destination, name))
        .collect()
}

/// Percent-encodes everything except the URI-component unreserved set.
fn encode_component(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            other => {
                let _ = write!(encoded, "%{other:02X}");
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::{all_directions, directions, encode_component, NavigationApp};
    use crate::models::itinerary::Location;

    fn bridge() -> Location {
        Location {
            latitude: 15.8786,
            longitude: 108.3272,
            address: Some("Japanese Covered Bridge".to_string()),
        }
    }

    #[test]
    fn google_link_uses_web_directions() {
        let link = directions(NavigationApp::Google, &bridge(), None);

        assert!(link.app_url.is_none());
        assert_eq!(
            link.web_url,
            "https://www.google.com/maps/dir/?api=1&destination=15.8786,108.3272&destination_place_id=Japanese%20Covered%20Bridge"
        );
    }

    #[test]
    fn naver_and_kakao_offer_app_deep_links() {
        let naver = directions(NavigationApp::Naver, &bridge(), Some("Old Town"));
        assert_eq!(
            naver.app_url.as_deref(),
            Some("nmap://route/walk?dlat=15.8786&dlng=108.3272&dname=Old%20Town")
        );
        assert!(naver.web_url.contains("c=108.3272,15.8786,15"));

        let kakao = directions(NavigationApp::Kakao, &bridge(), Some("Old Town"));
        assert_eq!(
            kakao.app_url.as_deref(),
            Some("kakaomap://route?ep=15.8786,108.3272&by=FOOT")
        );
        assert_eq!(
            kakao.web_url,
            "https://map.kakao.com/link/to/Old%20Town,15.8786,108.3272"
        );
    }

    #[test]
    fn missing_name_falls_back() {
        let mut nameless = bridge();
        nameless.address = None;

        let kakao = directions(NavigationApp::Kakao, &nameless, None);
        assert!(kakao.web_url.starts_with("https://map.kakao.com/link/to/Destination,"));
        assert_eq!(all_directions(&nameless, None).len(), 3);
    }

    #[test]
    fn non_ascii_names_are_utf8_escaped() {
        assert_eq!(encode_component("Cầu"), "C%E1%BA%A7u");
        assert_eq!(encode_component("a&b=c"), "a%26b%3Dc");
    }
}
