//! # QR Card-Link Service
//!
//! The membership card shows a QR code that encodes a link back to the card
//! view. Encoding is delegated to an external image endpoint (the link goes
//! in as a query parameter, a square PNG comes back); this module only builds
//! URLs. The decode side is a simulated stub: it pulls the member code back
//! out of a card link the way a scanner screen would.

use url::Url;

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Builds QR image URLs for membership cards.
#[derive(Debug, Clone)]
pub struct QrService {
    encoder: Url,
    card_base: Url,
    size: u32,
}

impl QrService {
    /// Creates the service from server configuration.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ApiError> {
        let encoder = Url::parse(&config.qr_encoder_url)
            .map_err(|e| ApiError::internal(format!("Invalid QR encoder URL: {e}")))?;
        let card_base = Url::parse(&config.card_base_url)
            .map_err(|e| ApiError::internal(format!("Invalid card base URL: {e}")))?;

        Ok(QrService {
            encoder,
            card_base,
            size: config.qr_size,
        })
    }

    /// The link a scanned card resolves to.
    pub fn card_link(&self, member_code: &str) -> Result<String, ApiError> {
        let mut link = self.card_base.clone();
        link.path_segments_mut()
            .map_err(|_| ApiError::internal("Card base URL cannot carry paths"))?
            .pop_if_empty()
            .extend(["api", "card", member_code]);
        Ok(link.to_string())
    }

    /// A square image URL encoding the card link.
    pub fn image_url(&self, member_code: &str) -> Result<String, ApiError> {
        let link = self.card_link(member_code)?;
        let mut image = self.encoder.clone();
        image
            .query_pairs_mut()
            .append_pair("size", &format!("{0}x{0}", self.size))
            .append_pair("data", &link);
        Ok(image.to_string())
    }

    /// Simulated scan: extracts the member code back out of a card link.
    ///
    /// Returns `None` for anything that is not one of our card links.
    pub fn decode_simulated(&self, scanned: &str) -> Option<String> {
        let url = Url::parse(scanned).ok()?;
        if url.host_str() != self.card_base.host_str() {
            return None;
        }
        let mut segments = url.path_segments()?;
        if (segments.next(), segments.next()) != (Some("api"), Some("card")) {
            return None;
        }
        segments
            .next()
            .filter(|code| !code.is_empty())
            .map(str::to_string)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> QrService {
        let config = ServerConfig {
            port: 8080,
            database_path: ":memory:".to_string(),
            qr_encoder_url: "https://api.qrserver.com/v1/create-qr-code/".to_string(),
            qr_size: 200,
            card_base_url: "http://localhost:8080".to_string(),
        };
        QrService::from_config(&config).unwrap()
    }

    #[test]
    fn test_card_link() {
        let link = service().card_link("MSC0042").unwrap();
        assert_eq!(link, "http://localhost:8080/api/card/MSC0042");
    }

    #[test]
    fn test_image_url_is_square_and_carries_link() {
        let url = service().image_url("MSC0042").unwrap();
        assert!(url.starts_with("https://api.qrserver.com/v1/create-qr-code/?"));
        assert!(url.contains("size=200x200"));
        // The card link rides along percent-encoded.
        assert!(url.contains("data=http%3A%2F%2Flocalhost%3A8080%2Fapi%2Fcard%2FMSC0042"));
    }

    #[test]
    fn test_decode_simulated_roundtrip() {
        let qr = service();
        let link = qr.card_link("MSC0042").unwrap();
        assert_eq!(qr.decode_simulated(&link), Some("MSC0042".to_string()));
    }

    #[test]
    fn test_decode_simulated_rejects_foreign_links() {
        let qr = service();
        assert_eq!(qr.decode_simulated("https://example.com/api/card/MSC0042"), None);
        assert_eq!(qr.decode_simulated("http://localhost:8080/other/MSC0042"), None);
        assert_eq!(qr.decode_simulated("not a url"), None);
    }
}
