use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/purchases`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPurchaseRequest {
    pub user_id: String,
    pub email_id: String,
    pub product_name: String,
    pub product_url: String,
    pub scheduled_time: DateTime<Utc>,
    pub timezone: String,
}

/// A purchase record as the backend returns it: server fields plus an echo of
/// the request. Fields the backend may omit deserialize leniently.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPurchase {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub variant: Option<String>,
    pub product_name: String,
    pub product_url: String,
    pub scheduled_time: DateTime<Utc>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `GET /api/purchases/user/{userId}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseList {
    pub purchases: Vec<ScheduledPurchase>,
    pub count: usize,
}

/// Client for the local purchase-scheduling REST API. Timeouts and retries
/// are left to the HTTP client defaults.
pub struct PurchaseClient {
    base_url: String,
    http: Client,
}

impl PurchaseClient {
    pub fn new(base_url: &str) -> Result<Self, String> {
        let http = Client::builder()
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Schedule a purchase. Any 2xx with a parseable body is success.
    pub async fn schedule(
        &self,
        req: &ScheduledPurchaseRequest,
    ) -> Result<ScheduledPurchase, String> {
        let url = format!("{}/api/purchases", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(|e| format!("Purchase request failed: {}", e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(format!("Purchase API error {}: {}", status, text));
        }

        resp.json::<ScheduledPurchase>()
            .await
            .map_err(|e| format!("Failed to parse purchase response: {}", e))
    }

    /// All purchases scheduled by a user.
    pub async fn list_for_user(&self, user_id: &str) -> Result<PurchaseList, String> {
        let url = format!("{}/api/purchases/user/{}", self.base_url, user_id);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Purchase list request failed: {}", e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(format!("Purchase API error {}: {}", status, text));
        }

        resp.json::<PurchaseList>()
            .await
            .map_err(|e| format!("Failed to parse purchase list: {}", e))
    }

    /// Cancel a scheduled purchase; the response body is ignored on success.
    pub async fn cancel(&self, id: &str) -> Result<(), String> {
        let url = format!("{}/api/purchases/{}/cancel", self.base_url, id);
        let resp = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(|e| format!("Cancel request failed: {}", e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(format!("Purchase API error {}: {}", status, text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn request_serializes_with_wire_field_names() {
        let req = ScheduledPurchaseRequest {
            user_id: "u-1".to_string(),
            email_id: "e-1".to_string(),
            product_name: "Widget".to_string(),
            product_url: "https://example.com/p".to_string(),
            scheduled_time: Utc.with_ymd_and_hms(2025, 10, 31, 17, 0, 0).unwrap(),
            timezone: "UTC".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["userId"], "u-1");
        assert_eq!(json["emailId"], "e-1");
        assert_eq!(json["productName"], "Widget");
        assert_eq!(json["productUrl"], "https://example.com/p");
        assert_eq!(json["scheduledTime"], "2025-10-31T17:00:00Z");
        assert_eq!(json["timezone"], "UTC");
    }

    #[test]
    fn response_tolerates_missing_optional_fields() {
        let body = r#"{
            "id": "p-42",
            "status": "scheduled",
            "productName": "Widget",
            "productUrl": "https://example.com/p",
            "scheduledTime": "2025-10-31T17:00:00Z",
            "createdAt": "2025-10-07T12:00:00Z",
            "updatedAt": "2025-10-07T12:00:00Z"
        }"#;
        let purchase: ScheduledPurchase = serde_json::from_str(body).unwrap();
        assert_eq!(purchase.id, "p-42");
        assert_eq!(purchase.variant, None);
        assert_eq!(purchase.timezone, None);
    }

    #[test]
    fn list_body_parses() {
        let body = r#"{"purchases": [], "count": 0}"#;
        let list: PurchaseList = serde_json::from_str(body).unwrap();
        assert_eq!(list.count, 0);
        assert!(list.purchases.is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = PurchaseClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
