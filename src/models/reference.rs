//! Read-only reference lists fetched alongside each register: assets,
//! threats, and vulnerabilities for the filter dropdowns and form
//! selectors. These are fetched independently at view construction with
//! no ordering between them — consumers must render with any subset
//! still empty.

use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, decode_list};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub assets: Vec<ReferenceItem>,
    pub threats: Vec<ReferenceItem>,
    pub vulnerabilities: Vec<ReferenceItem>,
}

/// Fetch all three reference lists concurrently. The lists complete in
/// any order, and a failed one degrades to empty rather than blocking
/// the screen.
pub async fn load_reference_data(client: &ApiClient) -> ReferenceData {
    let (assets, threats, vulnerabilities) = tokio::join!(
        fetch_list(client, ASSETS_PATH),
        fetch_list(client, THREATS_PATH),
        fetch_list(client, VULNERABILITIES_PATH),
    );
    ReferenceData { assets, threats, vulnerabilities }
}

async fn fetch_list(client: &ApiClient, path: &str) -> Vec<ReferenceItem> {
    match client.get_json(path).await.and_then(decode_list) {
        Ok(payload) => payload.items,
        Err(e) => {
            log::warn!("reference list {path} unavailable: {e}");
            Vec::new()
        }
    }
}

/// Dropdown option labels, sorted case-insensitively.
pub fn option_labels(items: &[ReferenceItem]) -> Vec<String> {
    let mut labels: Vec<String> = items.iter().map(|i| i.name.clone()).collect();
    labels.sort_by_key(|l| l.to_lowercase());
    labels
}

pub const ASSETS_PATH: &str = "assets";
pub const THREATS_PATH: &str = "threats";
pub const VULNERABILITIES_PATH: &str = "vulnerabilities";
