//! Location Endpoints
//!
//! The district/taluka/village hierarchy backing the cascading selects.

use serde::Deserialize;

use super::{encode_query, get_list, post_json};
use crate::models::{District, Taluka, Village};

pub async fn list_districts() -> Result<Vec<District>, String> {
    get_list("/api/location/districts/").await
}

pub async fn list_talukas(district_id: u32) -> Result<Vec<Taluka>, String> {
    let query = encode_query(&[("district", district_id.to_string())]);
    get_list(&format!("/api/location/talukas/?{query}")).await
}

pub async fn list_villages(taluka_id: u32) -> Result<Vec<Village>, String> {
    let query = encode_query(&[("taluka", taluka_id.to_string())]);
    get_list(&format!("/api/location/villages/?{query}")).await
}

#[derive(Deserialize)]
struct VillageReply {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    village: Option<Village>,
}

/// Create a village under a taluka and return the stored record, so the
/// caller can append and select it without reloading the cascade.
pub async fn add_village(taluka_id: u32, name: &str) -> Result<Village, String> {
    let reply: VillageReply = post_json(
        "/api/location/villages/add/",
        &[
            ("taluka", taluka_id.to_string()),
            ("name", name.trim().to_string()),
        ],
    )
    .await?;
    if reply.success {
        reply
            .village
            .ok_or_else(|| "Server did not return the new village".to_string())
    } else {
        Err(reply
            .message
            .unwrap_or_else(|| "Could not add the village".to_string()))
    }
}
