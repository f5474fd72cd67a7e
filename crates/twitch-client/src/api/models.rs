use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct HelixPagination {
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChattersPaginatedResponse {
    pub data: Vec<Chatter>,
    #[serde(default)]
    pub pagination: Option<HelixPagination>,
    #[serde(default)]
    pub total: u64,
}

/// Chatter entry from GET /helix/chat/chatters.
///
/// `user_id` may be empty for roster sources that do not supply one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chatter {
    #[serde(default)]
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
}
