use serde::Deserialize;

/// Query string accepted by `GET /accounts`.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AccountListQuery {
    pub is_active: Option<bool>,
}
