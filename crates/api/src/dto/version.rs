use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct VersionResponse {
    pub version: String,
}
