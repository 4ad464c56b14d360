use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Debug, ToSchema)]
pub struct CreateAccountRequest {
    pub email: String,
    pub password: String,
}

/// Acknowledgement that the submitted input was well-formed. Nothing is
/// stored anywhere; this is the whole "account".
#[derive(Debug, Serialize, PartialEq, ToSchema)]
pub struct AccountCreated {
    pub message: String,
    pub email: String,
    #[serde(rename = "pathSegment", skip_serializing_if = "Option::is_none")]
    pub path_segment: Option<String>,
}
