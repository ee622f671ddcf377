use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{models::Role, navigation::GuardDecision};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveQuery {
    pub path: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RouteDecision {
    pub path: String,
    pub required_role: Option<Role>,
    #[serde(flatten)]
    pub decision: GuardDecision,
}
