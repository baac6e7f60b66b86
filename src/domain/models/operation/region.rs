//! Deployment regions.

use serde::{Deserialize, Serialize};

use super::plan::RequestPlan;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "camelCase")]
pub enum RegionOp {
    List,
}

impl RegionOp {
    pub fn plan(&self) -> RequestPlan {
        match self {
            Self::List => RequestPlan::get("/regions"),
        }
    }
}
