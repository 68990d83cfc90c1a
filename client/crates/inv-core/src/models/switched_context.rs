use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of a context switch: a re-issued credential scoped to the target tenant.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchedContext {
    pub token: String,
    pub tenant_id: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

// Token stays out of logs.
impl fmt::Debug for SwitchedContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchedContext")
            .field("token", &"<redacted>")
            .field("tenant_id", &self.tenant_id)
            .field("company_name", &self.company_name)
            .field("roles", &self.roles)
            .finish()
    }
}
