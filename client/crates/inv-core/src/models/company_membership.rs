use serde::{Deserialize, Serialize};

/// One company the signed-in user may operate in, as listed by "my companies".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyMembership {
    pub tenant_id: String,
    pub display_name: String,
    #[serde(default)]
    pub cnpj: Option<String>,
    #[serde(default)]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub profile_name: Option<String>,
}

impl CompanyMembership {
    pub fn new(tenant_id: &str, display_name: &str) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            display_name: display_name.to_string(),
            cnpj: None,
            profile_id: None,
            profile_name: None,
        }
    }

    /// Name of the role the user holds in this company, if the backend sent one.
    pub fn role_name(&self) -> Option<&str> {
        self.profile_name.as_deref()
    }
}
