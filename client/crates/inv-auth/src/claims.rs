use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried by the session credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user_id)
    pub sub: String,
    /// Tenant the credential was issued for, absent before a company is chosen
    #[serde(default, alias = "tenantId")]
    pub tenant_id: Option<String>,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    #[serde(default)]
    pub iat: Option<i64>,
    /// Roles held in `tenant_id`; order carries no meaning
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Claims {
    /// Expired unless `exp` is strictly after `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
