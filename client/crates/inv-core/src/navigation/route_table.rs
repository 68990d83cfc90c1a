use crate::Route;

pub const DEFAULT_SIGN_IN_PATH: &str = "/login";
pub const DEFAULT_COMPANY_CREATION_PATH: &str = "/companies/new";
pub const DEFAULT_COMPANY_SELECTION_PATH: &str = "/companies/select";
pub const DEFAULT_DASHBOARD_PATH: &str = "/dashboard";

/// Maps each [`Route`] to the path the router understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    pub sign_in: String,
    pub company_creation: String,
    pub company_selection: String,
    pub dashboard: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            sign_in: DEFAULT_SIGN_IN_PATH.to_string(),
            company_creation: DEFAULT_COMPANY_CREATION_PATH.to_string(),
            company_selection: DEFAULT_COMPANY_SELECTION_PATH.to_string(),
            dashboard: DEFAULT_DASHBOARD_PATH.to_string(),
        }
    }
}

impl RouteTable {
    pub fn path(&self, route: Route) -> &str {
        match route {
            Route::SignIn => &self.sign_in,
            Route::CompanyCreation => &self.company_creation,
            Route::CompanySelection => &self.company_selection,
            Route::Dashboard => &self.dashboard,
        }
    }

    /// Reverse lookup, used by shells that receive raw paths from the router.
    pub fn route_for(&self, path: &str) -> Option<Route> {
        let path = path.trim_end_matches('/');
        Route::ALL
            .into_iter()
            .find(|route| self.path(*route).trim_end_matches('/') == path)
    }
}
