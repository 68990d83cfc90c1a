use crate::TenantContextStore;

use inv_auth::IdentityStore;
use inv_client::CompanyDirectory;
use inv_core::{CompanyMembership, Route};

use std::sync::Arc;

use log::{debug, info, warn};

/// Where the guard ended up for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardState {
    Unauthenticated,
    ContextCached,
    Resolving,
    ZeroCompanies,
    OneCompany,
    ManyCompanies,
    Error,
}

impl GuardState {
    /// Partition a membership list.
    pub fn classify(companies: &[CompanyMembership]) -> Self {
        match companies {
            [] => Self::ZeroCompanies,
            [_] => Self::OneCompany,
            [_, _, ..] => Self::ManyCompanies,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Route),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardOutcome {
    pub state: GuardState,
    pub decision: GuardDecision,
}

impl GuardOutcome {
    fn allow(state: GuardState) -> Self {
        Self {
            state,
            decision: GuardDecision::Allow,
        }
    }

    fn redirect(state: GuardState, route: Route) -> Self {
        Self {
            state,
            decision: GuardDecision::Redirect(route),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.decision == GuardDecision::Allow
    }

    pub fn redirect_target(&self) -> Option<Route> {
        match self.decision {
            GuardDecision::Allow => None,
            GuardDecision::Redirect(route) => Some(route),
        }
    }
}

/// Result of the synchronous part of the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardStep {
    Decided(GuardOutcome),
    /// No tenant cached; memberships must be fetched.
    Resolve,
}

impl GuardStep {
    pub fn state(&self) -> GuardState {
        match self {
            Self::Decided(outcome) => outcome.state,
            Self::Resolve => GuardState::Resolving,
        }
    }
}

/// Decides whether a protected route may be entered, resolving the tenant
/// context from the user's memberships when none is cached.
pub struct RouteEntryGuard {
    identity: Arc<IdentityStore>,
    tenant: Arc<TenantContextStore>,
    directory: Arc<dyn CompanyDirectory>,
    lookup_failure_route: Route,
}

impl RouteEntryGuard {
    pub fn new(
        identity: Arc<IdentityStore>,
        tenant: Arc<TenantContextStore>,
        directory: Arc<dyn CompanyDirectory>,
    ) -> Self {
        Self {
            identity,
            tenant,
            directory,
            lookup_failure_route: Route::CompanyCreation,
        }
    }

    pub fn with_lookup_failure_route(mut self, route: Route) -> Self {
        self.lookup_failure_route = route;
        self
    }

    pub fn lookup_failure_route(&self) -> Route {
        self.lookup_failure_route
    }

    pub fn precheck(&self) -> GuardStep {
        if !self.identity.is_authenticated() {
            debug!("Guard: not authenticated");
            return GuardStep::Decided(GuardOutcome::redirect(
                GuardState::Unauthenticated,
                Route::SignIn,
            ));
        }

        if self.tenant.has_tenant_context() {
            debug!("Guard: tenant context cached");
            return GuardStep::Decided(GuardOutcome::allow(GuardState::ContextCached));
        }

        GuardStep::Resolve
    }

    /// Run the guard to completion. Never fails; lookup errors become redirects.
    pub async fn evaluate(&self) -> GuardOutcome {
        let step = self.precheck();
        debug!("Guard precheck: {:?}", step.state());

        match step {
            GuardStep::Decided(outcome) => outcome,
            GuardStep::Resolve => self.resolve().await,
        }
    }

    async fn resolve(&self) -> GuardOutcome {
        debug!("Guard: resolving tenant from memberships");

        match self.directory.my_companies().await {
            Ok(companies) => self.apply_memberships(&companies),
            Err(e) => {
                warn!(
                    "Membership lookup failed, redirecting to {}: {e}",
                    self.lookup_failure_route
                );
                GuardOutcome::redirect(GuardState::Error, self.lookup_failure_route)
            }
        }
    }

    fn apply_memberships(&self, companies: &[CompanyMembership]) -> GuardOutcome {
        match companies {
            [] => {
                info!("User has no companies");
                GuardOutcome::redirect(GuardState::ZeroCompanies, Route::CompanyCreation)
            }
            [only] => match self.tenant.set_current_tenant(&only.tenant_id) {
                Ok(()) => {
                    info!(
                        "Auto-selected the only company {} ({})",
                        only.tenant_id, only.display_name
                    );
                    GuardOutcome::redirect(GuardState::OneCompany, Route::Dashboard)
                }
                Err(e) => {
                    warn!("Failed to persist auto-selected tenant {}: {e}", only.tenant_id);
                    GuardOutcome::redirect(GuardState::OneCompany, Route::CompanySelection)
                }
            },
            [_, _, ..] => {
                info!("User belongs to {} companies, selection required", companies.len());
                GuardOutcome::redirect(GuardState::ManyCompanies, Route::CompanySelection)
            }
        }
    }
}
