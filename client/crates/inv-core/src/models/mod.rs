pub mod company_membership;
pub mod switched_context;
