//! Backend calls the tenant-context core consumes, as traits so the stores and
//! the guard can be exercised without a server.

pub mod company_directory;
pub mod context_switcher;
pub mod identity_exchange;
