pub mod error;
pub mod models;
pub mod navigation;
pub mod storage;

pub use error::{CoreError, Result};
pub use models::company_membership::CompanyMembership;
pub use models::switched_context::SwitchedContext;
pub use navigation::navigation_queue::NavigationQueue;
pub use navigation::navigator::Navigator;
pub use navigation::route::Route;
pub use navigation::route_table::RouteTable;
pub use storage::file_store::FileStore;
pub use storage::key_value_store::KeyValueStore;
pub use storage::memory_store::MemoryStore;

pub use error_location::ErrorLocation;
