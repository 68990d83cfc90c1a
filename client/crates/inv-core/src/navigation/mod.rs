pub mod navigation_queue;
pub mod navigator;
pub mod route;
pub mod route_table;
