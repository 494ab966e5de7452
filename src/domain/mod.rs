// Domain model for route templates and matching

pub mod compiler;
pub mod route;
pub mod route_table;
pub mod template;

pub use route::{ParameterDefault, Route, RouteMatch};
pub use route_table::RouteTable;
