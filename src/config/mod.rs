pub mod routes;
pub mod yml_settings;
