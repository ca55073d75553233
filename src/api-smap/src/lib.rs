pub mod routes;
pub mod site;
pub mod site_router;
