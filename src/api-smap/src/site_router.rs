use axum::{
    Router,
    handler::Handler,
    http::Method,
    routing::{MethodRouter, get},
};
use core_smap::{Endpoint, RouteTable, SITEMAPPABLE};

/// Builds the site's router while recording every registered endpoint, with its methods and
/// tags, into a [`RouteTable`] the sitemap is generated from.
#[derive(Default)]
pub struct SiteRouter {
    router: Router,
    table: RouteTable,
}

impl SiteRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `method_router` at `path`. `methods` and `tags` are what the route table reports.
    pub fn route(mut self, path: &str, methods: &[Method], method_router: MethodRouter, tags: &[&str]) -> Self {
        self.router = self.router.route(path, method_router);
        self.table.push(Endpoint::new(
            methods.iter().map(Method::as_str),
            path,
            tags.iter().copied(),
        ));
        self
    }

    /// A GET (and HEAD) page that is left out of the sitemap.
    pub fn page<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.route(path, &[Method::GET, Method::HEAD], get(handler), &[])
    }

    /// A GET (and HEAD) page that is listed in the sitemap.
    pub fn sitemap_page<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.route(path, &[Method::GET, Method::HEAD], get(handler), &[SITEMAPPABLE])
    }

    pub fn into_parts(self) -> (Router, RouteTable) {
        (self.router, self.table)
    }
}
