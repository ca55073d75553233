//! The public pages of the demo site.

use axum::{extract::Path, http::Method, response::Html, routing::post};
use core_smap::SITEMAPPABLE;

use crate::site_router::SiteRouter;

pub fn pages() -> SiteRouter {
    SiteRouter::new()
        .sitemap_page("/", home)
        .sitemap_page("/about", about)
        .sitemap_page("/blog", blog_index)
        // Listed as /blog: the slug is stripped from the template.
        .sitemap_page("/blog/{slug}", blog_post)
        .page("/contact", contact)
        .page("/admin", admin)
        // Tagged, but not a GET route, so never listed.
        .route("/newsletter/subscribe", &[Method::POST], post(subscribe), &[SITEMAPPABLE])
}

async fn home() -> Html<&'static str> {
    Html("<h1>Home</h1>")
}

async fn about() -> Html<&'static str> {
    Html("<h1>About</h1>")
}

async fn blog_index() -> Html<&'static str> {
    Html("<h1>Blog</h1>")
}

async fn blog_post(Path(slug): Path<String>) -> Html<String> {
    Html(format!("<h1>{}</h1>", slug.replace(['<', '>', '&'], "")))
}

async fn contact() -> Html<&'static str> {
    Html("<h1>Contact</h1>")
}

async fn admin() -> Html<&'static str> {
    Html("<h1>Admin</h1>")
}

async fn subscribe() -> Html<&'static str> {
    Html("<p>Subscribed</p>")
}
