// Demo components served by the reference server

use hive::{
    Component, ComponentContext, Data, HiveError, Registry, RouteEntry, RouteSet, Routing,
    Scope, StateValue, View,
};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde_json::json;
use std::collections::BTreeMap;

/// Handler id of the entry router
pub const ENTRY: &str = "blog";

pub fn registry() -> Result<Registry, HiveError> {
    Registry::new()
        .with(ENTRY, || Blog)?
        .with("index", || Index)?
        .with("post_list", || PostList)?
        .with("post", || Post)?
        .with("about", || About)?
        .with("nav", || Nav)?
        .with("footer", || Footer)
}

/// Entry router
struct Blog;

impl Component for Blog {
    fn data(&self, _cx: &ComponentContext) -> anyhow::Result<Option<Data>> {
        Ok(Some(json!({
            "site": "Hive Blog",
            "posts": [
                { "id": 1, "title": "Hello, hive" },
                { "id": 2, "title": "Routing longest-first" },
            ],
        })))
    }

    fn state(&self, _cx: &ComponentContext, data: Option<&Data>) -> Option<StateValue> {
        data.cloned()
    }

    fn as_router(&self) -> Option<&dyn Routing> {
        Some(self)
    }
}

impl Routing for Blog {
    fn routes(&self) -> RouteSet {
        let mut about_meta = BTreeMap::new();
        about_meta.insert("title".to_string(), "About".to_string());

        RouteSet::new()
            .route("index", "/")
            .route("post_list", "/post")
            .route("post", "/post/:action/#id")
            .route(
                "about",
                RouteEntry::Detailed {
                    route: "/about".to_string(),
                    meta: about_meta,
                },
            )
    }
}

struct Index;

impl Component for Index {
    fn state(&self, _cx: &ComponentContext, _data: Option<&Data>) -> Option<StateValue> {
        Some(json!({ "active": "index" }))
    }

    fn as_view(&self) -> Option<&dyn View> {
        Some(self)
    }
}

impl View for Index {
    fn view(&self, scope: &mut Scope<'_>, prev: Option<&StateValue>, _data: Option<&Data>) -> anyhow::Result<String> {
        let site = site_name(prev);
        let body = html! {
            h1 { (site) }
            p { "Pick a post from the list." }
            a href={ (scope.context().base_url()) "/post" } { "All posts" }
        };
        page(scope, &site, body)
    }
}

struct PostList;

impl Component for PostList {
    fn state(&self, _cx: &ComponentContext, _data: Option<&Data>) -> Option<StateValue> {
        Some(json!({ "active": "post_list" }))
    }

    fn as_view(&self) -> Option<&dyn View> {
        Some(self)
    }
}

impl View for PostList {
    fn view(&self, scope: &mut Scope<'_>, prev: Option<&StateValue>, _data: Option<&Data>) -> anyhow::Result<String> {
        let base_url = scope.context().base_url().to_string();
        let posts = prev
            .and_then(|s| s["posts"].as_array())
            .cloned()
            .unwrap_or_default();

        let body = html! {
            h1 { "Posts" }
            ul {
                @for post in &posts {
                    li {
                        a href={ (base_url) "/post/show/" (post["id"].as_u64().unwrap_or_default()) } {
                            (post["title"].as_str().unwrap_or_default())
                        }
                    }
                }
            }
        };
        page(scope, "Posts", body)
    }
}

struct Post;

impl Component for Post {
    fn data(&self, cx: &ComponentContext) -> anyhow::Result<Option<Data>> {
        let id: u64 = cx
            .route_vars()
            .get_as("id")
            .ok_or_else(|| anyhow::anyhow!("post id is not a number"))?;

        Ok(Some(json!({
            "id": id,
            "action": cx.route_var("action").unwrap_or("show"),
        })))
    }

    fn state(&self, _cx: &ComponentContext, data: Option<&Data>) -> Option<StateValue> {
        data.map(|d| json!({ "active": "post", "id": d["id"] }))
    }

    fn as_view(&self) -> Option<&dyn View> {
        Some(self)
    }
}

impl View for Post {
    fn view(&self, scope: &mut Scope<'_>, prev: Option<&StateValue>, data: Option<&Data>) -> anyhow::Result<String> {
        let data = data.cloned().unwrap_or_default();
        let id = data["id"].as_u64().unwrap_or_default();

        let title = prev
            .and_then(|s| s["posts"].as_array())
            .and_then(|posts| posts.iter().find(|p| p["id"].as_u64() == Some(id)))
            .and_then(|p| p["title"].as_str())
            .unwrap_or("Unknown post")
            .to_string();

        let body = html! {
            h1 { (title) }
            p { "Action: " (data["action"].as_str().unwrap_or_default()) }
            p { "Post #" (id) }
        };
        page(scope, &title, body)
    }
}

struct About;

impl Component for About {
    fn as_view(&self) -> Option<&dyn View> {
        Some(self)
    }
}

impl View for About {
    fn view(&self, scope: &mut Scope<'_>, _prev: Option<&StateValue>, _data: Option<&Data>) -> anyhow::Result<String> {
        let info = scope.context().path_info();
        let body = html! {
            h1 { "About" }
            dl {
                dt { "Handler" } dd { (info.handler) }
                dt { "Request path" } dd { (info.request_path) }
                dt { "Base URL" } dd { (info.base_url) }
            }
        };
        page(scope, "About", body)
    }
}

struct Nav;

impl Component for Nav {
    fn as_view(&self) -> Option<&dyn View> {
        Some(self)
    }
}

impl View for Nav {
    fn view(&self, scope: &mut Scope<'_>, prev: Option<&StateValue>, _data: Option<&Data>) -> anyhow::Result<String> {
        let base_url = scope.context().base_url();
        let active = prev.and_then(|s| s["active"].as_str()).unwrap_or_default();

        let links = [("index", "/", "Home"), ("post_list", "/post", "Posts"), ("about", "/about", "About")];
        let markup = html! {
            nav {
                @for (key, href, label) in links {
                    a href={ (base_url) (href) } class=[(key == active).then_some("active")] { (label) }
                    " "
                }
            }
        };
        Ok(markup.into_string())
    }
}

struct Footer;

impl Component for Footer {
    fn as_view(&self) -> Option<&dyn View> {
        Some(self)
    }
}

impl View for Footer {
    fn view(&self, scope: &mut Scope<'_>, _prev: Option<&StateValue>, _data: Option<&Data>) -> anyhow::Result<String> {
        let markup = html! {
            footer { "Served " (scope.context().request_path()) }
        };
        Ok(markup.into_string())
    }
}

/// Wraps a page body with the shared head, nav and footer
fn page(scope: &mut Scope<'_>, title: &str, body: Markup) -> anyhow::Result<String> {
    scope.include(&["nav", "footer"])?;

    let styles = scope.style_tags()?;
    let scripts = scope.script_tags(&["app"])?;

    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (title) }
                @for tag in &styles { (PreEscaped(tag)) }
            }
            body {
                (PreEscaped(scope.partial_or_empty("nav")))
                main { (body) }
                (PreEscaped(scope.partial_or_empty("footer")))
                @for tag in &scripts { (PreEscaped(tag)) }
            }
        }
    };
    Ok(markup.into_string())
}

fn site_name(state: Option<&StateValue>) -> String {
    state
        .and_then(|s| s["site"].as_str())
        .unwrap_or("Hive")
        .to_string()
}
