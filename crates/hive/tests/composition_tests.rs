//! Integration tests for the composition engine
//!
//! Covers:
//! - Router entry: dispatch, route variables, state handoff
//! - View entry: direct render without a route table
//! - Includes: independent siblings, per-hop previous state
//! - Fatal errors: routing miss, configuration, missing components
//! - Options and asset tags flowing through the context

use hive::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use std::collections::BTreeMap;

// ============================================================================
// Test components
// ============================================================================

struct App;

impl Component for App {
    fn data(&self, _cx: &ComponentContext) -> anyhow::Result<Option<Data>> {
        Ok(Some(json!({ "user": "ann" })))
    }

    fn state(&self, _cx: &ComponentContext, data: Option<&Data>) -> Option<StateValue> {
        data.map(|d| json!({ "from": "app", "user": d["user"] }))
    }

    fn as_router(&self) -> Option<&dyn Routing> {
        Some(self)
    }
}

impl Routing for App {
    fn routes(&self) -> RouteSet {
        RouteSet::new()
            .route("home", "/")
            .route("posts", "/post")
            .route("post", RouteEntry::Detailed {
                route: "/post/:action/#id".to_string(),
                meta: BTreeMap::new(),
            })
            .route("ghost", "/ghost")
            .route("app", "/nested")
    }

    fn options(&self) -> BTreeMap<String, String> {
        BTreeMap::from([("title".to_string(), "Hive Blog".to_string())])
    }
}

struct Home;

impl Component for Home {
    fn as_view(&self) -> Option<&dyn View> {
        Some(self)
    }
}

impl View for Home {
    fn view(&self, scope: &mut Scope<'_>, prev: Option<&StateValue>, _data: Option<&Data>) -> anyhow::Result<String> {
        let title = scope.context().option("title").unwrap_or_default();
        Ok(format!("<h1>{}</h1>{}", title, show(prev)))
    }
}

struct Posts;

impl Component for Posts {
    fn as_view(&self) -> Option<&dyn View> {
        Some(self)
    }
}

impl View for Posts {
    fn view(&self, scope: &mut Scope<'_>, _prev: Option<&StateValue>, _data: Option<&Data>) -> anyhow::Result<String> {
        Ok(format!("posts vars={}", scope.route_vars().len()))
    }
}

struct Post;

impl Component for Post {
    fn data(&self, cx: &ComponentContext) -> anyhow::Result<Option<Data>> {
        Ok(Some(json!({
            "action": cx.route_var("action"),
            "id": cx.route_var("id"),
        })))
    }

    fn state(&self, _cx: &ComponentContext, data: Option<&Data>) -> Option<StateValue> {
        data.map(|d| json!({ "post": d["id"] }))
    }

    fn as_view(&self) -> Option<&dyn View> {
        Some(self)
    }
}

impl View for Post {
    fn view(&self, scope: &mut Scope<'_>, prev: Option<&StateValue>, data: Option<&Data>) -> anyhow::Result<String> {
        scope.include(&["nav", "footer"])?;
        Ok(format!(
            "<main>{}|{}|{}|{}</main>",
            show(prev),
            show(data),
            scope.partial_or_empty("nav"),
            scope.partial_or_empty("footer"),
        ))
    }
}

struct Nav;

impl Component for Nav {
    fn data(&self, _cx: &ComponentContext) -> anyhow::Result<Option<Data>> {
        Ok(Some(json!("nav-data")))
    }

    fn as_view(&self) -> Option<&dyn View> {
        Some(self)
    }
}

impl View for Nav {
    fn view(&self, scope: &mut Scope<'_>, prev: Option<&StateValue>, data: Option<&Data>) -> anyhow::Result<String> {
        Ok(format!(
            "<nav>{}|{}|seen={}</nav>",
            show(prev),
            show(data),
            scope.partials().len()
        ))
    }
}

struct Footer;

impl Component for Footer {
    fn data(&self, _cx: &ComponentContext) -> anyhow::Result<Option<Data>> {
        Ok(Some(json!("footer-data")))
    }

    fn as_view(&self) -> Option<&dyn View> {
        Some(self)
    }
}

impl View for Footer {
    fn view(&self, scope: &mut Scope<'_>, prev: Option<&StateValue>, data: Option<&Data>) -> anyhow::Result<String> {
        Ok(format!(
            "<footer>{}|{}|seen={}|nav={}</footer>",
            show(prev),
            show(data),
            scope.partials().len(),
            scope.partial("nav").is_some()
        ))
    }
}

struct Solo;

impl Component for Solo {
    fn data(&self, _cx: &ComponentContext) -> anyhow::Result<Option<Data>> {
        Ok(Some(json!(7)))
    }

    fn state(&self, _cx: &ComponentContext, _data: Option<&Data>) -> Option<StateValue> {
        Some(json!("solo-state"))
    }

    fn as_view(&self) -> Option<&dyn View> {
        Some(self)
    }
}

impl View for Solo {
    fn view(&self, scope: &mut Scope<'_>, prev: Option<&StateValue>, data: Option<&Data>) -> anyhow::Result<String> {
        scope.include(&["nav"])?;
        Ok(format!(
            "solo {}|{}|vars={}|{}",
            show(prev),
            show(data),
            scope.route_vars().len(),
            scope.partial_or_empty("nav")
        ))
    }
}

struct Looping;

impl Component for Looping {
    fn as_view(&self) -> Option<&dyn View> {
        Some(self)
    }
}

impl View for Looping {
    fn view(&self, scope: &mut Scope<'_>, _prev: Option<&StateValue>, _data: Option<&Data>) -> anyhow::Result<String> {
        scope.include(&["looping"])?;
        Ok(scope.partial_or_empty("looping").to_string())
    }
}

struct Broken;

impl Component for Broken {
    fn as_view(&self) -> Option<&dyn View> {
        Some(self)
    }
}

impl View for Broken {
    fn view(&self, _scope: &mut Scope<'_>, _prev: Option<&StateValue>, _data: Option<&Data>) -> anyhow::Result<String> {
        anyhow::bail!("template exploded")
    }
}

struct Styled;

impl Component for Styled {
    fn as_view(&self) -> Option<&dyn View> {
        Some(self)
    }
}

impl View for Styled {
    fn view(&self, scope: &mut Scope<'_>, _prev: Option<&StateValue>, _data: Option<&Data>) -> anyhow::Result<String> {
        let mut head = scope.style_tags()?;
        head.extend(scope.script_tags(&["app"])?);
        Ok(head.join(""))
    }
}

struct Empty;

impl Component for Empty {}

struct Both;

impl Component for Both {
    fn as_router(&self) -> Option<&dyn Routing> {
        Some(self)
    }

    fn as_view(&self) -> Option<&dyn View> {
        Some(self)
    }
}

impl Routing for Both {
    fn routes(&self) -> RouteSet {
        RouteSet::new()
    }
}

impl View for Both {
    fn view(&self, _scope: &mut Scope<'_>, _prev: Option<&StateValue>, _data: Option<&Data>) -> anyhow::Result<String> {
        Ok(String::new())
    }
}

struct NoRoutes;

impl Component for NoRoutes {
    fn as_router(&self) -> Option<&dyn Routing> {
        Some(self)
    }
}

impl Routing for NoRoutes {
    fn routes(&self) -> RouteSet {
        RouteSet::new()
    }
}

fn show(value: Option<&serde_json::Value>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

// ============================================================================
// Fixtures
// ============================================================================

fn registry() -> Registry {
    Registry::new()
        .with("app", || App)
        .and_then(|r| r.with("home", || Home))
        .and_then(|r| r.with("posts", || Posts))
        .and_then(|r| r.with("post", || Post))
        .and_then(|r| r.with("nav", || Nav))
        .and_then(|r| r.with("footer", || Footer))
        .and_then(|r| r.with("solo", || Solo))
        .and_then(|r| r.with("looping", || Looping))
        .and_then(|r| r.with("broken", || Broken))
        .and_then(|r| r.with("styled", || Styled))
        .and_then(|r| r.with("no-routes", || NoRoutes))
        .unwrap()
}

fn engine() -> Engine {
    Engine::new(registry(), Config::default())
}

fn env(path: &str) -> RequestEnvironment {
    RequestEnvironment::new(path, "localhost", Scheme::Http)
}

// ============================================================================
// Router entry
// ============================================================================

#[test]
fn test_routed_handler_gets_router_state_and_own_data() {
    let html = engine().render("app", &env("/post/edit/42/")).unwrap();

    assert_eq!(
        html,
        concat!(
            r#"<main>{"from":"app","user":"ann"}|{"action":"edit","id":"42"}|"#,
            r#"<nav>{"post":"42"}|"nav-data"|seen=0</nav>|"#,
            r#"<footer>{"post":"42"}|"footer-data"|seen=0|nav=false</footer></main>"#,
        )
    );
}

#[rstest]
#[case::list("/post", "posts vars=0")]
#[case::list_trailing_slash("/post/", "posts vars=0")]
#[case::longest_match("/post/show/1", "<main>")]
#[case::root("/", "<h1>Hive Blog</h1>")]
fn test_dispatch_selects_handler(#[case] path: &str, #[case] prefix: &str) {
    let html = engine().render("app", &env(path)).unwrap();
    assert!(html.starts_with(prefix), "{} rendered {}", path, html);
}

#[test]
fn test_router_options_reach_handler() {
    let html = engine().render("app", &env("/")).unwrap();
    assert_eq!(html, r#"<h1>Hive Blog</h1>{"from":"app","user":"ann"}"#);
}

#[rstest]
#[case::letters_in_digit_slot("/post/edit/abc")]
#[case::digits_in_letter_slot("/post/42/1")]
#[case::extra_segment("/post/edit/1/more")]
#[case::unknown_literal("/posts")]
fn test_routing_miss_is_fatal(#[case] path: &str) {
    let err = engine().render("app", &env(path)).unwrap_err();
    assert!(matches!(err, HiveError::RouteNotFound { path: ref missed } if missed == path));
    assert_eq!(err.status_code(), 404);
    assert!(err.to_html().contains(&format!("Route is not set for {}", path)));
}

#[test]
fn test_no_routes_is_a_visible_miss() {
    let err = engine().render("no-routes", &env("/anything")).unwrap_err();
    assert_eq!(err.to_string(), "Route is not set for /anything");
}

#[test]
fn test_unregistered_route_handler() {
    let err = engine().render("app", &env("/ghost")).unwrap_err();
    assert!(matches!(err, HiveError::ComponentNotFound { ref handler } if handler == "ghost"));
}

#[test]
fn test_router_cannot_be_routed_to() {
    let err = engine().render("app", &env("/nested")).unwrap_err();
    assert!(matches!(
        err,
        HiveError::WrongCapability { ref component, expected: "view" } if component == "app"
    ));
    assert_eq!(err.to_string(), "Component app cannot be used as a view");
}

#[test]
fn test_validate_reports_unregistered_handlers() {
    assert_eq!(engine().validate(), vec!["ghost".to_string()]);
}

// ============================================================================
// View entry
// ============================================================================

#[test]
fn test_view_entry_renders_without_route_table() {
    // The path would not match any route; a view entry never consults one
    let html = engine().render("solo", &env("/does/not/matter")).unwrap();
    assert_eq!(html, r#"solo -|7|vars=0|<nav>"solo-state"|"nav-data"|seen=0</nav>"#);
}

#[test]
fn test_unknown_entry() {
    let err = engine().render("nobody", &env("/")).unwrap_err();
    assert!(matches!(err, HiveError::ComponentNotFound { .. }));
}

// ============================================================================
// Includes and errors raised while rendering
// ============================================================================

#[test]
fn test_self_include_hits_depth_limit() {
    let mut config = Config::default();
    config.routing.max_include_depth = 4;

    let err = Engine::new(registry(), config)
        .render("looping", &env("/"))
        .unwrap_err();

    assert!(matches!(err, HiveError::IncludeDepthExceeded { limit: 4, .. }));
}

#[test]
fn test_view_error_is_wrapped_with_handler() {
    let err = engine().render("broken", &env("/")).unwrap_err();
    match err {
        HiveError::Component { handler, source } => {
            assert_eq!(handler, "broken");
            assert_eq!(source.to_string(), "template exploded");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_asset_tags_need_a_manifest() {
    let err = engine().render("styled", &env("/")).unwrap_err();
    assert!(matches!(err, HiveError::MissingManifest { kind: AssetKind::Style }));
}

#[test]
fn test_asset_tags_use_base_url() {
    let manifest = AssetManifest::new()
        .with(AssetKind::Style, "site.css", "css/site.css")
        .with(AssetKind::Script, "app.js", "js/app.js");

    let html = engine()
        .with_manifest(manifest)
        .render("styled", &env("/"))
        .unwrap();

    assert_eq!(
        html,
        concat!(
            r#"<link rel="stylesheet" type="text/css" href="http://localhost/css/site.css">"#,
            r#"<script src="http://localhost/js/app.js"></script>"#,
        )
    );
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_component_without_capability_is_rejected() {
    let err = Registry::new().register("empty", || Empty).unwrap_err();
    assert!(matches!(err, HiveError::Configuration { ref component, .. } if component == "empty"));
    assert!(err.to_string().contains("neither"));
}

#[test]
fn test_component_with_both_capabilities_is_rejected() {
    let err = Registry::new().register("both", || Both).unwrap_err();
    assert!(err.to_string().contains("both a route table and a view"));
}

#[test]
fn test_registration_reports_capability() {
    let mut registry = Registry::new();
    assert_eq!(registry.register("app", || App).unwrap(), Capability::Router);
    assert_eq!(registry.register("home", || Home).unwrap(), Capability::View);
    assert_eq!(registry.len(), 2);
}
