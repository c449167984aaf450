use akita_router::{Lookup, Method, MethodSet, Params, Router};

fn init() {
    env_logger::try_init_from_env(env_logger::Env::default().default_filter_or("debug")).unwrap_or_else(|_| ());
}

fn resolve(router: &Router<&'static str>, method: &str, path: &str) -> (Option<&'static str>, Params) {
    let mut params = Params::with_capacity(router.max_param());
    let handler = match router.find(method, path, &mut params) {
        Lookup::Found(h) => Some(*h),
        _ => None,
    };
    (handler, params)
}

#[test]
fn static_routes_share_prefixes() {
    init();
    let mut router = Router::new();
    router.get("/", "root").unwrap();
    router.get("/users", "users").unwrap();
    router.get("/users/all", "all").unwrap();
    router.get("/search", "search").unwrap();
    router.get("/support", "support").unwrap();
    router.build();

    assert_eq!(resolve(&router, "GET", "/").0, Some("root"));
    assert_eq!(resolve(&router, "GET", "/users").0, Some("users"));
    assert_eq!(resolve(&router, "GET", "/users/all").0, Some("all"));
    assert_eq!(resolve(&router, "GET", "/search").0, Some("search"));
    assert_eq!(resolve(&router, "GET", "/support").0, Some("support"));

    assert_eq!(resolve(&router, "GET", "/use").0, None);
    assert_eq!(resolve(&router, "GET", "/s").0, None);
    // no trailing slash normalization
    assert_eq!(resolve(&router, "GET", "/users/").0, None);
}

#[test]
fn param_captures_one_segment() {
    init();
    let mut router = Router::new();
    router.get("/users/:id", "user").unwrap();

    let (h, params) = resolve(&router, "GET", "/users/42");
    assert_eq!(h, Some("user"));
    assert_eq!(params.get("id"), Some("42"));
    assert_eq!(params.path(), "/users/:id");
    assert_eq!(params.len(), 1);

    assert_eq!(resolve(&router, "GET", "/users/").0, None);
    assert_eq!(resolve(&router, "GET", "/users/42/").0, None);
    assert_eq!(resolve(&router, "GET", "/users/42/x").0, None);
}

#[test]
fn static_wins_over_param() {
    init();
    let mut router = Router::new();
    router.get("/users/new", "new").unwrap();
    router.get("/users/:id", "user").unwrap();

    let (h, params) = resolve(&router, "GET", "/users/new");
    assert_eq!(h, Some("new"));
    assert!(params.is_empty());

    let (h, params) = resolve(&router, "GET", "/users/42");
    assert_eq!(h, Some("user"));
    assert_eq!(params.get("id"), Some("42"));

    // 静的ラベルと途中まで重なるもの
    let (h, params) = resolve(&router, "GET", "/users/newest");
    assert_eq!(h, Some("user"));
    assert_eq!(params.get("id"), Some("newest"));

    let (h, params) = resolve(&router, "GET", "/users/ne");
    assert_eq!(h, Some("user"));
    assert_eq!(params.get("id"), Some("ne"));
}

#[test]
fn any_captures_rest_with_slashes() {
    init();
    let mut router = Router::new();
    router.get("/files/*", "files").unwrap();

    let (h, params) = resolve(&router, "GET", "/files/a/b/c");
    assert_eq!(h, Some("files"));
    assert_eq!(params.get("*"), Some("a/b/c"));

    let (h, params) = resolve(&router, "GET", "/files/");
    assert_eq!(h, Some("files"));
    assert_eq!(params.get("*"), Some(""));

    assert_eq!(resolve(&router, "GET", "/files").0, None);
}

#[test]
fn root_wildcard() {
    init();
    let mut router = Router::new();
    router.get("/*", "all").unwrap();
    router.get("/health", "health").unwrap();

    assert_eq!(resolve(&router, "GET", "/health").0, Some("health"));
    let (h, params) = resolve(&router, "GET", "/healthz/deep");
    assert_eq!(h, Some("all"));
    assert_eq!(params.get("*"), Some("healthz/deep"));
    let (h, params) = resolve(&router, "GET", "/");
    assert_eq!(h, Some("all"));
    assert_eq!(params.get("*"), Some(""));
}

#[test]
fn param_and_any_at_same_position() {
    init();
    let mut router = Router::new();
    router.get("/s/:id", "param").unwrap();
    router.get("/s/*", "any").unwrap();

    let (h, params) = resolve(&router, "GET", "/s/1");
    assert_eq!(h, Some("param"));
    assert_eq!(params.get("id"), Some("1"));

    let (h, params) = resolve(&router, "GET", "/s/1/2");
    assert_eq!(h, Some("any"));
    assert_eq!(params.get("*"), Some("1/2"));
    assert_eq!(params.get("id"), None);

    let (h, params) = resolve(&router, "GET", "/s/");
    assert_eq!(h, Some("any"));
    assert_eq!(params.get("*"), Some(""));
}

#[test]
fn shared_param_prefix_routes_are_independent() {
    init();
    let mut router = Router::new();
    router.get("/users/:id", "user").unwrap();
    router.get("/users/:id/posts", "posts").unwrap();

    let (h, params) = resolve(&router, "GET", "/users/7");
    assert_eq!(h, Some("user"));
    assert_eq!(params.get("id"), Some("7"));

    let (h, params) = resolve(&router, "GET", "/users/7/posts");
    assert_eq!(h, Some("posts"));
    assert_eq!(params.get("id"), Some("7"));
    assert_eq!(params.path(), "/users/:id/posts");
}

#[test]
fn params_in_declared_order() {
    init();
    let mut router = Router::new();
    router.post("/repos/:owner/:repo/git/*", "git").unwrap();
    assert_eq!(router.max_param(), 3);

    let (h, params) = resolve(&router, "POST", "/repos/rust-lang/cargo/git/refs/heads/main");
    assert_eq!(h, Some("git"));
    assert_eq!(params.names().collect::<Vec<_>>(), vec!["owner", "repo", "*"]);
    assert_eq!(params.values().collect::<Vec<_>>(), vec!["rust-lang", "cargo", "refs/heads/main"]);
    assert_eq!(params.value(1), Some("cargo"));
    assert_eq!(params.value(3), None);
}

#[test]
fn last_write_wins() {
    init();
    let mut router = Router::new();
    router.get("/a", "one").unwrap();
    assert_eq!(resolve(&router, "GET", "/a").0, Some("one"));

    router.get("/a", "two").unwrap();
    assert_eq!(resolve(&router, "GET", "/a").0, Some("two"));
    assert_eq!(router.routes().count(), 1);
}

#[test]
fn backtracks_from_static_to_param() {
    init();
    let mut router = Router::new();
    router.get("/a/:b/c", "b").unwrap();
    router.get("/a/x/:d", "d").unwrap();

    let (h, params) = resolve(&router, "GET", "/a/x/c");
    assert_eq!(h, Some("d"));
    assert_eq!(params.get("d"), Some("c"));
    assert_eq!(params.get("b"), None);

    let (h, params) = resolve(&router, "GET", "/a/y/c");
    assert_eq!(h, Some("b"));
    assert_eq!(params.get("b"), Some("y"));

    // static の枝 "x/" に入った後、その先で行き詰まる
    let (h, params) = resolve(&router, "GET", "/a/x/c/");
    assert_eq!(h, None);
    assert!(params.is_empty());
}

#[test]
fn backtracks_across_several_levels() {
    init();
    let mut router = Router::new();
    router.get("/a/x/y/z", "z").unwrap();
    router.get("/a/x/y/q", "q").unwrap();
    router.get("/a/:b/y/w", "w").unwrap();

    assert_eq!(resolve(&router, "GET", "/a/x/y/z").0, Some("z"));
    assert_eq!(resolve(&router, "GET", "/a/x/y/q").0, Some("q"));

    let (h, params) = resolve(&router, "GET", "/a/x/y/w");
    assert_eq!(h, Some("w"));
    assert_eq!(params.get("b"), Some("x"));
}

#[test]
fn backtracks_from_param_to_ancestor_any() {
    init();
    let mut router = Router::new();
    router.get("/a/:b/c/d", "deep").unwrap();
    router.get("/a/*", "any").unwrap();

    let (h, params) = resolve(&router, "GET", "/a/x/c/d");
    assert_eq!(h, Some("deep"));
    assert_eq!(params.get("b"), Some("x"));

    let (h, params) = resolve(&router, "GET", "/a/x/c/e");
    assert_eq!(h, Some("any"));
    assert_eq!(params.get("*"), Some("x/c/e"));
    assert_eq!(params.len(), 1);
}

#[test]
fn missing_method_falls_through_to_next_alternative() {
    init();
    let mut router = Router::new();
    router.post("/a/x", "static-post").unwrap();
    router.get("/a/:id", "param-get").unwrap();

    let (h, params) = resolve(&router, "GET", "/a/x");
    assert_eq!(h, Some("param-get"));
    assert_eq!(params.get("id"), Some("x"));

    assert_eq!(resolve(&router, "POST", "/a/x").0, Some("static-post"));
}

#[test]
fn method_not_allowed_is_distinct_from_not_found() {
    init();
    let mut router = Router::new();
    router.get("/users", "list").unwrap();
    router.put("/users", "replace").unwrap();

    let mut params = Params::new();
    match router.find("POST", "/users", &mut params) {
        Lookup::MethodNotAllowed(allowed) => {
            assert!(allowed.contains(Method::GET));
            assert!(allowed.contains(Method::PUT));
            assert!(!allowed.contains(Method::POST));
            assert_eq!(allowed.to_string(), "GET, PUT");
        }
        other => panic!("expected 405, got {:?}", other),
    }
    assert!(params.is_empty());

    let lookup = router.find("GET", "/nothing", &mut params);
    assert_eq!(lookup, Lookup::NotFound);
    assert_eq!(lookup.status(), 404);

    // 未知のメソッドも 405
    let lookup = router.find("BREW", "/users", &mut params);
    assert_eq!(lookup.status(), 405);

    let lookup = router.find_method(Method::PUT, "/users", &mut params);
    assert_eq!(lookup, Lookup::Found(&"replace"));
}

#[test]
fn method_not_allowed_reports_most_specific_node() {
    init();
    let mut router = Router::new();
    router.post("/items/new", "create").unwrap();
    router.delete("/items/:id", "remove").unwrap();

    let mut params = Params::new();
    let lookup = router.find("GET", "/items/new", &mut params);
    let expected: MethodSet = [Method::POST].into_iter().collect();
    assert_eq!(lookup, Lookup::MethodNotAllowed(expected));
}

#[test]
fn sink_untouched_on_failure() {
    init();
    let mut router = Router::new();
    router.get("/users/:id", "user").unwrap();

    let mut params = Params::with_capacity(router.max_param());
    assert!(router.find("GET", "/users/1", &mut params).is_found());
    assert_eq!(params.get("id"), Some("1"));

    assert_eq!(router.find("GET", "/nope", &mut params), Lookup::NotFound);
    assert_eq!(params.get("id"), Some("1"));
}

#[test]
fn multibyte_labels_split_inside_characters() {
    init();
    let mut router = Router::new();
    // 'é' と 'è' は先頭バイトが同じ
    router.get("/é", "e-acute").unwrap();
    router.get("/è", "e-grave").unwrap();
    router.get("/é/:x", "e-acute-param").unwrap();

    assert_eq!(resolve(&router, "GET", "/é").0, Some("e-acute"));
    assert_eq!(resolve(&router, "GET", "/è").0, Some("e-grave"));
    assert_eq!(resolve(&router, "GET", "/ê").0, None);

    let (h, params) = resolve(&router, "GET", "/é/日本");
    assert_eq!(h, Some("e-acute-param"));
    assert_eq!(params.get("x"), Some("日本"));
}

#[test]
fn encoded_slash_stays_in_param() {
    init();
    let mut router = Router::new();
    router.get("/:id", "id").unwrap();

    let (h, params) = resolve(&router, "GET", "/with%2Fslash");
    assert_eq!(h, Some("id"));
    assert_eq!(params.get("id"), Some("with%2Fslash"));
}

#[test]
fn sink_grows_past_capacity() {
    init();
    let mut router = Router::new();
    router.get("/:a/:b/:c", "abc").unwrap();

    let mut params = Params::new();
    assert!(router.find("GET", "/1/2/3", &mut params).is_found());
    assert_eq!(params.values().collect::<Vec<_>>(), vec!["1", "2", "3"]);
}

#[test]
fn lookup_into_http_error() {
    use akita_router::HttpError;

    init();
    let mut router = Router::new();
    router.get("/a", "a").unwrap();

    let mut params = Params::new();
    assert_eq!(router.find("GET", "/a", &mut params).into_result(), Ok(&"a"));

    let err = router.find("POST", "/a", &mut params).into_result().unwrap_err();
    assert_eq!(err.status(), 405);
    assert_eq!(err.to_string(), "Method Not Allowed (allow: GET)");

    let err = router.find("GET", "/b", &mut params).into_result().unwrap_err();
    assert_eq!(err, HttpError::NotFound);
    assert_eq!(err.status(), 404);
}
