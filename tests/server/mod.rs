use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};

const HOME: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Test Site Home Page For Crawler Integration Tests</title>
  <meta name="description" content="Home page of the local test site.">
  <meta property="og:title" content="Home">
</head>
<body>
  <h1>Welcome</h1>
  <h2>Sections</h2>
  <a href="/about">About</a>
  <a href="/blog">Blog</a>
  <a href="/forbidden">Members</a>
  <a href="https://external.example.com/">Elsewhere</a>
  <a href="mailto:owner@example.com">Mail</a>
  <img src="/logo.png">
</body>
</html>"#;

const ABOUT: &str = r#"<html><head><title>About</title></head>
<body><h1>About us</h1><a href="/">Home</a><a href="/about#team">Team</a></body></html>"#;

const BLOG: &str = r#"<html><head><title>Blog</title></head>
<body><h1>Blog</h1><a href="post">First post</a></body></html>"#;

const POST: &str = r#"<html><head><title>First Post</title></head>
<body><h1>First post</h1><h2>Intro</h2><p>Hello from the blog.</p><a href="/deeper">Deeper</a></body></html>"#;

const DEEPER: &str = r#"<html><head><title>Deeper</title></head><body><h1>Deep</h1></body></html>"#;

fn html(body: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Serves a small site on an ephemeral port and returns its base URL
#[allow(dead_code)]
pub async fn get_test_server_url() -> String {
    let http_server = HttpServer::new(|| {
        App::new()
            .route("/", web::get().to(|| async { html(HOME) }))
            .route("/about", web::get().to(|| async { html(ABOUT) }))
            .route("/blog", web::get().to(|| async { html(BLOG) }))
            .route("/post", web::get().to(|| async { html(POST) }))
            .route("/deeper", web::get().to(|| async { html(DEEPER) }))
            .route(
                "/forbidden",
                web::get().to(|| async { HttpResponse::Forbidden().body("Forbidden") }),
            )
            .route(
                "/not-found",
                web::get().to(|| async { HttpResponse::NotFound().body("Not Found") }),
            )
            .route(
                "/server-error",
                web::get().to(|| async { HttpResponse::InternalServerError().body("Error") }),
            )
            .route(
                "/teapot",
                web::get().to(|| async { HttpResponse::ImATeapot().body("Teapot") }),
            )
            .route(
                "/redirect",
                web::get().to(|| async {
                    HttpResponse::Found()
                        .append_header(("Location", "/about"))
                        .finish()
                }),
            )
            .route(
                "/moved-nowhere",
                web::get().to(|| async {
                    HttpResponse::MovedPermanently()
                        .content_type("text/html; charset=utf-8")
                        .body(DEEPER)
                }),
            )
            .route(
                "/navigation-only",
                web::get().to(|req: HttpRequest| async move {
                    let header = |name: &str| {
                        req.headers()
                            .get(name)
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or_default()
                            .to_string()
                    };
                    if header("sec-fetch-mode") == "navigate" && header("sec-fetch-dest") == "document"
                    {
                        html(ABOUT)
                    } else {
                        HttpResponse::Forbidden().body("Navigation requests only")
                    }
                }),
            )
            .route(
                "/browser-only-blocked",
                web::get().to(|req: HttpRequest| async move {
                    let user_agent = req
                        .headers()
                        .get("user-agent")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    if user_agent.contains("Chrome") {
                        HttpResponse::Forbidden().body("No browsers")
                    } else {
                        html(DEEPER)
                    }
                }),
            )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind test server");

    let addr = http_server
        .addrs()
        .first()
        .cloned()
        .expect("No address bound");
    let url = format!("http://{}", addr);

    let app_server = http_server.run();

    tokio::spawn(async move {
        if let Err(e) = app_server.await {
            eprintln!("Test server error: {}", e);
        }
    });

    url
}
