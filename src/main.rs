use akita_router::{Akita, RouterError};

#[tokio::main]
async fn main() -> Result<(), RouterError> {
    env_logger::builder().filter_level(log::LevelFilter::Info).init();

    let mut akita: Akita<()> = Akita::new();

    akita.get("/", |mut c| async move {
        c.text("index");
        c
    })?;

    akita.get("/users/new", |mut c| async move {
        c.text("new user form");
        c
    })?;

    akita.get("/users/:id", |mut c| async move {
        let id = c.param("id").unwrap_or("unknown").to_string();
        c.text(&format!("user {}", id));
        c
    })?;

    akita.post("/users/:id", |mut c| async move {
        c.set_status(201).text("updated");
        c
    })?;

    akita.get("/users/:id/posts/:post", |mut c| async move {
        let body = format!(
            "post {} of user {}",
            c.param("post").unwrap_or(""),
            c.param("id").unwrap_or("")
        );
        c.text(&body);
        c
    })?;

    akita.get("/files/*", |mut c| async move {
        let file = c.param("*").unwrap_or("").to_string();
        c.text(&format!("file {}", file));
        c
    })?;

    akita.build();

    let requests = [
        ("GET", "/"),
        ("GET", "/users/new"),
        ("GET", "/users/42"),
        ("POST", "/users/42"),
        ("DELETE", "/users/42"),
        ("GET", "/users/42/posts/7?draft=1"),
        ("GET", "/files/css/site.css"),
        ("GET", "/nope"),
    ];

    for (method, path) in requests {
        let ctx = akita.handle(method, path, ()).await;
        match ctx.allow_header() {
            Some(allow) => println!("{} {} -> {} {} (allow: {})", method, path, ctx.status, ctx.body, allow),
            None => println!("{} {} -> {} {}", method, path, ctx.status, ctx.body),
        }
        akita.release(ctx);
    }
    Ok(())
}
