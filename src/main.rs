use actix_files as fs;
use actix_web::{
    get, middleware::Logger, web, App, HttpResponse, HttpServer, Result as ActixResult,
};
use clap::Parser;

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the static host on
    #[arg(long, default_value = "127.0.0.1:8088")]
    bind: String,

    /// Directory holding the compiled WASM bundle
    #[arg(long, default_value = "./pkg")]
    pkg_dir: String,
}

#[get("/")]
async fn index() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().content_type("text/html").body(INDEX_HTML))
}

// Client-side routes all load the same shell; the router in the bundle
// takes it from there.
async fn spa_fallback() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().content_type("text/html").body(INDEX_HTML))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    env_logger::init();

    println!("Serving printq at http://{}", args.bind);
    println!("Bundle directory: {}", args.pkg_dir);

    let pkg_dir = args.pkg_dir.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(index)
            .service(fs::Files::new("/pkg", pkg_dir.clone()))
            .service(fs::Files::new("/static", "./static"))
            .default_service(web::route().to(spa_fallback))
    })
    .bind(&args.bind)?
    .run()
    .await
}
