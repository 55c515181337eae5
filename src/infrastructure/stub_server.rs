use actix_web::{dev::ServerHandle, web, App, HttpServer};

/// Serves `configure` on an ephemeral localhost port and returns its base URL.
/// Must run inside an actix system (`#[actix_web::test]`).
pub async fn start<F>(configure: F) -> (String, ServerHandle)
where
    F: Fn(&mut web::ServiceConfig) + Clone + Send + 'static,
{
    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    (format!("http://{}", addr), handle)
}
