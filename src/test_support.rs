use std::net::SocketAddr;

use axum::Router;

/// Serves `router` on an ephemeral local port and returns its base url.
pub async fn serve(router: Router) -> String {
    let server =
        axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(router.into_make_service());
    let addr = server.local_addr();
    tokio::spawn(server);
    format!("http://{addr}")
}
