#[tokio::main]
async fn main() {
    tableside_core::server::init_tracing();

    let port = tableside_core::launch::effective_port();
    let state = tableside_core::init_state();

    if let Err(e) = tableside_core::server::start_server(state, &port).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
