use tracing::error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let guard = todo_backend::init_logging();

    if let Err(e) = todo_backend::run().await {
        error!("Failed to start service: {}", e);
        drop(guard);
        std::process::exit(1);
    }
}
