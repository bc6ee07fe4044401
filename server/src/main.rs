#[tokio::main]
async fn main() {
    showcase_server::start_server().await;
}
