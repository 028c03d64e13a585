use log::error;

#[tokio::main]
async fn main() {
    if let Err(err) = mailwatch::run().await {
        error!("fatal: {err:#}");
        std::process::exit(1);
    }
}
