#[tokio::main]
async fn main() {
    if let Err(err) = listing_pricing_api::run().await {
        eprintln!("listing-pricing failed: {err}");
        std::process::exit(1);
    }
}
