use std::sync::Arc;

use formgate::api::handler;
use formgate::ratelimit::{self, RateLimiter};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    formgate::setup_logging();

    // The limiter and its sweeper live as long as the execution environment.
    let limiter = Arc::new(RateLimiter::new());
    let _sweeper = ratelimit::spawn_sweeper(Arc::clone(&limiter));

    lambda_runtime::run(lambda_runtime::service_fn(move |event| {
        let limiter = Arc::clone(&limiter);
        async move { handler(event, limiter).await }
    }))
    .await
}
