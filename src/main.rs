use lambda_http::{run, tracing, Error};

use prefbot::{routes, state::AppState};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let state = AppState::from_env()?;

    run(routes::router(state)).await
}
