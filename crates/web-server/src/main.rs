use std::path::Path;

// This main function is the entry point when running `cargo run -p web-server`.
// It serves the API with settings from `docboard.toml` and the environment.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = configuration::load_settings(Path::new("docboard.toml"))?;
    let _guard = configuration::init_tracing(&settings.logging)?;
    web_server::run_server(&settings).await
}
