use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apiduel::agent::graphql::GraphqlTransport;
use apiduel::agent::rest::RestTransport;
use apiduel::agent::{run_agent, AgentLoopConfig};
use apiduel::backend;
use apiduel::backend::store::MockStore;
use apiduel::config::Config;
use apiduel::error::AppError;
use apiduel::llm::anthropic::AnthropicProvider;
use apiduel::report::render_report;
use apiduel::tasks::TASKS;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "apiduel=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    let (base_url, _server) = match &config.backend_url {
        Some(url) => (url.as_str().trim_end_matches('/').to_string(), None),
        None => {
            let store = Arc::new(MockStore::seeded()?);
            let (addr, handle) = backend::spawn_ephemeral(store).await?;
            (format!("http://{addr}"), Some(handle))
        }
    };
    tracing::info!(backend = %base_url, model = %config.model, "starting comparison");

    let provider = AnthropicProvider::new(&config.api_key, config.model.clone(), None)?;
    let loop_config = AgentLoopConfig {
        max_turns: config.max_turns,
        ..Default::default()
    };
    let rest = RestTransport::new(&base_url);
    let graphql = GraphqlTransport::new(&base_url, config.nesting_hint);

    for test in TASKS {
        println!("\nRunning test: {}", test.name);
        println!("Task: {}\n", test.task);

        println!("Running REST agent...");
        let rest_result = run_agent(&provider, &rest, test.task, &loop_config).await?;

        println!("Running GraphQL agent...");
        let graphql_result = run_agent(&provider, &graphql, test.task, &loop_config).await?;

        println!(
            "{}",
            render_report(test.name, test.task, &rest_result, &graphql_result)
        );
    }

    println!("All tests completed.");
    Ok(())
}
