use std::fmt::{Debug, Display};

use tokio::task::JoinError;

use customer_registry::configuration::get_configuration;
use customer_registry::startup::ApplicationBuilder;
use customer_registry::storage::FileStorage;
use customer_registry::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("customer_registry".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    let configuration = get_configuration()?;
    let application = ApplicationBuilder::new(configuration)
        .set_address_client_from_configuration()?
        .set_customer_store_from_configuration()?
        .build::<FileStorage>()
        .await?;
    let application = tokio::spawn(application.run_until_stopped());
    report_exit("API", application.await);
    Ok(())
}

fn report_exit(task_name: &str, outcome: Result<Result<(), impl Debug + Display>, JoinError>) {
    match outcome {
        Ok(Ok(())) => {
            tracing::info!("{} has exited", task_name)
        },
        Ok(Err(e)) => {
            tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "{} failed",
            task_name
            )
        },
        Err(e) => {
            tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "{} task failed to complete",
            task_name
            )
        },
    }
}
