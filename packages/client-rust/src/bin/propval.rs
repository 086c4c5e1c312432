//! `propval`: command-line access to the Property Validation API.
//!
//! Entities are printed to stdout as one JSON document per line; logs go to
//! stderr and are filtered with `RUST_LOG` (default `warn`).

use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use futures_util::TryStreamExt;
use propval_client::{
    take, ClientConfig, ClientError, EntityListIterator, ListParams, PropertyValidationClient,
    RunTestParams, StaticAccessToken,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "propval", about = "Query and run iTwin property validation")]
struct Cli {
    /// Property Validation API base url.
    #[arg(long, env = "PROPVAL_BASE_URL", default_value = propval_client::config::DEFAULT_BASE_URL)]
    base_url: String,
    /// iModels API base url, used to find the latest named version.
    #[arg(long, env = "PROPVAL_IMODELS_BASE_URL", default_value = propval_client::config::DEFAULT_IMODELS_BASE_URL)]
    imodels_base_url: String,
    /// Full `Authorization` header value, e.g. `Bearer ey...`.
    #[arg(long, env = "PROPVAL_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
    /// Emit logs as JSON.
    #[arg(long)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Project whose entities are listed.
    project_id: String,
    /// Page size requested from the API.
    #[arg(long)]
    top: Option<u32>,
    /// Stop after this many entities.
    #[arg(long)]
    limit: Option<usize>,
}

impl ListArgs {
    fn params(&self) -> ListParams {
        let params = ListParams::for_project(&self.project_id);
        match self.top {
            Some(top) => params.with_top(top),
            None => params,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List validation rules.
    Rules {
        #[command(flatten)]
        list: ListArgs,
        /// Print full rule details instead of the minimal form.
        #[arg(long)]
        full: bool,
    },
    /// List validation tests.
    Tests(ListArgs),
    /// List rule templates.
    Templates(ListArgs),
    /// List validation runs.
    Runs {
        #[command(flatten)]
        list: ListArgs,
        /// Print run status and result ids.
        #[arg(long)]
        full: bool,
    },
    /// Show one rule.
    Rule { id: String },
    /// Show one test.
    Test { id: String },
    /// Show one run.
    Run { id: String },
    /// Show the failures recorded for a run.
    #[command(name = "result")]
    RunResult { id: String },
    /// Start a test run against an iModel.
    RunTest {
        test_id: String,
        imodel_id: String,
        /// Named version to validate. Defaults to the latest one.
        #[arg(long)]
        named_version_id: Option<String>,
        /// Wait until the run finishes and print its final state.
        #[arg(long)]
        wait: bool,
        /// Give up waiting after this many seconds.
        #[arg(long, default_value_t = 600)]
        wait_timeout_secs: u64,
    },
}

impl Cli {
    fn client(&self) -> anyhow::Result<PropertyValidationClient> {
        let config = ClientConfig {
            base_url: self.base_url.clone(),
            imodels_base_url: self.imodels_base_url.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..ClientConfig::default()
        };
        let client = PropertyValidationClient::new(config).context("failed to build HTTP client")?;
        Ok(match &self.access_token {
            Some(token) => client.with_token_provider(Arc::new(StaticAccessToken::new(token.clone()))),
            None => client,
        })
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);
    let client = cli.client()?;

    match cli.command {
        Command::Rules { list, full: false } => {
            print_entities(client.rules().get_minimal_list(list.params()), list.limit).await
        }
        Command::Rules { list, full: true } => {
            print_entities(client.rules().get_representation_list(list.params()), list.limit).await
        }
        Command::Tests(list) => print_entities(client.tests().get_list(list.params()), list.limit).await,
        Command::Templates(list) => {
            print_entities(client.templates().get_list(list.params()), list.limit).await
        }
        Command::Runs { list, full: false } => {
            print_entities(client.runs().get_minimal_list(list.params()), list.limit).await
        }
        Command::Runs { list, full: true } => {
            print_entities(client.runs().get_representation_list(list.params()), list.limit).await
        }
        Command::Rule { id } => print_json(&client.rules().get_single(&id, None).await?),
        Command::Test { id } => print_json(&client.tests().get_single(&id, None).await?),
        Command::Run { id } => print_json(&client.runs().get_single(&id, None).await?),
        Command::RunResult { id } => print_json(&client.results().get(&id, None).await?),
        Command::RunTest {
            test_id,
            imodel_id,
            named_version_id,
            wait,
            wait_timeout_secs,
        } => {
            let mut params = RunTestParams::new(test_id, imodel_id);
            params.named_version_id = named_version_id;
            let Some(run) = client.tests().run_test(params).await? else {
                anyhow::bail!("iModel has no named versions to validate");
            };
            info!(run_id = %run.id, "run started");
            if wait {
                let finished = client
                    .runs()
                    .wait_for_completion(&run.id, None, Duration::from_secs(wait_timeout_secs))
                    .await?;
                print_json(&finished)
            } else {
                print_json(&run)
            }
        }
    }
}

/// Prints entities as they arrive; pages are fetched only as output proceeds.
async fn print_entities<T>(
    mut entities: EntityListIterator<T, ClientError>,
    limit: Option<usize>,
) -> anyhow::Result<()>
where
    T: Serialize + Send + 'static,
{
    if let Some(limit) = limit {
        for entity in take(&mut entities, limit).await? {
            print_json(&entity)?;
        }
        return Ok(());
    }

    let mut stream = pin!(entities.into_stream());
    while let Some(entity) = stream.try_next().await? {
        print_json(&entity)?;
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
