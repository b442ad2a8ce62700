mod display;
mod remote;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use regscope_ai::{ChatClient, ChatConfig, DEFAULT_API_BASE, DEFAULT_MODEL, process_csv};
use regscope_core::{BrowseQuery, Card, Facets, Filters, Regulation, RuleFilter, StatusFilter};
use regscope_store::{
    BillSource, DEFAULT_TABLE, StaticSource, StoreConfig, SupabaseClient, retrieve,
};
use tracing::{error, info};

use crate::remote::EndpointClient;

#[derive(Parser)]
#[command(name = "regscope", version, about = "Browse state insurance bills and their rule impact")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List regulations as cards, filtered and searched
    List {
        #[command(flatten)]
        source: SourceArgs,

        /// Jurisdiction to keep (exact match)
        #[arg(long)]
        state: Option<String>,

        /// all, passed, failed, or exact:<status>
        #[arg(long, default_value = "all")]
        status: StatusFilter,

        /// all, P1, or P2
        #[arg(long, default_value = "all")]
        rule: RuleFilter,

        /// Product section to keep (exact match)
        #[arg(long)]
        section: Option<String>,

        /// Case-insensitive free-text search
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Show the distinct states, sections and statuses
    Facets {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Check that the store is reachable with the configured credentials
    Check {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Rewrite the explanations of affected bills in a CSV export
    Enhance {
        /// CSV export of the bill table
        #[arg(long)]
        input: PathBuf,

        /// Where to write the affected, enhanced rows
        #[arg(long)]
        output: PathBuf,

        /// Chat model
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,

        /// Base URL of the chat-completions API
        #[arg(long, default_value = DEFAULT_API_BASE)]
        api_base: String,

        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
}

/// Where bills come from. Defaults to the store.
#[derive(Args)]
struct SourceArgs {
    /// Read from a running regscope server instead of the store
    #[arg(long, conflicts_with = "rows")]
    endpoint: Option<String>,

    /// Read raw rows from a JSON array file instead of the store
    #[arg(long)]
    rows: Option<PathBuf>,

    #[command(flatten)]
    store: StoreArgs,
}

#[derive(Args)]
struct StoreArgs {
    /// Supabase project URL
    #[arg(long, env = "SUPABASE_URL", hide_env_values = true)]
    store_url: Option<String>,

    /// Supabase service role key
    #[arg(long, env = "SUPABASE_SERVICE_ROLE_KEY", hide_env_values = true)]
    service_key: Option<String>,

    /// Table holding the bill rows
    #[arg(long, env = "REGSCOPE_TABLE", default_value = DEFAULT_TABLE)]
    table: String,

    /// Request timeout in seconds
    #[arg(long, env = "REGSCOPE_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,
}

impl StoreArgs {
    fn client(&self) -> Result<SupabaseClient> {
        let config = StoreConfig::new(self.store_url.clone(), self.service_key.clone())?
            .with_table(self.table.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs));
        Ok(SupabaseClient::new(config)?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("regscope=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::List {
            source,
            state,
            status,
            rule,
            section,
            query,
        } => {
            let browse = BrowseQuery {
                filters: Filters {
                    state,
                    status,
                    rule_affected: rule,
                    section,
                },
                query,
            };
            cmd_list(&source, &browse).await
        }
        Command::Facets { source } => cmd_facets(&source).await,
        Command::Check { store } => cmd_check(&store).await,
        Command::Enhance {
            input,
            output,
            model,
            api_base,
            api_key,
        } => cmd_enhance(input, output, model, api_base, api_key).await,
    }
}

async fn load_bills(source: &SourceArgs) -> Result<Vec<Regulation>> {
    if let Some(endpoint) = &source.endpoint {
        let client = EndpointClient::new(
            endpoint,
            Duration::from_secs(source.store.timeout_secs),
        )?;
        return match client.fetch().await {
            Ok(bills) => Ok(bills),
            Err(e) => {
                error!("failed to fetch regulations: {e}");
                Ok(Vec::new())
            }
        };
    }

    let rows: Box<dyn BillSource> = match &source.rows {
        Some(path) => Box::new(
            StaticSource::from_json_file(path)
                .await
                .with_context(|| format!("reading rows from {}", path.display()))?,
        ),
        None => Box::new(source.store.client()?),
    };
    let validated = retrieve(rows.as_ref())
        .await
        .context("fetching regulations")?;
    Ok(validated.bills)
}

async fn cmd_list(source: &SourceArgs, browse: &BrowseQuery) -> Result<()> {
    let bills = load_bills(source).await?;
    let cards: Vec<Card> = browse.apply(&bills).into_iter().map(Card::from).collect();
    print!("{}", display::render_list(&cards));
    Ok(())
}

async fn cmd_facets(source: &SourceArgs) -> Result<()> {
    let bills = load_bills(source).await?;
    print!("{}", display::render_facets(&Facets::from_items(&bills)));
    Ok(())
}

async fn cmd_check(store: &StoreArgs) -> Result<()> {
    let client = store.client()?;
    client
        .probe()
        .await
        .with_context(|| format!("probing table {}", client.table()))?;
    println!("Store reachable (table {})", client.table());
    Ok(())
}

async fn cmd_enhance(
    input: PathBuf,
    output: PathBuf,
    model: String,
    api_base: String,
    api_key: Option<String>,
) -> Result<()> {
    let config = ChatConfig::new(api_key)?
        .with_model(model)
        .with_api_base(api_base);
    let client = ChatClient::new(config)?;
    info!(model = client.model(), input = %input.display(), "enhancing explanations");

    let stats = process_csv(&input, &output, &client)
        .await
        .with_context(|| format!("enhancing {}", input.display()))?;

    println!("Processing complete:");
    println!("Total rows processed: {}", stats.rows_written);
    println!("Explanations enhanced: {}", stats.explanations_enhanced);
    println!("Output: {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use regscope_core::Rule;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_parses_filters() {
        let cli = Cli::try_parse_from([
            "regscope", "list", "--rule", "p2", "--status", "exact:Signed", "-q", "hb", "--rows",
            "bills.json",
        ])
        .unwrap();
        let Command::List {
            source,
            status,
            rule,
            query,
            state,
            ..
        } = cli.command
        else {
            panic!("expected list");
        };
        assert_eq!(rule, RuleFilter::Affected(Rule::P2));
        assert_eq!(status, StatusFilter::Exact("Signed".into()));
        assert_eq!(query, "hb");
        assert_eq!(state, None);
        assert_eq!(source.rows, Some(PathBuf::from("bills.json")));
    }

    #[test]
    fn list_rejects_unknown_rule() {
        assert!(Cli::try_parse_from(["regscope", "list", "--rule", "P3"]).is_err());
    }

    #[test]
    fn endpoint_and_rows_conflict() {
        let parsed = Cli::try_parse_from([
            "regscope",
            "facets",
            "--endpoint",
            "http://localhost:3000",
            "--rows",
            "bills.json",
        ]);
        assert!(parsed.is_err());
    }
}
