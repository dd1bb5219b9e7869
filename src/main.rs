use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wos_search::config::{find_config_file, get_config, load_config, Config, CONFIG_FILE_NAME};
use wos_search::mcp::McpServer;
use wos_search::models::{Database, DocumentType, QueryType, SearchRequest, SearchResult};
use wos_search::sources::WosClient;
use wos_search::utils::documents_table;

/// WoS Search - query Web of Science and serve it over MCP
#[derive(Parser, Debug)]
#[command(name = "wos-search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search Web of Science from the command line or over MCP", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Web of Science API key (overrides config and WOS_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Search endpoint (overrides config)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Table on a terminal, JSON otherwise
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search Web of Science
    #[command(alias = "s")]
    Search {
        /// Search text
        query: String,

        /// Field to search: TS, TI, AU, DO, IS, PMID
        #[arg(long, short = 't', default_value = "TS")]
        query_type: QueryType,

        /// Year filter (e.g., "2020", "2018-2022", "2010-", "-2015")
        #[arg(long, short)]
        year: Option<String>,

        /// Document type: All, Article, Review
        #[arg(long, short, default_value = "All")]
        document_type: DocumentType,

        /// Number of records to return
        #[arg(long, short, default_value_t = 50)]
        limit: usize,

        /// Sort field and direction, e.g. "RS+D", "PY+D,TC+D"
        #[arg(long, default_value = "RS+D")]
        sort: String,

        /// Database (defaults to the configured one)
        #[arg(long)]
        db: Option<Database>,

        /// Seconds to wait between pages (overrides config)
        #[arg(long)]
        delay: Option<u64>,

        /// Output format
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Auto)]
        output: OutputFormat,
    },

    /// Check that the API key is accepted
    Validate,

    /// Run the MCP server
    Serve {
        /// Serve over streamable HTTP on this address instead of stdio
        #[arg(long)]
        http: Option<String>,
    },

    /// Write a default configuration file
    InitConfig {
        /// Destination (default: ./wos-search.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbose: u8, quiet: bool, json: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wos_search={}", level)));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(path) = &cli.config {
        load_config(path)?
    } else if let Some(path) = find_config_file() {
        tracing::info!("Using config file: {}", path.display());
        load_config(&path)?
    } else {
        get_config()?
    };

    if let Some(api_key) = &cli.api_key {
        config.api_key = Some(api_key.clone());
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }

    Ok(config)
}

fn print_result(result: &SearchResult, format: OutputFormat) -> Result<()> {
    let format = match format {
        OutputFormat::Auto if std::io::stdout().is_terminal() => OutputFormat::Table,
        OutputFormat::Auto => OutputFormat::Json,
        other => other,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        _ if result.is_empty() => println!("No records found (total {})", result.total),
        _ => {
            println!("{}", documents_table(result));
            println!(
                "Showing {} of {} records{}",
                result.len(),
                result.total,
                if result.partial {
                    " (stopped early: a page request failed)"
                } else {
                    ""
                }
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet, cli.log_json);

    let mut config = resolve_config(&cli)?;

    match cli.command {
        Commands::Search {
            query,
            query_type,
            year,
            document_type,
            limit,
            sort,
            db,
            delay,
            output,
        } => {
            if let Some(delay) = delay {
                config.page_delay_secs = delay;
            }

            let mut request = SearchRequest::new(query)
                .query_type(query_type)
                .document_type(document_type)
                .num_results(limit)
                .sort_field(sort)
                .database(db.unwrap_or(config.database));
            if let Some(year) = year {
                request = request.year(year);
            }

            let client = WosClient::from_config(&config)?;
            let result = client.search(&request).await;
            print_result(&result, output)?;
        }

        Commands::Validate => {
            let client = WosClient::from_config(&config)?;
            client.validate_credentials().await?;
            if !cli.quiet {
                println!("API key is valid");
            }
        }

        Commands::Serve { http } => {
            let client = WosClient::from_config(&config)?;
            let server = McpServer::new(Arc::new(client), config.database)?;

            if let Some(addr) = http {
                let (bound_addr, handle) = server.run_http(&addr).await?;
                tracing::info!("MCP server listening on {}", bound_addr);

                handle
                    .await
                    .map_err(|e| anyhow::anyhow!("Server task failed: {}", e))?;
            } else {
                server.run().await?;
            }
        }

        Commands::InitConfig { path, force } => {
            let path = path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }

            config.save(&path)?;
            if !cli.quiet {
                println!("Wrote {}", path.display());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_defaults() {
        let cli = Cli::try_parse_from(["wos-search", "search", "cancer"]).unwrap();
        match cli.command {
            Commands::Search {
                query,
                query_type,
                document_type,
                limit,
                sort,
                db,
                output,
                ..
            } => {
                assert_eq!(query, "cancer");
                assert_eq!(query_type, QueryType::Ts);
                assert_eq!(document_type, DocumentType::All);
                assert_eq!(limit, 50);
                assert_eq!(sort, "RS+D");
                assert!(db.is_none());
                assert_eq!(output, OutputFormat::Auto);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_search_rejects_invalid_query_type() {
        let result = Cli::try_parse_from(["wos-search", "search", "cancer", "-t", "XX"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_search_rejects_invalid_document_type() {
        let result =
            Cli::try_parse_from(["wos-search", "search", "cancer", "--document-type", "Foo"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["wos-search", "validate", "--api-key", "abc", "-vv"]).unwrap();
        assert_eq!(cli.api_key.as_deref(), Some("abc"));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Validate));
    }

    #[test]
    fn test_serve_http() {
        let cli =
            Cli::try_parse_from(["wos-search", "serve", "--http", "127.0.0.1:8080"]).unwrap();
        match cli.command {
            Commands::Serve { http } => assert_eq!(http.as_deref(), Some("127.0.0.1:8080")),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
