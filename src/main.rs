use clap::Parser;
use quizbank::db::Db;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// SQLite database path (file:...) or connection URL.
    #[arg(long, env, default_value = "file:quizbank.db")]
    database_url: String,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1414")]
    address: String,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,quizbank=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let db = Db::new(args.database_url).await?;
    let routes = quizbank::router(quizbank::AppState { db });

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    tracing::info!("listening on {}", args.address);
    axum::serve(listener, routes).await?;

    Ok(())
}
