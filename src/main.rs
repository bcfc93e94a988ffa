use axum::ServiceExt;
use blog::config::Config;
use blog::publish::PublishRequest;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about = "A small server-rendered blog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the blog (the default)
    Serve,
    /// Add a new post
    Publish {
        #[arg(long)]
        title: String,
        /// Markdown file holding the post body
        #[arg(long)]
        body_file: PathBuf,
        /// Image to attach to the post
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;
    blog::logger::init(config.log_format);

    let db = blog::store::connect(&config.database).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, db).await?,
        Command::Publish {
            title,
            body_file,
            image,
        } => {
            let post = blog::publish::publish(
                &db,
                &config.media_root,
                PublishRequest {
                    title,
                    body_file,
                    image,
                },
            )
            .await?;
            println!("{}", post.id);
        }
    }

    Ok(())
}

async fn serve(config: Config, db: sqlx::SqlitePool) -> std::io::Result<()> {
    let state = std::sync::Arc::new(blog::state::State::new(db, config.media_root.clone()));
    let app = blog::app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "serving blog");

    axum::serve(
        listener,
        ServiceExt::<axum::extract::Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutting down"),
        Err(err) => {
            tracing::error!(error = %err, "could not listen for shutdown signal");
            std::future::pending::<()>().await
        }
    }
}
