use clap::Parser;
use eyre::WrapErr;
use ile_de_sons::cli::{self, RootArgs};
use ile_de_sons::config::Config;

fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ile_de_sons=info,lyrics_catalog=info".into()),
        )
        .init();

    let args = RootArgs::parse();
    let config = Config::from_env().wrap_err("failed to load config from env vars")?;
    tracing::debug!("Config loaded: {:?}", config);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    cli::run(args, &config, &mut stdin.lock(), &mut stdout.lock())
}
