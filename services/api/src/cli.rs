use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use expo_desk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Expo Desk",
    about = "Run the exhibitor dashboard API or exercise its classification engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Classify the bundled sample exhibitors and print a lead summary
    Demo(DemoArgs),
    /// Emit a bcrypt hash suitable for ADMIN_PASSWORD_HASH
    HashPassword(HashPasswordArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct HashPasswordArgs {
    /// Plaintext password to hash
    password: String,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
        Command::HashPassword(args) => hash_password(args),
    }
}

fn hash_password(args: HashPasswordArgs) -> Result<(), AppError> {
    match bcrypt::hash(&args.password, bcrypt::DEFAULT_COST) {
        Ok(hash) => {
            println!("{hash}");
            Ok(())
        }
        Err(err) => Err(AppError::Io(std::io::Error::other(err))),
    }
}
