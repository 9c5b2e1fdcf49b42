use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, LOCATION};
use reqwest::redirect::Policy;

#[derive(Parser)]
#[command(name = "snippet-cli")]
#[command(about = "Command-line client for the snippets demo server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3333")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the snippets list fragment
    List,
    /// Create the demo snippet
    Create {
        /// Send the partial-update request marker (expects 201, no redirect)
        #[arg(long)]
        htmx: bool,
    },
    /// Print a single snippet page
    View {
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .build()?;

    match cli.command {
        Commands::List => {
            let res = client.get(format!("{}/snippets", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Create { htmx } => {
            let mut headers = HeaderMap::new();
            if htmx {
                headers.insert("X-Request-Marker", HeaderValue::from_static("true"));
            }
            let res = client
                .post(format!("{}/snippets/create", cli.url))
                .headers(headers)
                .send()
                .await?;

            let status = res.status();
            match res.headers().get(LOCATION).and_then(|v| v.to_str().ok()) {
                Some(location) => println!("{} -> {}", status, location),
                None => println!("{}", status),
            }
        }
        Commands::View { id } => {
            let res = client
                .get(format!("{}/snippet", cli.url))
                .query(&[("id", id.as_str())])
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        eprintln!("Response: {}", text.trim_end());
        return Ok(());
    }

    println!("{}", text);
    Ok(())
}
