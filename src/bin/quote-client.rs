use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "quote-client")]
#[command(about = "Fetch the current quotation from the relay and save it to a file", long_about = None)]
struct Cli {
    /// Relay endpoint.
    #[arg(short, long, default_value = "http://localhost:8080/cotacao")]
    url: String,

    /// Overall deadline for the request, in milliseconds.
    #[arg(short, long, default_value_t = 300)]
    timeout_ms: u64,

    /// File the quotation is written to.
    #[arg(short, long, default_value = "cotacao.txt")]
    output: PathBuf,

    /// Label written in front of the value.
    #[arg(short, long, default_value = "Dólar")]
    label: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(cli.timeout_ms))
        .build()?;

    let res = client.get(&cli.url).send().await.map_err(|e| {
        if e.is_timeout() {
            format!("no quotation within {} ms", cli.timeout_ms)
        } else {
            format!("request failed: {}", e)
        }
    })?;

    let status = res.status();
    if !status.is_success() {
        return Err(format!("relay returned status {}", status).into());
    }
    let value = res.text().await?;
    println!("{}", value);

    tokio::fs::write(&cli.output, render(&cli.label, &value)).await?;
    Ok(())
}

fn render(label: &str, value: &str) -> String {
    format!("{}: {}", label, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        assert_eq!(render("Dólar", "5.432"), "Dólar: 5.432");
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["quote-client"]);
        assert_eq!(cli.url, "http://localhost:8080/cotacao");
        assert_eq!(cli.timeout_ms, 300);
        assert_eq!(cli.output, PathBuf::from("cotacao.txt"));
    }
}
