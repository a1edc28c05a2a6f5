use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::error;

use food_label_analyzer::{AnalysisResult, LabelAnalyzer};

/// Analyze the ingredients of a food label
#[derive(Parser, Debug)]
#[command(name = "food-label-analyzer", version, about)]
struct Cli {
    /// Ingredient text to analyze
    #[arg(conflicts_with_all = ["image", "parse"])]
    text: Option<String>,

    /// Label photo to OCR and analyze
    #[arg(long, value_name = "PATH", conflicts_with = "parse")]
    image: Option<String>,

    /// Parse a saved analysis response instead of calling the service
    #[arg(long, value_name = "FILE")]
    parse: Option<PathBuf>,

    /// Analysis service URL
    #[arg(long)]
    service_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// OCR language hint
    #[arg(long)]
    language: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let result = if let Some(path) = &cli.parse {
        let analysis_text = tokio::fs::read_to_string(path).await?;
        food_label_analyzer::parse(&analysis_text)
    } else {
        let mut builder = match (&cli.text, &cli.image) {
            (Some(text), None) => LabelAnalyzer::builder().text(text),
            (None, Some(image)) => LabelAnalyzer::builder().image(image),
            _ => return Err("Provide ingredient text, --image <PATH> or --parse <FILE>".into()),
        };
        if let Some(url) = &cli.service_url {
            builder = builder.service_url(url);
        }
        if let Some(secs) = cli.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(language) = &cli.language {
            builder = builder.language(language);
        }
        builder.build().await
    };

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            error!("Analysis failed: {:?}", e);
            return Err(e.into());
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }

    Ok(())
}

fn print_report(result: &AnalysisResult) {
    println!(
        "Overall health score: {}/100 ({})",
        result.overall_score(),
        result.band().label()
    );
    println!();

    for ingredient in result.ingredients() {
        println!(
            "{} - {}/100 ({})",
            ingredient.name(),
            ingredient.health_score(),
            ingredient.band().label()
        );
        println!("    {}", ingredient.description());
    }
}
