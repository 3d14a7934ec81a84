use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use meme_generator::app::{App, GenerateRequest, TemplateChoice};
use meme_generator::models::{BackendChoice, Config};
use meme_generator::templates::{MEME_TEMPLATES, TRENDING_TOPICS};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "meme-generator")]
#[command(about = "Generate meme captions with AI and export the result")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate caption text for a topic and optionally export the meme
    Generate(GenerateArgs),
    /// List the built-in meme templates
    Templates,
    /// List trending topics
    Topics,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// What the meme is about.
    #[arg(long)]
    topic: String,

    /// Text-generation backend (defaults to MEME_BACKEND, then free).
    #[arg(long, value_enum)]
    backend: Option<BackendChoice>,

    /// API key for the premium backend (overrides OPENAI_API_KEY).
    #[arg(long, value_name = "KEY")]
    premium_key: Option<String>,

    /// API key for the free backend (overrides HF_API_TOKEN).
    #[arg(long, value_name = "KEY")]
    free_key: Option<String>,

    /// Template id, see `templates`.
    #[arg(long, conflicts_with = "random_template")]
    template: Option<String>,

    /// Pick a random template.
    #[arg(long)]
    random_template: bool,

    /// Use the local joke catalog without calling any backend.
    #[arg(long)]
    offline: bool,

    /// Replace the generated top text.
    #[arg(long, value_name = "TEXT")]
    top: Option<String>,

    /// Replace the generated bottom text.
    #[arg(long, value_name = "TEXT")]
    bottom: Option<String>,

    /// Write the meme as a PNG into OUTPUT_DIR.
    #[arg(long)]
    export: bool,
}

impl From<GenerateArgs> for GenerateRequest {
    fn from(args: GenerateArgs) -> Self {
        let template = match (args.template, args.random_template) {
            (Some(id), _) => TemplateChoice::Id(id),
            (None, true) => TemplateChoice::Random,
            (None, false) => TemplateChoice::Default,
        };

        GenerateRequest {
            topic: args.topic,
            backend: args.backend,
            premium_key: args.premium_key,
            free_key: args.free_key,
            template,
            offline: args.offline,
            top_text: args.top,
            bottom_text: args.bottom,
            export: args.export,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meme_generator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    match args.command {
        Command::Templates => {
            for template in MEME_TEMPLATES {
                println!("{:<16} {}", template.id, template.name);
            }
            Ok(())
        }
        Command::Topics => {
            for topic in TRENDING_TOPICS {
                println!("{}", topic);
            }
            Ok(())
        }
        Command::Generate(generate) => run_generate(generate.into()).await,
    }
}

async fn run_generate(request: GenerateRequest) -> Result<()> {
    info!("Starting meme-generator");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    match app.run(request).await {
        Ok(output) => {
            println!("Template: {}", output.template.name);
            println!("Top:      {}", output.caption.top);
            println!("Bottom:   {}", output.caption.bottom);
            if let Some(export) = output.export {
                println!("Saved:    {}", export.path.display());
            }
            Ok(())
        }
        Err(e) => {
            error!("Generation failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("meme-generator").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_generate_args_map_to_request() {
        let args = parse(&[
            "generate",
            "--topic",
            "Mondays",
            "--backend",
            "premium",
            "--template",
            "drake",
            "--export",
        ]);

        let Command::Generate(generate) = args.command else {
            panic!("expected generate command");
        };
        let request = GenerateRequest::from(generate);

        assert_eq!(request.topic, "Mondays");
        assert_eq!(request.backend, Some(BackendChoice::Premium));
        assert_eq!(request.template, TemplateChoice::Id("drake".to_string()));
        assert!(request.export);
        assert!(!request.offline);
    }

    #[test]
    fn test_random_template_flag() {
        let args = parse(&["generate", "--topic", "Tea", "--random-template"]);
        let Command::Generate(generate) = args.command else {
            panic!("expected generate command");
        };
        assert_eq!(GenerateRequest::from(generate).template, TemplateChoice::Random);
    }

    #[test]
    fn test_template_conflicts_with_random() {
        let result = CliArgs::try_parse_from([
            "meme-generator",
            "generate",
            "--topic",
            "Tea",
            "--template",
            "drake",
            "--random-template",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let result = CliArgs::try_parse_from([
            "meme-generator",
            "generate",
            "--topic",
            "Tea",
            "--backend",
            "gold",
        ]);
        assert!(result.is_err());
    }
}
