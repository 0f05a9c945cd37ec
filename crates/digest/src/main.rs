//! Digest CLI - render analyzed articles as Markdown, HTML email or chat.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use digest_composer::{
    chat_message, AnthropicPromptCorner, DigestComposer, DigestConfig, DigestFormat, DigestInput,
    DigestRequest, EmailRenderer, EmailSender, FileSink, FormatProfile, ThemeName,
};
use notify::{channel_for, DiscordChannel, MessageStyle, Platform, SlackChannel};

/// Digest CLI - compose digests from analyzed article entries.
#[derive(Parser)]
#[command(name = "digest")]
#[command(about = "Multi-format digest composition")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a Markdown digest
    Render {
        /// Input JSON file (entries plus optional summaries)
        #[arg(short, long)]
        input: PathBuf,

        /// Format profile (brief, standard, detailed, newsletter, scannable, email)
        #[arg(short, long)]
        format: Option<String>,

        /// Digest date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Custom title
        #[arg(long)]
        title: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Render the HTML email digest
    Email {
        /// Input JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Email theme (default, newsletter, minimal)
        #[arg(long)]
        theme: Option<String>,

        /// Subject template with {Title} and {Date} placeholders
        #[arg(long)]
        subject: Option<String>,

        /// Digest date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Custom title
        #[arg(long)]
        title: Option<String>,

        /// Leave out the inline stylesheet
        #[arg(long)]
        no_css: bool,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Send via SMTP after writing
        #[arg(long)]
        send: bool,
    },

    /// Post a chat digest to Slack or Discord
    Chat {
        /// Input JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Platform (slack, discord)
        #[arg(short, long)]
        platform: String,

        /// Message style (bullets, summary, highlights)
        #[arg(short, long, default_value = "bullets")]
        style: String,

        /// Message title
        #[arg(long)]
        title: Option<String>,

        /// Webhook URL (overrides SLACK_WEBHOOK_URL / DISCORD_WEBHOOK_URL)
        #[arg(long)]
        webhook_url: Option<String>,

        /// Print the JSON payload instead of posting it
        #[arg(long)]
        dry_run: bool,
    },

    /// List format profiles
    Formats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("digest=debug,digest_composer=debug,notify=debug,info")
    } else {
        EnvFilter::new("digest=info,digest_composer=info,notify=info,warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = DigestConfig::from_env().context("Invalid digest configuration")?;

    match cli.command {
        Commands::Render {
            input,
            format,
            date,
            title,
            output,
            stdout,
        } => {
            let format = format.map_or(config.format, |f| DigestFormat::parse(&f));
            let request = build_request(&input, format, date, title, &config).await?;
            let digest = build_composer(&config)?.compose(&request).await;
            let markdown = digest.to_markdown();

            if stdout {
                print!("{markdown}");
            } else {
                let sink = FileSink::new(output.unwrap_or_else(|| config.output_dir.clone()));
                let path = sink.write_digest(format, request.date, &markdown).await?;
                println!("{}", path.display());
            }
        }

        Commands::Email {
            input,
            theme,
            subject,
            date,
            title,
            no_css,
            output,
            send,
        } => {
            let request = build_request(&input, DigestFormat::Email, date, title, &config).await?;
            let theme = theme.map_or(config.email_theme, |t| ThemeName::parse(&t));

            let mut renderer = EmailRenderer::new(theme.theme())?
                .with_css(!no_css)
                .with_group_sorting(config.sort_groups_by_confidence);
            if let Some(subject) = subject {
                renderer = renderer.with_subject_template(subject);
            }
            let email = renderer.render(&request)?;

            let sink = FileSink::new(output.unwrap_or_else(|| config.output_dir.clone()));
            let path = sink.write_email(request.date, &email.html).await?;
            println!("{}", path.display());

            if send {
                let text = build_composer(&config)?
                    .compose(&request)
                    .await
                    .to_markdown();
                EmailSender::from_env()
                    .context("SMTP is not configured")?
                    .send(&email.subject, &email.html, &text)
                    .await?;
            }
        }

        Commands::Chat {
            input,
            platform,
            style,
            title,
            webhook_url,
            dry_run,
        } => {
            let platform = Platform::parse(&platform)?;
            let style = MessageStyle::parse(&style)?;
            let digest_input = read_input(&input).await?;

            let title = title
                .or_else(|| config.custom_title.clone())
                .unwrap_or_else(|| DigestFormat::Standard.profile().title.to_string());
            let message = chat_message(title, &digest_input.entries, style);

            if dry_run {
                let payload = match platform {
                    Platform::Slack => serde_json::to_value(SlackChannel::format_payload(&message))?,
                    Platform::Discord => {
                        serde_json::to_value(DiscordChannel::format_payload(&message))?
                    }
                };
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                let channel = channel_for(platform, webhook_url.as_deref())?;
                channel.send(&message).await?;
                println!("Sent {} digest to {platform}", message.visible_items().len());
            }
        }

        Commands::Formats => {
            println!(
                "{:<12} {:>8} {:>8}  {}",
                "FORMAT", "SUMMARY", "DIGEST", "TITLE"
            );
            for format in DigestFormat::all() {
                let profile: &FormatProfile = format.profile();
                println!(
                    "{:<12} {:>8} {:>8}  {}",
                    format.as_str(),
                    word_budget(profile.max_summary_words),
                    word_budget(profile.max_digest_words),
                    profile.title
                );
            }
        }
    }

    Ok(())
}

fn word_budget(words: usize) -> String {
    if words == 0 {
        "-".to_string()
    } else {
        words.to_string()
    }
}

async fn read_input(path: &Path) -> Result<DigestInput> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid digest input in {}", path.display()))
}

async fn build_request(
    input: &Path,
    format: DigestFormat,
    date: Option<NaiveDate>,
    title: Option<String>,
    config: &DigestConfig,
) -> Result<DigestRequest> {
    let digest_input = read_input(input).await?;
    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());

    let mut request = DigestRequest::new(digest_input, format, date);
    if let Some(title) = title.or_else(|| config.custom_title.clone()) {
        request = request.with_title(title);
    }
    Ok(request)
}

fn build_composer(config: &DigestConfig) -> Result<DigestComposer> {
    let mut composer = DigestComposer::new()
        .with_group_sorting(config.sort_groups_by_confidence)
        .with_prompt_timeout(config.prompt_timeout);

    if let Some(api_key) = &config.anthropic_api_key {
        let generator = AnthropicPromptCorner::with_timeout(api_key.clone(), config.prompt_timeout)?
            .with_model(config.prompt_model.clone());
        composer = composer.with_prompt_corner(Arc::new(generator));
    }

    Ok(composer)
}
