use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{HttpStyleWebhook, ImageUpload, LeadCapture, StyleSession, WizardStage};
use shared::domain::{Budget, FilterSettings, Fit, Gender, Occasion, Season, Vibe};
use tracing::info;

mod config;
mod render;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "chroma", about = "Color and style analysis for a portrait photo")]
struct Args {
    /// Portrait image to analyze.
    image: PathBuf,
    /// Overrides the configured webhook endpoint.
    #[arg(long)]
    webhook_url: Option<String>,
    #[arg(long)]
    gender: Option<Gender>,
    #[arg(long)]
    occasion: Option<Occasion>,
    #[arg(long)]
    budget: Option<Budget>,
    #[arg(long)]
    vibe: Option<Vibe>,
    #[arg(long)]
    season: Option<Season>,
    #[arg(long)]
    fit: Option<Fit>,
    /// Clothing category to shop for; repeatable.
    #[arg(long = "category")]
    categories: Vec<String>,
    /// Re-query recommendations with the chosen filters after the analysis.
    #[arg(long)]
    refine: bool,
    /// Request the emailed style guide (needs --email).
    #[arg(long, requires = "email")]
    first_name: Option<String>,
    #[arg(long, requires = "first_name")]
    email: Option<String>,
    /// Print the mapped result as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn apply_filter_args(filters: &mut FilterSettings, args: &Args) -> Result<()> {
    if let Some(gender) = args.gender {
        filters.set_gender(gender);
    }
    if let Some(occasion) = args.occasion {
        filters.occasion = occasion;
    }
    if let Some(budget) = args.budget {
        filters.budget = budget;
    }
    if let Some(vibe) = args.vibe {
        filters.vibe = vibe;
    }
    if let Some(season) = args.season {
        filters.season = season;
    }
    if let Some(fit) = args.fit {
        filters.fit = fit;
    }
    for category in &args.categories {
        if !filters.toggle_category(category)? {
            // Listed twice on the command line; keep it selected.
            filters.toggle_category(category)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings();
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    let endpoint = args.webhook_url.clone().unwrap_or(settings.webhook_url);
    let webhook = HttpStyleWebhook::new(&endpoint)
        .with_context(|| format!("invalid webhook url '{endpoint}'"))?;
    let image = ImageUpload::from_path(&args.image)
        .await
        .with_context(|| format!("failed to load image {}", args.image.display()))?;

    let mut session = StyleSession::new(webhook);
    apply_filter_args(session.wizard_mut().filters_mut()?, &args)?;

    info!(endpoint = %endpoint, "starting style analysis");
    let stage = session.analyze(&image).await?;
    if stage == WizardStage::Error {
        eprintln!("{}", render::render_wizard(session.wizard()));
        bail!("style analysis failed");
    }

    if args.refine {
        session.find_outfits().await?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session.wizard().result())?);
    } else {
        println!("{}", render::render_wizard(session.wizard()));
    }

    if let (Some(first_name), Some(email)) = (&args.first_name, &args.email) {
        let mut lead = LeadCapture::new(first_name.as_str(), email.as_str());
        session.request_style_guide(&mut lead).await?;
        println!("{}", render::render_lead(&lead));
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
