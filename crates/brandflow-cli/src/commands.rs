//! Command handlers: thin glue from parsed args to the core.

use anyhow::Result;
use brandflow_ai::agent::BrandBrief;
use brandflow_core::{AppCore, BrainstormRequest, StudioService};
use brandflow_models::{ValidationResult, ValidationStatus};
use colored::Colorize;
use comfy_table::{Table, presets::UTF8_FULL};
use serde_json::Map;

use crate::cli::{Commands, SessionsCommand};

pub async fn run(core: &AppCore, command: Commands) -> Result<()> {
    match command {
        Commands::New { user } => {
            let session = core.store.create(&user, Map::new())?;
            println!("Created session {}", session.session_id);
        }

        Commands::Generate {
            session,
            user,
            description,
            industry,
            personality,
            audience,
            count,
            category,
        } => {
            let studio = StudioService::new(core);
            let outcome = studio
                .brainstorm(BrainstormRequest {
                    user_id: user,
                    session_id: session,
                    brief: BrandBrief {
                        product_description: description,
                        industry,
                        brand_personality: personality,
                        target_audience: audience,
                    },
                    count,
                    category,
                })
                .await?;

            println!("Session: {}\n", outcome.session_id);
            print_validation_table(&outcome.validations);

            if let Some(story) = &outcome.story {
                println!("\nTaglines for the top candidate:");
                for tagline in &story.taglines {
                    println!("  - {tagline}");
                }
            }

            if let Some(compaction) = &outcome.compaction {
                println!(
                    "\nSession history compacted ({} turns, {:.0}% smaller).",
                    compaction.original_turns,
                    compaction.compaction_ratio * 100.0
                );
            }
        }

        Commands::Validate { names, category } => {
            let results = core.validator.validate_batch(&names, category.as_deref()).await;
            print_validation_table(&results);
        }

        Commands::Seo {
            name,
            description,
            industry,
        } => {
            let result = core.seo.optimize(&name, &description, &industry);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Story {
            name,
            description,
            personality,
            audience,
        } => {
            let story = core
                .story
                .generate(&name, &description, &personality, &audience)
                .await;
            println!("Taglines:");
            for tagline in &story.taglines {
                println!("  - {tagline}");
            }
            println!("\nStory:\n{}", story.brand_story);
            println!("\nHero copy:\n{}", story.hero_copy);
            println!("\nValue proposition:\n{}", story.value_proposition);
        }

        Commands::Sessions(sessions) => run_sessions(core, sessions)?,

        Commands::Stats => {
            let stats = core.store.statistics()?;
            println!("Sessions:     {}", stats.total_sessions);
            println!("Brands:       {}", stats.total_brands);
            println!("Events:       {}", stats.total_events);
            println!("Unique users: {}", stats.unique_users);
            println!("Storage root: {}", stats.storage_root);
        }
    }

    Ok(())
}

fn run_sessions(core: &AppCore, command: SessionsCommand) -> Result<()> {
    match command {
        SessionsCommand::List { user, limit } => {
            let summaries = core.store.list(user.as_deref(), limit)?;
            let mut table = Table::new();
            table.load_preset(UTF8_FULL).set_header(vec![
                "Session",
                "User",
                "Updated",
                "Events",
                "Brands",
            ]);
            for summary in summaries {
                table.add_row(vec![
                    summary.session_id,
                    summary.user_id,
                    summary.updated_at.to_rfc3339(),
                    summary.event_count.to_string(),
                    summary.brand_count.to_string(),
                ]);
            }
            println!("{table}");
        }
        SessionsCommand::Show { id } => {
            let session = core.store.get(&id)?;
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        SessionsCommand::Delete { id } => {
            if core.store.delete(&id)? {
                println!("Deleted session {id}");
            } else {
                println!("No session {id}");
            }
        }
    }
    Ok(())
}

fn colored_status(status: ValidationStatus) -> String {
    match status {
        ValidationStatus::Clear => "clear".green().to_string(),
        ValidationStatus::Caution => "caution".yellow().to_string(),
        ValidationStatus::Blocked => "blocked".red().to_string(),
    }
}

fn print_validation_table(results: &[ValidationResult]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Name",
        "Score",
        "Status",
        "Best domain",
        "Recommendation",
    ]);
    for result in results {
        table.add_row(vec![
            result.brand_name.clone(),
            result.overall_score.to_string(),
            colored_status(result.validation_status),
            result.domain_check.best_available.to_string(),
            result.recommendation.clone(),
        ]);
    }
    println!("{table}");

    for result in results {
        for concern in &result.concerns {
            println!("{} {}: {}", "!".yellow(), result.brand_name, concern);
        }
    }
}
