//! Questline CLI - location-based scavenger-hunt companion.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use questline_catalog::{QuestCatalog, SortBy};
use questline_core::{format_distance, Coordinate, QuestId};
use questline_geoloc::{
    resolve_position, DeniedPositionSource, PositionOptions, PositionSource, StaticPositionSource,
};
use questline_profile::ProfileStore;
use questline_storage::JsonStorage;
use questline_tracker::{
    can_complete_stop, estimated_walk_minutes, QuestTracker, COMPLETION_RADIUS_METERS,
};
use tracing::Level;

#[derive(Parser)]
#[command(name = "questline")]
#[command(about = "Location-based scavenger-hunt companion", long_about = None)]
struct Cli {
    /// Data directory for persisted state
    #[arg(long, default_value = ".questline")]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Distance,
    Duration,
    Difficulty,
}

impl From<SortArg> for SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Distance => SortBy::Distance,
            SortArg::Duration => SortBy::Duration,
            SortArg::Difficulty => SortBy::Difficulty,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the quest catalog
    Browse {
        /// Filter by interest category id
        #[arg(long)]
        interest: Option<String>,
        /// Sort order
        #[arg(long, value_enum, default_value = "distance")]
        sort: SortArg,
    },
    /// Show a quest's stops and details
    Show {
        /// Quest id
        quest: String,
    },
    /// Start a quest
    Start {
        /// Quest id
        quest: String,
    },
    /// Show the active quest and the current stop
    Status,
    /// Try to complete the current stop from your recorded location
    Checkin,
    /// Cancel the active quest
    Cancel,
    /// List completed quests
    History,
    /// Update your location
    Locate {
        /// Latitude in degrees
        #[arg(long, requires = "lng")]
        lat: Option<f64>,
        /// Longitude in degrees
        #[arg(long, requires = "lat")]
        lng: Option<f64>,
        /// Simulate a denied location permission
        #[arg(long, conflicts_with_all = ["lat", "lng"])]
        denied: bool,
    },
    /// Select interest categories
    Interests {
        /// Interest category ids
        ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    let catalog = QuestCatalog::builtin();
    let mut tracker = QuestTracker::new(JsonStorage::new(&cli.data_dir).await?);
    tracker.load().await;
    let mut profile = ProfileStore::new(JsonStorage::new(&cli.data_dir).await?);
    profile.load().await;

    match cli.command {
        Commands::Browse { interest, sort } => {
            let summaries = catalog.browse(interest.as_deref(), sort.into(), profile.location());

            println!("Quests ({})", summaries.len());
            for summary in summaries {
                let quest = summary.quest;
                let distance = match summary.distance_meters {
                    Some(d) => format_distance(d),
                    None => "distance unknown".to_string(),
                };
                println!(
                    "  {} | {} | {:?} | {} min | {}",
                    quest.quest_id, quest.title, quest.difficulty,
                    quest.estimated_duration_minutes, distance,
                );
            }
        }
        Commands::Show { quest } => {
            let quest_id = QuestId::new(quest);
            let Some(quest) = catalog.find_quest(&quest_id) else {
                println!("Quest not found");
                return Ok(());
            };

            println!("{} - {}", quest.quest_id, quest.title);
            println!("  {}", quest.full_description);
            println!(
                "  {:?} | {} min | {} km | tags: {}",
                quest.difficulty,
                quest.estimated_duration_minutes,
                quest.total_distance_km,
                quest.tags.join(", "),
            );
            if tracker.is_completed(&quest.quest_id) {
                println!("  Completed before");
            }
            println!("  Stops ({})", quest.stop_count());
            for (index, stop) in quest.stops.iter().enumerate() {
                println!(
                    "    {}. {} [{}] - {}",
                    index + 1,
                    stop.name,
                    stop.activity.label(),
                    stop.address,
                );
            }
        }
        Commands::Start { quest } => {
            let quest_id = QuestId::new(quest);
            if catalog.find_quest(&quest_id).is_none() {
                println!("Quest not found");
                return Ok(());
            }

            match tracker.start(quest_id).await {
                Ok(record) => {
                    println!("Quest started: {}", record.quest_id);
                    println!("Navigate to your first stop.");
                }
                Err(e) => println!("{e}"),
            }
        }
        Commands::Status => {
            let Some(active) = tracker.active() else {
                println!("No active quest");
                return Ok(());
            };
            let Some(quest) = catalog.find_quest(&active.quest_id) else {
                println!("Active quest '{}' is not in the catalog", active.quest_id);
                return Ok(());
            };

            println!(
                "{} - {} of {} stops complete",
                quest.title,
                active.completed_stop_ids.len(),
                quest.stop_count(),
            );
            if let Some(stop) = quest.stop_at(active.current_stop_index) {
                println!("Next stop: {} - {}", stop.name, stop.description);
                if let Some(user) = profile.location() {
                    let distance = questline_core::distance_meters(user, stop.coordinate);
                    println!(
                        "  {} - {} min walk",
                        format_distance(distance),
                        estimated_walk_minutes(distance),
                    );
                }
            }
        }
        Commands::Checkin => {
            let Some(active) = tracker.active() else {
                println!("No active quest");
                return Ok(());
            };
            let Some(quest) = catalog.find_quest(&active.quest_id).cloned() else {
                println!("Active quest '{}' is not in the catalog", active.quest_id);
                return Ok(());
            };
            let Some(stop) = quest.stop_at(active.current_stop_index).cloned() else {
                println!("All stops already complete");
                return Ok(());
            };

            let user = profile.location();
            if !can_complete_stop(user, Some(stop.coordinate), COMPLETION_RADIUS_METERS) {
                match user {
                    Some(user) => {
                        let distance = questline_core::distance_meters(user, stop.coordinate);
                        println!(
                            "Get closer to mark complete ({})",
                            format_distance(distance)
                        );
                    }
                    None => println!("No location recorded; run `questline locate` first"),
                }
                return Ok(());
            }

            let record = tracker.advance_stop(&quest, &stop.stop_id).await?;
            if record.completed_stop_ids.len() == quest.stop_count() {
                if let Some(completed) = tracker.complete().await {
                    println!("Quest complete! You finished {}", quest.title);
                    println!(
                        "  {} stops in {} minutes",
                        completed.completed_stop_ids.len(),
                        completed.duration_minutes(),
                    );
                }
            } else {
                println!("Stop completed! On to the next one.");
            }
        }
        Commands::Cancel => {
            tracker.cancel().await;
            println!("Active quest cancelled");
        }
        Commands::History => {
            let archive = tracker.archive();
            println!("Completed quests ({})", archive.len());
            for record in archive {
                let title = catalog
                    .find_quest(&record.quest_id)
                    .map(|q| q.title.as_str())
                    .unwrap_or(record.quest_id.as_str());
                println!(
                    "  {} | {} stops | {} min | {}",
                    title,
                    record.completed_stop_ids.len(),
                    record.duration_minutes(),
                    record.completed_at.format("%Y-%m-%d %H:%M"),
                );
            }
        }
        Commands::Locate { lat, lng, denied } => {
            let source: Box<dyn PositionSource> = match (lat, lng, denied) {
                (Some(lat), Some(lng), _) => {
                    Box::new(StaticPositionSource(Coordinate::new(lat, lng)))
                }
                _ => Box::new(DeniedPositionSource),
            };

            let fix = resolve_position(source.as_ref(), &PositionOptions::default()).await;
            if let Some(message) = &fix.message {
                println!("{message}");
            }
            profile.set_location(fix.coordinate).await;
            println!(
                "Location set to {:.4}, {:.4}",
                fix.coordinate.latitude, fix.coordinate.longitude,
            );
        }
        Commands::Interests { ids } => {
            let known = questline_core::builtin_interests();
            let unknown: Vec<_> = ids
                .iter()
                .filter(|id| !known.iter().any(|k| &k.id == *id))
                .collect();
            if !unknown.is_empty() {
                println!(
                    "Unknown interests: {}",
                    unknown
                        .iter()
                        .map(|s| s.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                );
                println!("Available:");
                for category in &known {
                    println!("  {} {} - {}", category.icon, category.id, category.description);
                }
                return Ok(());
            }

            profile.set_interests(ids).await;
            profile.complete_onboarding().await;
            println!(
                "Interests saved: {}",
                profile.profile().interests.join(", ")
            );
        }
    }

    Ok(())
}
