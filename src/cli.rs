use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::service::schedule_service::ScheduleService;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a team's schedule and print the ICS document.
    Ics {
        #[arg(long)]
        team_id: String,
        #[arg(long, default_value = "球队")]
        team_name: String,
        /// Write the document here instead of stdout.
        #[arg(long)]
        output: Option<String>,
    },
    /// Print the upcoming matches.
    Preview {
        #[arg(long)]
        team_id: String,
        #[arg(long, default_value = "球队")]
        team_name: String,
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

pub async fn cli(service: Arc<ScheduleService>) {
    // Fine to panic here
    let cli = Cli::parse();
    match &cli.command {
        Commands::Ics {
            team_id,
            team_name,
            output,
        } => match service.team_calendar(team_id, team_name, true, Utc::now()).await {
            Ok(ics) => {
                if let Some(path) = output {
                    if let Err(e) = std::fs::write(path, &ics) {
                        println!("Failed to write {}: {}", path, e);
                    }
                } else {
                    print!("{}", ics);
                }
            }
            Err(e) => println!("Failed to build calendar: {}", e),
        },
        Commands::Preview {
            team_id,
            team_name,
            limit,
        } => match service.team_schedule(team_id, team_name, Utc::now()).await {
            Ok(matches) => {
                for m in matches.iter().take((*limit).clamp(1, 20)) {
                    println!("{}  {}", m.start.format("%m-%d %H:%M"), m.summary);
                }
            }
            Err(e) => println!("Failed to fetch schedule: {}", e),
        },
    }
}
