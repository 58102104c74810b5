// Birthday Keeper
// Main entry point

use anyhow::{anyhow, Context, Result};
use birthday_keeper::services::birthday::BirthdayService;
use birthday_keeper::services::database::Database;
use birthday_keeper::services::settings::SettingsService;
use birthday_keeper::services::wish::{WishError, WishLedger};
use chrono::Utc;
use directories::ProjectDirs;
use std::fs;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Birthday Keeper");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let as_json = args.iter().any(|a| a == "--json");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();
    let owner_id = positional
        .first()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "default".to_string());

    let db = open_database()?;
    db.initialize_schema()?;

    let now = Utc::now();

    // `birthday-keeper <owner> wish <id>` records a wish; anything else
    // prints the overview.
    if positional.get(1).map(|s| s.as_str()) == Some("wish") {
        let id: i64 = positional
            .get(2)
            .ok_or_else(|| anyhow!("Usage: birthday-keeper <owner> wish <id>"))?
            .parse()
            .context("Birthday id must be a number")?;
        return send_wish(&db, &owner_id, id);
    }

    let service = BirthdayService::new(db.connection());

    if as_json {
        let report = serde_json::json!({
            "today": service.today(&owner_id, now)?,
            "upcoming": service.upcoming(&owner_id, now)?,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let today = service.today(&owner_id, now)?;
    if today.count > 0 {
        println!("Birthdays today:");
        for birthday in &today.items {
            println!("  {}", birthday.name);
        }
    } else {
        println!("No birthdays today.");
    }

    let upcoming = service.upcoming(&owner_id, now)?;
    if !upcoming.is_empty() {
        println!("\nUpcoming:");
        for entry in &upcoming {
            let c = &entry.countdown;
            println!(
                "  {} on {} (in {}d {:02}h {:02}m)",
                entry.birthday.name, entry.next_occurrence, c.days, c.hours, c.minutes
            );
        }
    }

    Ok(())
}

fn send_wish(db: &Database, owner_id: &str, id: i64) -> Result<()> {
    let settings = SettingsService::new(db.connection()).get()?;
    let ledger = WishLedger::new(db.connection());

    match ledger.attempt_send(owner_id, id, Utc::now(), settings.tz()) {
        Ok(sent) => {
            println!("Wish recorded at {}", sent.sent_at.to_rfc3339());
            Ok(())
        }
        Err(WishError::AlreadySent { last_sent }) => {
            println!("Already wished this year (at {})", last_sent.to_rfc3339());
            Ok(())
        }
        Err(WishError::NotFound) => Err(anyhow!("No birthday with id {}", id)),
        Err(e) => Err(e.into()),
    }
}

fn open_database() -> Result<Database> {
    let dirs = ProjectDirs::from("", "", "birthday-keeper")
        .context("Could not determine data directory")?;
    fs::create_dir_all(dirs.data_dir())
        .with_context(|| format!("Failed to create {}", dirs.data_dir().display()))?;

    let path = dirs.data_dir().join("birthdays.db");
    log::info!("Opening database at {}", path.display());
    Database::new(&path.to_string_lossy())
}
