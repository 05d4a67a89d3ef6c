use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use std::io::{self, Write};
use std::time::Duration;

use mealroast_core::{AgeBand, AnalysisClient, Gender, MealAnalysis, MealType, Profile};
use mealroast_journal::{JournalEntry, JournalStore, MonthView};

use crate::cli::Args;
use crate::images::encode_images;
use crate::logging::log_error;
use crate::output::{print_calendar, print_day_details, print_report};
use crate::session::{CaptureSession, MAX_IMAGES};

fn analysis_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner} {msg}")
            .unwrap(),
    );
    spinner.set_message("The AI is loading its insults...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Record a successful analysis in the journal, stamped with today's date.
///
/// Persistence happens here, once, immediately after the gateway call
/// succeeds; later item renames in the displayed result never reach the
/// journal.
pub fn commit_result(
    journal: &mut JournalStore,
    meal_type: MealType,
    analysis: MealAnalysis,
) -> JournalEntry {
    let entry = JournalEntry::today(meal_type, analysis);
    journal.append(entry.clone());
    entry
}

/// Run one analysis submission: spinner while the single in-flight request
/// resolves, then either render-and-record or a generic failure alert.
///
/// On failure nothing is recorded and the caller's pending images stay as
/// they are, so the user may retry manually. No retries happen here.
async fn run_analysis(
    client: &AnalysisClient,
    journal: &mut JournalStore,
    images: &[String],
    profile: &Profile,
    meal_type: MealType,
) -> Option<MealAnalysis> {
    let spinner = analysis_spinner();

    match client.analyze_meal(images, profile, meal_type).await {
        Ok(analysis) => {
            spinner.finish_and_clear();
            commit_result(journal, meal_type, analysis.clone());
            print_report(&analysis);
            Some(analysis)
        }
        Err(e) => {
            spinner.finish_and_clear();
            error!("Analysis submission failed: {}", e);
            log_error("Something went wrong during the analysis. Your photos are untouched; try again.");
            None
        }
    }
}

/// One-shot mode: encode the given photos, analyze, report, record
pub async fn run_one_shot(
    args: &Args,
    client: &AnalysisClient,
    journal: &mut JournalStore,
) -> Result<()> {
    // Silently ignore anything beyond the cap
    let capped = &args.images[..args.images.len().min(MAX_IMAGES)];
    if capped.len() < args.images.len() {
        debug!(
            "Ignoring {} images beyond the cap of {}",
            args.images.len() - capped.len(),
            MAX_IMAGES
        );
    }

    let encoded = encode_images(capped).await;
    if encoded.is_empty() {
        log_error("None of the given photos could be read.");
        return Ok(());
    }

    let profile = Profile {
        age: args.age,
        gender: args.gender,
    };
    info!(
        "Analyzing {} photo(s) as {} for a {} {}",
        encoded.len(),
        args.meal_type,
        profile.age,
        profile.gender
    );

    run_analysis(client, journal, &encoded, &profile, args.meal_type).await;
    Ok(())
}

/// History mode: current-month calendar plus per-day details
pub fn run_history(journal: &JournalStore, day: Option<u32>) -> Result<()> {
    let view = MonthView::current();

    if let Some(day) = day {
        show_day(journal, &view, day);
        return Ok(());
    }

    browse_history(journal, &view)
}

fn show_day(journal: &JournalStore, view: &MonthView, day: u32) {
    let label = view.format_day(day);
    match view.date_for_day(day) {
        Some(date) => print_day_details(&label, &journal.query_by_date(date)),
        None => log_error(&format!("{} is not a day of this month.", label)),
    }
}

/// Print the calendar, then let the user inspect days until they quit
fn browse_history(journal: &JournalStore, view: &MonthView) -> Result<()> {
    print_calendar(view, &view.marked_days(journal));

    loop {
        let input: String = Input::new()
            .with_prompt("Day to inspect (empty to quit)")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read day selection")?;

        let input = input.trim();
        if input.is_empty() {
            return Ok(());
        }

        match input.parse::<u32>() {
            Ok(day) if (1..=view.days_in_month()).contains(&day) => show_day(journal, view, day),
            _ => println!(
                "Enter a day between 1 and {}, or nothing to quit.",
                view.days_in_month()
            ),
        }
    }
}

fn print_session_status(session: &CaptureSession) {
    let result_note = if session.result().is_some() {
        " | result on display".to_string()
    } else {
        String::new()
    };
    println!(
        "{}",
        format!(
            "[{} | {}/{} photos | {} {}{}]",
            session.meal_type(),
            session.images().len(),
            MAX_IMAGES,
            session.profile().age,
            session.profile().gender,
            result_note
        )
        .dimmed()
    );
}

fn print_interactive_help() {
    println!("{}", "Commands:".cyan());
    println!("  add <path>...    add meal photos (cap of {})", MAX_IMAGES);
    println!("  rm <n>           remove pending photo n (1-based)");
    println!("  meal             pick the meal type (clears photos and result)");
    println!("  age / gender     set your profile");
    println!("  go               run the analysis");
    println!("  rename <n> <name> rename item n of the displayed result");
    println!("  log              browse this month's journal");
    println!("  reset            start over");
    println!("  exit             leave");
}

/// Interactive capture session: a command loop over one `CaptureSession`
pub async fn run_interactive(client: &AnalysisClient, journal: &mut JournalStore) -> Result<()> {
    println!("Welcome to {}.", "MEALROAST".red().bold());
    println!("The sweet devil that will shred your soul in pastel tones 😈");
    print_interactive_help();
    println!();

    let mut session = CaptureSession::new();

    loop {
        print_session_status(&session);
        print!("{}: ", "mealroast".green().bold());
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .context("Failed to read input")?;

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, rest) = match input.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (input, ""),
        };

        match command.to_lowercase().as_str() {
            "exit" | "quit" => {
                println!("Fine. The journal remembers everything.");
                break;
            }
            "help" => print_interactive_help(),
            "add" => handle_add(&mut session, rest).await,
            "rm" => handle_remove(&mut session, rest),
            "meal" => handle_meal_select(&mut session)?,
            "age" => handle_age_select(&mut session)?,
            "gender" => handle_gender_select(&mut session)?,
            "go" => {
                if !session.can_analyze() {
                    if session.result().is_some() {
                        println!("A result is already on display. Use 'meal' or 'reset' to start a new capture.");
                    } else {
                        println!("Add at least one photo first.");
                    }
                    continue;
                }
                let images = session.images().to_vec();
                let profile = session.profile();
                let meal_type = session.meal_type();
                if let Some(analysis) =
                    run_analysis(client, journal, &images, &profile, meal_type).await
                {
                    session.set_result(analysis);
                }
            }
            "rename" => handle_rename(&mut session, rest),
            "log" => {
                let view = MonthView::current();
                browse_history(journal, &view)?;
            }
            "reset" => {
                session.reset();
                println!("Back to square one.");
            }
            _ => println!("Unknown command '{}'. Try 'help'.", command),
        }

        println!(); // Add spacing between interactions
    }

    Ok(())
}

async fn handle_add(session: &mut CaptureSession, rest: &str) {
    if rest.is_empty() {
        println!("Usage: add <path>...");
        return;
    }
    let paths: Vec<std::path::PathBuf> = rest.split_whitespace().map(Into::into).collect();
    let encoded = encode_images(&paths).await;
    let offered = encoded.len();
    let accepted = session.add_images(encoded);
    if accepted < offered {
        debug!("Dropped {} photos beyond the cap", offered - accepted);
    }
    println!(
        "{} photo(s) pending, {} slot(s) left.",
        session.images().len(),
        session.capacity()
    );
}

fn handle_remove(session: &mut CaptureSession, rest: &str) {
    match rest.parse::<usize>() {
        Ok(n) if n >= 1 && session.remove_image(n - 1) => {
            println!(
                "Removed. {} photo(s) pending, {} slot(s) left.",
                session.images().len(),
                session.capacity()
            );
        }
        _ => println!("Usage: rm <n> with n between 1 and {}.", session.images().len()),
    }
}

fn handle_meal_select(session: &mut CaptureSession) -> Result<()> {
    let labels: Vec<&str> = MealType::ALL.iter().map(|m| m.label()).collect();
    let choice = Select::new()
        .with_prompt("What are you about to eat (or already ate)?")
        .items(&labels)
        .default(0)
        .interact()
        .context("Failed to read meal type selection")?;
    session.set_meal_type(MealType::ALL[choice]);
    println!("Meal set to {}. Pending photos and result cleared.", session.meal_type());
    Ok(())
}

fn handle_age_select(session: &mut CaptureSession) -> Result<()> {
    let labels: Vec<&str> = AgeBand::ALL.iter().map(|a| a.label()).collect();
    let choice = Select::new()
        .with_prompt("Age bracket")
        .items(&labels)
        .default(1)
        .interact()
        .context("Failed to read age selection")?;
    session.set_age(AgeBand::ALL[choice]);
    Ok(())
}

fn handle_gender_select(session: &mut CaptureSession) -> Result<()> {
    let labels = [Gender::Female.label(), Gender::Male.label()];
    let choice = Select::new()
        .with_prompt("Gender")
        .items(&labels)
        .default(0)
        .interact()
        .context("Failed to read gender selection")?;
    session.set_gender(if choice == 0 { Gender::Female } else { Gender::Male });
    Ok(())
}

fn handle_rename(session: &mut CaptureSession, rest: &str) {
    let Some((index, name)) = rest.split_once(char::is_whitespace) else {
        println!("Usage: rename <n> <new name>");
        return;
    };
    match index.parse::<usize>() {
        Ok(n) if n >= 1 && session.rename_item(n - 1, name.trim()) => {
            if let Some(result) = session.result() {
                print_report(result);
            }
        }
        _ => println!("No such item. The report numbers items from 1."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use mealroast_core::AnalysisItem;
    use tempfile::tempdir;

    fn toast_analysis() -> MealAnalysis {
        MealAnalysis {
            items: vec![AnalysisItem {
                name: "toast".to_string(),
                kcal: 150.0,
            }],
            total_kcal: 150.0,
            ..MealAnalysis::default()
        }
    }

    #[test]
    fn test_commit_result_appends_one_entry_dated_today() {
        let dir = tempdir().unwrap();
        let mut journal = JournalStore::load(dir.path().join("journal.json"));

        let before = journal.len();
        let entry = commit_result(&mut journal, MealType::Breakfast, toast_analysis());

        assert_eq!(journal.len(), before + 1);
        assert_eq!(entry.date, Local::now().date_naive());
        assert_eq!(entry.meal_type, MealType::Breakfast);
        assert_eq!(entry.analysis.total_kcal, 150.0);
    }

    #[tokio::test]
    async fn test_failed_analysis_leaves_journal_unchanged() {
        let dir = tempdir().unwrap();
        let mut journal = JournalStore::load(dir.path().join("journal.json"));

        // Nothing listens here, so the submission fails
        let config = mealroast_core::GatewayConfig {
            api_key: Some("test-key".to_string()),
            api_base: Some("http://127.0.0.1:9".to_string()),
            ..mealroast_core::GatewayConfig::default()
        };
        let client = AnalysisClient::new(config).unwrap();

        let images = vec!["data:image/jpeg;base64,AAAA".to_string()];
        let result = run_analysis(
            &client,
            &mut journal,
            &images,
            &Profile::default(),
            MealType::Breakfast,
        )
        .await;

        assert!(result.is_none());
        assert!(journal.is_empty());
    }

    #[test]
    fn test_rename_after_commit_does_not_touch_persisted_entry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.json");
        let mut journal = JournalStore::load(path.clone());

        let analysis = toast_analysis();
        commit_result(&mut journal, MealType::Breakfast, analysis.clone());

        // The user edits the displayed result after persistence already
        // happened
        let mut session = CaptureSession::new();
        session.set_result(analysis);
        assert!(session.rename_item(0, "artisanal toast"));

        let reloaded = JournalStore::load(path);
        assert_eq!(reloaded.entries()[0].analysis.items[0].name, "toast");
        assert_eq!(session.result().unwrap().total_kcal, 150.0);
    }
}
