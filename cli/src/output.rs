use colored::*;

use mealroast_core::{ExerciseRecommendation, MealAnalysis};
use mealroast_journal::{JournalEntry, MonthView};

/// Video search URL for one exercise recommendation
pub fn video_search_url(search_term: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}",
        urlencoding::encode(search_term)
    )
}

/// Print the full analysis report: fact attack first, then the itemized
/// breakdown, the total, and the exercise plan.
pub fn print_report(analysis: &MealAnalysis) {
    println!();
    println!("{}", "⚡ TODAY'S FACT ATTACK".red().bold());
    if analysis.fact_attack.is_empty() {
        println!("  (the service had nothing to say)");
    } else {
        println!("  \"{}\"", analysis.fact_attack.bold());
    }
    println!();

    println!("{}", "Analysis report".magenta().bold());
    for item in &analysis.items {
        println!(
            "  {:<30} {}",
            item.name,
            format!("{:.0} kcal", item.kcal).yellow().bold()
        );
    }
    if analysis.items.is_empty() {
        println!("  (no items identified)");
    }
    println!(
        "  {:<30} {}",
        "Total".bold(),
        format!("{:.0} kcal", analysis.total_kcal).red().bold()
    );

    if !analysis.personalized_advice.is_empty() {
        println!();
        println!("{} {}", "Advice:".cyan().bold(), analysis.personalized_advice);
    }

    if !analysis.exercise_plan.is_empty() {
        println!();
        println!("{}", "🔥 Repent and exercise".cyan().bold());
        for exercise in &analysis.exercise_plan {
            print_exercise_card(exercise);
        }
    }
    println!();
}

fn print_exercise_card(exercise: &ExerciseRecommendation) {
    println!(
        "  {} {} {}",
        "•".yellow(),
        exercise.name.bold(),
        format!("— {} / {}", exercise.duration, exercise.sets).dimmed()
    );
    println!(
        "    {}",
        video_search_url(&exercise.video_search_term).blue().underline()
    );
}

/// Render the current-month calendar grid. Marked days carry a dot.
pub fn render_calendar_grid(view: &MonthView, marked: &[u32]) -> String {
    let mut grid = String::new();
    for day in 1..=view.days_in_month() {
        if marked.contains(&day) {
            grid.push_str(&format!("[{:>2}•]", day));
        } else {
            grid.push_str(&format!(" {:>2}  ", day));
        }
        if day % 7 == 0 {
            grid.push('\n');
        } else {
            grid.push(' ');
        }
    }
    if !grid.ends_with('\n') {
        grid.push('\n');
    }
    grid
}

/// Print the history calendar for the given month
pub fn print_calendar(view: &MonthView, marked: &[u32]) {
    println!();
    println!(
        "{}",
        format!("History — {:04}-{:02}", view.year, view.month)
            .cyan()
            .bold()
    );
    println!("{}", render_calendar_grid(view, marked));
    println!("{}", "Days with a • have recorded meals.".dimmed());
}

/// Print the detail panel for one selected day
pub fn print_day_details(date_label: &str, entries: &[&JournalEntry]) {
    println!();
    println!("{}", format!("Evidence for {}", date_label).magenta().bold());

    if entries.is_empty() {
        println!("  No records. Not skipping meals, are we? 😈");
        return;
    }

    for entry in entries {
        println!(
            "  {} {}",
            entry.meal_type.to_string().red().bold(),
            format!("{:.0} kcal", entry.analysis.total_kcal).yellow().bold()
        );
        if !entry.analysis.fact_attack.is_empty() {
            println!("    \"{}\"", entry.analysis.fact_attack);
        }
        let items: Vec<String> = entry
            .analysis
            .items
            .iter()
            .map(|i| format!("{} ({:.0}k)", i.name, i.kcal))
            .collect();
        if !items.is_empty() {
            println!("    {}", items.join("  ").dimmed());
        }
        println!();
    }
}

/// Show usage instructions when no images or action are provided
pub fn print_usage_instructions() {
    println!("{}", "Usage:".yellow().bold());
    println!("  {}", "mealroast photo.jpg [photo2.jpg photo3.jpg]".green().bold());
    println!("    Analyze up to 3 meal photos and record the result");
    println!();
    println!("  {}", "mealroast -i".green().bold());
    println!("    Start an interactive capture session");
    println!();
    println!("  {}", "mealroast --history [--day D]".green().bold());
    println!("    Browse this month's journal");
    println!();
    println!("{}", "Options:".cyan());
    println!("  --meal-type <TYPE>  breakfast, lunch, dinner, snack or late-night-snack");
    println!("  --age <BAND>        10s, 20s, 30s, 40s or 50+");
    println!("  --gender <G>        female or male");
    println!("  --help              Show this help message");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_search_url_encodes_term() {
        assert_eq!(
            video_search_url("high intensity interval training"),
            "https://www.youtube.com/results?search_query=high%20intensity%20interval%20training"
        );
    }

    #[test]
    fn test_calendar_grid_marks_only_given_days() {
        let view = MonthView::new(2024, 5);
        let grid = render_calendar_grid(&view, &[3, 17]);

        assert!(grid.contains("[ 3•]"));
        assert!(grid.contains("[17•]"));
        // Exactly two marked days
        assert_eq!(grid.matches('•').count(), 2);
        // All 31 days are present
        assert!(grid.contains("31"));
    }

    #[test]
    fn test_calendar_grid_wraps_weekly() {
        let view = MonthView::new(2024, 2); // 29 days
        let grid = render_calendar_grid(&view, &[]);
        // 29 days wrap into 5 lines
        assert_eq!(grid.lines().count(), 5);
    }
}
