use clap::Parser;
use std::path::PathBuf;

use mealroast_core::{AgeBand, Gender, MealType};

/// Photograph your meal, get roasted, log the damage
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Meal photos to analyze (up to 3; extras are ignored)
    #[arg(index = 1)]
    pub images: Vec<PathBuf>,

    /// Which meal this is: breakfast, lunch, dinner, snack or late-night-snack
    #[arg(short, long, default_value = "breakfast")]
    pub meal_type: MealType,

    /// Your age bracket: 10s, 20s, 30s, 40s or 50+
    #[arg(long, default_value = "20s")]
    pub age: AgeBand,

    /// Your gender: female or male
    #[arg(long, default_value = "female")]
    pub gender: Gender,

    /// Enter the interactive capture session
    #[arg(short, long, default_value_t = false)]
    pub interactive: bool,

    /// Browse the journal for the current month
    #[arg(long, default_value_t = false)]
    pub history: bool,

    /// Jump straight to one day of the current month (implies --history)
    #[arg(long)]
    pub day: Option<u32>,
}
