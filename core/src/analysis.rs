use serde::{Deserialize, Serialize};

use crate::errors::{GatewayError, GatewayResult};

/// One identified food item with its estimated calories
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AnalysisItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kcal: f64,
}

/// One recommended exercise for burning off the meal
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ExerciseRecommendation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub sets: String,
    #[serde(default)]
    pub video_search_term: String,
}

/// Structured result of one calorie-estimation request.
///
/// Every field deserializes with a default: the service response is untrusted
/// text and callers must tolerate absent fields. `total_kcal` comes from the
/// service and is never recomputed from `items` (the user may rename items
/// afterwards but never edits calorie values, so the two can diverge only on
/// the service's side).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MealAnalysis {
    #[serde(default)]
    pub items: Vec<AnalysisItem>,
    #[serde(default)]
    pub total_kcal: f64,
    #[serde(default)]
    pub exercise_plan: Vec<ExerciseRecommendation>,
    #[serde(default)]
    pub personalized_advice: String,
    #[serde(default)]
    pub fact_attack: String,
}

/// Parse the completion service's message content into a `MealAnalysis`.
///
/// An empty body is treated as an empty object, so every field falls back to
/// its default. Anything else that is not valid JSON is a hard parse error.
pub fn parse_analysis(content: &str) -> GatewayResult<MealAnalysis> {
    let body = if content.trim().is_empty() {
        "{}"
    } else {
        content
    };
    serde_json::from_str(body)
        .map_err(|e| GatewayError::ParsingError(format!("Malformed analysis JSON: {}", e)))
}

/// The meal being analyzed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MealType {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    LateNightSnack,
}

impl MealType {
    pub const ALL: [MealType; 5] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
        MealType::LateNightSnack,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
            MealType::LateNightSnack => "late-night snack",
        }
    }
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            "late-night-snack" | "late-night snack" => Ok(MealType::LateNightSnack),
            other => Err(format!(
                "unknown meal type '{}' (expected breakfast, lunch, dinner, snack or late-night-snack)",
                other
            )),
        }
    }
}

/// Age bracket of the user profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AgeBand {
    Teens,
    #[default]
    Twenties,
    Thirties,
    Forties,
    FiftyPlus,
}

impl AgeBand {
    pub const ALL: [AgeBand; 5] = [
        AgeBand::Teens,
        AgeBand::Twenties,
        AgeBand::Thirties,
        AgeBand::Forties,
        AgeBand::FiftyPlus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgeBand::Teens => "teens",
            AgeBand::Twenties => "20s",
            AgeBand::Thirties => "30s",
            AgeBand::Forties => "40s",
            AgeBand::FiftyPlus => "50s or older",
        }
    }
}

impl std::fmt::Display for AgeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for AgeBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "teens" | "10s" => Ok(AgeBand::Teens),
            "twenties" | "20s" => Ok(AgeBand::Twenties),
            "thirties" | "30s" => Ok(AgeBand::Thirties),
            "forties" | "40s" => Ok(AgeBand::Forties),
            "fifty-plus" | "50s" | "50+" => Ok(AgeBand::FiftyPlus),
            other => Err(format!(
                "unknown age bracket '{}' (expected 10s, 20s, 30s, 40s or 50+)",
                other
            )),
        }
    }
}

/// Gender of the user profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    #[default]
    Female,
    Male,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "female" | "f" => Ok(Gender::Female),
            "male" | "m" => Ok(Gender::Male),
            other => Err(format!("unknown gender '{}' (expected female or male)", other)),
        }
    }
}

/// User profile sent along with every analysis request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Profile {
    pub age: AgeBand,
    pub gender: Gender,
}

/// Build the system instruction embedding the profile, the meal type, and the
/// mandated output contract.
pub fn build_system_prompt(profile: &Profile, meal_type: MealType) -> String {
    format!(
        r#"You are the head nutrition analyst of "MEALROAST" and a ruthlessly blunt, cold-eyed reality-check expert.
Analyze every food visible in the user's photos (up to 3) and provide nutrition information.

Requirements:
1. Identify every individual food item across the images and estimate the calories of each.
2. Sum the calories of all items into a total.
3. Take into account the user's age bracket ({age}), gender ({gender}), and the meal type ({meal_type}).
4. **fact_attack**: this service delivers a brutally direct, ice-cold reality check. Be humorous but jolting; show the user the bitter taste of dieting.
5. **Varied exercise plan**: do not fall back on running and squats alone. Recommend a genuinely varied set of exercises fit for the situation - burpee tests, cycling, hiking, swimming, planks, high-intensity interval training, and more - that can burn the calories consumed.
6. Always respond with JSON only.

Response JSON format:
{{
  "items": [{{"name": "food name", "kcal": 0}}],
  "total_kcal": 0,
  "exercise_plan": [{{"name": "exercise name", "duration": "30 min", "sets": "3 sets", "video_search_term": "exercise name"}}],
  "personalized_advice": "professional advice",
  "fact_attack": "put the harsh, wake-up-call roast of the user here"
}}"#,
        age = profile.age,
        gender = profile.gender,
        meal_type = meal_type,
    )
}

/// Build the user-turn text that accompanies the images
pub fn build_user_prompt(meal_type: MealType) -> String {
    format!("Analyze this {} for me.", meal_type)
}
