use crate::context::AppContext;
use clubhouse_bus::Topic;
use clubhouse_core::model::{ClubEvent, FitnessGoal, FitnessLevel, UserProfile, UserStats};
use clubhouse_core::{seed, CoreError, CoreResult, StorageKey};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal Weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => {
                "Focus on strength training and balanced nutrition. Consider consulting a nutritionist."
            }
            BmiCategory::Normal => {
                "Great! Maintain your current routine with regular exercise and balanced diet."
            }
            BmiCategory::Overweight => {
                "Combine cardio with strength training. Watch your calorie intake and stay consistent."
            }
            BmiCategory::Obese => {
                "Consult with healthcare professional. Focus on gradual, sustainable weight loss."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiReading {
    /// Rounded to one decimal.
    pub bmi: f64,
    pub category: BmiCategory,
}

pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> CoreResult<BmiReading> {
    if !(height_cm.is_finite() && weight_kg.is_finite()) || height_cm <= 0.0 || weight_kg <= 0.0 {
        return Err(CoreError::InvalidInput(
            "height and weight must be positive numbers".to_string(),
        ));
    }
    let meters = height_cm / 100.0;
    let bmi = (weight_kg / (meters * meters) * 10.0).round() / 10.0;
    Ok(BmiReading {
        bmi,
        category: BmiCategory::from_bmi(bmi),
    })
}

/// Adds `goal` if absent, removes it otherwise. Returns whether it is now set.
pub fn toggle_goal(profile: &mut UserProfile, goal: FitnessGoal) -> bool {
    if let Some(pos) = profile.goals.iter().position(|g| *g == goal) {
        profile.goals.remove(pos);
        false
    } else {
        profile.goals.push(goal);
        true
    }
}

/// Training tips for the member's fitness level, then for each goal that
/// has any.
pub fn personalized_advice(profile: &UserProfile) -> Vec<&'static str> {
    let mut advice = match profile.fitness_level {
        FitnessLevel::Beginner => vec![
            "Start with 3 sessions per week, focus on form",
            "Allow 48 hours recovery between strength sessions",
        ],
        FitnessLevel::Intermediate => vec![
            "4-5 sessions weekly with progressive overload",
            "Balance cardio (40%) and strength (60%)",
        ],
        FitnessLevel::Advanced => vec![
            "5-6 sessions with periodization training",
            "Include active recovery and mobility work",
        ],
    };

    let by_goal: [(FitnessGoal, [&'static str; 2]); 3] = [
        (
            FitnessGoal::WeightLoss,
            [
                "Aim for 300-500 calorie deficit daily",
                "Combine HIIT with steady-state cardio",
            ],
        ),
        (
            FitnessGoal::MuscleGain,
            [
                "Focus on compound lifts 3x weekly",
                "Ensure adequate protein intake (1.6-2.2g/kg)",
            ],
        ),
        (
            FitnessGoal::Endurance,
            [
                "Include 2-3 cardio sessions weekly",
                "Gradually increase duration and intensity",
            ],
        ),
    ];
    for (goal, tips) in by_goal {
        if profile.goals.contains(&goal) {
            advice.extend(tips);
        }
    }
    advice
}

pub struct ProfileService<'a> {
    ctx: &'a AppContext,
}

impl<'a> ProfileService<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    /// Stored profile with the separately stored stats laid over it; the seed
    /// member when nothing has been saved yet.
    pub async fn load(&self) -> UserProfile {
        let mut profile = self
            .ctx
            .load_or(StorageKey::UserProfile, seed::default_member)
            .await;
        if let Some(stats) = self.stored_stats().await {
            profile.stats = stats;
        }
        profile
    }

    async fn stored_stats(&self) -> Option<UserStats> {
        self.ctx
            .load_or::<Option<UserStats>, _>(StorageKey::UserStats, || None)
            .await
    }

    /// Persists the profile and tells other screens about it.
    pub async fn save(&self, profile: &UserProfile) -> CoreResult<()> {
        if profile.name.trim().is_empty() {
            return Err(CoreError::InvalidInput("name must not be empty".to_string()));
        }
        self.ctx
            .persist_and_notify(StorageKey::UserProfile, Some(&Topic::PROFILE_UPDATED), profile)
            .await?;
        tracing::info!(id = profile.id, "profile saved");
        Ok(())
    }

    /// Saves a BMI measurement onto the stored profile. An unreadable stored
    /// profile is an error rather than being replaced by the seed member.
    pub async fn record_measurements(
        &self,
        height_cm: f64,
        weight_kg: f64,
    ) -> CoreResult<BmiReading> {
        let reading = calculate_bmi(height_cm, weight_kg)?;
        let mut profile = self
            .ctx
            .storage()
            .get_as::<UserProfile>(StorageKey::UserProfile)
            .await?
            .unwrap_or_else(seed::default_member);
        if let Some(stats) = self.stored_stats().await {
            profile.stats = stats;
        }
        profile.height = Some(height_cm);
        profile.weight = Some(weight_kg);
        self.save(&profile).await?;
        Ok(reading)
    }

    pub async fn registered_events(&self) -> Vec<ClubEvent> {
        self.ctx
            .load_or(StorageKey::UserEvents, seed::initial_events)
            .await
            .into_iter()
            .filter(|e: &ClubEvent| e.signed_up)
            .collect()
    }
}
