//! Records persisted through the storage accessor.
//!
//! Field names follow the camelCase layout the stored JSON already uses, so
//! data written by earlier clients stays readable.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

/// Accepts `170`, `"170"` or `""` (absent). Profile edit forms store
/// measurements as text.
fn number_or_text<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    match Option::<NumberOrText<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(text)) => text.trim().parse().map(Some).map_err(D::Error::custom),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserStats {
    pub visits: u32,
    pub events: u32,
    pub streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    WeightLoss,
    MuscleGain,
    Endurance,
    Flexibility,
    General,
}

impl FitnessGoal {
    pub fn display_name(&self) -> &'static str {
        match self {
            FitnessGoal::WeightLoss => "Weight Loss",
            FitnessGoal::MuscleGain => "Muscle Gain",
            FitnessGoal::Endurance => "Endurance",
            FitnessGoal::Flexibility => "Flexibility",
            FitnessGoal::General => "General Fitness",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Centimetres.
    #[serde(default, deserialize_with = "number_or_text")]
    pub height: Option<f64>,
    /// Kilograms.
    #[serde(default, deserialize_with = "number_or_text")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "number_or_text")]
    pub age: Option<u32>,
    #[serde(default)]
    pub fitness_level: FitnessLevel,
    #[serde(default)]
    pub goals: Vec<FitnessGoal>,
    #[serde(default)]
    pub stats: UserStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Training,
    Competition,
    Workshop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubEvent {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`.
    pub time: String,
    pub location: String,
    pub coach: String,
    pub participants: u32,
    pub max_participants: u32,
    pub signed_up: bool,
    pub description: String,
}

impl ClubEvent {
    pub fn is_full(&self) -> bool {
        self.participants >= self.max_participants
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerRequest {
    pub id: u64,
    pub user: String,
    pub activity: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub level: FitnessLevel,
    #[serde(default)]
    pub notes: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub id: u64,
    pub date: String,
    pub time: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
}
