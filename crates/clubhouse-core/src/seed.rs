//! Built-in records used on first run, before anything has been persisted.

use crate::model::{ClubEvent, EventKind, FitnessLevel, PartnerRequest, UserProfile, UserStats};

pub fn default_stats() -> UserStats {
    UserStats {
        visits: 12,
        events: 8,
        streak: 5,
    }
}

pub fn default_member() -> UserProfile {
    UserProfile {
        id: 1,
        name: "Alexey Petrov".to_string(),
        role: "Running Club Member".to_string(),
        avatar: Some("https://via.placeholder.com/100/FF4444/FFFFFF?text=AP".to_string()),
        email: None,
        phone: None,
        height: None,
        weight: None,
        age: None,
        fitness_level: FitnessLevel::Intermediate,
        goals: Vec::new(),
        stats: default_stats(),
    }
}

// id, title, kind, date, time, location, coach, participants, max, description
type EventRow = (
    u64,
    &'static str,
    EventKind,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    u32,
    u32,
    &'static str,
);

const EVENTS: [EventRow; 8] = [
    (
        1,
        "Winter Marathon Training",
        EventKind::Training,
        "2025-12-05",
        "08:00",
        "Central Park",
        "Coach Ivanov",
        15,
        25,
        "Special winter marathon preparation session with focus on cold weather running techniques",
    ),
    (
        2,
        "Christmas Charity Run",
        EventKind::Competition,
        "2025-12-14",
        "10:00",
        "City Stadium",
        "All Coaches",
        45,
        100,
        "Annual Christmas charity run supporting local children hospital",
    ),
    (
        3,
        "New Year Yoga Retreat",
        EventKind::Workshop,
        "2025-12-21",
        "09:30",
        "Yoga Studio",
        "Coach Elena",
        8,
        15,
        "Special yoga session for stress relief and New Year preparation",
    ),
    (
        4,
        "Winter Strength Conditioning",
        EventKind::Training,
        "2025-12-08",
        "18:00",
        "Main Gym",
        "Coach Maria",
        12,
        20,
        "Strength training focused on winter sports performance",
    ),
    (
        5,
        "Holiday Cycling Tour",
        EventKind::Training,
        "2025-12-17",
        "11:00",
        "Forest Park",
        "Coach David",
        6,
        12,
        "Scenic winter cycling tour through forest routes",
    ),
    (
        6,
        "New Year Eve Special Workout",
        EventKind::Competition,
        "2025-12-31",
        "16:00",
        "Main Gym",
        "All Coaches",
        28,
        50,
        "Special New Year Eve workout challenge with prizes",
    ),
    (
        7,
        "Winter Swimming Session",
        EventKind::Training,
        "2025-12-12",
        "07:30",
        "Olympic Pool",
        "Coach Anna",
        5,
        10,
        "Indoor swimming session with winter training techniques",
    ),
    (
        8,
        "December Endurance Challenge",
        EventKind::Competition,
        "2025-12-28",
        "09:00",
        "Mountain Trail",
        "Coach Ivanov",
        18,
        30,
        "Year-end endurance challenge on mountain trails",
    ),
];

pub fn initial_events() -> Vec<ClubEvent> {
    EVENTS
        .iter()
        .map(
            |&(id, title, kind, date, time, location, coach, participants, max, description)| {
                ClubEvent {
                    id,
                    title: title.to_string(),
                    kind,
                    date: date.to_string(),
                    time: time.to_string(),
                    location: location.to_string(),
                    coach: coach.to_string(),
                    participants,
                    max_participants: max,
                    signed_up: false,
                    description: description.to_string(),
                }
            },
        )
        .collect()
}

pub fn initial_partner_requests() -> Vec<PartnerRequest> {
    let request = |id, user: &str, activity: &str, date: &str, time: &str, location: &str,
                   level, notes: &str, created_at: &str| PartnerRequest {
        id,
        user: user.to_string(),
        activity: activity.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        location: location.to_string(),
        level,
        notes: notes.to_string(),
        created_at: created_at.to_string(),
    };
    vec![
        request(
            1,
            "Michael S.",
            "running",
            "Tomorrow",
            "18:00",
            "Central Park",
            FitnessLevel::Intermediate,
            "Looking for running partner for 10k training",
            "2024-01-14",
        ),
        request(
            2,
            "Anna K.",
            "strength",
            "Friday",
            "19:00",
            "Main Gym",
            FitnessLevel::Beginner,
            "Need spotter for weight training session",
            "2024-01-14",
        ),
        request(
            3,
            "David L.",
            "yoga",
            "Saturday",
            "09:00",
            "Yoga Studio",
            FitnessLevel::Advanced,
            "Partner for advanced yoga flow session",
            "2024-01-13",
        ),
    ]
}
