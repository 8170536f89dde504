//! Deterministic app classification from foreground window titles.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AppClass {
    #[serde(rename = "work")]
    Work,
    #[serde(rename = "distraction")]
    Distraction,
    #[serde(rename = "neutral")]
    Neutral,
}

const WORK_APPS: &[&str] = &[
    "chrome",
    "visual studio code",
    "vs code",
    "word",
    "terminal",
    "excel",
    "powerpoint",
];

const DISTRACTION_APPS: &[&str] = &[
    "youtube", "netflix", "spotify", "discord", "safari", "photos", "messages", "reddit",
    "twitter",
];

/// Classify a window title. Work keywords win over distraction keywords.
pub fn classify_app(title: &str) -> AppClass {
    let t = title.to_lowercase();
    if WORK_APPS.iter().any(|k| t.contains(*k)) {
        AppClass::Work
    } else if DISTRACTION_APPS.iter().any(|k| t.contains(*k)) {
        AppClass::Distraction
    } else {
        AppClass::Neutral
    }
}
