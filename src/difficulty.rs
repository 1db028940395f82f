use std::fmt;

/// How demanding a recipe is, judged by its total preparation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// No usable duration (total of zero minutes or less)
    Unknown,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket a total duration in minutes
///
/// More than an hour is Hard, 30 to 60 minutes inclusive is Medium, anything
/// positive below 30 is Easy. Zero and negative totals are Unknown.
pub fn classify(total_minutes: i64) -> Difficulty {
    match total_minutes {
        m if m > 60 => Difficulty::Hard,
        30..=60 => Difficulty::Medium,
        1..=29 => Difficulty::Easy,
        _ => Difficulty::Unknown,
    }
}
