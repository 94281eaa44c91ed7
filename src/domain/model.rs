use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One CSV row as read from the export, before any decoding.
pub type RawRow = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageDescriptor {
    pub stage_number: u32,
    pub time_column_label: String,
    pub place_column_label: String,
}

/// Stage layout of one file, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSchema {
    pub stages: Vec<StageDescriptor>,
    pub stage_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageResult {
    pub stage_number: u32,
    pub stage_time: String,
    pub stage_place: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "Option<String>")]
pub enum Place {
    /// Explicit finishing position, kept as written in the export.
    Rank(String),
    NotClassified,
    DidNotFinish,
    /// None of the place rules matched; rendered blank and earns no points.
    Unplaced,
}

impl Place {
    pub const NOT_CLASSIFIED: &'static str = "N/C";
    pub const DID_NOT_FINISH: &'static str = "DNF";

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Place::Rank(rank) => Some(rank),
            Place::NotClassified => Some(Self::NOT_CLASSIFIED),
            Place::DidNotFinish => Some(Self::DID_NOT_FINISH),
            Place::Unplaced => None,
        }
    }
}

impl From<Place> for Option<String> {
    fn from(place: Place) -> Self {
        place.as_str().map(str::to_string)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RacerRecord {
    pub plate_number: String,
    pub place: Place,
    pub name: String,
    pub team_or_sponsor: String,
    pub category: String,
    /// Raw value including the leading status glyph.
    pub overall_time: String,
    pub time_behind: String,
    pub stage_results: Vec<StageResult>,
}

impl RacerRecord {
    /// Overall time without the status glyph, as shown in the sheet.
    pub fn overall_time_display(&self, prefix_len: usize) -> &str {
        crate::domain::schema::strip_prefix_chars(&self.overall_time, prefix_len)
    }
}

/// Racers grouped by category, in first-seen order for both categories and racers.
#[derive(Debug, Clone, Default)]
pub struct CategoryBucket {
    groups: Vec<(String, Vec<RacerRecord>)>,
    index: HashMap<String, usize>,
}

impl CategoryBucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: RacerRecord) {
        match self.index.get(&record.category).copied() {
            Some(position) => self.groups[position].1.push(record),
            None => {
                self.index.insert(record.category.clone(), self.groups.len());
                self.groups.push((record.category.clone(), vec![record]));
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<&[RacerRecord]> {
        self.index
            .get(category)
            .map(|&position| self.groups[position].1.as_slice())
    }

    /// True when the category has at least one racer.
    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some_and(|racers| !racers.is_empty())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn racer_count(&self) -> usize {
        self.groups.iter().map(|(_, racers)| racers.len()).sum()
    }
}

/// Place string to points earned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointsTable(HashMap<String, f64>);

impl PointsTable {
    pub fn new(entries: HashMap<String, f64>) -> Self {
        Self(entries)
    }

    /// Exact-key lookup; unplaced racers and unknown places earn no entry.
    pub fn points_for(&self, place: &Place) -> Option<f64> {
        place.as_str().and_then(|key| self.0.get(key).copied())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for PointsTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// How stage results are ordered within a racer's row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageOrder {
    /// Compare stage numbers as decimal text, so `10` sorts before `2`.
    #[default]
    Source,
    Numeric,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardRow {
    pub racer: RacerRecord,
    pub points: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryBoard {
    pub name: String,
    pub rows: Vec<LeaderboardRow>,
}

/// Normalized report for one input file, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Leaderboard {
    pub source_name: String,
    pub event_title: String,
    pub stages: Vec<StageDescriptor>,
    pub categories: Vec<CategoryBoard>,
}

impl Leaderboard {
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn racer_count(&self) -> usize {
        self.categories.iter().map(|board| board.rows.len()).sum()
    }
}
