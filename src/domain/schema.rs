/// Column offsets of the vendor's results export.
///
/// The export has no usable header names for most columns, so every field is
/// addressed by position. All offsets are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSchema {
    pub plate_number: usize,
    pub name: usize,
    pub team_or_sponsor: usize,
    pub category: usize,
    pub overall_time: usize,
    pub not_classified: usize,
    pub place: usize,
    pub status: usize,
    pub time_behind: usize,
    /// First stage time column; stage pairs follow as (time, place).
    pub first_stage: usize,
    pub stage_stride: usize,
    /// Header cell that terminates the stage columns.
    pub splits_marker: &'static str,
    /// Header labels are truncated to this many characters (`S1Time` -> `S1`).
    pub stage_label_len: usize,
    /// Status code characters in front of each stage time.
    pub stage_time_prefix_len: usize,
    /// Status glyph in front of the overall time.
    pub overall_time_prefix_len: usize,
}

impl ColumnSchema {
    pub const VENDOR: ColumnSchema = ColumnSchema {
        plate_number: 0,
        name: 3,
        team_or_sponsor: 5,
        category: 7,
        overall_time: 10,
        not_classified: 11,
        place: 12,
        status: 13,
        time_behind: 25,
        first_stage: 31,
        stage_stride: 2,
        splits_marker: "NumSplits",
        stage_label_len: 2,
        stage_time_prefix_len: 3,
        overall_time_prefix_len: 1,
    };

    pub const NOT_CLASSIFIED_FLAG: &'static str = "Y";
    pub const DNF_STATUS: &'static str = "DNF";

    /// Time and place column of the stage at header position `position`.
    pub fn stage_columns(&self, position: usize) -> (usize, usize) {
        let time = self.first_stage + position * self.stage_stride;
        (time, time + 1)
    }
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self::VENDOR
    }
}

/// Drops the first `count` characters, yielding an empty string when the value is shorter.
pub fn strip_prefix_chars(value: &str, count: usize) -> &str {
    match value.char_indices().nth(count) {
        Some((offset, _)) => &value[offset..],
        None => "",
    }
}
