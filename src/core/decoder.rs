use crate::domain::model::{Place, RacerRecord, StageDescriptor, StageResult};
use crate::domain::schema::{strip_prefix_chars, ColumnSchema};
use crate::utils::error::{EtlError, Result};

/// Decodes one data row of the export into a racer record.
///
/// `row_number` is 1-based within the file (the header is row 1) and only
/// feeds error messages. `stages` must be in header order.
pub fn decode_row(
    row: &[String],
    row_number: usize,
    schema: &ColumnSchema,
    stages: &[StageDescriptor],
) -> Result<RacerRecord> {
    let field = |index: usize| -> Result<&str> {
        row.get(index)
            .map(String::as_str)
            .ok_or(EtlError::RowTooShort {
                row: row_number,
                index,
                len: row.len(),
            })
    };

    let stage_results = stages
        .iter()
        .enumerate()
        .map(|(position, stage)| {
            let (time_column, place_column) = schema.stage_columns(position);
            Ok(StageResult {
                stage_number: stage.stage_number,
                stage_time: strip_prefix_chars(field(time_column)?, schema.stage_time_prefix_len)
                    .to_string(),
                stage_place: field(place_column)?.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RacerRecord {
        plate_number: field(schema.plate_number)?.to_string(),
        place: resolve_place(
            field(schema.place)?,
            field(schema.not_classified)?,
            field(schema.status)?,
        ),
        name: field(schema.name)?.to_string(),
        team_or_sponsor: field(schema.team_or_sponsor)?.to_string(),
        category: category_name(field(schema.category)?).to_string(),
        overall_time: field(schema.overall_time)?.to_string(),
        time_behind: field(schema.time_behind)?.to_string(),
        stage_results,
    })
}

/// Place rules, first match wins: explicit rank, not-classified flag, DNF status.
pub fn resolve_place(place: &str, not_classified: &str, status: &str) -> Place {
    if !place.is_empty() {
        Place::Rank(place.to_string())
    } else if not_classified == ColumnSchema::NOT_CLASSIFIED_FLAG {
        Place::NotClassified
    } else if status == ColumnSchema::DNF_STATUS {
        Place::DidNotFinish
    } else {
        Place::Unplaced
    }
}

/// Strips an age-group style preface: `50-54 Men Pro` -> `Men Pro`.
///
/// A value without any letter is kept whole.
pub fn category_name(raw: &str) -> &str {
    raw.find(|c: char| c.is_ascii_alphabetic())
        .map_or(raw, |start| &raw[start..])
}
