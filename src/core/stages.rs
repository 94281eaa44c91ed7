use crate::domain::model::{StageDescriptor, StageOrder, StageSchema};
use crate::domain::schema::ColumnSchema;
use crate::utils::error::{EtlError, Result};

/// Derives the stage layout from the export's header row.
///
/// Stage columns run from `schema.first_stage` up to the `NumSplits` marker and
/// come in (time, place) pairs. Under [`StageOrder::Source`] each label is cut to
/// its first two characters (`S3Time` -> `S3`), so `S10Time` reads as stage 1.
/// Under [`StageOrder::Numeric`] the whole number in the label is kept
/// (`S10Time` -> `S10`) and a repeated stage number is a malformed header.
pub fn extract_stages(
    header: &[String],
    schema: &ColumnSchema,
    order: StageOrder,
) -> Result<StageSchema> {
    let marker = header
        .iter()
        .position(|label| label == schema.splits_marker)
        .ok_or_else(|| EtlError::MalformedHeader {
            message: format!("no '{}' column in header", schema.splits_marker),
        })?;

    if marker < schema.first_stage {
        return Err(EtlError::MalformedHeader {
            message: format!(
                "'{}' found at column {}, before the first stage column {}",
                schema.splits_marker, marker, schema.first_stage
            ),
        });
    }

    let labels: Vec<&str> = header[schema.first_stage..marker]
        .iter()
        .map(|label| match order {
            StageOrder::Source => truncate_chars(label, schema.stage_label_len),
            StageOrder::Numeric => through_first_number(label),
        })
        .collect();

    if labels.len() % schema.stage_stride != 0 {
        return Err(EtlError::MalformedHeader {
            message: format!(
                "{} stage columns do not form (time, place) pairs",
                labels.len()
            ),
        });
    }

    let stages = labels
        .chunks(schema.stage_stride)
        .map(|pair| {
            let label = pair[0];
            Ok(StageDescriptor {
                stage_number: stage_number(label)?,
                time_column_label: format!("{}T", label),
                place_column_label: format!("{}P", pair[1]),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    check_numbering(&stages, order)?;
    tracing::debug!("Header declares {} stages", stages.len());

    Ok(StageSchema {
        stage_count: stages.len(),
        stages,
    })
}

fn truncate_chars(label: &str, count: usize) -> &str {
    label
        .char_indices()
        .nth(count)
        .map_or(label, |(end, _)| &label[..end])
}

/// Label up to and including its first run of digits: `S10Time` -> `S10`.
fn through_first_number(label: &str) -> &str {
    let Some(start) = label.find(|c: char| c.is_ascii_digit()) else {
        return label;
    };
    let end = label[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(label.len(), |offset| start + offset);
    &label[..end]
}

fn stage_number(label: &str) -> Result<u32> {
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    digits.parse().map_err(|_| EtlError::MalformedHeader {
        message: format!("stage label '{}' carries no stage number", label),
    })
}

/// Stage numbers should be exactly 1..=N.
fn check_numbering(stages: &[StageDescriptor], order: StageOrder) -> Result<()> {
    let mut numbers: Vec<u32> = stages.iter().map(|stage| stage.stage_number).collect();
    numbers.sort_unstable();

    if numbers.windows(2).any(|pair| pair[0] == pair[1]) {
        match order {
            StageOrder::Numeric => {
                return Err(EtlError::MalformedHeader {
                    message: format!("stage numbers repeat: {:?}", numbers),
                });
            }
            StageOrder::Source => {
                tracing::warn!(
                    "⚠️ Stage labels repeat ({:?}); set stage_order = \"numeric\" for exports with 10 or more stages",
                    numbers
                );
                return Ok(());
            }
        }
    }

    if numbers.iter().zip(1..).any(|(&number, expected)| number != expected) {
        tracing::warn!("⚠️ Stage numbers {:?} do not run from 1 without gaps", numbers);
    }
    Ok(())
}
