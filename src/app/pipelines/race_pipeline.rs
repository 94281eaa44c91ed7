use crate::config::settings::Settings;
use crate::core::{decoder, grouper, leaderboard, stages};
use crate::domain::model::{Leaderboard, RawRow};
use crate::domain::ports::{Pipeline, ReportRenderer, Storage};
use crate::domain::schema::ColumnSchema;
use crate::utils::error::{EtlError, Result};
use std::sync::Arc;

/// Converts one results export into one rendered leaderboard artifact.
pub struct RacePipeline<S: Storage, R: ReportRenderer> {
    storage: S,
    renderer: Arc<R>,
    settings: Arc<Settings>,
    schema: ColumnSchema,
    input: String,
}

impl<S: Storage, R: ReportRenderer> RacePipeline<S, R> {
    pub fn new(storage: S, renderer: Arc<R>, settings: Arc<Settings>, input: String) -> Self {
        Self {
            storage,
            renderer,
            settings,
            schema: ColumnSchema::VENDOR,
            input,
        }
    }

    pub fn output_name(&self) -> String {
        output_name(&self.input, self.renderer.extension())
    }
}

#[async_trait::async_trait]
impl<S: Storage, R: ReportRenderer> Pipeline for RacePipeline<S, R> {
    fn source_name(&self) -> &str {
        &self.input
    }

    async fn extract(&self) -> Result<Vec<RawRow>> {
        if !self.storage.exists(&self.input).await {
            return Err(EtlError::InputNotFound {
                path: self.input.clone(),
            });
        }

        let data = self.storage.read_file(&self.input).await?;
        let rows = parse_rows(&data)?;

        tracing::debug!("Read {} rows from {}", rows.len(), self.input);
        Ok(rows)
    }

    async fn transform(&self, rows: Vec<RawRow>) -> Result<Leaderboard> {
        let mut rows = rows.into_iter();
        let header = rows.next().ok_or_else(|| EtlError::MalformedHeader {
            message: "file is empty".to_string(),
        })?;

        let stage_schema =
            stages::extract_stages(&header, &self.schema, self.settings.stage_order)?;

        let records = rows
            .enumerate()
            .map(|(index, row)| {
                decoder::decode_row(&row, index + 2, &self.schema, &stage_schema.stages)
            })
            .collect::<Result<Vec<_>>>()?;

        let bucket = grouper::group_by_category(records);

        let options = leaderboard::AssemblyOptions {
            categories: &self.settings.categories,
            points: &self.settings.points_table,
            stage_order: self.settings.stage_order,
            event_title: self.settings.event_title(),
            source_name: &self.input,
        };
        Ok(leaderboard::assemble(&bucket, stage_schema.stages, &options))
    }

    async fn load(&self, report: Leaderboard) -> Result<String> {
        let bytes = self.renderer.render(&report)?;
        let output = self.output_name();

        tracing::debug!("Writing {} ({} bytes)", output, bytes.len());
        self.storage.write_file(&output, &bytes).await?;

        Ok(output)
    }
}

/// Reads every CSV row as plain strings; rows may differ in length.
///
/// Fields that are not valid UTF-8 are decoded lossily.
pub fn parse_rows(data: &[u8]) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        );
    }
    Ok(rows)
}

/// `results.csv` -> `results.xlsx`; names without a trailing `.csv` get the extension appended.
pub fn output_name(input: &str, extension: &str) -> String {
    let stem = if input.to_ascii_lowercase().ends_with(".csv") {
        &input[..input.len() - ".csv".len()]
    } else {
        input
    };
    format!("{}.{}", stem, extension)
}
