use crate::app::render::styles::{banner_format, body_format};
use crate::config::settings::Settings;
use crate::domain::model::{CategoryBoard, Leaderboard};
use crate::domain::ports::ReportRenderer;
use crate::domain::schema::ColumnSchema;
use crate::utils::error::Result;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet};

pub const SHEET_NAME: &str = "Results";

/// Columns before the stage pairs.
pub const FIXED_HEADERS: [&str; 7] = [
    "Place",
    "Points Earned",
    "Plate",
    "Name",
    "Category / Sponsor(s)",
    "Overall",
    "Behind",
];

const FIXED_WIDTHS: [f64; 7] = [8.0, 14.0, 8.0, 24.0, 36.0, 12.0, 10.0];
const STAGE_WIDTH: f64 = 10.0;

pub struct XlsxRenderer {
    title: Format,
    header: Format,
    body: Format,
    overall_prefix_len: usize,
}

impl XlsxRenderer {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            title: banner_format(&settings.title_style)?,
            header: banner_format(&settings.header_style)?,
            body: body_format(&settings.body_style),
            overall_prefix_len: ColumnSchema::VENDOR.overall_time_prefix_len,
        })
    }

    fn write_category(
        &self,
        sheet: &mut Worksheet,
        row: RowNum,
        board: &CategoryBoard,
        report: &Leaderboard,
        last_col: ColNum,
    ) -> Result<RowNum> {
        let mut row = row;

        sheet.merge_range(row, 0, row, last_col, &board.name.to_uppercase(), &self.title)?;
        row += 1;

        for (col, label) in FIXED_HEADERS.iter().enumerate() {
            sheet.write_string_with_format(row, col as ColNum, *label, &self.header)?;
        }
        let mut col = FIXED_HEADERS.len() as ColNum;
        for stage in &report.stages {
            sheet.write_string_with_format(row, col, &stage.time_column_label, &self.header)?;
            sheet.write_string_with_format(row, col + 1, &stage.place_column_label, &self.header)?;
            col += 2;
        }
        row += 1;

        for entry in &board.rows {
            let racer = &entry.racer;

            match racer.place.as_str() {
                Some(place) => sheet.write_string_with_format(row, 0, place, &self.body)?,
                None => sheet.write_blank(row, 0, &self.body)?,
            };
            match entry.points {
                Some(points) => sheet.write_number_with_format(row, 1, points, &self.body)?,
                None => sheet.write_blank(row, 1, &self.body)?,
            };
            sheet.write_string_with_format(row, 2, &racer.plate_number, &self.body)?;
            sheet.write_string_with_format(row, 3, &racer.name, &self.body)?;
            sheet.write_string_with_format(row, 4, &racer.team_or_sponsor, &self.body)?;
            sheet.write_string_with_format(
                row,
                5,
                racer.overall_time_display(self.overall_prefix_len),
                &self.body,
            )?;
            sheet.write_string_with_format(row, 6, &racer.time_behind, &self.body)?;

            let mut col = FIXED_HEADERS.len() as ColNum;
            for stage in racer.stage_results.iter().take(report.stage_count()) {
                sheet.write_string_with_format(row, col, &stage.stage_time, &self.body)?;
                sheet.write_string_with_format(row, col + 1, &stage.stage_place, &self.body)?;
                col += 2;
            }
            row += 1;
        }

        // blank spacer row
        Ok(row + 1)
    }
}

impl ReportRenderer for XlsxRenderer {
    fn render(&self, report: &Leaderboard) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        let last_col = (FIXED_HEADERS.len() + report.stage_count() * 2 - 1) as ColNum;

        for (col, width) in FIXED_WIDTHS.iter().enumerate() {
            sheet.set_column_width(col as ColNum, *width)?;
        }
        for col in FIXED_HEADERS.len() as ColNum..=last_col {
            sheet.set_column_width(col, STAGE_WIDTH)?;
        }

        sheet.merge_range(0, 0, 0, last_col, &report.event_title, &self.title)?;

        let mut row: RowNum = 1;
        for board in &report.categories {
            row = self.write_category(sheet, row, board, report, last_col)?;
        }

        tracing::debug!(
            "Rendered {} categories over {} rows for {}",
            report.categories.len(),
            row,
            report.source_name
        );

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }

    fn extension(&self) -> &'static str {
        "xlsx"
    }
}
