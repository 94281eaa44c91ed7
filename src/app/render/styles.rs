use crate::config::settings::{BorderThickness, StyleConfig};
use crate::utils::error::Result;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern};

/// Title bands and header cells: every configured attribute applies.
pub fn banner_format(style: &StyleConfig) -> Result<Format> {
    let mut format = Format::new()
        .set_font_name(style.font_name.as_str())
        .set_font_size(style.font_size)
        .set_font_color(Color::RGB(style.font_rgb()?))
        .set_border(border(style.border_thickness))
        .set_border_color(Color::Black)
        .set_align(FormatAlign::VerticalCenter);

    if style.is_bold {
        format = format.set_bold();
    }
    if let Some(fill) = style.fill_rgb()? {
        format = format
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(fill));
    }
    Ok(format)
}

/// Racer rows: black text on no fill; only font and border come from the style.
pub fn body_format(style: &StyleConfig) -> Format {
    Format::new()
        .set_font_name(style.font_name.as_str())
        .set_font_size(style.font_size)
        .set_font_color(Color::Black)
        .set_border(border(style.border_thickness))
        .set_border_color(Color::Black)
}

fn border(thickness: BorderThickness) -> FormatBorder {
    match thickness {
        BorderThickness::None => FormatBorder::None,
        BorderThickness::Thin => FormatBorder::Thin,
        BorderThickness::Medium => FormatBorder::Medium,
        BorderThickness::Thick => FormatBorder::Thick,
        BorderThickness::Dashed => FormatBorder::Dashed,
        BorderThickness::Dotted => FormatBorder::Dotted,
        BorderThickness::Double => FormatBorder::Double,
        BorderThickness::Hair => FormatBorder::Hair,
        BorderThickness::MediumDashed => FormatBorder::MediumDashed,
        BorderThickness::DashDot => FormatBorder::DashDot,
        BorderThickness::MediumDashDot => FormatBorder::MediumDashDot,
        BorderThickness::DashDotDot => FormatBorder::DashDotDot,
        BorderThickness::MediumDashDotDot => FormatBorder::MediumDashDotDot,
        BorderThickness::SlantDashDot => FormatBorder::SlantDashDot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(fill: Option<&str>, font_color: &str) -> StyleConfig {
        StyleConfig {
            font_color: font_color.to_string(),
            font_size: 12.0,
            is_bold: true,
            font_name: "Calibri".to_string(),
            fill_color: fill.map(str::to_string),
            border_thickness: BorderThickness::Medium,
        }
    }

    #[test]
    fn test_banner_format_accepts_missing_fill() {
        assert!(banner_format(&style(None, "#FFFFFF")).is_ok());
        assert!(banner_format(&style(Some("#1F4E78"), "#FFFFFF")).is_ok());
    }

    #[test]
    fn test_banner_format_rejects_bad_colors() {
        assert!(banner_format(&style(Some("navy"), "#FFFFFF")).is_err());
        assert!(banner_format(&style(None, "white")).is_err());
    }

    #[test]
    fn test_border_mapping() {
        assert_eq!(border(BorderThickness::Thick), FormatBorder::Thick);
        assert_eq!(border(BorderThickness::None), FormatBorder::None);
    }
}
