// XLSX extractor
use crate::document_processing::error::ExtractionError;
use calamine::{Data, ExcelDateTime, Range, Reader, SheetType, Xlsx, XlsxError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

pub struct XlsxExtractor;

impl XlsxExtractor {
    /// Extract cell values from every worksheet of an XLSX workbook
    ///
    /// Sheets are visited in workbook order without any header between
    /// them. Each non-empty cell is written followed by a space, and every
    /// row ends with a newline, populated or not.
    pub fn extract(xlsx_path: impl AsRef<Path>) -> Result<String, ExtractionError> {
        let xlsx_path = xlsx_path.as_ref();

        let file = File::open(xlsx_path).map_err(|e| ExtractionError::io(xlsx_path, e))?;

        let mut workbook = Xlsx::new(BufReader::new(file)).map_err(|e| match e {
            XlsxError::Io(e) => ExtractionError::io(xlsx_path, e),
            other => ExtractionError::parse(xlsx_path, other),
        })?;

        let worksheets: Vec<String> = workbook
            .sheets_metadata()
            .iter()
            .filter(|sheet| matches!(sheet.typ, SheetType::WorkSheet))
            .map(|sheet| sheet.name.clone())
            .collect();

        let mut text = String::new();
        for name in worksheets {
            let range = workbook.worksheet_range(&name).map_err(|e| {
                ExtractionError::parse(xlsx_path, format!("sheet '{}': {}", name, e))
            })?;
            Self::append_sheet(&range, &mut text);
        }

        Ok(text)
    }

    fn append_sheet(range: &Range<Data>, out: &mut String) {
        // A sheet without cells still reads back as one empty row
        let Some((first_row, _)) = range.start() else {
            out.push('\n');
            return;
        };

        // Rows above the first populated one are still rows
        for _ in 0..first_row {
            out.push('\n');
        }

        for row in range.rows() {
            for cell in row {
                if let Some(value) = Self::render_cell(cell) {
                    out.push_str(&value);
                    out.push(' ');
                }
            }
            out.push('\n');
        }
    }

    fn render_cell(cell: &Data) -> Option<String> {
        let value = match cell {
            Data::Empty => return None,
            Data::String(s) => s.clone(),
            Data::Float(f) => f.to_string(),
            Data::Int(i) => i.to_string(),
            Data::Bool(true) => "True".to_string(),
            Data::Bool(false) => "False".to_string(),
            Data::DateTime(dt) => Self::render_date_time(dt),
            Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
            Data::Error(e) => e.to_string(),
        };
        Some(value)
    }

    /// Durations print as `[N day(s), ]H:MM:SS`, serials below one day as a
    /// bare `HH:MM:SS` clock time, everything else as a full timestamp.
    fn render_date_time(dt: &ExcelDateTime) -> String {
        let serial = dt.as_f64();

        if dt.is_duration() {
            return format_duration((serial * MICROS_PER_DAY).round() as i64);
        }

        if (0.0..1.0).contains(&serial) {
            let micros = (serial * MICROS_PER_DAY).round() as i64;
            if micros < MICROS_PER_DAY as i64 {
                return format_clock(micros, true);
            }
        }

        dt.as_datetime()
            .map(|dt| dt.to_string())
            .unwrap_or_else(|| dt.to_string())
    }
}

fn format_duration(micros: i64) -> String {
    let day = MICROS_PER_DAY as i64;
    let days = micros.div_euclid(day);
    let clock = format_clock(micros.rem_euclid(day), false);

    match days {
        0 => clock,
        1 | -1 => format!("{} day, {}", days, clock),
        _ => format!("{} days, {}", days, clock),
    }
}

fn format_clock(micros: i64, pad_hours: bool) -> String {
    let seconds = micros / 1_000_000;
    let fraction = micros % 1_000_000;
    let (hours, minutes, seconds) = (seconds / 3600, seconds / 60 % 60, seconds % 60);

    let mut clock = if pad_hours {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    };
    if fraction != 0 {
        clock.push_str(&format!(".{:06}", fraction));
    }
    clock
}
