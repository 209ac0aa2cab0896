use chrono::NaiveTime;
use database::entities::od_request::Model;
use rust_xlsxwriter::{Color, Format, Workbook, XlsxError};

const SHEET_NAME: &str = "Approved OD Requests";

const COLUMNS: [(&str, f64); 8] = [
    ("Faculty Code", 15.0),
    ("Subject Code", 15.0),
    ("Name", 25.0),
    ("Enrollment Number", 20.0),
    ("Time From", 15.0),
    ("Time To", 15.0),
    ("Reason", 40.0),
    ("Status", 12.0),
];

/// One rendered sheet row.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// Group banner, e.g. `--- FC1 - 09:15 AM to 10:10 AM ---`
    Banner { faculty: String, label: String },
    /// Spacer between groups
    Blank,
    Record(Model),
}

/// Orders approved records by time slot then faculty code and inserts a
/// banner before each group, with a blank spacer between groups.
pub fn group_rows(records: &[Model]) -> Vec<Row> {
    let mut sorted: Vec<&Model> = records.iter().collect();
    sorted.sort_by(|a, b| {
        a.time_from
            .cmp(&b.time_from)
            .then_with(|| a.faculty_code.cmp(&b.faculty_code))
    });

    let mut rows = Vec::new();
    let mut current: Option<(NaiveTime, &str)> = None;

    for record in sorted {
        let key = (record.time_from, record.faculty_code.as_str());
        if current != Some(key) {
            if current.is_some() {
                rows.push(Row::Blank);
            }
            rows.push(Row::Banner {
                faculty: record.faculty_code.clone(),
                label: format!(
                    "--- {} - {} to {} ---",
                    record.faculty_code,
                    record.time_from.format("%I:%M %p"),
                    record.time_to.format("%I:%M %p"),
                ),
            });
            current = Some(key);
        }
        rows.push(Row::Record(record.clone()));
    }

    rows
}

/// Renders the approved-requests workbook and returns its bytes.
pub fn render_workbook(records: &[Model]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();

    let header = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xE0E0E0));
    let banner = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x0000FF))
        .set_background_color(Color::RGB(0xF0F0F0));

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, &(title, width)) in COLUMNS.iter().enumerate() {
        sheet.set_column_width(col as u16, width)?;
        sheet.write_string_with_format(0, col as u16, title, &header)?;
    }

    let mut row_idx: u32 = 1;
    for row in group_rows(records) {
        match row {
            Row::Blank => {}
            Row::Banner { faculty, label } => {
                sheet.write_string_with_format(row_idx, 0, faculty, &banner)?;
                sheet.write_string_with_format(row_idx, 2, label, &banner)?;
            }
            Row::Record(record) => {
                sheet.write_string(row_idx, 0, record.faculty_code)?;
                sheet.write_string(row_idx, 1, record.subject_code)?;
                sheet.write_string(row_idx, 2, record.name)?;
                sheet.write_string(row_idx, 3, record.enrollment_number)?;
                sheet.write_string(row_idx, 4, record.time_from.format("%I:%M %p").to_string())?;
                sheet.write_string(row_idx, 5, record.time_to.format("%I:%M %p").to_string())?;
                sheet.write_string(row_idx, 6, record.reason)?;
                sheet.write_string(row_idx, 7, record.status.to_string())?;
            }
        }
        row_idx += 1;
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use models::{schedule::DAILY_PERIODS, status::RequestStatus};
    use uuid::Uuid;

    fn approved(faculty: &str, period: usize) -> Model {
        let now = Utc::now().naive_utc();
        Model {
            id: Uuid::new_v4(),
            name: "Asha Rao".to_owned(),
            enrollment_number: "A123".to_owned(),
            email: "asha@example.edu".to_owned(),
            subject_code: "CS101".to_owned(),
            faculty_code: faculty.to_owned(),
            date: now.date(),
            time_from: DAILY_PERIODS[period].from,
            time_to: DAILY_PERIODS[period].to,
            reason: "Hackathon".to_owned(),
            status: RequestStatus::Approved,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_rows_group_by_slot_then_faculty() {
        // Deliberately unsorted input
        let records = vec![
            approved("FC2", 1),
            approved("FC1", 0),
            approved("FC1", 1),
            approved("FC1", 1),
        ];

        let rows = group_rows(&records);

        let banners: Vec<&str> = rows
            .iter()
            .filter_map(|row| match row {
                Row::Banner { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            banners,
            vec![
                "--- FC1 - 09:15 AM to 10:10 AM ---",
                "--- FC1 - 10:15 AM to 11:10 AM ---",
                "--- FC2 - 10:15 AM to 11:10 AM ---",
            ]
        );

        // Banner, record, blank, banner, two records, blank, banner, record
        assert_eq!(rows.len(), 9);
        assert!(matches!(rows[0], Row::Banner { .. }));
        assert!(matches!(rows[2], Row::Blank));
        assert!(matches!(rows[4], Row::Record(_)));
        assert!(matches!(rows[5], Row::Record(_)));
    }

    #[test]
    fn test_workbook_renders_without_error() {
        let records = vec![approved("FC1", 0), approved("FC2", 3)];

        let bytes = render_workbook(&records).unwrap();
        assert!(!bytes.is_empty());
    }
}
