use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::schema::column;
use crate::{CellValue, PoamRow};

/// The file extension of the spreadsheets the converter expects
pub const INPUT_SUFFIX: &str = ".xlsx";
/// Replaces [`INPUT_SUFFIX`] in the name of the generated import file
pub const OUTPUT_SUFFIX: &str = " Jira Import File.csv";

/// The Jira import columns, in output order
pub const JIRA_COLUMNS: [&str; 6] = [
    "Summary",
    "Description",
    "Group",
    "Requested Completion Date",
    "POAM ID",
    "CVE",
];

/// The columns joined into the issue description, in order
const DESCRIPTION_COLUMNS: [&str; 6] = [
    column::WEAKNESS_NAME,
    column::WEAKNESS_DESCRIPTION,
    column::WEAKNESS_DETECTOR_SOURCE,
    column::ORIGINAL_RATING,
    column::OVERALL_REMEDIATION,
    column::ASSET_IDENTIFIER,
];

/// One issue of a Jira CSV import
///
/// Issues are derived from a single [`PoamRow`] and serialize to one record
/// with the [`JIRA_COLUMNS`] layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct JiraIssue {
    #[serde(rename = "Summary")]
    summary: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Group")]
    group: CellValue,
    #[serde(rename = "Requested Completion Date")]
    requested_completion_date: Option<NaiveDate>,
    #[serde(rename = "POAM ID")]
    poam_id: CellValue,
    #[serde(rename = "CVE")]
    cve: String,
}

impl JiraIssue {
    /// `POAM ID: ` followed by the POAM id
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// The weakness details, separated by single spaces
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The point of contact, with the type the spreadsheet stored it as
    pub fn group(&self) -> &CellValue {
        &self.group
    }

    /// The scheduled completion date
    /// Will be `None` if the cell did not hold a recognizable date
    pub fn requested_completion_date(&self) -> Option<NaiveDate> {
        self.requested_completion_date
    }

    pub fn poam_id(&self) -> &CellValue {
        &self.poam_id
    }

    /// The CVE identifier, always as text
    pub fn cve(&self) -> &str {
        &self.cve
    }
}

impl From<&PoamRow> for JiraIssue {
    fn from(row: &PoamRow) -> Self {
        let poam_id = row.field(column::POAM_ID).clone();
        let description = DESCRIPTION_COLUMNS
            .iter()
            .map(|name| row.field(name).to_text())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            summary: format!("POAM ID: {poam_id}"),
            description,
            group: row.field(column::POINT_OF_CONTACT).clone(),
            requested_completion_date: row.field(column::SCHEDULED_COMPLETION).to_date(),
            poam_id,
            cve: row.field(column::CVE).to_text(),
        }
    }
}

/// Derives one issue per row, keeping the row order
pub fn transform(rows: &[PoamRow]) -> Vec<JiraIssue> {
    rows.iter().map(JiraIssue::from).collect()
}

/// The path of the import file generated for a spreadsheet
///
/// ### Important
/// This is a plain substring replacement of [`INPUT_SUFFIX`]. If the input path
/// does not contain it, the returned path equals the input path.
pub fn output_path(input: &Path) -> PathBuf {
    match input.to_str() {
        Some(input) => PathBuf::from(input.replace(INPUT_SUFFIX, OUTPUT_SUFFIX)),
        None => input.to_path_buf(),
    }
}

/// Writes the issues as a Jira import CSV, header first
pub fn write_csv<W>(writer: W, issues: &[JiraIssue]) -> Result<(), csv::Error>
    where W: io::Write
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // written by hand, so an empty import still carries its header
    writer.write_record(JIRA_COLUMNS)?;
    for issue in issues {
        writer.serialize(issue)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Schema;

    fn row(cells: &[(&'static str, CellValue)]) -> PoamRow {
        let schema = Schema::poam();
        let values = schema.columns().iter().map(|name| {
            cells
                .iter()
                .find(|(column, _)| column == name)
                .map(|(_, value)| value.clone())
                .unwrap_or_default()
        });
        PoamRow::from_cells(schema, values)
    }

    fn to_csv(issues: &[JiraIssue]) -> String {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, issues).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn summary_prefixes_the_poam_id() {
        let issue = JiraIssue::from(&row(&[(column::POAM_ID, "POAM-001".into())]));
        assert_eq!(issue.summary(), "POAM ID: POAM-001");

        let issue = JiraIssue::from(&row(&[(column::POAM_ID, CellValue::Float(17.0))]));
        assert_eq!(issue.summary(), "POAM ID: 17");

        let issue = JiraIssue::from(&row(&[]));
        assert_eq!(issue.summary(), "POAM ID: ");
    }

    #[test]
    fn description_joins_weakness_details_in_order() {
        let issue = JiraIssue::from(&row(&[
            (column::ASSET_IDENTIFIER, "host-01".into()),
            (column::OVERALL_REMEDIATION, "Patch".into()),
            (column::ORIGINAL_RATING, "High".into()),
            (column::WEAKNESS_DETECTOR_SOURCE, "Scanner".into()),
            (column::WEAKNESS_DESCRIPTION, "Outdated TLS".into()),
            (column::WEAKNESS_NAME, "TLS 1.0".into()),
            ("Controls", "SC-8".into()),
        ]));

        assert_eq!(issue.description(), "TLS 1.0 Outdated TLS Scanner High Patch host-01");
    }

    #[test]
    fn description_keeps_separators_for_blank_cells() {
        let issue = JiraIssue::from(&row(&[
            (column::WEAKNESS_NAME, "Name".into()),
            (column::ASSET_IDENTIFIER, "host".into()),
        ]));

        assert_eq!(issue.description(), "Name     host");
    }

    #[test]
    fn group_passes_the_contact_through() {
        let issue = JiraIssue::from(&row(&[(column::POINT_OF_CONTACT, CellValue::Int(42))]));
        assert_eq!(issue.group(), &CellValue::Int(42));
    }

    #[test]
    fn completion_date_tolerates_garbage() {
        let issue = JiraIssue::from(&row(&[(column::SCHEDULED_COMPLETION, "2024-03-15".into())]));
        assert_eq!(issue.requested_completion_date(), NaiveDate::from_ymd_opt(2024, 3, 15));

        let issue = JiraIssue::from(&row(&[(column::SCHEDULED_COMPLETION, "TBD".into())]));
        assert_eq!(issue.requested_completion_date(), None);
    }

    #[test]
    fn numeric_cve_stays_textual() {
        let issue = JiraIssue::from(&row(&[(column::CVE, CellValue::Float(12345.0))]));
        assert_eq!(issue.cve(), "12345");
    }

    #[test]
    fn transform_keeps_row_order() {
        let rows = ["POAM-002", "POAM-001", "POAM-003"]
            .map(|id| row(&[(column::POAM_ID, id.into())]));
        let summaries = transform(&rows)
            .iter()
            .map(|issue| issue.summary().to_owned())
            .collect::<Vec<_>>();

        assert_eq!(summaries, ["POAM ID: POAM-002", "POAM ID: POAM-001", "POAM ID: POAM-003"]);
    }

    #[test]
    fn output_path_replaces_the_extension() {
        assert_eq!(
            output_path(Path::new("reports/Overdue POAMs.xlsx")),
            Path::new("reports/Overdue POAMs Jira Import File.csv"),
        );
        assert_eq!(output_path(Path::new("export.csv")), Path::new("export.csv"));
    }

    #[test]
    fn csv_layout() {
        let issues = transform(&[row(&[
            (column::POAM_ID, "POAM-001".into()),
            (column::WEAKNESS_NAME, "Weak, \"quoted\"".into()),
            (column::WEAKNESS_DESCRIPTION, "a".into()),
            (column::WEAKNESS_DETECTOR_SOURCE, "b".into()),
            (column::ORIGINAL_RATING, "c".into()),
            (column::OVERALL_REMEDIATION, "d".into()),
            (column::ASSET_IDENTIFIER, "e".into()),
            (column::POINT_OF_CONTACT, "alice".into()),
            (column::SCHEDULED_COMPLETION, "2024-01-10".into()),
            (column::CVE, "CVE-2024-0001".into()),
        ])]);

        assert_eq!(
            to_csv(&issues),
            "Summary,Description,Group,Requested Completion Date,POAM ID,CVE\n\
             POAM ID: POAM-001,\"Weak, \"\"quoted\"\" a b c d e\",alice,2024-01-10,POAM-001,CVE-2024-0001\n",
        );
    }

    #[test]
    fn blank_values_are_empty_fields() {
        let issues = transform(&[row(&[(column::POAM_ID, "POAM-002".into())])]);
        let output = to_csv(&issues);
        let mut reader = csv::Reader::from_reader(output.as_bytes());
        let records = reader
            .records()
            .map(Result::unwrap)
            .collect::<Vec<_>>();

        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "POAM ID: POAM-002");
        assert_eq!(&records[0][2], "");
        assert_eq!(&records[0][3], "");
        assert_eq!(&records[0][4], "POAM-002");
        assert_eq!(&records[0][5], "");
    }

    #[test]
    fn empty_import_has_a_header() {
        assert_eq!(
            to_csv(&[]),
            "Summary,Description,Group,Requested Completion Date,POAM ID,CVE\n",
        );
    }
}
