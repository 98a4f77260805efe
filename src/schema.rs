/// The column names of a POAM export, in spreadsheet column order
///
/// The export carries no usable header row, so names are assigned by position:
/// cell `i` of every row is stored under `POAM_COLUMNS[i]`.
pub const POAM_COLUMNS: [&str; 31] = [
    "POAM ID",
    "Controls",
    "Weakness Name",
    "Weakness Description",
    "Weakness Detector Source",
    "Weakness Source Identifier",
    "Asset Identifier",
    "Point of Contact",
    "Request Required",
    "Overall Remediation",
    "Original/Detected Date",
    "Scheduled Completion",
    "Planned Milestones",
    "Milestone Changes",
    "Status",
    "Vendor Depend",
    "Last Verified Check Date",
    "Vendor Depend Details",
    "Original Rating",
    "Adjusted Rating",
    "Risk Adjust",
    "False Pos",
    "Operat Req",
    "Operation Rationale",
    "Supporting Document",
    "Comments",
    "Auto-App",
    "Binding Operat Directive 23-02 Applic",
    "Binding Operat Directive 23-02 Date",
    "CVE",
    "Service Now",
];

/// The columns the Jira import is derived from
pub const REQUIRED_COLUMNS: [&str; 10] = [
    column::POAM_ID,
    column::WEAKNESS_NAME,
    column::WEAKNESS_DESCRIPTION,
    column::WEAKNESS_DETECTOR_SOURCE,
    column::ORIGINAL_RATING,
    column::OVERALL_REMEDIATION,
    column::ASSET_IDENTIFIER,
    column::POINT_OF_CONTACT,
    column::SCHEDULED_COMPLETION,
    column::CVE,
];

/// Names of the columns that are read by the transform
pub mod column {
    pub const POAM_ID: &str = "POAM ID";
    pub const WEAKNESS_NAME: &str = "Weakness Name";
    pub const WEAKNESS_DESCRIPTION: &str = "Weakness Description";
    pub const WEAKNESS_DETECTOR_SOURCE: &str = "Weakness Detector Source";
    pub const ORIGINAL_RATING: &str = "Original Rating";
    pub const OVERALL_REMEDIATION: &str = "Overall Remediation";
    pub const ASSET_IDENTIFIER: &str = "Asset Identifier";
    pub const POINT_OF_CONTACT: &str = "Point of Contact";
    pub const SCHEDULED_COMPLETION: &str = "Scheduled Completion";
    pub const CVE: &str = "CVE";
}

/// Possible errors when checking a schema
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Missing required column: '{0}'")]
    MissingColumn(&'static str),
}

/// The positional column layout rows are loaded with
///
/// ### Important
/// [`Schema::validate`] checks the column list itself, not the contents of a
/// spreadsheet. Since every loaded row carries every schema name, it can only
/// fail when the column list lacks one of the [`REQUIRED_COLUMNS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schema {
    columns: &'static [&'static str],
}

impl Schema {
    /// The fixed 31 column POAM layout
    pub fn poam() -> Self {
        Self::new(&POAM_COLUMNS)
    }

    /// Creates a schema from an ordered list of column names
    pub const fn new(columns: &'static [&'static str]) -> Self {
        Self { columns }
    }

    /// The column names in positional order
    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    /// The number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|column| *column == name)
    }

    /// Makes sure every one of the [`REQUIRED_COLUMNS`] is part of the schema
    pub fn validate(&self) -> Result<(), SchemaError> {
        match REQUIRED_COLUMNS.iter().find(|name| !self.contains(name)) {
            Some(name) => Err(SchemaError::MissingColumn(*name)),
            None => Ok(()),
        }
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::poam()
    }
}
