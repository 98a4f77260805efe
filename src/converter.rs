use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::jira::{self, JiraIssue};
use crate::poam::{self, LoadError, PoamSheet};
use crate::{Schema, SchemaError};

/// Possible errors to occur while converting a POAM export
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Unable to read the spreadsheet: {0}")]
    FileFormat(#[from] LoadError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("Refusing to overwrite the input file {}, its name does not contain '{}'", .0.display(), jira::INPUT_SUFFIX)]
    OverwritesInput(PathBuf),
    #[error("Unable to write the import file: {0}")]
    Io(#[from] io::Error),
    #[error("Unable to write the import file: {0}")]
    Csv(#[from] csv::Error),
}

/// Converts POAM spreadsheets into Jira import files
///
/// The conversion is a linear pipeline of [`Converter::load`],
/// [`Converter::validate`], [`Converter::transform`] and [`Converter::write`].
/// The first failing stage aborts the run, nothing is written in that case.
#[derive(Clone, Copy, Debug, Default)]
pub struct Converter {
    schema: Schema,
}

impl Converter {
    /// Creates a converter for the fixed POAM layout
    pub fn new() -> Self {
        Self::with_schema(Schema::poam())
    }

    /// Creates a converter mapping rows with a custom column layout
    pub fn with_schema(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Runs the whole pipeline and returns the path of the written import file
    pub fn convert(&self, path: &Path) -> Result<PathBuf, ConvertError> {
        if !path.exists() {
            return Err(ConvertError::FileNotFound(path.to_path_buf()));
        }

        let sheet = self.load(path)?;
        self.validate(&sheet)?;
        let issues = self.transform(&sheet);
        let output = self.write(&issues, path)?;
        info!(output = %output.display(), issues = issues.len(), "wrote Jira import file");

        Ok(output)
    }

    /// Reads the first worksheet of the spreadsheet at `path`
    pub fn load(&self, path: &Path) -> Result<PoamSheet, ConvertError> {
        let sheet = poam::load(path, self.schema)?;
        debug!(rows = sheet.len(), "mapped rows");

        Ok(sheet)
    }

    /// Makes sure the columns the rows were mapped with include every required column
    pub fn validate(&self, sheet: &PoamSheet) -> Result<(), ConvertError> {
        sheet.schema().validate()?;

        Ok(())
    }

    /// Derives one issue per row
    pub fn transform(&self, sheet: &PoamSheet) -> Vec<JiraIssue> {
        let issues = jira::transform(sheet.rows());
        let undated = issues
            .iter()
            .filter(|issue| issue.requested_completion_date().is_none())
            .count();
        debug!(issues = issues.len(), undated, "derived issues");

        issues
    }

    /// Writes the issues next to the spreadsheet they were read from
    ///
    /// The import file is first written to a temporary file in the destination
    /// directory and then moved into place, so a failed write leaves no file
    /// behind. On Unix the import file is made `0644`, temporary files are
    /// created owner-only.
    pub fn write(&self, issues: &[JiraIssue], input: &Path) -> Result<PathBuf, ConvertError> {
        let output = jira::output_path(input);
        if output == input {
            return Err(ConvertError::OverwritesInput(output));
        }

        let directory = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(directory)?;
        jira::write_csv(&mut file, issues)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file().set_permissions(std::fs::Permissions::from_mode(0o644))?;
        }
        file.persist(&output).map_err(io::Error::from)?;

        Ok(output)
    }
}
