pub use self::{
    cell::CellValue,
    converter::{ConvertError, Converter},
    jira::{JiraIssue, JIRA_COLUMNS},
    poam::{LoadError, PoamRow, PoamSheet},
    schema::{Schema, SchemaError, POAM_COLUMNS, REQUIRED_COLUMNS},
};

pub mod cell;
pub mod jira;
pub mod poam;
pub mod schema;
mod converter;
