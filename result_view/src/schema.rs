//! Schema panels shown beside the editor.

use grading_protocol::{ResultColumn, SchemaTable};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NO_SCHEMA_MESSAGE: &str = "No schema information available for this task.";
pub const DEFAULT_NO_RESULT_SCHEMA_MESSAGE: &str =
    "No result schema information available for this task.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaColumnLine {
    pub name: String,
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaTablePanel {
    pub name: String,
    pub columns: Vec<SchemaColumnLine>,
}

/// Tables the task's query can read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaPanel {
    Empty { message: String },
    Tables(Vec<SchemaTablePanel>),
}

/// Columns the expected answer has
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultSchemaPanel {
    Empty { message: String },
    Columns(Vec<ResultColumn>),
}

pub fn render_task_schema(tables: &[SchemaTable], empty_message: &str) -> SchemaPanel {
    if tables.is_empty() {
        return SchemaPanel::Empty {
            message: empty_message.to_string(),
        };
    }

    SchemaPanel::Tables(
        tables
            .iter()
            .map(|table| SchemaTablePanel {
                name: table.table_name.clone(),
                columns: table
                    .columns
                    .iter()
                    .map(|column| SchemaColumnLine {
                        name: column.name.clone(),
                        data_type: column.data_type.clone(),
                        constraints: column
                            .constraints
                            .clone()
                            .filter(|c| !c.trim().is_empty()),
                    })
                    .collect(),
            })
            .collect(),
    )
}

pub fn render_result_schema(columns: &[ResultColumn], empty_message: &str) -> ResultSchemaPanel {
    if columns.is_empty() {
        ResultSchemaPanel::Empty {
            message: empty_message.to_string(),
        }
    } else {
        ResultSchemaPanel::Columns(columns.to_vec())
    }
}
