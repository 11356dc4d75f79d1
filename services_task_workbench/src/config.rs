//! Workbench configuration and user-facing strings

use grading_protocol::Endpoints;
use serde::{Deserialize, Serialize};
use sql_editor_core::{EditorConfig, EditorConfigError};
use thiserror::Error;

pub const DEFAULT_LOGIN_PATH: &str = "/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid workbench config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid editor config: {0}")]
    Editor(#[from] EditorConfigError),
}

/// Every string the workbench shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Locale {
    pub empty_query: String,
    pub no_tables_selected: String,
    pub no_task_to_grade: String,
    pub running: String,
    /// Inline error when the server gave no reason
    pub run_failed: String,
    /// Results panel after a failed run
    pub run_error: String,
    pub no_results: String,
    pub submit_failed: String,
    pub solution_incorrect: String,
    pub solution_accepted: String,
    pub load_failed: String,
    pub solved: String,
    pub unsolved: String,
    pub no_schema: String,
    pub no_result_schema: String,
}

impl Locale {
    pub fn english() -> Self {
        Self {
            empty_query: "Query cannot be empty".into(),
            no_tables_selected: "At least one table must be selected".into(),
            no_task_to_grade: "There is no task to submit a solution for".into(),
            running: "Running query...".into(),
            run_failed: "Failed to run query".into(),
            run_error: "Error running query".into(),
            no_results: "Query returned no results".into(),
            submit_failed: "Failed to submit solution".into(),
            solution_incorrect: "Your solution is incorrect. Please try again.".into(),
            solution_accepted: "Congratulations! Your solution is correct.".into(),
            load_failed: "Failed to load task".into(),
            solved: "Solved".into(),
            unsolved: "Unsolved".into(),
            no_schema: "No schema information available for this task.".into(),
            no_result_schema: "No result schema information available for this task.".into(),
        }
    }

    pub fn russian() -> Self {
        Self {
            empty_query: "Запрос не может быть пустым".into(),
            no_tables_selected: "Хотя бы одна таблица должна быть выбрана".into(),
            no_task_to_grade: "Нет задачи для проверки решения".into(),
            running: "Запрос выполняется...".into(),
            run_failed: "Ошибка при выполнении запроса".into(),
            run_error: "Ошибка при выполнении запроса".into(),
            no_results: "Запрос ничего не вернул".into(),
            submit_failed: "Не удалось отправить решение".into(),
            solution_incorrect: "Решение неверное. Попробуйте еще раз.".into(),
            solution_accepted: "Поздравляем! Решение верное.".into(),
            load_failed: "Не удалось загрузить задачу".into(),
            solved: "Решена".into(),
            unsolved: "Не решена".into(),
            no_schema: "Нет информации о схеме для этой задачи.".into(),
            no_result_schema: "Нет информации о схеме результата для этой задачи.".into(),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

/// Everything that differs between deployments of the workbench
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbenchConfig {
    pub editor: EditorConfig,
    pub locale: Locale,
    pub endpoints: Endpoints,
    /// Where the host navigates once the session is rejected
    pub login_path: String,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            editor: EditorConfig::default(),
            locale: Locale::default(),
            endpoints: Endpoints::default(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }
}

impl WorkbenchConfig {
    /// Parse and validate; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: WorkbenchConfig = serde_json::from_str(json)?;
        config.editor.validate()?;
        Ok(config)
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_editor(mut self, editor: EditorConfig) -> Self {
        self.editor = editor;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = WorkbenchConfig::from_json("{}").unwrap();
        assert_eq!(config.locale, Locale::english());
        assert_eq!(config.endpoints, Endpoints::default());
        assert_eq!(config.editor, EditorConfig::default());
        assert_eq!(config.login_path, "/");
    }

    #[test]
    fn test_partial_overrides() {
        let config = WorkbenchConfig::from_json(
            r#"{"editor": {"indent_unit": "    "}, "locale": {"running": "Working..."}}"#,
        )
        .unwrap();
        assert_eq!(config.editor.indent_unit, "    ");
        assert!(config.editor.auto_close);
        assert_eq!(config.locale.running, "Working...");
        assert_eq!(config.locale.run_failed, "Failed to run query");
    }

    #[test]
    fn test_invalid_indent_unit_rejected() {
        let err = WorkbenchConfig::from_json(r#"{"editor": {"indent_unit": "ab"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Editor(EditorConfigError::InvalidIndentUnit(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            WorkbenchConfig::from_json("{"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_russian_preset() {
        let locale = Locale::russian();
        assert_eq!(locale.empty_query, "Запрос не может быть пустым");
        assert_eq!(locale.no_results, "Запрос ничего не вернул");
    }
}
