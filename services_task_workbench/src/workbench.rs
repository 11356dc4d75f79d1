//! The task workbench: editor, runner, validator and panels for one view

use grading_client::{
    into_verdict, Completion, GradingAction, GradingError, GradingTransport, OutboundRequest,
    QueryRunner, RequestTicket, SessionStore, SubmissionValidator, TaskLoader, TransportResult,
    ValidationError,
};
use grading_protocol::{QueryContext, TaskDetail};
use result_view::{render_result_schema, render_task_schema, ResultRenderer, ResultView};
use sql_editor_core::{CoreOutcome, Key, SqlEditor};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, WorkbenchConfig};
use crate::render::{EditorPane, TaskHeader, WorkbenchView};
use crate::state::{TableSelection, TaskStatus, WorkbenchMode};

/// What the host should do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkbenchAction {
    /// State updated; nothing to send
    Continue,
    /// Send the request and pass its outcome to [`TaskWorkbench::handle_response`]
    Dispatch(OutboundRequest),
    /// The session is gone; navigate to `location`
    RedirectToLogin { location: String },
}

/// One SQL workbench view.
///
/// Owns its editor and request bookkeeping; the host owns the workbench
/// and performs the requests it hands out.
pub struct TaskWorkbench<S: SessionStore> {
    config: WorkbenchConfig,
    mode: WorkbenchMode,
    session: S,
    editor: SqlEditor,
    runner: QueryRunner,
    validator: SubmissionValidator,
    loader: TaskLoader,
    renderer: ResultRenderer,
    tables: TableSelection,
    task: Option<TaskDetail>,
    status: TaskStatus,
    results: ResultView,
    error_line: Option<String>,
    banner: Option<String>,
}

impl<S: SessionStore> TaskWorkbench<S> {
    pub fn new(config: WorkbenchConfig, mode: WorkbenchMode, session: S) -> Result<Self, ConfigError> {
        let editor = SqlEditor::new(config.editor.clone())?;
        Ok(Self {
            runner: QueryRunner::new(config.endpoints.clone()),
            validator: SubmissionValidator::new(config.endpoints.clone()),
            loader: TaskLoader::new(config.endpoints.clone()),
            renderer: ResultRenderer::new(config.locale.no_results.clone()),
            config,
            mode,
            session,
            editor,
            tables: TableSelection::new(),
            task: None,
            status: TaskStatus::Unsolved,
            results: ResultView::Idle,
            error_line: None,
            banner: None,
        })
    }

    pub fn mode(&self) -> WorkbenchMode {
        self.mode
    }

    pub fn editor(&self) -> &SqlEditor {
        &self.editor
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn results(&self) -> &ResultView {
        &self.results
    }

    pub fn error_line(&self) -> Option<&str> {
        self.error_line.as_deref()
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn task(&self) -> Option<&TaskDetail> {
        self.task.as_ref()
    }

    pub fn selected_tables(&self) -> &[String] {
        self.tables.tables()
    }

    /// Whether the latest run is still waiting for its answer
    pub fn is_running(&self) -> bool {
        self.runner.is_pending()
    }

    pub fn press_key(&mut self, key: Key) -> CoreOutcome {
        self.editor.apply_key(key)
    }

    /// Feed typed text through the editor, key by key
    pub fn type_text(&mut self, text: &str) -> CoreOutcome {
        Key::typed(text).fold(CoreOutcome::Continue, |outcome, key| {
            match self.editor.apply_key(key) {
                CoreOutcome::Changed => CoreOutcome::Changed,
                CoreOutcome::Continue => outcome,
            }
        })
    }

    /// Replace the query text, e.g. with a saved draft
    pub fn set_query(&mut self, text: &str) {
        self.editor.set_text(text);
    }

    pub fn clear_query(&mut self) {
        self.editor.clear();
        self.error_line = None;
    }

    /// Returns false outside authoring mode or if already selected
    pub fn select_table(&mut self, table: &str) -> bool {
        self.mode == WorkbenchMode::Authoring && self.tables.select(table)
    }

    pub fn deselect_table(&mut self, table: &str) -> bool {
        self.mode == WorkbenchMode::Authoring && self.tables.deselect(table)
    }

    /// Returns whether the table is selected afterwards
    pub fn toggle_table(&mut self, table: &str) -> bool {
        self.mode == WorkbenchMode::Authoring && self.tables.toggle(table)
    }

    /// Execute the buffer without grading it.
    pub fn run(&mut self) -> WorkbenchAction {
        let context = match self.mode {
            WorkbenchMode::Task(task_id) => QueryContext::Task(task_id),
            WorkbenchMode::Authoring => QueryContext::Tables(self.tables.tables().to_vec()),
        };
        let text = self.editor.text();

        match self.runner.begin(&text, &context, &self.session) {
            Ok(outbound) => {
                self.error_line = None;
                self.results = ResultView::loading(self.config.locale.running.clone());
                WorkbenchAction::Dispatch(outbound)
            }
            Err(err) => self.report(GradingAction::Run, err),
        }
    }

    /// Send the buffer to be graded.
    pub fn submit(&mut self) -> WorkbenchAction {
        let Some(task_id) = self.mode.task_id() else {
            return self.report(GradingAction::Submit, ValidationError::NoTaskToGrade.into());
        };
        let text = self.editor.text();

        match self.validator.begin(task_id, &text, &self.session) {
            Ok(outbound) => {
                self.error_line = None;
                WorkbenchAction::Dispatch(outbound)
            }
            Err(err) => self.report(GradingAction::Submit, err),
        }
    }

    /// Fetch the task's metadata and solved flag.
    pub fn load_task(&mut self) -> WorkbenchAction {
        let Some(task_id) = self.mode.task_id() else {
            return WorkbenchAction::Continue;
        };
        match self.loader.begin(task_id, &self.session) {
            Ok(outbound) => WorkbenchAction::Dispatch(outbound),
            Err(err) => self.report(GradingAction::LoadTask, err),
        }
    }

    /// Apply the outcome of a request handed out earlier.
    pub fn handle_response(&mut self, ticket: RequestTicket, result: TransportResult) -> WorkbenchAction {
        match ticket.action {
            GradingAction::Run => match self.runner.complete(ticket, result) {
                Completion::Stale => WorkbenchAction::Continue,
                Completion::Applied(Ok(rows)) => {
                    self.results = self.renderer.render(&rows);
                    self.error_line = None;
                    WorkbenchAction::Continue
                }
                Completion::Applied(Err(err)) => self.report(GradingAction::Run, err),
            },
            GradingAction::Submit => match self.validator.complete(ticket, result) {
                Completion::Stale => WorkbenchAction::Continue,
                Completion::Applied(verdict) => match verdict.and_then(into_verdict) {
                    Ok(_) => {
                        self.mark_solved();
                        self.error_line = None;
                        self.banner = Some(self.config.locale.solution_accepted.clone());
                        WorkbenchAction::Continue
                    }
                    Err(err) => self.report(GradingAction::Submit, err),
                },
            },
            GradingAction::LoadTask => match self.loader.complete(ticket, result) {
                Completion::Stale => WorkbenchAction::Continue,
                Completion::Applied(Ok(task)) => {
                    self.apply_task(task);
                    WorkbenchAction::Continue
                }
                Completion::Applied(Err(err)) => self.report(GradingAction::LoadTask, err),
            },
        }
    }

    /// Perform `action` with a blocking transport, if it asks for a request.
    pub fn drive<T: GradingTransport>(&mut self, transport: &mut T, action: WorkbenchAction) -> WorkbenchAction {
        match action {
            WorkbenchAction::Dispatch(outbound) => {
                let result = transport.send(&outbound.http);
                self.handle_response(outbound.ticket, result)
            }
            other => other,
        }
    }

    pub fn view(&self) -> WorkbenchView {
        let locale = &self.config.locale;
        let in_task = self.mode.task_id().is_some();

        WorkbenchView {
            mode: self.mode,
            editor: EditorPane {
                lines: self.editor.buffer().lines().to_vec(),
                cursor: self.editor.cursor(),
                dirty: self.editor.dirty(),
            },
            task: self.task.as_ref().map(|task| TaskHeader {
                id: task.id,
                name: task.name.clone(),
                difficulty: task.difficulty.clone(),
                description: task.description.clone(),
                columns_info: task.columns_info.clone(),
            }),
            status: in_task.then_some(self.status),
            status_label: in_task.then(|| match self.status {
                TaskStatus::Solved => locale.solved.clone(),
                TaskStatus::Unsolved => locale.unsolved.clone(),
            }),
            selected_tables: self.tables.tables().to_vec(),
            schema: self
                .task
                .as_ref()
                .map(|task| render_task_schema(&task.schema, &locale.no_schema)),
            result_schema: self
                .task
                .as_ref()
                .map(|task| render_result_schema(&task.result_schema, &locale.no_result_schema)),
            error_line: self.error_line.clone(),
            results: self.results.clone(),
            banner: self.banner.clone(),
        }
    }

    fn mark_solved(&mut self) {
        if !self.status.is_solved() {
            info!(task_id = ?self.mode.task_id(), "task solved");
        }
        self.status = TaskStatus::Solved;
    }

    fn apply_task(&mut self, task: TaskDetail) {
        debug!(task_id = task.id, solved = task.solved, "task loaded");
        if task.solved {
            self.mark_solved();
        }
        self.task = Some(task);
    }

    fn report(&mut self, action: GradingAction, err: GradingError) -> WorkbenchAction {
        let locale = &self.config.locale;

        match (&err, action) {
            (GradingError::Auth(reason), _) => {
                warn!(%action, %reason, "session rejected, redirecting to login");
                self.session.invalidate();
                return WorkbenchAction::RedirectToLogin {
                    location: self.config.login_path.clone(),
                };
            }
            (GradingError::Validation(reason), _) => {
                debug!(%action, %reason, "rejected before sending");
                self.error_line = Some(
                    match reason {
                        ValidationError::EmptyQuery => &locale.empty_query,
                        ValidationError::MissingContext => &locale.no_tables_selected,
                        ValidationError::NoTaskToGrade => &locale.no_task_to_grade,
                    }
                    .clone(),
                );
            }
            (_, GradingAction::Run) => {
                self.error_line = Some(failure_detail(&err).unwrap_or(&locale.run_failed).to_string());
                self.results = ResultView::error(locale.run_error.clone());
            }
            (GradingError::Logical(message), GradingAction::Submit) => {
                self.error_line = Some(
                    message
                        .clone()
                        .unwrap_or_else(|| locale.solution_incorrect.clone()),
                );
                self.banner = None;
            }
            (_, GradingAction::Submit) => {
                self.error_line = Some(locale.submit_failed.clone());
            }
            (_, GradingAction::LoadTask) => {
                self.error_line = Some(failure_detail(&err).unwrap_or(&locale.load_failed).to_string());
            }
        }
        WorkbenchAction::Continue
    }
}

/// Server-supplied reason behind a failure, if any
fn failure_detail(err: &GradingError) -> Option<&str> {
    match err {
        GradingError::Logical(message) => message.as_deref(),
        GradingError::Transport(transport) => transport.detail(),
        _ => None,
    }
}
