//! Main application UI.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, NaiveDate};
use eframe::egui::{self, Align, Layout};
use tokio::sync::mpsc;

use crate::api::{self, ApiClient};
use crate::config::AppConfig;
use crate::exam::{self, ExamTimer};
use crate::models::account::{Account, RegisterAccount, UpdateAccount};
use crate::models::assessment::{Assessment, EssayGrade, Submission, SubmitAnswers};
use crate::models::leave::{CreateLeaveRequest, LEAVE_TYPES, LeaveRequest};
use crate::models::notification::Notification;
use crate::models::overtime::{CreateOvertimeLog, OvertimeLog};
use crate::models::peer_review::{AssignPeerReview, PeerReviewAssignment};
use crate::models::training::TrainingMaterial;
use crate::poll::PollBackoff;
use crate::session::{Role, Session};

use super::components::colors;
use super::{
    accounts_panel, assessments_panel, dashboard, exam_panel, grading_panel, leave_panel, login, notifications_panel,
    overtime_panel, peer_review_panel, training_panel,
};

/// Current panel being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Dashboard,
    Accounts,
    Leave,
    Overtime,
    Assessments,
    Exam,
    Grading,
    PeerReview,
    Training,
    Notifications,
}

impl Panel {
    /// Get the display name for the panel.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Dashboard => "Dashboard",
            Panel::Accounts => "Accounts",
            Panel::Leave => "Leave Requests",
            Panel::Overtime => "Overtime",
            Panel::Assessments => "Assessments",
            Panel::Exam => "Exam",
            Panel::Grading => "Grading",
            Panel::PeerReview => "Peer Review",
            Panel::Training => "Training",
            Panel::Notifications => "Notifications",
        }
    }
}

/// Messages from async tasks to UI.
pub enum UiMessage {
    // Session
    LoggedIn(Session),
    LoginFailed(String),

    // Data loading
    AccountsLoaded(Vec<Account>),
    AccountDetailLoaded(Account),
    LeaveLoaded(Vec<LeaveRequest>),
    OvertimeLoaded(Vec<OvertimeLog>),
    AssessmentsLoaded(Vec<Assessment>),
    ExamLoaded(Assessment),
    MySubmissionLoaded(Submission),
    SubmissionsLoaded(Vec<Submission>),
    MaterialsLoaded(Vec<TrainingMaterial>),
    PeerReviewsLoaded(Vec<PeerReviewAssignment>),
    LoadError(String),

    // Notification polling (background; failures never raise dialogs)
    NotificationsPolled(Vec<Notification>),
    NotificationPollFailed(String),
    NotificationMarked(i64),
    AllNotificationsMarked,

    // Mutations
    AccountSaved(String),
    AccountDeleted(String),
    LeaveSaved,
    LeaveActioned(&'static str),
    OvertimeSaved,
    OvertimeActioned(&'static str),
    ExamSubmitted(Submission),
    EssayGraded(i64, i64),
    PeerReviewAssigned,
    OperationFailed(String),
}

/// Form state for account register/edit.
#[derive(Clone)]
pub struct AccountForm {
    pub username: String,
    pub full_name: String,
    pub gender: Option<String>,
    pub role: Role,
    pub phone_number: String,
    pub address: String,
    pub birth_date_input: String,
    pub birth_date: Option<NaiveDate>,
    pub outlet: String,
    pub is_open: bool,
    pub is_editing: bool,
}

impl Default for AccountForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            full_name: String::new(),
            gender: None,
            role: Role::Barista,
            phone_number: String::new(),
            address: String::new(),
            birth_date_input: String::new(),
            birth_date: None,
            outlet: String::new(),
            is_open: false,
            is_editing: false,
        }
    }
}

impl AccountForm {
    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Create a form pre-filled for editing an existing account.
    pub fn edit(account: &Account) -> Self {
        Self {
            username: account.username.clone(),
            full_name: account.full_name.clone(),
            gender: account.gender.clone(),
            role: Role::parse(&account.role),
            phone_number: account.phone_number.clone(),
            address: account.address.clone(),
            birth_date_input: account.date_of_birth.map(|d| d.to_string()).unwrap_or_default(),
            birth_date: account.date_of_birth,
            outlet: account.outlet.clone().unwrap_or_default(),
            is_open: true,
            is_editing: true,
        }
    }
}

/// Form state for a new leave request.
#[derive(Clone)]
pub struct LeaveForm {
    pub leave_type: String,
    pub request_date: NaiveDate,
    pub reason: String,
    pub is_open: bool,
}

impl Default for LeaveForm {
    fn default() -> Self {
        Self {
            leave_type: LEAVE_TYPES[0].to_string(),
            request_date: Local::now().date_naive(),
            reason: String::new(),
            is_open: false,
        }
    }
}

impl LeaveForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Form state for a new overtime log.
#[derive(Clone)]
pub struct OvertimeForm {
    pub date: NaiveDate,
    pub start_hour: u32,
    pub duration: u32,
    pub reason: String,
    pub is_open: bool,
}

impl Default for OvertimeForm {
    fn default() -> Self {
        Self {
            date: Local::now().date_naive(),
            start_hour: 18,
            duration: 2,
            reason: String::new(),
            is_open: false,
        }
    }
}

impl OvertimeForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Form state for assigning a peer review.
#[derive(Clone)]
pub struct PeerReviewForm {
    pub reviewer: String,
    pub reviewee: String,
    pub deadline: NaiveDate,
    pub is_open: bool,
}

impl Default for PeerReviewForm {
    fn default() -> Self {
        Self {
            reviewer: String::new(),
            reviewee: String::new(),
            deadline: Local::now().date_naive() + chrono::Duration::days(7),
            is_open: false,
        }
    }
}

impl PeerReviewForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// State of an exam in progress.
pub struct ExamState {
    pub assessment: Assessment,
    pub answers: HashMap<i64, String>,
    pub timer: ExamTimer,
    pub last_tick: Instant,
    pub submitting: bool,
    pub result: Option<Submission>,
}

impl ExamState {
    pub fn new(assessment: Assessment) -> Self {
        let total = assessment.duration_seconds.unwrap_or(exam::DEFAULT_DURATION_SECS);
        Self {
            assessment,
            answers: HashMap::new(),
            timer: ExamTimer::new(total),
            last_tick: Instant::now(),
            submitting: false,
            result: None,
        }
    }
}

/// Grading workspace for one assessment's submissions.
pub struct GradingState {
    pub assessment: Assessment,
    pub submissions: Vec<Submission>,
    pub selected: Option<usize>,
    /// Score text inputs keyed by (submission, question).
    pub score_inputs: HashMap<(i64, i64), String>,
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Pending action awaiting confirmation.
#[derive(Clone)]
pub enum ConfirmAction {
    DeleteAccount(String, String),
    ApproveLeave(i64),
    RejectLeave(i64),
    CancelLeave(i64),
    ApproveOvertime(i64),
    RejectOvertime(i64),
    CancelOvertime(i64),
}

impl ConfirmAction {
    fn describe(&self) -> (&'static str, String) {
        match self {
            ConfirmAction::DeleteAccount(_, name) => ("Delete Account", format!("Delete account '{name}'?")),
            ConfirmAction::ApproveLeave(id) => ("Approve Leave", format!("Approve leave request #{id}?")),
            ConfirmAction::RejectLeave(id) => ("Reject Leave", format!("Reject leave request #{id}?")),
            ConfirmAction::CancelLeave(id) => ("Cancel Leave", format!("Cancel leave request #{id}?")),
            ConfirmAction::ApproveOvertime(id) => ("Approve Overtime", format!("Approve overtime log #{id}?")),
            ConfirmAction::RejectOvertime(id) => ("Reject Overtime", format!("Reject overtime log #{id}?")),
            ConfirmAction::CancelOvertime(id) => ("Cancel Overtime", format!("Cancel overtime log #{id}?")),
        }
    }
}

/// Main application state.
pub struct App {
    // Runtime and API client
    pub rt: tokio::runtime::Runtime,
    pub api: ApiClient,

    // Message channel for async communication
    pub tx: mpsc::UnboundedSender<UiMessage>,
    pub rx: mpsc::UnboundedReceiver<UiMessage>,

    // Session (None until login succeeds)
    pub session: Option<Session>,

    // Login form
    pub login_username: String,
    pub login_password: String,
    pub logging_in: bool,
    pub login_error: Option<String>,

    // Navigation
    pub current_panel: Panel,

    // Cached data
    pub accounts: Vec<Account>,
    pub leave_requests: Vec<LeaveRequest>,
    pub overtime_logs: Vec<OvertimeLog>,
    pub assessments: Vec<Assessment>,
    pub materials: Vec<TrainingMaterial>,
    pub peer_reviews: Vec<PeerReviewAssignment>,
    pub notifications: Vec<Notification>,
    pub my_submissions: HashMap<i64, Submission>,

    // Loading state
    pub is_loading: bool,

    // Forms
    pub account_form: AccountForm,
    pub leave_form: LeaveForm,
    pub overtime_form: OvertimeForm,
    pub peer_review_form: PeerReviewForm,

    // Exam and grading workspaces
    pub exam: Option<ExamState>,
    pub grading: Option<GradingState>,
    /// Assessment whose submission result window is open.
    pub result_view: Option<i64>,

    // Search/filter state
    pub account_search: String,
    pub account_role_filter: Option<Role>,
    pub leave_status_filter: Option<crate::models::leave::LeaveStatus>,
    pub overtime_status_filter: Option<crate::models::overtime::OvertimeStatus>,

    // Notification polling
    pub poll: PollBackoff,
    last_poll: Instant,
    last_activity: Instant,
    poll_inflight: bool,

    // Log messages
    pub log_messages: Vec<LogEntry>,

    // Configuration
    pub config: AppConfig,

    // Dialogs
    pub show_confirm: bool,
    pub confirm_action: Option<ConfirmAction>,
    pub error_message: Option<String>,
    pub success_message: Option<String>,

    // Server settings dialog
    pub server_dialog_open: bool,
    pub server_url_input: String,
}

impl App {
    pub fn new(config: AppConfig, rt: tokio::runtime::Runtime) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let api = ApiClient::new(&config.api);
        let poll = PollBackoff::new(&config.polling);
        let server_url_input = config.api.base_url.clone();
        let login_username = if config.ui.remember_username {
            config.ui.cached_username.clone()
        } else {
            String::new()
        };

        Self {
            rt,
            api,
            tx,
            rx,
            session: None,
            login_username,
            login_password: String::new(),
            logging_in: false,
            login_error: None,
            current_panel: Panel::default(),
            accounts: Vec::new(),
            leave_requests: Vec::new(),
            overtime_logs: Vec::new(),
            assessments: Vec::new(),
            materials: Vec::new(),
            peer_reviews: Vec::new(),
            notifications: Vec::new(),
            my_submissions: HashMap::new(),
            is_loading: false,
            account_form: AccountForm::default(),
            leave_form: LeaveForm::default(),
            overtime_form: OvertimeForm::default(),
            peer_review_form: PeerReviewForm::default(),
            exam: None,
            grading: None,
            result_view: None,
            account_search: String::new(),
            account_role_filter: None,
            leave_status_filter: None,
            overtime_status_filter: None,
            poll,
            last_poll: Instant::now(),
            last_activity: Instant::now(),
            poll_inflight: false,
            log_messages: Vec::new(),
            config,
            show_confirm: false,
            confirm_action: None,
            error_message: None,
            success_message: None,
            server_dialog_open: false,
            server_url_input,
        }
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        // Keep only last 100 messages
        if self.log_messages.len() > 100 {
            self.log_messages.remove(0);
        }
    }

    /// Log an info message.
    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    /// Log a success message.
    pub fn log_success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    /// Log a warning message.
    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    /// Log an error message.
    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Current session role, if logged in.
    pub fn role(&self) -> Option<&Role> {
        self.session.as_ref().map(|s| &s.role)
    }

    /// Count of unread notifications.
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Start the login request.
    pub fn start_login(&mut self) {
        if self.logging_in {
            return;
        }

        let username = self.login_username.trim().to_string();
        let password = self.login_password.clone();
        if username.is_empty() || password.is_empty() {
            self.login_error = Some("Username and password are required".to_string());
            return;
        }

        self.logging_in = true;
        self.login_error = None;

        let api = self.api.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = async {
                let token = api::auth::login(&api, &username, &password).await?;
                Session::from_token(&token)
            }
            .await;

            match result {
                Ok(session) => {
                    let _ = tx.send(UiMessage::LoggedIn(session));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoginFailed(e.to_string()));
                }
            }
        });
    }

    /// Drop the session and return to the login screen.
    pub fn logout(&mut self) {
        self.session = None;
        self.api.clear_token();
        self.current_panel = Panel::Dashboard;
        self.login_password.clear();
        self.accounts.clear();
        self.leave_requests.clear();
        self.overtime_logs.clear();
        self.assessments.clear();
        self.materials.clear();
        self.peer_reviews.clear();
        self.notifications.clear();
        self.my_submissions.clear();
        self.exam = None;
        self.grading = None;
        self.log_info("Logged out");
    }

    /// Load all accounts.
    pub fn load_accounts(&mut self) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.is_loading = true;

        self.rt.spawn(async move {
            match api::account::list_all(&api).await {
                Ok(rows) => {
                    let _ = tx.send(UiMessage::AccountsLoaded(rows));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    /// Fetch a fresh account record and open the edit form when it
    /// arrives.
    pub fn open_account_editor(&mut self, username: String) {
        let api = self.api.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match api::account::detail(&api, &username).await {
                Ok(account) => {
                    let _ = tx.send(UiMessage::AccountDetailLoaded(account));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    /// Register a new account.
    pub fn register_account(&mut self, data: RegisterAccount) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        let username = data.username.clone();

        self.rt.spawn(async move {
            match api::account::register(&api, &data).await {
                Ok(()) => {
                    let _ = tx.send(UiMessage::AccountSaved(username));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Update an existing account.
    pub fn update_account(&mut self, username: String, data: UpdateAccount) {
        let api = self.api.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match api::account::update(&api, &username, &data).await {
                Ok(()) => {
                    let _ = tx.send(UiMessage::AccountSaved(username));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Delete an account.
    pub fn delete_account(&mut self, username: String) {
        let api = self.api.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match api::account::remove(&api, &username).await {
                Ok(()) => {
                    let _ = tx.send(UiMessage::AccountDeleted(username));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Load leave requests: the full list for approvers, own requests
    /// otherwise.
    pub fn load_leave(&mut self) {
        let Some(session) = &self.session else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        let all = session.role.is_management();
        let username = session.username.clone();
        self.is_loading = true;

        self.rt.spawn(async move {
            let result = if all {
                api::leave::list_all(&api).await
            } else {
                api::leave::list_for_user(&api, &username).await
            };
            match result {
                Ok(rows) => {
                    let _ = tx.send(UiMessage::LeaveLoaded(rows));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    /// Submit a new leave request.
    pub fn create_leave(&mut self, data: CreateLeaveRequest) {
        let api = self.api.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match api::leave::create(&api, &data).await {
                Ok(()) => {
                    let _ = tx.send(UiMessage::LeaveSaved);
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    fn leave_action(&mut self, id: i64, action: &'static str) {
        let api = self.api.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = match action {
                "approved" => api::leave::approve(&api, id).await,
                "rejected" => api::leave::reject(&api, id).await,
                _ => api::leave::cancel(&api, id).await,
            };
            match result {
                Ok(()) => {
                    let _ = tx.send(UiMessage::LeaveActioned(action));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Load overtime logs: the full list for verifiers, own logs
    /// otherwise.
    pub fn load_overtime(&mut self) {
        let Some(session) = &self.session else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        let all = session.role.is_management();
        let username = session.username.clone();
        self.is_loading = true;

        self.rt.spawn(async move {
            let result = if all {
                api::overtime::list_all(&api).await
            } else {
                api::overtime::list_for_user(&api, &username).await
            };
            match result {
                Ok(rows) => {
                    let _ = tx.send(UiMessage::OvertimeLoaded(rows));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    /// Submit a new overtime log.
    pub fn create_overtime(&mut self, data: CreateOvertimeLog) {
        let api = self.api.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match api::overtime::create(&api, &data).await {
                Ok(()) => {
                    let _ = tx.send(UiMessage::OvertimeSaved);
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    fn overtime_action(&mut self, id: i64, action: &'static str) {
        let api = self.api.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = match action {
                "approved" => api::overtime::approve(&api, id).await,
                "rejected" => api::overtime::reject(&api, id).await,
                _ => api::overtime::cancel(&api, id).await,
            };
            match result {
                Ok(()) => {
                    let _ = tx.send(UiMessage::OvertimeActioned(action));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Load assessments assigned to the session user.
    pub fn load_assessments(&mut self) {
        let Some(session) = &self.session else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        let username = session.username.clone();
        self.is_loading = true;

        self.rt.spawn(async move {
            match api::assessment::list_assigned(&api, &username).await {
                Ok(rows) => {
                    let _ = tx.send(UiMessage::AssessmentsLoaded(rows));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    /// Fetch an assessment's questions and open the exam panel when it
    /// arrives.
    pub fn open_exam(&mut self, id: i64) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.is_loading = true;

        self.rt.spawn(async move {
            match api::assessment::detail(&api, id).await {
                Ok(assessment) => {
                    let _ = tx.send(UiMessage::ExamLoaded(assessment));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    /// Submit the in-progress exam. With `force`, unanswered questions
    /// are coerced instead of validated (timer expiry path).
    pub fn submit_exam(&mut self, force: bool) {
        let Some(exam_state) = &mut self.exam else { return };
        if exam_state.submitting || exam_state.result.is_some() {
            return;
        }

        if !force {
            let unanswered = exam::unanswered_count(&exam_state.assessment.questions, &exam_state.answers);
            if unanswered > 0 {
                self.error_message = Some(format!("{unanswered} question(s) still unanswered"));
                return;
            }
        }

        exam_state.submitting = true;
        let payload = SubmitAnswers {
            assessment_id: exam_state.assessment.id,
            answers: exam::collect_answers(&exam_state.assessment.questions, &exam_state.answers, force),
        };

        if force {
            self.log_warning("Exam time expired, submitting automatically");
        }

        let api = self.api.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match api::assessment::submit(&api, &payload).await {
                Ok(submission) => {
                    let _ = tx.send(UiMessage::ExamSubmitted(submission));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Fetch the caller's submission for one assessment.
    pub fn load_my_submission(&mut self, assessment_id: i64) {
        let Some(session) = &self.session else { return };
        let api = self.api.clone();
        let tx = self.tx.clone();
        let username = session.username.clone();

        self.rt.spawn(async move {
            match api::assessment::my_submission(&api, &username, assessment_id).await {
                Ok(submission) => {
                    let _ = tx.send(UiMessage::MySubmissionLoaded(submission));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    /// Open the grading workspace for one assessment.
    pub fn open_grading(&mut self, assessment: Assessment) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        let id = assessment.id;
        self.grading = Some(GradingState {
            assessment,
            submissions: Vec::new(),
            selected: None,
            score_inputs: HashMap::new(),
        });
        self.current_panel = Panel::Grading;
        self.is_loading = true;

        self.rt.spawn(async move {
            match api::assessment::submissions(&api, id).await {
                Ok(rows) => {
                    let _ = tx.send(UiMessage::SubmissionsLoaded(rows));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    /// Post one essay grade.
    pub fn grade_essay(&mut self, grade: EssayGrade) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        let submission_id = grade.submission_id;
        let question_id = grade.question_id;

        self.rt.spawn(async move {
            match api::assessment::grade_essay(&api, &grade).await {
                Ok(()) => {
                    let _ = tx.send(UiMessage::EssayGraded(submission_id, question_id));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Load training materials.
    pub fn load_materials(&mut self) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.is_loading = true;

        self.rt.spawn(async move {
            match api::training::list(&api).await {
                Ok(rows) => {
                    let _ = tx.send(UiMessage::MaterialsLoaded(rows));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    /// Load peer review assignments.
    pub fn load_peer_reviews(&mut self) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.is_loading = true;

        self.rt.spawn(async move {
            match api::peer_review::list_all(&api).await {
                Ok(rows) => {
                    let _ = tx.send(UiMessage::PeerReviewsLoaded(rows));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.to_string()));
                }
            }
        });
    }

    /// Assign a peer review.
    pub fn assign_peer_review(&mut self, data: AssignPeerReview) {
        let api = self.api.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match api::peer_review::assign(&api, &data).await {
                Ok(()) => {
                    let _ = tx.send(UiMessage::PeerReviewAssigned);
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Fire one notification poll.
    fn spawn_poll(&mut self) {
        if self.session.is_none() || self.poll_inflight {
            return;
        }
        self.poll_inflight = true;

        let api = self.api.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match api::notification::list(&api).await {
                Ok(rows) => {
                    let _ = tx.send(UiMessage::NotificationsPolled(rows));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::NotificationPollFailed(e.to_string()));
                }
            }
        });
    }

    /// Mark one notification read.
    pub fn mark_notification_read(&mut self, id: i64) {
        let api = self.api.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match api::notification::mark_read(&api, id).await {
                Ok(()) => {
                    let _ = tx.send(UiMessage::NotificationMarked(id));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Mark every notification read.
    pub fn mark_all_notifications_read(&mut self) {
        let api = self.api.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match api::notification::mark_all_read(&api).await {
                Ok(()) => {
                    let _ = tx.send(UiMessage::AllNotificationsMarked);
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(e.to_string()));
                }
            }
        });
    }

    /// Export the accounts table to Excel.
    pub fn export_accounts(&mut self) {
        let default_name = crate::export::generate_export_filename("accounts");
        let Some(path) = crate::export::show_save_dialog(&default_name) else {
            return;
        };

        match crate::export::export_accounts_to_excel(&self.accounts, &path) {
            Ok(()) => {
                self.success_message = Some(format!("Exported to: {}", path.display()));
                self.log_success(format!("Exported accounts: {}", path.display()));
            }
            Err(e) => {
                self.error_message = Some(format!("Export failed: {e}"));
                self.log_error(format!("Export failed: {e}"));
            }
        }
    }

    /// Export the leave request table to Excel.
    pub fn export_leave(&mut self) {
        let default_name = crate::export::generate_export_filename("leave_requests");
        let Some(path) = crate::export::show_save_dialog(&default_name) else {
            return;
        };

        match crate::export::export_leave_to_excel(&self.leave_requests, &path) {
            Ok(()) => {
                self.success_message = Some(format!("Exported to: {}", path.display()));
                self.log_success(format!("Exported leave requests: {}", path.display()));
            }
            Err(e) => {
                self.error_message = Some(format!("Export failed: {e}"));
                self.log_error(format!("Export failed: {e}"));
            }
        }
    }

    /// Queue an action behind the confirmation dialog.
    pub fn request_confirm(&mut self, action: ConfirmAction) {
        self.confirm_action = Some(action);
        self.show_confirm = true;
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::LoggedIn(session) => {
                    self.logging_in = false;
                    self.api.set_token(&session.token);
                    self.log_success(format!("Logged in as {} ({})", session.username, session.role));
                    if self.config.ui.remember_username {
                        self.config.ui.cached_username = session.username.clone();
                        let path = AppConfig::default_path();
                        if let Err(e) = self.config.save(&path) {
                            tracing::warn!("Failed to save config: {e}");
                        }
                    }
                    self.session = Some(session);
                    self.login_password.clear();
                    self.last_poll = Instant::now();
                    self.spawn_poll();
                    self.load_assessments();
                    self.load_leave();
                    self.load_overtime();
                }
                UiMessage::LoginFailed(e) => {
                    self.logging_in = false;
                    self.login_error = Some(e);
                }
                UiMessage::AccountsLoaded(rows) => {
                    self.accounts = rows;
                    self.is_loading = false;
                }
                UiMessage::AccountDetailLoaded(account) => {
                    self.account_form = AccountForm::edit(&account);
                }
                UiMessage::LeaveLoaded(rows) => {
                    self.leave_requests = rows;
                    self.is_loading = false;
                }
                UiMessage::OvertimeLoaded(rows) => {
                    self.overtime_logs = rows;
                    self.is_loading = false;
                }
                UiMessage::AssessmentsLoaded(rows) => {
                    self.assessments = rows;
                    self.is_loading = false;
                }
                UiMessage::ExamLoaded(assessment) => {
                    self.is_loading = false;
                    self.log_info(format!("Starting assessment '{}'", assessment.template));
                    self.exam = Some(ExamState::new(assessment));
                    self.current_panel = Panel::Exam;
                }
                UiMessage::MySubmissionLoaded(submission) => {
                    self.my_submissions.insert(submission.assessment_id, submission);
                }
                UiMessage::SubmissionsLoaded(rows) => {
                    self.is_loading = false;
                    if let Some(grading) = &mut self.grading {
                        grading.submissions = rows;
                    }
                }
                UiMessage::MaterialsLoaded(rows) => {
                    self.materials = rows;
                    self.is_loading = false;
                }
                UiMessage::PeerReviewsLoaded(rows) => {
                    self.peer_reviews = rows;
                    self.is_loading = false;
                }
                UiMessage::LoadError(e) => {
                    self.error_message = Some(e.clone());
                    self.log_error(e);
                    self.is_loading = false;
                }
                UiMessage::NotificationsPolled(rows) => {
                    self.poll_inflight = false;
                    self.last_poll = Instant::now();
                    self.poll.on_success(self.last_activity.elapsed());
                    self.notifications = rows;
                }
                UiMessage::NotificationPollFailed(e) => {
                    self.poll_inflight = false;
                    self.last_poll = Instant::now();
                    self.poll.on_failure();
                    tracing::warn!("Notification poll failed: {e}");
                }
                UiMessage::NotificationMarked(id) => {
                    if let Some(n) = self.notifications.iter_mut().find(|n| n.id == id) {
                        n.read = true;
                    }
                }
                UiMessage::AllNotificationsMarked => {
                    for n in &mut self.notifications {
                        n.read = true;
                    }
                }
                UiMessage::AccountSaved(username) => {
                    self.success_message = Some(format!("Account '{username}' saved"));
                    self.account_form.reset();
                    self.load_accounts();
                }
                UiMessage::AccountDeleted(username) => {
                    self.accounts.retain(|a| a.username != username);
                    self.success_message = Some("Account deleted".to_string());
                    self.log_success(format!("Deleted account '{username}'"));
                }
                UiMessage::LeaveSaved => {
                    self.success_message = Some("Leave request submitted".to_string());
                    self.leave_form.reset();
                    self.load_leave();
                }
                UiMessage::LeaveActioned(action) => {
                    self.success_message = Some(format!("Leave request {action}"));
                    self.log_success(format!("Leave request {action}"));
                    self.load_leave();
                }
                UiMessage::OvertimeSaved => {
                    self.success_message = Some("Overtime log submitted".to_string());
                    self.overtime_form.reset();
                    self.load_overtime();
                }
                UiMessage::OvertimeActioned(action) => {
                    self.success_message = Some(format!("Overtime log {action}"));
                    self.log_success(format!("Overtime log {action}"));
                    self.load_overtime();
                }
                UiMessage::ExamSubmitted(submission) => {
                    if let Some(exam_state) = &mut self.exam {
                        exam_state.submitting = false;
                        exam_state.result = Some(submission.clone());
                    }
                    self.my_submissions.insert(submission.assessment_id, submission);
                    self.log_success("Assessment submitted");
                }
                UiMessage::EssayGraded(submission_id, question_id) => {
                    self.success_message = Some("Essay grade saved".to_string());
                    if let Some(grading) = &mut self.grading {
                        grading.score_inputs.remove(&(submission_id, question_id));
                        // Refresh the submission list to pick up new totals
                        let api = self.api.clone();
                        let tx = self.tx.clone();
                        let id = grading.assessment.id;
                        self.rt.spawn(async move {
                            if let Ok(rows) = api::assessment::submissions(&api, id).await {
                                let _ = tx.send(UiMessage::SubmissionsLoaded(rows));
                            }
                        });
                    }
                }
                UiMessage::PeerReviewAssigned => {
                    self.success_message = Some("Peer review assigned".to_string());
                    self.peer_review_form.reset();
                    self.load_peer_reviews();
                }
                UiMessage::OperationFailed(e) => {
                    if let Some(exam_state) = &mut self.exam {
                        exam_state.submitting = false;
                    }
                    self.error_message = Some(e.clone());
                    self.log_error(e);
                }
            }
        }
    }

    /// Advance the notification poll and exam countdown clocks.
    fn drive_timers(&mut self, ctx: &egui::Context) {
        if self.session.is_none() {
            return;
        }

        // Activity detection feeds the poll schedule
        let active = ctx.input(|i| {
            i.pointer.any_down()
                || i.pointer.is_moving()
                || i.raw_scroll_delta != egui::Vec2::ZERO
                || !i.keys_down.is_empty()
        });
        if active {
            self.last_activity = Instant::now();
            self.poll.on_activity();
        }

        if !self.poll_inflight && self.last_poll.elapsed() >= self.poll.interval() {
            self.spawn_poll();
        }

        // Exam countdown, one tick per elapsed second
        let mut force_submit = false;
        if let Some(exam_state) = &mut self.exam {
            if exam_state.result.is_none() && !exam_state.submitting {
                while exam_state.last_tick.elapsed() >= Duration::from_secs(1) {
                    exam_state.last_tick += Duration::from_secs(1);
                    if exam_state.timer.tick() {
                        force_submit = true;
                        break;
                    }
                }
            }
        }
        if force_submit {
            self.submit_exam(true);
        }

        // Keep the clocks ticking while logged in
        ctx.request_repaint_after(Duration::from_secs(1));
    }

    /// Execute the confirmed action.
    fn run_confirmed(&mut self) {
        if let Some(action) = self.confirm_action.take() {
            match action {
                ConfirmAction::DeleteAccount(username, name) => {
                    self.log_info(format!("Deleting account: {name}"));
                    self.delete_account(username);
                }
                ConfirmAction::ApproveLeave(id) => self.leave_action(id, "approved"),
                ConfirmAction::RejectLeave(id) => self.leave_action(id, "rejected"),
                ConfirmAction::CancelLeave(id) => self.leave_action(id, "canceled"),
                ConfirmAction::ApproveOvertime(id) => self.overtime_action(id, "approved"),
                ConfirmAction::RejectOvertime(id) => self.overtime_action(id, "rejected"),
                ConfirmAction::CancelOvertime(id) => self.overtime_action(id, "cancelled"),
            }
        }
    }

    /// Render menu bar.
    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("Tools", |ui| {
                    if ui.button("Server Settings").clicked() {
                        self.server_dialog_open = true;
                        self.server_url_input = self.config.api.base_url.clone();
                        ui.close();
                    }
                });
                ui.menu_button("Session", |ui| {
                    let logged_in = self.session.is_some();
                    if ui.add_enabled(logged_in, egui::Button::new("Log Out")).clicked() {
                        self.logout();
                        ui.close();
                    }
                });
            });
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.disable();
                ui.horizontal(|ui| {
                    ui.colored_label(colors::NEUTRAL, format!("Server: {}", self.config.api.base_url));

                    if let Some(session) = &self.session {
                        ui.separator();
                        ui.colored_label(colors::INFO, format!("{} ({})", session.username, session.role));
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.session.is_some() {
                            if self.poll.is_backing_off() {
                                ui.colored_label(colors::WARNING, "Notifications: retrying");
                            } else {
                                ui.colored_label(
                                    colors::NEUTRAL,
                                    format!("Notifications: every {}s", self.poll.interval().as_secs()),
                                );
                            }
                        }
                    });
                });
            });
    }

    /// Render the server settings dialog.
    fn show_server_dialog(&mut self, ctx: &egui::Context) {
        if !self.server_dialog_open {
            return;
        }

        let mut open = true;
        egui::Window::new("Server Settings")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.add_space(10.0);

                egui::Grid::new("server_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("API base URL:");
                        ui.text_edit_singleline(&mut self.server_url_input);
                        ui.end_row();
                    });

                ui.add_space(15.0);
                ui.separator();
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.server_dialog_open = false;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Save").clicked() {
                            self.config.api.base_url = self.server_url_input.trim_end_matches('/').to_string();
                            let path = AppConfig::default_path();
                            if let Err(e) = self.config.save(&path) {
                                tracing::error!("Failed to save config: {e}");
                            }
                            // Token survives; only the origin changes
                            let mut api = ApiClient::new(&self.config.api);
                            if let Some(session) = &self.session {
                                api.set_token(&session.token);
                            }
                            self.api = api;
                            self.server_dialog_open = false;
                        }
                    });
                });
            });

        if !open {
            self.server_dialog_open = false;
        }
    }

    /// Render modal dialogs (error, success, confirmation).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        // Error dialog
        if let Some(ref error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        // Success dialog
        if let Some(ref msg) = self.success_message.clone() {
            egui::Window::new("Success")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.success_message = None;
                    }
                });
        }

        // Confirmation dialog
        if self.show_confirm
            && let Some(ref action) = self.confirm_action.clone()
        {
            let (title, message) = action.describe();

            egui::Window::new(title)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            self.show_confirm = false;
                            self.confirm_action = None;
                        }
                        if ui.button("Confirm").clicked() {
                            self.run_confirmed();
                            self.show_confirm = false;
                            self.confirm_action = None;
                        }
                    });
                });
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();

        // Notification poll and exam countdown
        self.drive_timers(ctx);

        // Request repaint during async operations
        if self.is_loading || self.logging_in {
            ctx.request_repaint();
        }

        // Menu bar
        self.show_menu_bar(ctx);

        // Status bar
        self.show_status_bar(ctx);

        // Server settings dialog
        self.show_server_dialog(ctx);

        // Modal dialogs (error, success, confirmation)
        self.show_dialogs(ctx);

        // Login gate
        if self.session.is_none() {
            egui::CentralPanel::default().show(ctx, |ui| {
                login::show(self, ui);
            });
            return;
        }

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| match self.current_panel {
            Panel::Dashboard => {
                if let Some(next) = dashboard::show(self, ui) {
                    self.navigate(next);
                }
            }
            Panel::Accounts => {
                if accounts_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
            Panel::Leave => {
                if leave_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
            Panel::Overtime => {
                if overtime_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
            Panel::Assessments => {
                if assessments_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
            Panel::Exam => {
                if exam_panel::show(self, ui) {
                    self.exam = None;
                    self.current_panel = Panel::Assessments;
                }
            }
            Panel::Grading => {
                if grading_panel::show(self, ui) {
                    self.grading = None;
                    self.current_panel = Panel::Assessments;
                }
            }
            Panel::PeerReview => {
                if peer_review_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
            Panel::Training => {
                if training_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
            Panel::Notifications => {
                if notifications_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
        });
    }
}

impl App {
    /// Navigate to a panel, loading its data on entry.
    pub fn navigate(&mut self, panel: Panel) {
        match panel {
            Panel::Accounts => self.load_accounts(),
            Panel::Leave => self.load_leave(),
            Panel::Overtime => self.load_overtime(),
            Panel::Assessments => self.load_assessments(),
            Panel::PeerReview => {
                self.load_peer_reviews();
                self.load_accounts();
            }
            Panel::Training => self.load_materials(),
            _ => {}
        }
        self.current_panel = panel;
    }
}
