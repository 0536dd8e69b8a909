//! View controllers for intake, dashboard and report detail.
//!
//! Each controller reads the current user from the injected `SessionCell`,
//! calls `CareerService`, and decides what the view does next. Rendering
//! itself is out of scope; controllers only return a `ViewOutcome`.

use std::fmt;

use tracing::error;
use uuid::Uuid;

use crate::errors::{AppError, REPORT_NOT_FOUND_MESSAGE};
use crate::models::profile::ProfileForm;
use crate::models::report::{CareerReport, ReportSummary};
use crate::service::CareerService;
use crate::session::SessionCell;

pub const GENERATE_FAILED_NOTICE: &str = "Failed to generate analysis. Please try again.";
pub const LOAD_REPORTS_FAILED_NOTICE: &str = "Failed to load reports";
pub const LOAD_REPORT_FAILED_NOTICE: &str = "Failed to load report";

/// Client-side routes the views navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Dashboard,
    Result(Uuid),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::Login => f.write_str("/login"),
            Route::Dashboard => f.write_str("/dashboard"),
            Route::Result(id) => write!(f, "/result/{id}"),
        }
    }
}

/// What a view does after an action completes.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutcome<T> {
    /// Stay and show this data.
    Render(T),
    /// Stay and show a message.
    Alert(String),
    /// Navigate away, optionally with a message.
    Redirect { to: Route, notice: Option<String> },
}

impl<T> ViewOutcome<T> {
    fn redirect(to: Route) -> Self {
        ViewOutcome::Redirect { to, notice: None }
    }
}

/// Intake form submit. Success navigates to the new report.
pub async fn submit_intake(
    session: &SessionCell,
    service: &CareerService,
    form: ProfileForm,
) -> ViewOutcome<()> {
    let Some(user) = session.current() else {
        return ViewOutcome::redirect(Route::Login);
    };

    let profile = match form.validate() {
        Ok(profile) => profile,
        Err(e) => return ViewOutcome::Alert(e.to_string()),
    };

    match service.generate_report(&user, profile).await {
        Ok(report) => ViewOutcome::redirect(Route::Result(report.id)),
        Err(e) => {
            error!("Intake submit failed: {e}");
            ViewOutcome::Alert(GENERATE_FAILED_NOTICE.to_string())
        }
    }
}

/// Dashboard load. An empty list is a normal render, not an error.
pub async fn load_dashboard(
    session: &SessionCell,
    service: &CareerService,
) -> ViewOutcome<Vec<ReportSummary>> {
    let Some(user) = session.current() else {
        return ViewOutcome::redirect(Route::Login);
    };

    match service.list_reports(&user).await {
        Ok(reports) => ViewOutcome::Render(reports.iter().map(ReportSummary::from).collect()),
        Err(e) => {
            error!("Dashboard load failed: {e}");
            ViewOutcome::Alert(LOAD_REPORTS_FAILED_NOTICE.to_string())
        }
    }
}

/// Report detail load. Missing and foreign reports redirect home identically.
pub async fn load_result(
    session: &SessionCell,
    service: &CareerService,
    id: Uuid,
) -> ViewOutcome<CareerReport> {
    let Some(user) = session.current() else {
        return ViewOutcome::redirect(Route::Login);
    };

    match service.get_report(&user, id).await {
        Ok(report) => ViewOutcome::Render(report),
        Err(AppError::NotFound(_)) => ViewOutcome::Redirect {
            to: Route::Home,
            notice: Some(REPORT_NOT_FOUND_MESSAGE.to_string()),
        },
        Err(e) => {
            error!("Report load failed: {e}");
            ViewOutcome::Redirect {
                to: Route::Home,
                notice: Some(LOAD_REPORT_FAILED_NOTICE.to_string()),
            }
        }
    }
}
