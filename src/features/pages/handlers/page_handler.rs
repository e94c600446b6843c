use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::{Local, Utc};
use minijinja::context;

use crate::core::error::Result;
use crate::core::extractor::{AppForm, AppFormRejection};
use crate::features::auth::dto::LoginFormDto;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::AuthService;
use crate::features::reports::ReportService;
use crate::features::weather::WeatherService;
use crate::shared::constants::{ANONYMOUS_USER_ID, ANONYMOUS_USER_NAME, CLOCK_FORMAT};
use crate::shared::templates::TemplateEngine;

/// Login form, or why the body could not be read as one
type LoginForm = std::result::Result<AppForm<LoginFormDto>, AppFormRejection>;

/// State for page handlers
#[derive(Clone)]
pub struct PageState {
    pub report_service: Arc<ReportService>,
    pub auth_service: Arc<AuthService>,
    pub weather_service: Arc<WeatherService>,
    pub templates: Arc<TemplateEngine>,
}

/// Landing page with the login and complaint forms
pub async fn home(State(state): State<PageState>) -> Result<Html<String>> {
    let html = state.templates.render("home.html", context! {})?;
    Ok(Html(html))
}

/// Recent reports for visitors who did not log in
pub async fn anonymous(State(state): State<PageState>) -> Result<Html<String>> {
    let viewer = AuthenticatedUser {
        user_id: ANONYMOUS_USER_ID,
        user_name: ANONYMOUS_USER_NAME.to_string(),
    };

    render_user_page(&state, &viewer).await
}

/// User page.
///
/// `/user/0` is the login target: the form credentials decide who the viewer
/// is. Any other id shows that user's page. Unknown users and failed logins
/// are sent back to the landing page.
pub async fn user(
    State(state): State<PageState>,
    Path(user_id): Path<i32>,
    form: LoginForm,
) -> Result<Response> {
    let form = login_form(form);
    let viewer = if user_id == ANONYMOUS_USER_ID {
        state.auth_service.authenticate(&form).await?
    } else {
        state.auth_service.find_by_id(user_id).await?
    };

    let Some(viewer) = viewer else {
        tracing::debug!("No identity for /user/{}, redirecting home", user_id);
        return Ok(Redirect::to("/").into_response());
    };

    Ok(render_user_page(&state, &viewer).await?.into_response())
}

/// Every report, for logged-in staff
pub async fn admin(
    State(state): State<PageState>,
    form: LoginForm,
) -> Result<Response> {
    let form = login_form(form);
    let Some(viewer) = state.auth_service.authenticate(&form).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    let now = Utc::now();
    let reports = state.report_service.all_reports(now).await?;
    let weather = state.weather_service.current().await;

    let html = state.templates.render(
        "admin.html",
        context! {
            reports => reports,
            weather => weather,
            current_time => Local::now().format(CLOCK_FORMAT).to_string(),
            user_id => viewer.user_id,
            user_name => viewer.user_name,
        },
    )?;

    Ok(Html(html).into_response())
}

/// A body that is not a urlencoded form carries no credentials
fn login_form(form: LoginForm) -> LoginFormDto {
    match form {
        Ok(AppForm(form)) => form,
        Err(rejection) => {
            tracing::debug!("Login form unreadable: {}", rejection.body_text());
            LoginFormDto::default()
        }
    }
}

async fn render_user_page(state: &PageState, viewer: &AuthenticatedUser) -> Result<Html<String>> {
    let now = Utc::now();
    let reports = state.report_service.recent_reports(now).await?;

    let user_reports = if viewer.user_id == ANONYMOUS_USER_ID {
        None
    } else {
        Some(state.report_service.user_reports(viewer.user_id, now).await?)
    };

    let weather = state.weather_service.current().await;

    let html = state.templates.render(
        "user.html",
        context! {
            reports => reports,
            user_reports => user_reports,
            weather => weather,
            current_time => Local::now().format(CLOCK_FORMAT).to_string(),
            user_id => viewer.user_id,
            user_name => &viewer.user_name,
        },
    )?;

    Ok(Html(html))
}
