//! Password gate: login and logout pages, the `verify` cookie and the
//! middleware that protects every other page.

use askama::Template;
use axum::Json;
use axum::Router;
use axum::extract::{Form, Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use serde::Deserialize;

use wvadmin_app::ports::{ArchiveStatistics, ConfigStore, HostSystem};
use wvadmin_domain::auth::{COOKIE_NAME, INCORRECT_PASSWORD, PasswordDigest, SessionPolicy};

use crate::error::DashboardError;
use crate::state::AppState;

/// Value of the `verify` cookie in a request, if any.
#[must_use]
pub fn cookie_value(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value)
}

/// `Set-Cookie` value carrying `digest`, expiring after the inactivity timeout.
#[must_use]
pub fn session_cookie(digest: &PasswordDigest, policy: SessionPolicy) -> String {
    let mut cookie = format!("{COOKIE_NAME}={digest}; Path=/; HttpOnly; SameSite=Lax");
    if let Some(max_age) = policy.max_age() {
        cookie.push_str(&format!("; Max-Age={}", max_age.as_secs()));
    }
    cookie
}

/// `Set-Cookie` value that removes the session.
#[must_use]
pub fn cleared_cookie() -> String {
    format!("{COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    error: &'static str,
}

impl IntoResponse for LoginTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Form posted by the login page.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub access_password: String,
}

/// Build the routes reachable without a session.
pub fn routes<S, H, A>() -> Router<AppState<S, H, A>>
where
    S: ConfigStore + Send + Sync + 'static,
    H: HostSystem + Send + Sync + 'static,
    A: ArchiveStatistics + Send + Sync + 'static,
{
    Router::new()
        .route("/login", get(login_page).post(login::<S, H, A>))
        .route("/logout", get(logout::<S, H, A>))
}

/// `GET /login`
pub async fn login_page() -> LoginTemplate {
    LoginTemplate { error: "" }
}

/// `POST /login`: set the cookie and go to the system page, or show the
/// form again.
pub async fn login<S, H, A>(
    State(state): State<AppState<S, H, A>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, DashboardError>
where
    S: ConfigStore + Send + Sync + 'static,
    H: HostSystem + Send + Sync + 'static,
    A: ArchiveStatistics + Send + Sync + 'static,
{
    let response = match state.auth_service.verify(&form.access_password).await? {
        Some(digest) => {
            let cookie = session_cookie(&digest, state.auth_service.policy());
            ([(SET_COOKIE, cookie)], Redirect::to("/system")).into_response()
        }
        None => LoginTemplate {
            error: INCORRECT_PASSWORD,
        }
        .into_response(),
    };
    Ok(response)
}

/// `GET /logout`
pub async fn logout<S, H, A>(State(state): State<AppState<S, H, A>>) -> impl IntoResponse {
    tracing::info!("logged out");
    (
        [(SET_COOKIE, cleared_cookie())],
        Redirect::to(&state.logout_url),
    )
}

async fn authorised<S, H, A>(
    state: &AppState<S, H, A>,
    cookie: Option<&str>,
) -> Result<Option<PasswordDigest>, DashboardError>
where
    S: ConfigStore + Send + Sync + 'static,
{
    match cookie {
        Some(cookie) => Ok(state.auth_service.authorise(cookie).await?),
        None => Ok(None),
    }
}

#[derive(serde::Serialize)]
struct Unauthorised {
    error: &'static str,
}

/// Middleware guarding the console.
///
/// Without a valid cookie, pages redirect to `/login` and API calls get
/// `401`. With activity checking on, the cookie is renewed on every
/// authorised response unless the handler already set one.
pub async fn require_login<S, H, A>(
    State(state): State<AppState<S, H, A>>,
    request: Request,
    next: Next,
) -> Response
where
    S: ConfigStore + Send + Sync + 'static,
    H: HostSystem + Send + Sync + 'static,
    A: ArchiveStatistics + Send + Sync + 'static,
{
    let cookie = cookie_value(request.headers()).map(ToOwned::to_owned);
    let digest = match authorised(&state, cookie.as_deref()).await {
        Ok(Some(digest)) => digest,
        Ok(None) if request.uri().path().starts_with("/api/") => {
            let body = Unauthorised {
                error: "authentication required",
            };
            return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
        }
        Ok(None) => return Redirect::to("/login").into_response(),
        Err(err) => return err.into_response(),
    };

    let mut response = next.run(request).await;

    let policy = state.auth_service.policy();
    if policy.check_activity
        && policy.max_age().is_some()
        && !response.headers().contains_key(SET_COOKIE)
        && let Ok(value) = HeaderValue::try_from(session_cookie(&digest, policy))
    {
        response.headers_mut().append(SET_COOKIE, value);
    }
    response
}
