//! Axum router assembly.

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use wvadmin_app::ports::{ArchiveStatistics, ConfigStore, HostSystem};

use crate::session;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// The console pages and the `/api` routes sit behind the password gate;
/// `/health`, `/login` and `/logout` do not. Includes a [`TraceLayer`] that
/// logs each HTTP request/response using the `tracing` ecosystem.
pub fn build<S, H, A>(state: AppState<S, H, A>) -> Router
where
    S: ConfigStore + Send + Sync + 'static,
    H: HostSystem + Send + Sync + 'static,
    A: ArchiveStatistics + Send + Sync + 'static,
{
    let protected = Router::new()
        .merge(crate::dashboard::routes())
        .nest("/api", crate::api::routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session::require_login::<S, H, A>,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(session::routes())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::HttpOptions;
    use axum::body::Body;
    use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use http_body_util::BodyExt;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;
    use wvadmin_app::ports::ArchiveSummary;
    use wvadmin_domain::config::{ConfigItem, ConfigKey};
    use wvadmin_domain::daemon::DaemonState;
    use wvadmin_domain::error::AdminError;
    use wvadmin_domain::network::NetworkSettings;

    const SESSION: &str = "verify=9798e81db4d6cc93577169c395b90f66";

    #[derive(Clone, Default)]
    struct MemoryStore(Arc<Mutex<BTreeMap<String, ConfigItem>>>);

    impl ConfigStore for MemoryStore {
        async fn get(&self, key: &ConfigKey) -> Result<Option<ConfigItem>, AdminError> {
            Ok(self.0.lock().unwrap().get(key.as_str()).cloned())
        }
        async fn get_all(&self) -> Result<Vec<ConfigItem>, AdminError> {
            Ok(self.0.lock().unwrap().values().cloned().collect())
        }
        async fn set(&self, key: &ConfigKey, value: &str) -> Result<(), AdminError> {
            self.0
                .lock()
                .unwrap()
                .insert(key.to_string(), ConfigItem::new(key.clone(), value));
            Ok(())
        }
        async fn create(&self, item: ConfigItem) -> Result<(), AdminError> {
            self.0
                .lock()
                .unwrap()
                .entry(item.key.to_string())
                .or_insert(item);
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct StubHost {
        fail_network: bool,
    }

    impl HostSystem for StubHost {
        async fn write_daemon_binary(&self, _binary: &str) -> Result<(), AdminError> {
            Ok(())
        }
        async fn daemon_version(&self) -> Result<Option<String>, AdminError> {
            Ok(Some("5.21.7".to_string()))
        }
        async fn daemon_state(&self) -> Result<DaemonState, AdminError> {
            Ok(DaemonState::default())
        }
        async fn start_daemon(&self) -> Result<(), AdminError> {
            Ok(())
        }
        async fn stop_daemon(&self) -> Result<(), AdminError> {
            Ok(())
        }
        async fn read_network(&self) -> Result<NetworkSettings, AdminError> {
            Ok(NetworkSettings::Dhcp)
        }
        async fn write_network(&self, _settings: &NetworkSettings) -> Result<(), AdminError> {
            if self.fail_network {
                Err(AdminError::Host("interfaces: permission denied".into()))
            } else {
                Ok(())
            }
        }
        async fn restart_networking(&self) -> Result<(), AdminError> {
            Ok(())
        }
        async fn path_exists(&self, _path: &str) -> Result<bool, AdminError> {
            Ok(true)
        }
    }

    #[derive(Clone, Default)]
    struct StubArchive;

    impl ArchiveStatistics for StubArchive {
        async fn summary(&self) -> Result<ArchiveSummary, AdminError> {
            Ok(ArchiveSummary::default())
        }
    }

    fn app_with(store: MemoryStore, host: StubHost) -> Router {
        build(AppState::new(
            store,
            host,
            StubArchive,
            HttpOptions {
                report_base_url: "http://station.local/weather/".to_string(),
                ..HttpOptions::default()
            },
        ))
    }

    fn app() -> Router {
        app_with(MemoryStore::default(), StubHost::default())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(COOKIE, SESSION)
            .body(Body::empty())
            .unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(COOKIE, SESSION)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn location(response: &Response) -> &str {
        response.headers()[LOCATION].to_str().unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_redirect_to_login_without_cookie() {
        let response = app()
            .oneshot(Request::get("/system").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn should_reject_api_call_without_cookie() {
        let response = app()
            .oneshot(Request::get("/api/config").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_set_cookie_on_correct_password() {
        let request = Request::post("/login")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("access_password=wview"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/system");
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with(SESSION));
    }

    #[tokio::test]
    async fn should_show_error_on_wrong_password() {
        let request = Request::post("/login")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("access_password=guess"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.headers().contains_key(SET_COOKIE));
        assert!(body_text(response).await.contains("Incorrect password."));
    }

    #[tokio::test]
    async fn should_renew_cookie_on_authorised_page() {
        let response = app().oneshot(get("/system")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        assert!(cookie.contains("Max-Age=1800"));
        let body = body_text(response).await;
        assert!(body.contains("5.21.7"));
        assert!(body.contains("Start wview"));
    }

    #[tokio::test]
    async fn should_clear_cookie_on_logout() {
        let response = app().oneshot(get("/logout")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn should_return_404_for_unknown_settings_page() {
        let response = app().oneshot(get("/settings/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_save_settings_and_redirect_back() {
        let store = MemoryStore::default();
        let app = app_with(store.clone(), StubHost::default());

        let response = app
            .clone()
            .oneshot(post_form(
                "/settings/ftp",
                "field_FTP_Hostname=ftp.example.org&field_FTP_Username=wx",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/settings/ftp");
        let page = body_text(app.oneshot(get("/settings/ftp")).await.unwrap()).await;
        assert!(page.contains("value=\"ftp.example.org\""));
    }

    #[tokio::test]
    async fn should_render_hidden_station_rows() {
        let response = app().oneshot(get("/settings/station")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("display:none"));
    }

    #[tokio::test]
    async fn should_redirect_to_report_url() {
        let response = app()
            .oneshot(get("/archive/go?kind=day&year=2024&month=03&day=07"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            "http://station.local/weather/Archive/ARC-2024-03-07.txt"
        );
    }

    #[tokio::test]
    async fn should_reject_impossible_archive_date() {
        let response = app()
            .oneshot(get("/archive/go?kind=day&year=2023&month=02&day=30"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_reject_negative_archive_year() {
        let response = app()
            .oneshot(get("/archive/go?kind=year&year=-5"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_flag_password_mismatch() {
        let response = app()
            .oneshot(post_form(
                "/system/password",
                "field_Admin_Password1=one&field_Admin_Password2=two",
            ))
            .await
            .unwrap();

        assert_eq!(location(&response), "/system?mismatch=1");
    }

    #[tokio::test]
    async fn should_reissue_cookie_after_password_change() {
        let response = app()
            .oneshot(post_form(
                "/system/password",
                "field_Admin_Password1=n3w&field_Admin_Password2=n3w",
            ))
            .await
            .unwrap();

        assert_eq!(location(&response), "/system");
        let cookies: Vec<&str> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|value| value.to_str().unwrap())
            .collect();
        assert_eq!(cookies.len(), 1);
        assert!(!cookies[0].starts_with(SESSION));
    }

    #[tokio::test]
    async fn should_show_network_failure_with_delayed_redirect() {
        let app = app_with(MemoryStore::default(), StubHost { fail_network: true });

        let response = app
            .oneshot(post_form("/system/network", "field_network_dhcp%5B%5D=yes"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("content=\"2;url=/system\""));
        assert!(body.contains("permission denied"));
    }

    #[tokio::test]
    async fn should_return_400_for_network_field_with_line_break() {
        let response = app()
            .oneshot(post_form(
                "/system/network",
                "field_network_ip_adrs=10.0.0.5%0Aup+%2Fbin%2Fsh&field_network_mask=255.255.255.0",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("address must be an IPv4 address"));
    }

    #[tokio::test]
    async fn should_get_and_put_config_over_api() {
        let app = app();
        let request = Request::put("/api/config/STATION_TYPE")
            .header(COOKIE, SESSION)
            .header("content-type", "application/json")
            .body(Body::from(r#"{"value":"TWI"}"#))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get("/api/config/STATION_TYPE")).await.unwrap();
        let item: serde_json::Value =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(item["value"], "TWI");
    }

    #[tokio::test]
    async fn should_return_404_for_unknown_config_key() {
        let response = app().oneshot(get("/api/config/NOPE")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
