//! # HTTP Client Module
//!
//! `reqwest` implementation of [`ScheduleSource`] against the school REST
//! backend. Base URL, bearer token and timeout come from `AppConfig`; every
//! request is traced. Punch writes go up as multipart forms with the photo
//! attached, and a structured `{ is_late, is_early }` rejection body is
//! surfaced as [`PunchOutcome::ReasonRequired`] rather than an error.

use std::time::Duration;

use chrono::{Local, NaiveDate};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use common::config;
use domain::{AttendanceReport, DaySchedule};

use crate::error::{ClientError, ClientResult};
use crate::source::{
    PunchDirection, PunchOutcome, PunchReason, PunchRequest, ReportFilter, ReportQuery,
    ScheduleSource,
};

use async_trait::async_trait;

/// File name the backend expects on photo parts.
const PHOTO_FILE_NAME: &str = "photo.jpg";

/// HTTP-backed schedule source.
pub struct HttpScheduleSource {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpScheduleSource {
    /// Builds a source against `base_url` with an explicit token and timeout.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Builds a source from the global `AppConfig`.
    pub fn from_config() -> ClientResult<Self> {
        Self::new(
            config::api_base_url(),
            config::api_token(),
            Duration::from_secs(config::http_timeout_seconds()),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        if self.token.is_empty() {
            request
        } else {
            request.bearer_auth(&self.token)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.endpoint(path);
        debug!("GET {}", url);
        let response = self.authorize(self.http.get(&url)).send().await?;
        decode_body(response).await
    }
}

#[async_trait]
impl ScheduleSource for HttpScheduleSource {
    async fn today(&self) -> ClientResult<DaySchedule> {
        self.get_json("teachers/today-classes").await
    }

    async fn for_date(&self, date: NaiveDate) -> ClientResult<DaySchedule> {
        if date == Local::now().date_naive() {
            return self.today().await;
        }
        self.get_json(&previous_classes_path(date)).await
    }

    async fn record_punch(
        &self,
        session_id: &str,
        punch: &PunchRequest,
    ) -> ClientResult<PunchOutcome> {
        let url = self.endpoint(&format!("teachers/{session_id}/mark-attendance/"));

        let photo = tokio::fs::read(&punch.photo_path)
            .await
            .map_err(|source| ClientError::PhotoRead {
                path: punch.photo_path.display().to_string(),
                source,
            })?;
        let photo_part = Part::bytes(photo)
            .file_name(PHOTO_FILE_NAME)
            .mime_str("image/jpeg")?;

        let stamp = punch.time.format("%H:%M").to_string();
        let (time_field, photo_field) = punch_fields(punch.direction);
        let mut form = Form::new()
            .text(time_field, stamp)
            .part(photo_field, photo_part);
        if let Some(reason) = &punch.reason {
            form = match reason {
                PunchReason::Late(text) => form.text("late_reason", text.clone()),
                PunchReason::Early(text) => form.text("early_reason", text.clone()),
            };
        }

        info!(
            "punch {} for session {} at {}",
            punch.direction, session_id, punch.time.format("%H:%M")
        );
        let response = self
            .authorize(self.http.post(&url).multipart(form))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            return Ok(PunchOutcome::Accepted);
        }
        let outcome = interpret_rejection(status, &body)?;
        warn!("punch rejected for session {}: {:?}", session_id, outcome);
        Ok(outcome)
    }

    async fn report(&self, query: &ReportQuery) -> ClientResult<AttendanceReport> {
        self.get_json(&report_path(query)).await
    }

    async fn login(&self, username: &str, password: &str) -> ClientResult<String> {
        #[derive(serde::Serialize)]
        struct LoginRequest<'a> {
            username: &'a str,
            password: &'a str,
        }

        #[derive(Deserialize)]
        struct LoginResponse {
            access: String,
        }

        let url = self.endpoint("accounts/login/");
        debug!("POST {}", url);
        // Deliberately unauthorized: this call mints the token.
        let response = self
            .http
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        let body: LoginResponse = decode_body(response).await?;
        Ok(body.access)
    }
}

/// Checks the status and decodes the JSON body, keeping the raw text around
/// so a failure can carry the backend's own message.
async fn decode_body<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ClientError::Backend(backend_message(status, &body)));
    }
    Ok(serde_json::from_str(&body)?)
}

/// Multipart field names carrying the punch time and photo, by direction.
fn punch_fields(direction: PunchDirection) -> (&'static str, &'static str) {
    match direction {
        PunchDirection::In => ("in_time", "punch_in_photo"),
        PunchDirection::Out => ("out_time", "punch_out_photo"),
    }
}

/// Path for a historical day's schedule.
fn previous_classes_path(date: NaiveDate) -> String {
    format!(
        "teachers/previous-classes/?date={}&day={}",
        date.format("%Y-%m-%d"),
        date.format("%A")
    )
}

/// Path for a report window.
fn report_path(query: &ReportQuery) -> String {
    let mut path = format!("reports/?filter={}", query.filter);
    if query.filter == ReportFilter::Custom {
        if let Some(start) = query.start_date {
            path.push_str(&format!("&startDate={}", start.format("%Y-%m-%d")));
        }
        if let Some(end) = query.end_date {
            path.push_str(&format!("&endDate={}", end.format("%Y-%m-%d")));
        }
    }
    path
}

/// Structured body the backend sends when a punch needs a reason.
#[derive(Debug, Default, Deserialize)]
struct PunchRejection {
    #[serde(default)]
    is_late: bool,
    #[serde(default)]
    is_early: bool,
}

/// Reads a punch rejection body. Late/early flags become a
/// [`PunchOutcome::ReasonRequired`]; anything else is a plain backend error.
fn interpret_rejection(status: StatusCode, body: &str) -> ClientResult<PunchOutcome> {
    if let Ok(rejection) = serde_json::from_str::<PunchRejection>(body) {
        if rejection.is_late || rejection.is_early {
            return Ok(PunchOutcome::ReasonRequired {
                late: rejection.is_late,
                early: rejection.is_early,
            });
        }
    }
    Err(ClientError::Backend(backend_message(status, body)))
}

/// Pulls a human-readable message out of an error body, falling back to the
/// HTTP status.
fn backend_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    format!("request rejected with HTTP {status}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::path::PathBuf;

    fn source(base: &str) -> HttpScheduleSource {
        HttpScheduleSource::new(base, "token", Duration::from_secs(5)).unwrap()
    }

    fn punch(direction: PunchDirection, photo_path: PathBuf) -> PunchRequest {
        PunchRequest {
            direction,
            time: NaiveTime::from_hms_opt(9, 2, 0).unwrap(),
            photo_path,
            reason: None,
        }
    }

    #[test]
    fn test_endpoint_join_normalizes_slashes() {
        let with_slash = source("http://localhost:8000/api/");
        assert_eq!(
            with_slash.endpoint("/teachers/today-classes"),
            "http://localhost:8000/api/teachers/today-classes"
        );
        let without = source("http://localhost:8000/api");
        assert_eq!(
            without.endpoint("teachers/today-classes"),
            "http://localhost:8000/api/teachers/today-classes"
        );
    }

    #[test]
    fn test_previous_classes_path_carries_date_and_weekday() {
        // 2025-03-10 is a Monday.
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(
            previous_classes_path(date),
            "teachers/previous-classes/?date=2025-03-10&day=Monday"
        );
    }

    #[test]
    fn test_report_path_presets_have_no_range() {
        assert_eq!(
            report_path(&ReportQuery::preset(ReportFilter::Today)),
            "reports/?filter=today"
        );
        assert_eq!(
            report_path(&ReportQuery::preset(ReportFilter::ThisMonth)),
            "reports/?filter=this_month"
        );
    }

    #[test]
    fn test_report_path_custom_includes_range() {
        let query = ReportQuery::custom(
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        );
        assert_eq!(
            report_path(&query),
            "reports/?filter=custom&startDate=2025-03-01&endDate=2025-03-14"
        );
    }

    /// A late flag in the rejection body asks the caller for a reason.
    #[test]
    fn test_interpret_rejection_late() {
        let outcome =
            interpret_rejection(StatusCode::BAD_REQUEST, r#"{ "is_late": true }"#).unwrap();
        assert_eq!(
            outcome,
            PunchOutcome::ReasonRequired {
                late: true,
                early: false
            }
        );
    }

    #[test]
    fn test_interpret_rejection_early() {
        let outcome = interpret_rejection(
            StatusCode::BAD_REQUEST,
            r#"{ "is_late": false, "is_early": true }"#,
        )
        .unwrap();
        assert_eq!(
            outcome,
            PunchOutcome::ReasonRequired {
                late: false,
                early: true
            }
        );
    }

    /// A rejection without the flags is an ordinary backend error.
    #[test]
    fn test_interpret_rejection_without_flags_is_error() {
        let result = interpret_rejection(
            StatusCode::BAD_REQUEST,
            r#"{ "detail": "slot is not open for punches" }"#,
        );
        match result {
            Err(ClientError::Backend(message)) => {
                assert_eq!(message, "slot is not open for punches");
            }
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[test]
    fn test_interpret_rejection_non_json_body() {
        let result = interpret_rejection(StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>");
        match result {
            Err(ClientError::Backend(message)) => {
                assert!(message.contains("500"));
            }
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    /// The multipart field names follow the punch direction.
    #[test]
    fn test_punch_fields_by_direction() {
        assert_eq!(
            punch_fields(PunchDirection::In),
            ("in_time", "punch_in_photo")
        );
        assert_eq!(
            punch_fields(PunchDirection::Out),
            ("out_time", "punch_out_photo")
        );
    }

    #[tokio::test]
    async fn test_record_punch_missing_photo_is_photo_read_error() {
        let s = source("http://localhost:8000/api");
        let request = punch(PunchDirection::Out, PathBuf::from("/nonexistent/photo.jpg"));
        let err = s.record_punch("42", &request).await.unwrap_err();
        assert!(matches!(err, ClientError::PhotoRead { .. }));
    }

    /// With a readable photo the failure comes from the connection, proving
    /// the read and form assembly happen before the request goes out.
    #[tokio::test]
    async fn test_record_punch_reads_photo_before_sending() {
        let dir = tempfile::tempdir().unwrap();
        let photo_path = dir.path().join("photo.jpg");
        std::fs::write(&photo_path, b"jpeg-bytes").unwrap();

        let s = HttpScheduleSource::new("http://127.0.0.1:9/api", "", Duration::from_secs(1))
            .unwrap();
        let err = s
            .record_punch("42", &punch(PunchDirection::In, photo_path))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn test_backend_message_prefers_known_keys() {
        assert_eq!(
            backend_message(StatusCode::UNAUTHORIZED, r#"{ "detail": "token expired" }"#),
            "token expired"
        );
        assert_eq!(
            backend_message(StatusCode::BAD_REQUEST, r#"{ "message": "bad range" }"#),
            "bad range"
        );
    }
}
