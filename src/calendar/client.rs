use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;

use super::types::{CalendarEvent, EventList, EventPayload, TIME_ZONE};
use crate::config::Config;

const API_BASE: &str = "https://www.googleapis.com/calendar/v3";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("token refresh failed: {0}")]
    Auth(String),
    #[error("calendar api returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Граница календаря: листинг событий за окно и вставка события.
#[async_trait]
pub trait CalendarApi: Send + Sync {
    async fn list_events(
        &self,
        time_min: DateTime<Tz>,
        time_max: DateTime<Tz>,
    ) -> Result<Vec<CalendarEvent>, CalendarError>;

    async fn insert_event(&self, payload: &EventPayload) -> Result<(), CalendarError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Клиент Google Calendar поверх REST API с обновлением access-токена
/// по refresh-токену.
pub struct GoogleCalendar {
    http: reqwest::Client,
    api_base: String,
    token_url: String,
    calendar_id: String,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    redirect_uri: String,
    token: Mutex<Option<CachedToken>>,
}

impl GoogleCalendar {
    pub fn new(config: &Config) -> Self {
        Self::with_endpoints(config, API_BASE.to_string(), TOKEN_URL.to_string())
    }

    /// Клиент с подменёнными адресами API; используется в тестах.
    pub fn with_endpoints(config: &Config, api_base: String, token_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base,
            token_url,
            calendar_id: config.calendar_id.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            refresh_token: config.refresh_token.clone(),
            redirect_uri: config.redirect_uri.clone(),
            token: Mutex::new(None),
        }
    }

    async fn access_token(&self) -> Result<String, CalendarError> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.value.clone());
            }
        }

        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", self.refresh_token.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CalendarError::Auth(format!("{status}: {body}")));
        }

        let token: TokenResponse = response.json().await?;
        // Токен считается истекшим на минуту раньше, чтобы запрос
        // не ушёл с уже недействительным значением
        let expires_at = Instant::now() + Duration::from_secs(token.expires_in.saturating_sub(60));
        let value = token.access_token.clone();
        *guard = Some(CachedToken {
            value: token.access_token,
            expires_at,
        });
        Ok(value)
    }

    fn events_url(&self) -> String {
        format!("{}/calendars/{}/events", self.api_base, self.calendar_id)
    }
}

#[async_trait]
impl CalendarApi for GoogleCalendar {
    async fn list_events(
        &self,
        time_min: DateTime<Tz>,
        time_max: DateTime<Tz>,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        let token = self.access_token().await?;
        let response = self
            .http
            .get(self.events_url())
            .bearer_auth(token)
            .query(&[
                ("timeMin", time_min.to_rfc3339()),
                ("timeMax", time_max.to_rfc3339()),
                ("timeZone", TIME_ZONE.to_string()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CalendarError::Api { status, body });
        }

        let list: EventList = response.json().await?;
        Ok(list.items)
    }

    async fn insert_event(&self, payload: &EventPayload) -> Result<(), CalendarError> {
        let token = self.access_token().await?;
        let response = self
            .http
            .post(self.events_url())
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CalendarError::Api { status, body });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::availability::is_slot_available;
    use crate::calendar::types::EventTime;
    use crate::models::{Room, TimeInterval};
    use chrono::{NaiveDate, NaiveTime, TimeZone};
    use chrono_tz::Europe::Moscow;
    use serde_json::json;
    use teloxide::types::ChatId;
    use wiremock::matchers::{body_partial_json, body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> Config {
        Config {
            calendar_id: "primary".to_string(),
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            refresh_token: "refresh".to_string(),
            redirect_uri: "http://localhost".to_string(),
            admin_chat_id: ChatId(1),
        }
    }

    fn client_for(server: &MockServer) -> GoogleCalendar {
        GoogleCalendar::with_endpoints(
            &test_config(),
            server.uri(),
            format!("{}/token", server.uri()),
        )
    }

    fn mock_token() -> Mock {
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "test-token",
                "expires_in": 3600,
                "token_type": "Bearer",
            })))
    }

    #[tokio::test]
    async fn lists_events_with_day_window_and_caches_token() {
        let server = MockServer::start().await;
        mock_token().expect(1).mount(&server).await;
        Mock::given(method("GET"))
            .and(path("/calendars/primary/events"))
            .and(query_param("singleEvents", "true"))
            .and(query_param("orderBy", "startTime"))
            .and(query_param("timeZone", "Europe/Moscow"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {
                        "summary": "Лекция - Анна [Кабинет 13м²]",
                        "start": { "dateTime": "2025-03-13T10:00:00+03:00" },
                        "end": { "dateTime": "2025-03-13T11:00:00+03:00" },
                    }
                ]
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let date = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap();
        let time_min = Moscow
            .from_local_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
            .unwrap();
        let time_max = Moscow
            .from_local_datetime(&date.and_hms_opt(23, 59, 59).unwrap())
            .unwrap();

        let events = client.list_events(time_min, time_max).await.unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0]
            .summary
            .as_deref()
            .unwrap()
            .contains("[Кабинет 13м²]"));

        // Второй запрос не должен снова обновлять токен
        let events = client.list_events(time_min, time_max).await.unwrap();
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn inserts_event_payload_with_color() {
        let server = MockServer::start().await;
        mock_token().mount(&server).await;
        Mock::given(method("POST"))
            .and(path("/calendars/primary/events"))
            .and(body_partial_json(json!({
                "summary": "Лекция - Анна [Зал 17м²]",
                "colorId": "6",
                "start": { "date": "2025-03-13" },
                "end": { "date": "2025-03-13" },
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "evt1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let date = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap();
        let payload = EventPayload {
            summary: "Лекция - Анна [Зал 17м²]".to_string(),
            description: "Имя клиента: Анна".to_string(),
            start: EventTime::whole_day(date),
            end: EventTime::whole_day(date),
            color_id: "6".to_string(),
        };
        client.insert_event(&payload).await.unwrap();
    }

    #[tokio::test]
    async fn list_failure_makes_slot_unavailable() {
        let server = MockServer::start().await;
        mock_token().mount(&server).await;
        Mock::given(method("GET"))
            .and(path("/calendars/primary/events"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let date = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap();
        let interval = TimeInterval {
            start: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        };
        assert!(!is_slot_available(&client, date, interval, Room::Cabinet13).await);
    }

    #[tokio::test]
    async fn token_refresh_failure_surfaces_as_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid_grant"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let date = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap();
        let time_min = Moscow
            .from_local_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
            .unwrap();
        let result = client.list_events(time_min, time_min).await;
        assert!(matches!(result, Err(CalendarError::Auth(_))));
    }
}
