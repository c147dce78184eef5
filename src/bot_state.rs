use std::collections::HashMap;
use std::sync::Arc;

use teloxide::types::ChatId;
use tokio::sync::RwLock;

use crate::calendar::GoogleCalendar;
use crate::config::Config;
use crate::models::BookingSession;

type SessionStore = Arc<RwLock<HashMap<ChatId, BookingSession>>>;

/// Общее состояние бота: сессии бронирования по чатам, клиент календаря
/// и настройки. Каждая сессия принадлежит ровно одному чату.
#[derive(Clone)]
pub struct BotState {
    sessions: SessionStore,
    pub calendar: Arc<GoogleCalendar>,
    pub config: Arc<Config>,
}

impl BotState {
    pub fn new(config: Config, calendar: GoogleCalendar) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            calendar: Arc::new(calendar),
            config: Arc::new(config),
        }
    }

    /// Сессия чата; для нового чата — пустая в состоянии Idle.
    pub async fn session(&self, chat_id: ChatId) -> BookingSession {
        self.sessions
            .read()
            .await
            .get(&chat_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn save_session(&self, chat_id: ChatId, session: BookingSession) {
        self.sessions.write().await.insert(chat_id, session);
    }
}
