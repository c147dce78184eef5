use std::error::Error;

use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::bot_state::BotState;
use crate::Command;

const START_TEXT: &str = "Привет! я бот для аренды Пространства. Мы открыты с 9 до 22 \
    и работаем без выходных. Подробнее узнай тут: \
    <a href=\"https://dushepolezno.ru/prostranstvo\">ссылка</a>. Перед началом бронирования \
    обязательно посмотри свободные слоты в расписании \
    <a href=\"https://dushepolezno.ru/prostranstvo-zapis\">ссылка</a>. Если все понятно \
    вводи /book и мы начнем процесс бронирования. Подробнее о кабинетах введи /info";

const INFO_TEXT: &str = "В нашем пространстве есть два помещения разного размера: \
    Кабинет 13 м2 и Зал 17 м2. Кабинет подходит для проведения консультаций, в том числе \
    групповых по 5-6 человек, для занятий с репетитором и для съемок фото или видео. \
    Зал предназначен для лекций, выставок, творческих мастер-классов, коворкинга, \
    использования пространства как мастерской или консультативного пространства, \
    зал вмещает в себя примерно 10-15 человек. Подробнее тут \
    <a href=\"https://dushepolezno.ru/prostranstvo\">ссылка</a>. Перед началом бронирования \
    обязательно посмотри свободные слоты в расписании \
    <a href=\"https://dushepolezno.ru/prostranstvo-zapis\">ссылка</a>. Если все понятно \
    вводи /book и мы начнем процесс бронирования";

const BOOK_TEXT: &str = "Вы начали процесс бронирования кабинетов! Обязательно посмотри \
    свободные слоты в расписании \
    <a href=\"https://dushepolezno.ru/prostranstvo-zapis\">ссылка</a>. Сейчас я задам вам \
    несколько вопросов о вашем мероприятии, чтобы передать эту информацию менеджеру. \
    Для начала, введите ваше имя.";

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match cmd {
        Command::Start => {
            bot.send_message(msg.chat.id, START_TEXT)
                .parse_mode(ParseMode::Html)
                .await?;
        }
        Command::Info => {
            bot.send_message(msg.chat.id, INFO_TEXT)
                .parse_mode(ParseMode::Html)
                .await?;
        }
        Command::Book => handle_book(bot, msg, state).await?,
    }
    Ok(())
}

/// /book сбрасывает сессию и запускает опрос с имени клиента.
async fn handle_book(
    bot: Bot,
    msg: Message,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut session = state.session(msg.chat.id).await;
    session.begin();
    state.save_session(msg.chat.id, session).await;

    bot.send_message(msg.chat.id, BOOK_TEXT)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
