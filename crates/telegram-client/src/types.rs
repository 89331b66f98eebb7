//! Telegram Bot API types.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Chat identifier as delivered by the Bot API.
pub type ChatId = i64;

/// Longest text accepted by `sendMessage`, in UTF-16 code units.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Incoming webhook update. Only the fields the bot reacts to are modelled.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
    pub photo: Option<Vec<PhotoSize>>,
    pub sticker: Option<Sticker>,
    pub document: Option<Document>,
    pub audio: Option<Audio>,
    pub video: Option<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: ChatId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sticker {
    pub file_id: Option<String>,
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub file_id: String,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Audio {
    pub file_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub file_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: Option<String>,
    pub message: Option<Message>,
    pub data: Option<String>,
}

/// Media attached to an inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum Media {
    Photo { file_id: String },
    Sticker { emoji: Option<String> },
    Document { file_id: String, file_name: Option<String> },
    Audio { file_id: String },
    Video { file_id: String },
}

impl Media {
    /// The echo payload for this media, if the bot sends it back.
    ///
    /// Stickers are acknowledged only.
    pub fn echo(&self, chat_id: ChatId) -> Option<OutboundMedia> {
        match self {
            Media::Photo { file_id } => Some(OutboundMedia::new(chat_id, MediaKind::Photo, file_id)),
            Media::Document { file_id, .. } => {
                Some(OutboundMedia::new(chat_id, MediaKind::Document, file_id))
            }
            Media::Audio { file_id } => Some(OutboundMedia::new(chat_id, MediaKind::Audio, file_id)),
            Media::Video { file_id } => Some(OutboundMedia::new(chat_id, MediaKind::Video, file_id)),
            Media::Sticker { .. } => None,
        }
    }
}

/// Inbound event after classification of a raw update.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// Inline keyboard button press.
    Callback { chat_id: ChatId, data: String },
    /// Photo, sticker, document, audio or video.
    Media { chat_id: ChatId, media: Media },
    /// Plain text, including commands.
    Text { chat_id: ChatId, text: String },
}

impl InboundEvent {
    /// Classify an update. Returns `None` for updates the bot does not handle.
    pub fn from_update(update: &Update) -> Option<Self> {
        if let Some(query) = &update.callback_query {
            let chat_id = query.message.as_ref()?.chat.id;
            let data = query.data.clone()?;
            return Some(Self::Callback { chat_id, data });
        }

        let message = update.message.as_ref()?;
        let chat_id = message.chat.id;

        if let Some(media) = Self::media_of(message) {
            return Some(Self::Media { chat_id, media });
        }

        message
            .text
            .clone()
            .map(|text| Self::Text { chat_id, text })
    }

    /// Chat the event belongs to.
    pub fn chat_id(&self) -> ChatId {
        match self {
            Self::Callback { chat_id, .. }
            | Self::Media { chat_id, .. }
            | Self::Text { chat_id, .. } => *chat_id,
        }
    }

    fn media_of(message: &Message) -> Option<Media> {
        // The last photo size is the largest one.
        if let Some(photo) = message.photo.as_ref().and_then(|sizes| sizes.last()) {
            return Some(Media::Photo {
                file_id: photo.file_id.clone(),
            });
        }
        if let Some(sticker) = &message.sticker {
            return Some(Media::Sticker {
                emoji: sticker.emoji.clone(),
            });
        }
        if let Some(document) = &message.document {
            return Some(Media::Document {
                file_id: document.file_id.clone(),
                file_name: document.file_name.clone(),
            });
        }
        if let Some(audio) = &message.audio {
            return Some(Media::Audio {
                file_id: audio.file_id.clone(),
            });
        }
        message.video.as_ref().map(|video| Media::Video {
            file_id: video.file_id.clone(),
        })
    }
}

/// Text formatting mode for outgoing messages. Replies use legacy Markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineKeyboardButton {
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    /// Append a row of buttons.
    pub fn row(mut self, buttons: Vec<InlineKeyboardButton>) -> Self {
        self.inline_keyboard.push(buttons);
        self
    }
}

/// `sendMessage` request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundMessage {
    pub chat_id: ChatId,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_web_page_preview: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl OutboundMessage {
    /// Plain text message without formatting.
    pub fn plain(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            parse_mode: None,
            disable_web_page_preview: None,
            reply_markup: None,
        }
    }

    /// Message rendered with Telegram Markdown.
    pub fn markdown(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            parse_mode: Some(ParseMode::Markdown),
            ..Self::plain(chat_id, text)
        }
    }

    /// Explicitly enable link previews.
    pub fn with_link_preview(mut self) -> Self {
        self.disable_web_page_preview = Some(false);
        self
    }

    pub fn with_keyboard(mut self, keyboard: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(keyboard);
        self
    }

    /// Cut the text to at most `max_units` UTF-16 code units, the unit the
    /// Bot API measures message length in. Never splits a character.
    pub fn truncate(&mut self, max_units: usize) -> bool {
        let mut units = 0;
        for (idx, c) in self.text.char_indices() {
            units += c.len_utf16();
            if units > max_units {
                self.text.truncate(idx);
                return true;
            }
        }
        false
    }
}

/// Kind of media sent back to a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Document,
    Audio,
    Video,
}

impl MediaKind {
    /// Bot API method that sends this kind.
    pub fn method(self) -> &'static str {
        match self {
            Self::Photo => "sendPhoto",
            Self::Document => "sendDocument",
            Self::Audio => "sendAudio",
            Self::Video => "sendVideo",
        }
    }

    /// Request field carrying the file reference.
    pub fn field(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Document => "document",
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }
}

/// `sendPhoto` / `sendDocument` / `sendAudio` / `sendVideo` request body.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMedia {
    pub chat_id: ChatId,
    pub kind: MediaKind,
    pub file_id: String,
    pub caption: Option<String>,
}

impl OutboundMedia {
    pub fn new(chat_id: ChatId, kind: MediaKind, file_id: impl Into<String>) -> Self {
        Self {
            chat_id,
            kind,
            file_id: file_id.into(),
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

impl Serialize for OutboundMedia {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("chat_id", &self.chat_id)?;
        map.serialize_entry(self.kind.field(), &self.file_id)?;
        if let Some(caption) = &self.caption {
            map.serialize_entry("caption", caption)?;
        }
        map.end()
    }
}

/// Envelope wrapping every Bot API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

/// Bot identity returned by `getMe`.
#[derive(Debug, Clone, Deserialize)]
pub struct BotUser {
    pub id: i64,
    pub is_bot: bool,
    pub username: Option<String>,
}
