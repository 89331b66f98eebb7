//! User-facing reply texts.

pub const MENU_TITLE: &str = "🤖 *AI Assistant Pro*\nChọn chức năng:";

pub const MENU_TEXT: &str = "🤖 *AI Assistant Pro*
Chọn chức năng:
- `/write [chủ đề]` → Viết nội dung
- `/news [từ khóa]` → Tổng hợp tin tức
- `/calc [biểu thức]` → Tính toán
- `/help` → Hướng dẫn";

pub const WRITE_PROMPT: &str = "Hãy nhập chủ đề bạn muốn viết. Ví dụ: /write marketing số";
pub const NEWS_PROMPT: &str = "Hãy nhập từ khóa tin tức. Ví dụ: /news AI";
pub const CALC_PROMPT: &str = "Hãy nhập biểu thức cần tính. Ví dụ: /calc 2+2*5";

pub const NEWS_MISSING_KEYWORD: &str = "Vui lòng nhập từ khóa. Ví dụ: /news AI";
pub const WRITE_MISSING_TOPIC: &str = "Vui lòng nhập chủ đề. Ví dụ: /write marketing số";
pub const CALC_MISSING_EXPRESSION: &str = "Vui lòng nhập biểu thức. Ví dụ: /calc 2+2*5";

pub const WRITING: &str = "Đang tạo nội dung, vui lòng đợi...";
pub const THINKING: &str = "Đang suy nghĩ...";

pub const INVALID_COMMAND: &str = "⚠️ Lệnh không hợp lệ! Gõ /help để xem hướng dẫn.";
pub const APOLOGY: &str = "Xin lỗi, đã có lỗi xảy ra. Vui lòng thử lại sau.";

pub const PHOTO_RECEIVED: &str = "Bạn vừa gửi một ảnh!";
pub const PHOTO_CAPTION: &str = "Ảnh bạn vừa gửi đây.";
pub const AUDIO_RECEIVED: &str = "Bạn vừa gửi một audio!";
pub const VIDEO_RECEIVED: &str = "Bạn vừa gửi một video!";

pub fn sticker_received(emoji: Option<&str>) -> String {
    match emoji {
        Some(emoji) => format!("Bạn vừa gửi một sticker! Emoji: {}", emoji),
        None => "Bạn vừa gửi một sticker!".into(),
    }
}

pub fn document_received(file_name: Option<&str>) -> String {
    match file_name {
        Some(name) => format!("Bạn vừa gửi một file: {}", name),
        None => "Bạn vừa gửi một file!".into(),
    }
}
