use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// External AI service a generated prompt is formatted for.
///
/// The tool is never called; it only selects the footer appended to the
/// prompt and the usage notes shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetTool {
    #[serde(rename = "chatgpt")]
    ChatGpt,
    Gemini,
    Copilot,
    CanvaAi,
    GammaApp,
}

/// Static description of a target tool.
#[derive(Debug, Clone, Copy)]
pub struct ToolProfile {
    pub display_name: &'static str,
    pub url: &'static str,
    pub footer: &'static str,
    pub instructions: &'static [&'static str],
}

const CHATGPT: ToolProfile = ToolProfile {
    display_name: "ChatGPT",
    url: "https://chatgpt.com/",
    footer: "\n\n---\n📌 Định dạng cho ChatGPT: trình bày kết quả bằng Markdown, dùng bảng khi có \
             yêu cầu và chia câu trả lời thành các mục có tiêu đề rõ ràng.",
    instructions: &[
        "Mở ChatGPT và tạo cuộc trò chuyện mới.",
        "Dán toàn bộ prompt vào ô nhập liệu.",
        "Nhấn Gửi và chờ ChatGPT trả lời hết.",
        "Nếu câu trả lời bị ngắt giữa chừng, gõ \"Tiếp tục\".",
    ],
};

const GEMINI: ToolProfile = ToolProfile {
    display_name: "Google Gemini",
    url: "https://gemini.google.com/",
    footer: "\n\n---\n📌 Định dạng cho Gemini: trả lời bằng tiếng Việt, sử dụng tiêu đề và bảng \
             Markdown để có thể xuất sang Google Docs.",
    instructions: &[
        "Đăng nhập Gemini bằng tài khoản Google.",
        "Dán prompt vào ô trò chuyện và gửi.",
        "Dùng nút \"Xuất sang Tài liệu\" để lưu kết quả vào Google Docs.",
    ],
};

const COPILOT: ToolProfile = ToolProfile {
    display_name: "Microsoft Copilot",
    url: "https://copilot.microsoft.com/",
    footer: "\n\n---\n📌 Định dạng cho Copilot: trình bày rõ ràng, dễ sao chép vào Microsoft Word, \
             giữ nguyên cấu trúc bảng.",
    instructions: &[
        "Mở Microsoft Copilot và chọn chế độ trò chuyện.",
        "Dán prompt và gửi.",
        "Sao chép kết quả vào Microsoft Word để chỉnh sửa tiếp.",
    ],
};

const CANVA_AI: ToolProfile = ToolProfile {
    display_name: "Canva AI",
    url: "https://www.canva.com/ai/",
    footer: "\n\n---\n📌 Định dạng cho Canva AI: mỗi slide gồm tiêu đề ngắn, tối đa 5 gạch đầu dòng \
             và gợi ý hình ảnh minh họa.",
    instructions: &[
        "Mở Canva và chọn Magic Design cho bài thuyết trình.",
        "Dán prompt vào ô mô tả.",
        "Chọn mẫu thiết kế phù hợp rồi tinh chỉnh từng slide.",
    ],
};

const GAMMA_APP: ToolProfile = ToolProfile {
    display_name: "Gamma",
    url: "https://gamma.app/",
    footer: "\n\n---\n📌 Định dạng cho Gamma: phân tách từng thẻ (card) bằng dòng \"---\", mỗi thẻ \
             một ý chính kèm ghi chú cho người trình bày.",
    instructions: &[
        "Đăng nhập Gamma và chọn \"Tạo mới\" → \"Dán văn bản\".",
        "Dán prompt và chọn loại nội dung là bài thuyết trình.",
        "Kiểm tra dàn ý rồi nhấn \"Tạo\".",
    ],
};

impl TargetTool {
    pub const ALL: [TargetTool; 5] = [
        TargetTool::ChatGpt,
        TargetTool::Gemini,
        TargetTool::Copilot,
        TargetTool::CanvaAi,
        TargetTool::GammaApp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetTool::ChatGpt => "chatgpt",
            TargetTool::Gemini => "gemini",
            TargetTool::Copilot => "copilot",
            TargetTool::CanvaAi => "canva-ai",
            TargetTool::GammaApp => "gamma-app",
        }
    }

    pub fn from_name(name: &str) -> Option<TargetTool> {
        match name.trim().to_lowercase().as_str() {
            "chatgpt" => Some(TargetTool::ChatGpt),
            "gemini" => Some(TargetTool::Gemini),
            "copilot" => Some(TargetTool::Copilot),
            "canva-ai" | "canva" => Some(TargetTool::CanvaAi),
            "gamma-app" | "gamma" => Some(TargetTool::GammaApp),
            _ => None,
        }
    }

    pub fn profile(&self) -> &'static ToolProfile {
        match self {
            TargetTool::ChatGpt => &CHATGPT,
            TargetTool::Gemini => &GEMINI,
            TargetTool::Copilot => &COPILOT,
            TargetTool::CanvaAi => &CANVA_AI,
            TargetTool::GammaApp => &GAMMA_APP,
        }
    }

    /// Footer appended to every prompt generated for this tool.
    pub fn footer(&self) -> &'static str {
        self.profile().footer
    }

    pub fn url(&self) -> Url {
        Url::parse(self.profile().url).expect("Tool URL must be valid")
    }

    /// Ordered usage steps shown next to the generated prompt.
    pub fn instructions(&self) -> &'static [&'static str] {
        self.profile().instructions
    }
}

impl fmt::Display for TargetTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.profile().display_name)
    }
}
