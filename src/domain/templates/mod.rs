//! Prompt text builders.
//!
//! Every function here is a pure function of its input: no clock, no I/O,
//! no randomness. The same input always yields byte-identical text.

mod assessment;
mod lesson_plan;
mod presentation;

pub use assessment::render_assessment;
pub use lesson_plan::render_lesson_plan;
pub use presentation::render_presentation;

use super::GradeLevel;

/// Opening role definition shared by all prompts.
fn role_definition(subject: &str, grade: GradeLevel) -> String {
    format!(
        "Bạn là một giáo viên {subject} giàu kinh nghiệm đang dạy lớp {grade} tại một trường \
         Trung học cơ sở ở Việt Nam, am hiểu Chương trình Giáo dục phổ thông 2018 và thành thạo \
         việc thiết kế bài dạy theo định hướng phát triển phẩm chất, năng lực học sinh.",
        subject = subject.trim(),
        grade = grade,
    )
}

/// Compliance framing shared by all prompts.
const STANDARDS_NOTES: &str = "\
## YÊU CẦU TUÂN THỦ
- Bám sát Chương trình Giáo dục phổ thông 2018 (Thông tư 32/2018/TT-BGDĐT) và yêu cầu cần đạt của môn học.
- Trình bày theo hướng dẫn tại Công văn 5512/BGDĐT-GDTrH về xây dựng và tổ chức thực hiện kế hoạch giáo dục.
- Mỗi hoạt động học phải nêu rõ: Mục tiêu, Nội dung, Sản phẩm, Tổ chức thực hiện.
- Sử dụng tiếng Việt chuẩn mực, thuật ngữ đúng với sách giáo khoa hiện hành.";

/// Compliance framing for slide decks.
const PRESENTATION_STANDARDS: &str = "\
## YÊU CẦU TUÂN THỦ
- Nội dung slide bám sát yêu cầu cần đạt của Chương trình Giáo dục phổ thông 2018 (Thông tư 32/2018/TT-BGDĐT).
- Tiến trình slide phù hợp các hoạt động học theo Công văn 5512/BGDĐT-GDTrH: mở đầu, hình thành kiến thức, luyện tập, vận dụng.
- Hình ảnh, sơ đồ minh họa phải chính xác về khoa học và phù hợp lứa tuổi.
- Sử dụng tiếng Việt chuẩn mực, thuật ngữ đúng với sách giáo khoa hiện hành.";

/// Compliance framing for tests and quizzes.
const ASSESSMENT_STANDARDS: &str = "\
## YÊU CẦU TUÂN THỦ
- Câu hỏi bám sát yêu cầu cần đạt của Chương trình Giáo dục phổ thông 2018 (Thông tư 32/2018/TT-BGDĐT).
- Đánh giá theo Thông tư 22/2021/TT-BGDĐT: đề kiểm tra xây dựng từ ma trận và bản đặc tả, đáp án và hướng dẫn chấm rõ ràng.
- Định hướng kiểm tra, đánh giá theo Công văn 5512/BGDĐT-GDTrH: đánh giá năng lực, không chỉ ghi nhớ kiến thức.
- Sử dụng tiếng Việt chuẩn mực, thuật ngữ đúng với sách giáo khoa hiện hành.";

/// Alternate tone-mark placements folded to one spelling ("hoá" and "hóa").
const TONE_VARIANTS: [(&str, &str); 10] = [
    ("oá", "óa"),
    ("oà", "òa"),
    ("oả", "ỏa"),
    ("oã", "õa"),
    ("oạ", "ọa"),
    ("uý", "úy"),
    ("uỳ", "ùy"),
    ("uỷ", "ủy"),
    ("uỹ", "ũy"),
    ("uỵ", "ụy"),
];

/// Lowercased words of a subject name with tone placement and "lí"/"lý" unified.
fn subject_words(subject: &str) -> Vec<String> {
    let mut subject = subject.to_lowercase();
    for (variant, canonical) in TONE_VARIANTS {
        subject = subject.replace(variant, canonical);
    }
    subject
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| if word == "lí" { "lý".to_string() } else { word.to_string() })
        .collect()
}

/// Subject-specific teaching guidance, matched on whole words of the subject name.
fn subject_guidance(subject: &str) -> &'static str {
    let words = subject_words(subject);
    let has = |phrase: &str| {
        let needle: Vec<&str> = phrase.split(' ').collect();
        words
            .windows(needle.len())
            .any(|window| window.iter().zip(&needle).all(|(word, want)| word == want))
    };

    if has("tiếng anh") || has("anh văn") || has("anh ngữ") || has("english") {
        "Môn Tiếng Anh: tổ chức hoạt động giao tiếp theo cặp và nhóm, lồng ghép từ vựng, ngữ pháp \
         vào ngữ cảnh, tăng thời lượng học sinh thực hành nói."
    } else if has("toán") {
        "Môn Toán: chú trọng hình thành khái niệm qua ví dụ cụ thể, rèn kỹ năng tính toán và \
         lập luận, đưa bài toán thực tế gắn với đời sống, khuyến khích nhiều cách giải."
    } else if has("văn") || has("tiếng việt") {
        "Môn Ngữ văn: phát triển bốn kỹ năng đọc, viết, nói và nghe; khai thác văn bản theo \
         thể loại; khuyến khích học sinh bày tỏ cảm nhận cá nhân có dẫn chứng."
    } else if has("khoa học tự nhiên")
        || has("khtn")
        || has("vật lý")
        || has("hóa")
        || has("sinh học")
    {
        "Môn Khoa học tự nhiên: tổ chức học qua thí nghiệm, quan sát và tìm tòi, rèn kỹ năng đặt \
         giả thuyết, thu thập và xử lý số liệu, bảo đảm an toàn phòng thí nghiệm."
    } else if has("lịch sử") || has("địa lý") {
        "Môn Lịch sử và Địa lí: sử dụng bản đồ, lược đồ, tư liệu gốc và trục thời gian; liên hệ \
         với lịch sử, địa lí địa phương; rèn kỹ năng khai thác tư liệu."
    } else if has("tin học") {
        "Môn Tin học: kết hợp lý thuyết với thực hành trên máy tính, giao nhiệm vụ theo dự án nhỏ, \
         lồng ghép giáo dục an toàn, văn hóa ứng xử trên không gian mạng."
    } else if has("công dân") || has("gdcd") {
        "Môn Giáo dục công dân: xây dựng tình huống gần gũi với đời sống học sinh, tổ chức thảo \
         luận, đóng vai để hình thành thái độ và hành vi đúng đắn."
    } else {
        "Lựa chọn phương pháp, kỹ thuật dạy học tích cực phù hợp đặc thù môn học, tăng cường hoạt \
         động trải nghiệm và gắn kiến thức với thực tiễn."
    }
}

/// Bullet list with a leading dash per line.
fn bullet_list<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items.into_iter().map(|item| format!("- {item}")).collect::<Vec<_>>().join("\n")
}
