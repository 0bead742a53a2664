use super::{PRESENTATION_STANDARDS, role_definition, subject_guidance};
use crate::domain::PresentationInput;

/// Marker line that opens the curriculum block; the closed-world rules refer to it.
pub(crate) const CURRICULUM_START: &str = "<<<NỘI DUNG BÀI HỌC>>>";
pub(crate) const CURRICULUM_END: &str = "<<<HẾT NỘI DUNG>>>";

/// Build the presentation-outline prompt.
///
/// The downstream tool is told to stay inside the supplied curriculum text.
/// Nothing enforces that at runtime; it is a written contract in the prompt.
pub fn render_presentation(input: &PresentationInput) -> String {
    format!(
        r#"{role}

# NHIỆM VỤ
Thiết kế dàn ý bài trình chiếu gồm đúng {slides} slide cho bài "{lesson}" - môn {subject}, lớp {grade}.

## NGUYÊN TẮC BẮT BUỘC VỀ NGUỒN NỘI DUNG
- CHỈ sử dụng thông tin nằm giữa hai dấu {start} và {end} bên dưới.
- KHÔNG bổ sung kiến thức, số liệu, ví dụ hay trích dẫn từ bên ngoài nội dung được cung cấp.
- Nếu nội dung không đủ cho một slide, ghi "[Giáo viên bổ sung]" thay vì tự suy diễn.

{start}
{curriculum}
{end}

## ĐẶC ĐIỂM HỌC SINH
{grade_guidance}

## ĐỊNH HƯỚNG MÔN HỌC
{subject_guidance}

## CẤU TRÚC SLIDE
{structure}

## YÊU CẦU CHO MỖI SLIDE
- Tiêu đề ngắn gọn (không quá 10 từ).
- Tối đa 5 gạch đầu dòng, mỗi dòng không quá 15 từ.
- Gợi ý hình ảnh hoặc sơ đồ minh họa phù hợp.
- Ghi chú cho giáo viên: câu hỏi gợi mở hoặc hoạt động tương tác.

{standards}"#,
        role = role_definition(&input.subject, input.grade_level),
        slides = input.slide_count,
        lesson = input.lesson_name.trim(),
        subject = input.subject.trim(),
        grade = input.grade_level,
        start = CURRICULUM_START,
        end = CURRICULUM_END,
        curriculum = input.curriculum_content.trim(),
        grade_guidance = input.grade_level.guidance(),
        subject_guidance = subject_guidance(&input.subject),
        structure = slide_structure(input.slide_count),
        standards = PRESENTATION_STANDARDS,
    )
}

/// Opening, content and closing slides for the requested count.
fn slide_structure(slide_count: u32) -> String {
    let mut lines = vec![
        "- Slide 1: Trang tiêu đề (tên bài, môn học, lớp).".to_string(),
        "- Slide 2: Mục tiêu bài học và hoạt động khởi động.".to_string(),
    ];

    let practice = slide_count >= 6;
    let content_end =
        if practice { slide_count.saturating_sub(2) } else { slide_count.saturating_sub(1) };
    match content_end.saturating_sub(2) {
        0 => {}
        1 => lines.push("- Slide 3: Nội dung chính của bài học.".to_string()),
        _ => lines.push(format!(
            "- Slide 3 đến {content_end}: Nội dung chính, mỗi slide một ý trọng tâm."
        )),
    }
    if practice {
        lines.push(format!("- Slide {}: Câu hỏi luyện tập, củng cố.", slide_count - 1));
    }

    lines.push(format!("- Slide {slide_count}: Tổng kết và nhiệm vụ về nhà."));
    lines.join("\n")
}
