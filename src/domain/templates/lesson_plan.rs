use super::{STANDARDS_NOTES, bullet_list, role_definition, subject_guidance};
use crate::domain::{LessonPlanInput, OutputFormat};

/// Build the lesson-plan (kế hoạch bài dạy) prompt.
pub fn render_lesson_plan(input: &LessonPlanInput) -> String {
    format!(
        r#"{role}

# NHIỆM VỤ
Soạn KẾ HOẠCH BÀI DẠY hoàn chỉnh cho bài "{lesson}" - môn {subject}, lớp {grade}, theo khung {standard}.

{standards}

## ĐẶC ĐIỂM HỌC SINH
{grade_guidance}

## ĐỊNH HƯỚNG MÔN HỌC
{subject_guidance}

## CẤU TRÚC KẾ HOẠCH BÀI DẠY
I. MỤC TIÊU
1. Về kiến thức
2. Về năng lực (năng lực chung và năng lực đặc thù)
3. Về phẩm chất
II. THIẾT BỊ DẠY HỌC VÀ HỌC LIỆU
III. TIẾN TRÌNH DẠY HỌC
1. Hoạt động 1: Mở đầu (Xác định vấn đề/nhiệm vụ học tập)
2. Hoạt động 2: Hình thành kiến thức mới
3. Hoạt động 3: Luyện tập
4. Hoạt động 4: Vận dụng

Mỗi hoạt động trình bày đủ bốn mục a) Mục tiêu, b) Nội dung, c) Sản phẩm, d) Tổ chức thực hiện.
Phần d) Tổ chức thực hiện gồm bốn bước: Chuyển giao nhiệm vụ, Thực hiện nhiệm vụ, Báo cáo thảo luận, Kết luận nhận định.

{table}

## LƯU Ý KHI TRÌNH BÀY
- Ghi rõ thời lượng dự kiến cho từng hoạt động.
- Nêu cụ thể câu hỏi, phiếu học tập, sản phẩm mong đợi của học sinh.
- Đề xuất phương án phân hóa cho học sinh khá giỏi và học sinh cần hỗ trợ.
- Kết thúc bằng phần hướng dẫn học ở nhà và chuẩn bị bài sau."#,
        role = role_definition(&input.subject, input.grade_level),
        lesson = input.lesson_name.trim(),
        subject = input.subject.trim(),
        grade = input.grade_level,
        standard = input.pedagogical_standard.trim(),
        standards = STANDARDS_NOTES,
        grade_guidance = input.grade_level.guidance(),
        subject_guidance = subject_guidance(&input.subject),
        table = table_instructions(input.output_format),
    )
}

fn table_instructions(format: OutputFormat) -> String {
    let columns = format.columns();
    let header = format!("| {} |", columns.join(" | "));
    let divider = format!("|{}", "---|".repeat(columns.len()));

    format!(
        "## ĐỊNH DẠNG BẢNG TIẾN TRÌNH ({count} CỘT)\n\
         Trình bày phần Tiến trình dạy học dưới dạng bảng gồm đúng {count} cột theo thứ tự:\n\
         {columns}\n\n\
         {header}\n{divider}\n\n\
         Mỗi hoạt động là một nhóm dòng trong bảng; không gộp ô, không bỏ trống cột.",
        count = columns.len(),
        columns = bullet_list(columns.iter().copied()),
        header = header,
        divider = divider,
    )
}
