use super::{ASSESSMENT_STANDARDS, role_definition, subject_guidance};
use crate::domain::{AssessmentInput, BloomDistribution, QuestionType};

/// Build the assessment prompt from an already computed Bloom distribution.
pub fn render_assessment(input: &AssessmentInput, distribution: &BloomDistribution) -> String {
    format!(
        r#"{role}

# NHIỆM VỤ
Biên soạn {count} câu hỏi dạng {question_type} về chủ đề "{topic}" - môn {subject}, lớp {grade}, phân bố theo các mức độ nhận thức của thang Bloom.

## MA TRẬN MỨC ĐỘ NHẬN THỨC
| Mức độ | Số câu | Yêu cầu |
|---|---|---|
{matrix}
| Tổng | {count} | |

Tuân thủ đúng số câu của từng mức độ trong ma trận. Mức độ nào có 0 câu thì bỏ qua.

## ĐẶC ĐIỂM HỌC SINH
{grade_guidance}

## ĐỊNH HƯỚNG MÔN HỌC
{subject_guidance}

## YÊU CẦU THEO DẠNG CÂU HỎI
{rubric}

## YÊU CẦU CHUNG
- Đánh số câu liên tục và ghi mức độ nhận thức trong ngoặc sau mỗi câu, ví dụ: "Câu 1 (Nhận biết)".
- Nội dung chính xác, phù hợp chương trình lớp {grade}, không đánh đố.
- Cuối đề có bảng đáp án và hướng dẫn chấm tách riêng.

{standards}"#,
        role = role_definition(&input.subject, input.grade_level),
        count = input.question_count,
        question_type = input.question_type.label(),
        topic = input.topic.trim(),
        subject = input.subject.trim(),
        grade = input.grade_level,
        matrix = matrix_rows(distribution),
        grade_guidance = input.grade_level.guidance(),
        subject_guidance = subject_guidance(&input.subject),
        rubric = question_type_rubric(input.question_type),
        standards = ASSESSMENT_STANDARDS,
    )
}

fn matrix_rows(distribution: &BloomDistribution) -> String {
    distribution
        .iter()
        .map(|(level, count)| format!("| {} | {} | {} |", level.label(), count, level.description()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn question_type_rubric(question_type: QuestionType) -> &'static str {
    match question_type {
        QuestionType::MultipleChoice => {
            "- Mỗi câu có 4 phương án A, B, C, D và chỉ một phương án đúng.\n\
             - Các phương án nhiễu phải hợp lý, phản ánh sai lầm thường gặp của học sinh.\n\
             - Không dùng phương án \"Tất cả các ý trên\" hoặc \"Không có ý nào đúng\".\n\
             - Bảng đáp án ghi dạng: 1-A, 2-C, ... kèm giải thích ngắn cho từng câu."
        }
        QuestionType::ShortAnswer => {
            "- Mỗi câu yêu cầu trả lời bằng một từ, một cụm từ, một con số hoặc một câu ngắn.\n\
             - Đáp án phải xác định duy nhất, nêu rõ các cách diễn đạt tương đương được chấp nhận.\n\
             - Hướng dẫn chấm ghi điểm cho từng câu."
        }
        QuestionType::Essay => {
            "- Mỗi câu nêu rõ yêu cầu, phạm vi và độ dài gợi ý của bài làm.\n\
             - Hướng dẫn chấm chia theo ý, mỗi ý có thang điểm cụ thể.\n\
             - Kèm bảng tiêu chí (rubric) 4 mức: Xuất sắc, Tốt, Đạt, Chưa đạt.\n\
             - Chấp nhận cách trình bày khác nếu lập luận hợp lý."
        }
    }
}
