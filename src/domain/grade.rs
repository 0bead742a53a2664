use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower-secondary grade (THCS) a prompt targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GradeLevel {
    Six,
    Seven,
    Eight,
    Nine,
}

impl GradeLevel {
    pub const ALL: [GradeLevel; 4] =
        [GradeLevel::Six, GradeLevel::Seven, GradeLevel::Eight, GradeLevel::Nine];

    pub fn number(&self) -> u8 {
        match self {
            GradeLevel::Six => 6,
            GradeLevel::Seven => 7,
            GradeLevel::Eight => 8,
            GradeLevel::Nine => 9,
        }
    }

    pub fn from_number(value: u8) -> Option<GradeLevel> {
        match value {
            6 => Some(GradeLevel::Six),
            7 => Some(GradeLevel::Seven),
            8 => Some(GradeLevel::Eight),
            9 => Some(GradeLevel::Nine),
            _ => None,
        }
    }

    /// Developmental guidance paragraph for the grade.
    pub fn guidance(&self) -> &'static str {
        match self {
            GradeLevel::Six => {
                "Học sinh lớp 6 vừa chuyển cấp từ Tiểu học: ưu tiên hoạt động trực quan, \
                 hướng dẫn từng bước rõ ràng, ngôn ngữ gần gũi và nhiều cơ hội làm quen với \
                 phương pháp học tập mới ở cấp THCS."
            }
            GradeLevel::Seven => {
                "Học sinh lớp 7 đã quen với môi trường THCS: tăng cường hoạt động nhóm, \
                 khuyến khích học sinh đặt câu hỏi và tự khám phá kiến thức qua tình huống \
                 thực tiễn."
            }
            GradeLevel::Eight => {
                "Học sinh lớp 8 bắt đầu phát triển tư duy trừu tượng: đưa vào các nhiệm vụ \
                 phân tích, so sánh, lập luận và yêu cầu học sinh giải thích cách làm của mình."
            }
            GradeLevel::Nine => {
                "Học sinh lớp 9 chuẩn bị thi tuyển sinh vào lớp 10: chú trọng hệ thống hóa \
                 kiến thức, rèn kỹ năng giải quyết vấn đề tổng hợp và làm quen với dạng bài \
                 trong đề thi."
            }
        }
    }
}

impl From<GradeLevel> for u8 {
    fn from(value: GradeLevel) -> Self {
        value.number()
    }
}

impl TryFrom<u8> for GradeLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        GradeLevel::from_number(value)
            .ok_or_else(|| format!("grade level must be 6, 7, 8 or 9 (got {value})"))
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_from_number_roundtrips() {
        for grade in GradeLevel::ALL {
            assert_eq!(GradeLevel::from_number(grade.number()), Some(grade));
        }
        assert_eq!(GradeLevel::from_number(5), None);
        assert_eq!(GradeLevel::from_number(10), None);
    }

    #[test]
    fn grade_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&GradeLevel::Eight).unwrap(), "8");
        let parsed: GradeLevel = serde_json::from_str("9").unwrap();
        assert_eq!(parsed, GradeLevel::Nine);
        assert!(serde_json::from_str::<GradeLevel>("12").is_err());
    }
}
