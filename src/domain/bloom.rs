//! Bloom's taxonomy levels and question-count apportionment.

use std::cmp::Reverse;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{AppError, FieldError};

/// Cognitive level of a question, ordered from lowest to highest demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CognitiveLevel {
    Recognition,
    Comprehension,
    Application,
    Analysis,
    Synthesis,
    Evaluation,
}

impl CognitiveLevel {
    pub const ALL: [CognitiveLevel; 6] = [
        CognitiveLevel::Recognition,
        CognitiveLevel::Comprehension,
        CognitiveLevel::Application,
        CognitiveLevel::Analysis,
        CognitiveLevel::Synthesis,
        CognitiveLevel::Evaluation,
    ];

    /// Identifier used in serialized input and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            CognitiveLevel::Recognition => "recognition",
            CognitiveLevel::Comprehension => "comprehension",
            CognitiveLevel::Application => "application",
            CognitiveLevel::Analysis => "analysis",
            CognitiveLevel::Synthesis => "synthesis",
            CognitiveLevel::Evaluation => "evaluation",
        }
    }

    /// Vietnamese display label.
    pub fn label(&self) -> &'static str {
        match self {
            CognitiveLevel::Recognition => "Nhận biết",
            CognitiveLevel::Comprehension => "Thông hiểu",
            CognitiveLevel::Application => "Vận dụng",
            CognitiveLevel::Analysis => "Phân tích",
            CognitiveLevel::Synthesis => "Tổng hợp",
            CognitiveLevel::Evaluation => "Đánh giá",
        }
    }

    /// Apportionment weight in tenths (13 = 1.3).
    pub fn weight(&self) -> u32 {
        match self {
            CognitiveLevel::Recognition => 13,
            CognitiveLevel::Comprehension => 12,
            CognitiveLevel::Application => 10,
            CognitiveLevel::Analysis => 9,
            CognitiveLevel::Synthesis => 8,
            CognitiveLevel::Evaluation => 7,
        }
    }

    /// What a question at this level asks of the student.
    pub fn description(&self) -> &'static str {
        match self {
            CognitiveLevel::Recognition => "nhắc lại, nhận ra khái niệm, định nghĩa, sự kiện",
            CognitiveLevel::Comprehension => "giải thích, diễn đạt lại, so sánh đơn giản",
            CognitiveLevel::Application => "sử dụng kiến thức để giải quyết tình huống quen thuộc",
            CognitiveLevel::Analysis => "chia nhỏ vấn đề, tìm mối quan hệ, nguyên nhân - kết quả",
            CognitiveLevel::Synthesis => "kết hợp nhiều kiến thức để tạo ra sản phẩm, giải pháp mới",
            CognitiveLevel::Evaluation => "nhận xét, phán đoán, bảo vệ quan điểm có lập luận",
        }
    }

    pub fn from_name(name: &str) -> Option<CognitiveLevel> {
        match name.trim().to_lowercase().as_str() {
            "recognition" | "nhan-biet" | "nhận biết" => Some(CognitiveLevel::Recognition),
            "comprehension" | "thong-hieu" | "thông hiểu" => Some(CognitiveLevel::Comprehension),
            "application" | "van-dung" | "vận dụng" => Some(CognitiveLevel::Application),
            "analysis" | "phan-tich" | "phân tích" => Some(CognitiveLevel::Analysis),
            "synthesis" | "tong-hop" | "tổng hợp" => Some(CognitiveLevel::Synthesis),
            "evaluation" | "danh-gia" | "đánh giá" => Some(CognitiveLevel::Evaluation),
            _ => None,
        }
    }
}

impl fmt::Display for CognitiveLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-level question counts, in the order the levels were requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomDistribution {
    entries: Vec<(CognitiveLevel, u32)>,
}

impl BloomDistribution {
    pub fn get(&self, level: CognitiveLevel) -> Option<u32> {
        self.entries.iter().find(|(l, _)| *l == level).map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CognitiveLevel, u32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split `total` questions across `levels` using weighted largest-remainder
/// apportionment.
///
/// Each level's quota is `total * weight / sum(weights)`. Every level receives
/// the floor of its quota; the units left over go one apiece to the levels with
/// the largest fractional parts, earlier levels winning ties. Duplicate levels
/// are collapsed to their first occurrence.
///
/// The counts always sum to `total`. A level may receive zero when there are
/// more levels than questions.
pub fn distribute(
    total: u32,
    levels: &[CognitiveLevel],
) -> Result<BloomDistribution, AppError> {
    let mut unique: Vec<CognitiveLevel> = Vec::with_capacity(levels.len());
    for level in levels {
        if !unique.contains(level) {
            unique.push(*level);
        }
    }

    let mut errors = Vec::new();
    if total == 0 {
        errors.push(FieldError::new("question_count", "must be at least 1"));
    }
    if unique.is_empty() {
        errors.push(FieldError::new("bloom_levels", "must select at least one level"));
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let weight_sum: u64 = unique.iter().map(|level| u64::from(level.weight())).sum();
    let mut counts = Vec::with_capacity(unique.len());
    let mut remainders = Vec::with_capacity(unique.len());

    for (index, level) in unique.iter().enumerate() {
        let share = u64::from(total) * u64::from(level.weight());
        counts.push((share / weight_sum) as u32);
        remainders.push((index, share % weight_sum));
    }

    let assigned: u32 = counts.iter().sum();
    let leftover = (total - assigned) as usize;

    // Stable sort keeps caller order among equal remainders.
    remainders.sort_by_key(|(_, remainder)| Reverse(*remainder));
    for (index, _) in remainders.into_iter().take(leftover) {
        counts[index] += 1;
    }

    Ok(BloomDistribution { entries: unique.into_iter().zip(counts).collect() })
}
