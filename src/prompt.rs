//! Prompt contract for the assessment capability.
//!
//! The field labels below are the only vocabulary the response parser
//! anchors on, so prompts and parser share them instead of repeating literals.

use crate::assessment::FakeArticleType;

pub const SCORE_LABEL: &str = "기사의 신뢰도";
pub const TYPE_LABEL: &str = "가짜 기사 유형";
pub const SUMMARY_LABEL: &str = "요약";
pub const KEYWORDS_LABEL: &str = "추천 검색어";
pub const REASON_LABEL: &str = "판단 근거";
/// Category value emitted when the score is 70 or above.
pub const NO_TYPE: &str = "유형 없음";
/// Placeholder for an absent free-text field.
pub const NONE: &str = "없음";

/// Below this score the model must pick a fake-article category.
pub const CATEGORY_THRESHOLD: u32 = 70;
/// Minimum rationale length requested from the model in full mode.
pub const MIN_REASON_CHARS: usize = 200;

pub const SYSTEM_INSTRUCTION: &str =
    "You are a fact-checker that analyzes news articles for credibility. Always respond in Korean.";

const PREAMBLE: &str = "너는 기사 내용을 신중히 분석해서 다음과 같은 순서로 판단을 내려야하는 fact checker야.
절대 추측하지 말고, 반드시 기사 내용에 기반해서 판단해라.

1️⃣ 먼저 아래 기준을 따라 **판단 근거 문장을 내부적으로 생성한다** (최종 출력은 하지 말고 네 내부에서 생각만 해라):
   - 기사 내용에 '신뢰할 수 있다', '출처 명확', '팩트 기반', '공식 기관 인용' 같은 표현이 있으면 신뢰 가능 근거로 생각하라.
   - 기사 내용에 '불확실', '출처 없음', '충격적인', '믿기지 않는', '광고 링크 포함' 같은 표현이 있으면 신뢰 불가 근거로 생각하라.

2️⃣ 그 다음 아래 점수 기준에 따라 **신뢰도 점수(0~100점)**를 계산하라:
   - 긍정 키워드 하나당 +20점
   - 부정 키워드 하나당 -20점
   - 점수는 0점 미만일 경우 0점, 100점 초과일 경우 100점으로 고정하라.
";

const FULL_CATEGORY_DESCRIPTIONS: [(FakeArticleType, &str); 4] = [
    (
        FakeArticleType::FalseFacts,
        "기사 내용에 검증되지 않은 사실이나 거짓 정보가 포함된 경우",
    ),
    (
        FakeArticleType::ExaggeratedHeadline,
        "제목이 본문 내용을 과장하거나 왜곡하여 표현한 경우",
    ),
    (
        FakeArticleType::ManipulatedImage,
        "이미지가 조작되었거나 본문과 관련 없는 이미지를 사용한 경우",
    ),
    (
        FakeArticleType::Advertorial,
        "명확한 광고 목적이 있거나 상업적 이익을 추구하는 내용이 주된 경우",
    ),
];

const FULL_REASON_ANGLES: [&str; 5] = [
    "기사에서 발견된 구체적인 문제점 (예: \"기사 3단락에서 '전문가에 따르면'이라고 언급했으나 실제 전문가 이름이나 소속이 명시되지 않음\")",
    "출처의 신뢰성 문제 (예: \"인용된 통계 자료의 출처가 불명확하거나 검증 가능한 공식 기관의 데이터가 아님\")",
    "사실 검증 실패 사항 (예: \"기사에서 주장한 '전국 90%의 학교가 폐쇄'라는 내용은 교육부 공식 발표와 일치하지 않음\")",
    "논리적 모순이나 과장 표현 (예: \"제목은 '충격적인 폭로'라고 표현했으나 본문 내용은 단순한 추측에 불과함\")",
    "기사 작성 방식의 문제점 (예: \"객관적 사실과 주관적 의견이 명확히 구분되지 않음\")",
];

/// Which flavour of assessment to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Score plus an ordinal category; used by the evaluate-only operation.
    Quick,
    /// Score, named category, summary, keywords and rationale; used by the combined check.
    Full,
}

impl Mode {
    /// Output-token budget passed to the capability.
    pub fn max_tokens(self) -> u32 {
        match self {
            Mode::Quick => 500,
            Mode::Full => 1500,
        }
    }
}

/// Renders the instruction prompt for `article`. Deterministic for a given input.
pub fn build_prompt(article: &str, mode: Mode) -> String {
    let mut prompt = String::with_capacity(PREAMBLE.len() + article.len() + 2048);
    prompt.push_str(PREAMBLE);
    prompt.push('\n');

    match mode {
        Mode::Quick => push_quick_sections(&mut prompt),
        Mode::Full => push_full_sections(&mut prompt),
    }

    prompt.push_str("\n기사 내용:\n");
    prompt.push_str(article);
    prompt
}

fn push_quick_sections(prompt: &mut String) {
    prompt.push_str(&format!(
        "3️⃣ 신뢰도 점수가 {CATEGORY_THRESHOLD}점 미만일 경우, 아래 4가지 가짜 기사 유형 중 하나를 **판단 근거 문장**에 근거하여 판단하라:\n"
    ));
    for category in FakeArticleType::CATEGORIES {
        prompt.push_str(&format!(
            "   - {}: {}\n",
            category.ordinal().unwrap_or_default(),
            category.label()
        ));
    }
    prompt.push_str(&format!(
        "   - 신뢰도 {CATEGORY_THRESHOLD}점 이상일 경우, '{NO_TYPE}'으로 출력하라.\n\n"
    ));

    prompt.push_str("🎯 최종 출력 형식은 반드시 아래처럼 작성하라:\n");
    prompt.push_str(&format!("{SCORE_LABEL} : ? %\n"));
    prompt.push_str(&format!("{TYPE_LABEL} : ?번 (또는 {NO_TYPE})\n"));
}

fn push_full_sections(prompt: &mut String) {
    prompt.push_str(&format!(
        "3️⃣ 신뢰도 점수가 {CATEGORY_THRESHOLD}점 미만일 경우, 아래 4가지 가짜 기사 유형 중 하나를 **판단 근거 문장**에 근거하여 판단하라:\n"
    ));
    for (category, description) in FULL_CATEGORY_DESCRIPTIONS {
        prompt.push_str(&format!("   - {}: {}\n", category.label(), description));
    }
    prompt.push_str(&format!(
        "   - 신뢰도 {CATEGORY_THRESHOLD}점 이상일 경우, '{NO_TYPE}'으로 출력하라.\n\n"
    ));

    prompt.push_str(&format!("4️⃣ **신뢰도 점수가 {CATEGORY_THRESHOLD}점 이상일 경우**:\n"));
    prompt.push_str("   - 기사 내용을 3문장 이내로 핵심만 요약하라.\n");
    prompt.push_str(
        "   - 이 주제와 관련된 신뢰할 수 있는 정보를 찾을 수 있는 검색 키워드 3개를 추천하라.\n\n",
    );

    prompt.push_str(&format!("5️⃣ **신뢰도 점수가 {CATEGORY_THRESHOLD}점 미만일 경우**:\n"));
    prompt.push_str("   - 기사 내용을 3문장 이내로 핵심만 요약하라.\n");
    prompt.push_str(
        "   - 이 주제와 관련된 신뢰할 수 있는 정보를 찾을 수 있는 검색 키워드 3개를 추천하라.\n",
    );
    prompt.push_str(
        "   - 판단 근거를 매우 구체적이고 상세하게 작성하라. 다음 항목들을 포함해야 한다:\n",
    );
    for angle in FULL_REASON_ANGLES {
        prompt.push_str(&format!("     * {angle}\n"));
    }
    prompt.push('\n');

    let names = FakeArticleType::CATEGORIES
        .iter()
        .map(|category| format!("\"{}\"", category.label()))
        .collect::<Vec<_>>()
        .join(", ");

    prompt.push_str("🎯 최종 출력 형식은 반드시 아래 형식을 지켜라:\n");
    prompt.push_str(&format!("{SCORE_LABEL} : [점수] %\n"));
    prompt.push_str(&format!(
        "{TYPE_LABEL} : [유형명을 반드시 다음 중 하나로만 작성: {names}, 또는 \"{NO_TYPE}\". 절대로 \"1번\", \"2번\" 같은 번호 형식을 사용하지 말라.]\n"
    ));
    prompt.push_str(&format!("{SUMMARY_LABEL} : [요약 내용]\n"));
    prompt.push_str(&format!("{KEYWORDS_LABEL} : [검색어1], [검색어2], [검색어3]\n"));
    prompt.push_str(&format!(
        "{REASON_LABEL} : [매우 구체적이고 상세한 판단 근거 설명 - 최소 {MIN_REASON_CHARS}자 이상으로 작성]\n"
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = "출처 명확한 기사 본문입니다.";

    #[test]
    fn quick_prompt_uses_ordinals_and_short_template() {
        let prompt = build_prompt(ARTICLE, Mode::Quick);

        assert!(prompt.contains("   - 1번: 허위 사실 포함 기사\n"));
        assert!(prompt.contains("   - 4번: 광고성 기사\n"));
        assert!(prompt.contains("기사의 신뢰도 : ? %\n가짜 기사 유형 : ?번 (또는 유형 없음)\n"));
        assert!(!prompt.contains(SUMMARY_LABEL));
        assert!(!prompt.contains(KEYWORDS_LABEL));
        assert!(prompt.ends_with(&format!("기사 내용:\n{ARTICLE}")));
    }

    #[test]
    fn full_prompt_forbids_ordinals_and_lists_all_fields() {
        let prompt = build_prompt(ARTICLE, Mode::Full);

        assert!(!prompt.contains("1번:"));
        assert!(prompt.contains("절대로 \"1번\", \"2번\" 같은 번호 형식을 사용하지 말라."));
        for label in [SCORE_LABEL, TYPE_LABEL, SUMMARY_LABEL, KEYWORDS_LABEL, REASON_LABEL] {
            assert!(
                prompt.contains(&format!("\n{label} : [")),
                "missing template line for {label}"
            );
        }
        assert!(prompt.contains("최소 200자 이상"));
        assert_eq!(prompt.matches("     * ").count(), FULL_REASON_ANGLES.len());
    }

    #[test]
    fn both_modes_share_the_scoring_rubric() {
        for mode in [Mode::Quick, Mode::Full] {
            let prompt = build_prompt(ARTICLE, mode);
            assert!(prompt.contains("긍정 키워드 하나당 +20점"));
            assert!(prompt.contains("부정 키워드 하나당 -20점"));
            assert!(prompt.contains("최종 출력은 하지 말고"));
        }
    }

    #[test]
    fn prompt_is_deterministic() {
        assert_eq!(build_prompt(ARTICLE, Mode::Full), build_prompt(ARTICLE, Mode::Full));
    }

    #[test]
    fn token_budget_per_mode() {
        assert_eq!(Mode::Quick.max_tokens(), 500);
        assert_eq!(Mode::Full.max_tokens(), 1500);
    }
}
