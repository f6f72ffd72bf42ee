// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-dimension detection rule tables.
//!
//! Each dimension owns a small set of independent, named rules. A rule either
//! matches a whole word (alphanumeric-bounded, works for space-delimited
//! scripts including Cyrillic) or a literal substring (multi-word phrases,
//! apostrophized forms, and scripts without whitespace word boundaries such
//! as CJK).

/// The fourteen signal dimensions feeding the weighted score.
///
/// Declaration order is the canonical serialization order for score maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Whitespace-token count of the prompt, banded.
    TokenCount,
    /// Number of question marks, scaled.
    QuestionComplexity,
    /// Source-code indicators.
    Code,
    /// Technical/infrastructure vocabulary.
    Technical,
    /// Explicit reasoning or proof requests.
    Reasoning,
    /// Mathematical content.
    Math,
    /// Multi-step task phrasing.
    MultiStep,
    /// Analytical comparison requests.
    Analysis,
    /// Creative writing requests.
    Creative,
    /// Output constraints and quantity limits.
    Constraint,
    /// Action verbs that demand producing an artifact.
    Imperative,
    /// Output format requirements.
    Format,
    /// Markers of trivially answerable prompts.
    Simple,
    /// Negated instructions.
    Negation,
}

impl Dimension {
    /// Number of dimensions; score containers are exactly this wide.
    pub const COUNT: usize = 14;

    /// All dimensions in canonical order.
    pub const ALL: [Dimension; Dimension::COUNT] = [
        Dimension::TokenCount,
        Dimension::QuestionComplexity,
        Dimension::Code,
        Dimension::Technical,
        Dimension::Reasoning,
        Dimension::Math,
        Dimension::MultiStep,
        Dimension::Analysis,
        Dimension::Creative,
        Dimension::Constraint,
        Dimension::Imperative,
        Dimension::Format,
        Dimension::Simple,
        Dimension::Negation,
    ];

    /// Stable snake_case key used in serialized score maps.
    pub fn key(self) -> &'static str {
        match self {
            Dimension::TokenCount => "token_count",
            Dimension::QuestionComplexity => "question_complexity",
            Dimension::Code => "code",
            Dimension::Technical => "technical",
            Dimension::Reasoning => "reasoning",
            Dimension::Math => "math",
            Dimension::MultiStep => "multi_step",
            Dimension::Analysis => "analysis",
            Dimension::Creative => "creative",
            Dimension::Constraint => "constraint",
            Dimension::Imperative => "imperative",
            Dimension::Format => "format",
            Dimension::Simple => "simple",
            Dimension::Negation => "negation",
        }
    }
}

/// How a rule inspects the prompt. Literals must be stored lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Whole-word match against alphanumeric-bounded tokens.
    Word(&'static str),
    /// Literal substring match on the lowercased prompt.
    Phrase(&'static str),
}

/// A named detection rule within a dimension.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Short identifier for diagnostics and tests.
    pub tag: &'static str,
    /// The matching strategy and literal.
    pub matcher: Matcher,
}

impl Rule {
    const fn word(tag: &'static str, word: &'static str) -> Self {
        Rule {
            tag,
            matcher: Matcher::Word(word),
        }
    }

    const fn phrase(tag: &'static str, phrase: &'static str) -> Self {
        Rule {
            tag,
            matcher: Matcher::Phrase(phrase),
        }
    }

    /// Whether this rule matches the prompt.
    ///
    /// `lower` is the lowercased prompt; `tokens` its alphanumeric runs.
    pub fn matches(&self, lower: &str, tokens: &[&str]) -> bool {
        match self.matcher {
            Matcher::Word(word) => tokens.iter().any(|t| *t == word),
            Matcher::Phrase(phrase) => lower.contains(phrase),
        }
    }
}

/// Split a lowercased prompt into alphanumeric runs.
///
/// Splitting on non-alphanumeric characters (rather than ASCII whitespace)
/// gives word boundaries that also hold for Cyrillic and accented Latin.
pub fn tokenize(lower: &str) -> Vec<&str> {
    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Count how many rules in a table match the prompt.
///
/// Each rule contributes at most once regardless of occurrence count.
pub fn count_matches(rules: &[Rule], lower: &str, tokens: &[&str]) -> usize {
    rules.iter().filter(|r| r.matches(lower, tokens)).count()
}

const CODE_RULES: &[Rule] = &[
    Rule::word("code", "code"),
    Rule::word("function", "function"),
    Rule::word("python", "python"),
    Rule::word("javascript", "javascript"),
    Rule::phrase("code-fence", "```"),
    Rule::word("debug", "debug"),
];

const TECHNICAL_RULES: &[Rule] = &[
    Rule::word("algorithm", "algorithm"),
    Rule::word("database", "database"),
    Rule::word("server", "server"),
    Rule::word("api", "api"),
    Rule::word("kubernetes", "kubernetes"),
    Rule::word("compiler", "compiler"),
];

const REASONING_RULES: &[Rule] = &[
    Rule::word("prove", "prove"),
    Rule::word("theorem", "theorem"),
    Rule::word("derive", "derive"),
    Rule::phrase("step-by-step", "step by step"),
    Rule::phrase("chain-of-thought", "chain of thought"),
    Rule::phrase("reason-through", "reason through"),
    Rule::word("prove-ru", "докажи"),
    Rule::phrase("step-ru", "шаг за шагом"),
    Rule::phrase("prove-zh", "证明"),
    Rule::phrase("step-zh", "一步一步"),
    Rule::word("prove-es", "demuestra"),
    Rule::phrase("step-es", "paso a paso"),
    Rule::phrase("prove-ja", "証明"),
    Rule::phrase("step-ja", "一歩一歩"),
    Rule::phrase("prove-ko", "증명"),
    Rule::phrase("step-ko", "단계별"),
    Rule::phrase("prove-ar", "أثبت"),
    Rule::phrase("step-ar", "خطوة بخطوة"),
];

const MATH_RULES: &[Rule] = &[
    Rule::word("calculate", "calculate"),
    Rule::word("solve", "solve"),
    Rule::word("equation", "equation"),
    Rule::word("integral", "integral"),
    Rule::word("derivative", "derivative"),
    Rule::phrase("how-many", "how many"),
];

const MULTI_STEP_RULES: &[Rule] = &[
    Rule::word("steps", "steps"),
    Rule::phrase("and-then", "and then"),
    Rule::phrase("after-that", "after that"),
    Rule::word("finally", "finally"),
    Rule::word("sequence", "sequence"),
    Rule::word("workflow", "workflow"),
];

const ANALYSIS_RULES: &[Rule] = &[
    Rule::word("analyze", "analyze"),
    Rule::word("compare", "compare"),
    Rule::word("evaluate", "evaluate"),
    Rule::word("assess", "assess"),
    Rule::phrase("pros-and-cons", "pros and cons"),
    Rule::phrase("trade-off", "trade-off"),
];

const CREATIVE_RULES: &[Rule] = &[
    Rule::word("story", "story"),
    Rule::word("poem", "poem"),
    Rule::word("imagine", "imagine"),
    Rule::word("fictional", "fictional"),
    Rule::word("brainstorm", "brainstorm"),
    Rule::word("haiku", "haiku"),
];

const CONSTRAINT_RULES: &[Rule] = &[
    Rule::phrase("at-most", "at most"),
    Rule::phrase("at-least", "at least"),
    Rule::phrase("no-more-than", "no more than"),
    Rule::word("must", "must"),
    Rule::word("exactly", "exactly"),
    Rule::word("within", "within"),
];

const IMPERATIVE_RULES: &[Rule] = &[
    Rule::word("write", "write"),
    Rule::word("create", "create"),
    Rule::word("build", "build"),
    Rule::word("implement", "implement"),
    Rule::word("generate", "generate"),
];

const FORMAT_RULES: &[Rule] = &[
    Rule::word("json", "json"),
    Rule::word("markdown", "markdown"),
    Rule::word("table", "table"),
    Rule::word("csv", "csv"),
    Rule::phrase("bullet-points", "bullet points"),
];

const SIMPLE_RULES: &[Rule] = &[
    Rule::phrase("what-time", "what time"),
    Rule::phrase("what-is", "what is"),
    Rule::word("hello", "hello"),
    Rule::word("thanks", "thanks"),
    Rule::word("translate", "translate"),
    Rule::word("define", "define"),
    Rule::word("hello-ru", "привет"),
    Rule::phrase("hello-zh", "你好"),
    Rule::phrase("hello-ja", "こんにちは"),
    Rule::phrase("hello-ko", "안녕하세요"),
    Rule::phrase("hello-ar", "مرحبا"),
];

const NEGATION_RULES: &[Rule] = &[
    Rule::phrase("dont", "don't"),
    Rule::phrase("do-not", "do not"),
    Rule::word("not", "not"),
    Rule::word("never", "never"),
    Rule::word("not-ru", "не"),
    Rule::phrase("dont-zh", "不要"),
    Rule::phrase("dont-ja", "しないで"),
    Rule::phrase("dont-ko", "하지 마"),
    Rule::word("not-ar", "لا"),
];

/// Detection rules for a dimension.
///
/// The two computed dimensions (token count, question complexity) carry no
/// rules and return an empty slice.
pub fn rules_for(dimension: Dimension) -> &'static [Rule] {
    match dimension {
        Dimension::TokenCount | Dimension::QuestionComplexity => &[],
        Dimension::Code => CODE_RULES,
        Dimension::Technical => TECHNICAL_RULES,
        Dimension::Reasoning => REASONING_RULES,
        Dimension::Math => MATH_RULES,
        Dimension::MultiStep => MULTI_STEP_RULES,
        Dimension::Analysis => ANALYSIS_RULES,
        Dimension::Creative => CREATIVE_RULES,
        Dimension::Constraint => CONSTRAINT_RULES,
        Dimension::Imperative => IMPERATIVE_RULES,
        Dimension::Format => FORMAT_RULES,
        Dimension::Simple => SIMPLE_RULES,
        Dimension::Negation => NEGATION_RULES,
    }
}
