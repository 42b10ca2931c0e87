/// Fuzzy tag suggestions over the fixed vocabulary

use crate::tags::{Tag, VOCABULARY};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Suggestions must score strictly below this to be shown
pub const SUGGESTION_THRESHOLD: f64 = 0.5;

/// Options for a fuzzy index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Sort results best-first
    pub should_sort: bool,
    /// Also score each query token against each word of a candidate
    pub tokenize: bool,
    pub case_sensitive: bool,
    /// Results scoring above this are never returned
    pub threshold: f64,
}

/// Search options for the tag vocabulary
pub const TAG_SEARCH: SearchConfig = SearchConfig {
    should_sort: true,
    tokenize: true,
    case_sensitive: false,
    threshold: 0.6,
};

/// A candidate and its normalized score (0.0 is a perfect match, 1.0 the worst)
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub tag: Tag,
    pub score: f64,
}

/// Fuzzy index over a static list of tags
pub struct TagIndex {
    candidates: Vec<Tag>,
    config: SearchConfig,
    matcher: SkimMatcherV2,
}

impl TagIndex {
    pub fn new(candidates: &[&str], config: SearchConfig) -> Self {
        let matcher = if config.case_sensitive {
            SkimMatcherV2::default().respect_case()
        } else {
            SkimMatcherV2::default().ignore_case()
        };

        TagIndex {
            candidates: candidates.iter().map(|label| Tag::from(*label)).collect(),
            config,
            matcher,
        }
    }

    pub fn vocabulary() -> Self {
        Self::new(&VOCABULARY, TAG_SEARCH)
    }

    /// Score every candidate against `query`. Blank queries match nothing.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<SearchResult> = self
            .candidates
            .iter()
            .filter_map(|tag| {
                self.score(tag.as_str(), query)
                    .filter(|score| *score <= self.config.threshold)
                    .map(|score| SearchResult {
                        tag: tag.clone(),
                        score,
                    })
            })
            .collect();

        if self.config.should_sort {
            // Stable sort: ties keep vocabulary order
            results.sort_by(|a, b| a.score.total_cmp(&b.score));
        }

        results
    }

    fn score(&self, candidate: &str, query: &str) -> Option<f64> {
        let full = self.normalized(candidate, query);
        if !self.config.tokenize {
            return full;
        }

        let tokens: Vec<f64> = query
            .split_whitespace()
            .map(|token| {
                candidate
                    .split_whitespace()
                    .filter_map(|word| self.normalized(word, token))
                    .fold(1.0, f64::min)
            })
            .collect();

        let tokenized = if tokens.iter().all(|score| *score >= 1.0) {
            None
        } else {
            Some(tokens.iter().sum::<f64>() / tokens.len() as f64)
        };

        match (full, tokenized) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Best of the subsequence and typo scores
    fn normalized(&self, choice: &str, pattern: &str) -> Option<f64> {
        match (self.subsequence_score(choice, pattern), self.typo_score(choice, pattern)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Raw matcher score relative to the query matched against itself
    fn subsequence_score(&self, choice: &str, pattern: &str) -> Option<f64> {
        let perfect = self.matcher.fuzzy_match(pattern, pattern)?;
        if perfect <= 0 {
            return None;
        }

        self.matcher
            .fuzzy_match(choice, pattern)
            .map(|raw| (1.0 - raw as f64 / perfect as f64).clamp(0.0, 1.0))
    }

    /// Edit errors per pattern character against the closest window of `choice`.
    /// Catches typos and transpositions the subsequence matcher rejects.
    fn typo_score(&self, choice: &str, pattern: &str) -> Option<f64> {
        let (choice, pattern) = if self.config.case_sensitive {
            (choice.to_string(), pattern.to_string())
        } else {
            (choice.to_lowercase(), pattern.to_lowercase())
        };

        let choice: Vec<char> = choice.chars().collect();
        let len = pattern.chars().count();
        if len == 0 || choice.is_empty() {
            return None;
        }

        // Choices shorter than the pattern are compared whole
        let widest = (len + 1).min(choice.len());
        let widths = len.saturating_sub(1).max(1).min(widest)..=widest;
        widths
            .flat_map(|width| choice.windows(width))
            .map(|window| {
                let window: String = window.iter().collect();
                strsim::damerau_levenshtein(&window, &pattern)
            })
            .min()
            .map(|errors| (errors as f64 / len as f64).min(1.0))
    }
}

thread_local! {
    static TAG_INDEX: TagIndex = TagIndex::vocabulary();
}

/// Keep results under `threshold`, preserving their order
pub fn below_threshold(results: Vec<SearchResult>, threshold: f64) -> Vec<Tag> {
    results
        .into_iter()
        .filter(|result| result.score < threshold)
        .map(|result| result.tag)
        .collect()
}

/// Suggestions for the popup input, best first
pub fn suggest(input: &str) -> Vec<Tag> {
    TAG_INDEX.with(|index| below_threshold(index.search(input), SUGGESTION_THRESHOLD))
}
