//! Keyword inclusion predicate for the filter/generate stage.

use jobpilot_core::VacancyTask;

/// Case-insensitive substring match over the vacancy name, description and
/// skill tags. An empty keyword list admits everything.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// True when the vacancy matches at least one inclusion keyword.
    pub fn matches(&self, task: &VacancyTask) -> bool {
        if self.keywords.is_empty() {
            return true;
        }
        let haystack = format!("{} {} {}", task.name, task.description, task.skills).to_lowercase();
        self.keywords.iter().any(|k| haystack.contains(k))
    }
}
