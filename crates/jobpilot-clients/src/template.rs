//! Keyword-gated templated cover letters.
//!
//! The default generator when no LLM key is configured. It vetoes vacancies
//! that match none of the inclusion keywords and otherwise renders a fixed
//! letter with a vacancy-specific attraction clause.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tracing::debug;

use jobpilot_core::{LetterGenerator, Result, Settings, VacancyTask};

/// Pairs of (description keyword, attraction clause). First match wins.
const ATTRACTION_CLAUSES: &[(&str, &str)] = &[
    (
        "fastapi",
        "Меня особенно привлекает, что вы используете FastAPI, с которым я работаю в ежедневных задачах.",
    ),
    (
        "django",
        "Мне близок ваш стек на Django, на нём я построил несколько production-сервисов.",
    ),
    (
        "postgresql",
        "У меня большой опыт работы с PostgreSQL, включая оптимизацию запросов и проектирование схем.",
    ),
    (
        "микросервис",
        "Мне интересна микросервисная архитектура, с которой я работал в последних проектах.",
    ),
    (
        "api",
        "Я имею значительный опыт проектирования и разработки API.",
    ),
];

const FALLBACK_CLAUSES: &[&str] = &[
    "Меня заинтересовали задачи, описанные в вакансии.",
    "Ваш проект показался мне интересным и близким к моему опыту.",
    "Описанный стек технологий хорошо совпадает с моим опытом.",
];

/// Deterministic letter generator with a keyword inclusion gate.
pub struct TemplateGenerator {
    keywords: Vec<String>,
    contact_block: String,
}

impl TemplateGenerator {
    pub fn new(keywords: Vec<String>, contact_block: String) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
            contact_block,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut lines = Vec::new();
        if !settings.contact_name.is_empty() {
            lines.push(settings.contact_name.clone());
        }
        if !settings.contact_email.is_empty() {
            lines.push(format!("Email: {}", settings.contact_email));
        }
        if !settings.contact_phone.is_empty() {
            lines.push(format!("Телефон: {}", settings.contact_phone));
        }
        if !settings.contact_telegram.is_empty() {
            lines.push(format!("Telegram: {}", settings.contact_telegram));
        }
        if !settings.contact_github.is_empty() {
            lines.push(format!("GitHub: {}", settings.contact_github));
        }

        Self::new(settings.keywords.clone(), lines.join("\n"))
    }

    /// True when any inclusion keyword occurs in the vacancy name,
    /// description, or skill tags (case-insensitive).
    pub fn qualifies(&self, task: &VacancyTask) -> bool {
        let haystack = format!("{} {} {}", task.name, task.description, task.skills).to_lowercase();
        self.keywords.iter().any(|k| haystack.contains(k))
    }

    fn attraction_clause(description: &str) -> String {
        let lowered = description.to_lowercase();
        for (keyword, clause) in ATTRACTION_CLAUSES {
            if lowered.contains(keyword) {
                return (*clause).to_string();
            }
        }
        FALLBACK_CLAUSES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(FALLBACK_CLAUSES[0])
            .to_string()
    }

    fn render(&self, task: &VacancyTask) -> String {
        let clause = Self::attraction_clause(&task.description);
        let mut letter = format!(
            "Здравствуйте!\n\n\
             Меня заинтересовала вакансия «{}» в компании {}.\n\n\
             {}\n\n\
             Я занимаюсь коммерческой разработкой на Python: строю асинхронные \
             сервисы, работаю с базами данных и очередями сообщений, пишу тесты \
             и сопровождаю код в production. Буду рад рассказать о релевантном \
             опыте подробнее на интервью.\n\n\
             С уважением",
            task.name, task.company, clause
        );
        if !self.contact_block.is_empty() {
            letter.push_str(",\n");
            letter.push_str(&self.contact_block);
        } else {
            letter.push('.');
        }
        letter
    }
}

#[async_trait]
impl LetterGenerator for TemplateGenerator {
    async fn generate(&self, task: &VacancyTask) -> Result<Option<String>> {
        if !self.qualifies(task) {
            debug!(
                subsystem = "clients",
                component = "template",
                hh_id = %task.hh_id,
                "No inclusion keyword matched, vetoing"
            );
            return Ok(None);
        }
        Ok(Some(self.render(task)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_with(name: &str, description: &str, skills: &str) -> VacancyTask {
        VacancyTask {
            hh_id: "42".to_string(),
            name: name.to_string(),
            company: "Acme".to_string(),
            salary_from: None,
            salary_to: None,
            salary_currency: None,
            experience: String::new(),
            employment: String::new(),
            description: description.to_string(),
            skills: skills.to_string(),
            url: "https://hh.ru/vacancy/42".to_string(),
        }
    }

    fn generator() -> TemplateGenerator {
        TemplateGenerator::new(
            vec!["python".to_string(), "backend".to_string()],
            "Иван Иванов\nEmail: ivan@example.com".to_string(),
        )
    }

    #[tokio::test]
    async fn test_matching_keyword_produces_letter() {
        let task = task_with("Python Developer", "FastAPI backend", "Python");
        let letter = generator().generate(&task).await.unwrap().unwrap();
        assert!(letter.contains("Python Developer"));
        assert!(letter.contains("Acme"));
        assert!(letter.contains("ivan@example.com"));
    }

    #[tokio::test]
    async fn test_no_keyword_match_is_veto_not_error() {
        let task = task_with("Java Developer", "Spring Boot", "Java");
        let result = generator().generate(&task).await.unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let task = task_with("PYTHON Developer", "", "");
        assert!(generator().qualifies(&task));
    }

    #[test]
    fn test_keyword_matches_in_skills_field() {
        let task = task_with("Developer", "", "Docker, Python");
        assert!(generator().qualifies(&task));
    }

    #[test]
    fn test_attraction_clause_keyed_on_description() {
        let clause = TemplateGenerator::attraction_clause("Сервисы на FastAPI и Redis");
        assert!(clause.contains("FastAPI"));
    }

    #[test]
    fn test_attraction_clause_falls_back() {
        let clause = TemplateGenerator::attraction_clause("Что-то совсем другое");
        assert!(FALLBACK_CLAUSES.contains(&clause.as_str()));
    }

    #[tokio::test]
    async fn test_letter_is_never_empty_on_match() {
        let task = task_with("Python Developer", "", "");
        let letter = TemplateGenerator::new(vec!["python".to_string()], String::new())
            .generate(&task)
            .await
            .unwrap()
            .unwrap();
        assert!(!letter.trim().is_empty());
    }
}
