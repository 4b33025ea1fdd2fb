//! Default values and well-known names shared across the workspace.
//!
//! Environment variables override most of these through
//! [`Settings::from_env`](crate::config::Settings::from_env).

/// Queue for discovered vacancies awaiting filtering and letter generation.
pub const QUEUE_VACANCIES: &str = "vacancies_to_process";

/// Queue for generated cover letters awaiting submission.
pub const QUEUE_COVER_LETTERS: &str = "cover_letters_to_send";

/// One unacknowledged message in flight per consumer. Enforces ordered,
/// back-pressured processing and keeps the rate limiter single-threaded.
pub const PREFETCH_COUNT: u16 = 1;

/// Default broker connect attempts before giving up.
pub const CONNECT_MAX_RETRIES: u32 = 5;

/// Fixed delay between broker connect attempts (seconds).
pub const CONNECT_RETRY_DELAY_SECS: u64 = 5;

/// Default submission quota (applications per hour).
pub const REQUESTS_PER_HOUR: u32 = 5;

/// Default interval between discovery runs (minutes).
pub const SEARCH_INTERVAL_MINUTES: u64 = 30;

/// Default search page size.
pub const SEARCH_PER_PAGE: u32 = 20;

/// Bounded concurrency for vacancy detail hydration.
pub const MAX_CONCURRENT_REQUESTS: usize = 2;

/// Pacing delay between outgoing search API requests (milliseconds).
pub const REQUEST_DELAY_MS: u64 = 300;

/// Timeout for search and submission HTTP requests (seconds).
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Timeout for letter generation requests (seconds).
pub const GEN_TIMEOUT_SECS: u64 = 60;

/// Default HeadHunter vacancies API endpoint.
pub const HH_API_URL: &str = "https://api.hh.ru/vacancies";

/// Default HeadHunter API base for negotiations and account calls.
pub const HH_BASE_URL: &str = "https://api.hh.ru";

/// Default DeepSeek chat-completions endpoint.
pub const DEEPSEEK_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";

/// Default search query for the discovery stage.
pub const SEARCH_QUERY: &str = "Python разработчик OR Python developer OR backend Python";

/// Default search areas (HeadHunter region ids: Moscow, St. Petersburg, Russia).
pub const SEARCH_AREAS: &[i64] = &[1, 2, 113];

/// Default inclusion keywords matched against title, description, and skills.
pub const KEYWORDS: &[&str] = &[
    "python", "питон", "fastapi", "django", "flask", "backend", "бэкенд", "разработчик",
    "developer",
];
