//! Shared test fixtures: in-memory store and publisher fakes plus task
//! builders used across the pipeline test modules.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use jobpilot_core::{
    new_v7, Error, LetterTask, NewVacancy, Result, StatusCounts, Vacancy, VacancyRepository,
    VacancyTask,
};
use jobpilot_broker::TaskPublisher;

pub fn vacancy_task(hh_id: &str, name: &str, description: &str, skills: &str) -> VacancyTask {
    VacancyTask {
        hh_id: hh_id.to_string(),
        name: name.to_string(),
        company: "Acme".to_string(),
        salary_from: None,
        salary_to: None,
        salary_currency: None,
        experience: String::new(),
        employment: String::new(),
        description: description.to_string(),
        skills: skills.to_string(),
        url: format!("https://hh.ru/vacancy/{hh_id}"),
    }
}

pub fn letter_task(vacancy_id: &str) -> LetterTask {
    LetterTask {
        vacancy_id: vacancy_id.to_string(),
        vacancy_name: "Python Developer".to_string(),
        company: "Acme".to_string(),
        cover_letter: "Здравствуйте!".to_string(),
        url: format!("https://hh.ru/vacancy/{vacancy_id}"),
    }
}

pub fn new_vacancy(hh_id: &str, name: &str) -> NewVacancy {
    NewVacancy {
        hh_id: hh_id.to_string(),
        name: name.to_string(),
        company: "Acme".to_string(),
        salary_from: None,
        salary_to: None,
        salary_currency: None,
        experience: String::new(),
        employment: String::new(),
        description: String::new(),
        skills: String::new(),
        url: format!("https://hh.ru/vacancy/{hh_id}"),
    }
}

/// In-memory [`VacancyRepository`] keyed by `hh_id`.
#[derive(Default)]
pub struct MemoryRepository {
    rows: Mutex<HashMap<String, Vacancy>>,
    fail_marks: Mutex<bool>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every mark operation fail with a store error.
    pub fn fail_marks(&self) {
        *self.fail_marks.lock().unwrap() = true;
    }

    pub fn seed(&self, vacancy: Vacancy) {
        self.rows
            .lock()
            .unwrap()
            .insert(vacancy.hh_id.clone(), vacancy);
    }

    pub fn get(&self, hh_id: &str) -> Option<Vacancy> {
        self.rows.lock().unwrap().get(hh_id).cloned()
    }

    pub fn row_from(new: &NewVacancy) -> Vacancy {
        Vacancy {
            id: new_v7(),
            hh_id: new.hh_id.clone(),
            name: new.name.clone(),
            company: new.company.clone(),
            salary_from: new.salary_from,
            salary_to: new.salary_to,
            salary_currency: new.salary_currency.clone(),
            experience: new.experience.clone(),
            employment: new.employment.clone(),
            description: new.description.clone(),
            skills: new.skills.clone(),
            url: new.url.clone(),
            processed: false,
            letter_generated: false,
            cover_letter: None,
            letter_generated_at: None,
            applied: false,
            applied_at: None,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl VacancyRepository for MemoryRepository {
    async fn upsert_if_new(&self, vacancy: NewVacancy) -> Result<Option<Vacancy>> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&vacancy.hh_id) {
            return Ok(None);
        }
        let row = Self::row_from(&vacancy);
        rows.insert(row.hh_id.clone(), row.clone());
        Ok(Some(row))
    }

    async fn find_by_hh_id(&self, hh_id: &str) -> Result<Option<Vacancy>> {
        Ok(self.rows.lock().unwrap().get(hh_id).cloned())
    }

    async fn mark_letter_generated(&self, hh_id: &str, cover_letter: &str) -> Result<bool> {
        if *self.fail_marks.lock().unwrap() {
            return Err(Error::Internal("store unavailable".to_string()));
        }
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(hh_id) {
            Some(row) => {
                row.processed = true;
                row.letter_generated = true;
                row.cover_letter = Some(cover_letter.to_string());
                row.letter_generated_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_applied(&self, hh_id: &str) -> Result<bool> {
        if *self.fail_marks.lock().unwrap() {
            return Err(Error::Internal("store unavailable".to_string()));
        }
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(hh_id) {
            Some(row) => {
                row.applied = true;
                row.applied_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn status_counts(&self) -> Result<StatusCounts> {
        let rows = self.rows.lock().unwrap();
        Ok(StatusCounts {
            total: rows.len() as i64,
            unprocessed: rows.values().filter(|r| !r.processed).count() as i64,
            with_letters: rows.values().filter(|r| r.letter_generated).count() as i64,
            applied: rows.values().filter(|r| r.applied).count() as i64,
        })
    }
}

/// Recording [`TaskPublisher`] with an optional scripted failure. Clones
/// share state, so tests keep a handle while the worker owns the box.
#[derive(Default, Clone)]
pub struct RecordingPublisher {
    vacancies: Arc<Mutex<Vec<VacancyTask>>>,
    letters: Arc<Mutex<Vec<LetterTask>>>,
    fail_next: Arc<Mutex<bool>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next publish call with a transient error.
    pub fn fail_next(self) -> Self {
        *self.fail_next.lock().unwrap() = true;
        self
    }

    pub fn vacancies(&self) -> Vec<VacancyTask> {
        self.vacancies.lock().unwrap().clone()
    }

    pub fn letters(&self) -> Vec<LetterTask> {
        self.letters.lock().unwrap().clone()
    }

    fn take_failure(&mut self) -> Result<()> {
        let mut fail = self.fail_next.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(Error::Transient("broker unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskPublisher for RecordingPublisher {
    async fn publish_vacancy(&mut self, task: &VacancyTask) -> Result<()> {
        self.take_failure()?;
        self.vacancies.lock().unwrap().push(task.clone());
        Ok(())
    }

    async fn publish_letter(&mut self, task: &LetterTask) -> Result<()> {
        self.take_failure()?;
        self.letters.lock().unwrap().push(task.clone());
        Ok(())
    }
}
