//! The agenda session: one object owning the viewed month, the store and
//! the event form.
//!
//! Every user action (navigate, open a day, save, delete, export) is a
//! method here. Storage failures are logged and returned; the session is
//! left exactly as it was before the failed action.

use std::path::{Path, PathBuf};

use chrono::{Local, Locale, NaiveDate, Utc};
use tracing::{error, info};

use crate::error::{AgendaError, AgendaResult, StoreError};
use crate::event::{Event, EventId};
use crate::form::{EventForm, FormMode};
use crate::month_grid::{MonthGrid, YearMonth};
use crate::pdf;
use crate::query;
use crate::report::{Report, ReportScope};
use crate::store::EventStore;

pub struct Session<S: EventStore> {
    store: S,
    current: YearMonth,
    form: EventForm,
    locale: Locale,
}

impl<S: EventStore> Session<S> {
    /// Start a session showing the month of `today`.
    pub fn new(store: S, today: NaiveDate, locale: Locale) -> Self {
        Session {
            store,
            current: YearMonth::of(today),
            form: EventForm::new(),
            locale,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    // =========================================================================
    // Navigation and rendering
    // =========================================================================

    pub fn current_month(&self) -> YearMonth {
        self.current
    }

    pub fn go_to(&mut self, month: YearMonth) {
        self.current = month;
    }

    pub fn next_month(&mut self) -> YearMonth {
        self.current = self.current.next();
        self.current
    }

    pub fn prev_month(&mut self) -> YearMonth {
        self.current = self.current.prev();
        self.current
    }

    /// Grid of the current month as of the local date.
    pub async fn render(&self) -> AgendaResult<MonthGrid> {
        self.render_as_of(Local::now().date_naive()).await
    }

    pub async fn render_as_of(&self, today: NaiveDate) -> AgendaResult<MonthGrid> {
        let events = logged(
            "load month",
            query::events_in_month(&self.store, self.current).await,
        )?;
        Ok(MonthGrid::build(self.current, today, &events))
    }

    pub async fn events_on(&self, date: NaiveDate) -> AgendaResult<Vec<Event>> {
        logged("load day", query::events_on(&self.store, date).await)
    }

    // =========================================================================
    // Form
    // =========================================================================

    pub fn form(&self) -> &EventForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EventForm {
        &mut self.form
    }

    /// Open the form on `date` in add mode, listing that day's events.
    pub async fn open_day(&mut self, date: NaiveDate) -> AgendaResult<&EventForm> {
        let events = self.events_on(date).await?;
        self.form.open(date, events);
        Ok(&self.form)
    }

    /// Open the form in edit mode on the event with `id`. Returns `false`
    /// when no such event exists.
    pub async fn open_event(&mut self, id: &EventId) -> AgendaResult<bool> {
        let events = self.events_on(id.date()).await?;
        let Some(index) = events.iter().position(|e| &e.id == id) else {
            return Ok(false);
        };

        self.form.open(id.date(), events);
        self.form.select(index);
        Ok(true)
    }

    pub fn close_form(&mut self) {
        self.form.close();
    }

    /// Validate and persist the form, then close it.
    pub async fn save(&mut self) -> AgendaResult<Event> {
        self.save_at(Utc::now().timestamp_millis()).await
    }

    /// Like [`Session::save`], minting new ids from `now_millis`.
    pub async fn save_at(&mut self, now_millis: i64) -> AgendaResult<Event> {
        let draft = self.form.draft()?;

        let id = match draft.id.clone() {
            Some(id) => id,
            None => self.mint_id(draft.date, now_millis).await?,
        };
        let event = draft.into_event(id);

        logged("save event", self.store.put(&event).await)?;
        info!(id = %event.id, title = %event.title, "saved event");

        self.form.close();
        Ok(event)
    }

    /// Delete the event loaded in the form. Without one this is a no-op
    /// returning `None`.
    pub async fn delete(&mut self) -> AgendaResult<Option<EventId>> {
        let Some(id) = self.form.delete_target().cloned() else {
            return Ok(None);
        };

        logged("delete event", self.store.delete(&id).await)?;
        info!(%id, "deleted event");

        self.form.close();
        Ok(Some(id))
    }

    /// `<date>-<millis>`, bumping the suffix until it is unused.
    async fn mint_id(&self, date: NaiveDate, now_millis: i64) -> AgendaResult<EventId> {
        let mut millis = now_millis;
        loop {
            let id = EventId::mint(date, millis)?;
            if !logged("mint id", self.store.contains(&id).await)? {
                return Ok(id);
            }
            millis += 1;
        }
    }

    pub fn form_mode(&self) -> FormMode {
        self.form.mode()
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Build the report for `scope`.
    pub async fn report(&self, scope: ReportScope) -> AgendaResult<Report> {
        let events = logged(
            "load report",
            query::find_by_date_prefix(&self.store, &scope.prefix()).await,
        )?;
        Ok(Report::build(scope, events, self.locale))
    }

    /// Render the report for `scope` to a PDF in `dir`; returns its path.
    pub async fn export(&self, scope: ReportScope, dir: &Path) -> AgendaResult<PathBuf> {
        let report = self.report(scope).await?;
        let bytes = pdf::render(&report)?;

        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&report.file_name);
        tokio::fs::write(&path, bytes).await?;

        info!(path = %path.display(), rows = report.rows.len(), %scope, "exported report");
        Ok(path)
    }
}

/// Report a store failure on the diagnostic channel before handing it on.
fn logged<T>(action: &str, result: Result<T, StoreError>) -> Result<T, AgendaError> {
    result
        .inspect_err(|e| error!(action, error = %e, "storage operation failed"))
        .map_err(AgendaError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DirStore, MemoryStore};
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    const NOW: i64 = 1_760_870_400_000;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session() -> Session<MemoryStore> {
        Session::new(MemoryStore::new(), date(2026, 10, 19), Locale::pt_BR)
    }

    /// Store that fails every write. Reads return `events`, or fail too
    /// when `fail_reads` is set.
    #[derive(Default)]
    struct BrokenStore {
        events: Vec<Event>,
        fail_reads: bool,
    }

    fn disk_on_fire() -> std::io::Error {
        std::io::Error::other("disk on fire")
    }

    impl EventStore for BrokenStore {
        async fn put(&self, _: &Event) -> Result<(), StoreError> {
            Err(StoreError::Write {
                path: PathBuf::from("/broken"),
                source: disk_on_fire(),
            })
        }
        async fn delete(&self, _: &EventId) -> Result<(), StoreError> {
            Err(StoreError::Delete {
                path: PathBuf::from("/broken"),
                source: disk_on_fire(),
            })
        }
        async fn get_all(&self) -> Result<Vec<Event>, StoreError> {
            if self.fail_reads {
                return Err(StoreError::Read {
                    path: PathBuf::from("/broken"),
                    source: disk_on_fire(),
                });
            }
            Ok(self.events.clone())
        }
        async fn contains(&self, _: &EventId) -> Result<bool, StoreError> {
            Ok(false)
        }
    }

    async fn add(session: &mut Session<MemoryStore>, day: NaiveDate, title: &str, now: i64) -> Event {
        session.open_day(day).await.unwrap();
        session.form_mut().fields.title = title.to_string();
        session.save_at(now).await.unwrap()
    }

    #[tokio::test]
    async fn test_save_then_read_back() {
        let mut session = session();
        let day = date(2026, 10, 21);

        session.open_day(day).await.unwrap();
        let fields = &mut session.form_mut().fields;
        fields.title = "Dentista".to_string();
        fields.description = "Consulta".to_string();
        fields.hour = "09:30".to_string();
        fields.participants = BTreeSet::from(["Ana".to_string(), "Bruno".to_string()]);

        let saved = session.save_at(NOW).await.unwrap();
        assert_eq!(saved.id.as_str(), "2026-10-21-1760870400000");
        assert_eq!(session.form_mode(), FormMode::Closed);

        let found = session.events_on(day).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Dentista");
        assert_eq!(found[0].description.as_deref(), Some("Consulta"));
        assert_eq!(found[0].hour.as_deref(), Some("09:30"));
        assert_eq!(found[0].participants, saved.participants);
    }

    #[tokio::test]
    async fn test_blank_title_persists_nothing() {
        let mut session = session();
        let day = date(2026, 10, 21);
        add(&mut session, day, "Existente", NOW).await;

        session.open_day(day).await.unwrap();
        session.form_mut().fields.title = "   ".to_string();
        let err = session.save_at(NOW + 1).await.unwrap_err();

        assert!(matches!(err, AgendaError::Validation(_)));
        assert_eq!(session.form_mode(), FormMode::Add);
        assert_eq!(session.events_on(day).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_same_millisecond_saves_get_distinct_ids() {
        let mut session = session();
        let day = date(2026, 10, 21);

        let a = add(&mut session, day, "a", NOW).await;
        let b = add(&mut session, day, "b", NOW).await;

        assert_ne!(a.id, b.id);
        assert_eq!(b.id.suffix(), (NOW + 1).to_string());
        assert_eq!(session.events_on(day).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_edit_overwrites_in_place() {
        let mut session = session();
        let saved = add(&mut session, date(2026, 10, 21), "Reunião", NOW).await;

        assert!(session.open_event(&saved.id).await.unwrap());
        assert_eq!(session.form_mode(), FormMode::Edit);
        session.form_mut().fields.title = "Reunião adiada".to_string();
        let edited = session.save_at(NOW + 5_000).await.unwrap();

        assert_eq!(edited.id, saved.id);
        let all = session.store().get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Reunião adiada");
    }

    #[tokio::test]
    async fn test_open_event_unknown_id() {
        let mut session = session();
        let id = EventId::parse("2026-10-21-42").unwrap();
        assert!(!session.open_event(&id).await.unwrap());
        assert_eq!(session.form_mode(), FormMode::Closed);
    }

    #[tokio::test]
    async fn test_delete_removes_from_every_scope() {
        let mut session = session();
        let day = date(2026, 10, 21);
        let saved = add(&mut session, day, "Some", NOW).await;
        let kept = add(&mut session, date(2026, 3, 2), "Fica", NOW).await;

        session.open_event(&saved.id).await.unwrap();
        assert_eq!(session.delete().await.unwrap(), Some(saved.id.clone()));

        let store = session.store();
        assert!(query::events_on(store, day).await.unwrap().is_empty());
        assert!(
            query::events_in_month(store, YearMonth::of(day))
                .await
                .unwrap()
                .is_empty()
        );
        let year = query::events_in_year(store, 2026).await.unwrap();
        assert_eq!(year, vec![kept]);
    }

    #[tokio::test]
    async fn test_delete_without_id_is_noop() {
        let mut session = session();
        add(&mut session, date(2026, 10, 21), "Fica", NOW).await;

        session.open_day(date(2026, 10, 21)).await.unwrap();
        assert_eq!(session.delete().await.unwrap(), None);
        assert_eq!(session.form_mode(), FormMode::Add);
        assert_eq!(session.store().get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_render_marks_event_days_and_today() {
        let mut session = session();
        add(&mut session, date(2026, 10, 3), "x", NOW).await;
        add(&mut session, date(2026, 11, 3), "y", NOW).await;

        let grid = session.render_as_of(date(2026, 10, 19)).await.unwrap();
        let marked: Vec<_> = grid.days.iter().filter(|d| d.has_events).map(|d| d.day()).collect();
        assert_eq!(marked, [3]);
        assert!(grid.days[18].is_today);
    }

    #[tokio::test]
    async fn test_navigation_across_years() {
        let mut session = Session::new(MemoryStore::new(), date(2026, 12, 5), Locale::pt_BR);
        assert_eq!(session.next_month(), YearMonth::new(2027, 1).unwrap());
        assert_eq!(session.prev_month(), YearMonth::new(2026, 12).unwrap());

        session.go_to(YearMonth::new(2026, 1).unwrap());
        assert_eq!(session.prev_month(), YearMonth::new(2025, 12).unwrap());
    }

    #[tokio::test]
    async fn test_store_failure_keeps_form_open() {
        let mut session = Session::new(BrokenStore::default(), date(2026, 10, 19), Locale::pt_BR);
        session.open_day(date(2026, 10, 20)).await.unwrap();
        session.form_mut().fields.title = "Perdido".to_string();

        let err = session.save_at(NOW).await.unwrap_err();
        assert!(matches!(err, AgendaError::Store(StoreError::Write { .. })));
        assert_eq!(session.form_mode(), FormMode::Add);
        assert_eq!(session.form().fields.title, "Perdido");
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_event_loaded() {
        let id = EventId::parse("2026-10-20-7").unwrap();
        let store = BrokenStore {
            events: vec![Event {
                id: id.clone(),
                title: "Fica".to_string(),
                description: None,
                hour: None,
                participants: BTreeSet::new(),
            }],
            fail_reads: false,
        };
        let mut session = Session::new(store, date(2026, 10, 19), Locale::pt_BR);

        assert!(session.open_event(&id).await.unwrap());
        let err = session.delete().await.unwrap_err();

        assert!(matches!(err, AgendaError::Store(StoreError::Delete { .. })));
        assert_eq!(session.form_mode(), FormMode::Edit);
        assert_eq!(session.form().delete_target(), Some(&id));
        assert_eq!(session.form().fields.title, "Fica");
    }

    #[tokio::test]
    async fn test_failed_read_leaves_session_unchanged() {
        let store = BrokenStore {
            fail_reads: true,
            ..Default::default()
        };
        let mut session = Session::new(store, date(2026, 10, 19), Locale::pt_BR);

        let err = session.render_as_of(date(2026, 10, 19)).await.unwrap_err();
        assert!(matches!(err, AgendaError::Store(StoreError::Read { .. })));

        assert!(session.open_day(date(2026, 10, 20)).await.is_err());
        assert_eq!(session.form_mode(), FormMode::Closed);
        assert_eq!(session.current_month(), YearMonth::new(2026, 10).unwrap());
    }

    #[tokio::test]
    async fn test_out_of_range_year_is_not_saved() {
        let tmp = TempDir::new().unwrap();
        let store = DirStore::open(tmp.path()).await.unwrap();
        let mut session = Session::new(store, date(2026, 10, 19), Locale::pt_BR);
        let far = date(10000, 1, 1);

        session.open_day(far).await.unwrap();
        session.form_mut().fields.title = "Futuro".to_string();
        let err = session.save_at(1).await.unwrap_err();

        assert!(matches!(err, AgendaError::InvalidDate(_)));
        assert_eq!(session.form_mode(), FormMode::Add);
        assert!(session.store().get_all().await.unwrap().is_empty());
        assert_eq!(std::fs::read_dir(session.store().dir()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_year_report_orders_missing_hour_first() {
        let mut session = session();
        let day = date(2026, 5, 1);

        session.open_day(day).await.unwrap();
        session.form_mut().fields.title = "Nove".to_string();
        session.form_mut().fields.hour = "09:00".to_string();
        session.save_at(NOW).await.unwrap();
        add(&mut session, day, "Sem hora", NOW + 1).await;

        let report = session.report(ReportScope::Year(2026)).await.unwrap();
        let titles: Vec<_> = report.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Sem hora", "Nove"]);
        assert_eq!(report.rows[0].hour, "—");
    }

    #[tokio::test]
    async fn test_export_writes_named_pdf() {
        let tmp = TempDir::new().unwrap();
        let store = DirStore::open(&tmp.path().join("data")).await.unwrap();
        let mut session = Session::new(store, date(2026, 10, 19), Locale::pt_BR);

        session.open_day(date(2026, 10, 2)).await.unwrap();
        session.form_mut().fields.title = "Feira".to_string();
        session.save_at(NOW).await.unwrap();

        let out = tmp.path().join("reports");
        let month = session
            .export(ReportScope::Month(session.current_month()), &out)
            .await
            .unwrap();
        assert_eq!(month, out.join("Relatorio_outubro_2026.pdf"));
        assert!(std::fs::read(&month).unwrap().starts_with(b"%PDF"));

        let year = session.export(ReportScope::Year(2027), &out).await.unwrap();
        assert_eq!(year, out.join("Relatorio_Anual_2027.pdf"));
        assert!(year.exists());
    }
}
