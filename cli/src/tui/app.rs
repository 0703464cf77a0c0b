use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use chrono::{Datelike, Local, NaiveDate};
use log::debug;
use rili_core::{
    build_grid, days_in_month, fetch_year, CalendarCell, CancelToken, HolidayError, HolidayMap,
    HolidayRepository, HttpHolidayTransport,
};

/// Completion message from a fetch worker back to the event loop.
struct FetchOutcome {
    year: i32,
    token: CancelToken,
    result: Result<HolidayMap, HolidayError>,
}

pub struct App {
    repo: HolidayRepository<HttpHolidayTransport>,
    pub focus: NaiveDate,
    pub today: NaiveDate,
    pub holidays: Arc<HolidayMap>,
    pub loading: bool,
    pub error: Option<String>,
    pub cells: Vec<CalendarCell>,
    token: Option<CancelToken>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
}

/// Move `focus` by whole months, clamping the day to the target month's
/// length (e.g. Jan 31 -> Feb 29).
pub fn shift_month(focus: NaiveDate, delta: i32) -> NaiveDate {
    let months = focus.year() * 12 + focus.month() as i32 - 1 + delta;
    let year = months.div_euclid(12);
    let month = months.rem_euclid(12) as u32 + 1;
    let day = focus.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

impl App {
    pub fn new(endpoint: &str) -> App {
        let today = Local::now().date_naive();
        let (tx, rx) = mpsc::channel();
        let mut app = App {
            repo: HolidayRepository::new(HttpHolidayTransport::new(endpoint)),
            focus: today,
            today,
            holidays: Arc::new(HolidayMap::new()),
            loading: false,
            error: None,
            cells: Vec::new(),
            token: None,
            tx,
            rx,
        };
        app.ensure_holidays();
        app
    }

    pub fn shift_month(&mut self, delta: i32) {
        self.focus = shift_month(self.focus, delta);
        self.ensure_holidays();
    }

    pub fn shift_year(&mut self, delta: i32) {
        self.shift_month(delta * 12);
    }

    pub fn go_today(&mut self) {
        self.focus = Local::now().date_naive();
        self.ensure_holidays();
    }

    /// Make sure the focus year's holidays are available or on their way.
    ///
    /// A cache hit resolves synchronously. On a miss, any outstanding
    /// fetch is cancelled and a worker thread spawned; its result comes
    /// back through the channel and is applied in [`App::on_tick`], the
    /// only place the cache is mutated.
    fn ensure_holidays(&mut self) {
        let year = self.focus.year();

        if let Some(map) = self.repo.cached(year) {
            self.holidays = map;
            self.loading = false;
            self.error = None;
            self.rebuild();
            return;
        }

        if let Some(previous) = self.token.take() {
            previous.cancel();
        }

        let token = CancelToken::new();
        self.token = Some(token.clone());
        self.loading = true;
        self.error = None;
        // the grid renders immediately; holiday annotations follow
        self.holidays = Arc::new(HolidayMap::new());

        let tx = self.tx.clone();
        let transport = self.repo.transport().clone();
        thread::spawn(move || {
            let result = fetch_year(&transport, year);
            let _ = tx.send(FetchOutcome {
                year,
                token,
                result,
            });
        });

        self.rebuild();
    }

    /// Drain completed fetches. Cancelled tokens are dropped without any
    /// state change; stale completions for a year no longer in focus only
    /// populate the cache.
    pub fn on_tick(&mut self) {
        while let Ok(outcome) = self.rx.try_recv() {
            if outcome.token.is_cancelled() {
                debug!("dropping cancelled fetch for {}", outcome.year);
                continue;
            }
            match outcome.result {
                Ok(map) => {
                    let map = self.repo.store(outcome.year, map);
                    if outcome.year == self.focus.year() {
                        self.holidays = map;
                        self.loading = false;
                        self.error = None;
                        self.token = None;
                        self.rebuild();
                    }
                }
                Err(err) => {
                    if outcome.year == self.focus.year() {
                        self.loading = false;
                        self.error = Some(err.to_string());
                        self.token = None;
                        self.rebuild();
                    }
                }
            }
        }
    }

    fn rebuild(&mut self) {
        self.today = Local::now().date_naive();
        self.cells = build_grid(self.focus, &self.holidays, self.today);
    }
}
