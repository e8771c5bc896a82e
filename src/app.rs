use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use eframe::egui;

use crate::config::Args;
use crate::data::error::LoadError;
use crate::data::loader::{load_all, Loaded, Source};
use crate::state::AppState;
use crate::ui::panels::SourceChange;
use crate::ui::{filters, panels, table};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PaperTableApp {
    pub state: AppState,
    records_source: Source,
    ordering_source: Option<Source>,
    pending: Option<Receiver<Result<Loaded, LoadError>>>,
}

impl PaperTableApp {
    pub fn new(args: &Args) -> Self {
        let mut app = Self {
            state: AppState::with_sort(&args.sort, !args.descending),
            records_source: args.records_source(),
            ordering_source: args.ordering_source(),
            pending: None,
        };
        app.start_load();
        app
    }

    /// Fetch both resources on a worker thread; `poll_load` picks up the result.
    fn start_load(&mut self) {
        let (tx, rx) = mpsc::channel();
        let records = self.records_source.clone();
        let ordering = self.ordering_source.clone();
        log::info!(
            "Loading records from {records}{}",
            ordering.as_ref().map(|o| format!(", ordering from {o}")).unwrap_or_default()
        );

        thread::spawn(move || {
            // The receiver is gone only if a newer load replaced it.
            let _ = tx.send(load_all(&records, ordering.as_ref()));
        });

        self.pending = Some(rx);
        self.state.loading = true;
    }

    fn poll_load(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(loaded)) => {
                self.state.set_loaded(loaded);
                self.pending = None;
            }
            Ok(Err(e)) => {
                log::error!("Error fetching records from {}: {e}", self.records_source);
                self.state.set_load_error(format!("Error: {e}"));
                self.pending = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                log::error!("Loader thread exited without a result");
                self.state.set_load_error("Error: loader stopped".to_string());
                self.pending = None;
            }
        }
    }

    fn apply(&mut self, change: SourceChange) {
        match change {
            SourceChange::Records(path) => self.records_source = Source::File(path),
            SourceChange::Ordering(path) => self.ordering_source = Some(Source::File(path)),
            SourceChange::DefaultOrdering => self.ordering_source = None,
        }
        self.start_load();
    }
}

impl eframe::App for PaperTableApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_load();
        if self.pending.is_some() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }

        // ---- Top panel: menu bar ----
        let change = egui::TopBottomPanel::top("top_bar")
            .show(ctx, |ui| panels::top_bar(ui, &self.state))
            .inner;
        if let Some(change) = change {
            self.apply(change);
        }

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                filters::filter_panel(ui, &mut self.state);
            });

        // ---- Central panel: papers ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::papers_table(ui, &mut self.state);
        });
    }
}
