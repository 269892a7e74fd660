pub mod export;
pub mod fare;
pub mod info;
pub mod map;
pub mod pdf;
pub mod presenter;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;

use crate::api::predict_service::{PaymentType, TripQuoteResponse};
use crate::api::{map_service, predict_service};
use crate::config::Config;
use crate::error::PlacesError;

pub use export::{Summary, SummaryExporter};
pub use fare::Submission;
pub use info::{ClickEvent, ClickTarget, InfoOverlay};
pub use map::{Field, MapController, RouteOverlay};
pub use presenter::ResultsView;

pub trait Surface: Send + Sync {
    fn alert(&self, message: &str);

    fn set_busy(&self, busy: bool);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub pickup: String,
    pub dropoff: String,
    pub payment: PaymentType,
}

#[derive(Default)]
struct PageState {
    form: FormState,
    results: Option<ResultsView>,
    last_quote: Option<TripQuoteResponse>,
    info: InfoOverlay,
}

#[derive(Clone)]
pub struct Page {
    predict: predict_service::Client,
    map: MapController,
    surface: Arc<dyn Surface>,
    exporter: SummaryExporter,
    state: Arc<Mutex<PageState>>,
}

impl Page {
    pub fn new(
        predict: predict_service::Client,
        map: MapController,
        surface: Arc<dyn Surface>,
        exporter: SummaryExporter,
    ) -> Self {
        Self {
            predict,
            map,
            surface,
            exporter,
            state: Arc::new(Mutex::new(PageState::default())),
        }
    }

    pub fn from_config(config: &Config, surface: Arc<dyn Surface>) -> anyhow::Result<Self> {
        let predict = predict_service::Client::new(&config.fare_api_url)?;
        let maps = map_service::Client::new(&config.maps_api_url, &config.maps_api_key)?;

        Ok(Self::new(
            predict,
            MapController::initialize(maps),
            surface,
            SummaryExporter::new(&config.export_dir),
        ))
    }

    pub fn map(&self) -> &MapController {
        &self.map
    }

    pub fn form(&self) -> FormState {
        self.state().form.clone()
    }

    pub fn set_field(&self, field: Field, text: impl Into<String>) {
        let text = text.into();
        let mut state = self.state();
        match field {
            Field::Pickup => state.form.pickup = text,
            Field::Dropoff => state.form.dropoff = text,
        }
    }

    pub fn set_payment(&self, payment: PaymentType) {
        self.state().form.payment = payment;
    }

    /// Starts a route render once both addresses are filled in. Must be
    /// called from within a tokio runtime.
    pub fn place_changed(&self, field: Field, text: impl Into<String>) -> Option<JoinHandle<()>> {
        self.set_field(field, text);

        let form = self.form();
        if !form.is_complete() {
            return None;
        }

        Some(self.map.spawn_route(form.pickup, form.dropoff))
    }

    pub async fn suggest(&self, field: Field, text: &str) -> Result<Vec<String>, PlacesError> {
        self.map.suggest(field, text).await
    }

    pub fn present(&self, quote: TripQuoteResponse) {
        let view = presenter::render(&quote);

        let mut state = self.state();
        state.results = Some(view);
        state.last_quote = Some(quote);
    }

    /// `None` while the results panel is hidden.
    pub fn results(&self) -> Option<ResultsView> {
        self.state().results.clone()
    }

    pub fn results_visible(&self) -> bool {
        self.state().results.is_some()
    }

    pub fn last_quote(&self) -> Option<TripQuoteResponse> {
        self.state().last_quote.clone()
    }

    pub fn summary(&self) -> Summary {
        let state = self.state();
        let view = state
            .last_quote
            .as_ref()
            .map(presenter::render)
            .unwrap_or_else(ResultsView::blank);

        Summary {
            pickup: state.form.pickup.clone(),
            dropoff: state.form.dropoff.clone(),
            view,
        }
    }

    pub fn export(&self) -> anyhow::Result<PathBuf> {
        self.exporter.export(&self.summary())
    }

    pub fn about_clicked(&self, event: &mut ClickEvent) {
        self.state().info.about_clicked(event);
    }

    pub fn close_clicked(&self) {
        self.state().info.close_clicked();
    }

    pub fn window_clicked(&self, target: ClickTarget) {
        self.state().info.window_clicked(target);
    }

    pub fn info_visible(&self) -> bool {
        self.state().info.is_visible()
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
