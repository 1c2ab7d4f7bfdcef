//! Display surface and input/event wiring
//!
//! [`DashboardView`] is the single dashboard container. Every flow takes a
//! [`Generation`] when it starts and may only commit its final view if no
//! newer generation has been committed in the meantime.
//!
//! [`Dashboard`] wires the text input and the locate action to the
//! [`WeatherService`] pipeline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

use tracing::{debug, info, warn};

use crate::location_resolver::{PositionSource, validate_city};
use crate::pipeline::{DashboardData, WeatherService};
use crate::render::View;
use crate::Result;

/// Key that commits the city input
pub const COMMIT_KEY: &str = "Enter";

/// Monotonic token identifying one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct Committed {
    generation: u64,
    view: View,
}

/// The dashboard container as an explicit state cell
#[derive(Debug)]
pub struct DashboardView {
    next: AtomicU64,
    state: RwLock<Committed>,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardView {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
            state: RwLock::new(Committed {
                generation: 0,
                view: View::Loading,
            }),
        }
    }

    /// Start a new flow: allocate its generation and show the loading view
    pub fn begin(&self) -> Generation {
        let generation = Generation(self.next.fetch_add(1, Ordering::SeqCst) + 1);
        self.commit(generation, View::Loading);
        generation
    }

    /// Replace the container content unless a newer generation already committed.
    /// Returns whether the view was accepted.
    pub fn commit(&self, generation: Generation, view: View) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if generation.0 < state.generation {
            debug!(
                "Discarding render of generation {} (generation {} already committed)",
                generation.0, state.generation
            );
            return false;
        }
        state.generation = generation.0;
        state.view = view;
        true
    }

    /// Generation of the currently displayed view
    #[must_use]
    pub fn committed_generation(&self) -> u64 {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generation
    }

    #[must_use]
    pub fn snapshot(&self) -> View {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .view
            .clone()
    }

    /// Current container content as HTML
    #[must_use]
    pub fn render(&self) -> String {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .view
            .render()
    }
}

/// What a user action led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A flow ran; `committed` is false when a newer flow had already rendered
    Rendered {
        generation: Generation,
        committed: bool,
    },
    /// Input was rejected with a blocking prompt; nothing was sent
    Prompted(String),
    /// The event does not trigger anything
    Ignored,
}

/// The dashboard controller: input field, container and pipeline
#[derive(Debug)]
pub struct Dashboard {
    service: WeatherService,
    view: DashboardView,
    input: Mutex<String>,
}

impl Dashboard {
    #[must_use]
    pub fn new(service: WeatherService) -> Self {
        Self {
            service,
            view: DashboardView::new(),
            input: Mutex::new(String::new()),
        }
    }

    #[must_use]
    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// Replace the text field content
    pub fn set_input(&self, text: impl Into<String>) {
        *self.input.lock().unwrap_or_else(PoisonError::into_inner) = text.into();
    }

    #[must_use]
    pub fn input(&self) -> String {
        self.input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Page load runs the location flow without user action
    pub async fn on_load<P: PositionSource>(&self, source: &P) -> Outcome {
        self.locate(source).await
    }

    /// Only the commit key triggers a search
    pub async fn on_key(&self, key: &str) -> Outcome {
        if key == COMMIT_KEY {
            self.search().await
        } else {
            Outcome::Ignored
        }
    }

    /// Location service flow
    pub async fn locate<P: PositionSource>(&self, source: &P) -> Outcome {
        let generation = self.view.begin();
        info!("Starting location flow (generation {})", generation.0);
        let result = self.service.for_sensor(source).await;
        self.finish(generation, result)
    }

    /// City search flow. Empty input prompts and sends nothing; otherwise
    /// the field is cleared as soon as the search is issued.
    pub async fn search(&self) -> Outcome {
        let raw = self.input();
        let city = match validate_city(&raw) {
            Ok(city) => city.to_string(),
            Err(e) => return Outcome::Prompted(e.user_message()),
        };

        let generation = self.view.begin();
        info!("Starting city search for '{}' (generation {})", city, generation.0);
        self.set_input(String::new());

        let result = self.service.for_city(&city).await;
        self.finish(generation, result)
    }

    fn finish(&self, generation: Generation, result: Result<DashboardData>) -> Outcome {
        if let Err(e) = &result {
            warn!(
                "Flow {} failed: {} ({})",
                generation.0,
                e,
                e.detail().unwrap_or("no detail")
            );
        }
        let committed = self.view.commit(generation, View::from(result));
        Outcome::Rendered {
            generation,
            committed,
        }
    }
}
