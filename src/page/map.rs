use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;

use crate::api::LatLng;
use crate::api::map_service::{self, DirectionsRoute, RouteQuery, polyline};
use crate::error::{PlacesError, RouteLookupFailure};

pub const DEFAULT_CENTER: LatLng = LatLng::new(40.7128, -74.0060);
pub const DEFAULT_ZOOM: u8 = 12;
pub const AUTOCOMPLETE_COUNTRY: &str = "us";
pub const ROUTE_STROKE_COLOR: &str = "#FFD60A";
pub const ROUTE_STROKE_WEIGHT: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Pickup,
    Dropoff,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Styler {
    Color(&'static str),
    Visibility(bool),
    Weight(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub feature_type: Option<&'static str>,
    pub element_type: Option<&'static str>,
    pub stylers: Vec<Styler>,
}

impl StyleRule {
    fn new(
        feature_type: Option<&'static str>,
        element_type: Option<&'static str>,
        stylers: &[Styler],
    ) -> Self {
        Self {
            feature_type,
            element_type,
            stylers: stylers.to_vec(),
        }
    }
}

pub fn theme() -> Vec<StyleRule> {
    use Styler::*;

    vec![
        StyleRule::new(None, Some("geometry"), &[Color("#2E2E2E")]),
        StyleRule::new(None, Some("labels.icon"), &[Visibility(false)]),
        StyleRule::new(None, Some("labels.text.fill"), &[Color("#F8F9FA")]),
        StyleRule::new(None, Some("labels.text.stroke"), &[Color("#2E2E2E")]),
        StyleRule::new(
            Some("administrative"),
            Some("geometry.stroke"),
            &[Color("#757575"), Weight(1.0)],
        ),
        StyleRule::new(Some("poi.park"), Some("geometry.fill"), &[Color("#3C9D5B")]),
        StyleRule::new(Some("poi.business"), None, &[Visibility(false)]),
        StyleRule::new(
            Some("road.highway"),
            Some("geometry.fill"),
            &[Color("#295E89"), Weight(1.5)],
        ),
        StyleRule::new(Some("road.arterial"), Some("geometry"), &[Color("#383838")]),
        StyleRule::new(Some("road.local"), Some("geometry.stroke"), &[Color("#1F1F1F")]),
        StyleRule::new(Some("road"), Some("labels.text.fill"), &[Color("#FFD60A")]),
        StyleRule::new(Some("water"), Some("geometry.fill"), &[Color("#295E89")]),
        StyleRule::new(Some("water"), Some("labels.text.fill"), &[Color("#F8F9FA")]),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutocompleteInput {
    pub field: Field,
    pub country: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteOverlay {
    pub origin: String,
    pub destination: String,
    pub summary: String,
    pub path: Vec<LatLng>,
    pub start: Option<LatLng>,
    pub end: Option<LatLng>,
    pub stroke_color: &'static str,
    pub stroke_weight: u8,
}

impl RouteOverlay {
    fn from_route(query: &RouteQuery, route: &DirectionsRoute) -> Result<Self, RouteLookupFailure> {
        let path = polyline::decode(&route.overview_polyline.points)?;

        Ok(Self {
            origin: query.origin.clone(),
            destination: query.destination.clone(),
            summary: route.summary.clone(),
            start: route.legs.first().map(|leg| leg.start_location).or(path.first().copied()),
            end: route.legs.last().map(|leg| leg.end_location).or(path.last().copied()),
            path,
            stroke_color: ROUTE_STROKE_COLOR,
            stroke_weight: ROUTE_STROKE_WEIGHT,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
    pub styles: Vec<StyleRule>,
    pub overlay: Option<RouteOverlay>,
}

#[derive(Clone)]
pub struct MapController {
    client: map_service::Client,
    view: Arc<Mutex<MapView>>,
    pickup: AutocompleteInput,
    dropoff: AutocompleteInput,
}

impl MapController {
    pub fn initialize(client: map_service::Client) -> Self {
        let view = MapView {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            styles: theme(),
            overlay: None,
        };

        Self {
            client,
            view: Arc::new(Mutex::new(view)),
            pickup: AutocompleteInput {
                field: Field::Pickup,
                country: AUTOCOMPLETE_COUNTRY,
            },
            dropoff: AutocompleteInput {
                field: Field::Dropoff,
                country: AUTOCOMPLETE_COUNTRY,
            },
        }
    }

    pub fn input(&self, field: Field) -> &AutocompleteInput {
        match field {
            Field::Pickup => &self.pickup,
            Field::Dropoff => &self.dropoff,
        }
    }

    pub async fn suggest(&self, field: Field, text: &str) -> Result<Vec<String>, PlacesError> {
        let input = self.input(field);
        let predictions = self.client.autocomplete(text, input.country).await?;

        Ok(predictions.into_iter().map(|p| p.description).collect())
    }

    /// Looks up a driving route and replaces the overlay with it. Failures are
    /// only logged and leave the current overlay in place.
    pub async fn render_route(&self, origin: &str, destination: &str) {
        let query = RouteQuery::driving(origin, destination);

        match self.lookup(&query).await {
            Ok(overlay) => {
                log::debug!(
                    "drawing route {} -> {} ({} points)",
                    overlay.origin,
                    overlay.destination,
                    overlay.path.len()
                );
                self.lock().overlay = Some(overlay);
            }
            Err(e) => log::error!("Directions request failed due to {e}"),
        }
    }

    pub fn spawn_route(&self, origin: String, destination: String) -> JoinHandle<()> {
        let map = self.clone();
        tokio::spawn(async move { map.render_route(&origin, &destination).await })
    }

    pub fn overlay(&self) -> Option<RouteOverlay> {
        self.lock().overlay.clone()
    }

    pub fn view(&self) -> MapView {
        self.lock().clone()
    }

    async fn lookup(&self, query: &RouteQuery) -> Result<RouteOverlay, RouteLookupFailure> {
        let route = self.client.directions(query).await?;
        RouteOverlay::from_route(query, &route)
    }

    fn lock(&self) -> MutexGuard<'_, MapView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
