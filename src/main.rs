mod accommodation;
mod clients;
mod config;
mod geocode;
mod itinerary;
mod net;
mod places;
mod rate_gate;
#[cfg(test)]
mod test_support;
mod types;

use std::sync::Arc;

use accommodation::Category;
use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use clients::{Clients, SharedClients};
use config::Config;
use futures::join;
use itinerary::build_itinerary;
use net::response::{ResponseError, Result};
use serde::de::DeserializeOwned;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use types::dto::travel::{
    non_blank, DaysField, ItineraryRequest, ItineraryResponse, RecommendRequest,
    RecommendResponse, DEFAULT_ITINERARY_DAYS, DEFAULT_TRAVEL_MODE,
};

const MISSING_DESTINATION: &str = "Please provide a destination";

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    // initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let clients = Arc::new(Clients::new(&config)?);
    let app = app(clients);

    info!("Running on {}", config.bind_addr);

    axum::Server::bind(&config.bind_addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

fn app(clients: SharedClients) -> Router {
    Router::new()
        .route("/recommend", post(recommend))
        .route("/itinerary", post(itinerary))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(clients)
}

/// Bodies are read as JSON whatever the content type. An empty body is `{}`.
fn parse_body<T>(body: &[u8]) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ResponseError::bad_request(format!("Invalid request body: {e}")))
}

/// Zero or negative day counts plan nothing. `max_days` bounds the size of
/// the generated plan.
fn parse_days(days: Option<&DaysField>, max_days: u32) -> Result<u32> {
    let Some(days) = days else {
        return Ok(DEFAULT_ITINERARY_DAYS);
    };
    match days.as_count() {
        Some(count) if count <= 0 => Ok(0),
        Some(count) if count <= i64::from(max_days) => Ok(count as u32),
        Some(_) => Err(ResponseError::bad_request(format!(
            "days may not exceed {max_days}"
        ))),
        None => Err(ResponseError::bad_request("days must be a whole number")),
    }
}

#[instrument(skip_all)]
async fn recommend(
    State(clients): State<SharedClients>,
    body: Bytes,
) -> Result<Json<RecommendResponse>> {
    let request: RecommendRequest = parse_body(&body)?;
    let destination = non_blank(&request.destination)
        .ok_or_else(|| ResponseError::bad_request(MISSING_DESTINATION))?;
    let category = Category::parse(request.accommodation.as_deref());
    let travel_mode = non_blank(&request.travel_mode).unwrap_or(DEFAULT_TRAVEL_MODE);
    info!(destination, category = category.label(), travel_mode, "recommend");

    let (places, accommodation) = join!(
        clients.places.find_places(destination, clients.place_limit),
        clients
            .accommodations
            .find_accommodations(destination, &category)
    );
    info!(
        places = places.len(),
        accommodations = accommodation.listings().len(),
        degraded = accommodation.degraded_reason(),
        "recommendation ready"
    );

    Ok(Json(RecommendResponse {
        places,
        accommodation,
        transport: format!("Preferred travel mode: {travel_mode}"),
    }))
}

#[instrument(skip_all)]
async fn itinerary(
    State(clients): State<SharedClients>,
    body: Bytes,
) -> Result<Json<ItineraryResponse>> {
    let request: ItineraryRequest = parse_body(&body)?;
    let destination = non_blank(&request.destination)
        .ok_or_else(|| ResponseError::bad_request(MISSING_DESTINATION))?;
    let days = parse_days(request.days.as_ref(), clients.max_itinerary_days)?;
    info!(destination, days, "itinerary");

    let places = clients
        .places
        .find_places(destination, clients.place_limit)
        .await;
    let itinerary = build_itinerary(&places, days)?;

    Ok(Json(ItineraryResponse { itinerary }))
}
