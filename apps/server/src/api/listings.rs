use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use brokerdeck_core::listings::{
    Broker, BrokerFilters, FilterOptions, ListingKind, ListingQuery, PropFirm, PropFirmFilters,
};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

async fn search_brokers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListingQuery>,
) -> ApiResult<Json<Vec<Broker>>> {
    let filters = BrokerFilters::from_query(&query)?;
    Ok(Json(state.listing_service.search_brokers(&filters)))
}

async fn get_broker(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Broker>> {
    state
        .listing_service
        .get_broker(&id)
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn broker_filter_options(State(state): State<Arc<AppState>>) -> Json<FilterOptions> {
    Json(state.listing_service.get_filter_options(ListingKind::Broker))
}

async fn search_prop_firms(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListingQuery>,
) -> ApiResult<Json<Vec<PropFirm>>> {
    let filters = PropFirmFilters::from_query(&query)?;
    Ok(Json(state.listing_service.search_prop_firms(&filters)))
}

async fn get_prop_firm(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PropFirm>> {
    state
        .listing_service
        .get_prop_firm(&id)
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn prop_firm_filter_options(State(state): State<Arc<AppState>>) -> Json<FilterOptions> {
    Json(state.listing_service.get_filter_options(ListingKind::PropFirm))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/brokers", get(search_brokers))
        .route("/brokers/filters", get(broker_filter_options))
        .route("/brokers/{id}", get(get_broker))
        .route("/prop-firms", get(search_prop_firms))
        .route("/prop-firms/filters", get(prop_firm_filter_options))
        .route("/prop-firms/{id}", get(get_prop_firm))
}
