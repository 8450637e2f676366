//! Local HTTP view of the session
//!
//! Stands in for the rendered pages: every handler locks the session, does
//! one thing and returns JSON.
use crate::auction::{Amount, Bid, BidError, Category, Lot, LotId};
use crate::board::Tab;
use crate::catalog::{CatalogItem, CatalogQuery, DEFAULT_MAX_PRICE};
use crate::countdown::TimeLeft;
use crate::ledger::HistoryEntry;
use crate::notify::{InMemoryNotifier, Notification};
use crate::profile::{NotificationPreferences, Profile};
use crate::service::countdown::CountdownSnapshot;
use crate::session::{Session, SharedSession};
use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{future::Future, net::SocketAddr, sync::Arc};
use tokio::sync::watch;
use tracing::info;

pub const UI_SERVICE_ID: &str = "ui";

#[derive(Clone)]
pub struct UiState {
    session: SharedSession,
    toasts: Arc<InMemoryNotifier>,
    countdowns: watch::Receiver<CountdownSnapshot>,
}

impl UiState {
    /// `toasts` must be among the notifiers the session was built with
    pub fn new(
        session: SharedSession,
        toasts: Arc<InMemoryNotifier>,
        countdowns: watch::Receiver<CountdownSnapshot>,
    ) -> Self {
        Self {
            session,
            toasts,
            countdowns,
        }
    }
}

#[derive(Debug)]
pub struct UiError(BidError);

impl From<BidError> for UiError {
    fn from(e: BidError) -> Self {
        Self(e)
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum: Option<Amount>,
}

impl IntoResponse for UiError {
    fn into_response(self) -> Response {
        let (status, minimum) = match &self.0 {
            BidError::TooLow { minimum } => (StatusCode::UNPROCESSABLE_ENTITY, Some(*minimum)),
            BidError::AlreadyClosed => (StatusCode::CONFLICT, None),
            BidError::UnknownLot(_) => (StatusCode::NOT_FOUND, None),
        };

        let body = ErrorResponse {
            message: self.0.to_string(),
            minimum,
        };

        (status, Json(body)).into_response()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LotView {
    pub id: LotId,
    pub title: String,
    pub category: Category,
    pub description: String,
    pub image: String,
    pub current_bid: Amount,
    pub current_bid_label: String,
    pub min_next_bid: Amount,
    pub min_next_bid_label: String,
    pub bid_count: u64,
    pub end_time: DateTime<Utc>,
    pub time_left: Option<TimeLeft>,
    pub time_left_label: String,
    pub draft: String,
}

impl LotView {
    fn new(session: &Session, lot: &Lot) -> Self {
        let locale = session.board.settings().locale;
        Self {
            id: lot.id,
            title: lot.title.clone(),
            category: lot.category.clone(),
            description: lot.description.clone(),
            image: lot.image.clone(),
            current_bid: lot.current_bid,
            current_bid_label: locale.format_price(lot.current_bid),
            min_next_bid: lot.next_valid_bid(),
            min_next_bid_label: locale.format_price(lot.next_valid_bid()),
            bid_count: lot.bid_count,
            end_time: lot.end_time,
            time_left: session.board.time_left(lot.id),
            time_left_label: session.board.time_left_label(lot.id),
            draft: session.board.draft(lot.id).to_owned(),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct TabParams {
    pub tab: Option<Category>,
}

#[derive(Deserialize, Debug, Default)]
pub struct DraftBody {
    pub amount: String,
}

#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    #[default]
    Catalog,
    Lots,
}

#[derive(Deserialize, Debug, Default)]
pub struct CatalogParams {
    pub search: Option<String>,
    pub min_price: Option<Amount>,
    pub max_price: Option<Amount>,
    /// Comma separated
    pub category: Option<String>,
    pub source: Option<CatalogSource>,
}

impl CatalogParams {
    pub fn to_query(&self) -> CatalogQuery {
        CatalogQuery {
            search: self.search.clone().unwrap_or_default(),
            min_price: self.min_price.unwrap_or(0),
            max_price: self.max_price.unwrap_or(DEFAULT_MAX_PRICE),
            categories: self
                .category
                .iter()
                .flat_map(|c| c.split(','))
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum CatalogEntry {
    Item(CatalogItem),
    Lot(LotView),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CatalogView {
    pub count: usize,
    pub items: Vec<CatalogEntry>,
}

/// One lot as of the latest countdown tick
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CountdownView {
    pub id: LotId,
    pub time_left: TimeLeft,
    pub label: String,
}

pub fn router(state: UiState) -> Router {
    Router::new()
        .route("/lots", get(list_lots))
        .route("/lots/:id/draft", put(set_draft))
        .route("/lots/:id/bid", post(place_bid))
        .route("/bids", get(list_bids))
        .route("/countdowns", get(list_countdowns))
        .route("/catalog", get(search_catalog))
        .route("/profile", get(get_profile).put(save_profile))
        .route(
            "/profile/notifications",
            get(get_notification_preferences).put(save_notification_preferences),
        )
        .route("/notifications", get(drain_notifications))
        .with_state(state)
}

pub async fn serve(
    addr: SocketAddr,
    state: UiState,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let server = axum::Server::try_bind(&addr)
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "ui listening");
    server
        .serve(router(state).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .context("ui server failed")?;
    Ok(())
}

pub async fn list_lots(
    State(state): State<UiState>,
    Query(params): Query<TabParams>,
) -> Json<Vec<LotView>> {
    let session = state.session.lock();
    let tab = Tab::from(params.tab);
    Json(
        session
            .board
            .lots_in_tab(&tab)
            .into_iter()
            .map(|lot| LotView::new(&session, lot))
            .collect(),
    )
}

pub async fn set_draft(
    State(state): State<UiState>,
    Path(lot_id): Path<LotId>,
    Json(body): Json<DraftBody>,
) -> Result<StatusCode, UiError> {
    state.session.lock().board.set_draft(lot_id, body.amount)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Bids whatever is in the draft; a body replaces the draft first
pub async fn place_bid(
    State(state): State<UiState>,
    Path(lot_id): Path<LotId>,
    body: Option<Json<DraftBody>>,
) -> Result<Json<Bid>, UiError> {
    let mut session = state.session.lock();
    if let Some(Json(body)) = body {
        session.board.set_draft(lot_id, body.amount)?;
    }
    Ok(Json(session.board.place_bid(lot_id)?))
}

pub async fn list_bids(State(state): State<UiState>) -> Json<Vec<HistoryEntry>> {
    Json(state.session.lock().board.history())
}

/// Empty until the countdown service has ticked once
pub async fn list_countdowns(State(state): State<UiState>) -> Json<Vec<CountdownView>> {
    let locale = state.session.lock().board.settings().locale;
    let snapshot = state.countdowns.borrow().clone();
    Json(
        snapshot
            .into_iter()
            .map(|(id, time_left)| CountdownView {
                id,
                time_left,
                label: time_left.label(locale),
            })
            .collect(),
    )
}

pub async fn search_catalog(
    State(state): State<UiState>,
    Query(params): Query<CatalogParams>,
) -> Json<CatalogView> {
    let session = state.session.lock();
    let query = params.to_query();
    let items: Vec<_> = match params.source.unwrap_or_default() {
        CatalogSource::Catalog => session
            .search_catalog(&query)
            .into_iter()
            .cloned()
            .map(CatalogEntry::Item)
            .collect(),
        CatalogSource::Lots => session
            .search_lots(&query)
            .into_iter()
            .map(|lot| CatalogEntry::Lot(LotView::new(&session, lot)))
            .collect(),
    };
    Json(CatalogView {
        count: items.len(),
        items,
    })
}

pub async fn get_profile(State(state): State<UiState>) -> Json<Profile> {
    Json(state.session.lock().profile().clone())
}

pub async fn save_profile(
    State(state): State<UiState>,
    Json(profile): Json<Profile>,
) -> StatusCode {
    state.session.lock().save_profile(profile);
    StatusCode::NO_CONTENT
}

pub async fn get_notification_preferences(
    State(state): State<UiState>,
) -> Json<NotificationPreferences> {
    Json(state.session.lock().notification_preferences())
}

pub async fn save_notification_preferences(
    State(state): State<UiState>,
    Json(preferences): Json<NotificationPreferences>,
) -> StatusCode {
    state
        .session
        .lock()
        .save_notification_preferences(preferences);
    StatusCode::NO_CONTENT
}

pub async fn drain_notifications(State(state): State<UiState>) -> Json<Vec<Notification>> {
    Json(state.toasts.drain())
}
