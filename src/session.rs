use crate::auction::Lot;
use crate::board::{AuctionBoard, BoardError, BoardSettings};
use crate::catalog::{CatalogItem, CatalogQuery};
use crate::countdown::SharedClock;
use crate::notify::{Notification, Notifier, SharedNotifier};
use crate::profile::{NotificationPreferences, Profile};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

/// Everything one visitor's session owns
///
/// Lives for as long as the process; nothing in here is ever persisted.
pub struct Session {
    pub board: AuctionBoard,
    catalog: Vec<CatalogItem>,
    profile: Profile,
    preferences: NotificationPreferences,
    settings: BoardSettings,
    notifier: SharedNotifier,
}

pub type SharedSession = Arc<Mutex<Session>>;

impl Session {
    pub fn new(
        lots: Vec<Lot>,
        catalog: Vec<CatalogItem>,
        settings: BoardSettings,
        clock: SharedClock,
        notifier: SharedNotifier,
    ) -> Result<Self, BoardError> {
        Ok(Self {
            board: AuctionBoard::new(lots, settings, clock, notifier.clone())?,
            catalog,
            profile: Profile::default(),
            preferences: NotificationPreferences::default(),
            settings,
            notifier,
        })
    }

    pub fn new_shared(
        lots: Vec<Lot>,
        catalog: Vec<CatalogItem>,
        settings: BoardSettings,
        clock: SharedClock,
        notifier: SharedNotifier,
    ) -> Result<SharedSession, BoardError> {
        Ok(Arc::new(Mutex::new(Self::new(
            lots, catalog, settings, clock, notifier,
        )?)))
    }

    pub fn search_catalog(&self, query: &CatalogQuery) -> Vec<&CatalogItem> {
        query.apply(&self.catalog)
    }

    pub fn search_lots(&self, query: &CatalogQuery) -> Vec<&Lot> {
        query.apply(self.board.lots())
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn save_profile(&mut self, profile: Profile) {
        info!(name = %profile.name, "profile saved");
        self.profile = profile;
        self.notifier
            .notify(Notification::profile_saved(self.settings.locale));
    }

    pub fn notification_preferences(&self) -> NotificationPreferences {
        self.preferences
    }

    pub fn save_notification_preferences(&mut self, preferences: NotificationPreferences) {
        info!(?preferences, "notification preferences saved");
        self.preferences = preferences;
        self.notifier
            .notify(Notification::preferences_saved(self.settings.locale));
    }
}
