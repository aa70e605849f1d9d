//! One user's browsing session.
//!
//! The session owns the favourites store above routing, so saved listings
//! survive moving between the listing and detail pages. Events are applied
//! one at a time and each is complete before `handle` returns.

use crate::dataset::Dataset;
use crate::detail::{DetailState, DetailTab};
use crate::error::CriteriaError;
use crate::favourites::{AddOutcome, FavouritesStore};
use crate::models::{PropertyId, PropertyRecord};
use crate::search::{self, SearchForm};
use crate::transfer::{TransferPayload, Zone};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Listing,
    Detail(DetailState),
}

/// A discrete user interaction
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Search(SearchForm),
    ResetSearch,
    AddFavourite(PropertyId),
    RemoveFavourite(PropertyId),
    ClearFavourites,
    DragStart(TransferPayload),
    Drop(Zone),
    Open(PropertyId),
    Back,
    SelectImage(usize),
    SelectTab(DetailTab),
}

/// What the view should tell the user after an event
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Results(usize),
    NoPropertiesFound,
    InvalidCriteria(CriteriaError),
    AddedToFavourites(PropertyId),
    AlreadyInFavourites(PropertyId),
    RemovedFromFavourites(PropertyId),
    NotInFavourites(PropertyId),
    FavouritesCleared,
    DragStarted(TransferPayload),
    NothingDragged,
    DropIgnored,
    PropertyNotFound(PropertyId),
    Opened(PropertyId),
    BackToListing,
    ImageSelected(usize),
    NoSuchImage(usize),
    TabSelected(DetailTab),
    NotOnDetailPage,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Results(count) => write!(f, "{count} properties found"),
            Notice::NoPropertiesFound => f.write_str("No properties found"),
            Notice::InvalidCriteria(err) => write!(f, "Invalid search: {err}"),
            Notice::AddedToFavourites(_) => f.write_str("Added to favourites"),
            Notice::AlreadyInFavourites(_) => {
                f.write_str("This property is already in your favourites")
            }
            Notice::RemovedFromFavourites(_) => f.write_str("Removed from favourites"),
            Notice::NotInFavourites(id) => write!(f, "Property {id} is not in your favourites"),
            Notice::FavouritesCleared => f.write_str("Favourites cleared"),
            Notice::DragStarted(payload) => {
                write!(f, "Dragging {} from {}", payload.id, payload.source)
            }
            Notice::NothingDragged => f.write_str("Nothing is being dragged"),
            Notice::DropIgnored => f.write_str("Dropped back where it started"),
            Notice::PropertyNotFound(id) => write!(f, "Property not found: {id}"),
            Notice::Opened(id) => write!(f, "Viewing property {id}"),
            Notice::BackToListing => f.write_str("Back to search"),
            Notice::ImageSelected(index) => write!(f, "Showing image {}", index + 1),
            Notice::NoSuchImage(index) => write!(f, "There is no image {}", index + 1),
            Notice::TabSelected(tab) => write!(f, "{tab} tab"),
            Notice::NotOnDetailPage => f.write_str("Open a property first"),
        }
    }
}

#[derive(Debug)]
pub struct Session {
    dataset: Dataset,
    favourites: FavouritesStore,
    results: Vec<Arc<PropertyRecord>>,
    route: Route,
    dragging: Option<TransferPayload>,
}

impl Session {
    /// Start on the listing page showing every property
    pub fn new(dataset: Dataset) -> Self {
        let results = dataset.records().to_vec();
        Self {
            dataset,
            favourites: FavouritesStore::new(),
            results,
            route: Route::Listing,
            dragging: None,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn favourites(&self) -> &FavouritesStore {
        &self.favourites
    }

    pub fn results(&self) -> &[Arc<PropertyRecord>] {
        &self.results
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn dragging(&self) -> Option<&TransferPayload> {
        self.dragging.as_ref()
    }

    pub fn handle(&mut self, event: Event) -> Notice {
        debug!("Handling {:?}", event);
        match event {
            Event::Search(form) => self.search(&form),
            Event::ResetSearch => {
                self.results = self.dataset.records().to_vec();
                self.results_notice()
            }
            Event::AddFavourite(id) => self.favourite(&id),
            Event::RemoveFavourite(id) => self.unfavourite(&id),
            Event::ClearFavourites => {
                self.favourites.clear();
                Notice::FavouritesCleared
            }
            Event::DragStart(payload) => {
                self.dragging = Some(payload.clone());
                Notice::DragStarted(payload)
            }
            Event::Drop(target) => self.drop_onto(target),
            Event::Open(id) => self.open(&id),
            Event::Back => {
                self.route = Route::Listing;
                Notice::BackToListing
            }
            Event::SelectImage(index) => match &mut self.route {
                Route::Detail(DetailState::Found(view)) => {
                    if view.select_image(index) {
                        Notice::ImageSelected(index)
                    } else {
                        Notice::NoSuchImage(index)
                    }
                }
                _ => Notice::NotOnDetailPage,
            },
            Event::SelectTab(tab) => match &mut self.route {
                Route::Detail(DetailState::Found(view)) => {
                    view.select_tab(tab);
                    Notice::TabSelected(tab)
                }
                _ => Notice::NotOnDetailPage,
            },
        }
    }

    fn search(&mut self, form: &SearchForm) -> Notice {
        match search::search(self.dataset.records(), form) {
            Ok(results) => {
                self.results = results;
                self.results_notice()
            }
            Err(err) => {
                warn!("Rejected search: {}", err);
                Notice::InvalidCriteria(err)
            }
        }
    }

    fn results_notice(&self) -> Notice {
        if self.results.is_empty() {
            Notice::NoPropertiesFound
        } else {
            Notice::Results(self.results.len())
        }
    }

    /// Shared by the add button and a drop onto the favourites zone
    fn favourite(&mut self, id: &PropertyId) -> Notice {
        let Some(record) = self.dataset.find(id) else {
            return Notice::PropertyNotFound(id.clone());
        };

        match self.favourites.add(Arc::clone(record)) {
            AddOutcome::Added => {
                info!("⭐ Saved property {}", id);
                Notice::AddedToFavourites(id.clone())
            }
            AddOutcome::Duplicate => Notice::AlreadyInFavourites(id.clone()),
        }
    }

    fn unfavourite(&mut self, id: &PropertyId) -> Notice {
        if self.favourites.remove(id) {
            Notice::RemovedFromFavourites(id.clone())
        } else {
            Notice::NotInFavourites(id.clone())
        }
    }

    fn drop_onto(&mut self, target: Zone) -> Notice {
        let Some(payload) = self.dragging.take() else {
            return Notice::NothingDragged;
        };

        match (payload.source, target) {
            (Zone::Results, Zone::Favourites) => self.favourite(&payload.id),
            (Zone::Favourites, Zone::Results) => self.unfavourite(&payload.id),
            _ => Notice::DropIgnored,
        }
    }

    fn open(&mut self, id: &PropertyId) -> Notice {
        let state = DetailState::lookup(&self.dataset, id);
        let notice = match &state {
            DetailState::Found(_) => Notice::Opened(id.clone()),
            DetailState::NotFound(_) => Notice::PropertyNotFound(id.clone()),
        };
        self.route = Route::Detail(state);
        notice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let dataset = Dataset::from_json_str(
            r#"[
                { "id": "a", "type": "House", "price": 300000, "bedrooms": 3,
                  "images": ["a1.jpg", "a2.jpg"], "dateAdded": "2023-01-01" },
                { "id": "b", "type": "Flat", "price": 150000, "bedrooms": 1,
                  "dateAdded": "2023-02-01" }
            ]"#,
        )
        .unwrap();
        Session::new(dataset)
    }

    fn favourite_ids(session: &Session) -> Vec<String> {
        session.favourites().iter().map(|r| r.id.to_string()).collect()
    }

    fn drag(id: &str, source: Zone) -> TransferPayload {
        TransferPayload::new(PropertyId::from(id), source)
    }

    #[test]
    fn starts_on_listing_with_everything_visible() {
        let session = session();
        assert_eq!(session.route(), &Route::Listing);
        assert_eq!(session.results().len(), 2);
        assert!(session.favourites().is_empty());
    }

    #[test]
    fn invalid_search_keeps_previous_results() {
        let mut session = session();
        let form = SearchForm {
            bedrooms: "many".to_string(),
            ..SearchForm::unbounded()
        };
        let notice = session.handle(Event::Search(form));
        assert!(matches!(notice, Notice::InvalidCriteria(CriteriaError::MalformedBedrooms(_))));
        assert_eq!(session.results().len(), 2);
    }

    #[test]
    fn empty_search_is_reported_and_reset_restores() {
        let mut session = session();
        let form = SearchForm {
            property_type: "Bungalow".to_string(),
            ..SearchForm::unbounded()
        };
        assert_eq!(session.handle(Event::Search(form)), Notice::NoPropertiesFound);
        assert!(session.results().is_empty());

        assert_eq!(session.handle(Event::ResetSearch), Notice::Results(2));
    }

    #[test]
    fn favourites_survive_navigation() {
        let mut session = session();
        session.handle(Event::AddFavourite(PropertyId::from("a")));
        session.handle(Event::Open(PropertyId::from("b")));
        session.handle(Event::AddFavourite(PropertyId::from("b")));
        session.handle(Event::Back);

        assert_eq!(favourite_ids(&session), ["a", "b"]);
    }

    #[test]
    fn drag_out_of_favourites_removes() {
        let mut session = session();
        session.handle(Event::AddFavourite(PropertyId::from("a")));
        session.handle(Event::DragStart(drag("a", Zone::Favourites)));

        assert_eq!(
            session.handle(Event::Drop(Zone::Results)),
            Notice::RemovedFromFavourites(PropertyId::from("a"))
        );
        assert!(session.favourites().is_empty());
        assert!(session.dragging().is_none());
    }

    #[test]
    fn drop_within_same_zone_is_ignored() {
        let mut session = session();
        session.handle(Event::DragStart(drag("a", Zone::Results)));
        assert_eq!(session.handle(Event::Drop(Zone::Results)), Notice::DropIgnored);
        assert!(session.favourites().is_empty());
    }

    #[test]
    fn drop_without_drag_does_nothing() {
        let mut session = session();
        assert_eq!(session.handle(Event::Drop(Zone::Favourites)), Notice::NothingDragged);
    }

    #[test]
    fn dropping_an_unknown_id_is_not_found() {
        let mut session = session();
        session.handle(Event::DragStart(drag("ghost", Zone::Results)));
        assert_eq!(
            session.handle(Event::Drop(Zone::Favourites)),
            Notice::PropertyNotFound(PropertyId::from("ghost"))
        );
    }

    #[test]
    fn gallery_and_tabs_need_a_detail_page() {
        let mut session = session();
        assert_eq!(session.handle(Event::SelectImage(0)), Notice::NotOnDetailPage);
        assert_eq!(session.handle(Event::SelectTab(DetailTab::Map)), Notice::NotOnDetailPage);

        session.handle(Event::Open(PropertyId::from("a")));
        assert_eq!(session.handle(Event::SelectImage(1)), Notice::ImageSelected(1));
        assert_eq!(session.handle(Event::SelectImage(5)), Notice::NoSuchImage(5));

        let Route::Detail(DetailState::Found(view)) = session.route() else {
            panic!("expected detail page");
        };
        assert_eq!(view.main_image(), "a2.jpg");
    }

    #[test]
    fn opening_unknown_id_shows_placeholder() {
        let mut session = session();
        let notice = session.handle(Event::Open(PropertyId::from("zzz")));
        assert_eq!(notice, Notice::PropertyNotFound(PropertyId::from("zzz")));
        assert_eq!(
            session.route(),
            &Route::Detail(DetailState::NotFound(PropertyId::from("zzz")))
        );
        assert_eq!(session.handle(Event::SelectImage(0)), Notice::NotOnDetailPage);
    }
}
