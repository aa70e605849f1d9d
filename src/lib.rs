pub mod command;
pub mod config;
pub mod dataset;
pub mod detail;
pub mod display;
pub mod error;
pub mod favourites;
pub mod models;
pub mod search;
pub mod session;
pub mod transfer;

pub use dataset::{Dataset, DatasetSource};
pub use favourites::{AddOutcome, FavouritesStore};
pub use models::{Price, PropertyId, PropertyRecord, PropertyType};
pub use search::{filter, search, SearchCriteria, SearchForm};
pub use session::{Event, Notice, Route, Session};
