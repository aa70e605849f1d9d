//! Line commands for the interactive session.

use crate::config::PriceSlider;
use crate::detail::DetailTab;
use crate::error::CommandError;
use crate::models::PropertyId;
use crate::search::SearchForm;
use crate::session::Event;
use crate::transfer::{TransferPayload, Zone};

pub const HELP: &str = "\
Commands:
  search [type=T] [bedrooms=N|Any] [min=P] [max=P]   filter listings
  reset                                           show every listing again
  results                                         print current results
  fav add <id> | fav remove <id> | fav clear      manage favourites
  favs                                            print favourites
  drag <id> [results|favourites]                  pick up a listing
  drop [favourites|results]                       drop what you are dragging
  open <id> | back                                detail page / listing
  image <n> | tab <description|floorplan|map>     detail page controls
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Event(Event),
    ShowResults,
    ShowFavourites,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str, slider: &PriceSlider) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match verb {
        "search" => Command::Event(Event::Search(search_form(&rest, slider)?)),
        "reset" => Command::Event(Event::ResetSearch),
        "results" | "list" => Command::ShowResults,
        "favs" | "favourites" => Command::ShowFavourites,
        "fav" => match rest.as_slice() {
            ["add", id] => Command::Event(Event::AddFavourite(PropertyId::from(*id))),
            ["remove", id] => Command::Event(Event::RemoveFavourite(PropertyId::from(*id))),
            ["clear"] => Command::Event(Event::ClearFavourites),
            _ => return Err(CommandError::Usage("fav add <id> | fav remove <id> | fav clear")),
        },
        "drag" => match rest.as_slice() {
            [id] => {
                let payload = TransferPayload::decode(id, Zone::Results.tag())?;
                Command::Event(Event::DragStart(payload))
            }
            [id, zone] => Command::Event(Event::DragStart(TransferPayload::decode(id, zone)?)),
            _ => return Err(CommandError::Usage("drag <id> [results|favourites]")),
        },
        "drop" => match rest.as_slice() {
            [] => Command::Event(Event::Drop(Zone::Favourites)),
            [zone] => Command::Event(Event::Drop(zone.parse()?)),
            _ => return Err(CommandError::Usage("drop [favourites|results]")),
        },
        "open" | "show" => match rest.as_slice() {
            [id] => Command::Event(Event::Open(PropertyId::from(*id))),
            _ => return Err(CommandError::Usage("open <id>")),
        },
        "back" => Command::Event(Event::Back),
        "image" => match rest.as_slice() {
            [n] => {
                let index = n
                    .parse::<usize>()
                    .ok()
                    .and_then(|position| position.checked_sub(1))
                    .ok_or(CommandError::Usage("image <n> (1-based)"))?;
                Command::Event(Event::SelectImage(index))
            }
            _ => return Err(CommandError::Usage("image <n>")),
        },
        "tab" => {
            let name = rest.join(" ");
            let tab: DetailTab = name.parse()?;
            Command::Event(Event::SelectTab(tab))
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

/// Start from the form's initial state and override the given fields
fn search_form(args: &[&str], slider: &PriceSlider) -> Result<SearchForm, CommandError> {
    let mut form = SearchForm::with_slider(slider);

    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            return Err(CommandError::InvalidArgument(format!(
                "expected key=value, got {arg:?}"
            )));
        };
        match key {
            "type" => form.property_type = value.to_string(),
            "bedrooms" | "beds" => form.bedrooms = value.to_string(),
            "min" | "minPrice" => form.min_price = Some(value.to_string()),
            "max" | "maxPrice" => form.max_price = Some(value.to_string()),
            _ => {
                return Err(CommandError::InvalidArgument(format!(
                    "unknown search field {key:?}"
                )))
            }
        }
    }

    Ok(form)
}
