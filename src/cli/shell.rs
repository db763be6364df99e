//! Interactive catalog session
//!
//! Likes only live as long as the shell does. View options change with each
//! command and the view is redrawn on `list`.

use anyhow::{bail, Result};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use tracing::debug;

use super::render::view_text;
use crate::models::{GroupBy, Session, SortBy, ViewOptions};
use crate::stores::{CatalogEvent, CatalogStore, SubscriptionId};
use crate::utils::dates::parse_duration;

const HELP: &str = "\
commands:
  list | view                   show the current view
  search [text]                 filter by text, empty clears
  group <none|album|artist>     group the view
  albums | artists | songs      shortcuts for grouping
  filter <all|liked|recent|longest|shortest>
  sortby <title|artist|album|duration>
  order <asc|desc>
  like <id>                     like or unlike a track
  liked                         list liked titles
  add <title> | <artist> | <album> | <M:SS>
  delete <id>
  sort <title|artist|album|duration>   reorder the catalog, flipping order each time
  albumlist                     album names in catalog order
  help
  quit | exit";

/// Run the shell on stdin until `quit` or end of input
pub fn run(catalog: &mut CatalogStore, session: &Session, defaults: ViewOptions) -> Result<()> {
    let mut shell = Shell::new(catalog, defaults);
    println!(
        "Signed in as {} ({}), type 'help' for commands",
        session.email,
        shell.catalog.role()
    );

    for warning in shell.catalog.take_warnings() {
        println!("warning: {}", warning);
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut line = String::new();

    loop {
        print!("yapple> ");
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match shell.execute(&line) {
            Ok(Some(output)) => {
                if !output.is_empty() {
                    println!("{}", output);
                }
            }
            Ok(None) => break,
            Err(e) => println!("error: {}", e),
        }
    }

    Ok(())
}

/// Shell state over a borrowed catalog
pub struct Shell<'a> {
    catalog: &'a mut CatalogStore,
    options: ViewOptions,
    toasts: Rc<RefCell<Vec<String>>>,
    subscription: SubscriptionId,
}

impl<'a> Shell<'a> {
    pub fn new(catalog: &'a mut CatalogStore, options: ViewOptions) -> Self {
        let toasts = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&toasts);
        let subscription = catalog.subscribe(move |event| {
            if let Some(text) = toast(event) {
                sink.borrow_mut().push(text);
            }
        });

        Self {
            catalog,
            options,
            toasts,
            subscription,
        }
    }

    /// Run one line of input
    ///
    /// Returns `None` when the shell should exit.
    pub fn execute(&mut self, line: &str) -> Result<Option<String>> {
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map(|(c, r)| (c, r.trim()))
            .unwrap_or((line, ""));
        debug!("shell command '{}' args '{}'", command, rest);

        let mut out = match command {
            "" => String::new(),
            "quit" | "exit" => return Ok(None),
            "help" => HELP.to_string(),
            "list" | "view" => self.view(),
            "search" => {
                self.options.search_text = rest.to_string();
                self.view()
            }
            "group" => {
                self.options.group_by = rest.parse()?;
                self.view()
            }
            "albums" => self.set_group(GroupBy::Album),
            "artists" => self.set_group(GroupBy::Artist),
            "songs" => self.set_group(GroupBy::None),
            "filter" => {
                self.options.filter_by = rest.parse()?;
                self.view()
            }
            "sortby" => {
                self.options.sort_by = rest.parse()?;
                self.view()
            }
            "order" => {
                self.options.sort_order = rest.parse()?;
                self.view()
            }
            "like" => {
                let id = parse_id(rest)?;
                self.catalog.toggle_like(id)?;
                String::new()
            }
            "liked" => {
                let titles = self.catalog.liked_titles();
                if titles.is_empty() {
                    "No liked songs".to_string()
                } else {
                    titles.join("\n")
                }
            }
            "add" => {
                let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
                let [title, artist, album, duration] = parts.as_slice() else {
                    bail!("usage: add <title> | <artist> | <album> | <M:SS>");
                };
                self.catalog.require_admin("add tracks")?;
                let duration_secs = parse_duration(duration)?;
                self.catalog.add(title, artist, album, duration_secs)?;
                String::new()
            }
            "delete" => {
                let id = parse_id(rest)?;
                if self.catalog.delete(id)?.is_none() {
                    format!("No track with id {}", id)
                } else {
                    String::new()
                }
            }
            "sort" => {
                let by: SortBy = if rest.is_empty() {
                    SortBy::Title
                } else {
                    rest.parse()?
                };
                // the shown view follows the catalog's new order
                self.options.sort_order = self.catalog.toggle_sort(by);
                self.options.sort_by = by;
                String::new()
            }
            "albumlist" => self.catalog.albums().join("\n"),
            other => bail!("unknown command '{}', try 'help'", other),
        };

        for warning in self.catalog.take_warnings() {
            self.toasts.borrow_mut().push(format!("warning: {}", warning));
        }
        let toasts: Vec<String> = self.toasts.borrow_mut().drain(..).collect();
        for toast in toasts {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&toast);
        }

        Ok(Some(out))
    }

    fn set_group(&mut self, group_by: GroupBy) -> String {
        self.options.group_by = group_by;
        self.view()
    }

    fn view(&self) -> String {
        let rendered = self.catalog.render(&self.options);
        view_text(&rendered, self.catalog.likes())
    }
}

impl Drop for Shell<'_> {
    fn drop(&mut self) {
        self.catalog.unsubscribe(self.subscription);
    }
}

fn parse_id(text: &str) -> Result<u64> {
    match text.parse() {
        Ok(id) => Ok(id),
        Err(_) => bail!("expected a track id, got '{}'", text),
    }
}

/// Short notice for a catalog event
fn toast(event: &CatalogEvent) -> Option<String> {
    match event {
        CatalogEvent::TrackAdded(track) => Some(format!(
            "Added \"{}\" by {} as #{}",
            track.title, track.artist, track.id
        )),
        CatalogEvent::TrackDeleted(track) => Some(format!("Removed \"{}\"", track.title)),
        CatalogEvent::LikedChanged(titles) if titles.is_empty() => {
            Some("No liked songs".to_string())
        }
        CatalogEvent::LikedChanged(titles) => Some(format!("Liked: {}", titles.join(", "))),
        CatalogEvent::Sorted { sort_by, order } => {
            Some(format!("Sorted by {} ({})", sort_by, order))
        }
        // reported through take_warnings
        CatalogEvent::PersistenceWarning(_) => None,
    }
}
