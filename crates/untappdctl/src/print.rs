//! Human-readable and JSON output
//!
//! Tables go to stdout with columns padded to their widest cell, so output
//! can be piped into other tools. Logs never go through here.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use untappd::{Badge, Beer, Brewery, Checkin, User, Venue};

const COLUMN_GAP: usize = 2;

/// Column-aligned text table
#[derive(Debug, Default)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: &[&str]) -> Self {
        Self {
            rows: vec![header.iter().map(ToString::to_string).collect()],
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn write_to(&self, out: &mut impl Write) -> std::io::Result<()> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0; columns];
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        for row in &self.rows {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                line.push_str(cell);
                if i + 1 < row.len() {
                    let pad = widths[i] - cell.chars().count() + COLUMN_GAP;
                    line.extend(std::iter::repeat(' ').take(pad));
                }
            }
            writeln!(out, "{line}")?;
        }

        Ok(())
    }
}

/// Writes results either as tables or as JSON
pub struct Printer<W: Write> {
    out: W,
    json: bool,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit<T: Serialize + ?Sized>(&mut self, value: &T, table: impl FnOnce() -> Table) -> Result<()> {
        if self.json {
            serde_json::to_writer_pretty(&mut self.out, value)?;
            writeln!(self.out)?;
        } else {
            table().write_to(&mut self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// `info` adds checkin, badge and beer totals
    pub fn users(&mut self, users: &[User], info: bool) -> Result<()> {
        self.emit(users, || {
            let mut header = vec!["ID", "UserName", "Name"];
            if info {
                header.extend(["Checkins", "Badges", "Beers"]);
            }

            let mut table = Table::new(&header);
            for user in users {
                let mut row = vec![
                    user.uid.to_string(),
                    user.user_name.clone(),
                    format!("{} {}", user.first_name, user.last_name).trim().to_string(),
                ];
                if info {
                    row.extend([
                        user.stats.checkins.to_string(),
                        user.stats.badges.to_string(),
                        user.stats.beers.to_string(),
                    ]);
                }
                table.row(row);
            }
            table
        })
    }

    /// Badge levels are listed after their badge
    pub fn badges(&mut self, badges: &[Badge]) -> Result<()> {
        self.emit(badges, || {
            let mut table = Table::new(&["ID", "Name", "Earned", "CheckinID"]);
            let mut add = |badge: &Badge| {
                table.row(vec![
                    badge.id.to_string(),
                    badge.name.clone(),
                    badge
                        .earned
                        .map(|t| t.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                    badge.checkin_id.to_string(),
                ]);
            };
            for badge in badges {
                add(badge);
                badge.levels.iter().for_each(&mut add);
            }
            table
        })
    }

    pub fn beers(&mut self, beers: &[Beer]) -> Result<()> {
        self.emit(beers, || {
            let mut table = Table::new(&["ID", "Name", "Brewery", "Style", "ABV", "IBU"]);
            for beer in beers {
                table.row(vec![
                    beer.id.to_string(),
                    beer.name.clone(),
                    beer.brewery.as_ref().map(|b| b.name.clone()).unwrap_or_default(),
                    beer.style.clone(),
                    format!("{:.1}", beer.abv),
                    format!("{:03}", beer.ibu),
                ]);
            }
            table
        })
    }

    pub fn breweries(&mut self, breweries: &[Brewery]) -> Result<()> {
        self.emit(breweries, || {
            let mut table = Table::new(&["ID", "Name", "Location", "Country", "Type"]);
            for brewery in breweries {
                table.row(vec![
                    brewery.id.to_string(),
                    brewery.name.clone(),
                    place(&brewery.location.city, &brewery.location.state),
                    brewery.country.clone(),
                    brewery.brewery_type.clone(),
                ]);
            }
            table
        })
    }

    pub fn venues(&mut self, venues: &[Venue]) -> Result<()> {
        self.emit(venues, || {
            let mut table = Table::new(&["ID", "Name", "Category", "Location", "Address"]);
            for venue in venues {
                table.row(vec![
                    venue.id.to_string(),
                    venue.name.clone(),
                    venue.category.clone(),
                    place(&venue.location.city, &venue.location.state),
                    venue.location.address.clone(),
                ]);
            }
            table
        })
    }

    pub fn checkins(&mut self, checkins: &[Checkin]) -> Result<()> {
        self.emit(checkins, || {
            let mut table = Table::new(&[
                "ID", "Created", "User", "Beer", "Brewery", "Venue", "Rating",
            ]);
            for checkin in checkins {
                table.row(vec![
                    checkin.id.to_string(),
                    checkin
                        .created
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default(),
                    checkin.user.user_name.clone(),
                    checkin.beer.name.clone(),
                    checkin.brewery.name.clone(),
                    checkin.venue.as_ref().map(|v| v.name.clone()).unwrap_or_default(),
                    checkin.user_rating.map(|r| format!("{r:.2}")).unwrap_or_default(),
                ]);
            }
            table
        })
    }

    /// A single line of text, or `{"key": value}` in JSON mode
    pub fn message(&mut self, key: &str, value: &str) -> Result<()> {
        if self.json {
            let mut object = serde_json::Map::new();
            object.insert(key.to_string(), value.into());
            serde_json::to_writer(&mut self.out, &object)?;
            writeln!(self.out)?;
        } else {
            writeln!(self.out, "{key}: {value}")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

fn place(city: &str, state: &str) -> String {
    match (city.is_empty(), state.is_empty()) {
        (false, false) => format!("{city}, {state}"),
        (false, true) => city.to_string(),
        _ => state.to_string(),
    }
}
