// Textual rendering of itinerary set differences
use std::io::{self, Write};

use tracing::info;

use crate::config::{DiffConfig, ReturnPolicy};
use crate::format::{format_amount, format_cost_diff, format_datetime_with_diff, format_time};
use crate::itinerary::{Flight, Itinerary};
use crate::matcher::{match_itineraries, ItineraryChange};

const FLIGHT_INDENT: &str = "    ";
const SINGLE_FLIGHT_INDENT: &str = "  ";

// Counts of what a diff run reported
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffSummary {
    pub unchanged: usize,
    pub changed: usize,
    pub removed: usize,
    pub added: usize,
}

impl DiffSummary {
    pub fn has_differences(&self) -> bool {
        self.changed + self.removed + self.added > 0
    }
}

fn return_indent(flights: &[Flight]) -> &'static str {
    if flights.len() > 1 {
        FLIGHT_INDENT
    } else {
        SINGLE_FLIGHT_INDENT
    }
}

pub struct DiffRenderer {
    config: DiffConfig,
}

impl DiffRenderer {
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    /// Matches `old` against `new` and writes the full diff to `out`.
    pub fn render_sets(
        &self,
        out: &mut impl Write,
        old: &[Itinerary],
        new: &[Itinerary],
    ) -> io::Result<DiffSummary> {
        let changes = match_itineraries(old, new, self.config.return_policy);
        self.render(out, &changes)
    }

    pub fn render(
        &self,
        out: &mut impl Write,
        changes: &[ItineraryChange<'_>],
    ) -> io::Result<DiffSummary> {
        let mut summary = DiffSummary::default();

        for change in changes {
            match *change {
                ItineraryChange::Matched { old, new } => {
                    if old == new {
                        summary.unchanged += 1;
                    } else {
                        summary.changed += 1;
                    }
                    self.render_matched(out, old, new)?;
                }
                ItineraryChange::Removed(itinerary) => {
                    summary.removed += 1;
                    self.render_itinerary(out, '-', itinerary)?;
                }
                ItineraryChange::Added(itinerary) => {
                    summary.added += 1;
                    self.render_itinerary(out, '+', itinerary)?;
                }
            }
        }

        info!(
            unchanged = summary.unchanged,
            changed = summary.changed,
            removed = summary.removed,
            added = summary.added,
            "itinerary diff rendered"
        );
        Ok(summary)
    }

    fn render_flight(&self, out: &mut impl Write, indent: &str, flight: &Flight) -> io::Result<()> {
        writeln!(
            out,
            "{indent}{} --> {} #{} ({} - {})",
            flight.source,
            flight.destination,
            flight.number,
            format_time(flight.departure_time),
            format_time(flight.arrival_time)
        )
    }

    fn render_flight_diff(
        &self,
        out: &mut impl Write,
        indent: &str,
        old: &Flight,
        new: &Flight,
    ) -> io::Result<()> {
        writeln!(
            out,
            "{indent}{} --> {} #{} ({} - {})",
            new.source,
            new.destination,
            new.number,
            format_datetime_with_diff(new.departure_time, old.departure_time),
            format_datetime_with_diff(new.arrival_time, old.arrival_time)
        )
    }

    fn render_flights(
        &self,
        out: &mut impl Write,
        indent: &str,
        flights: &[Flight],
    ) -> io::Result<()> {
        for flight in flights {
            self.render_flight(out, indent, flight)?;
        }
        Ok(())
    }

    // Removed or added itinerary, shown in full without any deltas
    fn render_itinerary(
        &self,
        out: &mut impl Write,
        sign: char,
        itinerary: &Itinerary,
    ) -> io::Result<()> {
        let times = format!(
            "({} - {})",
            format_time(itinerary.departure_time),
            format_time(itinerary.arrival_time)
        );

        if itinerary.is_direct() {
            writeln!(
                out,
                "{sign} {} --> {} #{} {times}",
                itinerary.source, itinerary.destination, itinerary.onward_flights[0].number
            )?;
        } else {
            writeln!(
                out,
                "{sign} {} --> {} {times}:",
                itinerary.source, itinerary.destination
            )?;
            if !itinerary.is_one_way() {
                writeln!(out, "  onward:")?;
            }
            self.render_flights(out, FLIGHT_INDENT, &itinerary.onward_flights)?;
        }

        if !itinerary.is_one_way() {
            writeln!(out, "  return:")?;
            let indent = return_indent(&itinerary.return_flights);
            self.render_flights(out, indent, &itinerary.return_flights)?;
        }

        writeln!(
            out,
            "  cost: {} {}",
            format_amount(itinerary.cost),
            itinerary.currency
        )?;
        writeln!(out)
    }

    fn render_matched(&self, out: &mut impl Write, old: &Itinerary, new: &Itinerary) -> io::Result<()> {
        let times = format!(
            "({} - {})",
            format_datetime_with_diff(new.departure_time, old.departure_time),
            format_datetime_with_diff(new.arrival_time, old.arrival_time)
        );

        if old.is_direct() {
            writeln!(
                out,
                "~ {} --> {} #{} {times}",
                new.source, new.destination, new.onward_flights[0].number
            )?;
        } else {
            writeln!(out, "~ {} --> {} {times}:", new.source, new.destination)?;
            let has_returns = match self.config.return_policy {
                ReturnPolicy::Strict => !old.is_one_way(),
                ReturnPolicy::Lenient => !old.is_one_way() || !new.is_one_way(),
            };
            if has_returns {
                writeln!(out, "  onward:")?;
            }
            for (old_flight, new_flight) in old.onward_flights.iter().zip(&new.onward_flights) {
                self.render_flight_diff(out, FLIGHT_INDENT, old_flight, new_flight)?;
            }
        }

        match self.config.return_policy {
            ReturnPolicy::Strict => {
                self.render_return_diff_strict(out, &old.return_flights, &new.return_flights)?
            }
            ReturnPolicy::Lenient => {
                self.render_return_diff_lenient(out, &old.return_flights, &new.return_flights)?
            }
        }

        let cost_diff = format_cost_diff(new.cost, old.cost);
        if cost_diff.is_empty() {
            writeln!(out, "  cost: {} {}", format_amount(new.cost), new.currency)?;
        } else {
            writeln!(
                out,
                "  cost: {} {} {cost_diff}",
                format_amount(new.cost),
                new.currency
            )?;
        }
        writeln!(out)
    }

    // Return sequences already have equal flight numbers here
    fn render_return_diff_strict(
        &self,
        out: &mut impl Write,
        old: &[Flight],
        new: &[Flight],
    ) -> io::Result<()> {
        if old.is_empty() {
            return Ok(());
        }
        writeln!(out, "  return:")?;
        let indent = return_indent(old);
        for (old_flight, new_flight) in old.iter().zip(new) {
            self.render_flight_diff(out, indent, old_flight, new_flight)?;
        }
        Ok(())
    }

    fn render_return_diff_lenient(
        &self,
        out: &mut impl Write,
        old: &[Flight],
        new: &[Flight],
    ) -> io::Result<()> {
        match (old.is_empty(), new.is_empty()) {
            (true, true) => Ok(()),
            (false, true) => {
                writeln!(out, "- return:")?;
                self.render_flights(out, return_indent(old), old)
            }
            (true, false) => {
                writeln!(out, "+ return:")?;
                self.render_flights(out, return_indent(new), new)
            }
            (false, false) => {
                writeln!(out, "  return:")?;
                for (index, old_flight) in old.iter().enumerate() {
                    match new.get(index) {
                        Some(new_flight) if new_flight.number == old_flight.number => {
                            self.render_flight_diff(out, FLIGHT_INDENT, old_flight, new_flight)?;
                        }
                        Some(new_flight) => {
                            self.render_flight(out, "  - ", old_flight)?;
                            self.render_flight(out, "  + ", new_flight)?;
                        }
                        None => self.render_flight(out, "  - ", old_flight)?,
                    }
                }
                for new_flight in new.iter().skip(old.len()) {
                    self.render_flight(out, "  + ", new_flight)?;
                }
                Ok(())
            }
        }
    }
}
