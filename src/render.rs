//! The invoice renderers.
//!
//! Four entry points draw onto a shared [`PageSurface`], in a fixed caller
//! order: [`render_parties`], then [`render_tasks`] (capturing the returned
//! total), then [`render_total`], then [`render_promo`].  Each call starts
//! from the cursor state the previous one left behind.

use log::{debug, warn};

use crate::model::{Party, TaskList};
use crate::surface::{Cursor, Direction, PageSurface, SurfaceError, TextStyle, WriteRequest};
use crate::text::shorten;

/// Billing rate applied to every task, in CZK per hour.
pub const HOURLY_RATE_CZK: f64 = 500.0;

/// Task links point into the ClickUp tracker.
pub const TRACKER_TASK_URL: &str = "https://app.clickup.com/t/";

const TASK_NAME_LIMIT: usize = 40;
const HOURS_COLUMN_INSET: f64 = 180.0;
const COST_COLUMN_INSET: f64 = 100.0;
const FOOTER_RISE: f64 = 50.0;
const MS_PER_HOUR: f64 = 3_600_000.0;

const PROMO_TEXT: &str = "Powered by Artem Prokop";
const PROMO_URL: &str = "https://github.com/ExposedCat";

/// Converts tracked milliseconds into billable hours, rounded to two decimal
/// places.  Negative time bills as zero.
fn billable_hours(time_ms: i64) -> f64 {
    if time_ms < 0 {
        warn!("negative tracked time {time_ms} ms clamped to zero");
        return 0.0;
    }
    (time_ms as f64 / MS_PER_HOUR * 100.0).round() / 100.0
}

/// Writes one party's address block at the current cursor, flowing downwards.
///
/// Candidate rows for the optional tax identifiers are filtered out before
/// the batch is issued, so an absent field contributes no row at all.
fn render_party(surface: &mut dyn PageSurface, party: &Party) -> Result<(), SurfaceError> {
    let lines: Vec<WriteRequest> = [
        Some(WriteRequest::new(party.name()).with_style(TextStyle::Header)),
        Some(WriteRequest::new(party.address()).with_style(TextStyle::SubHeader)),
        Some(WriteRequest::new(party.country())),
        Some(WriteRequest::new(party.postal_code())),
        party.ico().map(|ico| WriteRequest::new(format!("ICO: {ico}"))),
        party.dic().map(|dic| WriteRequest::new(format!("DIC: {dic}"))),
    ]
    .into_iter()
    .flatten()
    .collect();

    surface.bulk_write(Direction::Vertical, &lines)
}

/// Draws the sender block at the current cursor and the recipient block in a
/// second column starting at the page's horizontal midpoint, at page top.
///
/// Afterwards the cursor is restored to where it was on entry and advanced
/// three blank lines, so neither block's height affects what follows.
pub fn render_parties(
    surface: &mut dyn PageSurface,
    from: &Party,
    to: &Party,
) -> Result<(), SurfaceError> {
    let first_column = surface.cursor();

    render_party(surface, from)?;

    let midpoint = surface.width() / 2.0;
    surface.move_to(midpoint, 0.0, false)?;
    render_party(surface, to)?;

    surface.restore_cursor(first_column)?;
    surface.new_line(3)
}

/// Draws the task table and returns the accumulated total in CZK.
///
/// The table is written in three column passes, each iterating the tasks in
/// insertion order from the vertical position recorded at entry: linked
/// labels, then right-aligned hours, then right-aligned costs.  The fixed
/// insets keep the columns aligned without any layout engine; per-row hours
/// are rounded before the rate is applied so the printed cost always matches
/// the printed hours.
pub fn render_tasks(surface: &mut dyn PageSurface, tasks: &TaskList) -> Result<f64, SurfaceError> {
    let table_origin = surface.cursor();

    for (id, task) in tasks.iter() {
        let label = format!("[{id}] {}", shorten(task.name(), TASK_NAME_LIMIT));
        let request = WriteRequest::new(label).with_url(format!("{TRACKER_TASK_URL}{id}"));
        surface.write(Direction::Vertical, &request)?;
    }

    let hours_column = surface.width() - HOURS_COLUMN_INSET;
    surface.move_to(hours_column, table_origin.y, true)?;
    for (_, task) in tasks.iter() {
        let hours = billable_hours(task.time_ms());
        surface.write(Direction::Vertical, &WriteRequest::new(format!("{hours}h")))?;
    }

    let cost_column = surface.width() - COST_COLUMN_INSET;
    surface.move_to(cost_column, table_origin.y, true)?;
    let mut total = 0.0;
    for (_, task) in tasks.iter() {
        let cost = billable_hours(task.time_ms()) * HOURLY_RATE_CZK;
        total += cost;
        surface.write(Direction::Vertical, &WriteRequest::new(format!("{cost} CZK")))?;
    }

    let Cursor { y, .. } = surface.cursor();
    surface.move_to(hours_column, y, true)?;
    surface.new_line(3)?;

    debug!("rendered {} task rows, total {total} CZK", tasks.len());
    Ok(total)
}

/// Writes the emphasized total line.  The value is caller-supplied and is
/// expected to be the one returned by [`render_tasks`].
pub fn render_total(surface: &mut dyn PageSurface, total: f64) -> Result<(), SurfaceError> {
    let request = WriteRequest::new(format!("Total: {total} CZK")).with_style(TextStyle::SubHeader);
    surface.write(Direction::Vertical, &request)
}

/// Writes the attribution line anchored to the bottom-left of the page.
pub fn render_promo(surface: &mut dyn PageSurface) -> Result<(), SurfaceError> {
    surface.move_to(0.0, surface.height() - FOOTER_RISE, false)?;
    let request = WriteRequest::new(PROMO_TEXT).with_url(PROMO_URL);
    surface.write(Direction::Horizontal, &request)
}
