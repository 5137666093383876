//! Terminal presentation.
//!
//! The game draws into a `Canvas`; this module copies it to the terminal.
//! Rows are written in colour runs so a frame costs one command per colour
//! change rather than one per cell.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use pixel_defender::surface::Canvas;

/// Write one complete frame and flush.
pub fn present<W: Write>(out: &mut W, canvas: &Canvas) -> std::io::Result<()> {
    for row in 0..canvas.rows() {
        out.queue(cursor::MoveTo(0, row))?;

        let mut run = String::new();
        let mut run_color: Option<Color> = None;
        for cell in canvas.row(row) {
            if run_color != Some(cell.color) {
                flush_run(out, &mut run, run_color)?;
                run_color = Some(cell.color);
            }
            run.push(cell.ch);
        }
        flush_run(out, &mut run, run_color)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.flush()?;
    Ok(())
}

fn flush_run<W: Write>(out: &mut W, run: &mut String, color: Option<Color>) -> std::io::Result<()> {
    if run.is_empty() {
        return Ok(());
    }
    if let Some(color) = color {
        out.queue(style::SetForegroundColor(color))?;
    }
    out.queue(Print(run.as_str()))?;
    run.clear();
    Ok(())
}
