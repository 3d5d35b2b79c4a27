//! Rendering layer: all terminal I/O lives here.
//!
//! The simulation hands over a finished `Canvas`; this module only
//! translates it into terminal commands.  The play field sits inside a
//! one-cell border with a controls hint underneath.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use thunder::canvas::Canvas;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HINT: Color = Color::DarkGrey;

/// Top-left corner of the play field on the terminal.
const FIELD_ORIGIN: (u16, u16) = (1, 1);

// ── Public entry points ───────────────────────────────────────────────────────

/// Clear the screen and draw the static frame around the play field.
pub fn prepare<W: Write>(out: &mut W, canvas: &Canvas) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, canvas)?;
    draw_controls_hint(out, canvas)?;
    out.flush()
}

/// Copy the canvas onto the terminal, one colour run at a time.
pub fn render<W: Write>(out: &mut W, canvas: &Canvas) -> std::io::Result<()> {
    let (ox, oy) = FIELD_ORIGIN;

    // Every cell is rewritten each frame, so no clear (and no flicker).
    for y in 0..canvas.height() {
        out.queue(cursor::MoveTo(ox, oy + y))?;
        let mut current = None;
        for cell in canvas.row(y) {
            if current != Some(cell.color) {
                out.queue(style::SetForegroundColor(cell.color))?;
                current = Some(cell.color);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    // Cursor below the hint line
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, oy + canvas.height() + 2))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, canvas: &Canvas) -> std::io::Result<()> {
    let w = canvas.width() as usize;
    let (ox, oy) = FIELD_ORIGIN;
    let bottom = oy + canvas.height();

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(ox - 1, oy - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(ox - 1, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    // Side walls
    for row in oy..bottom {
        out.queue(cursor::MoveTo(ox - 1, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(ox + canvas.width(), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Controls hint (below the field) ───────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, canvas: &Canvas) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(FIELD_ORIGIN.0, FIELD_ORIGIN.1 + canvas.height() + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ ← → / W A S D : Move   SPACE : Shoot   Q : Quit"))?;
    out.queue(style::ResetColor)?;
    Ok(())
}
