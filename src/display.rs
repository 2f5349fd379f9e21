/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game. No game logic is performed; this module only projects the
/// play-field onto the terminal grid and translates it into commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use star_catcher::engine::{BodyRef, Cue};
use star_catcher::entities::{Facing, GameStatus};
use star_catcher::game::GameController;
use star_catcher::physics::{platform_bounds, ArcadePhysics};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_BOMBS: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_PLAYER_HIT: Color = Color::Red;
const C_PLATFORM: Color = Color::Green;
const C_STAR: Color = Color::Yellow;
const C_BOMB: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

// ── Projection ────────────────────────────────────────────────────────────────

/// Maps play-field pixels onto the cells inside the border.
/// Rows 0 (HUD), 1 (top bar), h-2 (bottom bar) and h-1 (hint) are reserved.
struct Grid {
    width: u16,
    height: u16,
    field_w: f32,
    field_h: f32,
}

impl Grid {
    fn new(width: u16, height: u16, game: &GameController) -> Self {
        Grid {
            width,
            height,
            field_w: game.config().width as f32,
            field_h: game.config().height as f32,
        }
    }

    fn inner_cols(&self) -> f32 {
        self.width.saturating_sub(2).max(1) as f32
    }

    fn inner_rows(&self) -> f32 {
        self.height.saturating_sub(4).max(1) as f32
    }

    fn col(&self, x: f32) -> u16 {
        let c = (x / self.field_w * self.inner_cols()).clamp(0.0, self.inner_cols() - 1.0);
        1 + c as u16
    }

    fn row(&self, y: f32) -> u16 {
        let r = (y / self.field_h * self.inner_rows()).clamp(0.0, self.inner_rows() - 1.0);
        2 + r as u16
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    game: &GameController,
    physics: &ArcadePhysics,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let grid = Grid::new(width, height, game);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &grid)?;
    draw_hud(out, game, &grid)?;
    draw_platforms(out, game, &grid)?;
    draw_stars(out, game, &grid)?;
    draw_bombs(out, game, &grid)?;
    draw_player(out, game, physics, &grid)?;
    draw_controls_hint(out, &grid)?;

    if game.status() == GameStatus::GameOver {
        draw_game_over(out, game, &grid)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    let w = grid.width as usize;
    let h = grid.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(grid.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, game: &GameController, grid: &Grid) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(game.display_text()))?;

    let bombs = format!("bombs: {}", game.bombs().len());
    let rx = grid.width.saturating_sub(bombs.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_BOMBS))?;
    out.queue(Print(&bombs))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_platforms<W: Write>(out: &mut W, game: &GameController, grid: &Grid) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_PLATFORM))?;
    for platform in game.platforms() {
        let bounds = platform_bounds(platform);
        let left = grid.col(bounds.left().max(0.0));
        let right = grid.col(bounds.right().min(grid.field_w));
        let len = (right.saturating_sub(left) + 1) as usize;
        out.queue(cursor::MoveTo(left, grid.row(bounds.top())))?;
        out.queue(Print("▀".repeat(len)))?;
    }
    Ok(())
}

fn draw_stars<W: Write>(out: &mut W, game: &GameController, grid: &Grid) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_STAR))?;
    for star in game.stars().iter().filter(|s| s.active) {
        out.queue(cursor::MoveTo(grid.col(star.x), grid.row(star.y)))?;
        out.queue(Print("★"))?;
    }
    Ok(())
}

fn draw_bombs<W: Write>(out: &mut W, game: &GameController, grid: &Grid) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_BOMB))?;
    for bomb in game.bombs() {
        out.queue(cursor::MoveTo(grid.col(bomb.x), grid.row(bomb.y)))?;
        out.queue(Print("●"))?;
    }
    Ok(())
}

fn draw_player<W: Write>(
    out: &mut W,
    game: &GameController,
    physics: &ArcadePhysics,
    grid: &Grid,
) -> std::io::Result<()> {
    let p = game.player();
    let color = match physics.cue_for(BodyRef::Player) {
        Some(Cue::Defeat) => C_PLAYER_HIT,
        _ => C_PLAYER,
    };
    let glyph = match p.facing {
        Facing::Left => "◄",
        Facing::Right => "►",
        Facing::Idle => "▲",
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(grid.col(p.x), grid.row(p.y)))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, grid.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Run   ↑ W SPACE : Jump   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, game: &GameController, grid: &Grid) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let score_line = game.display_text();
    let hint = "R - New Game  Q - Quit";

    let cx = grid.width / 2;
    let total_rows = lines.len() + 2;
    let start_row = (grid.height / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
