use crossterm::style::Color;

use thunder::canvas::{Canvas, Cell};
use thunder::sprite::{collide_mask, parse_color, Rect, Sprite};

// ── Sprite ────────────────────────────────────────────────────────────────────

#[test]
fn rows_are_padded_to_widest() {
    let s = Sprite::from_rows(&["#", "###"]);
    assert_eq!((s.width(), s.height()), (3, 2));
    assert_eq!(s.glyph(2, 0), Some(' '));
    assert!(!s.is_opaque(2, 0));
    assert!(s.is_opaque(2, 1));
    assert_eq!(s.glyph(3, 0), None);
    assert!(!s.is_opaque(3, 0));
}

#[test]
fn color_names_follow_the_palette() {
    assert_eq!(parse_color("dark_red"), Some(Color::DarkRed));
    assert_eq!(parse_color(" cyan "), Some(Color::Cyan));
    assert_eq!(parse_color("chartreuse"), None);
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_anchor_setters() {
    let mut r = Rect::new(0.0, 0.0, 4.0, 2.0);
    r.set_centerx(10.0);
    r.set_bottom(20.0);
    assert_eq!(r.x, 8.0);
    assert_eq!(r.top(), 18.0);
    assert_eq!(r.centery(), 19.0);
    assert_eq!(r.right(), 12.0);

    r.set_centery(5.0);
    assert_eq!(r.bottom(), 6.0);
}

#[test]
fn rect_snaps_to_nearest_cell() {
    let r = Rect::new(2.4, 7.6, 1.0, 1.0);
    assert_eq!((r.cell_x(), r.cell_y()), (2, 8));
}

// ── Mask collision ────────────────────────────────────────────────────────────

#[test]
fn overlapping_opaque_cells_collide() {
    let a = Sprite::from_rows(&["##", "##"]);
    let b = Sprite::from_rows(&["#"]);
    let ra = Rect::of(&a);
    let rb = Rect::new(1.0, 1.0, 1.0, 1.0);
    assert!(collide_mask(&ra, &a, &rb, &b));
    assert!(collide_mask(&rb, &b, &ra, &a));
}

#[test]
fn overlapping_boxes_without_shared_opaque_cells_do_not_collide() {
    // Boxes overlap on the top-right cell, which is transparent in `a`.
    let a = Sprite::from_rows(&["# ", "##"]);
    let b = Sprite::from_rows(&["#"]);
    let rb = Rect::new(1.0, 0.0, 1.0, 1.0);
    assert!(!collide_mask(&Rect::of(&a), &a, &rb, &b));
}

#[test]
fn disjoint_boxes_do_not_collide() {
    let a = Sprite::from_rows(&["###"]);
    let rb = Rect::new(3.0, 0.0, 3.0, 1.0);
    assert!(!collide_mask(&Rect::of(&a), &a, &rb, &a));
}

// ── Canvas ────────────────────────────────────────────────────────────────────

#[test]
fn blit_keeps_cells_under_transparent_glyphs() {
    let mut canvas = Canvas::new(4, 1);
    canvas.blit(&Sprite::from_rows(&["xxxx"]), 0, 0);
    canvas.blit(&Sprite::from_rows(&["o  o"]).with_color(Color::Red), 0, 0);
    assert_eq!(canvas.row_text(0), "oxxo");
    assert_eq!(canvas.cell(0, 0).map(|c| c.color), Some(Color::Red));
    assert_eq!(canvas.cell(1, 0).map(|c| c.color), Some(Color::White));
}

#[test]
fn blit_clips_at_every_edge() {
    let mut canvas = Canvas::new(3, 3);
    let block = Sprite::from_rows(&["##", "##"]);
    canvas.blit(&block, -1, -1);
    canvas.blit(&block, 2, 2);
    assert_eq!(canvas.row_text(0), "#  ");
    assert_eq!(canvas.row_text(1), "   ");
    assert_eq!(canvas.row_text(2), "  #");
    assert!(canvas.cell(3, 0).is_none());
}

#[test]
fn clear_blanks_everything() {
    let mut canvas = Canvas::new(2, 2);
    canvas.blit(&Sprite::from_rows(&["##", "##"]), 0, 0);
    canvas.clear();
    assert!((0..2).all(|y| canvas.row(y).iter().all(|c| *c == Cell::BLANK)));
}
