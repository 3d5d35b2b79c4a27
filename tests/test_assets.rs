mod common;

use std::fs;
use std::path::PathBuf;

use crossterm::style::Color;

use thunder::assets::{Asset, AssetError, Assets};
use thunder::sprite::Sprite;

/// A fresh scratch asset root under the system temp dir.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("thunder-assets-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn absent_name_is_none_not_an_error() {
    let assets = Assets::new(scratch("absent"));
    assert!(matches!(assets.load("nope"), Ok(None)));
}

#[test]
fn file_resolves_with_or_without_extension() {
    let root = scratch("single");
    fs::write(root.join("dot.txt"), "#!color red\n.\n").unwrap();
    let assets = Assets::new(&root);

    let expected = Sprite::from_rows(&["."]).with_color(Color::Red);
    assert_eq!(assets.load("dot").unwrap(), Some(Asset::Image(expected.clone())));
    assert_eq!(assets.load("dot.txt").unwrap(), Some(Asset::Image(expected)));
}

#[test]
fn directory_resolves_to_frames_in_name_order() {
    let root = scratch("sequence");
    fs::create_dir(root.join("boom")).unwrap();
    fs::write(root.join("boom").join("2.txt"), "b\n").unwrap();
    fs::write(root.join("boom").join("1.txt"), "a\n").unwrap();
    let assets = Assets::new(&root);

    let frames = assets.require_sequence("boom").unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].glyph(0, 0), Some('a'));
    assert_eq!(frames[1].glyph(0, 0), Some('b'));
}

#[test]
fn trailing_blank_rows_are_dropped() {
    let root = scratch("trailing");
    fs::write(root.join("bar.txt"), "==\n\n  \n").unwrap();
    let sprite = Assets::new(&root).require_image("bar").unwrap();
    assert_eq!((sprite.width(), sprite.height()), (2, 1));
}

#[test]
fn unknown_color_is_malformed() {
    let root = scratch("malformed");
    fs::write(root.join("bad.txt"), "#!color plaid\nx\n").unwrap();
    assert!(matches!(
        Assets::new(&root).load("bad"),
        Err(AssetError::Malformed { .. })
    ));
}

#[test]
fn required_assets_report_what_is_missing() {
    let root = scratch("required");
    fs::create_dir(root.join("empty")).unwrap();
    let assets = Assets::new(&root);

    match assets.require_image("player/player") {
        Err(AssetError::Missing(name)) => assert_eq!(name, "player/player"),
        other => panic!("expected Missing, got {other:?}"),
    }
    assert!(matches!(assets.require_sequence("empty"), Err(AssetError::Empty(_))));
    // A directory is not an image.
    assert!(matches!(assets.require_image("empty"), Err(AssetError::Missing(_))));
}

#[test]
fn shipped_sheet_is_complete() {
    let sheet = common::sheet();
    assert_eq!(sheet.explosion.len(), 4);
    assert_eq!((sheet.player.width(), sheet.player.height()), (5, 3));
    assert_eq!((sheet.player_bullet.width(), sheet.player_bullet.height()), (1, 1));
    // Each rank looks different.
    for (i, a) in sheet.enemies.iter().enumerate() {
        for b in &sheet.enemies[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
