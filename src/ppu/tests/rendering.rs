// Per-frame renderer: background tiles, sprites, priority, and clipping

use crate::cartridge::Mirroring;
use crate::ppu::palette;

use super::super::Ppu;
use super::ppu_with_chr_ram;

/// Install an 8x8 tile whose every pixel has the given 2-bit color index
fn install_solid_tile(ppu: &mut Ppu, tile: u16, pixel: u8) {
    let lo = if pixel & 1 != 0 { 0xFF } else { 0x00 };
    let hi = if pixel & 2 != 0 { 0xFF } else { 0x00 };
    for row in 0..8 {
        ppu.write_vram(tile * 16 + row, lo);
        ppu.write_vram(tile * 16 + row + 8, hi);
    }
}

/// A PPU with a solid tile 1, black backdrop, and one background palette set
fn background_ppu() -> Ppu {
    let mut ppu = ppu_with_chr_ram(Mirroring::Horizontal);

    install_solid_tile(&mut ppu, 1, 1);
    ppu.write_vram(0x2000, 1); // top-left nametable entry -> tile 1

    ppu.write_vram(0x3F00, 0x0F); // backdrop: black
    ppu.write_vram(0x3F01, 0x21); // background palette 0, color 1

    ppu.v = 0;
    ppu.fine_x = 0;
    ppu
}

#[test]
fn test_disabled_rendering_fills_backdrop() {
    let mut ppu = background_ppu();
    ppu.ppumask = 0;

    let frame = ppu.render_frame();
    let backdrop = palette::color(0x0F);
    assert_eq!(frame.pixel(0, 0), backdrop);
    assert_eq!(frame.pixel(128, 120), backdrop);
}

#[test]
fn test_background_tile_rendered() {
    let mut ppu = background_ppu();
    ppu.ppumask = 0x08;

    let frame = ppu.render_frame();
    let tile_color = palette::color(0x21);
    let backdrop = palette::color(0x0F);

    // Tile (0,0) covers the top-left 8x8 pixels
    assert_eq!(frame.pixel(0, 0), tile_color);
    assert_eq!(frame.pixel(7, 7), tile_color);
    // The neighbouring tile is empty
    assert_eq!(frame.pixel(8, 0), backdrop);
    assert_eq!(frame.pixel(0, 8), backdrop);
}

#[test]
fn test_attribute_selects_palette_group() {
    let mut ppu = background_ppu();
    ppu.ppumask = 0x08;
    ppu.write_vram(0x3F05, 0x16); // background palette 1, color 1

    // Attribute byte for the top-left 4x4 area: palette 1 in the top-left
    // quadrant
    ppu.write_vram(0x23C0, 0b0000_0001);

    let frame = ppu.render_frame();
    assert_eq!(frame.pixel(0, 0), palette::color(0x16));
}

#[test]
fn test_coarse_scroll_shifts_tile_selection() {
    let mut ppu = background_ppu();
    ppu.ppumask = 0x08;

    // Place the tile at nametable column 1 and scroll one tile to the right:
    // it should appear at the left edge again
    ppu.write_vram(0x2000, 0);
    ppu.write_vram(0x2001, 1);
    ppu.v = 0x0001; // coarse X = 1

    let frame = ppu.render_frame();
    assert_eq!(frame.pixel(0, 0), palette::color(0x21));
}

#[test]
fn test_fine_scroll_shifts_pixels() {
    let mut ppu = background_ppu();
    ppu.ppumask = 0x08;
    ppu.fine_x = 3;

    let frame = ppu.render_frame();
    let tile_color = palette::color(0x21);
    let backdrop = palette::color(0x0F);

    // The tile's 8 columns now occupy x = 0..5 (columns 0-2 scrolled off)
    assert_eq!(frame.pixel(4, 0), tile_color);
    assert_eq!(frame.pixel(5, 0), backdrop);
}

/// A PPU with a solid sprite tile 2 and sprite palette 0 set
fn sprite_ppu() -> Ppu {
    let mut ppu = ppu_with_chr_ram(Mirroring::Horizontal);

    install_solid_tile(&mut ppu, 2, 2);
    ppu.write_vram(0x3F00, 0x0F);
    ppu.write_vram(0x3F12, 0x27); // sprite palette 0, color 2

    ppu.v = 0;
    ppu.fine_x = 0;
    ppu.ppumask = 0x10;
    ppu
}

/// Fill one OAM slot
fn set_sprite(ppu: &mut Ppu, index: usize, y: u8, tile: u8, attr: u8, x: u8) {
    ppu.oam[index * 4] = y;
    ppu.oam[index * 4 + 1] = tile;
    ppu.oam[index * 4 + 2] = attr;
    ppu.oam[index * 4 + 3] = x;
}

#[test]
fn test_sprite_rendered_with_one_line_offset() {
    let mut ppu = sprite_ppu();
    set_sprite(&mut ppu, 0, 9, 2, 0x00, 20);

    let frame = ppu.render_frame();
    let sprite_color = palette::color(0x27);
    let backdrop = palette::color(0x0F);

    // OAM Y is top-1: the sprite's first row lands on scanline 10
    assert_eq!(frame.pixel(20, 9), backdrop);
    assert_eq!(frame.pixel(20, 10), sprite_color);
    assert_eq!(frame.pixel(27, 17), sprite_color);
    assert_eq!(frame.pixel(28, 10), backdrop);
}

#[test]
fn test_lower_index_sprite_wins_overlap() {
    let mut ppu = sprite_ppu();
    ppu.write_vram(0x3F16, 0x2A); // sprite palette 1, color 2

    // Both sprites cover (40,21); sprite 0 uses palette 0, sprite 1 palette 1
    set_sprite(&mut ppu, 0, 20, 2, 0x00, 40);
    set_sprite(&mut ppu, 1, 20, 2, 0x01, 40);

    let frame = ppu.render_frame();
    assert_eq!(frame.pixel(40, 21), palette::color(0x27));
}

#[test]
fn test_behind_background_sprite_hidden_by_opaque_bg() {
    let mut ppu = sprite_ppu();
    ppu.ppumask = 0x18; // background + sprites

    // Opaque background tile in the top-left corner
    install_solid_tile(&mut ppu, 1, 1);
    ppu.write_vram(0x2000, 1);
    ppu.write_vram(0x3F01, 0x21);

    // Behind-background sprite overlapping that tile
    set_sprite(&mut ppu, 0, 0, 2, 0x20, 0);

    let frame = ppu.render_frame();
    assert_eq!(
        frame.pixel(2, 2),
        palette::color(0x21),
        "opaque background occludes the sprite"
    );
}

#[test]
fn test_behind_background_sprite_visible_over_backdrop() {
    let mut ppu = sprite_ppu();
    ppu.ppumask = 0x18;

    // No background tile here: the behind flag only defers to opaque pixels
    set_sprite(&mut ppu, 0, 99, 2, 0x20, 100);

    let frame = ppu.render_frame();
    assert_eq!(frame.pixel(100, 100), palette::color(0x27));
}

#[test]
fn test_horizontal_flip() {
    let mut ppu = sprite_ppu();

    // Tile with only its leftmost column set (color 2)
    for row in 0..8 {
        ppu.write_vram(3 * 16 + row, 0x00);
        ppu.write_vram(3 * 16 + row + 8, 0x80);
    }
    set_sprite(&mut ppu, 0, 49, 3, 0x40, 60);

    let frame = ppu.render_frame();
    let sprite_color = palette::color(0x27);
    assert_eq!(frame.pixel(67, 50), sprite_color, "flipped to the right edge");
    assert_eq!(frame.pixel(60, 50), palette::color(0x0F));
}

#[test]
fn test_vertical_flip() {
    let mut ppu = sprite_ppu();

    // Tile with only its top row set (color 2)
    ppu.write_vram(4 * 16, 0x00);
    ppu.write_vram(4 * 16 + 8, 0xFF);
    for row in 1..8 {
        ppu.write_vram(4 * 16 + row, 0x00);
        ppu.write_vram(4 * 16 + row + 8, 0x00);
    }
    set_sprite(&mut ppu, 0, 69, 4, 0x80, 80);

    let frame = ppu.render_frame();
    let sprite_color = palette::color(0x27);
    assert_eq!(frame.pixel(80, 77), sprite_color, "flipped to the bottom row");
    assert_eq!(frame.pixel(80, 70), palette::color(0x0F));
}

#[test]
fn test_sprite_clipped_at_right_edge() {
    let mut ppu = sprite_ppu();
    set_sprite(&mut ppu, 0, 119, 2, 0x00, 252);

    // Must not panic; the visible columns render
    let frame = ppu.render_frame();
    assert_eq!(frame.pixel(255, 120), palette::color(0x27));
}
