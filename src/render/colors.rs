//! Named colors used by the figure catalog (CSS4 values).

use super::Color;

pub const AZURE: Color = Color::from_hex(0xF0FFFF);
pub const BLACK: Color = Color::BLACK;
pub const BLUE: Color = Color::from_hex(0x0000FF);
pub const CRIMSON: Color = Color::from_hex(0xDC143C);
pub const DARKGOLDENROD: Color = Color::from_hex(0xB8860B);
pub const DARKGREEN: Color = Color::from_hex(0x006400);
pub const DARKORANGE: Color = Color::from_hex(0xFF8C00);
pub const DARKRED: Color = Color::from_hex(0x8B0000);
pub const DARKVIOLET: Color = Color::from_hex(0x9400D3);
pub const DEEPSKYBLUE: Color = Color::from_hex(0x00BFFF);
pub const FIREBRICK: Color = Color::from_hex(0xB22222);
pub const FORESTGREEN: Color = Color::from_hex(0x228B22);
pub const GRAY: Color = Color::from_hex(0x808080);
pub const GREEN: Color = Color::from_hex(0x008000);
pub const LEMONCHIFFON: Color = Color::from_hex(0xFFFACD);
pub const LIGHTBLUE: Color = Color::from_hex(0xADD8E6);
pub const LIGHTCORAL: Color = Color::from_hex(0xF08080);
pub const LIGHTCYAN: Color = Color::from_hex(0xE0FFFF);
pub const LIGHTGRAY: Color = Color::from_hex(0xD3D3D3);
pub const LIGHTGREEN: Color = Color::from_hex(0x90EE90);
pub const LIGHTYELLOW: Color = Color::from_hex(0xFFFFE0);
pub const LIMEGREEN: Color = Color::from_hex(0x32CD32);
pub const MAGENTA: Color = Color::from_hex(0xFF00FF);
pub const NAVY: Color = Color::from_hex(0x000080);
pub const ORANGE: Color = Color::from_hex(0xFFA500);
pub const ORANGERED: Color = Color::from_hex(0xFF4500);
pub const PALETURQUOISE: Color = Color::from_hex(0xAFEEEE);
pub const PURPLE: Color = Color::from_hex(0x800080);
pub const RED: Color = Color::from_hex(0xFF0000);
pub const ROYALBLUE: Color = Color::from_hex(0x4169E1);
pub const SALMON: Color = Color::from_hex(0xFA8072);
pub const SIENNA: Color = Color::from_hex(0xA0522D);
pub const SKYBLUE: Color = Color::from_hex(0x87CEEB);
pub const STEELBLUE: Color = Color::from_hex(0x4682B4);
pub const WHITE: Color = Color::WHITE;
pub const YELLOW: Color = Color::from_hex(0xFFFF00);

/// Single-letter shorthands (`'g'` is half-intensity green, `'y'` olive-ish).
pub const SHORT_G: Color = Color::rgb(0.0, 0.5, 0.0);
pub const SHORT_Y: Color = Color::rgb(0.75, 0.75, 0.0);
pub const SHORT_M: Color = Color::rgb(0.75, 0.0, 0.75);

/// Default axis/legend frame gray.
pub const FRAME_GRAY: Color = Color::from_hex(0xCCCCCC);
/// Default grid line color.
pub const GRID_GRAY: Color = Color::from_hex(0xB0B0B0);
